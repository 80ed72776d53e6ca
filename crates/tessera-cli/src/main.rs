mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tessera_core::BoundingBox;
use tracing_subscriber::EnvFilter;

use commands::table::TableArgs;

#[derive(Parser)]
#[command(
    name = "tessera",
    version,
    about = "Rebuild tables from positioned text elements"
)]
struct Cli {
    /// Log table building decisions to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a table from a JSON array of elements
    Table {
        /// Path to a JSON file of elements ({"bbox": {...}, "text": "..."})
        input_file: PathBuf,

        #[command(flatten)]
        table: TableArgs,
    },
    /// Build a table from one page of a PDF (requires pdftotext)
    Pdf {
        /// Path to PDF file
        pdf_file: PathBuf,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Only use elements inside x0,x1,y0,y1 (PDF points, y up)
        #[arg(long, value_parser = parse_region)]
        region: Option<BoundingBox>,

        #[command(flatten)]
        table: TableArgs,
    },
    /// Print the elements pdftotext finds in a PDF as JSON
    Elements {
        /// Path to PDF file
        pdf_file: PathBuf,

        /// Only print this page
        #[arg(short, long)]
        page: Option<usize>,
    },
}

fn parse_region(s: &str) -> Result<BoundingBox, String> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("'{v}': {e}")))
        .collect::<Result<_, _>>()?;
    match values.as_slice() {
        &[x0, x1, y0, y1] => Ok(BoundingBox::new(x0, x1, y0, y1)),
        _ => Err(format!("expected x0,x1,y0,y1 but got {} value(s)", values.len())),
    }
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn init_logging(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Table { input_file, table } => commands::table::run(input_file, &table),
        Commands::Pdf {
            pdf_file,
            page,
            region,
            table,
        } => commands::pdf::run(pdf_file, page, region, &table),
        Commands::Elements { pdf_file, page } => commands::pdf::elements(pdf_file, page),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region() {
        assert_eq!(
            parse_region("0, 200,10,50").unwrap(),
            BoundingBox::new(0.0, 200.0, 10.0, 50.0)
        );
        assert!(parse_region("1,2,3").is_err());
        assert!(parse_region("a,2,3,4").is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "info");
        assert_eq!(log_level(2), "debug");
        assert_eq!(log_level(5), "debug");

        let cli = Cli::parse_from(["tessera", "-vv", "table", "in.json"]);
        assert_eq!(log_level(cli.verbose), "debug");
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
