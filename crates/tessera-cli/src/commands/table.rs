use clap::Args;
use std::path::{Path, PathBuf};
use tessera_core::error::TesseraError;
use tessera_core::{add_header_to_table, BandOverlap, TableMode, TableOptions, TextElement};
use tracing::info;

use crate::output;

/// Flags shared by every command that builds a table.
#[derive(Args, Debug, Default)]
pub struct TableArgs {
    /// Require every row/column position to be filled
    #[arg(long)]
    pub simple: bool,

    /// Column names to use instead of consuming the first row
    #[arg(long = "header", value_name = "NAME", conflicts_with = "no_header")]
    pub header: Vec<String>,

    /// Print the plain text grid instead of header-keyed records
    #[arg(long)]
    pub no_header: bool,

    /// Trim whitespace around cell text
    #[arg(long)]
    pub strip: bool,

    /// Drop rows that repeat the first row
    #[arg(long)]
    pub dedupe_header: bool,

    /// Treat boxes that share only an edge as overlapping
    #[arg(long)]
    pub touching: bool,

    /// JSON file with table options; flags above take precedence
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Output format: json (default) or tsv
    #[arg(short, long, default_value = "json")]
    pub output: String,
}

impl TableArgs {
    pub fn mode(&self) -> TableMode {
        if self.simple {
            TableMode::Simple
        } else {
            TableMode::Sparse
        }
    }

    pub fn table_options(&self) -> Result<TableOptions, TesseraError> {
        let mut options = match &self.options {
            Some(path) => load_options(path)?,
            None => TableOptions::default(),
        };
        if self.strip {
            options.strip_text = true;
        }
        if self.dedupe_header {
            options.remove_duplicate_header_rows = true;
        }
        if self.touching {
            options.overlap = BandOverlap::Touching;
        }
        Ok(options)
    }
}

fn load_options(path: &Path) -> Result<TableOptions, TesseraError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn run(input_file: PathBuf, args: &TableArgs) -> Result<(), TesseraError> {
    let json = std::fs::read(&input_file)?;
    let elements: Vec<TextElement> = serde_json::from_slice(&json)?;
    info!(elements = elements.len(), file = %input_file.display(), "loaded elements");

    let options = args.table_options()?;
    let text = tessera_core::extract_text(&elements, args.mode(), &options)?;
    emit(text, args)
}

/// Print a text grid, labelled with headers unless `--no-header` is given.
pub fn emit(text: Vec<Vec<String>>, args: &TableArgs) -> Result<(), TesseraError> {
    let as_tsv = args.output == "tsv";

    if args.no_header {
        let rendered = if as_tsv {
            output::tsv::grid(&text)
        } else {
            output::json::to_string(&text)?
        };
        println!("{rendered}");
        return Ok(());
    }

    let header = (!args.header.is_empty()).then_some(args.header.as_slice());
    let records = add_header_to_table(&text, header)?;
    let rendered = if as_tsv {
        output::tsv::records(&records)
    } else {
        output::json::to_string(&records)?
    };
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_options_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"overlap": "touching", "strip_text": false}}"#).unwrap();

        let args = TableArgs {
            strip: true,
            options: Some(file.path().to_path_buf()),
            ..TableArgs::default()
        };
        let options = args.table_options().unwrap();
        assert_eq!(options.overlap, BandOverlap::Touching);
        assert!(options.strip_text);
        assert!(!options.remove_duplicate_header_rows);
    }

    #[test]
    fn test_mode() {
        let args = TableArgs {
            simple: true,
            ..TableArgs::default()
        };
        assert_eq!(args.mode(), TableMode::Simple);
        assert_eq!(TableArgs::default().mode(), TableMode::Sparse);
    }

    #[test]
    fn test_bad_options_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let args = TableArgs {
            options: Some(file.path().to_path_buf()),
            ..TableArgs::default()
        };
        assert!(matches!(args.table_options(), Err(TesseraError::Json(_))));
    }
}
