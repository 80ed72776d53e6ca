use std::io::Write;
use std::process::Command;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::element::TextElement;
use crate::error::TesseraError;
use crate::extraction::{ElementSource, PageElements};
use crate::geometry::BoundingBox;

/// Element source using pdftotext (from poppler-utils).
///
/// Runs `pdftotext -bbox-layout` and turns every text line into one element.
pub struct PdftotextSource;

impl PdftotextSource {
    pub fn new() -> Self {
        PdftotextSource
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementSource for PdftotextSource {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageElements>, TesseraError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| TesseraError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| TesseraError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-bbox-layout")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TesseraError::PdftotextNotFound
                } else {
                    TesseraError::Extraction(format!("pdftotext -bbox-layout failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(TesseraError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        let pages = parse_bbox_layout(&xml)?;
        debug!(
            pages = pages.len(),
            elements = pages.iter().map(|p| p.elements.len()).sum::<usize>(),
            "parsed pdftotext output"
        );
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Parse `pdftotext -bbox-layout` XHTML into per-page line elements.
///
/// pdftotext measures `y` downward from the top of the page; boxes are
/// flipped so that `y` grows upward.
pub fn parse_bbox_layout(xml: &str) -> Result<Vec<PageElements>, TesseraError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<PageElements> = Vec::new();
    let mut line_box: Option<RawBox> = None;
    let mut words: Vec<String> = Vec::new();
    let mut in_word = false;

    loop {
        match reader.read_event()? {
            Event::Start(tag) => match tag.name().as_ref() {
                b"page" => pages.push(start_page(&tag, pages.len() + 1)?),
                b"line" => {
                    line_box = Some(RawBox::from_tag(&tag)?);
                    words.clear();
                }
                b"word" => in_word = true,
                _ => {}
            },
            Event::Empty(tag) if tag.name().as_ref() == b"page" => {
                pages.push(start_page(&tag, pages.len() + 1)?);
            }
            Event::Text(text) if in_word => {
                let word = text.unescape()?;
                let word = word.trim();
                if !word.is_empty() {
                    words.push(word.to_string());
                }
            }
            Event::End(tag) => match tag.name().as_ref() {
                b"word" => in_word = false,
                b"line" => {
                    let (Some(raw), Some(page)) = (line_box.take(), pages.last_mut()) else {
                        continue;
                    };
                    let text = words.join(" ");
                    words.clear();
                    if text.is_empty() {
                        continue;
                    }
                    page.elements.push(TextElement {
                        page_number: page.page_number,
                        bbox: raw.flip(page.height),
                        text,
                    });
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn start_page(tag: &BytesStart<'_>, page_number: usize) -> Result<PageElements, TesseraError> {
    Ok(PageElements {
        page_number,
        width: required_f64(tag, "width")?,
        height: required_f64(tag, "height")?,
        elements: Vec::new(),
    })
}

/// A box as pdftotext reports it, with `y` measured from the top.
#[derive(Debug, Clone, Copy)]
struct RawBox {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl RawBox {
    fn from_tag(tag: &BytesStart<'_>) -> Result<Self, TesseraError> {
        Ok(RawBox {
            x_min: required_f64(tag, "xMin")?,
            y_min: required_f64(tag, "yMin")?,
            x_max: required_f64(tag, "xMax")?,
            y_max: required_f64(tag, "yMax")?,
        })
    }

    fn flip(self, page_height: f64) -> BoundingBox {
        BoundingBox::new(
            self.x_min,
            self.x_max,
            page_height - self.y_max,
            page_height - self.y_min,
        )
    }
}

fn required_f64(tag: &BytesStart<'_>, name: &str) -> Result<f64, TesseraError> {
    let raw = attr(tag, name)?.ok_or_else(|| {
        TesseraError::Extraction(format!(
            "<{}> is missing attribute '{}'",
            String::from_utf8_lossy(tag.name().as_ref()),
            name
        ))
    })?;
    raw.trim().parse().map_err(|_| {
        TesseraError::Extraction(format!("attribute {name}=\"{raw}\" is not a number"))
    })
}

fn attr(tag: &BytesStart<'_>, name: &str) -> Result<Option<String>, TesseraError> {
    for attribute in tag.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        if attribute.key.as_ref() == name.as_bytes() {
            return Ok(Some(attribute.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
