use super::{normalize_plain, sanitize::sanitize_markup, BoilerplateFilter, Content, Line};

/// MIME type legacy word processors open as a document.
pub const MSWORD_CONTENT_TYPE: &str = "application/msword";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const DEFAULT_FILENAME: &str = "document.doc";

const DOCUMENT_STYLE: &str = "
      body { font-family: 'Times New Roman', Times, serif; font-size: 13pt; line-height: 1.3; text-align: justify; }
      table { border-collapse: collapse; width: 100%; margin-bottom: 20px; }
      th, td { border: 1px solid black; padding: 5px; text-align: center; font-size: 11pt; }
      .text-left { text-align: left; }
      .bold { font-weight: bold; }
      .center { text-align: center; }
      .uppercase { text-transform: uppercase; }
      @page { size: 21cm 29.7cm; margin: 2cm 2cm 2cm 2.5cm; }
";

/// A downloadable Word-compatible file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Serializes one generated block into an HTML document Word can open.
#[derive(Debug, Clone, Default)]
pub struct DocumentExporter {
    filter: BoilerplateFilter,
}

impl DocumentExporter {
    pub fn new(filter: BoilerplateFilter) -> Self {
        Self { filter }
    }

    pub fn export_str(&self, text: &str, filename: &str) -> ExportedDocument {
        self.export(&Content::classify(text), filename)
    }

    pub fn export(&self, content: &Content, filename: &str) -> ExportedDocument {
        let filename = safe_filename(filename);
        let body = match content {
            Content::Structured(markup) => sanitize_markup(markup),
            Content::Plain(text) => self.plain_body(text),
        };

        let html = wrap_document(&filename, &body);
        let mut bytes = Vec::with_capacity(UTF8_BOM.len() + html.len());
        bytes.extend_from_slice(UTF8_BOM);
        bytes.extend_from_slice(html.as_bytes());

        ExportedDocument {
            filename,
            content_type: MSWORD_CONTENT_TYPE,
            bytes,
        }
    }

    fn plain_body(&self, text: &str) -> String {
        normalize_plain(text, &self.filter)
            .into_iter()
            .map(|line| match line {
                Line::Spacer => "<br/>".to_string(),
                Line::Heading(text) => format!(
                    r#"<p class="center bold uppercase">{}</p>"#,
                    htmlescape::encode_minimal(&text)
                ),
                Line::Paragraph(text) => format!("<p>{}</p>", htmlescape::encode_minimal(&text)),
            })
            .collect()
    }
}

fn wrap_document(title: &str, body: &str) -> String {
    format!(
        "<html xmlns:o='urn:schemas-microsoft-com:office:office' xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'>\n\
         <head><meta charset='utf-8'><title>{}</title>\n<style>{}</style>\n</head><body>\n{}</body></html>",
        htmlescape::encode_minimal(title),
        DOCUMENT_STYLE,
        body
    )
}

/// Reduces a caller-supplied name to something safe for `Content-Disposition`.
pub fn safe_filename(filename: &str) -> String {
    let base = filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | ';'))
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.');

    if cleaned.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else if cleaned.contains('.') {
        cleaned.to_string()
    } else {
        format!("{}.doc", cleaned)
    }
}
