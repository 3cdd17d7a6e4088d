use super::{normalize_plain, sanitize::sanitize_markup, BoilerplateFilter, Content, Line};

const SERIF_FONT: &str = "'Times New Roman', Times, serif";

/// Turns one generated block into preview markup.
#[derive(Debug, Clone, Default)]
pub struct ContentRenderer {
    filter: BoilerplateFilter,
}

impl ContentRenderer {
    pub fn new(filter: BoilerplateFilter) -> Self {
        Self { filter }
    }

    pub fn render_str(&self, text: &str) -> String {
        self.render(&Content::classify(text))
    }

    pub fn render(&self, content: &Content) -> String {
        match content {
            Content::Structured(markup) => render_structured(markup),
            Content::Plain(text) => self.render_plain(text),
        }
    }

    fn render_plain(&self, text: &str) -> String {
        let mut html = format!(
            r#"<div class="plain-document" style="font-family: {SERIF_FONT}; font-size: 13pt; text-align: justify; line-height: 1.5;">"#
        );
        for line in normalize_plain(text, &self.filter) {
            match line {
                Line::Spacer => html.push_str(r#"<div class="spacer" style="height: 1rem;"></div>"#),
                Line::Heading(text) => {
                    html.push_str(
                        r#"<p class="heading" style="font-weight: bold; text-align: center; text-transform: uppercase; padding: 0.5rem 0;">"#,
                    );
                    html.push_str(&htmlescape::encode_minimal(&text));
                    html.push_str("</p>");
                }
                Line::Paragraph(text) => {
                    html.push_str("<p>");
                    html.push_str(&htmlescape::encode_minimal(&text));
                    html.push_str("</p>");
                }
            }
        }
        html.push_str("</div>");
        html
    }
}

fn render_structured(markup: &str) -> String {
    format!(
        r#"<div class="content-scroll" style="overflow-x: auto;"><div class="table-standard" style="min-width: 1200px; font-family: {SERIF_FONT}; font-size: 10pt;">{}</div></div>"#,
        sanitize_markup(markup)
    )
}
