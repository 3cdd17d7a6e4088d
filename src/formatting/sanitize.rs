//! Allow-listed subset renderer for structured markup returned by the
//! generation service.
//!
//! Only table, container and inline emphasis elements survive. Attributes are
//! limited to `class` and the table layout attributes the matrix template needs.
//! A fragment made only of allowed tags and attributes comes out unchanged.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const ALLOWED_TAGS: &[&str] = &[
    "table", "thead", "tbody", "tfoot", "tr", "th", "td", "caption", "colgroup", "col", "div",
    "span", "p", "br", "b", "strong", "i", "em", "u", "sup", "sub",
];

const ALLOWED_ATTRIBUTES: &[&str] = &["class", "rowspan", "colspan", "border", "align", "valign"];

const NUMERIC_ATTRIBUTES: &[&str] = &["rowspan", "colspan", "border"];

static COMMENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("COMMENT_REGEX is a valid regex pattern"));

static SCRIPT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>")
        .expect("SCRIPT_REGEX is a valid regex pattern")
});

static STYLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("STYLE_REGEX is a valid regex pattern")
});

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)([^>]*)>").expect("TAG_REGEX is a valid regex pattern")
});

static ATTRIBUTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*("[^"]*"|'[^']*'|[^\s"'>]+))?"#)
        .expect("ATTRIBUTE_REGEX is a valid regex pattern")
});

pub fn sanitize_markup(markup: &str) -> String {
    let without_comments = COMMENT_REGEX.replace_all(markup, "");
    let without_scripts = SCRIPT_REGEX.replace_all(&without_comments, "");
    let without_styles = STYLE_REGEX.replace_all(&without_scripts, "");

    TAG_REGEX
        .replace_all(&without_styles, |caps: &Captures| sanitize_tag(caps))
        .into_owned()
}

fn sanitize_tag(caps: &Captures) -> String {
    let whole = &caps[0];
    let closing = &caps[1];
    let name = &caps[2];
    let raw_attributes = &caps[3];

    if !ALLOWED_TAGS.contains(&name.to_ascii_lowercase().as_str()) {
        return String::new();
    }
    if !closing.is_empty() {
        return format!("</{}>", name);
    }

    let trimmed = raw_attributes.trim_end();
    let self_closing = trimmed.ends_with('/');
    let attribute_text = trimmed.trim_end_matches('/');

    let mut kept = Vec::new();
    let mut dropped_any = false;
    for attr in ATTRIBUTE_REGEX.captures_iter(attribute_text) {
        let attr_name = attr[1].to_ascii_lowercase();
        let value = attr.get(2).map(|v| v.as_str());
        if is_allowed_attribute(&attr_name, value) {
            kept.push(attr[0].to_string());
        } else {
            dropped_any = true;
        }
    }

    if !dropped_any {
        return whole.to_string();
    }

    let mut rebuilt = format!("<{}", name);
    for attr in kept {
        rebuilt.push(' ');
        rebuilt.push_str(&attr);
    }
    if self_closing {
        rebuilt.push_str(" /");
    }
    rebuilt.push('>');
    rebuilt
}

fn is_allowed_attribute(name: &str, value: Option<&str>) -> bool {
    if !ALLOWED_ATTRIBUTES.contains(&name) {
        return false;
    }
    if NUMERIC_ATTRIBUTES.contains(&name) {
        let unquoted = value
            .unwrap_or_default()
            .trim_matches(|c| c == '"' || c == '\'');
        return !unquoted.is_empty() && unquoted.chars().all(|c| c.is_ascii_digit());
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_table_passes_through_unchanged() {
        let table = r#"<table border="1"><tr><th rowspan="2" colspan='3'>TT</th></tr><tr><td class="text-left">Số &amp; phép tính</td></tr></table>"#;
        assert_eq!(sanitize_markup(table), table);
    }

    #[test]
    fn self_closing_break_is_kept() {
        assert_eq!(sanitize_markup("<div>a<br/>b<br></div>"), "<div>a<br/>b<br></div>");
    }

    #[test]
    fn script_and_style_blocks_are_removed_with_content() {
        let dirty = "<div><script>alert('x')</script>ok<STYLE>td{}</STYLE></div>";
        assert_eq!(sanitize_markup(dirty), "<div>ok</div>");
    }

    #[test]
    fn event_handlers_and_styles_are_dropped() {
        let dirty = r#"<td onclick="steal()" class="bold" style="color:red">1</td>"#;
        assert_eq!(sanitize_markup(dirty), r#"<td class="bold">1</td>"#);
    }

    #[test]
    fn non_numeric_span_is_dropped() {
        let dirty = r#"<td colspan="x" rowspan=2>1</td>"#;
        assert_eq!(sanitize_markup(dirty), "<td rowspan=2>1</td>");
    }

    #[test]
    fn disallowed_elements_keep_their_text() {
        let dirty = r#"<div><a href="javascript:x">link</a><img src=x onerror=y></div>"#;
        assert_eq!(sanitize_markup(dirty), "<div>link</div>");
    }

    #[test]
    fn comments_are_removed() {
        assert_eq!(sanitize_markup("<table><!-- note --></table>"), "<table></table>");
    }

    #[test]
    fn stray_less_than_is_left_alone() {
        assert_eq!(sanitize_markup("<td>1 < 2</td>"), "<td>1 < 2</td>");
    }

    fn any_tag_has_attribute(markup: &str, attribute: &str) -> bool {
        TAG_REGEX.captures_iter(markup).any(|tag| {
            ATTRIBUTE_REGEX
                .captures_iter(&tag[3])
                .any(|attr| attr[1].eq_ignore_ascii_case(attribute))
        })
    }

    #[test]
    fn uppercase_handlers_are_dropped() {
        let clean = sanitize_markup("<TD ONCLICK=x CLASS=a>1</TD>");
        assert_eq!(clean, "<TD CLASS=a>1</TD>");
    }

    #[test]
    fn quoted_angle_bracket_cannot_smuggle_a_handler() {
        let clean = sanitize_markup(r#"<td class="a>b" onclick=x>1</td>"#);
        assert!(!any_tag_has_attribute(&clean, "onclick"));
        assert!(clean.starts_with("<td class>"));
    }

    #[test]
    fn split_script_tag_leaves_no_script() {
        let clean = sanitize_markup("<scr<script>ipt>alert(1)</script>");
        assert!(!clean.to_ascii_lowercase().contains("<script"));
        assert!(!clean.contains("alert"));
    }
}
