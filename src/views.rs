//! Server-rendered configuration form and preview page.

use htmlescape::encode_minimal;

use crate::formatting::ContentRenderer;
use crate::models::domain::exam_document::ExamSection;
use crate::models::domain::exam_options::{Duration, Grade, Scale, ScopeMode, Subject};
use crate::models::dto::request::GenerationRequest;
use crate::services::session::{SessionSnapshot, SessionStatus};

const PAGE_STYLE: &str = "
  body { margin: 0; background: #f1f5f9; font-family: system-ui, sans-serif; color: #1e293b; }
  header { background: #1e3a8a; color: #fff; padding: 1.5rem 2rem; }
  header h1 { margin: 0; text-transform: uppercase; }
  main { display: grid; grid-template-columns: 22rem 1fr; gap: 2rem; padding: 2rem; }
  form label { display: block; font-size: 0.7rem; font-weight: 800; text-transform: uppercase; margin: 1rem 0 0.3rem; color: #64748b; }
  form select, form input { width: 100%; padding: 0.6rem; }
  form button { margin-top: 1.5rem; width: 100%; padding: 0.9rem; background: #1d4ed8; color: #fff; font-weight: 800; border: 0; }
  .banner { padding: 1rem; border-radius: 0.5rem; margin-bottom: 1rem; }
  .banner.error { background: #fee2e2; color: #991b1b; }
  .banner.info { background: #dbeafe; color: #1e3a8a; }
  .tabs a { display: inline-block; padding: 0.8rem 1.2rem; text-decoration: none; font-weight: 800; color: #475569; }
  .tabs a.active { background: #1d4ed8; color: #fff; }
  .download { float: right; background: #059669; color: #fff; padding: 0.7rem 1.5rem; text-decoration: none; font-weight: 800; }
  .paper { background: #fff; margin: 1rem auto; padding: 3rem; max-width: 21cm; }
  .paper.wide { max-width: 32cm; }
  .table-standard table { width: 100%; border-collapse: collapse; border: 1px solid black; table-layout: fixed; }
  .table-standard th, .table-standard td { border: 1px solid black; padding: 4px 2px; text-align: center; vertical-align: middle; word-wrap: break-word; }
  .table-standard th { background-color: #f8fafc; font-weight: bold; font-size: 9pt; }
";

pub fn render_page(
    snapshot: &SessionSnapshot,
    tab: ExamSection,
    renderer: &ContentRenderer,
) -> String {
    let defaults = GenerationRequest::default();
    let form_values = snapshot.last_request.as_ref().unwrap_or(&defaults);

    format!(
        "<!DOCTYPE html>\n<html lang=\"vi\"><head><meta charset=\"utf-8\"><title>Soạn hồ sơ đề kiểm tra</title><style>{style}</style></head>\
         <body><header><h1>{institution}</h1><p>Trợ lý AI soạn thảo hồ sơ đề kiểm tra</p></header>\
         <main><aside>{form}</aside><section>{status}{result}</section></main></body></html>",
        style = PAGE_STYLE,
        institution = encode_minimal(&form_values.institution_name),
        form = render_form(form_values, snapshot.status == SessionStatus::Generating),
        status = render_status(&snapshot.status),
        result = render_result(snapshot, tab, renderer),
    )
}

fn render_form(values: &GenerationRequest, generating: bool) -> String {
    let mut html = String::from(r#"<form method="post" action="/exams">"#);

    html.push_str(&select_field(
        "Môn học",
        "subject",
        Subject::ALL.iter().map(|s| s.label()),
        &values.subject,
    ));
    html.push_str(&select_field(
        "Lớp",
        "grade_level",
        Grade::ALL.iter().map(|g| g.label()),
        &values.grade_level,
    ));
    html.push_str(&select_field(
        "Thang điểm",
        "score_scale",
        Scale::ALL.iter().map(|s| s.label()),
        &values.score_scale,
    ));
    html.push_str(&select_field(
        "Thời gian làm bài",
        "duration_label",
        Duration::ALL.iter().map(|d| d.label()),
        &values.duration_label,
    ));

    html.push_str(&format!(
        r#"<label for="institution_name">Đơn vị</label><input id="institution_name" name="institution_name" type="text" value="{}">"#,
        encode_minimal(&values.institution_name)
    ));

    html.push_str(r#"<label for="scope_mode">Phạm vi kiến thức</label><select id="scope_mode" name="scope_mode">"#);
    for mode in ScopeMode::ALL {
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            mode.slug(),
            selected(mode == values.scope_mode),
            mode.label()
        ));
    }
    html.push_str("</select>");

    html.push_str(&format!(
        r#"<input id="specific_topic" name="specific_topic" type="text" placeholder="Nhập chương hoặc chủ đề (khi chọn Theo chủ đề)..." value="{}">"#,
        encode_minimal(values.specific_topic.as_deref().unwrap_or_default())
    ));

    html.push_str(&format!(
        r#"<button type="submit"{}>Tạo hồ sơ đề</button></form>"#,
        if generating { " disabled" } else { "" }
    ));
    html
}

fn select_field<'a>(
    label: &str,
    name: &str,
    options: impl Iterator<Item = &'a str>,
    current: &str,
) -> String {
    let mut html = format!(
        r#"<label for="{name}">{label}</label><select id="{name}" name="{name}">"#
    );
    let mut matched = false;
    for option in options {
        let is_current = option == current;
        matched |= is_current;
        html.push_str(&format!(
            r#"<option value="{value}"{sel}>{text}</option>"#,
            value = encode_minimal(option),
            sel = selected(is_current),
            text = encode_minimal(option)
        ));
    }
    if !matched && !current.is_empty() {
        html.push_str(&format!(
            r#"<option value="{}" selected>{}</option>"#,
            encode_minimal(current),
            encode_minimal(current)
        ));
    }
    html.push_str("</select>");
    html
}

fn selected(is_selected: bool) -> &'static str {
    if is_selected {
        " selected"
    } else {
        ""
    }
}

fn render_status(status: &SessionStatus) -> String {
    match status {
        SessionStatus::Idle => {
            r#"<div class="banner info">Hệ thống đã sẵn sàng. Chọn cấu hình và bấm "Tạo hồ sơ đề".</div>"#
                .to_string()
        }
        SessionStatus::Generating => {
            r#"<div class="banner info">Đang biên soạn hồ sơ đề thi...</div>"#.to_string()
        }
        SessionStatus::Ready => String::new(),
        SessionStatus::Failed(message) => format!(
            r#"<div class="banner error" role="alert">{}</div>"#,
            encode_minimal(message)
        ),
    }
}

fn render_result(
    snapshot: &SessionSnapshot,
    tab: ExamSection,
    renderer: &ContentRenderer,
) -> String {
    let Some(document) = snapshot.document.as_deref() else {
        return String::new();
    };

    let mut html = String::from(r#"<nav class="tabs">"#);
    for section in ExamSection::ALL {
        html.push_str(&format!(
            r#"<a href="/?tab={}"{}>{}</a>"#,
            section.slug(),
            if section == tab { r#" class="active""# } else { "" },
            encode_minimal(section.label())
        ));
    }
    html.push_str("</nav>");

    html.push_str(&format!(
        r#"<a class="download" href="/api/exams/current/{}/download">XUẤT WORD (.DOC)</a>"#,
        tab.slug()
    ));
    html.push_str(&format!(
        r#"<div class="paper{}">{}</div>"#,
        if tab.is_wide() { " wide" } else { "" },
        renderer.render(document.section(tab))
    ));
    html
}
