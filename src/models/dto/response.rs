use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::formatting::ContentRenderer;
use crate::models::domain::exam_document::{ExamDocument, ExamSection};
use crate::models::dto::request::GenerationRequest;
use crate::services::session::{SessionSnapshot, SessionStatus};

#[derive(Debug, Clone, Serialize)]
pub struct SectionDto {
    pub section: ExamSection,
    pub label: &'static str,
    pub structured: bool,
    pub preview_html: String,
    pub download_url: String,
}

impl SectionDto {
    pub fn new(document: &ExamDocument, section: ExamSection, renderer: &ContentRenderer) -> Self {
        let content = document.section(section);
        SectionDto {
            section,
            label: section.label(),
            structured: content.is_structured(),
            preview_html: renderer.render(content),
            download_url: format!("/api/exams/current/{}/download", section),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExamDocumentDto {
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub request: GenerationRequest,
    pub sections: Vec<SectionDto>,
}

impl ExamDocumentDto {
    pub fn new(document: &ExamDocument, renderer: &ContentRenderer) -> Self {
        ExamDocumentDto {
            id: document.id.clone(),
            generated_at: document.generated_at,
            request: document.request.clone(),
            sections: ExamSection::ALL
                .into_iter()
                .map(|section| SectionDto::new(document, section, renderer))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionDto {
    pub status: SessionStatus,
    pub active_tab: ExamSection,
    pub document: Option<ExamDocumentDto>,
}

impl SessionDto {
    pub fn new(snapshot: &SessionSnapshot, renderer: &ContentRenderer) -> Self {
        SessionDto {
            status: snapshot.status.clone(),
            active_tab: snapshot.active_tab,
            document: snapshot
                .document
                .as_deref()
                .map(|document| ExamDocumentDto::new(document, renderer)),
        }
    }
}
