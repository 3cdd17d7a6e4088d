use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::exam_document::ExamSection;
use crate::models::domain::exam_options::{Duration, Grade, Scale, ScopeMode, Subject};

pub const DEFAULT_INSTITUTION: &str = "TRƯỜNG THCS ĐÔNG TRÀ";

/// Configuration collected from the form at submission time.
///
/// Only lengths are bounded; empty values (including an empty topic with
/// `specific-topic`) are forwarded to the generation service as-is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct GenerationRequest {
    #[validate(length(max = 100))]
    pub subject: String,

    #[validate(length(max = 100))]
    pub grade_level: String,

    #[validate(length(max = 200))]
    pub institution_name: String,

    #[validate(length(max = 100))]
    pub duration_label: String,

    #[validate(length(max = 100))]
    pub score_scale: String,

    #[serde(default)]
    pub scope_mode: ScopeMode,

    #[validate(length(max = 500))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_topic: Option<String>,
}

impl GenerationRequest {
    /// Topic text for `specific-topic`, the scope label otherwise.
    pub fn scope_phrase(&self) -> String {
        match self.scope_mode {
            ScopeMode::SpecificTopic => self.effective_topic().unwrap_or_default().to_string(),
            mode => mode.label().to_string(),
        }
    }

    /// The topic only carries meaning for `specific-topic`.
    pub fn effective_topic(&self) -> Option<&str> {
        match self.scope_mode {
            ScopeMode::SpecificTopic => self.specific_topic.as_deref(),
            _ => None,
        }
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            subject: Subject::Toan.label().to_string(),
            grade_level: Grade::G6.label().to_string(),
            institution_name: DEFAULT_INSTITUTION.to_string(),
            duration_label: Duration::M45.label().to_string(),
            score_scale: Scale::S10.label().to_string(),
            scope_mode: ScopeMode::Term1,
            specific_topic: Some(String::new()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectTabRequest {
    pub tab: ExamSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TabQuery {
    pub tab: Option<ExamSection>,
}

/// Export of an arbitrary block, outside the current session.
///
/// An empty filename falls back to `document.doc`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExportRequest {
    pub content: String,

    #[validate(length(max = 200))]
    pub filename: String,
}
