use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::formatting::Content;
use crate::models::dto::exam_dto::GenerationResult;
use crate::models::dto::request::GenerationRequest;

/// One of the four blocks of a generated exam dossier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamSection {
    #[default]
    Matrix,
    Spec,
    Exam,
    Answer,
}

impl ExamSection {
    pub const ALL: [ExamSection; 4] = [
        ExamSection::Matrix,
        ExamSection::Spec,
        ExamSection::Exam,
        ExamSection::Answer,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ExamSection::Matrix => "matrix",
            ExamSection::Spec => "spec",
            ExamSection::Exam => "exam",
            ExamSection::Answer => "answer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExamSection::Matrix => "Ma trận đề",
            ExamSection::Spec => "Bảng đặc tả",
            ExamSection::Exam => "Đề kiểm tra",
            ExamSection::Answer => "Đáp án & HD chấm",
        }
    }

    pub fn download_filename(self) -> String {
        let stem = match self {
            ExamSection::Matrix => "MA_TRAN",
            ExamSection::Spec => "DAC_TA",
            ExamSection::Exam => "DE_KIEM_TRA",
            ExamSection::Answer => "DAP_AN",
        };
        format!("{}.doc", stem)
    }

    /// Tables are previewed on a wider page than the text sections.
    pub fn is_wide(self) -> bool {
        matches!(self, ExamSection::Matrix | ExamSection::Spec)
    }
}

impl fmt::Display for ExamSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ExamSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExamSection::ALL
            .into_iter()
            .find(|section| section.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown exam section '{}'", s))
    }
}

/// A generated dossier with every block already classified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExamDocument {
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub request: GenerationRequest,
    pub matrix: Content,
    pub specification_table: Content,
    pub exam_paper: Content,
    pub answer_key: Content,
}

impl ExamDocument {
    pub fn new(request: GenerationRequest, result: GenerationResult) -> Self {
        ExamDocument {
            id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            request,
            matrix: Content::classify(result.matrix),
            specification_table: Content::classify(result.specification_table),
            exam_paper: Content::classify(result.exam_paper),
            answer_key: Content::classify(result.answer_key),
        }
    }

    pub fn section(&self, section: ExamSection) -> &Content {
        match section {
            ExamSection::Matrix => &self.matrix,
            ExamSection::Spec => &self.specification_table,
            ExamSection::Exam => &self.exam_paper,
            ExamSection::Answer => &self.answer_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn section_parses_case_insensitively() {
        assert_eq!("SPEC".parse::<ExamSection>(), Ok(ExamSection::Spec));
        assert_eq!(" answer ".parse::<ExamSection>(), Ok(ExamSection::Answer));
        assert!("essay".parse::<ExamSection>().is_err());
    }

    #[test]
    fn download_filenames_match_sections() {
        let names: Vec<String> = ExamSection::ALL
            .iter()
            .map(|s| s.download_filename())
            .collect();
        assert_eq!(
            names,
            vec!["MA_TRAN.doc", "DAC_TA.doc", "DE_KIEM_TRA.doc", "DAP_AN.doc"]
        );
    }

    #[test]
    fn new_document_classifies_each_block_once() {
        let document = ExamDocument::new(fixtures::generation_request(), fixtures::generation_result());

        assert!(document.section(ExamSection::Matrix).is_structured());
        assert!(document.section(ExamSection::Spec).is_structured());
        assert!(!document.section(ExamSection::Exam).is_structured());
        assert!(!document.section(ExamSection::Answer).is_structured());
        assert!(Uuid::parse_str(&document.id).is_ok());
    }
}
