use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The four blocks the generation service must return.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct GenerationResult {
    /// HTML table for matrix with Total Questions and Total Score rows
    pub matrix: String,

    /// HTML table for specification with Total Questions and Total Score rows
    #[serde(rename = "specTable", alias = "specificationTable")]
    pub specification_table: String,

    #[serde(rename = "examPaper")]
    pub exam_paper: String,

    #[serde(rename = "answerKey")]
    pub answer_key: String,
}
