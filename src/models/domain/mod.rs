pub mod exam_document;
pub mod exam_options;
pub use exam_document::{ExamDocument, ExamSection};
