#[cfg(test)]
pub mod fixtures {
    use actix_web::cookie::Cookie;

    use crate::middleware::SESSION_COOKIE;
    use crate::models::domain::exam_document::ExamDocument;
    use crate::models::dto::exam_dto::GenerationResult;
    use crate::models::dto::request::GenerationRequest;
    use crate::services::session::SessionId;

    /// Form values as submitted with the defaults of the page
    pub fn generation_request() -> GenerationRequest {
        GenerationRequest::default()
    }

    /// A well-formed generation response: two tables, two plain documents
    pub fn generation_result() -> GenerationResult {
        GenerationResult {
            matrix: concat!(
                r#"<table border="1"><tr><th rowspan="2">TT</th><th colspan="3">Mức độ nhận thức</th></tr>"#,
                "<tr><td>1</td><td>Số tự nhiên</td><td>4</td></tr></table>"
            )
            .to_string(),
            specification_table: concat!(
                r#"<table border="1"><tr><th>TT</th><th>Yêu cầu cần đạt</th></tr>"#,
                "<tr><td>1</td><td>Nhận biết: tập hợp số tự nhiên</td></tr></table>"
            )
            .to_string(),
            exam_paper: concat!(
                "UBND HUYỆN ABC\n",
                "TRƯỜNG THCS ĐÔNG TRÀ\n",
                "\n",
                "## ĐỀ KIỂM TRA GIỮA KỲ I\n",
                "**Câu 1.** Tập hợp nào sau đây là tập hợp số tự nhiên?"
            )
            .to_string(),
            answer_key: concat!(
                "# ĐÁP ÁN VÀ HƯỚNG DẪN CHẤM\n",
                "**Câu 1:** B (0,25 điểm)"
            )
            .to_string(),
        }
    }

    pub fn exam_document() -> ExamDocument {
        ExamDocument::new(generation_request(), generation_result())
    }

    /// Cookie that binds a test request to `session`
    pub fn session_cookie(session: &SessionId) -> Cookie<'static> {
        Cookie::new(SESSION_COOKIE, session.to_string())
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::test_helpers::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_fixture_result_mixes_tables_and_text() {
        let result = generation_result();
        assert!(result.matrix.starts_with("<table"));
        assert!(result.specification_table.starts_with("<table"));
        assert!(result.exam_paper.contains("UBND HUYỆN"));
        assert!(result.answer_key.contains("ĐÁP ÁN"));
    }

    #[test]
    fn test_fixture_document_keeps_request() {
        let document = exam_document();
        assert_eq!(document.request, generation_request());
    }

    #[test]
    fn test_status_helpers() {
        assert_error_status(StatusCode::CONFLICT);
        assert_success_status(StatusCode::CREATED);
    }
}
