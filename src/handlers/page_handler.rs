use actix_web::{get, http::header, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{GenerationRequest, TabQuery},
    services::session::SessionId,
    views::render_page,
};

/// Configuration form and preview. `?tab=` only picks what this page shows;
/// the stored tab changes through `PUT /api/exams/current/tab`.
#[get("/")]
async fn index(
    state: web::Data<AppState>,
    session: SessionId,
    query: web::Query<TabQuery>,
) -> HttpResponse {
    let service = &state.exam_service;
    let snapshot = service.snapshot(&session).await;
    let tab = query.tab.unwrap_or(snapshot.active_tab);

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page(&snapshot, tab, service.renderer()))
}

/// Form submission. Generation failures and duplicate submissions are shown
/// on the page after the redirect.
#[post("/exams")]
async fn submit_form(
    state: web::Data<AppState>,
    session: SessionId,
    form: web::Form<GenerationRequest>,
) -> Result<HttpResponse, AppError> {
    match state.exam_service.submit(&session, form.into_inner()).await {
        Ok(_) | Err(AppError::GenerationFailed(_)) | Err(AppError::Conflict(_)) => {
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/"))
                .finish())
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::handlers::configure_routes;
    use crate::models::domain::exam_document::ExamSection;
    use crate::models::domain::exam_options::ScopeMode;
    use crate::services::generation_client::{GenerationError, MockExamGenerator};
    use crate::test_utils::fixtures;
    use actix_web::{http::StatusCode, test, App};

    fn state_with(mock: MockExamGenerator) -> AppState {
        AppState::with_generator(Config::test_config(), Arc::new(mock))
    }

    #[actix_web::test]
    async fn test_index_renders_form() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(MockExamGenerator::new())))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains(r#"<form method="post" action="/exams">"#));
    }

    #[actix_web::test]
    async fn test_form_submission_with_empty_topic_redirects() {
        let mut mock = MockExamGenerator::new();
        mock.expect_generate()
            .withf(|request| request.scope_mode == ScopeMode::SpecificTopic)
            .times(1)
            .returning(|_| Ok(fixtures::generation_result()));
        let state = state_with(mock);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;
        let session = SessionId::new();

        let req = test::TestRequest::post()
            .uri("/exams")
            .cookie(fixtures::session_cookie(&session))
            .set_form([
                ("subject", "Toán"),
                ("grade_level", "Lớp 7"),
                ("institution_name", "TRƯỜNG THCS ĐÔNG TRÀ"),
                ("duration_label", "45 phút"),
                ("score_scale", "10 điểm"),
                ("scope_mode", "specific-topic"),
                ("specific_topic", ""),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert!(state.exam_service.current(&session).await.is_ok());
    }

    #[actix_web::test]
    async fn test_failed_generation_is_shown_after_redirect() {
        let mut mock = MockExamGenerator::new();
        mock.expect_generate()
            .returning(|_| Err(GenerationError::EmptyResponse));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(mock)))
                .configure(configure_routes),
        )
        .await;
        let session = SessionId::new();

        let req = test::TestRequest::post()
            .uri("/exams")
            .cookie(fixtures::session_cookie(&session))
            .set_form(fixtures::generation_request())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let req = test::TestRequest::get()
            .uri("/")
            .cookie(fixtures::session_cookie(&session))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains(r#"role="alert""#));

        let req = test::TestRequest::get()
            .uri("/")
            .cookie(fixtures::session_cookie(&SessionId::new()))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(!html.contains(r#"role="alert""#));
    }

    #[actix_web::test]
    async fn test_tab_query_only_changes_the_rendered_tab() {
        let mut mock = MockExamGenerator::new();
        mock.expect_generate()
            .returning(|_| Ok(fixtures::generation_result()));
        let state = state_with(mock);
        let session = SessionId::new();
        state
            .exam_service
            .submit(&session, fixtures::generation_request())
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/?tab=answer")
            .cookie(fixtures::session_cookie(&session))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = std::str::from_utf8(&body).unwrap();

        assert!(html.contains("/api/exams/current/answer/download"));
        assert_eq!(
            state.exam_service.snapshot(&session).await.active_tab,
            ExamSection::Matrix
        );
    }

    #[actix_web::test]
    async fn test_index_shows_stored_tab_by_default() {
        let mut mock = MockExamGenerator::new();
        mock.expect_generate()
            .returning(|_| Ok(fixtures::generation_result()));
        let state = state_with(mock);
        let session = SessionId::new();
        state
            .exam_service
            .submit(&session, fixtures::generation_request())
            .await
            .unwrap();
        state
            .exam_service
            .select_tab(&session, ExamSection::Spec)
            .await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .cookie(fixtures::session_cookie(&session))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains(r#"<a href="/?tab=spec" class="active">"#));
    }
}
