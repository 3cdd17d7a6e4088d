use actix_web::{
    get,
    http::header::{
        Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
    },
    post, put, web, HttpResponse,
};

use crate::{
    app_state::AppState,
    errors::AppError,
    formatting::ExportedDocument,
    models::{
        domain::exam_document::ExamSection,
        dto::{
            request::{ExportRequest, GenerationRequest, SelectTabRequest},
            response::{ExamDocumentDto, SessionDto},
        },
    },
    services::session::SessionId,
};

#[post("/api/exams")]
async fn create_exam(
    state: web::Data<AppState>,
    session: SessionId,
    request: web::Json<GenerationRequest>,
) -> Result<HttpResponse, AppError> {
    let service = &state.exam_service;
    let document = service.submit(&session, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ExamDocumentDto::new(&document, service.renderer())))
}

#[get("/api/session")]
async fn get_session(state: web::Data<AppState>, session: SessionId) -> HttpResponse {
    let service = &state.exam_service;
    let snapshot = service.snapshot(&session).await;
    HttpResponse::Ok().json(SessionDto::new(&snapshot, service.renderer()))
}

#[get("/api/exams/current")]
async fn get_current_exam(
    state: web::Data<AppState>,
    session: SessionId,
) -> Result<HttpResponse, AppError> {
    let service = &state.exam_service;
    let document = service.current(&session).await?;
    Ok(HttpResponse::Ok().json(ExamDocumentDto::new(&document, service.renderer())))
}

#[put("/api/exams/current/tab")]
async fn select_tab(
    state: web::Data<AppState>,
    session: SessionId,
    request: web::Json<SelectTabRequest>,
) -> HttpResponse {
    let service = &state.exam_service;
    let snapshot = service.select_tab(&session, request.tab).await;
    HttpResponse::Ok().json(SessionDto::new(&snapshot, service.renderer()))
}

#[get("/api/exams/current/{section}/preview")]
async fn preview_section(
    state: web::Data<AppState>,
    session: SessionId,
    section: web::Path<ExamSection>,
) -> Result<HttpResponse, AppError> {
    let html = state
        .exam_service
        .preview(&session, section.into_inner())
        .await?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

#[get("/api/exams/current/{section}/download")]
async fn download_section(
    state: web::Data<AppState>,
    session: SessionId,
    section: web::Path<ExamSection>,
) -> Result<HttpResponse, AppError> {
    let document = state
        .exam_service
        .export(&session, section.into_inner())
        .await?;
    Ok(attachment(document))
}

#[post("/api/exports")]
async fn export_content(
    state: web::Data<AppState>,
    request: web::Json<ExportRequest>,
) -> Result<HttpResponse, AppError> {
    let document = state.exam_service.export_blob(request.into_inner())?;
    Ok(attachment(document))
}

/// Wraps an exported file in a download response.
pub fn attachment(document: ExportedDocument) -> HttpResponse {
    let mut parameters = vec![DispositionParam::Filename(ascii_fallback(&document.filename))];
    if !document.filename.is_ascii() {
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext(String::from("UTF-8")),
            language_tag: None,
            value: document.filename.clone().into_bytes(),
        }));
    }

    HttpResponse::Ok()
        .content_type(document.content_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters,
        })
        .body(document.bytes)
}

fn ascii_fallback(filename: &str) -> String {
    filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect()
}
