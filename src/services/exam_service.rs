use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    formatting::{BoilerplateFilter, ContentRenderer, DocumentExporter, ExportedDocument},
    models::{
        domain::exam_document::{ExamDocument, ExamSection},
        dto::{
            exam_dto::GenerationResult,
            request::{ExportRequest, GenerationRequest},
        },
    },
    services::{
        generation_client::{ExamGenerator, GenerationError},
        session::{SessionAction, SessionId, SessionSnapshot, SessionStore},
    },
};

/// Message shown for any generation failure; the cause only goes to the log.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Đã có lỗi xảy ra trong quá trình soạn thảo. Vui lòng thử lại!";

pub struct ExamService {
    generator: Arc<dyn ExamGenerator>,
    sessions: Arc<SessionStore>,
    renderer: ContentRenderer,
    exporter: DocumentExporter,
}

impl ExamService {
    pub fn new(
        generator: Arc<dyn ExamGenerator>,
        filter: BoilerplateFilter,
        sessions: SessionStore,
    ) -> Self {
        Self {
            generator,
            sessions: Arc::new(sessions),
            renderer: ContentRenderer::new(filter.clone()),
            exporter: DocumentExporter::new(filter),
        }
    }

    pub fn renderer(&self) -> &ContentRenderer {
        &self.renderer
    }

    /// Runs one generation for `session`.
    ///
    /// The call runs on its own task and settles the session even if the
    /// caller stops waiting for it.
    pub async fn submit(
        &self,
        session: &SessionId,
        request: GenerationRequest,
    ) -> AppResult<Arc<ExamDocument>> {
        request.validate()?;

        if !self
            .sessions
            .try_begin_submission(session, request.clone())
            .await
        {
            return Err(AppError::Conflict(
                "An exam is already being generated".to_string(),
            ));
        }

        log::info!(
            "Generating exam for session {}: subject='{}' grade='{}' scope='{}'",
            session,
            request.subject,
            request.grade_level,
            request.scope_mode.slug()
        );

        let generator = Arc::clone(&self.generator);
        let sessions = Arc::clone(&self.sessions);
        let task_session = session.clone();
        let task = tokio::spawn(async move {
            let outcome = generator.generate(&request).await;
            settle(&sessions, &task_session, request, outcome).await
        });

        match task.await {
            Ok(result) => result,
            Err(err) => {
                log::error!("Exam generation task for session {} aborted: {}", session, err);
                self.sessions
                    .dispatch(
                        session,
                        SessionAction::SubmissionFailed(GENERATION_FAILED_MESSAGE.to_string()),
                    )
                    .await;
                Err(AppError::GenerationFailed(
                    GENERATION_FAILED_MESSAGE.to_string(),
                ))
            }
        }
    }

    pub async fn snapshot(&self, session: &SessionId) -> Arc<SessionSnapshot> {
        self.sessions.snapshot(session).await
    }

    pub async fn current(&self, session: &SessionId) -> AppResult<Arc<ExamDocument>> {
        self.sessions
            .snapshot(session)
            .await
            .document
            .clone()
            .ok_or_else(|| AppError::NotFound("No exam document has been generated".to_string()))
    }

    pub async fn select_tab(&self, session: &SessionId, section: ExamSection) -> Arc<SessionSnapshot> {
        self.sessions
            .dispatch(session, SessionAction::TabSelected(section))
            .await
    }

    pub async fn preview(&self, session: &SessionId, section: ExamSection) -> AppResult<String> {
        let document = self.current(session).await?;
        Ok(self.renderer.render(document.section(section)))
    }

    pub async fn export(
        &self,
        session: &SessionId,
        section: ExamSection,
    ) -> AppResult<ExportedDocument> {
        let document = self.current(session).await?;
        Ok(self
            .exporter
            .export(document.section(section), &section.download_filename()))
    }

    pub fn export_blob(&self, request: ExportRequest) -> AppResult<ExportedDocument> {
        request.validate()?;
        Ok(self.exporter.export_str(&request.content, &request.filename))
    }
}

async fn settle(
    sessions: &SessionStore,
    session: &SessionId,
    request: GenerationRequest,
    outcome: Result<GenerationResult, GenerationError>,
) -> AppResult<Arc<ExamDocument>> {
    match outcome {
        Ok(result) => {
            let document = Arc::new(ExamDocument::new(request, result));
            log::info!("Generated exam document {} for session {}", document.id, session);
            sessions
                .dispatch(session, SessionAction::SubmissionSucceeded(Arc::clone(&document)))
                .await;
            Ok(document)
        }
        Err(err) => {
            log::error!("Exam generation failed for session {}: {}", session, err);
            sessions
                .dispatch(
                    session,
                    SessionAction::SubmissionFailed(GENERATION_FAILED_MESSAGE.to_string()),
                )
                .await;
            Err(AppError::GenerationFailed(
                GENERATION_FAILED_MESSAGE.to_string(),
            ))
        }
    }
}
