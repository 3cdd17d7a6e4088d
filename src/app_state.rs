use std::sync::Arc;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    services::{
        exam_service::ExamService,
        generation_client::{ExamGenerator, GeminiGenerator},
        session::SessionStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub exam_service: Arc<ExamService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let generator = GeminiGenerator::new(&config)
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        Ok(Self::with_generator(config, Arc::new(generator)))
    }

    pub fn with_generator(config: Config, generator: Arc<dyn ExamGenerator>) -> Self {
        let sessions = SessionStore::new(config.max_sessions, config.session_ttl());
        let exam_service = Arc::new(ExamService::new(
            generator,
            config.boilerplate_filter(),
            sessions,
        ));

        Self {
            exam_service,
            config: Arc::new(config),
        }
    }
}
