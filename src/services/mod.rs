pub mod exam_service;
pub mod generation_client;
pub mod session;
