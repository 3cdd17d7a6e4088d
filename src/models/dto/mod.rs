pub mod exam_dto;
pub mod request;
pub mod response;
