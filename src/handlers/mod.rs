pub mod exam_handler;
pub mod health_handler;
pub mod page_handler;

use actix_web::web;

use crate::middleware::SessionMiddleware;

pub use exam_handler::{
    create_exam, download_section, export_content, get_current_exam, get_session,
    preview_section, select_tab,
};
pub use health_handler::health_check;
pub use page_handler::{index, submit_form};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check).service(
        web::scope("")
            .wrap(SessionMiddleware)
            .service(index)
            .service(submit_form)
            .service(create_exam)
            .service(get_session)
            .service(get_current_exam)
            .service(select_tab)
            .service(preview_section)
            .service(download_section)
            .service(export_content),
    );
}
