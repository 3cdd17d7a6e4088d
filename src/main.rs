use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use exam_drafter_server::{
    app_state::AppState, config::Config, handlers::configure_routes,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    config.validate_for_production();

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let allowed_origin = config.cors_allowed_origin.clone();

    let state = AppState::new(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    log::info!(
        "starting HTTP server on {}:{} (model: {})",
        host,
        port,
        state.config.gemini_model
    );

    HttpServer::new(move || {
        let cors = match &allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allowed_methods(vec!["GET", "POST", "PUT"])
                .allow_any_header()
                .expose_headers(vec!["content-disposition", "x-request-id"])
                .max_age(3600),
            None => Cors::default(),
        };

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
