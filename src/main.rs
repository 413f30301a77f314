use actix_web::{middleware::Logger, web, App, HttpServer};

use quizboard_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let state = AppState::new(config);

    match state.session_service.list_sources() {
        Ok(sources) => log::info!(
            "found {} quiz source(s) in {}",
            sources.len(),
            state.config.data_dir.display()
        ),
        Err(err) => log::warn!("quiz data directory is not readable: {err}"),
    }
    log::info!("starting HTTP server on {host}:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .service(handlers::list_quizzes)
            .service(handlers::select_quiz)
            .service(handlers::get_question)
            .service(handlers::submit_answer)
            .service(handlers::advance)
            .service(handlers::health_check)
    })
    .bind((host, port))?
    .run()
    .await
}
