use actix_web::{web, App, HttpServer};
use backend::config::Config;
use backend::session_controller::state::{start_session_reaper, SessionsState};
use backend::storage::{open_store, TemplateStore};
use env_logger::Env;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(io::Error::other)?;
    let store: web::Data<dyn TemplateStore> =
        web::Data::from(open_store(&config).map_err(io::Error::other)?);
    let sessions_state = SessionsState::with_ttl(config.session_ttl);
    tokio::spawn(start_session_reaper(
        sessions_state.clone(),
        config.session_sweep_period(),
    ));
    let sessions = web::Data::new(sessions_state);
    let json_limit = config.json_limit;

    info!("Server running at {}", config.url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(store.clone())
            .app_data(sessions.clone())
            .configure(backend::configure_services)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
