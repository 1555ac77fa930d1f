use actix_web::{middleware::Logger, App, HttpServer};
use dotenvy::dotenv;
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

use grubdash::{
    config::Config,
    entities::{dish::Dish, order::Order},
    repositories::in_memory::InMemoryStore,
    routes,
    seed::{load_seed, SeedData},
    state::AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let config = Config::from_env().map_err(std::io::Error::other)?;

    let state = AppState::new(
        InMemoryStore::<Dish>::default(),
        InMemoryStore::<Order>::default(),
    );

    if let Some(path) = &config.seed_file {
        let data = SeedData::from_file(path).map_err(std::io::Error::other)?;
        load_seed(data, &*state.dishes, &*state.orders)
            .await
            .map_err(std::io::Error::other)?;
    }

    tracing::info!(addr = %config.server_addr, "grubdash listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::config)
    })
    .bind(config.server_addr)?
    .run()
    .await
}
