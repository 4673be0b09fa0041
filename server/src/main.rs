use crate::config::{ServerConfig, StoreBackend};
use crate::error::StackTrace;
use crate::handler::AppModule;
use application::service::CatalogService;
use driver::database::{InMemoryDatabase, PostgresDatabase};
use error_stack::ResultExt;
use kernel::KernelError;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

mod config;
mod controller;
mod error;
mod handler;
mod request;
mod response;
mod route;

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env()?;

    let appender = tracing_appender::rolling::daily(config.log_dir(), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer().with_filter(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG").unwrap_or_else(|_| {
                    "driver=debug,application=debug,server=debug,tower_http=debug,sqlx=info"
                        .into()
                }),
            )),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    match config.store() {
        StoreBackend::Postgres => serve(&config, PostgresDatabase::new().await?).await?,
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory store, nothing will be persisted");
            serve(&config, InMemoryDatabase::new()).await?
        }
    }

    Ok(())
}

async fn serve<D: CatalogService>(
    config: &ServerConfig,
    database: D,
) -> error_stack::Result<(), KernelError> {
    let router = route::router(AppModule::new(database));

    let bind = SocketAddr::from(([0, 0, 0, 0], config.port()));
    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to listen tcp on {bind}"))?;
    tracing::info!(%bind, "catalog listening");

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}
