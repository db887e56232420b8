use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::agents::AgentsDal;

use crate::routes;
use crate::state::{AgentsState, UsersState};

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks.
fn load_bind_addr(default_port: u16) -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(default_port);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Agents service entry: connect, initialize the DAL, serve.
///
/// DAL construction applies the schema (unique id constraint included);
/// a failure there aborts startup and no traffic is accepted.
pub async fn run_agents() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let db = models::db::connect().await?;
    let dal = AgentsDal::new(db).await?;
    let state = AgentsState { dal };

    let app: Router = routes::build_agents_router(state, build_cors());

    let addr = load_bind_addr(8080)?;
    info!(%addr, "starting agents api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Users service entry.
pub async fn run_users() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let db = models::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    let state = UsersState { db };

    let app: Router = routes::build_users_router(state, build_cors());

    let addr = load_bind_addr(8081)?;
    info!(%addr, "starting users api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
