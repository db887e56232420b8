use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use configs::DatabaseConfig;

/// Open the shared connection: config file when present, environment
/// otherwise. The driver owns pooling; callers clone the handle freely.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let cfg = configs::load_default()
        .map(|c| {
            let mut db = c.database;
            db.normalize_from_env();
            db
        })
        .unwrap_or_else(|_| DatabaseConfig::from_env());
    connect_with_config(&cfg).await
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    cfg.validate()?;
    let mut opts = ConnectOptions::new(cfg.connection_url());
    opts.sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    Ok(db)
}
