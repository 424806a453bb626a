//! Session bootstrap: proxy, connection, controller, exit status.
//!
//! Each step returns early with a tagged [`SessionError`]; nothing is
//! created before the step that fails. The proxy handle is dropped on every
//! early return, which closes its listener.

use crate::controller::{SessionController, SessionReport};
use crate::error::{SessionError, SessionResult};
use crate::executor::TestExecutor;
use crate::exit::ExitStatus;
use tb_core::{Identifier, SessionConfig};
use tb_db::{DefaultDriver, Driver};
use tb_proxy::ProxyServer;

/// Run a session with the built-in drivers and map it to an exit status
pub async fn run_session(config: &SessionConfig, executor: &dyn TestExecutor) -> ExitStatus {
    run_session_with(config, &DefaultDriver, executor).await
}

/// Run a session with an explicit driver and map it to an exit status
pub async fn run_session_with(
    config: &SessionConfig,
    driver: &dyn Driver,
    executor: &dyn TestExecutor,
) -> ExitStatus {
    match try_run_session(config, driver, executor).await {
        Ok(report) => {
            let status = ExitStatus::from_report(&report);
            log::info!(
                "Session finished: tests {}, schema {} {}, exit status {}",
                report.outcome,
                report.schema,
                report.resolution.disposition(),
                status
            );
            status
        }
        Err(e) => {
            log::error!("{}", e);
            ExitStatus::from_error(&e)
        }
    }
}

/// Run a session and return its report, or the first fatal error
pub async fn try_run_session(
    config: &SessionConfig,
    driver: &dyn Driver,
    executor: &dyn TestExecutor,
) -> SessionResult<SessionReport> {
    Identifier::validate_prefix(&config.schema_prefix)?;

    let proxy = ProxyServer::start(config.proxy_addr)
        .await
        .map_err(SessionError::ProxyBind)?;

    let db = driver
        .open(&config.dsn)
        .map_err(SessionError::Connection)?;
    log::info!("Connected to {} ({})", config.dsn, db.db_type());

    let result = SessionController::new(db, config.drop_schema)
        .with_schema_prefix(config.schema_prefix.clone())
        .with_proxy_addr(proxy.local_addr())
        .run(executor)
        .await;

    if let Err(e) = proxy.stop().await {
        log::warn!("Failed to stop proxy: {}", e);
    }
    result
}
