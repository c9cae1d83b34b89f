//! Logging Infrastructure
//!
//! Structured logging for development and production.
//! - Console output, pretty or JSON
//! - Daily rotating application logs under `app/` (deleted after 14 days)
//! - Daily rotating audit logs under `audit/` (kept)

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, prelude::*};

/// Days an application log file is kept
pub const APP_LOG_RETENTION_DAYS: i64 = 14;

/// Target used by [`audit_log!`](crate::audit_log)
pub const AUDIT_TARGET: &str = "audit";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over `level` when set. With `log_dir`, files
/// are written below `{log_dir}/app` and `{log_dir}/audit` and an hourly
/// cleanup task is started on the current tokio runtime.
///
/// # Examples
/// ```no_run
/// use directory_server::init_logger_with_file;
///
/// // Development setup (console only)
/// init_logger_with_file("debug", false, None).unwrap();
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = vec![console_layer(json_format)];

    if let Some(dir) = log_dir {
        let app_dir = dir.join("app");
        let audit_dir = dir.join(AUDIT_TARGET);
        fs::create_dir_all(&app_dir)?;
        fs::create_dir_all(&audit_dir)?;

        let app_log = daily_appender(&app_dir, "app")?;
        layers.push(
            file_layer(app_log, json_format)
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != AUDIT_TARGET
                }))
                .boxed(),
        );

        let audit_log = daily_appender(&audit_dir, AUDIT_TARGET)?;
        layers.push(
            file_layer(audit_log, json_format)
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == AUDIT_TARGET
                }))
                .boxed(),
        );

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(periodic_cleanup(dir.to_path_buf()));
            }
            Err(_) => eprintln!("No tokio runtime, old log files will not be cleaned up"),
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

fn console_layer(json_format: bool) -> BoxedLayer {
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    }
}

fn file_layer(appender: RollingFileAppender, json_format: bool) -> BoxedLayer {
    let writer = std::sync::Mutex::new(appender);
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_ansi(false)
            .with_writer(writer)
            .boxed()
    }
}

/// `{prefix}.YYYY-MM-DD.log`, rotated daily
fn daily_appender(dir: &Path, prefix: &str) -> anyhow::Result<RollingFileAppender> {
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(dir)?)
}

/// Delete application log files older than `retention_days`
///
/// Only `app/app.YYYY-MM-DD.log` files are considered; audit logs are never
/// touched. Returns the number of files removed.
pub fn cleanup_old_logs(log_dir: &Path, retention_days: i64) -> anyhow::Result<usize> {
    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(retention_days);
    let mut removed = 0;

    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(date) = name
            .strip_prefix("app.")
            .and_then(|rest| rest.strip_suffix(".log"))
            .and_then(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        else {
            continue;
        };

        if date < cutoff {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}

/// Periodic cleanup task - runs every hour to clean old logs
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        sleep(Duration::from_secs(3600)).await;

        if let Err(e) = cleanup_old_logs(&log_dir, APP_LOG_RETENTION_DAYS) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    }
}
