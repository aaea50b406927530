//! Logging setup driven by the `logging` config section
//!
//! Console output goes to stderr so `view` can print clean JSON on stdout.
//! The log file rolls over per `logging.rotation`.

use anyhow::Context;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogConfig, LogRotation};

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

/// RUST_LOG wins over the configured directives
fn build_filter(env: Option<&str>, configured: &str) -> anyhow::Result<EnvFilter> {
    match env {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)
            .with_context(|| format!("Invalid RUST_LOG directives {:?}", directives)),
        _ => EnvFilter::try_new(configured)
            .with_context(|| format!("Invalid logging.filter {:?}", configured)),
    }
}

fn file_appender(settings: &LogConfig) -> anyhow::Result<RollingFileAppender> {
    std::fs::create_dir_all(&settings.dir)
        .with_context(|| format!("Cannot create log directory {:?}", settings.dir))?;
    Ok(RollingFileAppender::new(
        settings.rotation.into(),
        &settings.dir,
        &settings.file_name,
    ))
}

pub fn init_logging(settings: &LogConfig) -> anyhow::Result<()> {
    let env = std::env::var("RUST_LOG").ok();
    let env_filter = build_filter(env.as_deref(), &settings.filter)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender(settings)?);
    // Keep the writer thread for the life of the process
    std::mem::forget(guard);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false),
        )
        .try_init()?;

    tracing::info!(
        "Logging to {:?} ({:?} rotation)",
        settings.dir.join(&settings.file_name),
        settings.rotation
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_rotation_mapping() {
        assert_eq!(Rotation::from(LogRotation::Hourly), Rotation::HOURLY);
        assert_eq!(Rotation::from(LogRotation::Daily), Rotation::DAILY);
        assert_eq!(Rotation::from(LogRotation::Never), Rotation::NEVER);
    }

    #[test]
    fn test_filter_precedence() {
        let shown = |filter: EnvFilter| filter.to_string().to_lowercase();
        let configured = LogConfig::default().filter;
        assert!(shown(build_filter(None, &configured).unwrap()).contains("tower_http=debug"));

        let from_env = shown(build_filter(Some("party_explorer=trace"), &configured).unwrap());
        assert!(from_env.contains("party_explorer=trace"));
        assert!(!from_env.contains("tower_http"));

        assert!(shown(build_filter(Some("  "), &configured).unwrap()).contains("tower_http=debug"));
    }

    #[test]
    fn test_bad_configured_filter() {
        let err = build_filter(None, "party_explorer=loud").unwrap_err();
        assert!(err.to_string().contains("logging.filter"));
    }

    #[test]
    fn test_file_appender_creates_directory() {
        let root = tempfile::tempdir().unwrap();
        let settings = LogConfig {
            dir: root.path().join("nested").join("logs"),
            file_name: "explorer-test.log".into(),
            rotation: LogRotation::Never,
            ..LogConfig::default()
        };
        let mut appender = file_appender(&settings).unwrap();
        appender.write_all(b"loaded\n").unwrap();
        appender.flush().unwrap();

        let written = std::fs::read_to_string(settings.dir.join("explorer-test.log")).unwrap();
        assert_eq!(written, "loaded\n");
    }
}
