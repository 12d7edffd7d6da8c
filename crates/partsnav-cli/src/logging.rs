use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_ENV: &str = "PARTSNAV_LOG";
const DEFAULT_DIRECTIVE: &str = "partsnav=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Appends logs to `path`. The terminal belongs to the UI, so nothing is
/// installed unless a file is given.
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|err| anyhow!("install log subscriber: {err}"))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{LOG_ENV, env_filter, init};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        std::env::temp_dir().join(format!("partsnav-log-test-{name}-{nanos}.log"))
    }

    #[test]
    fn filter_defaults_and_honours_env() {
        let _guard = ENV_LOCK.lock().expect("env lock");

        unsafe { std::env::remove_var(LOG_ENV) };
        assert_eq!(env_filter().to_string(), "partsnav=info");

        unsafe { std::env::set_var(LOG_ENV, "partsnav_core=debug") };
        assert_eq!(env_filter().to_string(), "partsnav_core=debug");

        unsafe { std::env::remove_var(LOG_ENV) };
    }

    #[test]
    fn init_reports_unwritable_path() {
        let dir = temp_path("dir");
        fs::create_dir(&dir).expect("mkdir");
        let err = init(&dir).expect_err("directory is not a log file");
        assert!(err.to_string().contains("open log file"));
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn init_writes_events_to_file() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        unsafe { std::env::remove_var(LOG_ENV) };

        let path = temp_path("events");
        init(&path).expect("init");
        tracing::info!(target: "partsnav::test", "hello log");
        let text = fs::read_to_string(&path).expect("read log");
        assert!(text.contains("hello log"));
        let _ = fs::remove_file(&path);
    }
}
