use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing system
///
/// The terminal belongs to the UI for the whole session, so events are only
/// recorded when a log file is given. Returns `false` when no subscriber was
/// installed.
pub fn init(log_file: Option<&Path>) -> Result<bool, Box<dyn std::error::Error + Send + Sync + 'static>> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_installs_nothing() {
        assert!(!init(None).unwrap());
    }

    #[test]
    fn test_log_file_receives_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cyclewatch.log");

        assert!(init(Some(&path)).unwrap());
        tracing::info!(marker = "logging-test", "hello from the test");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("hello from the test"));
    }
}
