use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// With a log file, events go there through a background writer; the
/// returned guard must live until exit. Without one, events go to stderr
/// only when `to_stderr` is set, since the TUI owns the terminal.
pub fn init(log_file: Option<&Path>, to_stderr: bool) -> Result<Option<WorkerGuard>, String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let dir = match path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d,
            _ => Path::new("."),
        };
        let name = path
            .file_name()
            .ok_or_else(|| format!("Invalid log file path: {}", path.display()))?;
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Cannot create log dir {}: {}", dir.display(), e))?;

        let appender = tracing_appender::rolling::never(dir, name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .try_init()
            .map_err(|e| format!("Cannot initialize logging: {}", e))?;
        return Ok(Some(guard));
    }

    if to_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|e| format!("Cannot initialize logging: {}", e))?;
    }
    Ok(None)
}
