//! Logging bootstrap for pleat with file output and optional stdout.
//!
//! The file layer is always on, at `warn` unless the environment raises
//! it. Stdout logging turns on when `PLEAT_LOG` or `RUST_LOG` is set, or
//! in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`PLEAT_LOG`** (highest priority) - pleat-specific logging control
//! 2. **`RUST_LOG`** - standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for the pleat crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/pleat/logs/pleat-<pid>.log`, overridable
//! through [`LogConfig`] or `PLEAT_LOG_FILE`.

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Default)]
pub struct LogConfig {
    /// Log file or directory override. A path with an extension is used
    /// as-is; a directory gets the default `pleat-<pid>.log` name.
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// Respects the environment-variable priority from the module docs:
/// `PLEAT_LOG` > `RUST_LOG` > defaults. The returned [`LogGuard`] must be
/// held for the lifetime of the program; dropping it flushes and stops
/// the background file writer.
pub fn init(config: LogConfig) -> Result<LogGuard, Box<dyn std::error::Error + Send + Sync>> {
    let override_path = config
        .log_file_path
        .or_else(|| env::var("PLEAT_LOG_FILE").ok().map(PathBuf::from));
    let (log_dir, filename) = resolve_log_path(override_path);

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(file_filter());

    let stdout_enabled =
        env::var("PLEAT_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions);
    let stdout_layer = stdout_enabled.then(|| fmt::layer().with_filter(env_filter()));

    Registry::default()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()?;

    Ok(LogGuard {
        log_file: log_dir.join(filename),
        _file_guard: file_guard,
    })
}

/// Initialize logging for tests: stdout only, no file writer. Safe to
/// call from every test; repeated initialization is ignored.
pub fn test() {
    let _ = fmt().with_env_filter(env_filter()).try_init();
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("pleat-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir, name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pleat")
        .join("logs");
    (dir, filename)
}

/// File filter: the user-raised level if any env var is set, `warn`
/// otherwise.
fn file_filter() -> EnvFilter {
    if env::var("PLEAT_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        env_filter()
    } else {
        EnvFilter::new("warn")
    }
}

/// The stdout/env filter, honoring `PLEAT_LOG` > `RUST_LOG` > defaults.
fn env_filter() -> EnvFilter {
    if let Ok(pleat_log) = env::var("PLEAT_LOG") {
        return expand_pleat_log(&pleat_log);
    }
    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }
    EnvFilter::new("warn,pleat_tree=info,pleat_fold=info")
}

/// Expand bare `PLEAT_LOG` levels into the pleat crate namespaces.
///
/// `PLEAT_LOG=debug` becomes `warn,pleat_tree=debug,pleat_fold=debug`;
/// anything with module-specific syntax is used as-is.
fn expand_pleat_log(pleat_log: &str) -> EnvFilter {
    if pleat_log.contains('=') || pleat_log.contains(':') || pleat_log.contains(',') {
        return EnvFilter::new(pleat_log);
    }
    EnvFilter::new(format!(
        "warn,pleat_tree={pleat_log},pleat_fold={pleat_log}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_file_override_is_split_into_dir_and_name() {
        let (dir, name) = resolve_log_path(Some(PathBuf::from("/tmp/logs/session.log")));
        assert_eq!(dir, PathBuf::from("/tmp/logs"));
        assert_eq!(name, "session.log");
    }

    #[test]
    fn directory_override_keeps_the_default_filename() {
        let (dir, name) = resolve_log_path(Some(PathBuf::from("/tmp/logdir")));
        assert_eq!(dir, PathBuf::from("/tmp/logdir"));
        assert!(name.starts_with("pleat-"));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn default_path_lands_under_the_pleat_data_dir() {
        let (dir, _) = resolve_log_path(None);
        assert!(dir.ends_with("pleat/logs"));
    }

    #[test]
    fn init_writes_into_a_temp_dir() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let guard = init(LogConfig {
            log_file_path: Some(tmp.path().to_path_buf()),
        });
        // A second subscriber in the same process is rejected; either way
        // the resolved path must sit inside the override directory.
        if let Ok(guard) = guard {
            assert!(guard.log_file.starts_with(tmp.path()));
        }
    }
}
