//! Keydojo binary entrypoint kept minimal. The full runtime lives in `app`.

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;

use keydojo::{app, args::Args, paths, platform::Platform};

struct KeydojoTimer;

impl tracing_subscriber::fmt::time::FormatTime for KeydojoTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T%H:%M:%S");
        w.write_str(&ts.to_string())
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Initialize tracing to `~/.config/keydojo/logs/keydojo.log`, falling back
/// to stderr when the file cannot be opened.
fn init_logging(level: &str) {
    let mut log_path = paths::logs_dir();
    log_path.push("keydojo.log");
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(KeydojoTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(true)
                .with_timer(KeydojoTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.effective_log_level());

    if args.list_lessons {
        let platform = args
            .platform
            .as_deref()
            .and_then(Platform::from_config_key)
            .unwrap_or(Platform::detect());
        app::list_lessons(platform);
        return;
    }
    if args.validate {
        std::process::exit(app::validate_lessons());
    }
    if args.reset_progress {
        app::reset_progress();
        return;
    }

    tracing::info!("Keydojo starting");
    if let Err(err) = app::run(&args).await {
        tracing::error!(error = ?err, "Application error");
    }
    tracing::info!("Keydojo exited");
}
