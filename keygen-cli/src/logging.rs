use std::fs::OpenOptions;
use std::sync::Mutex;
use tonkeygen::KeygenConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file kept in the data directory while the wizard owns the terminal
pub const LOG_FILE_NAME: &str = "tonkeygen.log";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "tonkeygen=info".into())
}

pub fn init_stderr() {
    tracing_subscriber::registry()
        .with(filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Send logs to a file so they do not draw over the alternate screen.
/// Without a data directory logging stays off.
pub fn init_file(config: &KeygenConfig) -> anyhow::Result<()> {
    let Some(dir) = config.storage.resolve_data_dir() else {
        return Ok(());
    };
    std::fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))?;

    tracing_subscriber::registry()
        .with(filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}
