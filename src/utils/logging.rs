use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

use crate::error::Result;

/// Install the global `tracing` subscriber.
///
/// Output goes to stderr unless `log_file` is given. Once a subscriber is
/// installed, later calls do nothing and leave `log_file` untouched.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        tracing::debug!("Logging subscriber already installed");
        return Ok(());
    }

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    if installed.is_err() {
        tracing::debug!("Logging subscriber already installed");
    }

    Ok(())
}
