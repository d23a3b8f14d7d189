// Diagnostics log. The viewer owns the terminal, so records go to a file.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter variable, e.g. `SCRIPTVIEW_LOG=debug` or `SCRIPTVIEW_LOG=scriptview_io=trace`.
const LOG_ENV: &str = "SCRIPTVIEW_LOG";

/// Route `log` records into `path`. Returns false (and logs nothing) if the
/// file cannot be opened or a subscriber is already installed.
pub(crate) fn init(path: &Path) -> bool {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && fs::create_dir_all(parent).is_err() {
            return false;
        }
    }

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok()
}
