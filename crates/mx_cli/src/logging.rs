use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, Once};

use tracing::Level;

static INIT: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// Keeps the full-screen browser from being scribbled over
    Discard,
}

pub fn init_logging(target: LogTarget, verbose: bool) -> io::Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let file = match &target {
        LogTarget::File(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        _ => None,
    };

    INIT.call_once(|| {
        let builder = tracing_subscriber::fmt().with_max_level(level);
        match file {
            Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
            None if target == LogTarget::Discard => builder.with_writer(io::sink).init(),
            None => builder.with_writer(io::stderr).init(),
        }
    });
    Ok(())
}
