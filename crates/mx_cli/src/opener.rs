use std::io;

use tracing::warn;

/// Hands a URL to the desktop's default browser. The launcher can block
/// until the browser exits, so it runs off the UI task; must be called
/// from within a tokio runtime.
pub fn open(url: &str) -> io::Result<()> {
    let url = url.to_string();
    tokio::task::spawn_blocking(move || {
        if let Err(e) = ::open::that(&url) {
            warn!("Could not open {}: {}", url, e);
        }
    });
    Ok(())
}
