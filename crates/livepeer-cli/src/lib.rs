use std::path::{Path, PathBuf};

use anyhow::bail;
use livepeer_core::{AssetClientError, ErrorKind};
use tracing_subscriber::EnvFilter;

/// Load `.env` into the process environment, then install tracing, so a
/// `RUST_LOG` set in the file takes effect.
pub fn init_environment() {
    load_env_file(None);
    init_tracing();
}

/// Load variables from `path`, or from `.env` in the current directory or a
/// parent. Variables already set in the process win. Returns the file used.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => dotenvy::from_path(path).ok().map(|_| path.to_path_buf()),
        None => dotenvy::dotenv().ok(),
    }
}

/// `RUST_LOG` filter, defaulting to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Process exit code for a failed command, chosen by the kind of the underlying
/// client error (sysexits values). Anything else exits with 1.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let kind = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<AssetClientError>())
        .map(AssetClientError::kind);

    match kind {
        Some(ErrorKind::Configuration) => 78,
        Some(ErrorKind::Io) => 74,
        Some(ErrorKind::Transport) => 69,
        Some(ErrorKind::Parse) => 76,
        Some(ErrorKind::Domain) => 65,
        None => 1,
    }
}

/// True if the extension maps to a `video/*` MIME type.
pub fn is_video_file(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .type_()
        == mime_guess::mime::VIDEO
}

/// Pre-flight check before uploading: the file must exist and look like a video.
pub fn check_video_file(path: &Path) -> anyhow::Result<()> {
    if !path.is_file() {
        bail!("File does not exist: {}", path.display());
    }
    if !is_video_file(path) {
        bail!("File is not a video: {}", path.display());
    }
    Ok(())
}
