//! Asset operations for the Livepeer API client.
//!
//! Each operation is a single request/response exchange, except the upload pair
//! (request-upload followed by one PUT) and the playback wait, which polls
//! `retrieve_asset`. Nothing here retries.

use std::path::Path;
use std::time::{Duration, Instant};

use livepeer_core::{
    AssetClientError, AssetRecord, Endpoint, ExportRequest, RequestUploadBody, Result,
    UploadTarget,
};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use tokio::fs::File;
use tokio::time::sleep;
use tokio_util::io::ReaderStream;

use crate::{ensure_success, AssetClient};

const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 600;
const DEFAULT_WAIT_INTERVAL_SECS: u64 = 20;

/// Polling budget for [`AssetClient::wait_for_playback_url`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
            interval: Duration::from_secs(DEFAULT_WAIT_INTERVAL_SECS),
        }
    }
}

/// An opened local file, ready to be streamed.
struct LocalFile {
    file: File,
    size: u64,
    name: String,
    content_type: String,
}

impl LocalFile {
    async fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .await
            .map_err(|e| AssetClientError::io(path, e))?;
        let metadata = file
            .metadata()
            .await
            .map_err(|e| AssetClientError::io(path, e))?;
        if !metadata.is_file() {
            return Err(AssetClientError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            file,
            size: metadata.len(),
            name,
            content_type,
        })
    }
}

fn require_asset_id(asset_id: &str) -> Result<()> {
    if asset_id.trim().is_empty() {
        return Err(AssetClientError::Domain(
            "asset ID must not be empty".to_string(),
        ));
    }
    Ok(())
}

impl AssetClient {
    /// Ask for an upload target, then stream the file at `file_path` to it.
    ///
    /// The file is opened before any network call, so a missing file fails with
    /// an I/O error and nothing is sent. Returns the upload target so the caller
    /// knows which asset was created.
    pub async fn request_upload_url_and_upload_content(
        &self,
        file_path: impl AsRef<Path>,
    ) -> Result<UploadTarget> {
        let path = file_path.as_ref();
        let local = LocalFile::open(path).await?;

        let target = self.request_upload_url(&local.name).await?;
        self.put_file(local, &target.url).await?;

        tracing::info!(
            asset_id = %target.asset_id,
            "Upload complete, asset is processing remotely"
        );
        Ok(target)
    }

    /// POST /api/asset/request-upload
    pub async fn request_upload_url(&self, name: &str) -> Result<UploadTarget> {
        let body = RequestUploadBody {
            name: name.to_string(),
        };
        let response = self.call(&Endpoint::RequestUpload, Some(&body)).await?;
        let target = UploadTarget::from_response(&response)?;

        tracing::info!(
            asset_id = %target.asset_id,
            name = %name,
            "Upload URL issued"
        );
        Ok(target)
    }

    /// Stream a local file to a pre-signed upload URL.
    pub async fn upload_content(&self, file_path: impl AsRef<Path>, upload_url: &str) -> Result<()> {
        let local = LocalFile::open(file_path.as_ref()).await?;
        self.put_file(local, upload_url).await
    }

    async fn put_file(&self, local: LocalFile, upload_url: &str) -> Result<()> {
        tracing::info!(
            name = %local.name,
            size = local.size,
            content_type = %local.content_type,
            "Uploading file content"
        );

        // The stream owns the file handle; it is dropped with the request on every path.
        let body = reqwest::Body::wrap_stream(ReaderStream::new(local.file));
        let response = self
            .http()
            .put(upload_url)
            .header(CONTENT_LENGTH, local.size)
            .header(CONTENT_TYPE, local.content_type)
            .body(body)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// GET /api/asset/{id}
    pub async fn retrieve_asset(&self, asset_id: &str) -> Result<AssetRecord> {
        require_asset_id(asset_id)?;
        let value = self.call::<()>(&Endpoint::Asset(asset_id), None).await?;
        Ok(AssetRecord(value))
    }

    /// POST /api/asset/{id}/export with an IPFS target. Returns the export task ID.
    pub async fn export_asset_to_ipfs(&self, asset_id: &str) -> Result<String> {
        require_asset_id(asset_id)?;
        let response = self
            .call(&Endpoint::Export(asset_id), Some(&ExportRequest::ipfs()))
            .await?;
        let task_id = ExportRequest::task_id_from_response(&response)?;

        tracing::info!(asset_id = %asset_id, task_id = %task_id, "IPFS export started");
        Ok(task_id)
    }

    /// Poll the asset until it has a `playbackUrl`.
    ///
    /// At least one poll is made. Fails with a domain error if the asset reports
    /// the `failed` phase or the timeout runs out; any other error ends the wait
    /// immediately.
    pub async fn wait_for_playback_url(
        &self,
        asset_id: &str,
        options: WaitOptions,
    ) -> Result<String> {
        let start = Instant::now();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let asset = self.retrieve_asset(asset_id).await?;

            if let Some(url) = asset.playback_url() {
                tracing::info!(asset_id = %asset_id, attempts, "Playback URL available");
                return Ok(url.to_string());
            }

            if asset.status_phase() == Some("failed") {
                let reason = asset
                    .as_value()
                    .pointer("/status/errorMessage")
                    .and_then(|v| v.as_str())
                    .unwrap_or("no error message");
                return Err(AssetClientError::Domain(format!(
                    "asset {} failed processing: {}",
                    asset_id, reason
                )));
            }

            if start.elapsed().saturating_add(options.interval) > options.timeout {
                return Err(AssetClientError::Domain(format!(
                    "timed out after {}s waiting for 'playbackUrl' on asset {}",
                    options.timeout.as_secs(),
                    asset_id
                )));
            }

            tracing::debug!(
                asset_id = %asset_id,
                phase = asset.status_phase().unwrap_or("unknown"),
                "Waiting for 'playbackUrl' to be available"
            );
            sleep(options.interval).await;
        }
    }
}
