use serde::Serialize;
use serde_json::Value;

use crate::error::{AssetClientError, Result};
use crate::models::upload::non_empty_str;

/// Body for POST /api/asset/{id}/export
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportRequest {
    pub ipfs: IpfsExportSpec,
}

/// Export target options. Empty means "pin with the service's default provider".
#[derive(Debug, Clone, Default, Serialize)]
pub struct IpfsExportSpec {}

impl ExportRequest {
    pub fn ipfs() -> Self {
        Self::default()
    }

    /// The export task ID (`task.id`) from an export response.
    pub fn task_id_from_response(body: &Value) -> Result<String> {
        non_empty_str(body.get("task").and_then(|task| task.get("id")))
            .map(str::to_string)
            .ok_or_else(|| {
                AssetClientError::ExportNotReady(
                    "export response has no 'task.id'; the asset may not be ready for export"
                        .to_string(),
                )
            })
    }
}
