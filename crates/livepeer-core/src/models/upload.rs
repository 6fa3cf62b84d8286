use serde::Serialize;
use serde_json::Value;

use crate::error::{AssetClientError, Result};

/// Body for POST /api/asset/request-upload
#[derive(Debug, Clone, Serialize)]
pub struct RequestUploadBody {
    /// Asset name shown in the dashboard (the local file name)
    pub name: String,
}

/// Upload target issued by the request-upload endpoint.
///
/// `url` is pre-signed and valid for a single upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadTarget {
    pub url: String,
    pub asset_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tus_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl UploadTarget {
    /// Extract the upload target from a parsed response document.
    pub fn from_response(body: &Value) -> Result<Self> {
        let url = non_empty_str(body.get("url")).ok_or_else(|| {
            AssetClientError::Domain("request-upload response has no 'url'".to_string())
        })?;
        let asset_id = non_empty_str(body.get("asset").and_then(|asset| asset.get("id")))
            .ok_or_else(|| {
                AssetClientError::Domain("request-upload response has no 'asset.id'".to_string())
            })?;

        Ok(Self {
            url: url.to_string(),
            asset_id: asset_id.to_string(),
            tus_endpoint: non_empty_str(body.get("tusEndpoint")).map(str::to_string),
            task_id: non_empty_str(body.get("task").and_then(|task| task.get("id")))
                .map(str::to_string),
        })
    }
}

pub(crate) fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
