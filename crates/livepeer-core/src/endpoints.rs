//! Remote API endpoint table.

use reqwest::Method;

const ASSET_PREFIX: &str = "/api/asset";

/// One of the documented asset endpoints. Asset IDs are percent-encoded as a
/// single path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// POST /api/asset/request-upload
    RequestUpload,
    /// GET /api/asset/{id}
    Asset(&'a str),
    /// POST /api/asset/{id}/export
    Export(&'a str),
}

impl Endpoint<'_> {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::RequestUpload | Endpoint::Export(_) => Method::POST,
            Endpoint::Asset(_) => Method::GET,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::RequestUpload => format!("{}/request-upload", ASSET_PREFIX),
            Endpoint::Asset(id) => format!("{}/{}", ASSET_PREFIX, urlencoding::encode(id)),
            Endpoint::Export(id) => {
                format!("{}/{}/export", ASSET_PREFIX, urlencoding::encode(id))
            }
        }
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Endpoint::RequestUpload.path(), "/api/asset/request-upload");
        assert_eq!(Endpoint::Asset("abc-123").path(), "/api/asset/abc-123");
        assert_eq!(Endpoint::Export("abc-123").path(), "/api/asset/abc-123/export");
    }

    #[test]
    fn test_methods() {
        assert_eq!(Endpoint::RequestUpload.method(), Method::POST);
        assert_eq!(Endpoint::Asset("a").method(), Method::GET);
        assert_eq!(Endpoint::Export("a").method(), Method::POST);
    }

    #[test]
    fn test_asset_id_is_percent_encoded() {
        assert_eq!(Endpoint::Asset("a/b?c").path(), "/api/asset/a%2Fb%3Fc");
        assert_eq!(Endpoint::Export("../x").path(), "/api/asset/..%2Fx/export");
    }

    #[test]
    fn test_url_joins_base() {
        assert_eq!(
            Endpoint::Asset("id").url("https://livepeer.studio/"),
            "https://livepeer.studio/api/asset/id"
        );
    }
}
