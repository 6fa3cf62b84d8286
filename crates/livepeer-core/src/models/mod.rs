pub mod asset;
pub mod export;
pub mod upload;

pub use asset::AssetRecord;
pub use export::{ExportRequest, IpfsExportSpec};
pub use upload::{RequestUploadBody, UploadTarget};
