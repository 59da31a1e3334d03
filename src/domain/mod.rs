mod audio_format;
mod staging_name;
mod upload_id;
mod upload_policy;

pub use audio_format::AudioFormat;
pub use staging_name::{StagingName, safe_stem};
pub use upload_id::UploadId;
pub use upload_policy::{UploadPolicy, UploadRejection};
