use std::fmt;

use super::audio_format::AudioFormat;
use super::upload_id::UploadId;

const MAX_STEM_LENGTH: usize = 64;
const FALLBACK_STEM: &str = "audio";

/// File name under which an upload is staged inside the upload directory.
///
/// The client filename only contributes a sanitized stem; the upload id keeps
/// concurrent uploads of the same file apart and the validated format supplies
/// the extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StagingName(String);

impl StagingName {
    pub fn new(upload_id: &UploadId, client_filename: &str, format: AudioFormat) -> Self {
        Self(format!(
            "{}_{}.{}",
            upload_id.as_uuid(),
            safe_stem(client_filename),
            format.extension()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StagingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduces an untrusted client filename to a stem safe for any filesystem.
pub fn safe_stem(client_filename: &str) -> String {
    let base = client_filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let stem = match base.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => base,
    };

    let cleaned: String = stem
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let trimmed: String = cleaned
        .trim_matches(|c| c == '.' || c == '_')
        .chars()
        .take(MAX_STEM_LENGTH)
        .collect();

    if trimmed.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        trimmed
    }
}
