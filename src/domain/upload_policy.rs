use super::audio_format::AudioFormat;

/// Why an upload was refused before anything touched the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("No selected file")]
    NoSelectedFile,
    #[error("File type not allowed")]
    UnsupportedType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    allowed: Vec<AudioFormat>,
}

impl UploadPolicy {
    pub fn new(allowed: Vec<AudioFormat>) -> Self {
        Self { allowed }
    }

    /// Builds a policy from configured extensions such as `["wav", "flac"]`.
    pub fn from_extensions(extensions: &[String]) -> Result<Self, String> {
        if extensions.is_empty() {
            return Err("at least one audio extension must be allowed".to_string());
        }

        let mut allowed = Vec::with_capacity(extensions.len());
        for ext in extensions {
            let format = AudioFormat::from_extension(ext.trim_start_matches('.'))
                .ok_or_else(|| format!("unsupported audio extension in config: {}", ext))?;
            if !allowed.contains(&format) {
                allowed.push(format);
            }
        }

        Ok(Self { allowed })
    }

    pub fn allowed(&self) -> &[AudioFormat] {
        &self.allowed
    }

    pub fn validate(&self, filename: &str) -> Result<AudioFormat, UploadRejection> {
        if filename.is_empty() {
            return Err(UploadRejection::NoSelectedFile);
        }

        AudioFormat::from_filename(filename)
            .filter(|format| self.allowed.contains(format))
            .ok_or(UploadRejection::UnsupportedType)
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(AudioFormat::ALL.to_vec())
    }
}
