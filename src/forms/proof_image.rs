use super::multipart::UploadedFile;

/// An uploaded file whose bytes were sniffed as an image.
#[derive(Debug, Clone)]
pub struct ProofImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub extension: String,
}

impl ProofImage {
    /// `None` unless the content (not the claimed name) is a known image format.
    pub fn sniff(file: UploadedFile) -> Option<Self> {
        let kind = infer::get(&file.bytes)?;
        if kind.matcher_type() != infer::MatcherType::Image {
            return None;
        }
        Some(Self {
            mime_type: kind.mime_type().to_string(),
            extension: kind.extension().to_string(),
            bytes: file.bytes,
        })
    }

    pub fn file_name(&self) -> String {
        format!("proof.{}", self.extension)
    }
}
