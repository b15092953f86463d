use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use serde::Serialize;
use std::collections::HashMap;

use crate::errors::{AppError, FieldErrors};

const MAX_TEXT_FIELD_BYTES: usize = 4 * 1024;

#[derive(Debug, Clone, Serialize)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// A multipart body split into plain text fields and file parts.
///
/// Parts that could not be accepted (too large, not UTF-8) are left out and
/// reported in `errors`, so the rest of the form is still available.
#[derive(Debug, Default)]
pub struct MultipartPayload {
    pub texts: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
    pub errors: FieldErrors,
}

impl MultipartPayload {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }

    /// Browsers send an empty part for an untouched file input.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name).filter(|f| !f.bytes.is_empty())
    }

    fn reject(&mut self, name: &str, message: String) {
        self.errors.entry(name.to_string()).or_default().push(message);
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(
            self.text(name).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("true" | "on" | "1")
        )
    }
}

/// Reads the whole body. A file part larger than `max_file_bytes` is drained
/// and dropped with a field error; only a broken stream fails the read.
pub async fn read_payload(
    mut payload: Multipart,
    max_file_bytes: usize,
) -> Result<MultipartPayload, AppError> {
    let mut out = MultipartPayload::default();

    while let Some(mut field) = payload.try_next().await? {
        let content_disposition = field.content_disposition().cloned();
        let name = content_disposition
            .as_ref()
            .and_then(|cd| cd.get_name())
            .unwrap_or("")
            .to_string();
        let file_name = content_disposition
            .as_ref()
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        let limit = if file_name.is_some() {
            max_file_bytes
        } else {
            MAX_TEXT_FIELD_BYTES
        };

        let mut bytes = Vec::new();
        let mut oversized = false;
        while let Some(chunk) = field.try_next().await? {
            if oversized {
                continue;
            }
            if bytes.len() + chunk.len() > limit {
                oversized = true;
                bytes = Vec::new();
                continue;
            }
            bytes.extend_from_slice(&chunk);
        }

        if name.is_empty() {
            continue;
        }
        if oversized {
            out.reject(&name, format!("Must be at most {} bytes", limit));
            continue;
        }

        match file_name {
            Some(file_name) => {
                out.files.insert(
                    name,
                    UploadedFile {
                        file_name: Some(file_name).filter(|f| !f.is_empty()),
                        bytes,
                    },
                );
            }
            None => match String::from_utf8(bytes) {
                Ok(text) => {
                    out.texts.insert(name, text);
                }
                Err(_) => out.reject(&name, "Must be valid UTF-8 text".to_string()),
            },
        }
    }

    Ok(out)
}
