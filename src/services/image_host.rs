use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::constants::config::{CloudinaryConfig, SignatureAlgorithm};
use crate::errors::AppError;
use crate::forms::proof_image::ProofImage;

/// Durable reference to an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedImage {
    pub secure_url: String,
    pub public_id: String,
}

/// Where proof screenshots and bank documents are stored. The service only
/// keeps the returned URL and id.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, image: &ProofImage, folder: &str) -> Result<HostedImage, AppError>;

    async fn destroy(&self, public_id: &str) -> Result<(), AppError>;
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    public_id: Option<String>,
    error: Option<CloudinaryError>,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: Option<String>,
    error: Option<CloudinaryError>,
}

#[derive(Deserialize)]
struct CloudinaryError {
    message: String,
}

/// Signed uploads against the Cloudinary REST API. Requests are signed with
/// the digest named by `CLOUDINARY_SIGNATURE_ALGORITHM`, which must match
/// the account setting.
pub struct CloudinaryImageHost {
    config: CloudinaryConfig,
    client: reqwest::Client,
}

impl CloudinaryImageHost {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/{}",
            self.config.cloud_name, action
        )
    }

    /// Params must already be sorted by key.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        sign_params(params, &self.config.api_secret, self.config.signature_algorithm)
    }
}

fn sign_params(params: &[(&str, &str)], api_secret: &str, algorithm: SignatureAlgorithm) -> String {
    let to_sign = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    match algorithm {
        SignatureAlgorithm::Sha1 => digest_hex::<Sha1>(&to_sign, api_secret),
        SignatureAlgorithm::Sha256 => digest_hex::<Sha256>(&to_sign, api_secret),
    }
}

fn digest_hex<D: Digest>(to_sign: &str, api_secret: &str) -> String {
    let mut hasher = D::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl ImageHost for CloudinaryImageHost {
    async fn upload(&self, image: &ProofImage, folder: &str) -> Result<HostedImage, AppError> {
        let folder = format!("{}/{}", self.config.folder, folder);
        let public_id = uuid::Uuid::new_v4().to_string();
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let signature = self.sign(&[
            ("folder", folder.as_str()),
            ("public_id", public_id.as_str()),
            ("timestamp", timestamp.as_str()),
        ]);

        let part = multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name())
            .mime_str(&image.mime_type)
            .map_err(|e| AppError::image_host(e.to_string()))?;

        let form = multipart::Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder)
            .text("public_id", public_id)
            .text("signature", signature)
            .part("file", part);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::image_host(format!("Upload failed: {}", e)))?;

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::image_host(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = body.error {
            return Err(AppError::image_host(error.message));
        }

        match (body.secure_url, body.public_id) {
            (Some(secure_url), Some(public_id)) => Ok(HostedImage {
                secure_url,
                public_id,
            }),
            _ => Err(AppError::image_host("No secure URL in response")),
        }
    }

    async fn destroy(&self, public_id: &str) -> Result<(), AppError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", public_id), ("timestamp", timestamp.as_str())]);

        let params = [
            ("public_id", public_id),
            ("api_key", self.config.api_key.as_str()),
            ("timestamp", timestamp.as_str()),
            ("signature", signature.as_str()),
        ];

        let body: DestroyResponse = self
            .client
            .post(self.endpoint("destroy"))
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::image_host(format!("Delete failed: {}", e)))?
            .json()
            .await
            .map_err(|e| AppError::image_host(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = body.error {
            return Err(AppError::image_host(error.message));
        }

        match body.result.as_deref() {
            Some("ok") | Some("not found") => Ok(()),
            other => Err(AppError::image_host(format!(
                "Failed to delete image: {}",
                other.unwrap_or("no result")
            ))),
        }
    }
}
