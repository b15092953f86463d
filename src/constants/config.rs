use std::env;

/// Fixed number of rows on every pending-queue and request-history page.
pub const PENDING_PAGE_SIZE: u64 = 7;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub fn get_database_url() -> Result<String, env::VarError> {
    env::var("DATABASE_URL")
}

pub fn get_server_address() -> String {
    env::var("SERVER_ADDRESS")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
}

/// Shared HS256 secret with the auth provider that issues bearer tokens.
pub fn get_jwt_secret() -> String {
    env::var("JWT_SECRET").unwrap_or_else(|_| "wallet-desk-dev-secret".to_string())
}

pub fn get_max_upload_bytes() -> usize {
    env::var("MAX_UPLOAD_BYTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
}

/// Digest Cloudinary expects on signed requests. Accounts sign with SHA-1
/// unless switched to SHA-256 in their security settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl std::str::FromStr for SignatureAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(SignatureAlgorithm::Sha1),
            "sha256" | "sha-256" => Ok(SignatureAlgorithm::Sha256),
            other => Err(format!(
                "CLOUDINARY_SIGNATURE_ALGORITHM must be sha1 or sha256, got {:?}",
                other
            )),
        }
    }
}

impl std::fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureAlgorithm::Sha1 => write!(f, "sha1"),
            SignatureAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
    pub signature_algorithm: SignatureAlgorithm,
}

pub fn get_cloudinary_config() -> Result<CloudinaryConfig, String> {
    let required = |key: &str| env::var(key).map_err(|_| format!("{} must be set", key));

    Ok(CloudinaryConfig {
        cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
        api_key: required("CLOUDINARY_API_KEY")?,
        api_secret: required("CLOUDINARY_API_SECRET")?,
        folder: env::var("CLOUDINARY_FOLDER").unwrap_or_else(|_| "money-requests".to_string()),
        signature_algorithm: match env::var("CLOUDINARY_SIGNATURE_ALGORITHM") {
            Ok(raw) => raw.parse()?,
            Err(_) => SignatureAlgorithm::default(),
        },
    })
}

/// Comma-separated `CORS_ORIGIN`; empty or `*` allows any origin.
pub fn get_cors_origins() -> Vec<String> {
    env::var("CORS_ORIGIN")
        .unwrap_or_default()
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
