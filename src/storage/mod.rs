//! Storage backend abstraction for uploaded media.
//!
//! Supports two backends chosen by configuration:
//! - `local`: files on disk under the configured uploads directory
//! - `s3`: S3-compatible object storage (MinIO, AWS S3, ...)
//!
//! Uploads are stored content-addressed: the canonical filename is the
//! blake3 hash of the bytes plus the original extension, fanned out
//! over `{name[0:2]}/{name[2:4]}/` prefix directories.

pub mod local;
pub mod s3;

use actix_web::web::Bytes;
use async_trait::async_trait;
use futures::Stream;
use once_cell::sync::OnceCell;
use std::pin::Pin;

use crate::app_config;

/// A boxed stream of bytes for streaming file content.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// A retrieved storage object with response metadata.
pub struct StorageObject {
    pub body: ByteStream,
    pub content_length: Option<i64>,
    pub content_type: Option<String>,
    pub e_tag: Option<String>,
    /// Content range for partial responses
    pub content_range: Option<String>,
    pub accept_ranges: Option<String>,
    pub last_modified: Option<String>,
}

/// Storage operation errors.
#[derive(Debug)]
pub enum StorageError {
    NotFound(String),
    Io(std::io::Error),
    S3(String),
    /// Invalid or unsatisfiable HTTP Range request
    InvalidRange(String),
    Config(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::NotFound(msg) => write!(f, "Not found: {}", msg),
            StorageError::Io(e) => write!(f, "I/O error: {}", e),
            StorageError::S3(msg) => write!(f, "S3 error: {}", msg),
            StorageError::InvalidRange(msg) => write!(f, "Invalid range: {}", msg),
            StorageError::Config(msg) => write!(f, "Storage config error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound(e.to_string())
        } else {
            StorageError::Io(e)
        }
    }
}

/// Unified interface over the configured storage backend.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Stores a file under its canonical filename.
    async fn put_object(&self, data: Vec<u8>, filename: &str) -> Result<(), StorageError>;

    /// Retrieves a file. `range` supports HTTP Range requests.
    async fn get_object(
        &self,
        key: &str,
        range: Option<String>,
    ) -> Result<StorageObject, StorageError>;

    /// Removes a file. Removing a missing file is not an error; the
    /// caller only cares that the name no longer resolves.
    async fn delete_object(&self, filename: &str) -> Result<(), StorageError>;

    async fn exists(&self, filename: &str) -> Result<bool, StorageError>;

    /// Public URL under which the file is served.
    fn public_url(&self, filename: &str) -> String;
}

static STORAGE: OnceCell<Box<dyn StorageBackend>> = OnceCell::new();

/// Builds the backend named by configuration. Called once at startup.
pub fn init() -> Result<(), StorageError> {
    let config = app_config::storage();
    let backend: Box<dyn StorageBackend> = match config.backend.as_str() {
        "local" => Box::new(local::LocalStorage::new(
            config.local_path.clone().into(),
            config.local_public_url.clone(),
        )?),
        "s3" => Box::new(s3::S3Storage::from_config(&config)?),
        other => {
            return Err(StorageError::Config(format!(
                "unknown storage backend {:?} (expected \"local\" or \"s3\")",
                other
            )))
        }
    };

    STORAGE
        .set(backend)
        .map_err(|_| StorageError::Config("storage initialized twice".to_owned()))
}

/// The configured backend. Panics when `init` has not run.
pub fn get_backend() -> &'static dyn StorageBackend {
    STORAGE
        .get()
        .expect("storage::init() must run before get_backend()")
        .as_ref()
}

/// Canonical content-addressed filename: blake3 of the bytes plus the
/// lowercased original extension.
pub fn content_name(data: &[u8], original_filename: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(data);
    let hash = hasher.finalize().to_hex();

    match extension_of(original_filename) {
        Some(ext) => format!("{}.{}", hash, ext),
        None => hash.to_string(),
    }
}

/// Prefix fan-out shared by both backends:
/// `{name[0:2]}/{name[2:4]}/{name}`, with short names stored flat.
pub(crate) fn fan_out(filename: &str) -> String {
    if filename.len() < 4 {
        filename.to_owned()
    } else {
        format!("{}/{}/{}", &filename[0..2], &filename[2..4], filename)
    }
}

fn extension_of(filename: &str) -> Option<String> {
    let ext = filename.rsplit('.').next()?;
    if ext == filename || ext.is_empty() {
        return None;
    }
    // Keep extensions boring: alphanumeric, short.
    let ext = ext.to_lowercase();
    if ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext)
    } else {
        None
    }
}
