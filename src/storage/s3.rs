//! S3-compatible storage backend (MinIO, AWS S3).

use super::{fan_out, ByteStream, StorageBackend, StorageError, StorageObject};
use crate::app_config::StorageConfig;
use actix_web::web::Bytes;
use async_trait::async_trait;
use futures::TryStreamExt;
use rusoto_core::credential::StaticProvider;
use rusoto_core::{HttpClient, Region};
use rusoto_s3::{
    DeleteObjectRequest, GetObjectRequest, ListObjectsV2Request, PutObjectRequest, S3Client, S3,
};

pub struct S3Storage {
    s3: S3Client,
    bucket_name: String,
    /// Base URL under which bucket contents are publicly reachable
    pub_url: String,
}

impl S3Storage {
    pub fn new(region: Region, bucket_name: String, pub_url: String) -> S3Storage {
        log::info!("S3Storage initialized for bucket: {}", bucket_name);

        S3Storage {
            s3: S3Client::new(region),
            bucket_name,
            pub_url,
        }
    }

    /// Builds the backend from configuration. Keys may be left empty to
    /// use the ambient AWS credential chain instead.
    pub fn from_config(config: &StorageConfig) -> Result<S3Storage, StorageError> {
        let region = Region::Custom {
            name: config.s3_region.clone(),
            endpoint: config.s3_endpoint.clone(),
        };

        if config.s3_access_key.is_empty() {
            return Ok(Self::new(
                region,
                config.s3_bucket.clone(),
                config.s3_public_url.clone(),
            ));
        }

        let credentials = StaticProvider::new_minimal(
            config.s3_access_key.clone(),
            config.s3_secret_key.clone(),
        );
        let dispatcher = HttpClient::new()
            .map_err(|e| StorageError::Config(format!("S3 http client: {}", e)))?;

        log::info!(
            "S3Storage initialized for bucket: {} at {}",
            config.s3_bucket,
            config.s3_endpoint
        );

        Ok(S3Storage {
            s3: S3Client::new_with(dispatcher, credentials, region),
            bucket_name: config.s3_bucket.clone(),
            pub_url: config.s3_public_url.clone(),
        })
    }
}

#[async_trait]
impl StorageBackend for S3Storage {
    async fn put_object(&self, data: Vec<u8>, filename: &str) -> Result<(), StorageError> {
        log::info!("S3Storage: put_object: {}", filename);

        let put_request = PutObjectRequest {
            bucket: self.bucket_name.clone(),
            key: fan_out(filename),
            body: Some(data.into()),
            ..Default::default()
        };

        self.s3
            .put_object(put_request)
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        Ok(())
    }

    async fn get_object(
        &self,
        key: &str,
        range: Option<String>,
    ) -> Result<StorageObject, StorageError> {
        log::debug!("S3Storage: get_object: {}", key);

        let request = GetObjectRequest {
            bucket: self.bucket_name.clone(),
            key: fan_out(key),
            range,
            ..Default::default()
        };

        let output = self
            .s3
            .get_object(request)
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        // Convert the S3 body stream to our ByteStream type
        let body: ByteStream = match output.body {
            Some(stream) => {
                let mapped = stream
                    .map_ok(Bytes::from)
                    .map_err(|e: std::io::Error| std::io::Error::other(e.to_string()));
                Box::pin(mapped)
            }
            None => {
                return Err(StorageError::NotFound("Empty body".into()));
            }
        };

        Ok(StorageObject {
            body,
            content_length: output.content_length,
            content_type: output.content_type,
            e_tag: output.e_tag,
            content_range: output.content_range,
            accept_ranges: output.accept_ranges,
            last_modified: output.last_modified,
        })
    }

    async fn delete_object(&self, filename: &str) -> Result<(), StorageError> {
        log::info!("S3Storage: delete_object: {}", filename);

        let delete_request = DeleteObjectRequest {
            bucket: self.bucket_name.clone(),
            key: fan_out(filename),
            ..Default::default()
        };

        // S3 deletes are idempotent; a missing key is not an error.
        self.s3
            .delete_object(delete_request)
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        Ok(())
    }

    async fn exists(&self, filename: &str) -> Result<bool, StorageError> {
        log::debug!("S3Storage: exists: {}", filename);

        // Using list_objects_v2 is reportedly faster than head_object
        // https://www.peterbe.com/plog/fastest-way-to-find-out-if-a-file-exists-in-s3
        let list_request = ListObjectsV2Request {
            bucket: self.bucket_name.clone(),
            prefix: Some(fan_out(filename)),
            ..Default::default()
        };

        let result = self
            .s3
            .list_objects_v2(list_request)
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        let count = result.key_count.unwrap_or(0);
        Ok(count > 0)
    }

    fn public_url(&self, filename: &str) -> String {
        // Direct bucket or CDN access, so the URL mirrors the object key.
        format!(
            "{}/{}",
            self.pub_url.trim_end_matches('/'),
            fan_out(filename)
        )
    }
}
