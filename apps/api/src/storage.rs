//! Object storage for uploaded resumes and profile photos (S3 / MinIO).

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use tracing::info;

use crate::auth::UserId;
use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// Keyed blob storage for user documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), AppError>;

    /// Fetches an object. A missing key is `NotFound`, not a storage error.
    async fn get(&self, key: &str) -> Result<StoredObject, AppError>;
}

/// [`DocumentStore`] backed by one S3 (or MinIO) bucket.
#[derive(Clone)]
pub struct ObjectStore {
    client: S3Client,
    bucket: String,
}

impl ObjectStore {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl DocumentStore for ObjectStore {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), AppError> {
        let len = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload of {key} failed: {e}")))?;

        info!("Uploaded {} bytes to s3://{}/{}", len, self.bucket, key);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<StoredObject, AppError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    AppError::NotFound(format!("No object stored at {key}"))
                } else {
                    AppError::Storage(format!("S3 download of {key} failed: {e}"))
                }
            })?;

        let content_type = output.content_type().map(String::from);
        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| AppError::Storage(format!("S3 body read of {key} failed: {e}")))?
            .into_bytes();

        Ok(StoredObject {
            bytes,
            content_type,
        })
    }
}

pub fn resume_key(user_id: UserId) -> String {
    format!("resumes/{user_id}.pdf")
}

pub fn photo_key(user_id: UserId) -> String {
    format!("photos/{user_id}")
}
