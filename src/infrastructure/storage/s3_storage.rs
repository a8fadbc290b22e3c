//! S3-compatible blob storage (MinIO).

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use serde_json::json;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use super::service::{BlobStorage, StorageError, Upload};

/// Lifetime of signed URLs handed out for private objects.
const SIGNED_URL_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Connection settings for an S3-compatible endpoint.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    /// Endpoint the service talks to, e.g. `http://minio:9000`.
    pub endpoint: String,
    /// Base used in public URLs. Falls back to `endpoint`.
    pub public_endpoint: Option<String>,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

/// [`BlobStorage`] over the AWS S3 SDK with path-style addressing.
///
/// Object names are a random UUID plus the extension of the uploaded file, so
/// two uploads never collide. Public URLs have the form
/// `{public_endpoint}/{bucket}/{object}`.
pub struct S3Storage {
    client: Client,
    public_base: String,
}

impl S3Storage {
    /// Builds the SDK client for the configured endpoint.
    pub async fn connect(settings: StorageSettings) -> Self {
        let credentials = Credentials::new(
            settings.access_key,
            settings.secret_key,
            None,
            None,
            "book-catalog",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(settings.region))
            .endpoint_url(&settings.endpoint)
            .credentials_provider(credentials)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        let public_base = settings
            .public_endpoint
            .unwrap_or(settings.endpoint)
            .trim_end_matches('/')
            .to_string();

        info!(endpoint = %public_base, "Blob storage configured (S3)");

        Self {
            client: Client::from_conf(s3_config),
            public_base,
        }
    }

    /// Creates `bucket` when missing. Public buckets get an anonymous-read policy.
    async fn ensure_bucket(&self, bucket: &str, public: bool) -> Result<(), StorageError> {
        if self.client.head_bucket().bucket(bucket).send().await.is_ok() {
            return Ok(());
        }

        match self.client.create_bucket().bucket(bucket).send().await {
            Ok(_) => info!(bucket, "Created bucket"),
            Err(e) => {
                let service_error = e.into_service_error();
                if !service_error.is_bucket_already_owned_by_you()
                    && !service_error.is_bucket_already_exists()
                {
                    return Err(StorageError::Upload(
                        DisplayErrorContext(&service_error).to_string(),
                    ));
                }
            }
        }

        if public {
            let policy = json!({
                "Version": "2012-10-17",
                "Statement": [{
                    "Effect": "Allow",
                    "Principal": { "AWS": ["*"] },
                    "Action": ["s3:GetObject"],
                    "Resource": [format!("arn:aws:s3:::{bucket}/*")],
                }],
            });

            self.client
                .put_bucket_policy()
                .bucket(bucket)
                .policy(policy.to_string())
                .send()
                .await
                .map_err(|e| StorageError::Upload(DisplayErrorContext(&e).to_string()))?;
        }

        Ok(())
    }

    async fn signed_url(&self, bucket: &str, object: &str) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(SIGNED_URL_TTL)
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(object)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Upload(DisplayErrorContext(&e).to_string()))?;

        Ok(request.uri().to_string())
    }
}

#[async_trait]
impl BlobStorage for S3Storage {
    async fn save(
        &self,
        upload: Upload,
        bucket: &str,
        public: bool,
    ) -> Result<String, StorageError> {
        self.ensure_bucket(bucket, public).await?;

        let object = object_name(upload.file_name.as_deref());

        let mut request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(&object)
            .body(ByteStream::from(upload.bytes));
        if let Some(content_type) = upload.content_type {
            request = request.content_type(content_type);
        }

        request
            .send()
            .await
            .map_err(|e| StorageError::Upload(DisplayErrorContext(&e).to_string()))?;

        debug!(bucket, %object, "Stored object");

        if public {
            Ok(format!("{}/{}/{}", self.public_base, bucket, object))
        } else {
            self.signed_url(bucket, &object).await
        }
    }

    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        let (bucket, object) = object_location(url)?;

        self.client
            .delete_object()
            .bucket(&bucket)
            .key(&object)
            .send()
            .await
            .map_err(|e| StorageError::Delete(DisplayErrorContext(&e).to_string()))?;

        debug!(%bucket, %object, "Deleted object");
        Ok(())
    }
}

/// Random object name keeping the extension of `file_name`.
fn object_name(file_name: Option<&str>) -> String {
    let extension = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    format!("{}{}", Uuid::new_v4().simple(), extension)
}

/// Splits a stored-object URL into `(bucket, object)`.
///
/// The first path segment is the bucket and the rest is the object key. The
/// query string of signed URLs is ignored.
///
/// # Errors
///
/// Returns [`StorageError::InvalidUrl`] when the URL cannot be parsed or
/// lacks either part.
pub fn object_location(url: &str) -> Result<(String, String), StorageError> {
    let parsed = Url::parse(url).map_err(|e| StorageError::InvalidUrl(format!("{url}: {e}")))?;

    let path = parsed.path().trim_start_matches('/');
    match path.split_once('/') {
        Some((bucket, object)) if !bucket.is_empty() && !object.is_empty() => {
            Ok((bucket.to_string(), object.to_string()))
        }
        _ => Err(StorageError::InvalidUrl(url.to_string())),
    }
}
