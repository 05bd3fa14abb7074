use super::{Error, Storage, Upload, UploadedMedia};
use crate::types::StorageContext;
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// Signed uploads against Cloudinary's REST API.
pub struct Cloudinary {
    cfg: StorageContext,
    client: Client,
}

impl Cloudinary {
    pub fn new(cfg: StorageContext) -> Self {
        Self {
            cfg,
            client: Client::new(),
        }
    }
}

/// Cloudinary signs the alphabetically sorted parameters followed by the secret.
fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut params = params.to_vec();
    params.sort_by(|a, b| a.0.cmp(b.0));

    let data_to_sign = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(format!("{}{}", data_to_sign, api_secret));
    let hash = hasher.finalize();
    base16ct::lower::encode_string(&hash)
}

#[async_trait]
impl Storage for Cloudinary {
    async fn upload(&self, upload: Upload) -> Result<UploadedMedia, Error> {
        let timestamp = chrono::Utc::now().timestamp();
        let signature = sign(
            &[
                ("folder", upload.folder.clone()),
                ("overwrite", "true".to_string()),
                ("public_id", upload.public_id.clone()),
                ("timestamp", timestamp.to_string()),
                ("upload_preset", self.cfg.upload_preset.clone()),
            ],
            &self.cfg.api_secret,
        );

        let part = Part::bytes(upload.contents).file_name(upload.public_id.clone());

        let form = Form::new()
            .text("folder", upload.folder.clone())
            .text("overwrite", "true")
            .text("public_id", upload.public_id.clone())
            .text("upload_preset", self.cfg.upload_preset.clone())
            .text("api_key", self.cfg.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
            .part("file", part);

        tracing::debug!(
            "Uploading {}/{} to the image store",
            upload.folder,
            upload.public_id
        );

        let res = self
            .client
            .post(&self.cfg.upload_endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Error occurred while trying to upload a file: {:?}", err);
                Error::UploadFailed
            })?;

        let status = res.status();
        let data = res.text().await.map_err(|err| {
            tracing::error!("Error occurred while processing return data: {:?}", err);
            Error::UploadFailed
        })?;

        if status != StatusCode::OK {
            tracing::error!("Failed to upload file: {}", data);
            return Err(Error::UploadFailed);
        }

        match serde_json::de::from_str::<UploadResponse>(data.as_ref()) {
            Ok(res) => Ok(UploadedMedia {
                url: res.secure_url,
                public_id: res.public_id,
                timestamp,
            }),
            Err(err) => {
                tracing::error!("Failed to deserialize cloudinary response: {:?}", err);
                Err(Error::UploadFailed)
            }
        }
    }

    async fn delete(&self, media: UploadedMedia) -> Result<(), Error> {
        let timestamp = chrono::Utc::now().timestamp();
        let signature = sign(
            &[
                ("public_id", media.public_id.clone()),
                ("timestamp", timestamp.to_string()),
            ],
            &self.cfg.api_secret,
        );

        let body = json!({
            "public_id": media.public_id,
            "api_key": self.cfg.api_key,
            "signature": signature,
            "signature_algorithm": "sha256",
            "timestamp": timestamp,
        });

        let res = self
            .client
            .post(&self.cfg.delete_endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Failed to delete file {}: {:?}", media.url, err);
                Error::DeleteFailed
            })?;

        let status = res.status();
        let data = res.text().await.map_err(|err| {
            tracing::error!("Failed to process delete file response {}: {:?}", media.url, err);
            Error::DeleteFailed
        })?;

        if status != StatusCode::OK {
            tracing::error!("Failed to delete uploaded file: {}", data);
            return Err(Error::DeleteFailed);
        }

        tracing::debug!("Delete file response: {}", data);

        Ok(())
    }
}
