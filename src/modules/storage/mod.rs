pub mod cloudinary;

use async_trait::async_trait;
use axum_typed_multipart::FieldData;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::io::Read;
use tempfile::NamedTempFile;

/// Concurrent uploads per batch when a request carries many images.
pub const UPLOAD_BATCH_SIZE: usize = 5;

#[derive(Debug, PartialEq)]
pub enum Error {
    ReadFailed,
    UploadFailed,
    DeleteFailed,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UploadedMedia {
    pub public_id: String,
    pub url: String,
    pub timestamp: i64,
}

pub struct Upload {
    pub folder: String,
    pub public_id: String,
    pub contents: Vec<u8>,
}

impl Upload {
    /// Keys the asset by the current time in milliseconds.
    pub fn timestamped(folder: String, contents: Vec<u8>) -> Self {
        Self {
            folder,
            public_id: chrono::Utc::now().timestamp_millis().to_string(),
            contents,
        }
    }
}

/// An external binary asset host. Implementations must hand back a stable
/// retrieval URL and accept the same reference for deletion.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn upload(&self, upload: Upload) -> Result<UploadedMedia, Error>;
    async fn delete(&self, media: UploadedMedia) -> Result<(), Error>;
}

pub fn read_file(mut file: FieldData<NamedTempFile>) -> Result<Vec<u8>, Error> {
    let mut buf: Vec<u8> = vec![];

    file.contents.read_to_end(&mut buf).map_err(|err| {
        tracing::error!("Failed to read the uploaded file {:?}", err);
        Error::ReadFailed
    })?;

    Ok(buf)
}

/// Uploads in batches of [`UPLOAD_BATCH_SIZE`]. Assets already stored are not
/// cleaned up when a later upload fails.
pub async fn upload_many(
    storage: &dyn Storage,
    uploads: Vec<Upload>,
) -> Result<Vec<UploadedMedia>, Error> {
    let mut media = Vec::with_capacity(uploads.len());
    let mut uploads = uploads.into_iter().peekable();

    while uploads.peek().is_some() {
        let batch = uploads
            .by_ref()
            .take(UPLOAD_BATCH_SIZE)
            .map(|upload| storage.upload(upload));
        media.extend(try_join_all(batch).await?);
    }

    Ok(media)
}

/// Reads a multipart file and stores it under `folder`, keyed by the current time.
pub async fn upload_file(
    storage: &dyn Storage,
    folder: String,
    file: FieldData<NamedTempFile>,
) -> Result<UploadedMedia, Error> {
    let contents = read_file(file)?;
    storage.upload(Upload::timestamped(folder, contents)).await
}

/// Drops assets no stored row points at any more. Call it only after the
/// write that stopped referencing them has succeeded. Failures leave orphans
/// in the image store and are logged.
pub async fn discard(storage: &dyn Storage, media: Vec<UploadedMedia>) {
    if media.is_empty() {
        return;
    }

    let urls = media
        .iter()
        .map(|media| media.url.clone())
        .collect::<Vec<_>>();

    if let Err(err) = delete_many(storage, media).await {
        tracing::warn!(
            "Assets {:?} were left in the image store: {:?}",
            urls,
            err
        );
    }
}

pub async fn delete_many(storage: &dyn Storage, media: Vec<UploadedMedia>) -> Result<(), Error> {
    try_join_all(media.into_iter().map(|media| storage.delete(media)))
        .await
        .map(|_| ())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryStorage {
        pub stored: Mutex<Vec<UploadedMedia>>,
        pub deleted: Mutex<Vec<UploadedMedia>>,
        pub fail_after: Option<usize>,
        pub fail_deletes: bool,
    }

    #[async_trait]
    impl Storage for MemoryStorage {
        async fn upload(&self, upload: Upload) -> Result<UploadedMedia, Error> {
            let mut stored = self.stored.lock().unwrap();
            if Some(stored.len()) == self.fail_after {
                return Err(Error::UploadFailed);
            }
            let media = UploadedMedia {
                public_id: format!("{}/{}", upload.folder, upload.public_id),
                url: format!(
                    "https://images.test/{}/{}/{}",
                    upload.folder,
                    upload.public_id,
                    stored.len()
                ),
                timestamp: stored.len() as i64,
            };
            stored.push(media.clone());
            Ok(media)
        }

        async fn delete(&self, media: UploadedMedia) -> Result<(), Error> {
            if self.fail_deletes {
                return Err(Error::DeleteFailed);
            }
            self.deleted.lock().unwrap().push(media);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryStorage;
    use super::*;

    fn upload(public_id: &str) -> Upload {
        Upload {
            folder: "restaurants/owner".to_string(),
            public_id: public_id.to_string(),
            contents: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn uploads_every_image_across_batches() {
        let storage = MemoryStorage::default();
        let uploads = (0..12).map(|i| upload(&format!("images/{i}"))).collect();

        let media = upload_many(&storage, uploads).await.unwrap();

        assert_eq!(media.len(), 12);
        assert_eq!(storage.stored.lock().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn failed_batch_keeps_earlier_uploads() {
        let storage = MemoryStorage {
            fail_after: Some(6),
            ..Default::default()
        };
        let uploads = (0..10).map(|i| upload(&format!("images/{i}"))).collect();

        let result = upload_many(&storage, uploads).await;

        assert_eq!(result, Err(Error::UploadFailed));
        assert_eq!(storage.stored.lock().unwrap().len(), 6);
        assert!(storage.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn discarding_deletes_every_asset() {
        let storage = MemoryStorage::default();
        let old = vec![
            storage.upload(upload("logo")).await.unwrap(),
            storage.upload(upload("images/0")).await.unwrap(),
        ];

        discard(&storage, old.clone()).await;

        assert_eq!(*storage.deleted.lock().unwrap(), old);
    }

    #[tokio::test]
    async fn discarding_swallows_delete_failures() {
        let storage = MemoryStorage {
            fail_deletes: true,
            ..Default::default()
        };
        let old = storage.upload(upload("logo")).await.unwrap();

        discard(&storage, vec![old]).await;

        assert!(storage.deleted.lock().unwrap().is_empty());
        assert_eq!(storage.stored.lock().unwrap().len(), 1);
    }
}
