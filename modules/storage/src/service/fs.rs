use crate::service::{sanitize_filename, StorageBackend, StorageKey, StoreError};
use anyhow::Context;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::{
    fmt::Debug,
    io::ErrorKind,
    path::{Component, Path, PathBuf},
    pin::pin,
};
use tempfile::{tempdir, TempDir};
use tokio::{
    fs::{create_dir_all, remove_file, File},
    io::AsyncWriteExt,
};
use tokio_util::io::ReaderStream;

/// The directory, below the base, holding user guides.
pub const USER_GUIDE_DIR: &str = "user_guide_docs";

/// A filesystem backed store
///
/// ## Layout
///
/// ```ignore
/// <base>/
///   user_guide_docs/
///     <uuid>-<sanitized name> # file
/// ```
///
/// The random prefix keeps uploads with the same name apart.
#[derive(Clone, Debug)]
pub struct FileSystemBackend {
    base: PathBuf,
}

impl FileSystemBackend {
    pub async fn new(base: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let base = base.into();
        let documents = base.join(USER_GUIDE_DIR);

        create_dir_all(&documents)
            .await
            .or_else(|err| {
                if err.kind() == ErrorKind::AlreadyExists {
                    Ok(())
                } else {
                    Err(err)
                }
            })
            .with_context(|| {
                format!(
                    "unable to create '{USER_GUIDE_DIR}' directory in the media root: {}",
                    base.display()
                )
            })?;

        Ok(Self { base })
    }

    /// Create a new storage for testing
    pub async fn for_test() -> anyhow::Result<(Self, TempDir)> {
        let dir = tempdir()?;

        Self::new(dir.path()).await.map(|result| (result, dir))
    }

    /// Resolve a key to a path, refusing anything leaving the base directory.
    fn resolve(&self, key: &StorageKey) -> Result<PathBuf, std::io::Error> {
        let path = Path::new(key.as_str());
        if path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            Ok(self.base.join(path))
        } else {
            Err(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("invalid storage key: {key}"),
            ))
        }
    }
}

impl StorageBackend for FileSystemBackend {
    type Error = std::io::Error;

    async fn store<E, S>(
        &self,
        filename: &str,
        stream: S,
    ) -> Result<StorageKey, StoreError<E, Self::Error>>
    where
        E: Debug,
        S: Stream<Item = Result<Bytes, E>>,
    {
        let key = StorageKey(format!(
            "{USER_GUIDE_DIR}/{}-{}",
            uuid::Uuid::new_v4(),
            sanitize_filename(filename)
        ));
        let target = self.resolve(&key).map_err(StoreError::Backend)?;

        log::debug!("Storing file: {}", target.display());

        let mut file = File::create(&target).await.map_err(StoreError::Backend)?;
        let result = write_stream(&mut file, stream).await;
        drop(file);

        match result {
            Ok(()) => Ok(key),
            Err(err) => {
                // don't leave a partial document behind
                if let Err(cleanup) = remove_file(&target).await {
                    log::warn!("failed to remove partial file {}: {cleanup}", target.display());
                }
                Err(err)
            }
        }
    }

    async fn retrieve(
        &self,
        key: &StorageKey,
    ) -> Result<Option<impl Stream<Item = Result<Bytes, Self::Error>> + 'static + use<>>, Self::Error> {
        let target = self.resolve(key)?;

        log::debug!("Opening file: {}", target.display());

        let file = match File::open(&target).await {
            Ok(file) => Some(file),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => return Err(err),
        };

        Ok(file.map(ReaderStream::new))
    }

    async fn delete(&self, key: &StorageKey) -> Result<(), Self::Error> {
        let target = self.resolve(key)?;

        match remove_file(&target).await {
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            result => result,
        }
    }
}

async fn write_stream<E, S>(file: &mut File, stream: S) -> Result<(), StoreError<E, std::io::Error>>
where
    E: Debug,
    S: Stream<Item = Result<Bytes, E>>,
{
    let mut stream = pin!(stream);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(StoreError::Stream)?;
        file.write_all(&chunk).await.map_err(StoreError::Backend)?;
    }

    // ensure we have all bytes on disk for the target file
    file.flush().await.map_err(StoreError::Backend)
}
