pub mod fs;

use bytes::Bytes;
use futures::Stream;
use std::fmt::{Debug, Display, Formatter};
use std::future::Future;

#[derive(Debug, thiserror::Error)]
pub enum StoreError<S: Debug, B: Debug> {
    #[error("stream error: {0}")]
    Stream(#[source] S),
    #[error("backend error: {0}")]
    Backend(#[source] B),
}

/// The location of a stored document, relative to the storage root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKey(pub String);

impl StorageKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait StorageBackend {
    type Error: Debug;

    /// Store the content from a stream, under a name derived from `filename`
    fn store<E, S>(
        &self,
        filename: &str,
        stream: S,
    ) -> impl Future<Output = Result<StorageKey, StoreError<E, Self::Error>>>
    where
        E: Debug,
        S: Stream<Item = Result<Bytes, E>>;

    /// Retrieve the content as a stream, `None` if it does not exist
    fn retrieve(
        &self,
        key: &StorageKey,
    ) -> impl Future<
        Output = Result<Option<impl Stream<Item = Result<Bytes, Self::Error>> + 'static + use<Self>>, Self::Error>,
    >;

    /// Delete the content, a missing document is not an error
    fn delete(&self, key: &StorageKey) -> impl Future<Output = Result<(), Self::Error>>;
}

/// Reduce a client provided file name to a safe file name component.
pub fn sanitize_filename(filename: &str) -> String {
    const MAX_LEN: usize = 100;

    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let name: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_LEN)
        .collect();

    let name = name.trim_start_matches('.');
    if name.is_empty() {
        "document".to_string()
    } else {
        name.to_string()
    }
}
