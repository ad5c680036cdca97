//! File transfers shared by every OpenDAL-backed client.

use std::io;
use std::path::Path;

use futures::TryStreamExt;
use opendal::Operator;
use tempfile::NamedTempFile;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use crate::TRACING_TARGET;
use crate::error::{StorageError, StorageResult};

/// Size of the chunks moved between local files and the backend.
///
/// Also the multipart part size for uploads, well above the OSS minimum.
const TRANSFER_CHUNK_SIZE: usize = 8 * 1024 * 1024;

/// Streams the file at `source` into `key`. Returns the number of bytes sent.
///
/// The writer is aborted if reading the file or sending a chunk fails, so
/// no partial object is committed.
pub(crate) async fn upload_file(
    operator: &Operator,
    source: &Path,
    key: &str,
) -> StorageResult<u64> {
    let file = File::open(source)
        .await
        .map_err(|e| StorageError::local_file(source, e))?;
    let mut chunks = ReaderStream::with_capacity(file, TRANSFER_CHUNK_SIZE);
    let mut writer = operator
        .writer_with(key)
        .chunk(TRANSFER_CHUNK_SIZE)
        .await?;
    let mut written = 0u64;

    let result = async {
        while let Some(chunk) = chunks
            .try_next()
            .await
            .map_err(|e| StorageError::local_file(source, e))?
        {
            written += chunk.len() as u64;
            writer.write(chunk).await?;
        }

        writer.close().await?;
        Ok::<_, StorageError>(())
    }
    .await;

    if let Err(err) = result {
        if let Err(abort_err) = writer.abort().await {
            tracing::debug!(
                target: TRACING_TARGET,
                key = %key,
                error = %abort_err,
                "Failed to abort upload"
            );
        }
        return Err(err);
    }

    Ok(written)
}

/// Streams `key` into `destination`. Returns the number of bytes written.
///
/// Chunks land in a temporary file next to `destination`, which replaces
/// the destination only once the whole object has arrived. A missing
/// object or a failed transfer leaves any existing local file intact.
pub(crate) async fn download_file(
    operator: &Operator,
    key: &str,
    destination: &Path,
) -> StorageResult<u64> {
    let reader = operator
        .reader_with(key)
        .chunk(TRANSFER_CHUNK_SIZE)
        .await?;
    let mut chunks = reader.into_bytes_stream(..).await?;

    let directory = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let (file, temp_path) = NamedTempFile::new_in(directory)
        .map_err(|e| StorageError::local_file(destination, e))?
        .into_parts();
    let mut file = File::from_std(file);
    let mut size = 0u64;

    while let Some(chunk) = chunks.try_next().await.map_err(read_error)? {
        size += chunk.len() as u64;
        file.write_all(&chunk)
            .await
            .map_err(|e| StorageError::local_file(&temp_path, e))?;
    }

    file.sync_all()
        .await
        .map_err(|e| StorageError::local_file(&temp_path, e))?;
    drop(file);

    temp_path
        .persist(destination)
        .map_err(|e| StorageError::local_file(destination, e.error))?;

    Ok(size)
}

/// Recovers the backend error carried by a failed object stream.
fn read_error(err: io::Error) -> StorageError {
    let failed = || opendal::Error::new(opendal::ErrorKind::Unexpected, "reading object failed");

    if !err.get_ref().is_some_and(|inner| inner.is::<opendal::Error>()) {
        return failed().set_source(err).into();
    }

    match err.into_inner().map(|inner| inner.downcast::<opendal::Error>()) {
        Some(Ok(inner)) => (*inner).into(),
        _ => failed().into(),
    }
}
