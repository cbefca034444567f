use std::path::{Path, PathBuf};

use reqwest::Client;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::validate::{has_allowed_extension, is_valid_url};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL provided")]
    InvalidUrl,
    #[error("Invalid file extension")]
    InvalidExtension,
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },
    #[error("Writing {} failed: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A downloaded image that is deleted when it goes out of scope. The happy
/// path calls [`TempImage::remove`] so delete failures are reported; `Drop`
/// covers early-exit paths best-effort.
#[derive(Debug)]
pub struct TempImage {
    path: PathBuf,
    removed: bool,
}

impl TempImage {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn remove(mut self) -> std::io::Result<()> {
        self.removed = true;
        std::fs::remove_file(&self.path)
    }
}

impl Drop for TempImage {
    fn drop(&mut self) {
        if !self.removed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Streams the response body to `dest` chunk by chunk, overwriting any
/// existing file. The full payload is never held in memory.
pub async fn download_file(client: &Client, url: &str, dest: &Path) -> Result<(), FetchError> {
    let mut response = client
        .get(url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    let mut file = File::create(dest).await.map_err(|source| FetchError::Write {
        path: dest.to_path_buf(),
        source,
    })?;

    let mut downloaded = 0u64;
    while let Some(chunk) = response.chunk().await.map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })? {
        file.write_all(&chunk)
            .await
            .map_err(|source| FetchError::Write {
                path: dest.to_path_buf(),
                source,
            })?;
        downloaded += chunk.len() as u64;
    }

    file.flush().await.map_err(|source| FetchError::Write {
        path: dest.to_path_buf(),
        source,
    })?;

    tracing::debug!(url, bytes = downloaded, "download complete");
    Ok(())
}

/// Validates the URL, then the save name, then downloads. No network
/// request is ever issued for input that fails either check.
pub async fn download_and_validate_image(
    client: &Client,
    url: &str,
    filename: &str,
) -> Result<TempImage, FetchError> {
    if !is_valid_url(url) {
        return Err(FetchError::InvalidUrl);
    }
    if !has_allowed_extension(filename) {
        return Err(FetchError::InvalidExtension);
    }

    let path = PathBuf::from(filename);
    download_file(client, url, &path).await?;

    Ok(TempImage {
        path,
        removed: false,
    })
}
