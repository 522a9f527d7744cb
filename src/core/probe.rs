use std::path::Path;

use awc::{http::header::CONTENT_LENGTH, Client};
use tracing::debug;

use crate::error::{FolioError, Result};

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size with base 1024 and at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut exponent = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && exponent < UNITS.len() - 1 {
        scaled /= 1024;
        exponent += 1;
    }
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[exponent])
}

/// Byte size of an asset. Absolute URLs are asked with a `HEAD` request;
/// anything else is resolved under `public_dir` and measured on disk.
pub async fn probe_size(asset: &str, public_dir: &Path) -> Result<u64> {
    if asset.starts_with("http://") || asset.starts_with("https://") {
        probe_remote(asset).await
    } else {
        let relative = asset.trim_start_matches("./").trim_start_matches('/');
        let metadata = std::fs::metadata(public_dir.join(relative))?;
        Ok(metadata.len())
    }
}

async fn probe_remote(url: &str) -> Result<u64> {
    let response = Client::default()
        .head(url)
        .send()
        .await
        .map_err(|error| FolioError::Remote(error.to_string()))?;
    if !response.status().is_success() {
        return Err(FolioError::Status(response.status().as_u16()));
    }
    let length = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .ok_or(FolioError::MissingLength)?;
    debug!(url, length, "Probed remote asset size");
    Ok(length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sizes() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5 GB");
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[actix_web::test]
    async fn measures_local_assets() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("models")).unwrap();
        std::fs::write(dir.path().join("models/cube.3ds"), vec![0u8; 1536]).unwrap();

        assert_eq!(probe_size("./models/cube.3ds", dir.path()).await.unwrap(), 1536);
        assert_eq!(probe_size("models/cube.3ds", dir.path()).await.unwrap(), 1536);
        assert!(probe_size("models/missing.3ds", dir.path()).await.is_err());
    }
}
