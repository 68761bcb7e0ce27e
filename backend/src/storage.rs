//! Receipt image storage on the local filesystem.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredReceipt {
    pub filename: String,
    pub path: PathBuf,
}

#[derive(Clone)]
pub struct ReceiptStore {
    dir: PathBuf,
}

impl ReceiptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `bytes` under a timestamped, sanitized version of `original_name`
    pub async fn save(&self, original_name: &str, bytes: &[u8], now: DateTime<Local>) -> Result<StoredReceipt> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create upload directory {}", self.dir.display()))?;

        let filename = format!("{}{}", now.format("%Y%m%d_%H%M%S_"), secure_filename(original_name));
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write receipt {}", path.display()))?;

        info!("Stored receipt {} ({} bytes)", path.display(), bytes.len());
        Ok(StoredReceipt { filename, path })
    }
}

/// Reduce a client-supplied filename to something safe to join onto a directory.
///
/// Path components are dropped, whitespace becomes `_`, and anything other
/// than ASCII letters, digits, `.`, `-` and `_` is removed.
pub fn secure_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                Some(c)
            } else if c.is_whitespace() {
                Some('_')
            } else {
                None
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches(['.', '_']);
    if cleaned.is_empty() {
        "receipt".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("costco.jpg"), "costco.jpg");
        assert_eq!(secure_filename("my receipt.png"), "my_receipt.png");
        assert_eq!(secure_filename("../../etc/passwd"), "passwd");
        assert_eq!(secure_filename("C:\\photos\\scan 1.jpeg"), "scan_1.jpeg");
        assert_eq!(secure_filename(".hidden"), "hidden");
        assert_eq!(secure_filename("résumé.pdf"), "rsum.pdf");
        assert_eq!(secure_filename("///"), "receipt");
    }

    #[tokio::test]
    async fn test_save_writes_timestamped_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = ReceiptStore::new(temp_dir.path().join("receipts"));
        let now = Local.with_ymd_and_hms(2025, 9, 14, 10, 15, 0).unwrap();

        let stored = store.save("costco.jpg", b"jpeg-bytes", now).await.unwrap();

        assert_eq!(stored.filename, "20250914_101500_costco.jpg");
        assert_eq!(stored.path, temp_dir.path().join("receipts").join("20250914_101500_costco.jpg"));
        assert_eq!(tokio::fs::read(&stored.path).await.unwrap(), b"jpeg-bytes");
    }
}
