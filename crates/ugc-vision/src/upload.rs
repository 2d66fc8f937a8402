//! Image upload validation and data-URI encoding

use base64::Engine;
use std::fs;
use std::path::Path;
use tracing::debug;
use ugc_types::{Error, Result, ValidationError};

/// Largest accepted upload (16 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Supported image extensions
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

/// Check if a path has a supported image extension
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn check_size(name: &str, size: u64) -> Result<()> {
    if size > MAX_UPLOAD_BYTES {
        debug!("Rejecting {}: {} bytes", name, size);
        return Err(ValidationError::FileTooLarge {
            size,
            limit_mb: MAX_UPLOAD_BYTES / (1024 * 1024),
        }
        .into());
    }
    Ok(())
}

/// A validated image, ready to send as `{"image": data_uri}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: &'static str,
    pub size: u64,
    pub data_uri: String,
}

impl ImageUpload {
    /// Validate and encode an image file.
    ///
    /// Size is checked from metadata before the content is read.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        check_size(&name, fs::metadata(path)?.len())?;
        if !is_supported_image(path) {
            return Err(ValidationError::NotAnImage(name).into());
        }

        let bytes = fs::read(path)?;
        Self::from_bytes(&name, &bytes)
    }

    /// Validate and encode in-memory image bytes (drag and drop, clipboard)
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Result<Self> {
        let size = bytes.len() as u64;
        check_size(file_name, size)?;

        let format = image::guess_format(bytes)
            .map_err(|_| ValidationError::NotAnImage(file_name.to_string()))?;
        let mime = format.to_mime_type();
        if !mime.starts_with("image/") {
            return Err(ValidationError::NotAnImage(file_name.to_string()).into());
        }

        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(Self {
            file_name: file_name.to_string(),
            mime,
            size,
            data_uri: format!("data:{};base64,{}", mime, encoded),
        })
    }

    /// Size in a human-readable unit
    pub fn size_label(&self) -> String {
        if self.size >= 1024 * 1024 {
            format!("{:.1} MB", self.size as f64 / (1024.0 * 1024.0))
        } else {
            format!("{:.1} KB", self.size as f64 / 1024.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[test]
    fn test_extension_check() {
        assert!(is_supported_image(Path::new("shoe.JPG")));
        assert!(is_supported_image(Path::new("a/b/c.webp")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("no_extension")));
    }

    #[test]
    fn test_from_bytes_sniffs_mime() {
        let upload = ImageUpload::from_bytes("shoe.png", PNG_MAGIC).unwrap();
        assert_eq!(upload.mime, "image/png");
        assert!(upload.data_uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_from_bytes_rejects_text() {
        let err = ImageUpload::from_bytes("notes.png", b"hello world").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NotAnImage(_))
        ));
    }

    #[test]
    fn test_size_limit_boundary() {
        assert!(check_size("ok", MAX_UPLOAD_BYTES).is_ok());
        assert!(matches!(
            check_size("big", MAX_UPLOAD_BYTES + 1),
            Err(Error::Validation(ValidationError::FileTooLarge { limit_mb: 16, .. }))
        ));
    }
}
