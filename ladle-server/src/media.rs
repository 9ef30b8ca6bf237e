//! Local media storage for recipe images
//!
//! Uploads are decoded to validate the payload is a real raster image,
//! re-encoded as JPEG and written under `MEDIA_ROOT/recipes/`. The stored
//! reference is the path relative to the media root; the router serves the
//! tree read-only under `/media`.

use std::io::Cursor;
use std::path::PathBuf;

use image::codecs::jpeg::JpegEncoder;
use shared::error::{AppError, ErrorCode};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// JPEG quality for stored images
const JPEG_QUALITY: u8 = 85;

/// Maximum upload size (20MB)
pub const MAX_FILE_SIZE: usize = 20 * 1024 * 1024;

/// Local-disk media store
#[derive(Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Create the store, ensuring the recipe image directory exists
    pub fn new(root: &str) -> Result<Self, BoxError> {
        let root = PathBuf::from(root);
        std::fs::create_dir_all(root.join("recipes"))?;
        Ok(Self { root })
    }

    /// Filesystem root of the store (mounted at `/media` by the router)
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Validate, re-encode and persist an uploaded image.
    ///
    /// Returns the stored reference (path relative to the media root).
    /// Rejects payloads that do not decode as a raster image; nothing is
    /// written in that case.
    pub fn save_recipe_image(&self, data: &[u8]) -> Result<String, AppError> {
        if data.is_empty() {
            return Err(AppError::new(ErrorCode::EmptyFile));
        }
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::with_message(
                ErrorCode::FileTooLarge,
                format!("File too large: {} bytes (max {})", data.len(), MAX_FILE_SIZE),
            ));
        }

        // Decode to prove the payload is a real image
        let img = image::load_from_memory(data).map_err(|e| {
            AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid image: {e}"))
        })?;

        // Re-encode as JPEG
        let mut buffer = Vec::new();
        {
            let mut cursor = Cursor::new(&mut buffer);
            let rgb_img = img.to_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
            rgb_img.write_with_encoder(encoder).map_err(|e| {
                AppError::with_message(
                    ErrorCode::ImageProcessingFailed,
                    format!("Image re-encode failed: {e}"),
                )
            })?;
        }

        let rel_path = format!("recipes/{}.jpg", uuid::Uuid::new_v4());
        std::fs::write(self.root.join(&rel_path), &buffer).map_err(|e| {
            tracing::error!(path = %rel_path, error = %e, "Image write failed");
            AppError::new(ErrorCode::FileStorageFailed)
        })?;

        Ok(rel_path)
    }

    /// Remove a previously stored image. Missing files are not an error;
    /// the DB reference was already replaced or cleared.
    pub fn remove(&self, rel_path: &str) {
        let path = self.root.join(rel_path);
        if let Err(e) = std::fs::remove_file(&path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %rel_path, error = %e, "Failed to remove stale image file");
        }
    }

    /// Public URL for a stored reference
    pub fn url_for(rel_path: &str) -> String {
        format!("/media/{rel_path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, MediaStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path().to_str().unwrap()).unwrap();
        (dir, store)
    }

    fn sample_png() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 10, 10]));
        let mut buf = Vec::new();
        img.write_to(
            &mut Cursor::new(&mut buf),
            image::ImageFormat::Png,
        )
        .unwrap();
        buf
    }

    #[test]
    fn test_save_valid_image() {
        let (_dir, store) = store();
        let rel = store.save_recipe_image(&sample_png()).unwrap();
        assert!(rel.starts_with("recipes/"));
        assert!(rel.ends_with(".jpg"));
        assert!(store.root().join(&rel).exists());
    }

    #[test]
    fn test_reject_non_image_payload() {
        let (_dir, store) = store();
        let err = store.save_recipe_image(b"notanimage").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidImageFile);
    }

    #[test]
    fn test_reject_empty_payload() {
        let (_dir, store) = store();
        let err = store.save_recipe_image(b"").unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyFile);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, store) = store();
        let rel = store.save_recipe_image(&sample_png()).unwrap();
        store.remove(&rel);
        assert!(!store.root().join(&rel).exists());
        store.remove(&rel);
    }

    #[test]
    fn test_url_for() {
        assert_eq!(
            MediaStore::url_for("recipes/abc.jpg"),
            "/media/recipes/abc.jpg"
        );
    }
}
