use std::io::Cursor;

use image::imageops::FilterType;

/// Longest edge after compression.
pub const MAX_IMAGE_DIMENSION: u32 = 1600;
pub const JPEG_QUALITY: u8 = 80;

/// Per-file lifecycle shown next to each thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Queued,
    Compressing,
    Complete,
    Failed(String),
}

/// One photo the visitor attached in step 3. Ephemeral: never serialized
/// into the draft.
#[derive(Debug, Clone)]
pub struct WizardImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub state: UploadState,
}

impl WizardImage {
    pub fn queued(file_name: String, content_type: String, data: Vec<u8>) -> Self {
        WizardImage {
            file_name,
            content_type,
            data,
            state: UploadState::Queued,
        }
    }

    /// Done processing, one way or the other.
    pub fn is_settled(&self) -> bool {
        matches!(self.state, UploadState::Complete | UploadState::Failed(_))
    }
}

/// Downscale and re-encode one photo as JPEG. Runs on the blocking pool so
/// a slow file never stalls the others.
pub async fn compress_image(data: Vec<u8>) -> Result<Vec<u8>, String> {
    tokio::task::spawn_blocking(move || {
        let img = image::load_from_memory(&data).map_err(|e| format!("Unreadable image: {}", e))?;

        let img = if img.width() > MAX_IMAGE_DIMENSION || img.height() > MAX_IMAGE_DIMENSION {
            img.resize(MAX_IMAGE_DIMENSION, MAX_IMAGE_DIMENSION, FilterType::Triangle)
        } else {
            img
        };

        // JPEG output has no alpha channel
        let rgb = img.to_rgb8();
        let mut out = Vec::new();
        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut out), JPEG_QUALITY);
        encoder
            .encode_image(&rgb)
            .map_err(|e| format!("Compression failed: {}", e))?;
        Ok(out)
    })
    .await
    .map_err(|e| format!("Compression task failed: {}", e))?
}
