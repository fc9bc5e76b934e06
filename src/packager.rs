use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat};
use serde::Serialize;

use crate::error::Error;
use crate::models::{BoundingBox, ExtractionResult, MosaicResult};

/// Transport-ready wrapper around a pipeline or compositor result.
///
/// The image travels as base64-encoded PNG bytes; persistence, if wanted,
/// is the caller's job with a key of its own choosing.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub success: bool,
    pub count: usize,
    pub boxes: Vec<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    pub fn from_extraction(result: &ExtractionResult) -> Result<Self, Error> {
        let image = DynamicImage::ImageRgb8(result.annotated.clone());
        Ok(Self {
            success: true,
            count: result.count,
            boxes: result.boxes.clone(),
            image: Some(encode_base64_png(&image)?),
            error: None,
        })
    }

    pub fn from_mosaic(result: &MosaicResult) -> Result<Self, Error> {
        match (&result.panorama, result.succeeded) {
            (Some(panorama), true) => Ok(Self {
                success: true,
                count: 0,
                boxes: Vec::new(),
                image: Some(encode_base64_png(panorama)?),
                error: None,
            }),
            _ => {
                let reason = result
                    .failure_reason
                    .clone()
                    .unwrap_or_else(|| crate::mosaic::STITCH_FAILED.to_string());
                Ok(Self::failure(reason))
            }
        }
    }

    /// Structured failure report with no image payload.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            count: 0,
            boxes: Vec::new(),
            image: None,
            error: Some(message.into()),
        }
    }
}

fn encode_base64_png(image: &DynamicImage) -> Result<String, Error> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| Error::Internal(format!("png encoding failed: {e}")))?;
    Ok(STANDARD.encode(bytes))
}
