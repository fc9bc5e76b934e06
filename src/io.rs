use std::path::Path;

use image::{DynamicImage, ImageReader};

use crate::error::Error;

/// Load and decode an image file, mapping open and decode failures to
/// [`Error::Input`].
pub fn load_image(path: &Path) -> Result<DynamicImage, Error> {
    ImageReader::open(path)
        .map_err(|e| Error::Input(format!("failed to open {}: {}", path.display(), e)))?
        .decode()
        .map_err(|e| Error::Input(format!("failed to decode image {}: {}", path.display(), e)))
}
