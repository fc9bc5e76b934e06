pub mod error;
pub mod extraction;
pub mod io;
pub mod models;
pub mod mosaic;
pub mod packager;
pub mod profile;

pub use error::{Error, StitchError};
pub use extraction::extract;
pub use io::load_image;
pub use models::{BoundingBox, Contour, ExtractionResult, MosaicResult};
pub use mosaic::{MosaicCompositor, Stitcher, TranslationStitcher};
pub use packager::Report;
pub use profile::{ExtractionProfile, Segmentation};
