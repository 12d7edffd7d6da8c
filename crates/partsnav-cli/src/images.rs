use std::path::Path;

use image::DynamicImage;
use partsnav_core::{ImageLoader, LoadError};

/// Decodes diagram files from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn load(&self, path: &Path) -> Result<DynamicImage, LoadError> {
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        image::open(path).map_err(|err| LoadError::Decode(err.to_string()))
    }
}
