//! Image insertion for designer state.

use std::path::Path;

use super::DesignerState;
use crate::error::DesignerResult;
use crate::image_pipeline::{prepare_image, read_file_as_data_url};
use crate::model::Shape;

impl DesignerState {
    /// Inserts an image given as a `data:` URL, converted to grayscale when
    /// the grayscale setting is on. Failures are logged and returned.
    pub fn add_image_data_url(&mut self, data_url: &str) -> DesignerResult<u64> {
        let result = prepare_image(data_url, self.settings.grayscale, &self.workspace);
        match self.report("load image", result) {
            Ok(image) => Ok(self.add_object(Shape::Image(image))),
            Err(e) => Err(e),
        }
    }

    pub fn add_image_file(&mut self, path: impl AsRef<Path>) -> DesignerResult<u64> {
        let result = read_file_as_data_url(path.as_ref());
        let data_url = self.report("read image file", result)?;
        self.add_image_data_url(&data_url)
    }

    pub fn set_grayscale(&mut self, enabled: bool) {
        self.settings.grayscale = enabled;
    }
}
