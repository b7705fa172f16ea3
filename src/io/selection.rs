//! Ordered selection of images awaiting composition
//!
//! Holds at most [`MAX_IMAGES`] decoded images. Any change to the selection
//! discards the composite produced from the previous contents, and every
//! composition starts again from the full list.

use crate::composition::{CompositeOptions, CompositeResult, compose_with};
use crate::io::configuration::{MAX_IMAGES, MIN_IMAGES};
use crate::io::error::{CompositionError, Result};
use image::DynamicImage;

/// Ordered image list with a cached composite of its current contents
#[derive(Debug, Default)]
pub struct ImageSelection {
    names: Vec<String>,
    images: Vec<DynamicImage>,
    composite: Option<CompositeResult>,
}

impl ImageSelection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected images
    pub const fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether nothing is selected
    pub const fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Whether another image can be added
    pub const fn is_full(&self) -> bool {
        self.images.len() >= MAX_IMAGES
    }

    /// Whether enough images are selected to compose
    pub const fn is_ready(&self) -> bool {
        self.images.len() >= MIN_IMAGES
    }

    /// Display names in selection order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Selected images in order
    pub fn images(&self) -> &[DynamicImage] {
        &self.images
    }

    /// Append an image, returning its position
    ///
    /// # Errors
    ///
    /// Returns an error if the selection already holds [`MAX_IMAGES`] images
    pub fn push(&mut self, name: impl Into<String>, image: DynamicImage) -> Result<usize> {
        if self.is_full() {
            return Err(CompositionError::SelectionSize {
                count: self.len() + 1,
                min: MIN_IMAGES,
                max: MAX_IMAGES,
            });
        }

        self.names.push(name.into());
        self.images.push(image);
        self.invalidate();
        Ok(self.len() - 1)
    }

    /// Remove the image at `index`, returning its name and data
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of bounds
    pub fn remove(&mut self, index: usize) -> Result<(String, DynamicImage)> {
        self.check_index(index)?;

        let name = self.names.remove(index);
        let image = self.images.remove(index);
        self.invalidate();
        Ok((name, image))
    }

    /// Move the image at `from` so it ends up at position `to`
    ///
    /// # Errors
    ///
    /// Returns an error if either position is out of bounds
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;

        if from != to {
            let name = self.names.remove(from);
            let image = self.images.remove(from);
            self.names.insert(to, name);
            self.images.insert(to, image);
            self.invalidate();
        }
        Ok(())
    }

    /// Drop all images and any composite
    pub fn clear(&mut self) {
        self.names.clear();
        self.images.clear();
        self.invalidate();
    }

    /// Compose the current selection, replacing any earlier composite
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than [`MIN_IMAGES`] images are selected or
    /// composition fails
    pub fn compose(&mut self, options: &CompositeOptions) -> Result<&CompositeResult> {
        if !self.is_ready() {
            return Err(CompositionError::SelectionSize {
                count: self.len(),
                min: MIN_IMAGES,
                max: MAX_IMAGES,
            });
        }

        self.composite = None;
        let result = compose_with(&self.images, options)?;
        Ok(&*self.composite.insert(result))
    }

    /// Composite of the current contents, if one has been produced since the last change
    pub const fn composite(&self) -> Option<&CompositeResult> {
        self.composite.as_ref()
    }

    /// Take the composite out of the selection
    pub fn take_composite(&mut self) -> Option<CompositeResult> {
        self.composite.take()
    }

    fn invalidate(&mut self) {
        if self.composite.take().is_some() {
            log::debug!("selection changed; discarding previous composite");
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.images.len() {
            Ok(())
        } else {
            Err(CompositionError::SelectionIndex {
                index,
                len: self.images.len(),
            })
        }
    }
}
