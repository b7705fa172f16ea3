//! Decoding source images and writing encoded composites to disk

use crate::composition::CompositeResult;
use crate::io::error::{CompositionError, Result, computation_error};
use image::DynamicImage;
use std::path::Path;
use std::thread;

/// Decode an image file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a supported image
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| CompositionError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode an in-memory image blob, guessing its format from the content
///
/// # Errors
///
/// Returns an error if the data is not a supported image
pub fn decode_image_bytes(index: usize, bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|source| CompositionError::ImageDecode { index, source })
}

/// Decode several image files concurrently, one thread per file
///
/// Images are returned in the order of `paths`, whatever order the decodes
/// finish in.
///
/// # Errors
///
/// Returns the first failure in input order if any file cannot be decoded,
/// or a computation error if a decoder thread panics
pub fn load_all<P: AsRef<Path> + Sync>(paths: &[P]) -> Result<Vec<DynamicImage>> {
    load_all_with(paths, |_, _| {})
}

/// Decode several image files concurrently, reporting each successful decode
///
/// `on_decoded` runs on the decoding thread as soon as that file is ready,
/// with the file's position in `paths`, so calls arrive in completion order.
///
/// # Errors
///
/// See [`load_all`]
pub fn load_all_with<P, F>(paths: &[P], on_decoded: F) -> Result<Vec<DynamicImage>>
where
    P: AsRef<Path> + Sync,
    F: Fn(usize, &Path) + Sync,
{
    let on_decoded = &on_decoded;
    thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .enumerate()
            .map(|(index, path)| {
                scope.spawn(move || -> Result<DynamicImage> {
                    let path = path.as_ref();
                    let image = load_image(path)?;
                    on_decoded(index, path);
                    Ok(image)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(decoded) => decoded,
                Err(_panic_payload) => Err(computation_error(
                    "image decode",
                    &"decoder thread panicked",
                )),
            })
            .collect()
    })
}

/// Write an encoded composite, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The file cannot be written
pub fn save_composite(result: &CompositeResult, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CompositionError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    std::fs::write(output_path, result.bytes()).map_err(|e| CompositionError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write composite",
        source: e,
    })?;

    log::debug!(
        "wrote {} bytes to {}",
        result.bytes().len(),
        output_path.display()
    );
    Ok(())
}
