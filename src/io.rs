//! File-backed pixel sources and presenters.
//!
//! - `ImageFile`: decode an image file into a `PixelBuffer`.
//! - `ImageFile::discover`: resolve a path to one file or a directory of images.
//! - `PngDirectory`: write transformed buffers as PNGs into a directory.
//! - `to_rgba_image` / `from_rgba_image`: conversions to the `image` crate.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, warn};

use crate::apply::ImageSelection;
use crate::buffer::PixelBuffer;
use crate::error::{Result, TranslucifyError};
use crate::pipeline::{PixelSource, Presenter};

/// File extensions picked up when a directory is given as input.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Copy an `image::RgbaImage` into a pixel buffer.
pub fn from_rgba_image(image: RgbaImage) -> Result<PixelBuffer> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    PixelBuffer::from_raw(width, height, image.into_raw())
}

/// Convert a pixel buffer into an `image::RgbaImage`.
pub fn to_rgba_image(buffer: PixelBuffer) -> Result<RgbaImage> {
    let (width, height) = (buffer.width(), buffer.height());
    let raw = buffer.into_raw();
    let len = raw.len();
    RgbaImage::from_raw(width as u32, height as u32, raw)
        .ok_or(TranslucifyError::InvalidDimensions { width, height, len })
}

/// An image file on disk, decoded on `acquire`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    path: PathBuf,
    id: String,
}

impl ImageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, id }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve `path` into the images it names.
    ///
    /// A file is a single image. A directory yields every file with an image
    /// extension directly inside it, sorted by name. A path that cannot be
    /// read is `SourceUnavailable`.
    pub fn discover(path: &Path) -> Result<ImageSelection<ImageFile>> {
        let metadata = fs::metadata(path).map_err(|e| TranslucifyError::SourceUnavailable {
            id: path.display().to_string(),
            reason: e.to_string(),
        })?;
        if metadata.is_file() {
            return Ok(ImageSelection::Single(ImageFile::new(path)));
        }
        if !metadata.is_dir() {
            return Err(TranslucifyError::UnsupportedInputKind(format!(
                "{} is neither an image file nor a directory",
                path.display()
            )));
        }

        let entries = fs::read_dir(path).map_err(|e| TranslucifyError::SourceUnavailable {
            id: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let files = image_paths(path, entries.map(|entry| entry.map(|e| e.path())));
        debug!("found {} images in {}", files.len(), path.display());

        Ok(files.into_iter().map(ImageFile::new).collect())
    }
}

/// Image files among `entries`, sorted. Unreadable entries are logged and skipped.
fn image_paths(dir: &Path, entries: impl Iterator<Item = io::Result<PathBuf>>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("skipping unreadable entry in {}: {err}", dir.display());
                None
            }
        })
        .filter(|p| p.is_file() && has_image_extension(p))
        .collect();
    files.sort();
    files
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

impl PixelSource for ImageFile {
    fn id(&self) -> &str {
        &self.id
    }

    fn acquire(&self) -> Result<PixelBuffer> {
        let image = image::open(&self.path).map_err(|e| TranslucifyError::SourceUnavailable {
            id: self.id.clone(),
            reason: e.to_string(),
        })?;
        from_rgba_image(image.into_rgba8())
    }
}

/// Writes each presented buffer to `<dir>/<stem>.png`.
///
/// PNG keeps the alpha channel, so the output replaces the original image
/// with its transparent version. Two ids with the same stem (`a.png` and
/// `a.jpg`) would share an output path; the second one is refused with
/// `PresentationFailed` instead of overwriting the first.
#[derive(Clone, Debug)]
pub struct PngDirectory {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngDirectory {
    /// Use `dir` as output, creating it if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| TranslucifyError::PresentationFailed {
            id: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn output_path(&self, id: &str) -> PathBuf {
        let stem = Path::new(id)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| id.to_string());
        self.dir.join(format!("{stem}.png"))
    }
}

impl Presenter for PngDirectory {
    fn present(&mut self, id: &str, buffer: PixelBuffer) -> Result<()> {
        let path = self.output_path(id);
        if self.written.contains(&path) {
            return Err(TranslucifyError::PresentationFailed {
                id: id.to_string(),
                reason: format!("{} was already written for another image", path.display()),
            });
        }
        let image = to_rgba_image(buffer)?;
        image
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|e| TranslucifyError::PresentationFailed {
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        debug!("wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}
