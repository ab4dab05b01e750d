//! Loading and saving by file extension.

use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use enough::Unstoppable;

use crate::decode::DecodeRequest;
use crate::encode::EncodeRequest;
use crate::error::RasterError;
use crate::limits::Limits;
use crate::pnm::Encoding;
use crate::raster::{RasterImage, RasterKind};

fn kind_for(path: &Path) -> Result<RasterKind, RasterError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| {
            RasterError::UnsupportedFormat(format!("{} has no usable extension", path.display()))
        })?;
    RasterKind::from_extension(ext)
}

/// Read a `.pbm`, `.pgm` or `.ppm` file.
///
/// The extension picks the codec and must agree with the file's magic
/// number.
pub fn load(path: impl AsRef<Path>) -> Result<RasterImage, RasterError> {
    load_inner(path.as_ref(), None)
}

/// [`load`] with dimension and memory limits.
pub fn load_with(path: impl AsRef<Path>, limits: &Limits) -> Result<RasterImage, RasterError> {
    load_inner(path.as_ref(), Some(limits))
}

fn load_inner(path: &Path, limits: Option<&Limits>) -> Result<RasterImage, RasterError> {
    let kind = kind_for(path)?;
    let data = fs::read(path).map_err(|e| RasterError::io(path, e))?;

    let mut request = DecodeRequest::new(&data).expect_kind(kind);
    if let Some(limits) = limits {
        request = request.with_limits(limits);
    }
    let image = request.decode(Unstoppable)?;
    log::debug!(
        "loaded {} ({} {}x{})",
        path.display(),
        image.kind(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Write `image` to `path`, converting it to the kind the extension names.
///
/// The file is written to a temporary sibling and renamed into place, so a
/// failed save leaves any existing file at `path` as it was.
pub fn save(
    image: &RasterImage,
    path: impl AsRef<Path>,
    is_binary: bool,
) -> Result<(), RasterError> {
    let path = path.as_ref();
    let kind = kind_for(path)?;
    let bytes = EncodeRequest::new(Encoding::from_binary_flag(is_binary))
        .as_kind(kind)
        .encode(image, Unstoppable)?;

    let temp = temp_path(path);
    if let Err(e) = write_synced(&temp, &bytes).and_then(|()| fs::rename(&temp, path)) {
        let _ = fs::remove_file(&temp);
        return Err(RasterError::io(path, e));
    }

    log::debug!(
        "saved {} ({} {}x{}, {} bytes)",
        path.display(),
        kind,
        image.width(),
        image.height(),
        bytes.len()
    );
    Ok(())
}

/// Distinguishes saves racing within one process.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{name}.{}.{seq}.tmp", std::process::id()))
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
