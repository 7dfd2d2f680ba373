//! Static asset copying.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

/// Errors that can occur when copying static assets.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("Failed to walk static directory: {0}")]
    Walk(String),

    #[error("Failed to copy {from} to {to}: {message}")]
    Copy {
        from: String,
        to: String,
        message: String,
    },
}

/// Mirror every file under `src` into `dst`, preserving relative paths.
///
/// Directories are created as their files are copied; empty directories are
/// not reproduced. The first failure stops the copy. Returns the number of
/// files copied.
pub fn copy_static(src: &Path, dst: &Path) -> Result<usize, CopyError> {
    fs::create_dir_all(dst).map_err(|e| copy_error(src, dst, e))?;

    let mut copied = 0;

    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(|e| CopyError::Walk(e.to_string()))?;

        if entry.file_type().is_dir() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| CopyError::Walk(e.to_string()))?;
        let out_path = dst.join(relative);

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| copy_error(entry.path(), &out_path, e))?;
        }

        fs::copy(entry.path(), &out_path).map_err(|e| copy_error(entry.path(), &out_path, e))?;
        tracing::debug!("Copied {}", relative.display());

        copied += 1;
    }

    Ok(copied)
}

fn copy_error(from: &Path, to: &Path, e: std::io::Error) -> CopyError {
    CopyError::Copy {
        from: from.display().to_string(),
        to: to.display().to_string(),
        message: e.to_string(),
    }
}
