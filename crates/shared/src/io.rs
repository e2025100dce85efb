use std::fs;
use std::path::{Path, PathBuf};

use crate::bundle::OutputBundle;
use crate::error::{PipelineError, Result};

/// `<root>/CGTECH-Daily-News-YYYY-MM-DD`
pub fn daily_output_dir(root: &Path, date: &str) -> PathBuf {
    root.join(format!("CGTECH-Daily-News-{}", date))
}

/// Write all six files of the bundle, overwriting any earlier run of the same day.
///
/// The directory is created (with parents) if needed; an existing directory is
/// not an error.
pub fn save_bundle(bundle: &OutputBundle, root: &Path) -> Result<PathBuf> {
    let dir = daily_output_dir(root, bundle.date());

    fs::create_dir_all(&dir).map_err(|source| PipelineError::Persist {
        path: dir.clone(),
        source,
    })?;

    for (platform, contents) in bundle.iter() {
        let filepath = dir.join(platform.file_name());
        fs::write(&filepath, contents).map_err(|source| PipelineError::Persist {
            path: filepath.clone(),
            source,
        })?;
        tracing::debug!(path = %filepath.display(), bytes = contents.len(), "Wrote pack file");
    }

    Ok(dir)
}
