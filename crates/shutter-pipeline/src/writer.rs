//! Bundle output writer.
//!
//! All files for one build pass are staged as temporaries in the output
//! directory and renamed into place only after every stage write succeeded.
//! A failure mid-pass removes the temporaries, so a previous good bundle is
//! never left half overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::bundle::Bundle;
use crate::error::{Error, Result};

const TMP_SUFFIX: &str = ".shutter-tmp";

/// Write every chunk, map, and asset of `bundle` into `output_dir`. Returns
/// the written file names, relative to the output directory.
pub fn write_bundle_to(bundle: &Bundle, output_dir: &Path) -> Result<Vec<String>> {
    fs::create_dir_all(output_dir)?;

    let mut files: Vec<(String, &[u8])> = Vec::with_capacity(bundle.file_count());
    for chunk in &bundle.chunks {
        files.push((chunk.filename.clone(), chunk.code.as_bytes()));
        if let Some(map) = &chunk.map {
            files.push((format!("{}.map", chunk.filename), map.as_bytes()));
        }
    }
    for asset in &bundle.assets {
        files.push((asset.filename.clone(), asset.source.as_bytes()));
    }

    // Stage everything first.
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(files.len());
    for (name, contents) in &files {
        let target = validated_target(output_dir, name)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = target.with_file_name(format!(
            "{}{TMP_SUFFIX}",
            target.file_name().unwrap_or_default().to_string_lossy()
        ));
        if let Err(e) = fs::write(&tmp, contents) {
            rollback(&staged);
            let _ = fs::remove_file(&tmp);
            return Err(Error::WriteFailure(format!(
                "failed to stage {}: {e}",
                target.display()
            )));
        }
        staged.push((tmp, target));
    }

    // Commit.
    for (tmp, target) in &staged {
        if let Err(e) = fs::rename(tmp, target) {
            rollback(&staged);
            return Err(Error::WriteFailure(format!(
                "failed to write {}: {e}",
                target.display()
            )));
        }
    }

    let names: Vec<String> = files.into_iter().map(|(name, _)| name).collect();
    tracing::debug!(dir = %output_dir.display(), files = names.len(), "bundle written");
    Ok(names)
}

/// Resolve an output file name under the output directory, rejecting names
/// that would escape it.
fn validated_target(output_dir: &Path, name: &str) -> Result<PathBuf> {
    let name_path = Path::new(name);
    if name_path.is_absolute() {
        return Err(Error::WriteFailure(format!(
            "output file name must be relative: {name}"
        )));
    }
    let cleaned = name_path.clean();
    if cleaned.components().next() == Some(std::path::Component::ParentDir) {
        return Err(Error::WriteFailure(format!(
            "output file name escapes the output directory: {name}"
        )));
    }
    Ok(output_dir.join(cleaned))
}

fn rollback(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        let _ = fs::remove_file(tmp);
    }
}
