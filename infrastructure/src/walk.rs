//! Recursive file enumeration

use glob::{MatchOptions, Pattern, glob_with};
use std::convert::Infallible;
use std::path::{Component, Path, PathBuf};
use tracing::trace;

/// Directory names never descended into by source scans
const BUILD_DIRS: &[&str] = &["target"];

/// All files under `root` with the given extension, sorted by path.
///
/// With `skip_build_dirs`, files below `target/` or any hidden directory
/// (relative to `root`) are left out.
pub(crate) fn files_with_extension(root: &Path, extension: &str, skip_build_dirs: bool) -> Vec<PathBuf> {
    let Ok(files) = files_with_extension_checked(root, extension, skip_build_dirs, || Ok::<(), Infallible>(()));
    files
}

/// Like [`files_with_extension`], calling `check` before each matched path.
///
/// The first error from `check` stops the enumeration and is returned.
/// Directories are walked between two matches without a check.
pub(crate) fn files_with_extension_checked<E>(
    root: &Path,
    extension: &str,
    skip_build_dirs: bool,
    mut check: impl FnMut() -> Result<(), E>,
) -> Result<Vec<PathBuf>, E> {
    let pattern = format!(
        "{}/**/*.{}",
        Pattern::escape(&root.to_string_lossy()),
        extension
    );
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let paths = match glob_with(&pattern, options) {
        Ok(paths) => paths,
        Err(e) => {
            trace!(pattern = %pattern, error = %e, "Invalid glob pattern");
            return Ok(Vec::new());
        }
    };

    let mut files = Vec::new();
    for entry in paths {
        check()?;
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                trace!(error = %e, "Skipping unreadable path");
                continue;
            }
        };
        if path.is_file() && !(skip_build_dirs && in_build_dir(root, &path)) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn in_build_dir(root: &Path, path: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };
    let Some(parent) = relative.parent() else {
        return false;
    };
    parent.components().any(|component| match component {
        Component::Normal(name) => {
            let name = name.to_string_lossy();
            name.starts_with('.') || BUILD_DIRS.contains(&name.as_ref())
        }
        _ => false,
    })
}
