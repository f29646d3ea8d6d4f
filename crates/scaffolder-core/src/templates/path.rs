//! Source-to-destination path mapping for template files

use std::path::{Path, PathBuf};

/// Directory name that is never copied out of a template
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// Leading character that marks a file to be renamed as hidden
const RESERVED_PREFIX: char = '_';
const HIDDEN_PREFIX: char = '.';

/// Where a template entry ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// Do not create this entry and do not descend into it
    Skip,
    /// Write the entry at this destination path
    Dest(PathBuf),
}

/// Map a path relative to a template root onto `dest_root`.
///
/// Files named `_name` land as `.name`; parent segments are kept verbatim.
/// Dependency cache directories are skipped.
pub fn rewrite(relative: &Path, dest_root: &Path, is_dir: bool) -> Rewrite {
    let file_name = relative.file_name().and_then(|n| n.to_str());

    if is_dir {
        if file_name == Some(DEPENDENCY_CACHE_DIR) {
            return Rewrite::Skip;
        }
        return Rewrite::Dest(dest_root.join(relative));
    }

    match file_name.and_then(|n| n.strip_prefix(RESERVED_PREFIX)) {
        Some(rest) => {
            let renamed = format!("{}{}", HIDDEN_PREFIX, rest);
            let parent = relative.parent().unwrap_or_else(|| Path::new(""));
            Rewrite::Dest(dest_root.join(parent).join(renamed))
        }
        None => Rewrite::Dest(dest_root.join(relative)),
    }
}
