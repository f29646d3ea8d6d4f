//! Recursive template rendering into a project directory

use crate::error::{Result, ScaffoldError};
use crate::templates::manifest::{self, MANIFEST_FILE};
use crate::templates::path::{rewrite, Rewrite};
use std::io;
use std::path::Path;
use tokio::fs;
use walkdir::WalkDir;

/// Files a single render pass wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Files copied over whatever was at their destination
    pub copied: usize,
    /// Manifests merged into one already in the destination
    pub merged: usize,
}

/// Mirror `source_root` into `dest_root`.
///
/// Directories are created before their contents, `node_modules` is pruned,
/// `_name` files land as `.name`, and a `package.json` that already exists in
/// the destination is merged rather than replaced. Every other file overwrites
/// whatever is at its destination.
pub async fn render_template(source_root: &Path, dest_root: &Path) -> Result<RenderSummary> {
    fs::create_dir_all(dest_root)
        .await
        .map_err(|e| ScaffoldError::io(dest_root, e))?;

    let mut summary = RenderSummary::default();
    let mut walker = WalkDir::new(source_root).min_depth(1).into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| source_root.to_path_buf());
            ScaffoldError::io(path, io::Error::from(e))
        })?;

        let relative = entry
            .path()
            .strip_prefix(source_root)
            .unwrap_or_else(|_| entry.path());
        let is_dir = entry.file_type().is_dir();

        let dest = match rewrite(relative, dest_root, is_dir) {
            Rewrite::Skip => {
                if is_dir {
                    walker.skip_current_dir();
                }
                continue;
            }
            Rewrite::Dest(dest) => dest,
        };

        if is_dir {
            fs::create_dir_all(&dest)
                .await
                .map_err(|e| ScaffoldError::io(&dest, e))?;
            continue;
        }

        let is_manifest = entry.file_name() == MANIFEST_FILE;
        if is_manifest && path_exists(&dest).await? {
            manifest::merge_manifest_files(&dest, entry.path()).await?;
            summary.merged += 1;
        } else {
            fs::copy(entry.path(), &dest)
                .await
                .map_err(|e| ScaffoldError::io(&dest, e))?;
            summary.copied += 1;
        }
    }

    Ok(summary)
}

/// Whether `path` exists; errors other than absence are surfaced
pub(super) async fn path_exists(path: &Path) -> Result<bool> {
    fs::try_exists(path)
        .await
        .map_err(|e| ScaffoldError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        stdfs::create_dir_all(path.parent().unwrap()).unwrap();
        stdfs::write(path, content).unwrap();
    }

    fn fixture() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "_gitignore", "node_modules\ndist\n");
        write(dir.path(), "index.html", "<div id=\"app\"></div>\n");
        write(dir.path(), "src/App.vue", "<template></template>\n");
        write(
            dir.path(),
            "node_modules/vue/index.js",
            "module.exports = {}\n",
        );
        write(
            dir.path(),
            "package.json",
            r#"{ "scripts": { "dev": "vite" }, "dependencies": { "vue": "^3.2.37" } }"#,
        );
        dir
    }

    #[tokio::test]
    async fn test_render_copies_and_renames() {
        let source = fixture();
        let dest = tempfile::tempdir().unwrap();

        let summary = render_template(source.path(), dest.path()).await.unwrap();

        assert!(dest.path().join(".gitignore").exists());
        assert!(!dest.path().join("_gitignore").exists());
        assert!(dest.path().join("src/App.vue").exists());
        assert!(dest.path().join("package.json").exists());
        assert_eq!(summary.merged, 0);
        assert_eq!(summary.copied, 4);
    }

    #[tokio::test]
    async fn test_render_skips_dependency_cache() {
        let source = fixture();
        let dest = tempfile::tempdir().unwrap();

        render_template(source.path(), dest.path()).await.unwrap();

        assert!(!dest.path().join("node_modules").exists());
    }

    #[tokio::test]
    async fn test_render_twice_overwrites_plain_files() {
        let source = fixture();
        let dest = tempfile::tempdir().unwrap();
        write(
            dest.path(),
            "index.html",
            "stale content that is longer than the source\n",
        );

        render_template(source.path(), dest.path()).await.unwrap();
        render_template(source.path(), dest.path()).await.unwrap();

        let html = stdfs::read_to_string(dest.path().join("index.html")).unwrap();
        assert_eq!(html, "<div id=\"app\"></div>\n");
    }

    #[tokio::test]
    async fn test_existing_manifest_is_merged() {
        let source = fixture();
        let dest = tempfile::tempdir().unwrap();
        write(
            dest.path(),
            "package.json",
            r#"{ "name": "my-site", "version": "0.0.0", "dependencies": { "zod": "^3.0.0" } }"#,
        );

        let summary = render_template(source.path(), dest.path()).await.unwrap();
        assert_eq!(summary.merged, 1);

        let raw = stdfs::read_to_string(dest.path().join("package.json")).unwrap();
        assert!(raw.ends_with("}\n"));
        let pkg: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(pkg["name"], "my-site");
        assert_eq!(pkg["scripts"], json!({ "dev": "vite" }));
        let deps: Vec<&String> = pkg["dependencies"].as_object().unwrap().keys().collect();
        assert_eq!(deps, vec!["vue", "zod"]);
    }

    #[tokio::test]
    async fn test_missing_source_is_an_error() {
        let dest = tempfile::tempdir().unwrap();
        let missing = dest.path().join("does-not-exist");

        let err = render_template(&missing, &dest.path().join("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Io { .. }));
    }

    #[tokio::test]
    async fn test_path_exists_reports_lookup_failures() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("package.json");
        stdfs::write(&file, "{}").unwrap();

        assert!(path_exists(&file).await.unwrap());
        assert!(!path_exists(&dir.path().join("missing")).await.unwrap());

        // A path through a regular file is neither present nor absent
        let err = path_exists(&file.join("child")).await.unwrap_err();
        match err {
            ScaffoldError::Io { path, .. } => assert_eq!(path, file.join("child")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
