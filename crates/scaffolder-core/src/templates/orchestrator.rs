//! Turns a resolved feature set into a project directory

use super::copier::{path_exists, render_template};
use super::manifest::{write_manifest, MANIFEST_FILE};
use super::TemplateDefinition;
use crate::error::{Result, ScaffoldError};
use crate::features::FeatureFlags;
use serde_json::json;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Where and how to scaffold
#[derive(Debug, Clone)]
pub struct ScaffoldContext {
    /// Project directory to write into
    pub root: PathBuf,
    /// Name written to the project manifest
    pub package_name: String,
    /// Clear the project directory before rendering
    pub overwrite: bool,
    /// Directory holding all templates (`<templates_dir>/<template id>/...`)
    pub templates_dir: PathBuf,
}

/// What a scaffold run wrote
#[derive(Debug, Clone, Default)]
pub struct ScaffoldReport {
    pub fragments: Vec<String>,
    pub generated: Vec<PathBuf>,
    pub files: usize,
}

/// Scaffold a project from `definition`.
///
/// The plan is computed before anything touches the filesystem. Then the
/// root is cleared (or created), seeded with a minimal manifest, every
/// fragment is rendered base-first, and generated files are written last.
/// A failure part way leaves whatever was already written in place.
pub async fn scaffold(
    definition: &dyn TemplateDefinition,
    flags: &FeatureFlags,
    ctx: &ScaffoldContext,
) -> Result<ScaffoldReport> {
    let plan = definition.plan(flags)?;
    let template_dir = ctx.templates_dir.join(definition.id());

    prepare_root(&ctx.root, ctx.overwrite).await?;

    let seed = json!({ "name": ctx.package_name, "version": "0.0.0" });
    write_manifest(&ctx.root.join(MANIFEST_FILE), &seed).await?;

    let mut report = ScaffoldReport {
        files: 1,
        ..Default::default()
    };

    for fragment in plan.fragments() {
        let summary = render_template(&fragment.source_dir(&template_dir), &ctx.root).await?;
        report.files += summary.copied;
        report.fragments.push(fragment.name().to_string());
    }

    for file in plan.generated() {
        let dest = ctx.root.join(&file.path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::io(parent, e))?;
        }
        fs::write(&dest, &file.contents)
            .await
            .map_err(|e| ScaffoldError::io(&dest, e))?;
        report.files += 1;
        report.generated.push(file.path.clone());
    }

    Ok(report)
}

async fn prepare_root(root: &Path, overwrite: bool) -> Result<()> {
    if overwrite && path_exists(root).await? {
        empty_dir(root).await
    } else {
        fs::create_dir_all(root)
            .await
            .map_err(|e| ScaffoldError::io(root, e))
    }
}

/// Remove everything inside `dir`, keeping the directory itself
pub async fn empty_dir(dir: &Path) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| ScaffoldError::io(dir, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ScaffoldError::io(dir, e))?
    {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| ScaffoldError::io(&path, e))?;
        let removed = if file_type.is_dir() {
            fs::remove_dir_all(&path).await
        } else {
            fs::remove_file(&path).await
        };
        removed.map_err(|e| ScaffoldError::io(&path, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{GeneratedFile, GeneratedFileSpec};
    use crate::features::{FeatureGraph, FlagSpec};
    use crate::templates::RenderPlan;
    use serde_json::Value;
    use std::fs as stdfs;

    /// Two fragments plus one generated file that lists the fragments it saw
    struct Fixture;

    impl TemplateDefinition for Fixture {
        fn id(&self) -> &'static str {
            "fixture"
        }

        fn description(&self) -> &'static str {
            "Test template"
        }

        fn features(&self) -> FeatureGraph {
            FeatureGraph::new(vec![FlagSpec::toggle("extra", "Extra?", false)])
        }

        fn plan(&self, flags: &FeatureFlags) -> Result<RenderPlan> {
            let mut plan = RenderPlan::new("base");
            plan.fragment_if(flags.bool("extra"), "extra");
            plan.generate([GeneratedFile {
                name: "entry",
                path: PathBuf::from("src/generated.txt"),
                spec: GeneratedFileSpec::new(),
                contents: format!("extra={}", flags.bool("extra")),
            }]);
            Ok(plan)
        }
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        stdfs::create_dir_all(path.parent().unwrap()).unwrap();
        stdfs::write(path, content).unwrap();
    }

    fn templates() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("fixture");
        write(
            &root,
            "base/package.json",
            r#"{ "name": "template", "private": true }"#,
        );
        write(&root, "base/_gitignore", "dist\n");
        write(&root, "base/src/generated.txt", "from template\n");
        write(
            &root,
            "extra/package.json",
            r#"{ "devDependencies": { "vitest": "^0.22.0" } }"#,
        );
        write(&root, "extra/README.md", "extra\n");
        dir
    }

    fn read_manifest(root: &Path) -> Value {
        let raw = stdfs::read_to_string(root.join("package.json")).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    fn context(templates: &Path, root: PathBuf, overwrite: bool) -> ScaffoldContext {
        ScaffoldContext {
            root,
            package_name: "my-site".to_string(),
            overwrite,
            templates_dir: templates.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn test_scaffold_renders_fragments_then_generated_files() {
        let templates = templates();
        let out = tempfile::tempdir().unwrap();
        let root = out.path().join("site");
        let flags = FeatureFlags::new().with("extra", true);

        let ctx = context(templates.path(), root.clone(), false);
        let report = scaffold(&Fixture, &flags, &ctx).await.unwrap();

        assert_eq!(report.fragments, vec!["base", "extra"]);
        assert_eq!(report.generated, vec![PathBuf::from("src/generated.txt")]);
        assert!(root.join(".gitignore").exists());
        assert!(root.join("README.md").exists());

        // Generated files win over template copies
        let generated = stdfs::read_to_string(root.join("src/generated.txt")).unwrap();
        assert_eq!(generated, "extra=true");

        let pkg = read_manifest(&root);
        assert_eq!(pkg["name"], "my-site");
        assert_eq!(pkg["version"], "0.0.0");
        assert_eq!(pkg["private"], true);
        assert_eq!(pkg["devDependencies"]["vitest"], "^0.22.0");
    }

    #[tokio::test]
    async fn test_disabled_fragment_is_not_rendered() {
        let templates = templates();
        let out = tempfile::tempdir().unwrap();
        let root = out.path().join("site");

        let report = scaffold(
            &Fixture,
            &FeatureFlags::new(),
            &context(templates.path(), root.clone(), false),
        )
        .await
        .unwrap();

        assert_eq!(report.fragments, vec!["base"]);
        assert!(!root.join("README.md").exists());
    }

    #[tokio::test]
    async fn test_overwrite_clears_existing_files() {
        let templates = templates();
        let out = tempfile::tempdir().unwrap();
        let root = out.path().join("site");
        write(&root, "old/notes.txt", "keep me?");
        write(&root, "package.json", r#"{ "name": "old-name" }"#);

        scaffold(
            &Fixture,
            &FeatureFlags::new(),
            &context(templates.path(), root.clone(), true),
        )
        .await
        .unwrap();

        assert!(!root.join("old").exists());
        assert_eq!(read_manifest(&root)["name"], "my-site");
    }

    #[tokio::test]
    async fn test_without_overwrite_existing_files_stay() {
        let templates = templates();
        let out = tempfile::tempdir().unwrap();
        let root = out.path().join("site");
        write(&root, "notes.txt", "mine");

        scaffold(
            &Fixture,
            &FeatureFlags::new(),
            &context(templates.path(), root.clone(), false),
        )
        .await
        .unwrap();

        assert!(root.join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_unreadable_root_is_an_error() {
        let templates = templates();
        let out = tempfile::tempdir().unwrap();
        let blocker = out.path().join("blocker");
        write(out.path(), "blocker", "not a directory");
        let root = blocker.join("site");

        let ctx = context(templates.path(), root.clone(), true);
        let err = scaffold(&Fixture, &FeatureFlags::new(), &ctx)
            .await
            .unwrap_err();
        match err {
            ScaffoldError::Io { path, .. } => assert_eq!(path, root),
            other => panic!("unexpected error: {other}"),
        }
    }
}
