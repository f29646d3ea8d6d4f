//! Template definitions, rendering, and orchestration
//!
//! This module provides:
//! - Path rewriting and manifest merging for template files
//! - Recursive rendering of template fragments into a project directory
//! - The `TemplateDefinition` trait and the registry of built-in templates
//! - The orchestrator that turns resolved features into a project on disk

pub mod copier;
pub mod manifest;
pub mod orchestrator;
pub mod path;
pub mod version;

use crate::codegen::GeneratedFile;
use crate::definitions::VueWebsite;
use crate::error::{Result, ScaffoldError};
use crate::features::{FeatureFlags, FeatureGraph};
use std::path::{Path, PathBuf};

pub use copier::{render_template, RenderSummary};
pub use manifest::TemplateManifest;
pub use orchestrator::{scaffold, ScaffoldContext, ScaffoldReport};
pub use path::{rewrite, Rewrite};
pub use version::check_compatibility;

/// A named subtree of a template directory, rendered whole or not at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFragment(String);

impl TemplateFragment {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Location of this fragment inside a template directory
    pub fn source_dir(&self, template_dir: &Path) -> PathBuf {
        let mut dir = template_dir.to_path_buf();
        dir.extend(self.0.split('/'));
        dir
    }
}

/// Everything a template will write, in order
///
/// The base fragment always renders first, then the feature fragments in
/// the order they were added, then the generated files.
#[derive(Debug, Clone)]
pub struct RenderPlan {
    base: TemplateFragment,
    fragments: Vec<TemplateFragment>,
    generated: Vec<GeneratedFile>,
}

impl RenderPlan {
    pub fn new(base: &str) -> Self {
        Self {
            base: TemplateFragment::new(base),
            fragments: Vec::new(),
            generated: Vec::new(),
        }
    }

    pub fn fragment(&mut self, name: &str) -> &mut Self {
        self.fragments.push(TemplateFragment::new(name));
        self
    }

    pub fn fragment_if(&mut self, enabled: bool, name: &str) -> &mut Self {
        if enabled {
            self.fragment(name);
        }
        self
    }

    pub fn generate(&mut self, files: impl IntoIterator<Item = GeneratedFile>) -> &mut Self {
        self.generated.extend(files);
        self
    }

    /// Fragments in render order, base first
    pub fn fragments(&self) -> impl Iterator<Item = &TemplateFragment> {
        std::iter::once(&self.base).chain(self.fragments.iter())
    }

    pub fn fragment_names(&self) -> Vec<&str> {
        self.fragments().map(TemplateFragment::name).collect()
    }

    pub fn generated(&self) -> &[GeneratedFile] {
        &self.generated
    }

    pub fn generated_file(&self, name: &str) -> Option<&GeneratedFile> {
        self.generated.iter().find(|f| f.name == name)
    }
}

/// A project template: its features and how resolved features map to output
pub trait TemplateDefinition: Send + Sync {
    /// Identifier used on the command line and as the template directory name
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// The flags this template asks about
    fn features(&self) -> FeatureGraph;

    /// Fragments and generated files for a resolved flag set. Pure.
    fn plan(&self, flags: &FeatureFlags) -> Result<RenderPlan>;
}

/// Registered templates, in registration order
pub struct TemplateRegistry {
    templates: Vec<Box<dyn TemplateDefinition>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Registry with every template that ships with the library
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(VueWebsite);
        registry
    }

    pub fn register(&mut self, template: impl TemplateDefinition + 'static) -> &mut Self {
        self.templates.push(Box::new(template));
        self
    }

    pub fn get(&self, id: &str) -> Result<&dyn TemplateDefinition> {
        self.templates
            .iter()
            .find(|t| t.id() == id)
            .map(|t| t.as_ref())
            .ok_or_else(|| ScaffoldError::UnknownTemplate {
                name: id.to_string(),
                available: self.ids().into_iter().map(String::from).collect(),
            })
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.templates.iter().map(|t| t.id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn TemplateDefinition> {
        self.templates.iter().map(|t| t.as_ref())
    }

    /// The first registered template
    pub fn default_template(&self) -> Option<&dyn TemplateDefinition> {
        self.templates.first().map(|t| t.as_ref())
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_source_dir() {
        let dir = TemplateFragment::new("config/router").source_dir(Path::new("/t/vue-website"));
        assert_eq!(dir, PathBuf::from("/t/vue-website/config/router"));
    }

    #[test]
    fn test_plan_renders_base_first() {
        let mut plan = RenderPlan::new("base");
        plan.fragment("code/base")
            .fragment_if(false, "code/router")
            .fragment_if(true, "code/core");
        assert_eq!(
            plan.fragment_names(),
            vec!["base", "code/base", "code/core"]
        );
    }

    #[test]
    fn test_registry_lookup() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(registry.ids(), vec!["vue-website"]);
        assert_eq!(registry.get("vue-website").unwrap().id(), "vue-website");
        assert_eq!(registry.default_template().unwrap().id(), "vue-website");
    }

    #[test]
    fn test_unknown_template() {
        let registry = TemplateRegistry::builtin();
        match registry.get("svelte-app") {
            Err(ScaffoldError::UnknownTemplate { name, available }) => {
                assert_eq!(name, "svelte-app");
                assert_eq!(available, vec!["vue-website".to_string()]);
            }
            _ => panic!("expected UnknownTemplate"),
        }
    }
}
