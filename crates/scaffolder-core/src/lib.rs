//! Scaffolder Core - Shared library for project scaffolding CLIs
//!
//! Projects are composed from template fragments: whole subdirectories of a
//! template that are copied when a feature is enabled, with `package.json`
//! files merged along the way and a few entry/config files generated from the
//! resolved feature set.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Path rewriting, manifest merging, fragment
//!   rendering, feature resolution, and code generation
//! - **Layer 2: Workflow Orchestration** - `TemplateDefinition`, the template
//!   registry, `scaffold`, and the `ProductConfig` trait
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{FeatureFlags, ScaffoldContext, TemplateRegistry};
//! use scaffolder_core::features::{AnswerSheet, FeatureResolver, PromptPolicy};
//!
//! let registry = TemplateRegistry::builtin();
//! let template = registry.get("vue-website")?;
//!
//! let explicit = FeatureFlags::new().with("ssr", true);
//! let flags = FeatureResolver::new(template.features(), PromptPolicy::NonInteractive)
//!     .resolve(&explicit, &mut AnswerSheet::default())?;
//!
//! let ctx = ScaffoldContext {
//!     root: "my-site".into(),
//!     package_name: "my-site".into(),
//!     overwrite: false,
//!     templates_dir: "templates".into(),
//! };
//! scaffolder_core::scaffold(template, &flags, &ctx).await?;
//! ```

pub mod codegen;
pub mod definitions;
pub mod error;
pub mod features;
pub mod product;
pub mod project;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{Result, ScaffoldError};
pub use features::{FeatureFlags, FlagValue};
pub use product::ProductConfig;
pub use templates::{
    scaffold, ScaffoldContext, ScaffoldReport, TemplateDefinition, TemplateManifest,
    TemplateRegistry,
};

#[cfg(feature = "tui")]
pub use tui::run;
