//! Product configuration trait for CLI binaries
//!
//! Each binary built on this library implements `ProductConfig` to name
//! itself and say where its templates live.

use std::path::PathBuf;

/// Configuration trait for scaffolding CLIs
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name, shown in the intro banner
    fn display_name(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Project name offered when no directory is given
    fn default_project_name(&self) -> &'static str {
        "sl-project"
    }

    /// Environment variable that overrides the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Template directory used when neither the flag nor the env var is set
    fn default_templates_dir(&self) -> PathBuf;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Resolve the template directory: flag, then env var, then default
    fn templates_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| std::env::var_os(self.template_dir_env()).map(PathBuf::from))
            .unwrap_or_else(|| self.default_templates_dir())
    }
}
