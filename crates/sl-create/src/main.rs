//! create-sl - Project scaffolding for ShiftLimits websites

use clap::Parser;
use colored::Colorize;
use scaffolder_core::definitions::vue_website::{flag, SluiPreset};
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::{FeatureFlags, ProductConfig, ScaffoldError};
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// ShiftLimits product configuration
#[derive(Clone)]
pub struct ShiftLimitsConfig;

impl ProductConfig for ShiftLimitsConfig {
    fn name(&self) -> &'static str {
        "create-sl"
    }

    fn display_name(&self) -> &'static str {
        "ShiftLimits"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding ShiftLimits projects"
    }

    fn template_dir_env(&self) -> &'static str {
        "SL_TEMPLATE_DIR"
    }

    fn default_templates_dir(&self) -> PathBuf {
        // Prefer templates installed next to the binary
        let installed = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("templates")))
            .filter(|dir| dir.is_dir());

        installed.unwrap_or_else(|| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("..")
                .join("..")
                .join("templates")
        })
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install sl-create --force"
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-sl")]
#[command(about = "CLI for scaffolding ShiftLimits projects")]
#[command(version)]
pub struct Args {
    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Template name to use
    pub template: Option<String>,

    /// Overwrite the target directory if it is not empty
    #[arg(long)]
    pub force: bool,

    /// Use defaults for everything not given on the command line
    #[arg(long, short = 'y', visible_alias = "yes")]
    pub default: bool,

    /// Local directory holding the templates (overrides SL_TEMPLATE_DIR)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Skip every feature prompt once any feature flag is given
    #[arg(long = "legacy-prompts")]
    pub legacy_prompts: bool,

    /// Add the application core (layouts, pages, and routing)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub core: Option<bool>,

    /// Add the router
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub router: Option<bool>,

    /// Add the ShiftLimits UI library
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub slui: Option<bool>,

    /// Preset for the ShiftLimits UI library
    #[arg(long = "slui-preset", value_enum)]
    pub slui_preset: Option<SluiPreset>,

    /// Components to register with the custom preset (comma-separated)
    #[arg(long = "slui-features", value_delimiter = ',')]
    pub slui_features: Option<Vec<String>>,

    /// Configure Color Suite through the ShiftLimits UI library
    #[arg(
        long = "slui-color-suite",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub slui_color_suite: Option<bool>,

    /// Add Color Suite without the UI library
    #[arg(
        long = "color-suite",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub color_suite: Option<bool>,

    /// Add Vitest for unit testing
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub vitest: Option<bool>,

    /// Verify commit messages with yorkie
    #[arg(
        long = "verify-commits",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub verify_commits: Option<bool>,

    /// Add server-side rendering and static site generation
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub ssr: Option<bool>,
}

impl Args {
    /// Feature flags given explicitly on the command line
    pub fn explicit_features(&self) -> FeatureFlags {
        let mut flags = FeatureFlags::new();

        let toggles = [
            (flag::CORE, self.core),
            (flag::ROUTER, self.router),
            (flag::SLUI, self.slui),
            (flag::SLUI_COLOR_SUITE, self.slui_color_suite),
            (flag::COLOR_SUITE, self.color_suite),
            (flag::VITEST, self.vitest),
            (flag::VERIFY_COMMITS, self.verify_commits),
            (flag::SSR, self.ssr),
        ];
        for (name, value) in toggles {
            if let Some(value) = value {
                flags.set(name, value);
            }
        }

        if let Some(preset) = self.slui_preset {
            flags.set(flag::SLUI_PRESET, preset.as_str());
        }
        if let Some(features) = &self.slui_features {
            // A component list without a preset implies the custom preset
            if self.slui_preset.is_none() {
                flags.set(flag::SLUI_PRESET, SluiPreset::Custom.as_str());
            }
            flags.set(flag::SLUI_FEATURES, features.clone());
        }

        flags
    }
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            features: args.explicit_features(),
            directory: args.directory,
            template: args.template,
            template_dir: args.template_dir,
            force: args.force,
            default: args.default,
            legacy_prompts: args.legacy_prompts,
        }
    }
}

/// Cancellations and refused overwrites, as opposed to failures
fn is_cancellation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ScaffoldError>()
        .is_some_and(ScaffoldError::is_cancelled)
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = ShiftLimitsConfig;

    let result = scaffolder_core::run(&config, args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(err) = result {
        if is_cancellation(&err) {
            eprintln!("{}", format!("× {}", err).red());
        } else {
            eprintln!("{} {:#}", "×".red(), err);
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffolder_core::FlagValue;

    fn parse(args: &[&str]) -> Args {
        let argv = std::iter::once("create-sl").chain(args.iter().copied());
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_positionals() {
        let args = parse(&["my-site", "vue-website"]);
        assert_eq!(args.directory, Some(PathBuf::from("my-site")));
        assert_eq!(args.template.as_deref(), Some("vue-website"));
        assert!(args.explicit_features().is_empty());
    }

    #[test]
    fn test_bare_flag_means_true() {
        let args = parse(&["--ssr", "--router=false", "my-site"]);
        let flags = args.explicit_features();
        assert_eq!(flags.get(flag::SSR), Some(&FlagValue::Bool(true)));
        assert_eq!(flags.get(flag::ROUTER), Some(&FlagValue::Bool(false)));
        assert!(!flags.contains(flag::CORE));
    }

    #[test]
    fn test_slui_options() {
        let args = parse(&[
            "--slui-preset",
            "custom",
            "--slui-features",
            "TextLink,SvgIcon",
        ]);
        let flags = args.explicit_features();
        assert_eq!(flags.choice(flag::SLUI_PRESET), Some("custom"));
        assert_eq!(
            flags.list(flag::SLUI_FEATURES),
            &["TextLink".to_string(), "SvgIcon".to_string()]
        );
    }

    #[test]
    fn test_component_list_implies_custom_preset() {
        let args = parse(&["-y", "--slui-features", "SvgIcon"]);
        let flags = args.explicit_features();
        assert_eq!(flags.choice(flag::SLUI_PRESET), Some("custom"));
        assert_eq!(flags.list(flag::SLUI_FEATURES), &["SvgIcon".to_string()]);

        // An explicit preset is passed through as given
        let args = parse(&["--slui-preset", "basics", "--slui-features", "SvgIcon"]);
        let flags = args.explicit_features();
        assert_eq!(flags.choice(flag::SLUI_PRESET), Some("basics"));
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        let result = Args::try_parse_from(["create-sl", "--slui-preset", "huge"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_yes_alias() {
        assert!(parse(&["-y"]).default);
        assert!(parse(&["--yes"]).default);
        assert!(parse(&["--default"]).default);
    }

    #[test]
    fn test_into_create_args() {
        let args = parse(&["site", "--force", "--legacy-prompts", "--vitest=false"]);
        let create: CreateArgs = args.into();
        assert!(create.force);
        assert!(create.legacy_prompts);
        assert_eq!(create.directory, Some(PathBuf::from("site")));
        assert_eq!(
            create.features.get(flag::VITEST),
            Some(&FlagValue::Bool(false))
        );
    }

    #[test]
    fn test_refused_overwrite_counts_as_cancellation() {
        let refused = ScaffoldError::UnsafeOverwrite {
            path: PathBuf::from("site"),
        };
        assert!(is_cancellation(&refused.into()));
        assert!(is_cancellation(&ScaffoldError::OperatorCancelled.into()));
        assert!(!is_cancellation(&anyhow::anyhow!("disk full")));
    }
}
