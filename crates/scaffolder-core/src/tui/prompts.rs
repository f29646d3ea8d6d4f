//! Charm-style CLI prompts using cliclack

use crate::error::ScaffoldError;
use crate::features::{
    FeatureFlags, FeatureResolver, FlagKind, FlagSpec, FlagValue, PromptPolicy, Prompter,
};
use crate::product::ProductConfig;
use crate::project::{
    can_safely_overwrite, is_valid_package_name, to_valid_package_name, PackageManager,
};
use crate::templates::{
    check_compatibility, scaffold, ScaffoldContext, TemplateDefinition, TemplateManifest,
    TemplateRegistry,
};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Template name to use
    pub template: Option<String>,

    /// Local directory holding the templates
    pub template_dir: Option<PathBuf>,

    /// Overwrite a non-empty directory without asking
    pub force: bool,

    /// Accept defaults for everything that was not given explicitly
    pub default: bool,

    /// Any explicit feature flag skips every feature prompt
    pub legacy_prompts: bool,

    /// Feature flags given on the command line
    pub features: FeatureFlags,
}

impl CreateArgs {
    pub fn prompt_policy(&self) -> PromptPolicy {
        if self.default {
            PromptPolicy::NonInteractive
        } else if self.legacy_prompts {
            PromptPolicy::SuppressAllOnExplicit
        } else {
            PromptPolicy::PerFlag
        }
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let registry = TemplateRegistry::builtin();
    // Resolve an explicit template before anything is asked or written
    if let Some(name) = &args.template {
        registry.get(name)?;
    }

    let cwd = std::env::current_dir().context("Failed to read the current directory")?;

    // Step 1: Project name and directory
    let project_name = select_project_name(config, &args)?;
    let root = cwd.join(&project_name);

    // Step 2: Template
    let template = select_template(&registry, &args)?;
    let templates_dir = config.templates_dir(args.template_dir.clone());
    let template_root = templates_dir.join(template.id());
    let manifest = TemplateManifest::load(&template_root).await?;

    let upgrade = config.upgrade_command();
    if let Some(warning) = check_compatibility(cli_version, &manifest.version, upgrade) {
        cliclack::log::warning(format!("Version warning: {}", warning))?;
    }

    // Step 3: Overwrite check
    let overwrite = confirm_overwrite(&root, &project_name, &args)?;

    // Step 4: Package name
    let package_name = select_package_name(&root, &project_name, &args)?;

    // Step 5: Features
    let resolver = FeatureResolver::new(template.features(), args.prompt_policy());
    let flags = resolver.resolve(&args.features, &mut CliclackPrompter)?;

    // Step 6: Scaffold
    let ctx = ScaffoldContext {
        root: root.clone(),
        package_name,
        overwrite,
        templates_dir,
    };

    let spinner = cliclack::spinner();
    spinner.start(format!("Scaffolding project in {}...", root.display()));
    let report = match scaffold(template, &flags, &ctx).await {
        Ok(report) => report,
        Err(e) => {
            spinner.error("Scaffolding failed");
            return Err(e.into());
        }
    };
    spinner.stop(format!("Created {} files in {}", report.files, root.display()));

    // Step 7: Next steps
    print_next_steps(&root, &cwd, PackageManager::detect())?;

    Ok(())
}

fn select_project_name<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<String> {
    if let Some(dir) = &args.directory {
        let name = dir
            .to_string_lossy()
            .trim()
            .trim_end_matches('/')
            .to_string();
        if !name.is_empty() {
            return Ok(name);
        }
    }

    if args.default {
        return Ok(config.default_project_name().to_string());
    }

    let input: String = cliclack::input("Project name")
        .placeholder(config.default_project_name())
        .default_input(config.default_project_name())
        .interact()
        .map_err(ScaffoldError::from_prompt)?;

    Ok(input.trim().to_string())
}

fn select_template<'a>(
    registry: &'a TemplateRegistry,
    args: &CreateArgs,
) -> Result<&'a dyn TemplateDefinition> {
    if let Some(name) = &args.template {
        let template = registry.get(name)?;
        cliclack::log::info(format!(
            "Template: {} - {}",
            template.id(),
            template.description()
        ))?;
        return Ok(template);
    }

    let ids = registry.ids();
    if args.default || ids.len() == 1 {
        let template = registry
            .default_template()
            .context("No templates are registered")?;
        cliclack::log::info(format!(
            "Using template: {} - {}",
            template.id(),
            template.description()
        ))?;
        return Ok(template);
    }

    let mut select = cliclack::select("Select a template");
    for template in registry.iter() {
        select = select.item(template.id(), template.id(), template.description());
    }
    let id: &str = select.interact().map_err(ScaffoldError::from_prompt)?;

    Ok(registry.get(id)?)
}

/// Whether to clear the destination first. Declining is a cancellation.
fn confirm_overwrite(root: &Path, project_name: &str, args: &CreateArgs) -> Result<bool> {
    if can_safely_overwrite(root) {
        return Ok(false);
    }
    if args.force {
        cliclack::log::warning(format!("Overwriting {}", root.display()))?;
        return Ok(true);
    }
    if args.default {
        return Err(ScaffoldError::UnsafeOverwrite {
            path: root.to_path_buf(),
        }
        .into());
    }

    let message = if project_name == "." {
        "Current directory is not empty. Remove existing files and continue?".to_string()
    } else {
        format!(
            "Target directory \"{}\" is not empty. Remove existing files and continue?",
            project_name
        )
    };
    let confirmed: bool = cliclack::confirm(message)
        .initial_value(false)
        .interact()
        .map_err(ScaffoldError::from_prompt)?;

    if !confirmed {
        return Err(ScaffoldError::OperatorCancelled.into());
    }
    Ok(true)
}

fn select_package_name(root: &Path, project_name: &str, args: &CreateArgs) -> Result<String> {
    let dir_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| project_name.to_string());

    if is_valid_package_name(&dir_name) {
        return Ok(dir_name);
    }

    let suggested = to_valid_package_name(&dir_name);
    if args.default {
        return Ok(suggested);
    }

    let name: String = cliclack::input("Package name")
        .default_input(&suggested)
        .validate(|input: &String| {
            if is_valid_package_name(input) {
                Ok(())
            } else {
                Err("Invalid package.json name")
            }
        })
        .interact()
        .map_err(ScaffoldError::from_prompt)?;

    Ok(name)
}

/// Asks feature questions with cliclack widgets
struct CliclackPrompter;

impl Prompter for CliclackPrompter {
    fn ask(
        &mut self,
        spec: &FlagSpec,
        initial: &FlagValue,
        _resolved: &FeatureFlags,
    ) -> crate::error::Result<Option<FlagValue>> {
        let value = match spec.kind {
            FlagKind::Toggle => {
                let initial = matches!(initial, FlagValue::Bool(true));
                let answer: bool = cliclack::confirm(spec.message)
                    .initial_value(initial)
                    .interact()
                    .map_err(ScaffoldError::from_prompt)?;
                FlagValue::Bool(answer)
            }
            FlagKind::Select(choices) => {
                let mut select = cliclack::select(spec.message);
                for choice in choices {
                    select = select.item(choice.value, choice.value, choice.hint);
                }
                if let FlagValue::Choice(current) = initial {
                    if let Some(choice) = choices.iter().find(|c| c.value == current.as_str()) {
                        select = select.initial_value(choice.value);
                    }
                }
                let answer: &str = select.interact().map_err(ScaffoldError::from_prompt)?;
                FlagValue::Choice(answer.to_string())
            }
            FlagKind::MultiSelect(choices) => {
                let mut multi = cliclack::multiselect(spec.message);
                for choice in choices {
                    multi = multi.item(choice.value, choice.value, choice.hint);
                }
                if let FlagValue::List(current) = initial {
                    let selected: Vec<&'static str> = choices
                        .iter()
                        .filter(|c| current.iter().any(|v| v == c.value))
                        .map(|c| c.value)
                        .collect();
                    multi = multi.initial_values(selected);
                }
                let answer: Vec<&str> = multi
                    .required(false)
                    .interact()
                    .map_err(ScaffoldError::from_prompt)?;
                FlagValue::List(answer.into_iter().map(String::from).collect())
            }
        };
        Ok(Some(value))
    }
}

/// Commands to run after scaffolding, in order
fn next_steps(root: &Path, cwd: &Path, pm: PackageManager) -> Vec<String> {
    let mut steps = Vec::new();
    if root != cwd {
        let relative = root.strip_prefix(cwd).unwrap_or(root);
        let display = relative.display().to_string();
        if display.contains(' ') {
            steps.push(format!("cd \"{}\"", display));
        } else {
            steps.push(format!("cd {}", display));
        }
    }
    steps.push(pm.format_command("install"));
    steps.push(pm.format_command("dev"));
    steps
}

fn print_next_steps(root: &Path, cwd: &Path, pm: PackageManager) -> Result<()> {
    println!();
    println!("  {}", "Done. Now run:".bold());
    println!();

    for step in next_steps(root, cwd, pm) {
        println!("    {}", step.green().bold());
    }
    println!();

    cliclack::outro("Happy coding!")?;

    Ok(())
}
