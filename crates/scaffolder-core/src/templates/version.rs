//! Version comparison for CLI and template compatibility

use anyhow::Result;
use semver::Version;

/// Compare the CLI version against the version a template declares.
/// Returns a warning message if the CLI is older than the template expects.
pub fn check_compatibility(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    // Unparseable versions can't be compared, skip the warning
    let cli_ver = parse_version(cli_version).ok()?;
    let template_ver = parse_version(template_version).ok()?;

    if cli_ver < template_ver {
        Some(format!(
            "Template requires CLI version {} or newer (running {}). Consider updating: {}",
            template_ver, cli_ver, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse version string, accepting a leading 'v'
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{version_str}': {e}"))
}
