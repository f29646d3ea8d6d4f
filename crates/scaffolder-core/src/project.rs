//! Project naming, destination checks, and package manager detection

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static VALID_PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[a-z0-9-*~][a-z0-9-*._~]*/)?[a-z0-9-~][a-z0-9-._~]*$")
        .expect("package name pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-~]+").expect("pattern is valid"));

/// Whether `name` can be used as an npm package name
pub fn is_valid_package_name(name: &str) -> bool {
    VALID_PACKAGE_NAME.is_match(name)
}

/// Best-effort conversion of a directory name into a package name
pub fn to_valid_package_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let dashed = WHITESPACE.replace_all(&lowered, "-");
    let stripped = dashed.strip_prefix(['.', '_']).unwrap_or(&dashed);
    INVALID_CHARS.replace_all(stripped, "-").into_owned()
}

/// A destination is safe to write into when it is missing or empty
pub fn can_safely_overwrite(dir: &Path) -> bool {
    match std::fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => !dir.exists(),
    }
}

/// Package manager the CLI was launched through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    /// Detect from an `npm_config_user_agent` value such as
    /// `pnpm/7.9.0 npm/? node/v16.16.0 darwin x64`
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(agent) if agent.contains("pnpm") => PackageManager::Pnpm,
            Some(agent) if agent.contains("yarn") => PackageManager::Yarn,
            _ => PackageManager::Npm,
        }
    }

    pub fn detect() -> Self {
        Self::from_user_agent(std::env::var("npm_config_user_agent").ok().as_deref())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Command that runs `script` (or installs, for `"install"`)
    pub fn format_command(&self, script: &str) -> String {
        match (self, script) {
            (PackageManager::Yarn, "install") => "yarn".to_string(),
            (pm, "install") => format!("{} install", pm.as_str()),
            (PackageManager::Npm, script) => format!("npm run {}", script),
            (pm, script) => format!("{} {}", pm.as_str(), script),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_package_names() {
        for name in ["sl-project", "my.site", "@shiftlimits/site", "a~b", "x1"] {
            assert!(is_valid_package_name(name), "{} should be valid", name);
        }
        for name in ["My Site", ".hidden", "_private", "", "UPPER", "a/b"] {
            assert!(!is_valid_package_name(name), "{} should be invalid", name);
        }
    }

    #[test]
    fn test_normalize_package_name() {
        assert_eq!(to_valid_package_name("  My Cool Site "), "my-cool-site");
        assert_eq!(to_valid_package_name(".dotfile"), "dotfile");
        assert_eq!(to_valid_package_name("_under"), "under");
        assert_eq!(to_valid_package_name("hello@world!!"), "hello-world-");
        assert_eq!(to_valid_package_name("site.v2"), "site-v2");
    }

    #[test]
    fn test_normalized_simple_names_are_valid() {
        for raw in ["My Site", "_Example", "Site 2023"] {
            assert!(is_valid_package_name(&to_valid_package_name(raw)));
        }
    }

    #[test]
    fn test_can_safely_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        assert!(can_safely_overwrite(dir.path()));
        assert!(can_safely_overwrite(&dir.path().join("missing")));

        std::fs::write(dir.path().join("index.html"), "").unwrap();
        assert!(!can_safely_overwrite(dir.path()));
    }

    #[test]
    fn test_detect_package_manager() {
        assert_eq!(
            PackageManager::from_user_agent(Some("pnpm/7.9.0 npm/? node/v16.16.0 linux x64")),
            PackageManager::Pnpm
        );
        assert_eq!(
            PackageManager::from_user_agent(Some("yarn/1.22.19 npm/? node/v16.16.0 linux x64")),
            PackageManager::Yarn
        );
        assert_eq!(
            PackageManager::from_user_agent(Some("npm/8.15.0 node/v16.16.0 linux x64")),
            PackageManager::Npm
        );
        assert_eq!(PackageManager::from_user_agent(None), PackageManager::Npm);
    }

    #[test]
    fn test_format_command() {
        let cases = [
            (PackageManager::Yarn, "install", "yarn"),
            (PackageManager::Pnpm, "install", "pnpm install"),
            (PackageManager::Npm, "install", "npm install"),
            (PackageManager::Npm, "dev", "npm run dev"),
            (PackageManager::Pnpm, "dev", "pnpm dev"),
            (PackageManager::Yarn, "lint", "yarn lint"),
        ];
        for (pm, script, expected) in cases {
            assert_eq!(pm.format_command(script), expected);
        }
    }
}
