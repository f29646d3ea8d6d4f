//! `vue-website`: Vue + TailwindCSS website with optional routing, app core,
//! ShiftLimits UI, Color Suite, Vitest, commit verification, and SSR

pub mod synth;

use crate::error::{Result, ScaffoldError};
use crate::features::{Choice, Condition, FeatureFlags, FeatureGraph, FlagSpec};
use crate::templates::{RenderPlan, TemplateDefinition};

/// Flag names, as used on the command line
pub mod flag {
    pub const CORE: &str = "core";
    pub const ROUTER: &str = "router";
    pub const SLUI: &str = "slui";
    pub const SLUI_PRESET: &str = "slui-preset";
    pub const SLUI_FEATURES: &str = "slui-features";
    pub const SLUI_COLOR_SUITE: &str = "slui-color-suite";
    pub const COLOR_SUITE: &str = "color-suite";
    pub const VITEST: &str = "vitest";
    pub const VERIFY_COMMITS: &str = "verify-commits";
    pub const SSR: &str = "ssr";
}

/// How much of the ShiftLimits UI library is wired up
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SluiPreset {
    Minimal,
    Basics,
    Recommended,
    Everything,
    Custom,
}

impl SluiPreset {
    pub const ALL: [SluiPreset; 5] = [
        SluiPreset::Minimal,
        SluiPreset::Basics,
        SluiPreset::Recommended,
        SluiPreset::Everything,
        SluiPreset::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SluiPreset::Minimal => "minimal",
            SluiPreset::Basics => "basics",
            SluiPreset::Recommended => "recommended",
            SluiPreset::Everything => "everything",
            SluiPreset::Custom => "custom",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }

    /// Components a preset registers. `None` for `Custom`, whose list comes
    /// from the operator instead.
    pub fn features(&self) -> Option<&'static [SluiFeature]> {
        match self {
            SluiPreset::Minimal => Some(&[]),
            SluiPreset::Basics => Some(&[SluiFeature::TextLink]),
            SluiPreset::Recommended => Some(&[SluiFeature::TextLink, SluiFeature::SvgIcon]),
            SluiPreset::Everything => Some(&SluiFeature::ALL),
            SluiPreset::Custom => None,
        }
    }
}

/// A globally registrable ShiftLimits UI component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SluiFeature {
    TextLink,
    SvgIcon,
}

impl SluiFeature {
    pub const ALL: [SluiFeature; 2] = [SluiFeature::TextLink, SluiFeature::SvgIcon];

    /// Component name, also its export name in `@shiftlimits/ui`
    pub fn as_str(&self) -> &'static str {
        match self {
            SluiFeature::TextLink => "TextLink",
            SluiFeature::SvgIcon => "SvgIcon",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

const PRESET_CHOICES: &[Choice] = &[
    Choice {
        value: "minimal",
        hint: "The library is only installed and configured. You pull in features as needed.",
    },
    Choice {
        value: "basics",
        hint: "Commonly used UI components are registered globally.",
    },
    Choice {
        value: "recommended",
        hint: "Recommended UI components are registered globally and recommended plugins are installed.",
    },
    Choice {
        value: "everything",
        hint: "All components are registered globally and all plugins are installed.",
    },
    Choice {
        value: "custom",
        hint: "Manually select the features you would like to use.",
    },
];

const FEATURE_CHOICES: &[Choice] = &[
    Choice {
        value: "TextLink",
        hint: "Basic styled inline text link.",
    },
    Choice {
        value: "SvgIcon",
        hint: "Displays SVG icons from the assets folder.",
    },
];

/// Typed view of the resolved flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VueWebsiteFeatures {
    pub app_core: bool,
    pub router: bool,
    pub slui: bool,
    pub slui_preset: SluiPreset,
    /// Components to register globally, in registration order
    pub slui_features: Vec<SluiFeature>,
    /// Color Suite configured through the UI library
    pub slui_color_suite: bool,
    /// Color Suite installed on its own, without the UI library
    pub color_suite: bool,
    pub vitest: bool,
    pub verify_commits: bool,
    pub ssr: bool,
}

impl VueWebsiteFeatures {
    /// Typed view of resolved flags.
    ///
    /// A component list is only accepted with the custom preset. Repeated
    /// components are registered once, at their first position.
    pub fn from_flags(flags: &FeatureFlags) -> Result<Self> {
        let slui = flags.bool(flag::SLUI);
        let preset_name = flags.choice(flag::SLUI_PRESET).unwrap_or("recommended");
        let Some(slui_preset) = SluiPreset::parse(preset_name) else {
            return Err(unknown_option(flag::SLUI_PRESET, preset_name));
        };
        let listed = flags.list(flag::SLUI_FEATURES);

        let slui_features = match slui_preset.features() {
            _ if !slui => Vec::new(),
            Some(features) if listed.is_empty() => features.to_vec(),
            Some(_) => {
                return Err(ScaffoldError::InvalidFlag {
                    flag: flag::SLUI_FEATURES.to_string(),
                    reason: format!("needs the custom preset, not '{}'", preset_name),
                });
            }
            None => parse_features(listed)?,
        };

        Ok(Self {
            app_core: flags.bool(flag::CORE),
            router: flags.bool(flag::ROUTER),
            slui,
            slui_preset,
            slui_features,
            slui_color_suite: slui && flags.bool(flag::SLUI_COLOR_SUITE),
            color_suite: !slui && flags.bool(flag::COLOR_SUITE),
            vitest: flags.bool(flag::VITEST),
            verify_commits: flags.bool(flag::VERIFY_COMMITS),
            ssr: flags.bool(flag::SSR),
        })
    }

    /// Whether the Color Suite config fragment is needed at all
    pub fn uses_color_suite(&self) -> bool {
        self.color_suite || self.slui_color_suite
    }
}

fn unknown_option(flag: &str, value: &str) -> ScaffoldError {
    ScaffoldError::InvalidFlag {
        flag: flag.to_string(),
        reason: format!("unknown option '{}'", value),
    }
}

fn parse_features(names: &[String]) -> Result<Vec<SluiFeature>> {
    let mut features = Vec::new();
    for name in names {
        let Some(feature) = SluiFeature::parse(name) else {
            return Err(unknown_option(flag::SLUI_FEATURES, name));
        };
        if !features.contains(&feature) {
            features.push(feature);
        }
    }
    Ok(features)
}

/// Website template made with Vue and TailwindCSS
#[derive(Debug, Clone, Copy, Default)]
pub struct VueWebsite;

impl VueWebsite {
    pub fn plan_features(&self, features: &VueWebsiteFeatures) -> RenderPlan {
        let mut plan = RenderPlan::new("base");

        plan.fragment_if(features.router, "config/router")
            .fragment_if(features.slui, "config/slui")
            .fragment_if(features.uses_color_suite(), "config/color-suite")
            .fragment_if(features.vitest, "config/vitest")
            .fragment_if(features.verify_commits, "config/yorkie")
            .fragment_if(features.ssr, "config/ssr");

        plan.fragment("tsconfig/base")
            .fragment_if(features.vitest, "tsconfig/vitest");

        plan.fragment("code/base")
            .fragment_if(features.router, "code/router")
            .fragment_if(features.app_core, "code/core")
            .fragment_if(features.ssr, "code/ssr");

        plan.generate(synth::synthesize(features));
        plan
    }
}

impl TemplateDefinition for VueWebsite {
    fn id(&self) -> &'static str {
        "vue-website"
    }

    fn description(&self) -> &'static str {
        "Website template made with Vue and TailwindCSS."
    }

    fn features(&self) -> FeatureGraph {
        FeatureGraph::new(vec![
            FlagSpec::toggle(
                flag::CORE,
                "Add simple application core? Includes layouts, pages, and routing.",
                true,
            ),
            // The app core brings routing with it, so only ask without it
            FlagSpec::toggle(flag::ROUTER, "Add router?", true)
                .when(Condition::Is(flag::CORE, false)),
            FlagSpec::toggle(flag::SLUI, "Add ShiftLimits UI library?", true),
            FlagSpec::select(
                flag::SLUI_PRESET,
                "Select a preset for ShiftLimits UI library:",
                PRESET_CHOICES,
                "recommended",
            )
            .when(Condition::Is(flag::SLUI, true)),
            FlagSpec::multi_select(
                flag::SLUI_FEATURES,
                "Select the features to install from ShiftLimits UI library:",
                FEATURE_CHOICES,
                &[],
            )
            .when(Condition::Is(flag::SLUI, true))
            .when(Condition::Equals(flag::SLUI_PRESET, "custom")),
            FlagSpec::toggle(
                flag::SLUI_COLOR_SUITE,
                "Use your own color palette? Adds Color Suite editor.",
                false,
            )
            .when(Condition::Is(flag::SLUI, true)),
            FlagSpec::toggle(flag::COLOR_SUITE, "Add Color Suite?", true)
                .when(Condition::Is(flag::SLUI, false)),
            FlagSpec::toggle(flag::VITEST, "Add Vitest for Unit Testing?", true),
            FlagSpec::toggle(
                flag::VERIFY_COMMITS,
                "Verify that git commits adhere to conventional commit format?",
                true,
            ),
            FlagSpec::toggle(
                flag::SSR,
                "Add server-side rendering and static site generation?",
                false,
            ),
        ])
    }

    fn plan(&self, flags: &FeatureFlags) -> Result<RenderPlan> {
        let features = VueWebsiteFeatures::from_flags(flags)?;
        Ok(self.plan_features(&features))
    }
}
