//! Structured description of generated source files
//!
//! Templates describe a generated file as ordered imports, statement blocks,
//! and exported bindings. The layout around those parts (function wrappers,
//! config object literals) belongs to the template that owns the file.

pub mod preload;

use std::fmt;
use std::path::PathBuf;

pub use preload::PreloadHint;

/// One import declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub source: String,
    pub default: Option<String>,
    pub named: Vec<String>,
}

impl Import {
    /// `import { a, b } from 'source'`
    pub fn named<I, S>(source: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source: source.to_string(),
            default: None,
            named: names.into_iter().map(Into::into).collect(),
        }
    }

    /// `import binding from 'source'`
    pub fn with_default(source: &str, binding: &str) -> Self {
        Self {
            source: source.to_string(),
            default: Some(binding.to_string()),
            named: Vec::new(),
        }
    }

    fn bindings(&self) -> String {
        let named = (!self.named.is_empty()).then(|| format!("{{ {} }}", self.named.join(", ")));
        match (&self.default, named) {
            (Some(default), Some(named)) => format!("{}, {}", default, named),
            (Some(default), None) => default.clone(),
            (None, Some(named)) => named,
            (None, None) => String::new(),
        }
    }

    /// Render as a CommonJS `require`
    pub fn to_require(&self) -> String {
        format!("const {} = require('{}')", self.bindings(), self.source)
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.default.is_none() && self.named.is_empty() {
            write!(f, "import '{}'", self.source)
        } else {
            write!(f, "import {} from '{}'", self.bindings(), self.source)
        }
    }
}

/// Ordered parts of a generated file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFileSpec {
    pub imports: Vec<Import>,
    pub statements: Vec<String>,
    pub exports: Vec<String>,
}

impl GeneratedFileSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn import(&mut self, import: Import) -> &mut Self {
        self.imports.push(import);
        self
    }

    pub fn statement(&mut self, block: impl Into<String>) -> &mut Self {
        self.statements.push(block.into());
        self
    }

    pub fn export(&mut self, binding: impl Into<String>) -> &mut Self {
        self.exports.push(binding.into());
        self
    }

    pub fn has_import_from(&self, source: &str) -> bool {
        self.imports.iter().any(|i| i.source == source)
    }

    /// Import lines joined by newlines, in declaration order
    pub fn render_imports(&self) -> String {
        self.imports
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `require` lines joined by newlines, in declaration order
    pub fn render_requires(&self) -> String {
        self.imports
            .iter()
            .map(Import::to_require)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A file produced by a template's synthesizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Logical name, e.g. "bootstrap"
    pub name: &'static str,
    /// Output path relative to the project root
    pub path: PathBuf,
    pub spec: GeneratedFileSpec,
    pub contents: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_rendering() {
        assert_eq!(
            Import::named("@vueuse/head", ["createHead"]).to_string(),
            "import { createHead } from '@vueuse/head'"
        );
        assert_eq!(
            Import::with_default("@vitejs/plugin-vue", "vue").to_string(),
            "import vue from '@vitejs/plugin-vue'"
        );
        let both = Import {
            source: "vue".to_string(),
            default: Some("Vue".to_string()),
            named: vec!["h".to_string(), "ref".to_string()],
        };
        assert_eq!(both.to_string(), "import Vue, { h, ref } from 'vue'");
        assert_eq!(
            Import::named("./style.css", Vec::<String>::new()).to_string(),
            "import './style.css'"
        );
    }

    #[test]
    fn test_require_rendering() {
        assert_eq!(
            Import::named("tailwindcss-color-suite", ["tailwindColors"]).to_require(),
            "const { tailwindColors } = require('tailwindcss-color-suite')"
        );
    }

    #[test]
    fn test_spec_keeps_insertion_order() {
        let mut spec = GeneratedFileSpec::new();
        spec.import(Import::named("b", ["b"]))
            .import(Import::named("a", ["a"]))
            .statement("second()")
            .statement("first()")
            .export("app");

        assert_eq!(
            spec.render_imports(),
            "import { b } from 'b'\nimport { a } from 'a'"
        );
        assert_eq!(spec.statements, vec!["second()", "first()"]);
        assert!(spec.has_import_from("a"));
        assert!(!spec.has_import_from("c"));
    }
}
