//! Resource hints for server-rendered pages

const PRELOAD: &str = r#"rel="preload""#;

/// Resource hint category for a built asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadHint {
    Module,
    Stylesheet,
    FontWoff,
    FontWoff2,
    Gif,
    Jpeg,
    Png,
}

impl PreloadHint {
    /// Every hint, in the order extensions are checked
    pub const ALL: [PreloadHint; 7] = [
        PreloadHint::Module,
        PreloadHint::Stylesheet,
        PreloadHint::FontWoff,
        PreloadHint::FontWoff2,
        PreloadHint::Gif,
        PreloadHint::Jpeg,
        PreloadHint::Png,
    ];

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            PreloadHint::Module => &[".js"],
            PreloadHint::Stylesheet => &[".css"],
            PreloadHint::FontWoff => &[".woff"],
            PreloadHint::FontWoff2 => &[".woff2"],
            PreloadHint::Gif => &[".gif"],
            PreloadHint::Jpeg => &[".jpg", ".jpeg"],
            PreloadHint::Png => &[".png"],
        }
    }

    fn matches(&self, file: &str) -> bool {
        self.extensions().iter().any(|ext| file.ends_with(ext))
    }

    /// Classify an asset file by extension. Unknown extensions get no hint.
    pub fn classify(file: &str) -> Option<PreloadHint> {
        Self::ALL.into_iter().find(|hint| hint.matches(file))
    }

    /// The `<link>` tag for `href`
    pub fn link(&self, href: &str) -> String {
        let (before, after) = match self {
            PreloadHint::Module => (r#"rel="modulepreload" crossorigin"#, ""),
            PreloadHint::Stylesheet => (r#"rel="stylesheet""#, ""),
            PreloadHint::FontWoff => (PRELOAD, r#" as="font" type="font/woff" crossorigin"#),
            PreloadHint::FontWoff2 => (PRELOAD, r#" as="font" type="font/woff2" crossorigin"#),
            PreloadHint::Gif => (PRELOAD, r#" as="image" type="image/gif""#),
            PreloadHint::Jpeg => (PRELOAD, r#" as="image" type="image/jpeg""#),
            PreloadHint::Png => (PRELOAD, r#" as="image" type="image/png""#),
        };
        format!(r#"<link {before} href="{href}"{after}>"#)
    }
}

/// The preload tag for one asset file, or an empty string when the
/// extension has no known hint
pub fn preload_link(file: &str) -> String {
    PreloadHint::classify(file)
        .map(|hint| hint.link(file))
        .unwrap_or_default()
}

/// TypeScript source of `renderPreloadLink(file)`, generated from the same
/// table as [`preload_link`]
pub fn render_preload_link_fn() -> String {
    let branches = PreloadHint::ALL
        .iter()
        .map(|hint| {
            let test = hint
                .extensions()
                .iter()
                .map(|ext| format!("file.endsWith('{}')", ext))
                .collect::<Vec<_>>()
                .join(" || ");
            format!("\tif ({}) return `{}`", test, hint.link("${file}"))
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "function renderPreloadLink(file:string) {{\n{}\n\treturn ''\n}}",
        branches
    )
}
