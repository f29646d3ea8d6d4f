//! Source files generated from the resolved `vue-website` features

use super::VueWebsiteFeatures;
use crate::codegen::preload::render_preload_link_fn;
use crate::codegen::{GeneratedFile, GeneratedFileSpec, Import};
use std::path::PathBuf;

const SLUI_PACKAGE: &str = "@shiftlimits/ui";
const COLOR_SUITE_PACKAGE: &str = "tailwindcss-color-suite";
const COLORS_CONFIG: &str = "require('./colors.config.js')";

/// Generate every file the template writes after its fragments
pub fn synthesize(features: &VueWebsiteFeatures) -> Vec<GeneratedFile> {
    let bootstrap = bootstrap_spec(features);
    let client = client_entry_spec(features, &bootstrap);
    let server = features
        .ssr
        .then(|| server_entry_spec(features, &bootstrap));
    let build = build_config_spec(features);
    let style = style_config_spec(features);

    let mut files = vec![
        generated(
            "bootstrap",
            "src/main.ts",
            render_bootstrap(&bootstrap),
            bootstrap,
        ),
        generated(
            "client-entry",
            "src/entry-client.ts",
            render_client_entry(&client),
            client,
        ),
    ];
    if let Some(server) = server {
        files.push(generated(
            "server-entry",
            "src/entry-node.ts",
            render_server_entry(&server),
            server,
        ));
    }
    files.push(generated(
        "build-config",
        "vite.config.ts",
        render_build_config(&build),
        build,
    ));
    files.push(generated(
        "style-config",
        "tailwind.config.js",
        render_style_config(&style),
        style,
    ));
    files
}

fn generated(
    name: &'static str,
    path: &str,
    contents: String,
    spec: GeneratedFileSpec,
) -> GeneratedFile {
    GeneratedFile {
        name,
        path: PathBuf::from(path),
        spec,
        contents,
    }
}

/// `src/main.ts`: creates the app and installs head management, the router,
/// and globally registered components
pub fn bootstrap_spec(features: &VueWebsiteFeatures) -> GeneratedFileSpec {
    let mut spec = GeneratedFileSpec::new();

    spec.import(Import::named("@vueuse/head", ["createHead"]))
        .statement("\tconst head = createHead()\n\tapp.use(head)")
        .export("app")
        .export("head");

    if features.router {
        spec.import(Import::named("./router", ["createAppRouter"]))
            .statement("\tconst router = createAppRouter()\n\tapp.use(router)")
            .export("router");
    }

    let components: Vec<&str> = features.slui_features.iter().map(|f| f.as_str()).collect();
    if features.slui && !components.is_empty() {
        spec.import(Import::named(SLUI_PACKAGE, components.iter().copied()));
        spec.statement(
            components
                .iter()
                .map(|c| format!("\tapp.component('{}', {})", c, c))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }

    spec
}

pub fn render_bootstrap(spec: &GeneratedFileSpec) -> String {
    format!(
        "import {{ createApp as createVueApp }} from 'vue'
import App from './App.vue'

{imports}

export async function createApp() {{
\tconst app = createVueApp(App)

{statements}

\treturn {{ {exports} }}
}}
",
        imports = spec.render_imports(),
        statements = spec.statements.join("\n\n"),
        exports = spec.exports.join(", "),
    )
}

/// `src/entry-client.ts`: mounts the app once bootstrap (and the router) are ready
pub fn client_entry_spec(
    features: &VueWebsiteFeatures,
    bootstrap: &GeneratedFileSpec,
) -> GeneratedFileSpec {
    let mut spec = GeneratedFileSpec::new();
    spec.import(Import::named("./main", ["createApp"]));

    if features.router {
        spec.statement("\trouter.isReady().then(() => {\n\t\tapp.mount('#app')\n\t})");
    } else {
        spec.statement("\tapp.mount('#app')");
    }

    for binding in &bootstrap.exports {
        spec.export(binding.clone());
    }
    spec
}

pub fn render_client_entry(spec: &GeneratedFileSpec) -> String {
    format!(
        "{imports}

createApp().then(({{ {bindings} }}) => {{
{statements}
}})
",
        imports = spec.render_imports(),
        bindings = spec.exports.join(", "),
        statements = spec.statements.join("\n"),
    )
}

/// `src/entry-node.ts`: renders a URL to HTML for the SSR dev server and the
/// static generator. Returns `[headTags, htmlAttrs, bodyAttrs, appHtml, preloadLinks]`.
pub fn server_entry_spec(
    features: &VueWebsiteFeatures,
    bootstrap: &GeneratedFileSpec,
) -> GeneratedFileSpec {
    let mut spec = GeneratedFileSpec::new();

    spec.import(Import::named("path", ["basename"]))
        .import(Import::named("vue/server-renderer", ["renderToString"]))
        .import(Import::named("@vueuse/head", ["renderHeadToString"]))
        .import(Import::named("./main", ["createApp"]));

    spec.statement(format!(
        "\tconst {{ {} }} = await createApp()",
        bootstrap.exports.join(", ")
    ));

    if features.router {
        spec.statement("\trouter.push(url)\n\tawait router.isReady()");
    }

    spec.statement(concat!(
        "\tconst ctx:{ modules?:Set<string> } = {}\n",
        "\tconst appHtml = await renderToString(app, ctx)",
    ));
    spec.statement("\tconst { headTags, htmlAttrs, bodyAttrs } = renderHeadToString(head)");
    spec.statement(concat!(
        "\tconst preloadLinks = manifest ",
        "? renderPreloadLinks(ctx.modules, manifest) : ''",
    ));

    for binding in [
        "headTags",
        "htmlAttrs",
        "bodyAttrs",
        "appHtml",
        "preloadLinks",
    ] {
        spec.export(binding);
    }
    spec
}

const RENDER_PRELOAD_LINKS_FN: &str = "function renderPreloadLinks(modules:Set<string>|undefined, manifest:Record<string, string[]>) {
\tlet links = ''
\tconst seen = new Set<string>()
\tmodules?.forEach((id) => {
\t\tconst files = manifest[id]
\t\tif (!files) return
\t\tfiles.forEach((file) => {
\t\t\tif (seen.has(file)) return
\t\t\tseen.add(file)
\t\t\tconst filename = basename(file)
\t\t\tfor (const dep of manifest[filename] ?? []) {
\t\t\t\tlinks += renderPreloadLink(dep)
\t\t\t\tseen.add(dep)
\t\t\t}
\t\t\tlinks += renderPreloadLink(file)
\t\t})
\t})
\treturn links
}";

pub fn render_server_entry(spec: &GeneratedFileSpec) -> String {
    format!(
        "{imports}

export async function render(url:string, manifest?:Record<string, string[]>) {{
{statements}

\treturn [{exports}]
}}

{links_fn}

{link_fn}
",
        imports = spec.render_imports(),
        statements = spec.statements.join("\n\n"),
        exports = spec.exports.join(", "),
        links_fn = RENDER_PRELOAD_LINKS_FN,
        link_fn = render_preload_link_fn(),
    )
}

/// `vite.config.ts`: imports are plugin modules, statements are plugin calls
pub fn build_config_spec(features: &VueWebsiteFeatures) -> GeneratedFileSpec {
    let mut spec = GeneratedFileSpec::new();
    spec.import(Import::with_default("@vitejs/plugin-vue", "vue"))
        .statement("vue()");

    if features.color_suite {
        spec.import(Import::named(COLOR_SUITE_PACKAGE, ["colorSuitePlugin"]))
            .statement("colorSuitePlugin()");
    } else if features.slui {
        let options = if features.slui_color_suite {
            "{ colorSuite: true }"
        } else {
            ""
        };
        spec.import(Import::with_default("@shiftlimits/ui/vite", "slui"))
            .statement(format!("slui({})", options));
    }

    spec
}

pub fn render_build_config(spec: &GeneratedFileSpec) -> String {
    format!(
        "import {{ defineConfig }} from 'vite'

{imports}

export default defineConfig({{
\tplugins: [
\t\t{plugins}
\t]
}})
",
        imports = spec.render_imports(),
        plugins = spec.statements.join(",\n\t\t"),
    )
}

/// `tailwind.config.js`: statements are the properties of the exported config
pub fn style_config_spec(features: &VueWebsiteFeatures) -> GeneratedFileSpec {
    let mut spec = GeneratedFileSpec::new();

    let mut content = vec!["./index.html", "./src/**/*.{js,ts,vue}"];
    if features.slui {
        content.push("./node_modules/@shiftlimits/ui/dist/**/*.{js,ts,vue}");
    }
    spec.statement(format!(
        "content: [{}]",
        content
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect::<Vec<_>>()
            .join(", ")
    ));

    if features.color_suite {
        spec.import(Import::named(COLOR_SUITE_PACKAGE, ["tailwindColors"]));
        spec.statement(format!(
            "theme: {{\n\t\tcolors: tailwindColors({}),\n\t\textend: {{}}\n\t}}",
            COLORS_CONFIG
        ));
    } else {
        spec.statement("theme: {\n\t\textend: {}\n\t}");
    }

    if features.slui {
        let options = if features.slui_color_suite {
            format!("({{ colors: {} }})", COLORS_CONFIG)
        } else {
            String::new()
        };
        spec.statement(format!(
            "plugins: [\n\t\trequire('{}/tailwind'){}\n\t]",
            SLUI_PACKAGE, options
        ));
    } else {
        spec.statement("plugins: []");
    }

    spec
}

pub fn render_style_config(spec: &GeneratedFileSpec) -> String {
    let requires = if spec.imports.is_empty() {
        String::new()
    } else {
        format!("{}\n\n", spec.render_requires())
    };
    format!(
        "{requires}module.exports = {{\n\t{properties}\n}}\n",
        properties = spec.statements.join(",\n\t"),
    )
}
