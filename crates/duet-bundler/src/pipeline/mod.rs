//! File-category transformation pipelines.
//!
//! Every recognized file category maps to an ordered list of transform steps
//! (a [`LoaderPipeline`]). The list depends only on the category and the
//! build axes; [`PipelineSelector::module_rules`] turns the full table into
//! the module rules of a build configuration.

mod script;
mod style;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

pub use script::{EnvironmentProfile, ModeOverlay, ScriptOptions, ScriptPlugin, SyntaxPreset};
pub use style::{
    CssModuleOptions, EXTRACTED_STYLESHEET, ExtractOptions, HASHED_IDENT, READABLE_IDENT,
    StyleExtraction,
};

use crate::axes::{BuildAxes, Predicate};

/// Recognized file categories, in module-rule order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileCategory {
    Script,
    TypedScript,
    Stylesheet,
    Json,
    /// YAML documents
    StructuredData,
    /// Fonts, images, media and documents copied to the output
    BinaryAsset,
    /// GraphQL documents
    QueryLanguage,
}

impl FileCategory {
    pub const ALL: [FileCategory; 7] = [
        FileCategory::Script,
        FileCategory::TypedScript,
        FileCategory::Stylesheet,
        FileCategory::Json,
        FileCategory::StructuredData,
        FileCategory::BinaryAsset,
        FileCategory::QueryLanguage,
    ];

    /// Extensions (without the dot) belonging to the category
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileCategory::Script => &["js", "jsx"],
            FileCategory::TypedScript => &["ts", "tsx"],
            FileCategory::Stylesheet => &["css"],
            FileCategory::Json => &["json"],
            FileCategory::StructuredData => &["yml", "yaml"],
            FileCategory::BinaryAsset => &[
                "eot", "woff", "woff2", "ttf", "otf", "svg", "png", "jpg", "jpeg", "jp2", "jpx",
                "jxr", "gif", "webp", "mp4", "mp3", "ogg", "pdf", "html",
            ],
            FileCategory::QueryLanguage => &["graphql", "gql"],
        }
    }

    /// Category of `path` by its extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let (_, ext) = path.rsplit_once('.')?;
        Self::ALL
            .into_iter()
            .find(|category| category.extensions().contains(&ext))
    }

    /// Regex source matching the category's file names
    pub fn pattern(&self) -> String {
        format!(r"\.({})$", self.extensions().join("|"))
    }

    /// Project-source categories; their rules skip dependencies and build output
    pub fn is_transpiled(&self) -> bool {
        matches!(
            self,
            FileCategory::Script | FileCategory::TypedScript | FileCategory::QueryLanguage
        )
    }
}

/// Identity of a transform handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    Script,
    TypedScript,
    /// Injects styles into the document at run time
    StyleInjector,
    CssModules,
    /// Class-name mapping only, for the server
    CssLocals,
    PostCss,
    ExtractStyles,
    Json,
    Yaml,
    File,
    GraphqlTag,
}

impl Handler {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handler::Script => "babel-loader",
            Handler::TypedScript => "awesome-typescript-loader",
            Handler::StyleInjector => "style-loader",
            Handler::CssModules => "css-loader",
            Handler::CssLocals => "css-loader/locals",
            Handler::PostCss => "postcss-loader",
            Handler::ExtractStyles => "extract-text-webpack-plugin/loader",
            Handler::Json => "json-loader",
            Handler::Yaml => "yaml-loader",
            Handler::File => "file-loader",
            Handler::GraphqlTag => "graphql-tag/loader",
        }
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Handler {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Options of the binary-asset step
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOptions {
    pub name: &'static str,
    /// Server builds reference assets but never write them
    pub emit_file: bool,
}

/// Step-specific options
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum StepOptions {
    None,
    Script(ScriptOptions),
    Css(CssModuleOptions),
    Extract(ExtractOptions),
    File(FileOptions),
}

impl StepOptions {
    pub fn is_none(&self) -> bool {
        matches!(self, StepOptions::None)
    }
}

/// One handler applied to a matched file
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TransformStep {
    #[serde(rename = "loader")]
    pub handler: Handler,
    #[serde(skip_serializing_if = "StepOptions::is_none")]
    pub options: StepOptions,
}

impl TransformStep {
    pub fn new(handler: Handler) -> Self {
        Self {
            handler,
            options: StepOptions::None,
        }
    }

    pub fn with_options(handler: Handler, options: StepOptions) -> Self {
        Self { handler, options }
    }
}

/// Ordered transform steps for one file category
pub type LoaderPipeline = Vec<TransformStep>;

/// Paths a module rule does not apply to
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Exclusion {
    /// Any path containing this component (e.g. `node_modules`)
    PathSegment(&'static str),
    /// Any path inside this directory
    Directory(PathBuf),
}

impl Exclusion {
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Exclusion::PathSegment(segment) => path
                .components()
                .any(|component| component.as_os_str() == *segment),
            Exclusion::Directory(dir) => path.starts_with(dir),
        }
    }
}

/// File-category to pipeline rule of a build configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRule {
    pub category: FileCategory,
    pub exclude: Vec<Exclusion>,
    pub pipeline: LoaderPipeline,
}

impl ModuleRule {
    /// Whether the rule applies to `path`.
    pub fn applies_to(&self, path: &Path) -> bool {
        let name = path.to_string_lossy();
        FileCategory::from_path(&name) == Some(self.category)
            && !self.exclude.iter().any(|exclusion| exclusion.matches(path))
    }
}

impl Serialize for ModuleRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut rule = serializer.serialize_struct("ModuleRule", 4)?;
        rule.serialize_field("category", &self.category)?;
        rule.serialize_field("test", &self.category.pattern())?;
        if self.exclude.is_empty() {
            rule.skip_field("exclude")?;
        } else {
            rule.serialize_field("exclude", &self.exclude)?;
        }
        rule.serialize_field("use", &self.pipeline)?;
        rule.end()
    }
}

/// Selects the transform pipeline of each file category for one build.
///
/// # Example
///
/// ```
/// use duet_bundler::{BuildAxes, FileCategory, Handler, PipelineSelector};
///
/// let selector = PipelineSelector::new(BuildAxes::resolve("server", "development").unwrap());
/// let steps = selector.select(FileCategory::Stylesheet);
/// assert_eq!(steps[0].handler, Handler::CssLocals);
/// ```
#[derive(Debug, Clone)]
pub struct PipelineSelector {
    axes: BuildAxes,
    extraction: Option<Arc<StyleExtraction>>,
}

impl PipelineSelector {
    pub fn new(axes: BuildAxes) -> Self {
        Self {
            axes,
            extraction: axes.only(Predicate::ProdClient, StyleExtraction::shared()),
        }
    }

    pub fn axes(&self) -> &BuildAxes {
        &self.axes
    }

    /// Extraction instance referenced by the stylesheet pipeline
    /// (production-client only). The extraction plugin must use this same
    /// instance.
    pub fn extraction(&self) -> Option<&Arc<StyleExtraction>> {
        self.extraction.as_ref()
    }

    pub fn select(&self, category: FileCategory) -> LoaderPipeline {
        let axes = &self.axes;
        match category {
            FileCategory::Script => vec![TransformStep::with_options(
                Handler::Script,
                StepOptions::Script(ScriptOptions::for_axes(axes)),
            )],
            FileCategory::TypedScript => vec![TransformStep::new(Handler::TypedScript)],
            FileCategory::Stylesheet => style::pipeline(axes, self.extraction.as_ref()),
            FileCategory::Json => vec![TransformStep::new(Handler::Json)],
            FileCategory::StructuredData => vec![TransformStep::new(Handler::Yaml)],
            FileCategory::BinaryAsset => vec![TransformStep::with_options(
                Handler::File,
                StepOptions::File(FileOptions {
                    name: axes.select(
                        Predicate::ProdClient,
                        "file-[hash:base62:8].[ext]",
                        "[name].[ext]",
                    ),
                    emit_file: axes.is_client(),
                }),
            )],
            FileCategory::QueryLanguage => vec![TransformStep::new(Handler::GraphqlTag)],
        }
    }

    /// One rule per category; transpiled categories carry `exclusions`.
    pub fn module_rules(&self, exclusions: &[Exclusion]) -> Vec<ModuleRule> {
        FileCategory::ALL
            .into_iter()
            .map(|category| ModuleRule {
                category,
                exclude: if category.is_transpiled() {
                    exclusions.to_vec()
                } else {
                    Vec::new()
                },
                pipeline: self.select(category),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::{Mode, Target};

    fn selector(target: Target, mode: Mode) -> PipelineSelector {
        PipelineSelector::new(BuildAxes::new(target, mode))
    }

    fn handlers(pipeline: &LoaderPipeline) -> Vec<Handler> {
        pipeline.iter().map(|step| step.handler).collect()
    }

    #[test]
    fn category_from_path() {
        assert_eq!(FileCategory::from_path("src/App.jsx"), Some(FileCategory::Script));
        assert_eq!(FileCategory::from_path("a.tsx"), Some(FileCategory::TypedScript));
        assert_eq!(FileCategory::from_path("i18n/en.yaml"), Some(FileCategory::StructuredData));
        assert_eq!(FileCategory::from_path("logo.svg"), Some(FileCategory::BinaryAsset));
        assert_eq!(FileCategory::from_path("q.gql"), Some(FileCategory::QueryLanguage));
        assert_eq!(FileCategory::from_path("README"), None);
        assert_eq!(FileCategory::from_path("styles.scss"), None);
    }

    #[test]
    fn pattern_lists_extensions() {
        assert_eq!(FileCategory::Script.pattern(), r"\.(js|jsx)$");
        assert_eq!(FileCategory::StructuredData.pattern(), r"\.(yml|yaml)$");
    }

    #[test]
    fn server_styles_produce_class_names_only() {
        for mode in Mode::ALL {
            let steps = selector(Target::Server, mode).select(FileCategory::Stylesheet);
            assert_eq!(handlers(&steps), vec![Handler::CssLocals, Handler::PostCss]);
        }
    }

    #[test]
    fn dev_client_styles_are_injected() {
        let steps = selector(Target::Client, Mode::Development).select(FileCategory::Stylesheet);
        assert_eq!(
            handlers(&steps),
            vec![Handler::StyleInjector, Handler::CssModules, Handler::PostCss]
        );
        assert!(matches!(
            &steps[1].options,
            StepOptions::Css(CssModuleOptions { local_ident_name, source_map: true, .. })
                if *local_ident_name == READABLE_IDENT
        ));
    }

    #[test]
    fn prod_client_styles_are_extracted() {
        let selector = selector(Target::Client, Mode::Production);
        let steps = selector.select(FileCategory::Stylesheet);
        assert_eq!(
            handlers(&steps),
            vec![Handler::ExtractStyles, Handler::CssModules, Handler::PostCss]
        );

        let StepOptions::Extract(extract) = &steps[0].options else {
            panic!("expected extraction options");
        };
        assert!(Arc::ptr_eq(&extract.extraction, selector.extraction().unwrap()));
        assert_eq!(extract.fallback, Handler::StyleInjector);
    }

    #[test]
    fn extraction_only_for_prod_client() {
        assert!(selector(Target::Client, Mode::Development).extraction().is_none());
        assert!(selector(Target::Server, Mode::Production).extraction().is_none());
        assert!(selector(Target::Client, Mode::Production).extraction().is_some());
    }

    #[test]
    fn asset_naming_and_emission() {
        let file_options = |target, mode| {
            match selector(target, mode).select(FileCategory::BinaryAsset).remove(0).options {
                StepOptions::File(options) => options,
                other => panic!("unexpected options {other:?}"),
            }
        };

        let prod_client = file_options(Target::Client, Mode::Production);
        assert_eq!(prod_client.name, "file-[hash:base62:8].[ext]");
        assert!(prod_client.emit_file);

        let dev_server = file_options(Target::Server, Mode::Development);
        assert_eq!(dev_server.name, "[name].[ext]");
        assert!(!dev_server.emit_file);

        assert_eq!(file_options(Target::Server, Mode::Production).name, "[name].[ext]");
    }

    #[test]
    fn single_step_categories() {
        for axes in BuildAxes::all() {
            let selector = PipelineSelector::new(axes);
            for category in [
                FileCategory::Json,
                FileCategory::StructuredData,
                FileCategory::BinaryAsset,
                FileCategory::QueryLanguage,
                FileCategory::TypedScript,
                FileCategory::Script,
            ] {
                assert_eq!(selector.select(category).len(), 1, "{category:?}");
            }
        }
    }

    #[test]
    fn selection_is_deterministic() {
        for axes in BuildAxes::all() {
            let selector = PipelineSelector::new(axes);
            for category in FileCategory::ALL {
                assert_eq!(selector.select(category), selector.select(category));
            }
        }
    }

    #[test]
    fn module_rules_apply_exclusions_to_sources() {
        let exclusions = vec![
            Exclusion::PathSegment("node_modules"),
            Exclusion::Directory(PathBuf::from("/app/build/client")),
        ];
        let rules = selector(Target::Client, Mode::Development).module_rules(&exclusions);

        assert_eq!(rules.len(), FileCategory::ALL.len());
        let script = &rules[0];
        assert!(script.applies_to(Path::new("/app/src/index.js")));
        assert!(!script.applies_to(Path::new("/app/node_modules/react/index.js")));
        assert!(!script.applies_to(Path::new("/app/build/client/main.js")));

        let json = rules
            .iter()
            .find(|rule| rule.category == FileCategory::Json)
            .unwrap();
        assert!(json.exclude.is_empty());
        assert!(json.applies_to(Path::new("/app/node_modules/pkg/package.json")));
    }

    #[test]
    fn rule_serializes_test_pattern() {
        let rules = selector(Target::Server, Mode::Production).module_rules(&[]);
        let value = serde_json::to_value(&rules[3]).unwrap();
        assert_eq!(value["category"], "json");
        assert_eq!(value["test"], r"\.(json)$");
        assert_eq!(value["use"][0]["loader"], "json-loader");
        assert!(value.get("exclude").is_none());
    }
}
