//! Bundle-vs-external decisions for the server bundle.
//!
//! The client bundle always inlines its dependencies. The server bundle runs
//! on Node, so a dependency can instead be left for Node's own loader at run
//! time ("external"). [`DependencyClassifier`] makes that call per import
//! specifier by walking an ordered rule list; the first matching rule wins.

mod packages;

use std::fmt;

use serde::{Serialize, Serializer};

pub use packages::{ASSET_EXTENSIONS, ES_MODULE_PACKAGES, NODE_BUILTINS, UNSAFE_PACKAGES};

use crate::axes::BuildAxes;
use duet_config::ConfigureOptions;

/// Outcome of classifying an import specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Inline into the bundle
    Bundle,
    /// Leave for the runtime loader
    External,
    /// Not a real dependency; the engine drops it
    Ignore,
}

/// Rule that produced a [`Classification`], in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationRule {
    /// Empty or whitespace-only specifier
    Empty,
    /// Runtime-provided module (`fs`, `node:path`, ...)
    Builtin,
    /// Package known to break when bundled
    Unsafe,
    /// Relative path into the project (`./`, `../`)
    Relative,
    /// Package shipped as ES modules
    EsModule,
    /// Non-script file needing a dedicated pipeline
    LoaderAsset,
    /// Light bundle: third-party code stays external
    LightBundle,
    /// Full bundle: everything else is inlined
    FullBundle,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Bundle => "bundle",
            Classification::External => "external",
            Classification::Ignore => "ignore",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ClassificationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationRule::Empty => "empty",
            ClassificationRule::Builtin => "builtin",
            ClassificationRule::Unsafe => "unsafe",
            ClassificationRule::Relative => "relative",
            ClassificationRule::EsModule => "es-module",
            ClassificationRule::LoaderAsset => "loader-asset",
            ClassificationRule::LightBundle => "light-bundle",
            ClassificationRule::FullBundle => "full-bundle",
        }
    }

    pub fn classification(&self) -> Classification {
        match self {
            ClassificationRule::Empty => Classification::Ignore,
            ClassificationRule::Builtin
            | ClassificationRule::Unsafe
            | ClassificationRule::LightBundle => Classification::External,
            ClassificationRule::Relative
            | ClassificationRule::EsModule
            | ClassificationRule::LoaderAsset
            | ClassificationRule::FullBundle => Classification::Bundle,
        }
    }
}

/// Decides whether an import specifier is bundled or externalized.
///
/// # Example
///
/// ```
/// use duet_bundler::{Classification, DependencyClassifier};
///
/// let light = DependencyClassifier::new(true);
/// assert_eq!(light.classify("fs"), Classification::External);
/// assert_eq!(light.classify("./routes"), Classification::Bundle);
/// assert_eq!(light.classify("lodash"), Classification::External);
///
/// let full = DependencyClassifier::new(false);
/// assert_eq!(full.classify("lodash"), Classification::Bundle);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyClassifier {
    light_bundle: bool,
}

impl DependencyClassifier {
    pub fn new(light_bundle: bool) -> Self {
        Self { light_bundle }
    }

    /// Classifier for a build. `lightBundle` defaults to `true` in development
    /// and `false` in production.
    pub fn for_build(axes: &BuildAxes, options: &ConfigureOptions) -> Self {
        Self::new(options.light_bundle.unwrap_or(axes.is_dev()))
    }

    pub fn light_bundle(&self) -> bool {
        self.light_bundle
    }

    pub fn classify(&self, specifier: &str) -> Classification {
        self.explain(specifier).classification()
    }

    /// The first rule matching `specifier`.
    pub fn explain(&self, specifier: &str) -> ClassificationRule {
        if specifier.trim().is_empty() {
            return ClassificationRule::Empty;
        }

        let name = package_name(specifier);

        if specifier.starts_with("node:") || NODE_BUILTINS.contains(name) {
            ClassificationRule::Builtin
        } else if UNSAFE_PACKAGES.contains(name) {
            ClassificationRule::Unsafe
        } else if name.starts_with('.') {
            ClassificationRule::Relative
        } else if ES_MODULE_PACKAGES.contains(name) {
            ClassificationRule::EsModule
        } else if is_loader_specific_file(specifier) {
            ClassificationRule::LoaderAsset
        } else if self.light_bundle {
            ClassificationRule::LightBundle
        } else {
            ClassificationRule::FullBundle
        }
    }
}

/// Portion of `specifier` before the first `/`.
///
/// Scoped packages keep only the scope (`@scope/pkg` gives `@scope`).
pub fn package_name(specifier: &str) -> &str {
    match specifier.split_once('/') {
        Some((head, _)) => head,
        None => specifier,
    }
}

/// True when `request` ends in an extension with a dedicated pipeline
/// (fonts, images, media, documents, stylesheets).
pub fn is_loader_specific_file(request: &str) -> bool {
    request
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ASSET_EXTENSIONS.contains(ext))
}

/// Reference to a module provided by the runtime loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalModule {
    request: String,
}

impl ExternalModule {
    pub fn commonjs(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
        }
    }

    pub fn request(&self) -> &str {
        &self.request
    }
}

impl fmt::Display for ExternalModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "commonjs {}", self.request)
    }
}

impl Serialize for ExternalModule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Externals callback installed on server builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalsHook {
    #[serde(rename = "lightBundle", serialize_with = "serialize_light_bundle")]
    classifier: DependencyClassifier,
}

fn serialize_light_bundle<S: Serializer>(
    classifier: &DependencyClassifier,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(classifier.light_bundle())
}

impl ExternalsHook {
    pub fn new(classifier: DependencyClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &DependencyClassifier {
        &self.classifier
    }

    /// `Some` when the engine must leave `request` to the runtime loader.
    pub fn resolve(&self, request: &str) -> Option<ExternalModule> {
        match self.classifier.classify(request) {
            Classification::External => Some(ExternalModule::commonjs(request)),
            Classification::Bundle | Classification::Ignore => None,
        }
    }
}
