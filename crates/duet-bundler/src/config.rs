//! The build configuration handed to the engine.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

use crate::axes::{BuildAxes, Predicate};
use crate::externals::{Classification, ExternalsHook};
use crate::failure::FailurePolicy;
use crate::lifecycle::LifecycleRegistry;
use crate::pipeline::{FileCategory, ModuleRule};
use crate::plugins::{DefineTable, PluginConfig, PluginEntry, PluginKind};

/// Chunk name to ordered module list
pub type EntryMap = IndexMap<String, Vec<String>>;

/// Runtime platform the engine compiles for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    Node,
    Web,
}

impl TargetPlatform {
    pub fn for_axes(axes: &BuildAxes) -> Self {
        axes.select(Predicate::Node, TargetPlatform::Node, TargetPlatform::Web)
    }

    /// package.json fields searched for a package's entry, most preferred first
    pub fn main_fields(&self) -> &'static [&'static str] {
        match self {
            TargetPlatform::Node => &["module", "jsnext:main", "webpack", "main"],
            TargetPlatform::Web => &[
                "module",
                "jsnext:main",
                "webpack",
                "browser",
                "web",
                "browserify",
                "main",
            ],
        }
    }
}

/// Output layout and naming templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSpec {
    pub path: PathBuf,
    pub filename: &'static str,
    pub chunk_filename: &'static str,
    pub public_path: String,
    pub library_target: &'static str,
    pub source_prefix: &'static str,
}

impl OutputSpec {
    /// Content-hashed names can be cached forever by browsers
    pub fn is_content_hashed(&self) -> bool {
        self.filename.contains("[chunkhash]") && self.chunk_filename.contains("[chunkhash]")
    }
}

/// Module resolution policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionSpec {
    pub main_fields: &'static [&'static str],
    pub extensions: &'static [&'static str],
}

impl ResolutionSpec {
    pub fn for_platform(platform: TargetPlatform) -> Self {
        Self {
            main_fields: platform.main_fields(),
            extensions: &[".js", ".jsx", ".ts", ".tsx", ".json"],
        }
    }
}

/// Module-scope globals the engine keeps real instead of mocking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeShims {
    #[serde(rename = "__dirname")]
    pub dirname: bool,
    #[serde(rename = "__filename")]
    pub filename: bool,
}

impl Default for NodeShims {
    fn default() -> Self {
        Self {
            dirname: true,
            filename: true,
        }
    }
}

/// What the engine reports after each build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOptions {
    pub colors: bool,
    pub reasons: bool,
    pub hash: bool,
    pub version: bool,
    pub timings: bool,
    pub chunks: bool,
    pub chunk_modules: bool,
    pub cached: bool,
    pub cached_assets: bool,
}

impl StatsOptions {
    pub fn verbose() -> Self {
        Self {
            colors: true,
            reasons: true,
            hash: true,
            version: true,
            timings: true,
            chunks: true,
            chunk_modules: true,
            cached: true,
            cached_assets: true,
        }
    }
}

/// Complete configuration of one build, produced by [`crate::configure`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfiguration {
    pub axes: BuildAxes,
    #[serde(rename = "target")]
    pub target_platform: TargetPlatform,
    /// `development` when `debug` was requested, otherwise the mode
    pub node_env: &'static str,
    pub entry: EntryMap,
    pub output: OutputSpec,
    pub resolve: ResolutionSpec,
    /// Present on server builds only; client builds bundle every dependency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub externals: Option<ExternalsHook>,
    #[serde(rename = "module")]
    pub module_rules: Vec<ModuleRule>,
    pub plugins: Vec<PluginEntry>,
    #[serde(rename = "node")]
    pub node_shims: NodeShims,
    pub stats: StatsOptions,
    pub profile: bool,
    pub bail: bool,
    pub devtool: &'static str,
    pub performance_hints: bool,
    #[serde(skip)]
    pub failure_policy: FailurePolicy,
}

impl BuildConfiguration {
    /// Observers and chunk-order hooks of the enabled plugins.
    pub fn lifecycle(&self) -> LifecycleRegistry {
        let mut registry = LifecycleRegistry::new();
        for entry in &self.plugins {
            if let Some(observer) = entry.observer() {
                registry.register_observer(observer);
            }
            if let Some(hook) = entry.chunk_order_hook() {
                registry.register_chunk_order_hook(hook);
            }
        }
        registry
    }

    pub fn plugin_kinds(&self) -> Vec<PluginKind> {
        self.plugins.iter().map(|entry| entry.kind).collect()
    }

    pub fn has_plugin(&self, kind: PluginKind) -> bool {
        self.plugins.iter().any(|entry| entry.kind == kind)
    }

    pub fn plugin(&self, kind: PluginKind) -> Option<&PluginEntry> {
        self.plugins.iter().find(|entry| entry.kind == kind)
    }

    pub fn rule(&self, category: FileCategory) -> Option<&ModuleRule> {
        self.module_rules
            .iter()
            .find(|rule| rule.category == category)
    }

    pub fn define_table(&self) -> Option<&DefineTable> {
        self.plugins.iter().find_map(|entry| match &entry.config {
            PluginConfig::Define(table) => Some(table),
            _ => None,
        })
    }

    /// How the engine treats `specifier` in this build.
    pub fn classify(&self, specifier: &str) -> Classification {
        match &self.externals {
            Some(hook) => hook.classifier().classify(specifier),
            None if specifier.trim().is_empty() => Classification::Ignore,
            None => Classification::Bundle,
        }
    }
}
