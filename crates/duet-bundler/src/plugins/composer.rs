use std::path::Path;
use std::sync::Arc;

use duet_config::EnvSettings;
use path_clean::PathClean;

use super::options::{
    AssetManifestOptions, AssetStubOptions, BannerOptions, BundleAnalyzerOptions,
    ChunkManifestOptions, DefineTable, EnvironmentHash, LoaderOptions, MinifierOptions,
    PersistentCacheOptions, VendorChunkOptions,
};
use super::{PluginConfig, PluginEntry, PluginKind};
use crate::axes::{BuildAxes, Predicate};
use crate::chunk_ids::ChunkIdSanitizer;
use crate::pipeline::StyleExtraction;
use crate::progress::ProgressObserver;

/// Every plugin a build can carry, in output order, with its activation.
pub const CANDIDATES: [(PluginKind, Predicate); 20] = [
    (PluginKind::OfflineManifest, Predicate::ProdClient),
    (PluginKind::PersistentCache, Predicate::Dev),
    (PluginKind::LoaderOptions, Predicate::Dev),
    (PluginKind::LoaderOptions, Predicate::Prod),
    (PluginKind::Progress, Predicate::Always),
    (PluginKind::Minifier, Predicate::Prod),
    (PluginKind::CodeSplitting, Predicate::Prod),
    (PluginKind::ChunkIdSanitizing, Predicate::Always),
    (PluginKind::SourceMapSupport, Predicate::Server),
    (PluginKind::VendorChunk, Predicate::ProdClient),
    (PluginKind::AggressiveMerging, Predicate::ProdClient),
    (PluginKind::DigestHash, Predicate::ProdClient),
    (PluginKind::ChunkManifest, Predicate::ProdClient),
    (PluginKind::Define, Predicate::Always),
    (PluginKind::AssetManifest, Predicate::Client),
    (PluginKind::AssetStub, Predicate::Server),
    (PluginKind::NoErrors, Predicate::Dev),
    (PluginKind::HotModuleReplacement, Predicate::DevClient),
    (PluginKind::StyleExtraction, Predicate::ProdClient),
    (PluginKind::BundleAnalyzer, Predicate::ProdClient),
];

/// Requests replaced by a no-op module in server bundles
const STUBBED_ASSETS: &str =
    r"\.(eot|woff|woff2|ttf|otf|svg|png|jpg|jpeg|gif|webp|webm|mp4|mp3|ogg|html|pdf)$";

const SOURCE_MAP_SUPPORT: &str = r#"require("source-map-support").install();"#;

/// Builds the ordered plugin list of one build.
///
/// # Example
///
/// ```
/// use duet_bundler::{BuildAxes, EnvSettings, PluginComposer, PluginKind};
///
/// let settings = EnvSettings::default();
/// let axes = BuildAxes::resolve("client", "development").unwrap();
/// let plugins = PluginComposer::new(axes, &settings, "/app".as_ref()).compose();
///
/// assert!(plugins.iter().any(|p| p.kind == PluginKind::HotModuleReplacement));
/// assert!(plugins.iter().all(|p| p.kind != PluginKind::BundleAnalyzer));
/// ```
#[derive(Debug, Clone)]
pub struct PluginComposer<'a> {
    axes: BuildAxes,
    settings: &'a EnvSettings,
    root: &'a Path,
    node_env: &'static str,
    extraction: Option<Arc<StyleExtraction>>,
}

impl<'a> PluginComposer<'a> {
    pub fn new(axes: BuildAxes, settings: &'a EnvSettings, root: &'a Path) -> Self {
        Self {
            axes,
            settings,
            root,
            node_env: axes.mode().as_str(),
            extraction: None,
        }
    }

    /// Value inlined for `process.env.NODE_ENV` (defaults to the mode)
    pub fn with_node_env(mut self, node_env: &'static str) -> Self {
        self.node_env = node_env;
        self
    }

    /// Extraction instance shared with the stylesheet pipeline
    pub fn with_extraction(mut self, extraction: Option<Arc<StyleExtraction>>) -> Self {
        self.extraction = extraction;
        self
    }

    /// Enabled entries of [`CANDIDATES`], in candidate order.
    pub fn compose(&self) -> Vec<PluginEntry> {
        CANDIDATES
            .iter()
            .filter(|(_, activation)| self.axes.holds(*activation))
            .map(|&(kind, activation)| PluginEntry {
                kind,
                activation,
                config: self.config_for(kind),
            })
            .collect()
    }

    /// Replacement table of the define plugin.
    pub fn define_table(&self) -> DefineTable {
        let settings = self.settings;
        let mut table = DefineTable::new();
        let mut quoted = |key: &str, value: &str| {
            table.insert(format!("process.env.{key}"), quote(value));
        };

        quoted("TARGET", self.axes.target().as_str());
        quoted("MODE", self.axes.mode().as_str());
        quoted("NODE_ENV", self.node_env);
        quoted("APP_ROOT", &self.root.to_string_lossy());
        quoted("SERVER_BUNDLE_OUTPUT_PATH", &settings.server_bundle_output_path);
        quoted("CLIENT_BUNDLE_OUTPUT_PATH", &settings.client_bundle_output_path);
        quoted("CLIENT_PUBLIC_PATH", &settings.client_public_path);
        quoted("CLIENT_BUNDLE_ASSETS_FILENAME", &settings.client_bundle_assets_filename);
        quoted(
            "CLIENT_BUNDLE_CHUNK_MANIFEST_FILENAME",
            &settings.client_bundle_chunk_manifest_filename,
        );
        quoted("CLIENT_BUNDLE_HTTP_PATH", &settings.client_bundle_http_path);
        quoted("CLIENT_BUNDLE_CACHE_MAXAGE", &settings.client_bundle_cache_maxage);

        table.insert("process.env.SERVER_PORT".to_string(), settings.server_port.to_string());
        table.insert(
            "process.env.CLIENT_DEVSERVER_PORT".to_string(),
            settings.client_devserver_port.to_string(),
        );
        table.insert("process.env.DISABLE_SSR".to_string(), settings.disable_ssr.to_string());
        table
    }

    fn config_for(&self, kind: PluginKind) -> PluginConfig {
        let axes = &self.axes;
        match kind {
            PluginKind::PersistentCache => PluginConfig::PersistentCache(self.persistent_cache()),
            PluginKind::LoaderOptions => PluginConfig::LoaderOptions(LoaderOptions {
                minimize: axes.is_prod(),
                debug: axes.is_dev(),
                context: self.root.to_path_buf(),
            }),
            PluginKind::Progress => {
                PluginConfig::Progress(Arc::new(ProgressObserver::new(self.root)))
            }
            PluginKind::Minifier => PluginConfig::Minifier(MinifierOptions::default()),
            PluginKind::ChunkIdSanitizing => {
                PluginConfig::ChunkIds(Arc::new(ChunkIdSanitizer::new()))
            }
            PluginKind::SourceMapSupport => PluginConfig::Banner(BannerOptions {
                banner: SOURCE_MAP_SUPPORT,
                raw: true,
                entry_only: false,
            }),
            PluginKind::VendorChunk => PluginConfig::VendorChunk(VendorChunkOptions {
                name: "vendor",
                min_chunks: None,
            }),
            PluginKind::ChunkManifest => PluginConfig::ChunkManifest(ChunkManifestOptions {
                filename: self.settings.client_bundle_chunk_manifest_filename.clone(),
                manifest_variable: "CHUNK_MANIFEST",
            }),
            PluginKind::Define => PluginConfig::Define(self.define_table()),
            PluginKind::AssetManifest => PluginConfig::AssetManifest(AssetManifestOptions {
                filename: self.settings.client_bundle_assets_filename.clone(),
                path: self
                    .root
                    .join(&self.settings.client_bundle_output_path)
                    .clean(),
                pretty_print: true,
            }),
            PluginKind::AssetStub => PluginConfig::AssetStub(AssetStubOptions {
                pattern: STUBBED_ASSETS.to_string(),
                replacement: "node-noop",
            }),
            PluginKind::StyleExtraction => PluginConfig::StyleExtraction(
                self.extraction
                    .clone()
                    .unwrap_or_else(StyleExtraction::shared),
            ),
            PluginKind::BundleAnalyzer => PluginConfig::BundleAnalyzer(BundleAnalyzerOptions {
                analyzer_mode: "static",
                open_analyzer: false,
            }),
            PluginKind::OfflineManifest
            | PluginKind::CodeSplitting
            | PluginKind::AggressiveMerging
            | PluginKind::DigestHash
            | PluginKind::NoErrors
            | PluginKind::HotModuleReplacement => PluginConfig::None,
        }
    }

    fn persistent_cache(&self) -> PersistentCacheOptions {
        let cache_directory = self
            .root
            .join(".hardsource")
            .join(format!("{}-{}", self.axes.target(), self.axes.mode()));

        PersistentCacheOptions {
            records_path: cache_directory.join("records.json"),
            cache_directory,
            environment_hash: EnvironmentHash {
                root: self.root.to_path_buf(),
                directories: vec!["node_modules"],
                files: vec!["package.json", "yarn.lock"],
            },
        }
    }
}

fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::{Mode, Target};

    fn kinds(target: Target, mode: Mode) -> Vec<PluginKind> {
        let settings = EnvSettings::default();
        PluginComposer::new(BuildAxes::new(target, mode), &settings, Path::new("/app"))
            .compose()
            .into_iter()
            .map(|entry| entry.kind)
            .collect()
    }

    #[test]
    fn dev_client_plugins_in_order() {
        assert_eq!(
            kinds(Target::Client, Mode::Development),
            vec![
                PluginKind::PersistentCache,
                PluginKind::LoaderOptions,
                PluginKind::Progress,
                PluginKind::ChunkIdSanitizing,
                PluginKind::Define,
                PluginKind::AssetManifest,
                PluginKind::NoErrors,
                PluginKind::HotModuleReplacement,
            ]
        );
    }

    #[test]
    fn prod_server_plugins_in_order() {
        assert_eq!(
            kinds(Target::Server, Mode::Production),
            vec![
                PluginKind::LoaderOptions,
                PluginKind::Progress,
                PluginKind::Minifier,
                PluginKind::CodeSplitting,
                PluginKind::ChunkIdSanitizing,
                PluginKind::SourceMapSupport,
                PluginKind::Define,
                PluginKind::AssetStub,
            ]
        );
    }

    #[test]
    fn prod_client_carries_all_client_production_plugins() {
        let kinds = kinds(Target::Client, Mode::Production);
        assert_eq!(kinds.first(), Some(&PluginKind::OfflineManifest));
        assert_eq!(kinds.last(), Some(&PluginKind::BundleAnalyzer));
        for kind in [
            PluginKind::VendorChunk,
            PluginKind::AggressiveMerging,
            PluginKind::DigestHash,
            PluginKind::ChunkManifest,
            PluginKind::StyleExtraction,
        ] {
            assert!(kinds.contains(&kind), "{kind} missing");
        }
        assert!(!kinds.contains(&PluginKind::HotModuleReplacement));
        assert!(!kinds.contains(&PluginKind::PersistentCache));
    }

    #[test]
    fn loader_options_variant_follows_mode() {
        let settings = EnvSettings::default();
        for axes in BuildAxes::all() {
            let plugins = PluginComposer::new(axes, &settings, Path::new("/app")).compose();
            let variants: Vec<_> = plugins
                .iter()
                .filter_map(|entry| match &entry.config {
                    PluginConfig::LoaderOptions(options) => Some(options.clone()),
                    _ => None,
                })
                .collect();

            assert_eq!(variants.len(), 1);
            assert_eq!(variants[0].minimize, axes.is_prod());
            assert_eq!(variants[0].debug, axes.is_dev());
        }
    }

    #[test]
    fn define_table_quotes_strings_only() {
        let settings = EnvSettings::default();
        let axes = BuildAxes::new(Target::Server, Mode::Production);
        let table = PluginComposer::new(axes, &settings, Path::new("/app"))
            .with_node_env("development")
            .define_table();

        assert_eq!(table["process.env.TARGET"], "\"server\"");
        assert_eq!(table["process.env.MODE"], "\"production\"");
        assert_eq!(table["process.env.NODE_ENV"], "\"development\"");
        assert_eq!(table["process.env.APP_ROOT"], "\"/app\"");
        assert_eq!(table["process.env.CLIENT_BUNDLE_HTTP_PATH"], "\"/client/\"");
        assert_eq!(table["process.env.SERVER_PORT"], "1337");
        assert_eq!(table["process.env.CLIENT_DEVSERVER_PORT"], "7331");
        assert_eq!(table["process.env.DISABLE_SSR"], "false");
    }

    #[test]
    fn persistent_cache_is_per_target_and_mode() {
        let settings = EnvSettings::default();
        let axes = BuildAxes::new(Target::Server, Mode::Development);
        let options = PluginComposer::new(axes, &settings, Path::new("/app")).persistent_cache();
        assert_eq!(
            options.cache_directory,
            Path::new("/app/.hardsource/server-development")
        );
        assert_eq!(
            options.records_path,
            Path::new("/app/.hardsource/server-development/records.json")
        );
    }

    #[test]
    fn style_extraction_reuses_shared_instance() {
        let settings = EnvSettings::default();
        let extraction = StyleExtraction::shared();
        let axes = BuildAxes::new(Target::Client, Mode::Production);
        let plugins = PluginComposer::new(axes, &settings, Path::new("/app"))
            .with_extraction(Some(Arc::clone(&extraction)))
            .compose();

        let shared = plugins.iter().find_map(|entry| match &entry.config {
            PluginConfig::StyleExtraction(instance) => Some(instance),
            _ => None,
        });
        assert!(Arc::ptr_eq(shared.unwrap(), &extraction));
    }
}
