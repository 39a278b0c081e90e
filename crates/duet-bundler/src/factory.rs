//! The configuration factory.
//!
//! [`ConfigFactory::configure`] validates the axes, then assembles a
//! [`BuildConfiguration`] from the settings record, the options and the
//! project root. The only I/O is an existence check for the default entry
//! (and, for production-client builds, the default vendor entry) when the
//! options do not name one.

use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;

use duet_config::{ConfigureOptions, EnvSettings, validate_settings};
use path_clean::PathClean;
use tracing::{debug, info};

use crate::Result;
use crate::axes::{BuildAxes, Predicate};
use crate::config::{
    BuildConfiguration, EntryMap, NodeShims, OutputSpec, ResolutionSpec, StatsOptions,
    TargetPlatform,
};
use crate::externals::{DependencyClassifier, ExternalsHook};
use crate::failure::FailurePolicy;
use crate::pipeline::{Exclusion, PipelineSelector};
use crate::plugins::PluginComposer;

const HOT_RELOAD_PATCH: &str = "react-hot-loader/patch";

/// Existence check for optional entry modules.
///
/// Errors are treated as "absent" by the factory.
pub trait FileProbe: Send + Sync + fmt::Debug {
    fn is_file(&self, path: &Path) -> io::Result<bool>;
}

/// [`FileProbe`] backed by the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeProbe;

impl FileProbe for NativeProbe {
    fn is_file(&self, path: &Path) -> io::Result<bool> {
        Ok(std::fs::metadata(path)?.is_file())
    }
}

#[derive(Debug, Clone)]
pub struct ConfigFactory {
    settings: EnvSettings,
    probe: Arc<dyn FileProbe>,
}

impl Default for ConfigFactory {
    fn default() -> Self {
        Self::new(EnvSettings::default())
    }
}

impl ConfigFactory {
    pub fn new(settings: EnvSettings) -> Self {
        Self {
            settings,
            probe: Arc::new(NativeProbe),
        }
    }

    /// Like [`ConfigFactory::new`], rejecting settings that cannot produce a
    /// working build (empty output paths, port 0, relative HTTP path).
    pub fn validated(settings: EnvSettings) -> Result<Self> {
        validate_settings(&settings)?;
        Ok(Self::new(settings))
    }

    pub fn with_probe(mut self, probe: Arc<dyn FileProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn settings(&self) -> &EnvSettings {
        &self.settings
    }

    /// Build the configuration for `target` and `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] when `target` or `mode` is
    /// empty or unknown. Nothing is probed in that case.
    pub fn configure(
        &self,
        target: &str,
        mode: &str,
        options: &ConfigureOptions,
        root: impl AsRef<Path>,
    ) -> Result<BuildConfiguration> {
        let axes = BuildAxes::resolve(target, mode)?;
        Ok(self.configure_axes(axes, options, root.as_ref()))
    }

    /// Build the configuration for already validated axes.
    pub fn configure_axes(
        &self,
        axes: BuildAxes,
        options: &ConfigureOptions,
        root: &Path,
    ) -> BuildConfiguration {
        let settings = &self.settings;

        if !options.is_empty() {
            info!(?options, "Using options");
        }

        let classifier = DependencyClassifier::for_build(&axes, options);
        if classifier.light_bundle() && axes.is_server() {
            info!("Using light server bundle");
        }

        let node_env = if options.debug {
            "development"
        } else {
            axes.mode().as_str()
        };

        let exclusions = [
            Exclusion::PathSegment("node_modules"),
            Exclusion::Directory(root.join(&settings.client_bundle_output_path).clean()),
            Exclusion::Directory(root.join(&settings.server_bundle_output_path).clean()),
        ];

        let selector = PipelineSelector::new(axes);
        let module_rules = selector.module_rules(&exclusions);
        let plugins = PluginComposer::new(axes, settings, root)
            .with_node_env(node_env)
            .with_extraction(selector.extraction().cloned())
            .compose();

        let target_platform = TargetPlatform::for_axes(&axes);
        let config = BuildConfiguration {
            axes,
            target_platform,
            node_env,
            entry: self.entry_map(&axes, options, root),
            output: self.output(&axes, root),
            resolve: ResolutionSpec::for_platform(target_platform),
            externals: axes.only(Predicate::Server, ExternalsHook::new(classifier)),
            module_rules,
            plugins,
            node_shims: NodeShims::default(),
            stats: StatsOptions::verbose(),
            profile: axes.is_prod(),
            bail: axes.is_prod(),
            devtool: "source-map",
            performance_hints: axes.is_prod_client(),
            failure_policy: FailurePolicy::for_axes(&axes),
        };

        debug!(
            target = %axes.target(),
            mode = %axes.mode(),
            entries = config.entry.len(),
            plugins = config.plugins.len(),
            "Configured build"
        );
        config
    }

    fn entry_map(&self, axes: &BuildAxes, options: &ConfigureOptions, root: &Path) -> EntryMap {
        let mut entry = EntryMap::new();

        let mut main = Vec::new();
        if axes.is_dev_client() {
            main.push(HOT_RELOAD_PATCH.to_string());
            main.push(format!(
                "webpack-hot-middleware/client?reload=true&path=http://localhost:{}/__webpack_hmr",
                self.settings.client_devserver_port
            ));
        }
        main.extend(self.entry_module(options.entry.as_deref(), axes, root, "index.js"));
        if !main.is_empty() {
            entry.insert("main".to_string(), main);
        }

        if axes.is_prod_client() {
            if let Some(vendor) =
                self.entry_module(options.vendor.as_deref(), axes, root, "vendor.js")
            {
                entry.insert("vendor".to_string(), vec![vendor]);
            }
        }

        entry
    }

    /// The explicit module if non-empty, else `./src/<target>/<file>` when it
    /// exists under `root`.
    fn entry_module(
        &self,
        explicit: Option<&str>,
        axes: &BuildAxes,
        root: &Path,
        file: &str,
    ) -> Option<String> {
        if let Some(module) = explicit.filter(|module| !module.trim().is_empty()) {
            return Some(module.to_string());
        }

        let relative = format!("src/{}/{}", axes.target(), file);
        let path = root.join(&relative);
        match self.probe.is_file(&path) {
            Ok(true) => Some(format!("./{relative}")),
            Ok(false) => None,
            Err(err) => {
                debug!(
                    path = %path.display(),
                    error = %err,
                    "Entry probe failed, treating as absent"
                );
                None
            }
        }
    }

    fn output(&self, axes: &BuildAxes, root: &Path) -> OutputSpec {
        let settings = &self.settings;
        OutputSpec {
            path: root.join(settings.output_path(axes.is_client())).clean(),
            filename: axes.select(Predicate::ProdClient, "[name]-[chunkhash].js", "[name].js"),
            chunk_filename: axes.select(
                Predicate::ProdClient,
                "chunk-[name]-[chunkhash].js",
                "chunk-[name].js",
            ),
            public_path: axes.select_with(
                Predicate::Dev,
                || {
                    format!(
                        "http://localhost:{}{}",
                        settings.client_devserver_port, settings.client_bundle_http_path
                    )
                },
                || settings.client_bundle_http_path.clone(),
            ),
            library_target: axes.select(Predicate::Node, "commonjs2", "var"),
            source_prefix: "",
        }
    }
}

/// Build a configuration with default settings and the filesystem probe.
///
/// # Example
///
/// ```no_run
/// use duet_bundler::{ConfigureOptions, PluginKind, configure};
///
/// let config = configure("client", "production", &ConfigureOptions::default(), "/app").unwrap();
/// assert!(config.has_plugin(PluginKind::StyleExtraction));
/// ```
pub fn configure(
    target: &str,
    mode: &str,
    options: &ConfigureOptions,
    root: impl AsRef<Path>,
) -> Result<BuildConfiguration> {
    ConfigFactory::default().configure(target, mode, options, root)
}
