//! Script transpiler options.
//!
//! A script options record is the shared base, exactly one environment
//! profile (node or browser) and exactly one mode overlay.

use serde::Serialize;

use crate::axes::{BuildAxes, Mode, Target};

/// Syntax preset applied by the script transpiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "preset", rename_all = "kebab-case")]
pub enum SyntaxPreset {
    /// ES2015 lowering; `modules: false` keeps import/export for tree-shaking
    Es2015 { modules: bool },
    Es2016,
    Es2017,
    React,
}

/// Transform plugin applied by the script transpiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum ScriptPlugin {
    /// Markdown template literals compiled into components
    MarkdownInJs,
    /// Cherry-picks lodash path imports
    LodashImports,
    TemplateLiterals,
    ClassProperties,
    #[serde(rename_all = "camelCase")]
    ObjectRestSpread { use_built_ins: bool },
    /// Runtime helper/polyfill injection
    Runtime { regenerator: bool },
    CodeSplit { disabled: bool, mode: Target },
    /// Extracts internationalization message descriptors
    IntlMetadata,
    RemovePropTypes,
    LogDeprecated,
    HotReload,
}

/// Environment the transpiled code runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentProfile {
    pub runtime: Target,
    /// Keep ES module syntax so the bundler can tree-shake
    pub preserve_modules: bool,
}

impl EnvironmentProfile {
    pub fn node() -> Self {
        Self {
            runtime: Target::Server,
            preserve_modules: false,
        }
    }

    pub fn browser() -> Self {
        Self {
            runtime: Target::Client,
            preserve_modules: true,
        }
    }

    fn presets(&self) -> Vec<SyntaxPreset> {
        let mut presets = Vec::with_capacity(4);
        if self.preserve_modules {
            presets.push(SyntaxPreset::Es2015 { modules: false });
        }
        presets.extend([SyntaxPreset::Es2016, SyntaxPreset::Es2017, SyntaxPreset::React]);
        presets
    }

    fn plugins(&self, is_dev: bool) -> Vec<ScriptPlugin> {
        let mut plugins = vec![ScriptPlugin::MarkdownInJs, ScriptPlugin::LodashImports];
        if self.runtime == Target::Server {
            plugins.push(ScriptPlugin::TemplateLiterals);
        }
        plugins.extend([
            ScriptPlugin::ClassProperties,
            ScriptPlugin::ObjectRestSpread {
                use_built_ins: true,
            },
            ScriptPlugin::Runtime { regenerator: false },
            ScriptPlugin::CodeSplit {
                disabled: is_dev,
                mode: self.runtime,
            },
        ]);
        plugins
    }
}

/// Mode-specific additions on top of the base options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeOverlay {
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<bool>,
    pub plugins: Vec<ScriptPlugin>,
}

impl ModeOverlay {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Production => Self {
                mode,
                comments: Some(false),
                plugins: vec![ScriptPlugin::IntlMetadata, ScriptPlugin::RemovePropTypes],
            },
            Mode::Development => Self {
                mode,
                comments: None,
                plugins: vec![ScriptPlugin::LogDeprecated, ScriptPlugin::HotReload],
            },
        }
    }
}

/// Options of the script transpiler step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptOptions {
    /// Look up `.babelrc` files; always off, options are fully inline
    pub babelrc: bool,
    pub cache_directory: bool,
    pub compact: bool,
    pub source_maps: bool,
    pub comments: bool,
    pub profile: EnvironmentProfile,
    pub presets: Vec<SyntaxPreset>,
    pub plugins: Vec<ScriptPlugin>,
    pub overlay: ModeOverlay,
}

impl ScriptOptions {
    pub fn for_axes(axes: &BuildAxes) -> Self {
        let profile = if axes.is_node() {
            EnvironmentProfile::node()
        } else {
            EnvironmentProfile::browser()
        };

        Self {
            babelrc: false,
            cache_directory: true,
            compact: true,
            source_maps: true,
            comments: false,
            presets: profile.presets(),
            plugins: profile.plugins(axes.is_dev()),
            profile,
            overlay: ModeOverlay::for_mode(axes.mode()),
        }
    }

    /// Base plugins followed by the overlay plugins.
    pub fn effective_plugins(&self) -> impl Iterator<Item = &ScriptPlugin> {
        self.plugins.iter().chain(self.overlay.plugins.iter())
    }
}
