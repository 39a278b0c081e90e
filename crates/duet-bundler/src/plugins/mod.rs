//! Plugin entries of a build configuration.
//!
//! [`PluginComposer`] filters the fixed candidate list ([`CANDIDATES`]) down
//! to the entries whose activation predicate holds for the build axes.

mod composer;
mod options;

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

pub use composer::{CANDIDATES, PluginComposer};
pub use options::{
    AssetManifestOptions, AssetStubOptions, BannerOptions, BundleAnalyzerOptions,
    ChunkManifestOptions, DefineTable, EnvironmentHash, LoaderOptions, MinifierOptions,
    PersistentCacheOptions, VendorChunkOptions,
};

use crate::axes::Predicate;
use crate::chunk_ids::ChunkIdSanitizer;
use crate::lifecycle::{BuildObserver, ChunkOrderHook};
use crate::pipeline::StyleExtraction;
use crate::progress::ProgressObserver;

/// Identity of a plugin in the ordered plugin list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    /// Offline/service-worker manifest
    OfflineManifest,
    /// Cross-build module cache
    PersistentCache,
    /// Global options handed to every transform handler
    LoaderOptions,
    Progress,
    Minifier,
    CodeSplitting,
    ChunkIdSanitizing,
    /// Installs source-map support at the top of server bundles
    SourceMapSupport,
    VendorChunk,
    AggressiveMerging,
    /// Content-digest chunk hashes
    DigestHash,
    ChunkManifest,
    /// Replaces `process.env.*` references with fixed values
    Define,
    AssetManifest,
    /// Replaces asset imports with a no-op module on the server
    AssetStub,
    NoErrors,
    HotModuleReplacement,
    StyleExtraction,
    BundleAnalyzer,
}

impl PluginKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluginKind::OfflineManifest => "offline-manifest",
            PluginKind::PersistentCache => "persistent-cache",
            PluginKind::LoaderOptions => "loader-options",
            PluginKind::Progress => "progress",
            PluginKind::Minifier => "minifier",
            PluginKind::CodeSplitting => "code-splitting",
            PluginKind::ChunkIdSanitizing => "chunk-id-sanitizing",
            PluginKind::SourceMapSupport => "source-map-support",
            PluginKind::VendorChunk => "vendor-chunk",
            PluginKind::AggressiveMerging => "aggressive-merging",
            PluginKind::DigestHash => "digest-hash",
            PluginKind::ChunkManifest => "chunk-manifest",
            PluginKind::Define => "define",
            PluginKind::AssetManifest => "asset-manifest",
            PluginKind::AssetStub => "asset-stub",
            PluginKind::NoErrors => "no-errors",
            PluginKind::HotModuleReplacement => "hot-module-replacement",
            PluginKind::StyleExtraction => "style-extraction",
            PluginKind::BundleAnalyzer => "bundle-analyzer",
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PluginKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Plugin-specific configuration
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PluginConfig {
    None,
    PersistentCache(PersistentCacheOptions),
    LoaderOptions(LoaderOptions),
    Progress(Arc<ProgressObserver>),
    Minifier(MinifierOptions),
    ChunkIds(Arc<ChunkIdSanitizer>),
    Banner(BannerOptions),
    VendorChunk(VendorChunkOptions),
    ChunkManifest(ChunkManifestOptions),
    Define(DefineTable),
    AssetManifest(AssetManifestOptions),
    AssetStub(AssetStubOptions),
    StyleExtraction(Arc<StyleExtraction>),
    BundleAnalyzer(BundleAnalyzerOptions),
}

impl PluginConfig {
    pub fn is_none(&self) -> bool {
        matches!(self, PluginConfig::None)
    }
}

/// An enabled plugin
#[derive(Debug, Clone, Serialize)]
pub struct PluginEntry {
    pub kind: PluginKind,
    /// Predicate the entry was selected by
    pub activation: Predicate,
    #[serde(skip_serializing_if = "PluginConfig::is_none")]
    pub config: PluginConfig,
}

impl PluginEntry {
    /// Lifecycle observer provided by this plugin, if any
    pub fn observer(&self) -> Option<Arc<dyn BuildObserver>> {
        match &self.config {
            PluginConfig::Progress(observer) => {
                Some(Arc::clone(observer) as Arc<dyn BuildObserver>)
            }
            _ => None,
        }
    }

    /// Chunk-order hook provided by this plugin, if any
    pub fn chunk_order_hook(&self) -> Option<Arc<dyn ChunkOrderHook>> {
        match &self.config {
            PluginConfig::ChunkIds(sanitizer) => {
                Some(Arc::clone(sanitizer) as Arc<dyn ChunkOrderHook>)
            }
            _ => None,
        }
    }
}
