//! Option records of the configurable plugins.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

/// `process.env.*` expression to replacement source text.
///
/// Values are inserted verbatim into the compiled code, so strings are
/// JSON-quoted while ports and flags stay raw.
pub type DefineTable = IndexMap<String, String>;

/// Inputs whose change invalidates the persistent cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentHash {
    pub root: PathBuf,
    pub directories: Vec<&'static str>,
    pub files: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentCacheOptions {
    /// One directory per target/mode combination
    pub cache_directory: PathBuf,
    pub records_path: PathBuf,
    pub environment_hash: EnvironmentHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderOptions {
    pub minimize: bool,
    pub debug: bool,
    pub context: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinifierOptions {
    pub comments: bool,
    pub passes: Vec<&'static str>,
}

impl Default for MinifierOptions {
    fn default() -> Self {
        Self {
            comments: false,
            passes: vec!["dead-code-elimination", "mangle-names", "simplify"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerOptions {
    pub banner: &'static str,
    /// Insert the banner as code rather than as a comment
    pub raw: bool,
    pub entry_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorChunkOptions {
    pub name: &'static str,
    /// Minimum number of chunks sharing a module before it moves into the
    /// vendor chunk; `None` means only the vendor entry's own modules move.
    pub min_chunks: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkManifestOptions {
    pub filename: String,
    /// Global variable the manifest is assigned to in the page
    pub manifest_variable: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetManifestOptions {
    pub filename: String,
    pub path: PathBuf,
    pub pretty_print: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStubOptions {
    /// Regex source of the replaced requests
    pub pattern: String,
    pub replacement: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleAnalyzerOptions {
    pub analyzer_mode: &'static str,
    pub open_analyzer: bool,
}
