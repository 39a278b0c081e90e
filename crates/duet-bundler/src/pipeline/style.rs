//! Stylesheet pipelines.

use std::sync::Arc;

use serde::Serialize;

use super::{Handler, LoaderPipeline, StepOptions, TransformStep};
use crate::axes::BuildAxes;

/// Class names with a short content hash (production)
pub const HASHED_IDENT: &str = "[local]-[hash:base62:8]";

/// Class names derived from the file path (development)
pub const READABLE_IDENT: &str = "[path][name]-[local]";

/// Filename template of extracted stylesheets
pub const EXTRACTED_STYLESHEET: &str = "[name]-[contenthash:base62:8].css";

/// Options of the css-modules step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CssModuleOptions {
    pub source_map: bool,
    pub modules: bool,
    pub local_ident_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import: Option<bool>,
}

impl CssModuleOptions {
    /// Server side only needs the class-name mapping, never the CSS itself.
    fn locals(axes: &BuildAxes) -> Self {
        Self {
            source_map: false,
            modules: true,
            local_ident_name: if axes.is_prod() { HASHED_IDENT } else { READABLE_IDENT },
            minimize: None,
            import: None,
        }
    }

    fn client(local_ident_name: &'static str) -> Self {
        Self {
            source_map: true,
            modules: true,
            local_ident_name,
            minimize: Some(false),
            import: Some(false),
        }
    }
}

/// Stylesheet extraction shared by the extraction pipeline step and the
/// extraction plugin of production-client builds.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleExtraction {
    pub filename: &'static str,
    /// Extract from every chunk into one stylesheet, not just entry chunks
    pub all_chunks: bool,
}

impl Default for StyleExtraction {
    fn default() -> Self {
        Self {
            filename: EXTRACTED_STYLESHEET,
            all_chunks: true,
        }
    }
}

impl StyleExtraction {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// Options of the extraction step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOptions {
    pub extraction: Arc<StyleExtraction>,
    /// Used for styles the extraction cannot handle
    pub fallback: Handler,
}

pub(super) fn pipeline(
    axes: &BuildAxes,
    extraction: Option<&Arc<StyleExtraction>>,
) -> LoaderPipeline {
    let postcss = TransformStep::new(Handler::PostCss);

    if axes.is_server() {
        return vec![
            TransformStep::with_options(
                Handler::CssLocals,
                StepOptions::Css(CssModuleOptions::locals(axes)),
            ),
            postcss,
        ];
    }

    match extraction {
        Some(extraction) if axes.is_prod_client() => vec![
            TransformStep::with_options(
                Handler::ExtractStyles,
                StepOptions::Extract(ExtractOptions {
                    extraction: Arc::clone(extraction),
                    fallback: Handler::StyleInjector,
                }),
            ),
            TransformStep::with_options(
                Handler::CssModules,
                StepOptions::Css(CssModuleOptions::client(HASHED_IDENT)),
            ),
            postcss,
        ],
        _ => vec![
            TransformStep::new(Handler::StyleInjector),
            TransformStep::with_options(
                Handler::CssModules,
                StepOptions::Css(CssModuleOptions::client(READABLE_IDENT)),
            ),
            postcss,
        ],
    }
}
