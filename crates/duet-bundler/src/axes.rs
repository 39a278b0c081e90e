//! Build axes: which side of the application is built, and how.
//!
//! - `Target`: the runtime a bundle is built for (`client` or `server`)
//! - `Mode`: the build flavor (`development` or `production`)
//! - `BuildAxes`: the validated pair plus every derived boolean flag
//! - `Predicate`: a named condition over the axes, used as plugin activation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Side of the application a bundle is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Browser bundle
    Client,
    /// Rendering-server bundle (runs on Node)
    Server,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::Client, Target::Server];

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Client => "client",
            Target::Server => "server",
        }
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Err(Error::missing(Axis::Target)),
            "client" => Ok(Target::Client),
            "server" => Ok(Target::Server),
            other => Err(Error::invalid(Axis::Target, other)),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Development, Mode::Production];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Err(Error::missing(Axis::Mode)),
            "development" => Ok(Mode::Development),
            "production" => Ok(Mode::Production),
            other => Err(Error::invalid(Axis::Mode, other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names an axis in configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Target,
    Mode,
}

impl Axis {
    pub fn allowed_values(&self) -> &'static [&'static str] {
        match self {
            Axis::Target => &["client", "server"],
            Axis::Mode => &["development", "production"],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Target => "target",
            Axis::Mode => "mode",
        })
    }
}

/// Validated target and mode with every derived flag precomputed.
///
/// Fields are private and only [`BuildAxes::new`] fills them, so the flags
/// always agree with `target` and `mode`.
///
/// ```compile_fail
/// use duet_bundler::{BuildAxes, Mode, Target};
///
/// let mut axes = BuildAxes::new(Target::Client, Mode::Production);
/// axes.is_dev = true;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildAxes {
    target: Target,
    mode: Mode,
    is_dev: bool,
    is_prod: bool,
    is_client: bool,
    is_server: bool,
    /// Server bundles run on Node
    is_node: bool,
    is_dev_client: bool,
    is_dev_server: bool,
    is_prod_client: bool,
    is_prod_server: bool,
}

impl BuildAxes {
    pub fn new(target: Target, mode: Mode) -> Self {
        let is_dev = mode == Mode::Development;
        let is_prod = !is_dev;
        let is_client = target == Target::Client;
        let is_server = !is_client;

        Self {
            target,
            mode,
            is_dev,
            is_prod,
            is_client,
            is_server,
            is_node: is_server,
            is_dev_client: is_dev && is_client,
            is_dev_server: is_dev && is_server,
            is_prod_client: is_prod && is_client,
            is_prod_server: is_prod && is_server,
        }
    }

    pub const fn target(&self) -> Target {
        self.target
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn is_dev(&self) -> bool {
        self.is_dev
    }

    pub const fn is_prod(&self) -> bool {
        self.is_prod
    }

    pub const fn is_client(&self) -> bool {
        self.is_client
    }

    pub const fn is_server(&self) -> bool {
        self.is_server
    }

    /// Server bundles run on Node
    pub const fn is_node(&self) -> bool {
        self.is_node
    }

    pub const fn is_dev_client(&self) -> bool {
        self.is_dev_client
    }

    pub const fn is_dev_server(&self) -> bool {
        self.is_dev_server
    }

    pub const fn is_prod_client(&self) -> bool {
        self.is_prod_client
    }

    pub const fn is_prod_server(&self) -> bool {
        self.is_prod_server
    }

    /// Validate raw target/mode strings.
    ///
    /// An empty string counts as "not provided". The target is checked first.
    ///
    /// # Example
    ///
    /// ```
    /// use duet_bundler::BuildAxes;
    ///
    /// let axes = BuildAxes::resolve("client", "production").unwrap();
    /// assert!(axes.is_prod_client());
    /// assert!(BuildAxes::resolve("client", "staging").is_err());
    /// ```
    pub fn resolve(target: &str, mode: &str) -> Result<Self> {
        let target: Target = target.parse()?;
        let mode: Mode = mode.parse()?;
        Ok(Self::new(target, mode))
    }

    /// All four target/mode combinations.
    pub fn all() -> impl Iterator<Item = BuildAxes> {
        Target::ALL
            .into_iter()
            .flat_map(|target| Mode::ALL.into_iter().map(move |mode| Self::new(target, mode)))
    }

    /// Whether `predicate` holds for these axes.
    pub fn holds(&self, predicate: Predicate) -> bool {
        match predicate {
            Predicate::Always => true,
            Predicate::Dev => self.is_dev,
            Predicate::Prod => self.is_prod,
            Predicate::Client => self.is_client,
            Predicate::Server => self.is_server,
            Predicate::Node => self.is_node,
            Predicate::DevClient => self.is_dev_client,
            Predicate::DevServer => self.is_dev_server,
            Predicate::ProdClient => self.is_prod_client,
            Predicate::ProdServer => self.is_prod_server,
        }
    }

    /// Pick `when_true` if `predicate` holds, `when_false` otherwise.
    ///
    /// Both values are already evaluated; use [`BuildAxes::select_with`] when
    /// the alternatives are expensive.
    pub fn select<T>(&self, predicate: Predicate, when_true: T, when_false: T) -> T {
        if self.holds(predicate) {
            when_true
        } else {
            when_false
        }
    }

    /// Like [`BuildAxes::select`], returning `None` instead of a fallback.
    pub fn only<T>(&self, predicate: Predicate, value: T) -> Option<T> {
        self.holds(predicate).then_some(value)
    }

    pub fn select_with<T>(
        &self,
        predicate: Predicate,
        when_true: impl FnOnce() -> T,
        when_false: impl FnOnce() -> T,
    ) -> T {
        if self.holds(predicate) {
            when_true()
        } else {
            when_false()
        }
    }
}

/// Named condition over [`BuildAxes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Predicate {
    Always,
    Dev,
    Prod,
    Client,
    Server,
    Node,
    DevClient,
    DevServer,
    ProdClient,
    ProdServer,
}

impl Predicate {
    /// True when the predicate can only hold for client builds
    pub fn is_client_only(&self) -> bool {
        matches!(
            self,
            Predicate::Client | Predicate::DevClient | Predicate::ProdClient
        )
    }

    /// True when the predicate can only hold for production builds
    pub fn is_production_only(&self) -> bool {
        matches!(
            self,
            Predicate::Prod | Predicate::ProdClient | Predicate::ProdServer
        )
    }

    /// True when the predicate can only hold for development builds
    pub fn is_development_only(&self) -> bool {
        matches!(
            self,
            Predicate::Dev | Predicate::DevClient | Predicate::DevServer
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_flags_are_consistent() {
        for axes in BuildAxes::all() {
            assert_eq!(axes.is_dev(), !axes.is_prod());
            assert_eq!(axes.is_client(), !axes.is_server());
            assert_eq!(axes.is_node(), axes.is_server());
            assert_eq!(axes.is_dev_client(), axes.is_dev() && axes.is_client());
            assert_eq!(axes.is_dev_server(), axes.is_dev() && axes.is_server());
            assert_eq!(axes.is_prod_client(), axes.is_prod() && axes.is_client());
            assert_eq!(axes.is_prod_server(), axes.is_prod() && axes.is_server());
        }
    }

    #[test]
    fn accessors_follow_constructor() {
        let axes = BuildAxes::new(Target::Server, Mode::Development);
        assert_eq!(axes.target(), Target::Server);
        assert_eq!(axes.mode(), Mode::Development);
        assert!(axes.is_dev_server());
        assert!(axes.holds(Predicate::Node));
        assert!(!axes.holds(Predicate::Prod));

        let copy = axes;
        assert_eq!(copy, BuildAxes::new(Target::Server, Mode::Development));
    }

    #[test]
    fn exactly_one_combined_flag_holds() {
        for axes in BuildAxes::all() {
            let set = [
                axes.is_dev_client(),
                axes.is_dev_server(),
                axes.is_prod_client(),
                axes.is_prod_server(),
            ]
            .iter()
            .filter(|flag| **flag)
            .count();
            assert_eq!(set, 1);
        }
    }

    #[test]
    fn resolve_rejects_missing_and_unknown() {
        assert!(matches!(
            BuildAxes::resolve("", "development"),
            Err(Error::Configuration {
                axis: Axis::Target,
                value: None
            })
        ));
        assert!(matches!(
            BuildAxes::resolve("client", ""),
            Err(Error::Configuration {
                axis: Axis::Mode,
                value: None
            })
        ));
        assert!(matches!(
            BuildAxes::resolve("browser", "development"),
            Err(Error::Configuration {
                axis: Axis::Target,
                value: Some(_)
            })
        ));
    }

    #[test]
    fn resolve_is_case_sensitive() {
        assert!(BuildAxes::resolve("Client", "development").is_err());
        assert!(BuildAxes::resolve("client", "PRODUCTION").is_err());
    }

    #[test]
    fn target_checked_before_mode() {
        let err = BuildAxes::resolve("nope", "nope").unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration {
                axis: Axis::Target,
                ..
            }
        ));
    }

    #[test]
    fn select_picks_by_predicate() {
        let axes = BuildAxes::new(Target::Client, Mode::Production);
        assert_eq!(axes.select(Predicate::ProdClient, "a", "b"), "a");
        assert_eq!(axes.select(Predicate::Server, "a", "b"), "b");
        assert_eq!(axes.only(Predicate::Dev, 1), None);
        assert_eq!(axes.only(Predicate::Always, 1), Some(1));
    }

    #[test]
    fn predicate_scopes() {
        assert!(Predicate::ProdClient.is_client_only());
        assert!(Predicate::ProdClient.is_production_only());
        assert!(!Predicate::Always.is_client_only());
        assert!(Predicate::DevServer.is_development_only());
        assert!(!Predicate::Server.is_production_only());
    }

    #[test]
    fn display_round_trips() {
        for target in Target::ALL {
            assert_eq!(target.to_string().parse::<Target>().unwrap(), target);
        }
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }
}
