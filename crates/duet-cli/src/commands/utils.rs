//! Input loading shared by the commands.

use std::path::PathBuf;

use duet_bundler::{BuildAxes, ConfigFactory};
use duet_config::{ConfigDiscovery, ConfigureOptions, EnvSettings};
use tracing::debug;

use crate::cli::BuildArgs;
use crate::error::{CliError, Result};

/// Everything the factory needs for one invocation.
#[derive(Debug)]
pub struct ProjectInputs {
    pub axes: BuildAxes,
    pub root: PathBuf,
    pub factory: ConfigFactory,
    pub options: ConfigureOptions,
}

/// Resolve the axes, then load settings and options for the project.
///
/// Options come from `duet.toml` (`[options]`, then `[profiles.<mode>.options]`)
/// and are overridden by `flags`. Settings layer the process environment over
/// the `[env]` table and are validated before the factory is built.
///
/// # Errors
///
/// Fails on unknown axes before anything is read from disk, on a missing
/// root, and on unreadable or invalid configuration.
pub fn load_inputs(build: &BuildArgs, flags: &ConfigureOptions) -> Result<ProjectInputs> {
    let axes = BuildAxes::resolve(&build.target, &build.mode)?;

    if !build.root.is_dir() {
        return Err(CliError::RootNotFound(build.root.clone()));
    }
    let root = std::path::absolute(&build.root)?;

    let config = ConfigDiscovery::new(&root).load_with_profile(axes.mode().as_str())?;
    let settings = EnvSettings::from_environment(config.env)?;
    let options = config.options.overridden_by(flags);
    debug!(root = %root.display(), ?settings, "Loaded project inputs");

    Ok(ProjectInputs {
        axes,
        root,
        factory: ConfigFactory::validated(settings)?,
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use duet_bundler::{Mode, Target};
    use std::fs;
    use tempfile::TempDir;

    fn args(target: &str, mode: &str, root: &std::path::Path) -> BuildArgs {
        BuildArgs {
            target: target.to_string(),
            mode: mode.to_string(),
            root: root.to_path_buf(),
            light_bundle: None,
        }
    }

    #[test]
    fn flags_override_file_options() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("duet.toml"),
            "[options]\nentry = \"./src/server/app.js\"\nlightBundle = true\n",
        )
        .unwrap();

        let flags = ConfigureOptions::new().with_light_bundle(false);
        let inputs = load_inputs(&args("server", "production", temp.path()), &flags).unwrap();

        assert_eq!(inputs.axes, BuildAxes::new(Target::Server, Mode::Production));
        assert_eq!(inputs.options.entry.as_deref(), Some("./src/server/app.js"));
        assert_eq!(inputs.options.light_bundle, Some(false));
        assert!(inputs.root.is_absolute());
    }

    #[test]
    fn mode_profile_applies() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("duet.toml"),
            "[profiles.development.options]\ndebug = true\n",
        )
        .unwrap();

        let dev = load_inputs(
            &args("client", "development", temp.path()),
            &ConfigureOptions::default(),
        )
        .unwrap();
        let prod = load_inputs(
            &args("client", "production", temp.path()),
            &ConfigureOptions::default(),
        )
        .unwrap();

        assert!(dev.options.debug);
        assert!(!prod.options.debug);
    }

    #[test]
    fn invalid_axes_fail_before_root_check() {
        let err = load_inputs(
            &args("client", "staging", std::path::Path::new("/definitely/missing")),
            &ConfigureOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Bundler(_)));
    }

    #[test]
    fn missing_root_is_reported() {
        let err = load_inputs(
            &args("client", "production", std::path::Path::new("/definitely/missing")),
            &ConfigureOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::RootNotFound(_)));
    }
}
