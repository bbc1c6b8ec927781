use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of the configuration file looked up when no path is given.
pub const DEFAULT_CONFIG: &str = "tnode";

/// Prefix of environment overrides (`TNODE__NETWORK__NAME=localhost`).
pub const ENV_PREFIX: &str = "TNODE";

#[tnode_derive::tnode_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: a file source overlaid with environment overrides.
///
/// 1. **File**: an explicit `path` must exist; without one, `tnode.{toml,yaml,json,...}`
///    in the working directory is used when present and silently skipped otherwise.
/// 2. **Environment**: variables prefixed with `TNODE__`, nested with `__`
///    (e.g. `TNODE__DEPLOYMENTS__POLICY=reject` maps to `deployments.policy`).
///
/// # Errors
/// Returns [`ConfigError`] if an explicit file is missing, a source is malformed,
/// or the merged tree does not match `T`.
///
/// # Example
/// ```rust
/// use tnode_kernel::config::load_config;
/// use tnode_kernel::domain::config::DeployConfig;
///
/// let cfg: DeployConfig = load_config(None::<&str>).unwrap_or_default();
/// assert!(!cfg.network.name.is_empty());
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
