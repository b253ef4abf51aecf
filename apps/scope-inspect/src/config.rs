//! Layered configuration: struct defaults, then the YAML file, then
//! environment overrides.

use std::path::Path;

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use org_scope::OrgScopeConfig;
use serde::Deserialize;
use static_org_plugin::StaticOrgPluginConfig;

/// Environment prefix, e.g. `SCOPE_INSPECT__ORG_SCOPE__MAX_TRAVERSAL_DEPTH=8`.
pub const ENV_PREFIX: &str = "SCOPE_INSPECT__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InspectConfig {
    pub org_scope: OrgScopeConfig,
    pub directory: StaticOrgPluginConfig,
}

impl InspectConfig {
    /// Loads the configuration. An explicitly given file must exist.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, is not valid YAML, or does not match
    /// the configuration schema.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load config")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        figment::Jail::expect_with(|_jail| {
            let cfg = InspectConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg.org_scope.max_traversal_depth, 64);
            assert!(cfg.directory.users.is_empty());
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "org.yaml",
                r"
org_scope:
  max_traversal_depth: 10
directory:
  departments: []
  users: []
",
            )?;
            jail.set_env("SCOPE_INSPECT__ORG_SCOPE__MAX_TRAVERSAL_DEPTH", "3");

            let cfg = InspectConfig::load(Some(Path::new("org.yaml"))).map_err(|e| e.to_string())?;
            assert_eq!(cfg.org_scope.max_traversal_depth, 3);
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = InspectConfig::load(Some(Path::new("/nonexistent/org.yaml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
