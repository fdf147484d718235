use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Token type announced to the Snowflake SQL API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Authenticator {
    /// An OAuth access token.
    #[default]
    Oauth,
    /// A programmatic access token.
    Pat,
}

/// One named connection profile from the profiles file.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub account: String,
    pub user: String,
    pub role: String,
    pub warehouse: String,
    /// Database to connect with; also narrows the graph to this database.
    pub database: Option<String>,
    /// Schema to connect with; also narrows the graph to this schema.
    pub schema: Option<String>,
    #[serde(default)]
    pub authenticator: Authenticator,
}

/// Load one named profile from a TOML profiles file, e.g.
///
/// ```toml
/// [default]
/// account = "myorg-myaccount"
/// user = "ADMIN"
/// role = "ACCOUNTADMIN"
/// warehouse = "COMPUTE_WH"
/// database = "SALES"       # optional
/// schema = "PUBLIC"        # optional
/// authenticator = "pat"    # optional, defaults to "oauth"
/// ```
pub fn load_profile(path: &Path, name: &str) -> Result<Profile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read profiles file {}", path.display()))?;
    let mut profiles: HashMap<String, Profile> = toml::from_str(&contents)
        .with_context(|| format!("cannot parse profiles file {}", path.display()))?;
    match profiles.remove(name) {
        Some(profile) => Ok(profile),
        None => bail!("profile '{}' not found in {}", name, path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_profiles(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_named_profile() {
        let file = write_profiles(
            "[default]\n\
             account = \"acct\"\n\
             user = \"U\"\n\
             role = \"R\"\n\
             warehouse = \"W\"\n\
             database = \"D\"\n\
             \n\
             [prod]\n\
             account = \"acct2\"\n\
             user = \"U2\"\n\
             role = \"R2\"\n\
             warehouse = \"W2\"\n\
             authenticator = \"pat\"\n",
        );
        let profile = load_profile(file.path(), "default").unwrap();
        assert_eq!(profile.account, "acct");
        assert_eq!(profile.database.as_deref(), Some("D"));
        assert_eq!(profile.schema, None);
        assert_eq!(profile.authenticator, Authenticator::Oauth);

        let prod = load_profile(file.path(), "prod").unwrap();
        assert_eq!(prod.authenticator, Authenticator::Pat);
    }

    #[test]
    fn test_missing_profile_is_an_error() {
        let file = write_profiles(
            "[default]\naccount = \"a\"\nuser = \"u\"\nrole = \"r\"\nwarehouse = \"w\"\n",
        );
        let err = load_profile(file.path(), "staging").unwrap_err();
        assert!(err.to_string().contains("profile 'staging' not found"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_profile(Path::new("/nonexistent/profiles_db.toml"), "default").unwrap_err();
        assert!(err.to_string().contains("cannot read profiles file"));
    }
}
