use serde::Deserialize;

/// Driver-wide settings, fixed when the driver is constructed.
///
/// Quoting always uses backslash escapes; every session the driver opens is
/// configured to read them, so there is no switch for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Render SQL NULL as `''` instead of the `NULL` token when quoting.
    pub convert_null_to_empty_string: bool,
}

impl DriverConfig {
    pub fn with_null_as_empty_string(mut self, enabled: bool) -> Self {
        self.convert_null_to_empty_string = enabled;
        self
    }
}

/// Everything needed to open one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectParams {
    /// `host`, `host:port` or `[ipv6]:port`.
    pub host: String,
    pub database: String,
    pub username: String,
    pub password: String,
    /// Client encoding applied right after connecting. Only UTF8 (or an
    /// alias of it) is accepted.
    pub charset: Option<String>,
    /// `;`-separated statements run once the session is up.
    pub bootstrap: Option<String>,
}

impl ConnectParams {
    pub fn new(
        host: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            database: database.into(),
            username: username.into(),
            password: password.into(),
            charset: None,
            bootstrap: None,
        }
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn with_bootstrap(mut self, bootstrap: impl Into<String>) -> Self {
        self.bootstrap = Some(bootstrap.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DriverConfig::default();
        assert!(!config.convert_null_to_empty_string);
    }

    #[test]
    fn test_driver_config_from_toml() {
        let config: DriverConfig = toml::from_str("convert_null_to_empty_string = true").unwrap();
        assert!(config.convert_null_to_empty_string);
    }

    #[test]
    fn test_driver_config_rejects_escape_switch() {
        // standard-string quoting is not supported, so the key must not be silently ignored
        let parsed = toml::from_str::<DriverConfig>("backslash_escapes = false");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_connect_params_from_toml() {
        const SAMPLE: &str = r#"
host = "db.internal:5433"
database = "app"
username = "app_user"
password = "secret"
charset = "UTF8"
bootstrap = "SET search_path TO app; SET timezone TO 'UTC'"
"#;
        let params: ConnectParams = toml::from_str(SAMPLE).unwrap();
        assert_eq!(params.host, "db.internal:5433");
        assert_eq!(params.database, "app");
        assert_eq!(params.charset.as_deref(), Some("UTF8"));
        assert_eq!(
            params.bootstrap.as_deref(),
            Some("SET search_path TO app; SET timezone TO 'UTC'")
        );
    }

    #[test]
    fn test_builder() {
        let params = ConnectParams::new("localhost", "app", "u", "p").with_charset("LATIN1");
        assert_eq!(params.charset.as_deref(), Some("LATIN1"));
        assert!(params.bootstrap.is_none());
    }
}
