use config::{Config as ConfigBuilder, ConfigError, Environment, File, Map};
use folio_contact::{MailCredentials, RelaySettings};
use folio_notification::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: Option<String>,
    #[serde(default)]
    pub smtp_password: Option<String>,
    /// Where contact messages are delivered, falls back to the built-in
    /// address when unset
    #[serde(default)]
    pub contact_address: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: None,
            smtp_password: None,
            contact_address: None,
        }
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &self.smtp_password.as_ref().map(|_| "***"))
            .field("contact_address", &self.contact_address)
            .finish()
    }
}

impl EmailConfig {
    pub fn credentials(&self) -> Option<MailCredentials> {
        MailCredentials::from_parts(self.smtp_username.clone(), self.smtp_password.clone())
    }

    pub fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            credentials: self.credentials(),
            destination: self.contact_address.clone(),
        }
    }
}

fn default_smtp_host() -> String {
    DEFAULT_SMTP_HOST.to_string()
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON logs even outside production
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy environment variables (SMTP_USER, SMTP_PASS, CONTACT_TO_EMAIL)
    /// 2. Environment variables (FOLIO__EMAIL__SMTP_HOST, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        // Non-UTF-8 variables are skipped rather than aborting the load
        let vars = env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();

        Self::load_with_env(config_path, vars)
    }

    /// Same as [`Config::load`], reading variables from `vars` instead of the
    /// process environment
    pub fn load_with_env(
        config_path: Option<String>,
        vars: Map<String, String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| vars.get("CONFIG_PATH").cloned())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored if not found
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        // Variables the site was originally deployed with
        let smtp_user = vars.get("SMTP_USER").cloned();
        let smtp_pass = vars.get("SMTP_PASS").cloned();
        let contact_to = vars.get("CONTACT_TO_EMAIL").cloned();

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true)
                .source(Some(vars)),
        );

        if let Some(smtp_user) = smtp_user {
            builder = builder.set_override("email.smtp_username", smtp_user)?;
        }
        if let Some(smtp_pass) = smtp_pass {
            builder = builder.set_override("email.smtp_password", smtp_pass)?;
        }
        if let Some(contact_to) = contact_to {
            builder = builder.set_override("email.contact_address", contact_to)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    ///
    /// Missing SMTP credentials are not an error here, the relay reports them
    /// on every submission instead.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.email.smtp_host.is_empty() {
            return Err("SMTP host must not be empty".to_string());
        }
        if self.email.smtp_port == 0 {
            return Err("SMTP port must be greater than 0".to_string());
        }
        Ok(())
    }
}
