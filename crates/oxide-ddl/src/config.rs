//! Migration settings loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::context::MigrationContext;
use crate::error::Result;
use crate::provider::DatabaseProvider;

/// Selects the active dialect and the providers a migration must stay
/// portable across.
///
/// ```rust
/// use oxide_ddl::{DatabaseProvider, MigrationSettings};
///
/// let settings = MigrationSettings::from_json(
///     r#"{ "provider": "sqlite", "supported_providers": ["sqlserver", "sqlite"] }"#,
/// )
/// .unwrap();
/// assert_eq!(settings.provider, DatabaseProvider::Sqlite);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationSettings {
    /// Provider whose dialect renders the migration.
    pub provider: DatabaseProvider,
    /// Providers the migration supports; empty means all.
    #[serde(default)]
    pub supported_providers: Vec<DatabaseProvider>,
}

impl MigrationSettings {
    /// Settings for `provider` supporting every provider.
    #[must_use]
    pub const fn new(provider: DatabaseProvider) -> Self {
        Self {
            provider,
            supported_providers: Vec::new(),
        }
    }

    /// Restricts the supported provider set.
    #[must_use]
    pub fn supporting(mut self, providers: &[DatabaseProvider]) -> Self {
        self.supported_providers = providers.to_vec();
        self
    }

    /// Parses settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::Settings`](crate::DdlError::Settings) for malformed
    /// JSON or an unknown provider name.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the settings to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::Settings`](crate::DdlError::Settings) if
    /// serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds an empty context using the catalog dialect for `provider`.
    #[must_use]
    pub fn into_context(self) -> MigrationContext {
        MigrationContext::for_provider(self.provider, &self.supported_providers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DdlError;

    #[test]
    fn test_supported_providers_default_to_all() {
        let settings = MigrationSettings::from_json(r#"{ "provider": "postgresql" }"#).unwrap();
        assert_eq!(settings, MigrationSettings::new(DatabaseProvider::PostgreSql));

        let ctx = settings.into_context();
        assert!(ctx.supported_providers().is_unrestricted());
        assert_eq!(ctx.current_provider(), DatabaseProvider::PostgreSql);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let result = MigrationSettings::from_json(r#"{ "provider": "oracle" }"#);
        assert!(matches!(result, Err(DdlError::Settings(_))));
    }

    #[test]
    fn test_provider_aliases_are_accepted() {
        let settings = MigrationSettings::from_json(
            r#"{ "provider": "postgres", "supported_providers": ["mssql", "SQLite3"] }"#,
        )
        .unwrap();
        assert_eq!(settings.provider, DatabaseProvider::PostgreSql);
        assert_eq!(
            settings.supported_providers,
            [DatabaseProvider::SqlServer, DatabaseProvider::Sqlite]
        );
        assert!(settings.to_json().unwrap().contains("\"postgresql\""));
    }

    #[test]
    fn test_json_uses_lowercase_names() {
        let settings = MigrationSettings::new(DatabaseProvider::SqlServer)
            .supporting(&[DatabaseProvider::SqlServer, DatabaseProvider::MySql]);
        let json = settings.to_json().unwrap();
        assert!(json.contains("\"sqlserver\""));
        assert!(json.contains("\"mysql\""));
        assert_eq!(MigrationSettings::from_json(&json).unwrap(), settings);
    }
}
