//! Database providers and provider sets.
//!
//! A [`DatabaseProvider`] names one relational backend. A [`ProviderSet`]
//! records which backends an expression may render for; the unrestricted
//! set accepts every provider.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DdlError;

/// A relational database dialect targeted by a migration.
///
/// Serializes as its canonical lowercase name and deserializes from any
/// name [`FromStr`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DatabaseProvider {
    /// Microsoft SQL Server.
    SqlServer,
    /// SQLite 3.
    Sqlite,
    /// PostgreSQL.
    PostgreSql,
    /// MySQL / MariaDB.
    MySql,
}

impl DatabaseProvider {
    /// Every provider this crate ships a dialect for.
    pub const ALL: [Self; 4] = [Self::SqlServer, Self::Sqlite, Self::PostgreSql, Self::MySql];

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SqlServer => "sqlserver",
            Self::Sqlite => "sqlite",
            Self::PostgreSql => "postgresql",
            Self::MySql => "mysql",
        }
    }
}

impl fmt::Display for DatabaseProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatabaseProvider {
    type Err = DdlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "postgresql" | "postgres" | "pg" => Ok(Self::PostgreSql),
            "mysql" | "mariadb" => Ok(Self::MySql),
            _ => Err(DdlError::UnknownProvider(s.to_string())),
        }
    }
}

impl TryFrom<String> for DatabaseProvider {
    type Error = DdlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The set of providers an expression is allowed to render for.
///
/// `ProviderSet::all()` (also the result of `ProviderSet::of(&[])`) accepts
/// every provider. A restricted set only accepts its members and may be
/// empty, in which case nothing renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderSet {
    restricted: Option<BTreeSet<DatabaseProvider>>,
}

impl ProviderSet {
    /// The unrestricted set.
    #[must_use]
    pub const fn all() -> Self {
        Self { restricted: None }
    }

    /// A set holding exactly `providers`; an empty slice means "all".
    #[must_use]
    pub fn of(providers: &[DatabaseProvider]) -> Self {
        if providers.is_empty() {
            Self::all()
        } else {
            Self {
                restricted: Some(providers.iter().copied().collect()),
            }
        }
    }

    /// Whether `provider` is a member.
    #[must_use]
    pub fn contains(&self, provider: DatabaseProvider) -> bool {
        self.restricted
            .as_ref()
            .is_none_or(|set| set.contains(&provider))
    }

    /// Whether this is the unrestricted set.
    #[must_use]
    pub const fn is_unrestricted(&self) -> bool {
        self.restricted.is_none()
    }

    /// Narrows the set to the members also present in `providers`.
    #[must_use]
    pub fn restrict_to(&self, providers: &[DatabaseProvider]) -> Self {
        let allowed: BTreeSet<DatabaseProvider> = providers.iter().copied().collect();
        let restricted = match &self.restricted {
            None => allowed,
            Some(current) => current.intersection(&allowed).copied().collect(),
        };
        Self {
            restricted: Some(restricted),
        }
    }

    /// Removes `excluded` from the set.
    #[must_use]
    pub fn without(&self, excluded: &[DatabaseProvider]) -> Self {
        let base = self
            .restricted
            .clone()
            .unwrap_or_else(|| DatabaseProvider::ALL.into_iter().collect());
        Self {
            restricted: Some(
                base.into_iter()
                    .filter(|provider| !excluded.contains(provider))
                    .collect(),
            ),
        }
    }

    /// Iterates the explicit members. The unrestricted set yields nothing.
    pub fn iter(&self) -> impl Iterator<Item = DatabaseProvider> + '_ {
        self.restricted.iter().flatten().copied()
    }
}

impl From<&[DatabaseProvider]> for ProviderSet {
    fn from(providers: &[DatabaseProvider]) -> Self {
        Self::of(providers)
    }
}
