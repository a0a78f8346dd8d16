//! Foreign key definitions.

/// Referential action for ON DELETE / ON UPDATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rule {
    /// No clause is emitted; the database default applies.
    #[default]
    None,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
    /// Explicit NO ACTION.
    NoAction,
}

impl Rule {
    /// Returns the SQL action keyword, or `None` when no clause is emitted.
    #[must_use]
    pub const fn as_sql(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Cascade => Some("CASCADE"),
            Self::SetNull => Some("SET NULL"),
            Self::SetDefault => Some("SET DEFAULT"),
            Self::NoAction => Some("NO ACTION"),
        }
    }
}

/// A foreign key from `foreign_table(foreign_columns)` to
/// `primary_table(primary_columns)`. Column lists pair up positionally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForeignKeyDefinition {
    /// Constraint name; generated when absent.
    pub name: Option<String>,
    /// Referenced table.
    pub primary_table: String,
    /// Schema of the referenced table.
    pub primary_table_schema: Option<String>,
    /// Referencing table. Must be set before rendering.
    pub foreign_table: Option<String>,
    /// Schema of the referencing table.
    pub foreign_table_schema: Option<String>,
    /// Referenced columns.
    pub primary_columns: Vec<String>,
    /// Referencing columns.
    pub foreign_columns: Vec<String>,
    /// Action on delete.
    pub on_delete: Rule,
    /// Action on update.
    pub on_update: Rule,
}

impl ForeignKeyDefinition {
    /// Creates a named foreign key with empty column lists.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Returns the constraint name, generating
    /// `FK_{foreign}_{primary}_{first primary column}`.
    #[must_use]
    pub fn resolved_name(&self) -> Option<String> {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return Some(name.to_string());
        }
        let foreign = self.foreign_table.as_deref()?;
        let column = self.primary_columns.first()?;
        if self.primary_table.is_empty() {
            return None;
        }
        Some(format!("FK_{foreign}_{}_{column}", self.primary_table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_empty() {
        let fk = ForeignKeyDefinition::named("FK_a");
        assert!(fk.primary_columns.is_empty());
        assert!(fk.foreign_columns.is_empty());
        assert_eq!(fk.on_delete, Rule::None);
        assert!(fk.foreign_table.is_none());
    }

    #[test]
    fn test_generated_name() {
        let fk = ForeignKeyDefinition {
            primary_table: "member".into(),
            foreign_table: Some("login".into()),
            primary_columns: vec!["id".into()],
            foreign_columns: vec!["member_id".into()],
            ..ForeignKeyDefinition::default()
        };
        assert_eq!(fk.resolved_name().as_deref(), Some("FK_login_member_id"));
    }

    #[test]
    fn test_rule_sql() {
        assert_eq!(Rule::None.as_sql(), None);
        assert_eq!(Rule::SetNull.as_sql(), Some("SET NULL"));
    }
}
