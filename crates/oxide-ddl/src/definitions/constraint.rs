//! Table constraint definitions.

/// Kind of a table constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintType {
    /// PRIMARY KEY constraint.
    PrimaryKey,
    /// UNIQUE constraint.
    Unique,
    /// DEFAULT constraint.
    Default,
    /// CHECK constraint.
    Check,
}

impl ConstraintType {
    /// Keyword used when adding the constraint, if it can be added by name
    /// over a column list.
    #[must_use]
    pub const fn as_sql(self) -> Option<&'static str> {
        match self {
            Self::PrimaryKey => Some("PRIMARY KEY"),
            Self::Unique => Some("UNIQUE"),
            Self::Default | Self::Check => None,
        }
    }
}

/// A named table constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintDefinition {
    /// Constraint kind.
    pub constraint_type: ConstraintType,
    /// Constraint name; generated for primary and unique keys when empty.
    pub name: Option<String>,
    /// Owning table.
    pub table_name: String,
    /// Owning schema, if any.
    pub schema_name: Option<String>,
    /// Constrained columns (used when creating).
    pub columns: Vec<String>,
}

impl ConstraintDefinition {
    /// Creates an empty constraint of the given kind.
    #[must_use]
    pub const fn new(constraint_type: ConstraintType) -> Self {
        Self {
            constraint_type,
            name: None,
            table_name: String::new(),
            schema_name: None,
            columns: Vec::new(),
        }
    }

    /// Returns the constraint name, generating `PK_{table}` or
    /// `UQ_{table}_{columns}` when none was given.
    #[must_use]
    pub fn resolved_name(&self) -> Option<String> {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return Some(name.to_string());
        }
        match self.constraint_type {
            ConstraintType::PrimaryKey => Some(format!("PK_{}", self.table_name)),
            ConstraintType::Unique if !self.columns.is_empty() => {
                Some(format!("UQ_{}_{}", self.table_name, self.columns.join("_")))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_names() {
        let mut pk = ConstraintDefinition::new(ConstraintType::PrimaryKey);
        pk.table_name = "member".into();
        assert_eq!(pk.resolved_name().as_deref(), Some("PK_member"));

        let mut uq = ConstraintDefinition::new(ConstraintType::Unique);
        uq.table_name = "member".into();
        uq.columns = vec!["email".into(), "site".into()];
        assert_eq!(uq.resolved_name().as_deref(), Some("UQ_member_email_site"));

        let check = ConstraintDefinition::new(ConstraintType::Check);
        assert_eq!(check.resolved_name(), None);
    }
}
