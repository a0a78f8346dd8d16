//! Column definitions.

use crate::value::SqlValue;

/// Logical column type, mapped to dialect text by the syntax provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    // Integer types
    /// Small integer (2 bytes).
    Smallint,
    /// Integer (4 bytes).
    Integer,
    /// Big integer (8 bytes).
    Bigint,

    // Floating point
    /// Real (4-byte float).
    Real,
    /// Double precision (8-byte float).
    Double,
    /// Decimal with precision and scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },

    // String types
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    /// Unbounded text.
    Text,

    /// Binary large object.
    Blob,

    // Temporal types
    /// Date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    DateTime,
    /// Date and time with offset.
    DateTimeOffset,

    /// Boolean.
    Boolean,
    /// Globally unique identifier.
    Guid,
    /// Dialect-specific type text, emitted verbatim.
    Custom(String),
}

/// Database functions usable as column defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemMethod {
    /// A freshly generated GUID.
    NewGuid,
    /// Local current date and time.
    CurrentDateTime,
    /// UTC current date and time.
    CurrentUtcDateTime,
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// A literal value.
    Literal(SqlValue),
    /// A database function, rendered per dialect.
    Method(SystemMethod),
    /// Raw SQL expression, emitted verbatim.
    Expression(String),
}

/// A column being added to an existing table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Owning table.
    pub table_name: String,
    /// Owning schema, if any.
    pub schema_name: Option<String>,
    /// Declared type. `None` until the type stage of the builder runs.
    pub column_type: Option<ColumnType>,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Default value.
    pub default: Option<DefaultValue>,
    /// Name of the default constraint, for dialects that name them.
    pub default_constraint_name: Option<String>,
    /// Whether values are generated by the database.
    pub identity: bool,
    /// Whether this is a primary key.
    pub primary_key: bool,
    /// Name of the primary key constraint.
    pub primary_key_name: Option<String>,
    /// Whether a unique index covers this column.
    pub unique: bool,
    /// Whether a non-unique index covers this column.
    pub indexed: bool,
    /// Whether a foreign key references or is referenced by this column.
    pub foreign_key: bool,
}

impl ColumnDefinition {
    /// Creates a nullable, untyped column definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: String::new(),
            schema_name: None,
            column_type: None,
            nullable: true,
            default: None,
            default_constraint_name: None,
            identity: false,
            primary_key: false,
            primary_key_name: None,
            unique: false,
            indexed: false,
            foreign_key: false,
        }
    }

    /// Sets the declared type.
    #[must_use]
    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    /// Sets the owning table.
    #[must_use]
    pub fn on_table(mut self, table: impl Into<String>) -> Self {
        self.table_name = table.into();
        self
    }

    /// Returns the default constraint name, generating `DF_{table}_{column}`.
    #[must_use]
    pub fn default_constraint_name(&self) -> String {
        self.default_constraint_name
            .clone()
            .unwrap_or_else(|| format!("DF_{}_{}", self.table_name, self.name))
    }
}
