//! Plain data describing schema objects.
//!
//! Definitions carry no behaviour beyond construction defaults and name
//! generation. Builders mutate them in place; expressions render them.

mod column;
mod constraint;
mod data;
mod foreign_key;
mod index;
mod table;

pub use column::{ColumnDefinition, ColumnType, DefaultValue, SystemMethod};
pub use constraint::{ConstraintDefinition, ConstraintType};
pub use data::{
    DeletionDataDefinition, InsertionDataDefinition, RowDefinition, UpdateDataDefinition,
};
pub use foreign_key::{ForeignKeyDefinition, Rule};
pub use index::{Direction, IndexColumnDefinition, IndexDefinition, IndexType};
pub use table::TableDefinition;
