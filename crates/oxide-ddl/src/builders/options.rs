//! Column stage methods shared by the column builders.
//!
//! Each macro expands inside an `impl` block of a column builder. The
//! builder supplies `as_type`, `column(&mut self) -> &mut ColumnDefinition`
//! and, for statements pushed alongside the column, `context()` and
//! `env()`.

/// `as_*` shorthands over `as_type`, returning `$typed`.
macro_rules! column_type_methods {
    ($typed:ty) => {
        pub fn as_int16(self) -> $typed {
            self.as_type(ColumnType::Smallint)
        }

        pub fn as_int32(self) -> $typed {
            self.as_type(ColumnType::Integer)
        }

        pub fn as_int64(self) -> $typed {
            self.as_type(ColumnType::Bigint)
        }

        pub fn as_float(self) -> $typed {
            self.as_type(ColumnType::Real)
        }

        pub fn as_double(self) -> $typed {
            self.as_type(ColumnType::Double)
        }

        /// Decimal with the dialect's default precision.
        pub fn as_decimal(self) -> $typed {
            self.as_type(ColumnType::Decimal {
                precision: None,
                scale: None,
            })
        }

        pub fn as_decimal_with(self, precision: u16, scale: u16) -> $typed {
            self.as_type(ColumnType::Decimal {
                precision: Some(precision),
                scale: Some(scale),
            })
        }

        pub fn as_fixed_length_string(self, length: u32) -> $typed {
            self.as_type(ColumnType::Char(Some(length)))
        }

        /// Variable-length string with the dialect's default length.
        pub fn as_string(self) -> $typed {
            self.as_type(ColumnType::Varchar(None))
        }

        pub fn as_string_with_length(self, length: u32) -> $typed {
            self.as_type(ColumnType::Varchar(Some(length)))
        }

        /// Unbounded text.
        pub fn as_text(self) -> $typed {
            self.as_type(ColumnType::Text)
        }

        pub fn as_binary(self) -> $typed {
            self.as_type(ColumnType::Blob)
        }

        pub fn as_date(self) -> $typed {
            self.as_type(ColumnType::Date)
        }

        pub fn as_time(self) -> $typed {
            self.as_type(ColumnType::Time)
        }

        pub fn as_date_time(self) -> $typed {
            self.as_type(ColumnType::DateTime)
        }

        pub fn as_date_time_offset(self) -> $typed {
            self.as_type(ColumnType::DateTimeOffset)
        }

        pub fn as_boolean(self) -> $typed {
            self.as_type(ColumnType::Boolean)
        }

        pub fn as_guid(self) -> $typed {
            self.as_type(ColumnType::Guid)
        }

        /// Dialect-specific type text used verbatim.
        pub fn as_custom(self, type_name: impl Into<String>) -> $typed {
            self.as_type(ColumnType::Custom(type_name.into()))
        }
    };
}

/// Nullability and default options.
macro_rules! column_value_options {
    () => {
        pub fn nullable(mut self) -> Self {
            self.column().nullable = true;
            self
        }

        pub fn not_nullable(mut self) -> Self {
            self.column().nullable = false;
            self
        }

        /// Defaults the column to a database function.
        pub fn with_default(mut self, method: SystemMethod) -> Self {
            self.column().default = Some(DefaultValue::Method(method));
            self
        }

        /// Defaults the column to a literal.
        pub fn with_default_value(mut self, value: impl ToSqlValue) -> Self {
            self.column().default = Some(DefaultValue::Literal(value.to_sql_value()));
            self
        }

        /// Names the default constraint on dialects that name defaults.
        pub fn with_default_constraint(mut self, name: impl Into<String>) -> Self {
            self.column().default_constraint_name = Some(name.into());
            self
        }
    };
}

/// Identity and single-column index options. Indexes are queued as
/// separate `CREATE INDEX` expressions.
macro_rules! column_index_options {
    () => {
        /// Marks the column as identity / auto-increment.
        pub fn identity(mut self) -> Self {
            self.column().identity = true;
            self
        }

        /// Queues a non-unique index over this column.
        pub fn indexed(self) -> Self {
            self.push_index(None, false)
        }

        pub fn indexed_named(self, name: impl Into<String>) -> Self {
            self.push_index(Some(name.into()), false)
        }

        /// Queues a unique index over this column.
        pub fn unique(self) -> Self {
            self.push_index(None, true)
        }

        pub fn unique_named(self, name: impl Into<String>) -> Self {
            self.push_index(Some(name.into()), true)
        }

        fn push_index(mut self, name: Option<String>, unique: bool) -> Self {
            let column = self.column();
            if unique {
                column.unique = true;
            } else {
                column.indexed = true;
            }
            let index = IndexDefinition {
                name,
                schema_name: column.schema_name.clone(),
                table_name: column.table_name.clone(),
                unique,
                columns: vec![IndexColumnDefinition::new(column.name.clone())],
                ..IndexDefinition::default()
            };
            let env = self.env().clone();
            self.context().push(CreateIndex::new(env, index));
            self
        }
    };
}

/// Foreign key options pushing a `CreateForeignKey` that refers to or from
/// this column, returning `$stage` for cascade rules.
macro_rules! column_foreign_key_options {
    ($stage:ident<$lt:lifetime>) => {
        /// References `primary_table.primary_column` from this column.
        pub fn foreign_key(
            self,
            name: impl Into<String>,
            primary_table: impl Into<String>,
            primary_column: impl Into<String>,
        ) -> $stage<$lt> {
            self.referencing(Some(name.into()), primary_table.into(), primary_column.into())
        }

        /// Same as `foreign_key` with a generated constraint name.
        pub fn foreign_key_to(
            self,
            primary_table: impl Into<String>,
            primary_column: impl Into<String>,
        ) -> $stage<$lt> {
            self.referencing(None, primary_table.into(), primary_column.into())
        }

        fn referencing(
            mut self,
            name: Option<String>,
            primary_table: String,
            primary_column: String,
        ) -> $stage<$lt> {
            let column = self.column();
            column.foreign_key = true;
            let fk = ForeignKeyDefinition {
                name,
                primary_table,
                primary_columns: vec![primary_column],
                foreign_table: Some(column.table_name.clone()),
                foreign_table_schema: column.schema_name.clone(),
                foreign_columns: vec![column.name.clone()],
                ..ForeignKeyDefinition::default()
            };
            self.push_foreign_key(fk)
        }

        /// Makes this column the target of a foreign key from
        /// `foreign_table.foreign_column`.
        pub fn referenced_by(
            mut self,
            name: impl Into<String>,
            foreign_table: impl Into<String>,
            foreign_column: impl Into<String>,
        ) -> $stage<$lt> {
            let column = self.column();
            column.foreign_key = true;
            let fk = ForeignKeyDefinition {
                name: Some(name.into()),
                primary_table: column.table_name.clone(),
                primary_table_schema: column.schema_name.clone(),
                primary_columns: vec![column.name.clone()],
                foreign_table: Some(foreign_table.into()),
                foreign_columns: vec![foreign_column.into()],
                ..ForeignKeyDefinition::default()
            };
            self.push_foreign_key(fk)
        }

        fn push_foreign_key(mut self, fk: ForeignKeyDefinition) -> $stage<$lt> {
            let env = self.env().without(NO_ALTER_CONSTRAINT);
            let foreign_key = self.context().push(CreateForeignKey::new(env, fk));
            $stage {
                column: self,
                foreign_key,
            }
        }
    };
}

/// Cascade stage of a foreign key declared from a column builder. Rules
/// apply to that foreign key only; each returns the column options.
macro_rules! foreign_key_rules_stage {
    ($(#[$meta:meta])* $stage:ident => $column:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $stage<'a> {
            column: $column<'a, HasType>,
            foreign_key: ExprId<CreateForeignKey>,
        }

        impl<'a> $stage<'a> {
            fn set_rules(
                mut self,
                on_delete: Option<Rule>,
                on_update: Option<Rule>,
            ) -> $column<'a, HasType> {
                let fk = &mut self.column.context().get_mut(self.foreign_key).foreign_key;
                if let Some(rule) = on_delete {
                    fk.on_delete = rule;
                }
                if let Some(rule) = on_update {
                    fk.on_update = rule;
                }
                self.column
            }

            pub fn on_delete(self, rule: Rule) -> $column<'a, HasType> {
                self.set_rules(Some(rule), None)
            }

            pub fn on_update(self, rule: Rule) -> $column<'a, HasType> {
                self.set_rules(None, Some(rule))
            }

            pub fn on_delete_or_update(self, rule: Rule) -> $column<'a, HasType> {
                self.set_rules(Some(rule), Some(rule))
            }

            /// Handle to the foreign key expression.
            #[must_use]
            pub const fn id(&self) -> ExprId<CreateForeignKey> {
                self.foreign_key
            }
        }
    };
}
