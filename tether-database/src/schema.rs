//! Statically declared target shapes for materialization.
//!
//! Each materializable type declares its table binding and field list once;
//! nothing is recomputed per call.

/// Whether a field resolves from a single column or recurses into a nested
/// type's own binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Scalar or text, resolved by `table.column` lookup.
    Leaf,
    /// A nested materializable type, built whole and assigned.
    Nested,
}

/// One declared field of a target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub column: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Shorthand for a leaf field.
    #[must_use]
    pub const fn leaf(column: &'static str) -> Self {
        Self {
            column,
            kind: FieldKind::Leaf,
        }
    }

    /// Shorthand for a nested field.
    #[must_use]
    pub const fn nested(column: &'static str) -> Self {
        Self {
            column,
            kind: FieldKind::Nested,
        }
    }
}

/// A target type's table binding plus its ordered field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSchema {
    pub table: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl RowSchema {
    /// Declares a schema.
    #[must_use]
    pub fn new(table: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self { table, fields }
    }

    /// The qualified label a leaf column resolves under.
    #[must_use]
    pub fn qualified(&self, column: &str) -> String {
        format!("{}.{column}", self.table)
    }

    /// Iterates the declared leaf columns.
    pub fn leaf_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|f| f.kind == FieldKind::Leaf)
            .map(|f| f.column)
    }
}
