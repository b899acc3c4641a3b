//! The flat named-column view one query row produces.

use crate::{DatabaseError, DatabaseResult};
use rusqlite::types::ValueRef;
use rusqlite::Row;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// One result row, keyed by table-qualified column labels (`user.name`).
///
/// The labels come straight from the statement, so a query selecting for
/// materialization aliases its columns accordingly:
/// `SELECT u.name AS "user.name", u.age AS "user.age" …`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowView {
    columns: BTreeMap<String, Value>,
}

impl RowView {
    /// Captures a driver row, mapping SQL values onto JSON scalars
    /// (`NULL` → null, integers, reals, text; blobs become byte arrays).
    pub fn from_row(row: &Row<'_>) -> DatabaseResult<Self> {
        let names: Vec<String> = row
            .as_ref()
            .column_names()
            .iter()
            .map(|n| (*n).to_string())
            .collect();

        let mut columns = BTreeMap::new();
        for (idx, name) in names.into_iter().enumerate() {
            let value = match row.get_ref(idx)? {
                ValueRef::Null => Value::Null,
                ValueRef::Integer(i) => json!(i),
                ValueRef::Real(f) => json!(f),
                ValueRef::Text(t) => json!(String::from_utf8_lossy(t).into_owned()),
                ValueRef::Blob(b) => json!(b.to_vec()),
            };
            columns.insert(name, value);
        }
        Ok(Self { columns })
    }

    /// Assembles a view from label/value pairs — for tests and for sources
    /// that are not SQL rows.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            columns: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        }
    }

    /// Returns the raw value under a qualified label.
    #[must_use]
    pub fn get_object(&self, label: &str) -> Option<&Value> {
        self.columns.get(label)
    }

    /// Resolves and coerces one field by its table and column name.
    pub fn field<T: DeserializeOwned>(&self, table: &str, column: &str) -> DatabaseResult<T> {
        let label = format!("{table}.{column}");
        let value = self
            .columns
            .get(&label)
            .ok_or_else(|| DatabaseError::MissingColumn(label.clone()))?;
        serde_json::from_value(value.clone()).map_err(|_| DatabaseError::TypeMismatch {
            column: label,
            requested: std::any::type_name::<T>(),
        })
    }

    /// Iterates the qualified labels present in this view.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Returns the number of columns captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns whether the view captured no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
