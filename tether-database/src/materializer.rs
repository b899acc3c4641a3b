//! Recursive reconstruction of typed instances from flat row views.

use crate::{DatabaseError, DatabaseResult, RowSchema, RowView};

/// A type that materializes from a named-column row view.
///
/// Implementations declare the table binding and field list in
/// [`schema`](Self::schema) and build themselves in
/// [`from_row`](Self::from_row): leaf fields through
/// [`RowView::field`], nested fields by calling [`materialize`] for the
/// nested type, which carries its own table binding.
///
/// Precondition: the target type graph must be acyclic — a nested type may
/// not (transitively) contain itself. An accidental cycle is unbounded
/// recursion; no runtime check is performed.
pub trait RowBound: Sized {
    /// The statically declared target shape.
    fn schema() -> RowSchema;

    /// Builds the instance from a row view.
    fn from_row(view: &RowView) -> DatabaseResult<Self>;
}

/// Materializes a `T` from a row view.
///
/// Every leaf column the schema declares must be present in the view; the
/// first absent one fails with [`DatabaseError::MissingColumn`] before any
/// field is built. Nested fields are checked the same way when their own
/// materialization recurses.
pub fn materialize<T: RowBound>(view: &RowView) -> DatabaseResult<T> {
    let schema = T::schema();
    for column in schema.leaf_columns() {
        let label = schema.qualified(column);
        if view.get_object(&label).is_none() {
            return Err(DatabaseError::MissingColumn(label));
        }
    }
    T::from_row(view)
}
