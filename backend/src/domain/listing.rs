//! Bridges listing filters into the domain error taxonomy.

use pagination::{Filter, ListQuery, SortableFields};

use super::Error;

/// Normalise `filter` for an entity, reporting failures as invalid input.
///
/// The returned error carries the filter's own message (for example
/// `Invalid SortBy field: price`) and is labelled with `op`.
pub(crate) fn normalize_filter(
    op: &'static str,
    filter: Filter,
    fields: &SortableFields,
) -> Result<ListQuery, Error> {
    filter
        .normalize(fields)
        .map_err(|err| Error::invalid(err.to_string()).with_op(op))
}
