//! `ORDER BY` helper shared by the listing queries.

/// Order a boxed query by `$column`, ascending unless `$direction` is
/// `Some(SortDirection::Desc)`.
macro_rules! order_by_direction {
    ($query:expr, $column:expr, $direction:expr) => {
        match $direction {
            Some(::pagination::SortDirection::Desc) => $query.order_by($column.desc()),
            Some(::pagination::SortDirection::Asc) | None => $query.order_by($column.asc()),
        }
    };
}

pub(crate) use order_by_direction;
