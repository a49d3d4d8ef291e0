//! Listing primitives shared by the catalog's "get many" endpoints.
//!
//! A [`Filter`] is the raw, caller-supplied listing request (offset, limit,
//! sort field and sort direction). [`Filter::normalize`] applies defaults and
//! validates it against an entity's [`SortableFields`] allow-list, producing a
//! [`ListQuery`]. Only a [`ListQuery`] is handed to storage adapters: its sort
//! field is always one of the allow-listed `'static` names and its direction
//! is a closed enum, so adapters may map both straight onto an `ORDER BY`
//! clause.
//!
//! # Examples
//!
//! ```
//! use pagination::{Filter, SortDirection, SortableFields};
//!
//! const FIELDS: SortableFields = SortableFields::new(&["id", "title"], "id");
//!
//! let filter = Filter {
//!     sort_direction: "desc".to_owned(),
//!     ..Filter::default()
//! };
//! let query = filter.normalize(&FIELDS).expect("valid filter");
//! assert_eq!(query.limit(), 3);
//! assert_eq!(query.sort_by(), "id");
//! assert_eq!(query.direction(), Some(SortDirection::Desc));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size applied when the caller asks for a non-positive limit.
pub const DEFAULT_LIMIT: i64 = 3;

/// Raw listing request as decoded from a query string.
///
/// Field names on the wire are `offset`, `limit`, `sortby` and
/// `sortdirection`; every field is optional. A numeric field sent with an
/// empty value (`?limit=`) decodes as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Number of rows to skip.
    #[serde(default, deserialize_with = "empty_as_zero")]
    pub offset: i64,
    /// Maximum number of rows to return; non-positive means [`DEFAULT_LIMIT`].
    #[serde(default, deserialize_with = "empty_as_zero")]
    pub limit: i64,
    /// Sort field; empty means the entity's default sort field.
    #[serde(default, rename = "sortby")]
    pub sort_by: String,
    /// `ASC` or `DESC` in any case; empty leaves ordering to the store.
    #[serde(default, rename = "sortdirection")]
    pub sort_direction: String,
}

/// Decode an integer given either natively or as text, treating empty text
/// as zero.
fn empty_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct LenientInt;

    impl de::Visitor<'_> for LenientInt {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("an integer or an empty string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            if v.is_empty() {
                return Ok(0);
            }
            v.parse().map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(LenientInt)
}

/// Ordering direction accepted by listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Parse a caller-supplied direction.
    ///
    /// Input is upper-cased first. An empty value yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidSortDirection`] carrying the upper-cased
    /// value when it is neither `ASC` nor `DESC`.
    pub fn parse(raw: &str) -> Result<Option<Self>, FilterError> {
        let normalized = raw.to_uppercase();
        match normalized.as_str() {
            "" => Ok(None),
            "ASC" => Ok(Some(Self::Asc)),
            "DESC" => Ok(Some(Self::Desc)),
            _ => Err(FilterError::InvalidSortDirection { value: normalized }),
        }
    }

    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statically declared set of field names an entity may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortableFields {
    fields: &'static [&'static str],
    default_field: &'static str,
}

impl SortableFields {
    /// Declare an allow-list and the field used when no sort is requested.
    ///
    /// `default_field` is expected to be a member of `fields`.
    #[must_use]
    pub const fn new(fields: &'static [&'static str], default_field: &'static str) -> Self {
        Self {
            fields,
            default_field,
        }
    }

    /// Every allow-listed field name.
    #[must_use]
    pub const fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// Field used when the caller leaves `sortby` empty.
    #[must_use]
    pub const fn default_field(&self) -> &'static str {
        self.default_field
    }

    /// Return the allow-listed spelling of `name`, if present.
    ///
    /// Matching is exact and case-sensitive.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&'static str> {
        self.fields.iter().copied().find(|field| *field == name)
    }
}

/// Validation failures raised by [`Filter::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Direction is neither `ASC` nor `DESC`.
    #[error("Invalid SortDirection field: {value}")]
    InvalidSortDirection {
        /// Offending value, upper-cased.
        value: String,
    },
    /// Sort field is not in the entity's allow-list.
    #[error("Invalid SortBy field: {value}")]
    InvalidSortBy {
        /// Offending field name.
        value: String,
    },
    /// Offset is negative.
    #[error("Invalid Offset field: {value}")]
    NegativeOffset {
        /// Offending offset.
        value: i64,
    },
}

/// Normalised listing request that storage adapters can trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListQuery {
    offset: i64,
    limit: i64,
    sort_by: &'static str,
    direction: Option<SortDirection>,
}

impl ListQuery {
    /// Rows to skip; never negative.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }

    /// Rows to return; always positive.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// Allow-listed sort field.
    #[must_use]
    pub const fn sort_by(&self) -> &'static str {
        self.sort_by
    }

    /// Requested direction, if any.
    #[must_use]
    pub const fn direction(&self) -> Option<SortDirection> {
        self.direction
    }
}

impl Filter {
    /// Apply defaults and validate against `fields`.
    ///
    /// Steps, in order: a non-positive limit becomes [`DEFAULT_LIMIT`]; an
    /// empty sort field becomes the entity default; the direction is
    /// upper-cased and must be empty, `ASC` or `DESC`; the sort field must be
    /// allow-listed; the offset must not be negative.
    ///
    /// # Errors
    ///
    /// Returns the first [`FilterError`] encountered.
    pub fn normalize(self, fields: &SortableFields) -> Result<ListQuery, FilterError> {
        let limit = if self.limit <= 0 {
            DEFAULT_LIMIT
        } else {
            self.limit
        };
        let requested = if self.sort_by.is_empty() {
            fields.default_field()
        } else {
            self.sort_by.as_str()
        };
        let direction = SortDirection::parse(&self.sort_direction)?;
        let sort_by = fields
            .resolve(requested)
            .ok_or_else(|| FilterError::InvalidSortBy {
                value: requested.to_owned(),
            })?;
        if self.offset < 0 {
            return Err(FilterError::NegativeOffset { value: self.offset });
        }

        Ok(ListQuery {
            offset: self.offset,
            limit,
            sort_by,
            direction,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for filter normalisation.

    use super::*;
    use rstest::rstest;

    const FIELDS: SortableFields =
        SortableFields::new(&["id", "title", "sort", "created_at"], "sort");

    fn filter(limit: i64, sort_by: &str, sort_direction: &str) -> Filter {
        Filter {
            offset: 0,
            limit,
            sort_by: sort_by.to_owned(),
            sort_direction: sort_direction.to_owned(),
        }
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MIN)]
    fn non_positive_limit_uses_default(#[case] limit: i64) {
        let query = filter(limit, "", "").normalize(&FIELDS).expect("valid");
        assert_eq!(query.limit(), DEFAULT_LIMIT);
    }

    #[rstest]
    fn positive_limit_is_kept() {
        let query = filter(25, "", "").normalize(&FIELDS).expect("valid");
        assert_eq!(query.limit(), 25);
    }

    #[rstest]
    fn empty_sort_field_uses_entity_default() {
        let query = filter(0, "", "").normalize(&FIELDS).expect("valid");
        assert_eq!(query.sort_by(), "sort");
    }

    #[rstest]
    #[case("asc", Some(SortDirection::Asc))]
    #[case("Desc", Some(SortDirection::Desc))]
    #[case("DESC", Some(SortDirection::Desc))]
    #[case("", None)]
    fn direction_is_case_insensitive(
        #[case] raw: &str,
        #[case] expected: Option<SortDirection>,
    ) {
        let query = filter(0, "id", raw).normalize(&FIELDS).expect("valid");
        assert_eq!(query.direction(), expected);
    }

    #[rstest]
    #[case("up")]
    #[case("ascending")]
    #[case(" ASC")]
    fn unknown_direction_is_rejected_upper_cased(#[case] raw: &str) {
        let err = filter(0, "id", raw)
            .normalize(&FIELDS)
            .expect_err("invalid direction");
        assert_eq!(
            err,
            FilterError::InvalidSortDirection {
                value: raw.to_uppercase()
            }
        );
        assert!(err.to_string().starts_with("Invalid SortDirection field: "));
    }

    #[rstest]
    #[case("price")]
    #[case("ID")]
    #[case("id; DROP TABLE categories")]
    fn sort_field_outside_allow_list_is_rejected(#[case] field: &str) {
        let err = filter(10, field, "ASC")
            .normalize(&FIELDS)
            .expect_err("invalid sort field");
        assert_eq!(err.to_string(), format!("Invalid SortBy field: {field}"));
    }

    #[rstest]
    fn direction_is_checked_before_sort_field() {
        let err = filter(0, "nope", "sideways")
            .normalize(&FIELDS)
            .expect_err("invalid");
        assert!(matches!(err, FilterError::InvalidSortDirection { .. }));
    }

    #[rstest]
    fn negative_offset_is_rejected() {
        let mut raw = filter(0, "", "");
        raw.offset = -5;
        let err = raw.normalize(&FIELDS).expect_err("invalid offset");
        assert_eq!(err, FilterError::NegativeOffset { value: -5 });
    }

    #[rstest]
    fn resolved_field_is_the_allow_listed_static() {
        let query = filter(0, "created_at", "").normalize(&FIELDS).expect("valid");
        assert!(FIELDS.fields().contains(&query.sort_by()));
    }

    #[rstest]
    fn filter_decodes_wire_names() {
        let decoded: Filter = serde_json::from_value(serde_json::json!({
            "offset": 4,
            "limit": 2,
            "sortby": "title",
            "sortdirection": "desc",
        }))
        .expect("decodes");
        assert_eq!(decoded, Filter {
            offset: 4,
            limit: 2,
            sort_by: "title".to_owned(),
            sort_direction: "desc".to_owned(),
        });
    }

    #[rstest]
    #[case(serde_json::json!({"offset": "", "limit": ""}), 0, 0)]
    #[case(serde_json::json!({"offset": "2", "limit": "9"}), 2, 9)]
    #[case(serde_json::json!({"offset": -1, "limit": ""}), -1, 0)]
    fn numeric_fields_accept_text(
        #[case] wire: serde_json::Value,
        #[case] offset: i64,
        #[case] limit: i64,
    ) {
        let decoded: Filter = serde_json::from_value(wire).expect("decodes");
        assert_eq!((decoded.offset, decoded.limit), (offset, limit));
    }

    #[rstest]
    fn empty_limit_falls_back_to_default_page() {
        let decoded: Filter =
            serde_json::from_value(serde_json::json!({"limit": ""})).expect("decodes");
        let query = decoded.normalize(&FIELDS).expect("valid");
        assert_eq!(query.limit(), DEFAULT_LIMIT);
    }

    #[rstest]
    #[case(serde_json::json!({"limit": "ten"}))]
    #[case(serde_json::json!({"offset": u64::MAX}))]
    fn malformed_numbers_still_fail(#[case] wire: serde_json::Value) {
        assert!(serde_json::from_value::<Filter>(wire).is_err());
    }

    #[rstest]
    fn missing_wire_fields_default() {
        let decoded: Filter = serde_json::from_value(serde_json::json!({})).expect("decodes");
        assert_eq!(decoded, Filter::default());
    }
}
