//! Movie domain models and the list-query specification.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::movies::MovieError;

/// Default page size when the caller gives no limit.
pub const DEFAULT_LIMIT: i64 = 10;

/// Row returned by movie queries. Soft-deleted rows never surface here.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MovieRow {
    pub id: i64,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub plot: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a movie or fully replacing one on update.
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub director: String,
    pub year: i32,
    pub plot: Option<String>,
}

/// Column a movie listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Title,
    Year,
    CreatedAt,
    Director,
}

impl SortField {
    /// Column name interpolated into ORDER BY. Values are fixed here, never
    /// taken from request input.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Year => "year",
            SortField::CreatedAt => "created_at",
            SortField::Director => "director",
        }
    }
}

impl FromStr for SortField {
    type Err = MovieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "title" => Ok(SortField::Title),
            "year" => Ok(SortField::Year),
            "created_at" => Ok(SortField::CreatedAt),
            "director" => Ok(SortField::Director),
            other => Err(MovieError::Validation(format!(
                "invalid sort_by value: {other}"
            ))),
        }
    }
}

/// Sort direction, validated independently of the sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = MovieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(MovieError::Validation(format!(
                "invalid sort_order value: {other}"
            ))),
        }
    }
}

/// Filter/sort/pagination specification for a movie listing.
///
/// Filters combine conjunctively; `None` filters are no-ops. Constructed per
/// request, never persisted.
#[derive(Debug, Clone)]
pub struct MovieQuery {
    /// Case-insensitive substring match on title.
    pub title: Option<String>,
    /// Case-insensitive substring match on director.
    pub director: Option<String>,
    /// Exact year match.
    pub year: Option<i32>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub limit: i64,
    pub offset: i64,
}

impl Default for MovieQuery {
    fn default() -> Self {
        Self {
            title: None,
            director: None,
            year: None,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_parses_all_recognized_values() {
        for (input, expected) in [
            ("id", SortField::Id),
            ("title", SortField::Title),
            ("year", SortField::Year),
            ("created_at", SortField::CreatedAt),
            ("director", SortField::Director),
        ] {
            assert_eq!(input.parse::<SortField>().unwrap(), expected);
        }
    }

    #[test]
    fn sort_field_rejects_unknown_and_direction_tokens() {
        assert!("rating".parse::<SortField>().is_err());
        // A direction token is not a field; the two are separate enums.
        assert!("desc".parse::<SortField>().is_err());
        assert!("Title".parse::<SortField>().is_err());
    }

    #[test]
    fn sort_order_parses_and_rejects() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("descending".parse::<SortOrder>().is_err());
        assert!("title".parse::<SortOrder>().is_err());
    }

    #[test]
    fn default_query_is_first_page_by_id_ascending() {
        let q = MovieQuery::default();
        assert_eq!(q.sort_by, SortField::Id);
        assert_eq!(q.sort_order, SortOrder::Asc);
        assert_eq!(q.limit, DEFAULT_LIMIT);
        assert_eq!(q.offset, 0);
        assert!(q.title.is_none() && q.director.is_none() && q.year.is_none());
    }
}
