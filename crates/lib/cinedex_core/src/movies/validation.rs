//! Movie field validation.
//!
//! Runs at the boundary, before any store call. A movie that fails here is
//! never observed by the store.

use super::MovieError;
use crate::models::movie::NewMovie;

/// Maximum length of title and director, matching the column width.
pub const NAME_MAX_LEN: usize = 255;

/// Earliest accepted release year (the first film on record).
pub const MIN_YEAR: i32 = 1888;

/// Latest accepted release year.
pub const MAX_YEAR: i32 = 2025;

/// Validate create/update fields: title and director non-empty and within
/// column width, year within [`MIN_YEAR`]..=[`MAX_YEAR`]. Plot is free text.
pub fn validate_fields(movie: &NewMovie) -> Result<(), MovieError> {
    if movie.title.is_empty() || movie.title.chars().count() > NAME_MAX_LEN {
        return Err(MovieError::Validation(format!(
            "title is required and must be at most {NAME_MAX_LEN} characters"
        )));
    }
    if movie.director.is_empty() || movie.director.chars().count() > NAME_MAX_LEN {
        return Err(MovieError::Validation(format!(
            "director is required and must be at most {NAME_MAX_LEN} characters"
        )));
    }
    validate_year(movie.year)
}

/// Validate a year value, shared by the create/update path and the list
/// year filter.
pub fn validate_year(year: i32) -> Result<(), MovieError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(MovieError::Validation(format!(
            "year must be between {MIN_YEAR} and {MAX_YEAR}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, director: &str, year: i32) -> NewMovie {
        NewMovie {
            title: title.into(),
            director: director.into(),
            year,
            plot: None,
        }
    }

    #[test]
    fn valid_fields_pass() {
        assert!(validate_fields(&movie("Inception", "Christopher Nolan", 2010)).is_ok());
    }

    #[test]
    fn empty_title_fails() {
        assert!(validate_fields(&movie("", "Christopher Nolan", 2010)).is_err());
    }

    #[test]
    fn empty_director_fails() {
        assert!(validate_fields(&movie("Inception", "", 2010)).is_err());
    }

    #[test]
    fn name_length_boundary_is_inclusive() {
        let at_limit = "a".repeat(NAME_MAX_LEN);
        let over_limit = "a".repeat(NAME_MAX_LEN + 1);
        assert!(validate_fields(&movie(&at_limit, "d", 2000)).is_ok());
        assert!(validate_fields(&movie(&over_limit, "d", 2000)).is_err());
        assert!(validate_fields(&movie("t", &over_limit, 2000)).is_err());
    }

    #[test]
    fn year_boundaries_are_inclusive() {
        assert!(validate_year(1887).is_err());
        assert!(validate_year(1888).is_ok());
        assert!(validate_year(2025).is_ok());
        assert!(validate_year(2026).is_err());
    }
}
