//! Movie service — boundary validation plus orchestration of store queries.
//!
//! Validation failures are recovered here and never reach the store.

use cinedex_core::models::movie::{MovieQuery, NewMovie};
use cinedex_core::movies::{queries, validation};
use sqlx::PgPool;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{
    BulkInsertRequest, CreateMovieRequest, CreateMovieResponse, ListMoviesParams,
    MovieListResponse, MovieResponse, UpdateMovieRequest,
};

/// List movies matching the given parameters.
pub async fn list(pool: &PgPool, params: ListMoviesParams) -> AppResult<MovieListResponse> {
    let query = build_query(params)?;
    let (rows, count) = queries::list(pool, &query).await?;
    Ok(MovieListResponse {
        movies: rows.into_iter().map(MovieResponse::from).collect(),
        count,
    })
}

/// Fetch a movie by id.
pub async fn get(pool: &PgPool, id: i64) -> AppResult<MovieResponse> {
    let row = queries::get(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".into()))?;
    Ok(row.into())
}

/// Fetch a movie by exact title (case-sensitive).
pub async fn get_by_title(pool: &PgPool, title: &str) -> AppResult<MovieResponse> {
    let row = queries::get_by_title(pool, title)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".into()))?;
    Ok(row.into())
}

/// Validate and create a new movie, returning its assigned id.
pub async fn create(pool: &PgPool, req: CreateMovieRequest) -> AppResult<CreateMovieResponse> {
    let movie = NewMovie::from(req);
    validation::validate_fields(&movie)?;

    let id = queries::create(pool, &movie).await?;
    info!(id, title = %movie.title, "created movie");
    Ok(CreateMovieResponse { id })
}

/// Fully replace a movie's fields. The movie must exist before the fields
/// are validated; id and created timestamp are immutable.
pub async fn update(pool: &PgPool, id: i64, req: UpdateMovieRequest) -> AppResult<()> {
    if queries::get(pool, id).await?.is_none() {
        return Err(AppError::NotFound("Movie not found".into()));
    }

    let movie = NewMovie::from(req);
    validation::validate_fields(&movie)?;

    queries::update(pool, id, &movie).await?;
    info!(id, "updated movie");
    Ok(())
}

/// Soft-delete a movie.
///
/// Deleting an absent or already-deleted id still reports success, matching
/// the store-level idempotency of the marker update.
pub async fn delete(pool: &PgPool, id: i64) -> AppResult<()> {
    let matched = queries::soft_delete(pool, id).await?;
    info!(id, matched, "soft-deleted movie");
    Ok(())
}

/// Validate the whole batch, then insert it atomically. No partial success
/// is ever observable: a bad item means zero rows persisted.
pub async fn bulk_insert(pool: &PgPool, req: BulkInsertRequest) -> AppResult<()> {
    if req.movies.is_empty() {
        return Err(AppError::Validation("movies must not be empty".into()));
    }

    let mut batch = Vec::with_capacity(req.movies.len());
    for (index, item) in req.movies.into_iter().enumerate() {
        let movie = NewMovie::from(item);
        validation::validate_fields(&movie)
            .map_err(|e| AppError::Validation(format!("movies[{index}]: {e}")))?;
        batch.push(movie);
    }

    queries::bulk_insert(pool, &batch).await?;
    info!(count = batch.len(), "bulk-inserted movies");
    Ok(())
}

/// Validate list parameters and assemble a [`MovieQuery`].
///
/// Empty filter strings are treated as absent. Sort field and direction are
/// parsed independently; either failing rejects the request before any store
/// call.
fn build_query(params: ListMoviesParams) -> AppResult<MovieQuery> {
    if let Some(year) = params.year {
        validation::validate_year(year)?;
    }

    let limit = match params.limit {
        None => cinedex_core::models::movie::DEFAULT_LIMIT,
        Some(l) if l > 0 => l,
        Some(_) => {
            return Err(AppError::Validation(
                "limit must be a positive integer".into(),
            ));
        }
    };

    let offset = match params.offset {
        None => 0,
        Some(o) if o >= 0 => o,
        Some(_) => {
            return Err(AppError::Validation(
                "offset must be a non-negative integer".into(),
            ));
        }
    };

    let sort_by = match params.sort_by.as_deref() {
        None | Some("") => Default::default(),
        Some(s) => s.parse()?,
    };
    let sort_order = match params.sort_order.as_deref() {
        None | Some("") => Default::default(),
        Some(s) => s.parse()?,
    };

    Ok(MovieQuery {
        title: params.title.filter(|s| !s.is_empty()),
        director: params.director.filter(|s| !s.is_empty()),
        year: params.year,
        sort_by,
        sort_order,
        limit,
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedex_core::models::movie::{SortField, SortOrder};

    #[test]
    fn defaults_apply_when_params_absent() {
        let q = build_query(ListMoviesParams::default()).unwrap();
        assert_eq!(q.limit, 10);
        assert_eq!(q.offset, 0);
        assert_eq!(q.sort_by, SortField::Id);
        assert_eq!(q.sort_order, SortOrder::Asc);
    }

    #[test]
    fn empty_filter_strings_are_no_ops() {
        let q = build_query(ListMoviesParams {
            title: Some(String::new()),
            director: Some(String::new()),
            sort_by: Some(String::new()),
            ..Default::default()
        })
        .unwrap();
        assert!(q.title.is_none());
        assert!(q.director.is_none());
        assert_eq!(q.sort_by, SortField::Id);
    }

    #[test]
    fn year_filter_must_be_in_range() {
        for year in [1887, 2026, 0, -5] {
            let result = build_query(ListMoviesParams {
                year: Some(year),
                ..Default::default()
            });
            assert!(matches!(result, Err(AppError::Validation(_))), "{year}");
        }
        assert!(
            build_query(ListMoviesParams {
                year: Some(1888),
                ..Default::default()
            })
            .is_ok()
        );
    }

    #[test]
    fn pagination_bounds_are_enforced() {
        assert!(
            build_query(ListMoviesParams {
                limit: Some(0),
                ..Default::default()
            })
            .is_err()
        );
        assert!(
            build_query(ListMoviesParams {
                limit: Some(-1),
                ..Default::default()
            })
            .is_err()
        );
        assert!(
            build_query(ListMoviesParams {
                offset: Some(-1),
                ..Default::default()
            })
            .is_err()
        );
    }

    #[test]
    fn sort_params_are_validated_independently() {
        let ok = build_query(ListMoviesParams {
            sort_by: Some("year".into()),
            sort_order: Some("desc".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ok.sort_by, SortField::Year);
        assert_eq!(ok.sort_order, SortOrder::Desc);

        // A direction token is not a valid field and vice versa.
        assert!(
            build_query(ListMoviesParams {
                sort_by: Some("desc".into()),
                ..Default::default()
            })
            .is_err()
        );
        assert!(
            build_query(ListMoviesParams {
                sort_order: Some("year".into()),
                ..Default::default()
            })
            .is_err()
        );
    }
}
