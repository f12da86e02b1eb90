//! Movie store queries.
//!
//! Every read filters on `deleted_at IS NULL`; deletes only set the marker.

use sqlx::{PgPool, Postgres, QueryBuilder};

use super::MovieError;
use crate::models::movie::{MovieQuery, MovieRow, NewMovie};

const MOVIE_COLUMNS: &str = "id, title, director, year, plot, created_at, updated_at";

/// Insert a new movie, returning its assigned id.
pub async fn create(pool: &PgPool, movie: &NewMovie) -> Result<i64, MovieError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO movies (title, director, year, plot) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&movie.title)
    .bind(&movie.director)
    .bind(movie.year)
    .bind(&movie.plot)
    .fetch_one(pool)
    .await
    .map_err(map_unique_violation)?;
    Ok(id)
}

/// Fetch a movie by id.
pub async fn get(pool: &PgPool, id: i64) -> Result<Option<MovieRow>, MovieError> {
    let row = sqlx::query_as::<_, MovieRow>(&format!(
        "SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1 AND deleted_at IS NULL"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Fetch a movie by exact title (case-sensitive).
pub async fn get_by_title(pool: &PgPool, title: &str) -> Result<Option<MovieRow>, MovieError> {
    let row = sqlx::query_as::<_, MovieRow>(&format!(
        "SELECT {MOVIE_COLUMNS} FROM movies WHERE title = $1 AND deleted_at IS NULL"
    ))
    .bind(title)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// List movies matching the query, returning the page plus the total count
/// of the filtered set before pagination.
pub async fn list(pool: &PgPool, query: &MovieQuery) -> Result<(Vec<MovieRow>, i64), MovieError> {
    let mut count_builder =
        QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM movies WHERE deleted_at IS NULL");
    push_filters(&mut count_builder, query);
    let total: i64 = count_builder
        .build_query_scalar()
        .fetch_one(pool)
        .await?;

    let mut builder = QueryBuilder::<Postgres>::new(format!(
        "SELECT {MOVIE_COLUMNS} FROM movies WHERE deleted_at IS NULL"
    ));
    push_filters(&mut builder, query);
    builder
        .push(" ORDER BY ")
        .push(query.sort_by.column())
        .push(" ")
        .push(query.sort_order.sql());
    builder.push(" LIMIT ").push_bind(query.limit);
    builder.push(" OFFSET ").push_bind(query.offset);

    let rows = builder
        .build_query_as::<MovieRow>()
        .fetch_all(pool)
        .await?;
    Ok((rows, total))
}

/// Full-replace update of title/director/year/plot; refreshes `updated_at`.
/// Returns the number of rows matched (0 when the id is absent or deleted).
pub async fn update(pool: &PgPool, id: i64, movie: &NewMovie) -> Result<u64, MovieError> {
    let result = sqlx::query(
        "UPDATE movies SET title = $1, director = $2, year = $3, plot = $4, \
         updated_at = now() WHERE id = $5 AND deleted_at IS NULL",
    )
    .bind(&movie.title)
    .bind(&movie.director)
    .bind(movie.year)
    .bind(&movie.plot)
    .bind(id)
    .execute(pool)
    .await
    .map_err(map_unique_violation)?;
    Ok(result.rows_affected())
}

/// Soft-delete a movie. The row is retained with `deleted_at` set and drops
/// out of all reads. Returns the number of rows matched.
pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<u64, MovieError> {
    let result = sqlx::query(
        "UPDATE movies SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Insert a batch of movies inside a single transaction, in input order.
///
/// Any failure rolls the whole batch back; partial state is never committed.
pub async fn bulk_insert(pool: &PgPool, movies: &[NewMovie]) -> Result<(), MovieError> {
    let mut tx = pool.begin().await?;
    for movie in movies {
        sqlx::query("INSERT INTO movies (title, director, year, plot) VALUES ($1, $2, $3, $4)")
            .bind(&movie.title)
            .bind(&movie.director)
            .bind(movie.year)
            .bind(&movie.plot)
            .execute(&mut *tx)
            .await
            .map_err(map_unique_violation)?;
    }
    tx.commit().await?;
    Ok(())
}

/// Append the conjunctive WHERE clauses shared by the count and page queries.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &MovieQuery) {
    if let Some(title) = &query.title {
        builder
            .push(" AND title ILIKE ")
            .push_bind(format!("%{title}%"));
    }
    if let Some(director) = &query.director {
        builder
            .push(" AND director ILIKE ")
            .push_bind(format!("%{director}%"));
    }
    if let Some(year) = query.year {
        builder.push(" AND year = ").push_bind(year);
    }
}

fn map_unique_violation(e: sqlx::Error) -> MovieError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => MovieError::DuplicateTitle,
        _ => MovieError::Db(e),
    }
}
