use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use super::model::Movie;
use super::repository::{MovieStore, StoreError};
use super::schema::{self, SchemaError};

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie not found")]
    NotFound,
    #[error(transparent)]
    Invalid(#[from] SchemaError),
}

impl From<StoreError> for MovieError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => MovieError::NotFound,
        }
    }
}

pub struct MovieService;

impl MovieService {
    pub async fn list(store: &MovieStore, genre: Option<&str>) -> Vec<Movie> {
        match genre.filter(|g| !g.is_empty()) {
            Some(genre) => {
                debug!(genre, "filtering movies by genre");
                store.list_by_genre(genre).await
            }
            None => store.list_all().await,
        }
    }

    pub async fn get(store: &MovieStore, id: &str) -> Result<Movie, MovieError> {
        store.find_by_id(id).await.ok_or(MovieError::NotFound)
    }

    pub async fn create(store: &MovieStore, payload: &Value) -> Result<Movie, SchemaError> {
        let data = schema::validate_full(payload)?;
        let movie = store.insert(Movie::new(data)).await;

        info!(id = %movie.id, title = %movie.title, "movie created");
        Ok(movie)
    }

    /// Unknown ids win over invalid payloads: a PATCH to a missing movie is a
    /// 404 whatever its body says.
    pub async fn update(store: &MovieStore, id: &str, payload: &Value) -> Result<Movie, MovieError> {
        if store.find_by_id(id).await.is_none() {
            return Err(MovieError::NotFound);
        }

        let patch = schema::validate_partial(payload)?;
        let movie = store.update_by_id(id, patch).await?;

        info!(id = %movie.id, "movie updated");
        Ok(movie)
    }

    pub async fn delete(store: &MovieStore, id: &str) -> Result<Movie, MovieError> {
        let movie = store.delete_by_id(id).await?;

        info!(id = %movie.id, title = %movie.title, "movie deleted");
        Ok(movie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "title": "Pulp Fiction",
            "year": 1994,
            "director": "Quentin Tarantino",
            "duration": 154,
            "poster": "https://www.themoviedb.org/t/p/original/vQWk5YBFWF4bZaofAbv0tShwBvQ.jpg",
            "genre": ["Crime", "Drama"]
        })
    }

    #[tokio::test]
    async fn create_then_get() {
        let store = MovieStore::default();
        let created = MovieService::create(&store, &payload()).await.unwrap();
        assert_eq!(created.rate, serde_json::Number::from(0));
        let fetched = MovieService::get(&store, &created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn invalid_create_leaves_store_untouched() {
        let store = MovieStore::default();
        let err = MovieService::create(&store, &json!({ "title": 1 })).await.unwrap_err();
        assert!(err.fields().contains(&"title"));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn update_checks_existence_before_payload() {
        let store = MovieStore::default();
        let err = MovieService::update(&store, "missing", &json!({ "year": "bad" }))
            .await
            .unwrap_err();
        assert!(matches!(err, MovieError::NotFound));
    }

    #[tokio::test]
    async fn invalid_update_is_not_partially_applied() {
        let store = MovieStore::default();
        let created = MovieService::create(&store, &payload()).await.unwrap();

        let err = MovieService::update(&store, &created.id, &json!({ "title": "New", "year": 1 }))
            .await
            .unwrap_err();

        assert!(matches!(err, MovieError::Invalid(_)));
        assert_eq!(MovieService::get(&store, &created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn empty_genre_filter_lists_everything() {
        let store = MovieStore::default();
        MovieService::create(&store, &payload()).await.unwrap();
        assert_eq!(MovieService::list(&store, Some("")).await.len(), 1);
        assert_eq!(MovieService::list(&store, Some("comedy")).await.len(), 0);
    }
}
