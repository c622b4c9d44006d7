use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use super::model::{Movie, MoviePatch};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Movie not found")]
    NotFound,
}

/// In-memory, insertion-ordered movie collection.
///
/// Clones share the same collection. Every operation takes the lock once, so a
/// find-then-mutate sequence never interleaves with another request.
#[derive(Clone, Default)]
pub struct MovieStore {
    movies: Arc<RwLock<Vec<Movie>>>,
}

impl MovieStore {
    pub fn new(seed: Vec<Movie>) -> Self {
        Self {
            movies: Arc::new(RwLock::new(seed)),
        }
    }

    pub async fn list_all(&self) -> Vec<Movie> {
        self.movies.read().await.clone()
    }

    pub async fn list_by_genre(&self, genre: &str) -> Vec<Movie> {
        self.movies
            .read()
            .await
            .iter()
            .filter(|m| m.has_genre(genre))
            .cloned()
            .collect()
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Movie> {
        self.movies.read().await.iter().find(|m| m.id == id).cloned()
    }

    pub async fn insert(&self, movie: Movie) -> Movie {
        self.movies.write().await.push(movie.clone());
        movie
    }

    pub async fn update_by_id(&self, id: &str, patch: MoviePatch) -> Result<Movie, StoreError> {
        let mut movies = self.movies.write().await;
        let movie = movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound)?;

        movie.apply(patch);
        Ok(movie.clone())
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<Movie, StoreError> {
        let mut movies = self.movies.write().await;
        let index = movies
            .iter()
            .position(|m| m.id == id)
            .ok_or(StoreError::NotFound)?;

        Ok(movies.remove(index))
    }

    pub async fn len(&self) -> usize {
        self.movies.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.movies.read().await.is_empty()
    }
}
