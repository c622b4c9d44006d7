use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Biography,
    Comedy,
    Crime,
    Drama,
    Fantasy,
    Horror,
    Romance,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Thriller,
}

impl Genre {
    pub const ALL: [Genre; 12] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Biography,
        Genre::Comedy,
        Genre::Crime,
        Genre::Drama,
        Genre::Fantasy,
        Genre::Horror,
        Genre::Romance,
        Genre::SciFi,
        Genre::Thriller,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Biography => "Biography",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Thriller => "Thriller",
        }
    }

    /// Exact token lookup, as required on writes.
    pub fn from_token(token: &str) -> Option<Genre> {
        Self::ALL.into_iter().find(|g| g.as_str() == token)
    }

    /// Case-insensitive comparison used by the listing filter.
    pub fn matches(&self, token: &str) -> bool {
        self.as_str().to_lowercase() == token.to_lowercase()
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    // Kept as sent so `9` and `9.0` both come back unchanged.
    #[schema(value_type = f64)]
    pub rate: Number,
    pub poster: String,
    pub genre: Vec<Genre>,
}

/// A fully validated movie that has not been assigned an identity yet.
#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    #[schema(value_type = f64)]
    pub rate: Number,
    pub poster: String,
    pub genre: Vec<Genre>,
}

/// Only the fields present in an update payload.
#[derive(Debug, Serialize, Clone, Default, PartialEq, ToSchema)]
pub struct MoviePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub rate: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<Genre>>,
}

impl Movie {
    pub fn new(data: NewMovie) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), data)
    }

    pub fn with_id(id: String, data: NewMovie) -> Self {
        Self {
            id,
            title: data.title,
            year: data.year,
            director: data.director,
            duration: data.duration,
            rate: data.rate,
            poster: data.poster,
            genre: data.genre,
        }
    }

    /// Overwrites the fields present in `patch`; `id` is never touched.
    pub fn apply(&mut self, patch: MoviePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(director) = patch.director {
            self.director = director;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
        if let Some(poster) = patch.poster {
            self.poster = poster;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
    }

    pub fn has_genre(&self, token: &str) -> bool {
        self.genre.iter().any(|g| g.matches(token))
    }
}
