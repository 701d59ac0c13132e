use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Movie {
    pub fn new(title: String, image: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            image,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn retitle(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    pub fn replace_image(&mut self, image: Option<String>) {
        self.image = image;
        self.updated_at = Utc::now();
    }
}

/// A user vouching for a movie (row of the recommenders relation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Recommendation {
    pub movie_id: Uuid,
    pub user_id: Uuid,
}

/// Minimal movie reference embedded in a user's rating history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRef {
    pub id: Uuid,
    pub title: String,
}

/// Movie reference embedded in rating resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: Uuid,
    pub title: String,
    pub image: Option<String>,
}

impl From<&Movie> for MovieRef {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
        }
    }
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            image: movie.image.clone(),
        }
    }
}
