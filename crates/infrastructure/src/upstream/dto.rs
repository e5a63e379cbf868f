use domain::Genre;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct JikanGenreListResponse {
    pub data: Vec<JikanGenre>,
}

#[derive(Debug, Deserialize)]
pub struct JikanGenre {
    pub mal_id: i32,
    pub name: String,
}

impl From<JikanGenre> for Genre {
    fn from(genre: JikanGenre) -> Self {
        Genre {
            id: genre.mal_id,
            name: genre.name,
        }
    }
}
