//! Artist records as delivered by the upstream catalog.

use serde::{Deserialize, Serialize};

/// A single artwork reference attached to an artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// An artist with the genre labels the catalog attaches to it.
///
/// Genre order is preserved from the source; it matters for tie-breaking
/// wherever genres are ranked by count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<ArtistImage>,
}

impl Artist {
    pub fn new(id: impl Into<String>, name: impl Into<String>, genres: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            images: Vec::new(),
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(ArtistImage {
            url: url.into(),
            width: None,
            height: None,
        });
        self
    }

    /// URL of the first image, if any.
    pub fn image_url(&self) -> Option<&str> {
        self.images.first().map(|i| i.url.as_str())
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalog_artist() {
        let s = r#"
        {
            "id": "4Z8W4fKeB5YxbusRsdQVPb",
            "name": "Radiohead",
            "genres": ["alternative rock", "art rock"],
            "images": [
                { "url": "https://i.scdn.co/image/large", "width": 640, "height": 640 },
                { "url": "https://i.scdn.co/image/small", "width": 160, "height": 160 }
            ],
            "popularity": 79
        }
        "#;
        let artist: Artist = serde_json::from_str(s).unwrap();
        assert_eq!(artist.id, "4Z8W4fKeB5YxbusRsdQVPb");
        assert_eq!(artist.genres, vec!["alternative rock", "art rock"]);
        assert_eq!(artist.image_url(), Some("https://i.scdn.co/image/large"));
    }

    #[test]
    fn missing_genres_and_images_default_to_empty() {
        let artist: Artist = serde_json::from_str(r#"{"id": "x", "name": "X"}"#).unwrap();
        assert!(artist.genres.is_empty());
        assert_eq!(artist.image_url(), None);
    }
}
