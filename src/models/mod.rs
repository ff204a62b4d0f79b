use serde::Deserialize;

mod search_result;

pub use search_result::{ResultType, SearchResult};

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from TMDB `GET /3/search/multi`
///
/// Error bodies (`{"success": false, "status_message": ...}`) share this shape,
/// so every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbSearchItem>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
    /// Only present on error bodies
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status_message: String,
}

/// One entry of a TMDB multi search. Movies carry `title`, TV shows `name`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbSearchItem {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub first_air_date: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub imdb_id: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub media_type: String,
}

impl TmdbSearchItem {
    /// Maps TMDB's `media_type`; people and anything else have no counterpart
    pub fn result_type(&self) -> Option<ResultType> {
        match self.media_type.as_str() {
            "movie" => Some(ResultType::Movie),
            "tv" => Some(ResultType::Series),
            _ => None,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }

    pub fn year(&self) -> &str {
        if self.first_air_date.is_empty() {
            &self.release_date
        } else {
            &self.first_air_date
        }
    }
}

// ============================================================================
// OMDB API Types
// ============================================================================

/// Response from OMDB `GET /?s=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbSearchItem>,
    /// Decimal string, absent on error bodies
    #[serde(rename = "totalResults", default)]
    pub total_results: String,
    #[serde(rename = "Error", default)]
    pub error: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbSearchItem {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Type", default)]
    pub item_type: String,
}

impl OmdbSearchItem {
    pub fn result_type(&self) -> Option<ResultType> {
        match self.item_type.as_str() {
            "movie" => Some(ResultType::Movie),
            "series" => Some(ResultType::Series),
            "episode" => Some(ResultType::Episode),
            _ => None,
        }
    }

    /// Normalizes the item, or `None` when its type has no counterpart
    pub fn into_search_result(self) -> Option<SearchResult> {
        let result_type = self.result_type()?;

        // OMDB uses the literal "N/A" for missing posters
        let poster_url = if self.poster == "N/A" {
            String::new()
        } else {
            self.poster
        };

        Some(
            SearchResult::new(self.title, result_type)
                .with_year(self.year)
                .with_provider_id(self.imdb_id.clone())
                .with_imdb_id(self.imdb_id)
                .with_poster_url(poster_url),
        )
    }
}
