use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Kind of title a search result refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Movie,
    Series,
    Episode,
}

impl Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultType::Movie => write!(f, "movie"),
            ResultType::Series => write!(f, "series"),
            ResultType::Episode => write!(f, "episode"),
        }
    }
}

/// A single title returned by a search, independent of which provider found it
///
/// Fields are private so a result cannot be altered once it has been built by a
/// provider adapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    title: String,
    /// Provider-native year string, e.g. "2010", "2008–2013" or "2008-01-20"
    year: String,
    imdb_id: String,
    provider_id: String,
    poster_url: String,
    #[serde(rename = "type")]
    result_type: ResultType,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, result_type: ResultType) -> Self {
        Self {
            title: title.into(),
            year: String::new(),
            imdb_id: String::new(),
            provider_id: String::new(),
            poster_url: String::new(),
            result_type,
        }
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn with_imdb_id(mut self, imdb_id: impl Into<String>) -> Self {
        self.imdb_id = imdb_id.into();
        self
    }

    pub fn with_provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = provider_id.into();
        self
    }

    pub fn with_poster_url(mut self, poster_url: impl Into<String>) -> Self {
        self.poster_url = poster_url.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn imdb_id(&self) -> &str {
        &self.imdb_id
    }

    /// Identifier of the title in the provider that produced it
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn poster_url(&self) -> &str {
        &self.poster_url
    }

    pub fn result_type(&self) -> ResultType {
        self.result_type
    }
}
