use serde::Deserialize;

/// Which backend answers title searches
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Tmdb,
    Omdb,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Provider backing the search endpoint
    #[serde(default = "default_search_provider")]
    pub search_provider: ProviderKind,

    /// TMDB API read access token (sent as a bearer credential)
    #[serde(default)]
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL that TMDB poster paths are joined onto
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// OMDB API key
    #[serde(default)]
    pub omdb_api_key: String,

    /// OMDB API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Deadline for one whole search call, in seconds
    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,

    /// Upper bound on provider pages fetched by one search call
    #[serde(default = "default_search_max_pages")]
    pub search_max_pages: u32,

    /// Result count used when the caller does not pass a limit
    #[serde(default = "default_search_default_limit")]
    pub search_default_limit: i64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_search_provider() -> ProviderKind {
    ProviderKind::Tmdb
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_omdb_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_search_timeout_secs() -> u64 {
    10
}

fn default_search_max_pages() -> u32 {
    100
}

fn default_search_default_limit() -> i64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the selected provider can actually be called
    pub fn validate(&self) -> anyhow::Result<()> {
        let key = match self.search_provider {
            ProviderKind::Tmdb => &self.tmdb_api_key,
            ProviderKind::Omdb => &self.omdb_api_key,
        };

        if key.trim().is_empty() {
            anyhow::bail!(
                "API key for search provider {:?} is not set",
                self.search_provider
            );
        }

        if self.search_max_pages == 0 {
            anyhow::bail!("SEARCH_MAX_PAGES must be at least 1");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        envy::from_iter::<_, Config>(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[("tmdb_api_key", "token")]);
        assert_eq!(config.search_provider, ProviderKind::Tmdb);
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org");
        assert_eq!(config.omdb_api_url, "https://www.omdbapi.com");
        assert_eq!(config.search_max_pages, 100);
        assert_eq!(config.search_default_limit, 10);
        assert_eq!(config.port, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_provider_selection() {
        let config = from_pairs(&[("search_provider", "omdb"), ("omdb_api_key", "key")]);
        assert_eq!(config.search_provider, ProviderKind::Omdb);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_key_for_selected_provider() {
        let config = from_pairs(&[("search_provider", "omdb"), ("tmdb_api_key", "token")]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_page_ceiling_rejected() {
        let config = from_pairs(&[("tmdb_api_key", "token"), ("search_max_pages", "0")]);
        assert!(config.validate().is_err());
    }
}
