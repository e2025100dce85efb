use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Search parameters sent to GNews for one run
#[derive(Debug, Clone, PartialEq)]
pub struct NewsQuery {
    pub query: String,
    pub lang: String,
    pub max: u32,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            query: "artificial intelligence OR AI tools OR machine learning".to_string(),
            lang: "en".to_string(),
            max: 5,
        }
    }
}

/// Model settings for the content generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gnews_api_key: String,
    pub groq_api_key: String,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, `from_env` passes the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let gnews_api_key = lookup("GNEWS_API_KEY").context(
            "GNEWS_API_KEY not found.\n\n\
            To fix this, create ~/.config/cgtech-news/.env with:\n  \
            GNEWS_API_KEY=your_token_here\n  \
            GROQ_API_KEY=your_key_here\n\n\
            Get your GNews API key from: https://gnews.io/dashboard",
        )?;

        let groq_api_key = lookup("GROQ_API_KEY").context(
            "GROQ_API_KEY not found.\n\n\
            To fix this, create ~/.config/cgtech-news/.env with:\n  \
            GNEWS_API_KEY=your_token_here\n  \
            GROQ_API_KEY=your_key_here\n\n\
            Get your Groq API key from: https://console.groq.com/keys",
        )?;

        let output_dir = lookup("CGTECH_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_output_dir);

        Ok(Self {
            gnews_api_key,
            groq_api_key,
            output_dir,
        })
    }

    /// `./output` relative to the working directory
    pub fn default_output_dir() -> PathBuf {
        env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("output")
    }

    fn try_load_dotenv() {
        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/cgtech-news/.env
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("cgtech-news").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }

        // Nothing found is fine, the keys may be set system-wide
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_news_query() {
        let query = NewsQuery::default();
        assert_eq!(
            query.query,
            "artificial intelligence OR AI tools OR machine learning"
        );
        assert_eq!(query.lang, "en");
        assert_eq!(query.max, 5);
    }

    #[test]
    fn test_default_generation_settings() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.model, "llama-3.3-70b-versatile");
        assert!((settings.temperature - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn test_default_output_dir_ends_with_output() {
        assert!(Config::default_output_dir().ends_with("output"));
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_reads_keys_and_output_dir() {
        let config = Config::from_lookup(lookup_from(&[
            ("GNEWS_API_KEY", "gnews-key"),
            ("GROQ_API_KEY", "groq-key"),
            ("CGTECH_OUTPUT_DIR", "/srv/packs"),
        ]))
        .unwrap();

        assert_eq!(config.gnews_api_key, "gnews-key");
        assert_eq!(config.groq_api_key, "groq-key");
        assert_eq!(config.output_dir, PathBuf::from("/srv/packs"));
    }

    #[test]
    fn test_from_lookup_defaults_output_dir() {
        let config = Config::from_lookup(lookup_from(&[
            ("GNEWS_API_KEY", "gnews-key"),
            ("GROQ_API_KEY", "groq-key"),
        ]))
        .unwrap();

        assert!(config.output_dir.ends_with("output"));
    }

    #[test]
    fn test_missing_gnews_key_explains_fix() {
        let err = Config::from_lookup(lookup_from(&[("GROQ_API_KEY", "groq-key")])).unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("GNEWS_API_KEY not found."));
        assert!(message.contains("~/.config/cgtech-news/.env"));
        assert!(message.contains("https://gnews.io/dashboard"));
    }

    #[test]
    fn test_missing_groq_key_explains_fix() {
        let err = Config::from_lookup(lookup_from(&[("GNEWS_API_KEY", "gnews-key")])).unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("GROQ_API_KEY not found."));
        assert!(message.contains("https://console.groq.com/keys"));
    }
}
