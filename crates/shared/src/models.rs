use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Outlet that published an article
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Publisher {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A news article as returned by the search API.
///
/// Wire fields nothing reads, such as `image` and `publishedAt`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub source: Option<Publisher>,
}

impl Article {
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }

    /// Title for progress output, never empty
    pub fn display_title(&self) -> &str {
        non_empty(&self.title).unwrap_or("Untitled")
    }
}

/// One shot of a short-form video, paired with suggested footage
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrollScene {
    pub scene: u32,
    #[serde(default)]
    pub narration: Option<String>,
    #[serde(default)]
    pub broll: Option<String>,
}

/// Multi-platform content generated for one article.
///
/// Every field is optional: the model is free to leave any of them out, and
/// fields of the wrong shape are read as absent instead of failing the parse.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub short_script: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub twitter: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub facebook: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub youtube: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hook: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cta: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub hashtags_linkedin: Vec<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub hashtags_twitter: Vec<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub hashtags_tiktok: Vec<String>,
    #[serde(default, deserialize_with = "lenient_scenes")]
    pub broll_scenes: Vec<BrollScene>,
}

/// Treats `None` and `Some("")` alike
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other @ (Value::Bool(_) | Value::Number(_)) => Some(other.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    })
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_scenes<'de, D>(deserializer: D) -> Result<Vec<BrollScene>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| {
            let Value::Object(fields) = item else {
                return None;
            };

            // Missing or unusable scene numbers fall back to list position
            let scene = fields
                .get("scene")
                .and_then(|n| match n {
                    Value::Number(n) => n.as_u64(),
                    Value::String(s) => s.trim().parse().ok(),
                    _ => None,
                })
                .filter(|&n| n >= 1)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(position as u32 + 1);

            let text = |key: &str| match fields.get(key) {
                Some(Value::String(s)) => Some(s.clone()),
                _ => None,
            };

            Some(BrollScene {
                scene,
                narration: text("narration"),
                broll: text("broll"),
            })
        })
        .collect())
}
