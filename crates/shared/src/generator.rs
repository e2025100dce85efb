use anyhow::Context;
use async_trait::async_trait;

use crate::config::GenerationSettings;
use crate::error::{ParseReason, PipelineError, Result};
use crate::formatter::Platform;
use crate::models::{Article, ContentRecord};

/// One chat completion: a system policy plus a single user instruction
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

/// A service that turns a prompt into completion text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> anyhow::Result<String>;
}

/// Point of view a platform's copy is written from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    /// First person, as Chris Gbenlebu
    Personal,
    /// The CGTECH brand
    Brand,
}

impl Persona {
    fn rule(&self) -> &'static str {
        match self {
            Persona::Personal => {
                "Write in the personal voice of **Chris Gbenlebu**. Use a professional, thoughtful tone. \
                 Add personal insight, analysis, and perspective. Do NOT write as CGTECH."
            }
            Persona::Brand => "Use the **CGTECH** brand voice.",
        }
    }
}

const OUTPUT_SCHEMA: &str = r##"{
  "summary": "3-5 sentence clear summary of the news.",
  "short_script": "Short-form script for TikTok/IG/Shorts (spoken text only).",
  "linkedin": "LinkedIn post: summary + personal insight + professional tone + CTA.",
  "twitter": "Short, punchy version suitable for a tweet or start of a thread.",
  "facebook": "Longer, conversational summary with a CTA.",
  "youtube": "1-2 minute narration script for a YouTube video.",
  "hook": "Strong 1-2 sentence hook for short-form video.",
  "title": "Clean, engaging title for the news.",
  "cta": "Short call to action, e.g. 'Follow CGTECH for daily AI updates.'",
  "hashtags_linkedin": ["#AI", "#TechNews", ...],
  "hashtags_twitter": ["#AI", ...],
  "hashtags_tiktok": ["#AI", "#AITools", ...],
  "broll_scenes": [
    {
      "scene": 1,
      "narration": "What is being said in this moment.",
      "broll": "Suggested B-roll visuals, e.g. robots, dashboards, headlines."
    }
  ]
}"##;

/// Voice rules for every platform that carries a persona, personal first.
///
/// `detailed` adds the platform list to the brand line and the personal
/// branding note, as used in the user instruction.
fn voice_rules(detailed: bool) -> String {
    let personal: Vec<&str> = Platform::ALL
        .iter()
        .filter(|p| p.persona() == Some(Persona::Personal))
        .map(|p| p.voice_label())
        .collect();
    let brand: Vec<&str> = Platform::ALL
        .iter()
        .filter(|p| p.persona() == Some(Persona::Brand))
        .map(|p| p.display_name())
        .collect();

    let mut rules = String::new();
    for label in personal {
        rules.push_str(&format!("- {}: {}", label, Persona::Personal.rule()));
        if detailed {
            rules.push_str(" This is personal branding content.");
        }
        rules.push('\n');
    }
    if detailed {
        rules.push_str(&format!(
            "- OTHER PLATFORMS ({}): {}\n",
            brand.join(", "),
            Persona::Brand.rule()
        ));
    } else {
        rules.push_str(&format!("- OTHER PLATFORMS: {}\n", Persona::Brand.rule()));
    }
    rules
}

/// Fixed system policy sent with every request
pub fn system_prompt() -> String {
    format!(
        "\nYou generate structured multi-platform content based on AI news.\n\n\
         IMPORTANT VOICE RULES:\n{}",
        voice_rules(false)
    )
}

/// User instruction for one article. Missing fields become empty strings.
pub fn build_prompt(article: &Article) -> String {
    let field = |value: &Option<String>| value.clone().unwrap_or_default();

    format!(
        r#"
You are CGTECH's AI content generator. Given a news article, create structured multi-platform content.

VOICE RULES:
{voice}
Return a VALID JSON object ONLY, with this exact structure:

{schema}

ARTICLE DATA:
Title: {title}
Description: {description}
Content: {content}
Source: {source}
URL: {url}
"#,
        voice = voice_rules(true),
        schema = OUTPUT_SCHEMA,
        title = field(&article.title),
        description = field(&article.description),
        content = field(&article.content),
        source = article.source_name().unwrap_or(""),
        url = field(&article.url),
    )
}

/// Span from the first `{` to the last `}` inclusive.
///
/// Models often wrap the object in prose or code fences, so anything outside
/// the span is ignored.
pub fn locate_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Locate then parse. Both failures keep the raw completion.
pub fn parse_content_record(raw: &str) -> Result<ContentRecord> {
    let json_text = locate_json_object(raw).ok_or_else(|| PipelineError::Parse {
        reason: ParseReason::NoJsonObject,
        detail: None,
        raw: raw.to_string(),
    })?;

    serde_json::from_str::<ContentRecord>(json_text).map_err(|e| PipelineError::Parse {
        reason: ParseReason::Malformed,
        detail: Some(e.to_string()),
        raw: raw.to_string(),
    })
}

pub struct ContentGenerator<G> {
    generator: G,
    settings: GenerationSettings,
}

impl<G: TextGenerator> ContentGenerator<G> {
    pub fn new(generator: G, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    pub fn inner(&self) -> &G {
        &self.generator
    }

    pub fn request_for(&self, article: &Article) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            system: system_prompt(),
            user: build_prompt(article),
            temperature: self.settings.temperature,
        }
    }

    /// One completion, one parse. Failures are returned as-is, never retried.
    pub async fn generate(&self, article: &Article) -> Result<ContentRecord> {
        let raw = self
            .generator
            .complete(self.request_for(article))
            .await
            .with_context(|| format!("Generating content for \"{}\"", article.display_title()))
            .map_err(PipelineError::Generation)?;

        parse_content_record(&raw).inspect_err(|_| {
            tracing::error!(raw_output = %raw, "Raw model output without usable JSON");
        })
    }
}
