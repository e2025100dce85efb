// Public modules
pub mod bundle;
pub mod config;
pub mod error;
pub mod formatter;
pub mod generator;
pub mod gnews;
pub mod groq;
pub mod io;
pub mod models;
pub mod pipeline;

// Re-export commonly used types
pub use bundle::OutputBundle;
pub use config::{Config, GenerationSettings, NewsQuery};
pub use error::{ParseReason, PipelineError};
pub use formatter::{ContentFormatter, Platform, RenderedArticle, DEFAULT_CTA};
pub use generator::{ContentGenerator, Persona, TextGenerator};
pub use gnews::GNewsClient;
pub use groq::GroqClient;
pub use io::{daily_output_dir, save_bundle};
pub use models::{Article, BrollScene, ContentRecord};
pub use pipeline::{ArticleSource, Pipeline, RunOutcome};
