use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::bundle::OutputBundle;
use crate::config::NewsQuery;
use crate::error::{PipelineError, Result};
use crate::formatter::ContentFormatter;
use crate::generator::{ContentGenerator, TextGenerator};
use crate::io::save_bundle;
use crate::models::Article;

/// Anything that can answer a news query with an ordered list of articles
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch_articles(&self, query: &NewsQuery) -> anyhow::Result<Vec<Article>>;
}

/// Where a run is, used to label failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Fetching,
    Generating,
    Persisting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The query returned nothing; no files were written
    NoArticles,
    Completed { dir: PathBuf, articles: usize },
}

pub struct Pipeline<S, G> {
    source: S,
    generator: ContentGenerator<G>,
    query: NewsQuery,
    output_dir: PathBuf,
}

impl<S: ArticleSource, G: TextGenerator> Pipeline<S, G> {
    pub fn new(
        source: S,
        generator: ContentGenerator<G>,
        query: NewsQuery,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            generator,
            query,
            output_dir: output_dir.into(),
        }
    }

    /// Fetch, generate and format every article, then write the pack.
    ///
    /// The first failure ends the run before anything is written.
    pub async fn run(&self, date: NaiveDate) -> Result<RunOutcome> {
        let result = self.run_stages(date).await;
        if let Err((stage, _)) = &result {
            tracing::debug!(stage = ?stage, "Run stopped");
        }
        result.map_err(|(_, e)| e)
    }

    async fn run_stages(
        &self,
        date: NaiveDate,
    ) -> std::result::Result<RunOutcome, (RunStage, PipelineError)> {
        println!("📰 Fetching AI news...");
        let articles = self
            .source
            .fetch_articles(&self.query)
            .await
            .map_err(|e| (RunStage::Fetching, PipelineError::Fetch(e)))?;

        if articles.is_empty() {
            println!("No articles returned from GNews.");
            return Ok(RunOutcome::NoArticles);
        }

        println!("✓ Found {} articles", articles.len());

        let mut bundle = OutputBundle::new(date);
        let total = articles.len();

        for (i, article) in articles.iter().enumerate() {
            let index = i + 1;
            println!(
                "🤖 Processing article {}/{}: {}",
                index,
                total,
                article.display_title()
            );

            let record = self
                .generator
                .generate(article)
                .await
                .map_err(|e| (RunStage::Generating, e))?;

            bundle.append(&ContentFormatter::render(index, article, &record));
            tracing::debug!(index, url = article.url.as_deref().unwrap_or(""), "Article formatted");
        }

        let dir = save_bundle(&bundle, &self.output_dir).map_err(|e| (RunStage::Persisting, e))?;

        Ok(RunOutcome::Completed {
            dir,
            articles: bundle.article_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationSettings;
    use crate::formatter::Platform;
    use crate::generator::CompletionRequest;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct FixedSource(anyhow::Result<Vec<Article>>);

    #[async_trait]
    impl ArticleSource for FixedSource {
        async fn fetch_articles(&self, _query: &NewsQuery) -> anyhow::Result<Vec<Article>> {
            match &self.0 {
                Ok(articles) => Ok(articles.clone()),
                Err(e) => Err(anyhow::anyhow!(e.to_string())),
            }
        }
    }

    /// Echoes the article title back as JSON, failing on the call numbers listed
    struct ScriptedGenerator {
        calls: AtomicUsize,
        fail_on: Vec<usize>,
        reply_without_json: bool,
    }

    impl ScriptedGenerator {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on: Vec::new(),
                reply_without_json: false,
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn complete(&self, request: CompletionRequest) -> anyhow::Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on.contains(&call) {
                anyhow::bail!("Groq API error 500: upstream exploded");
            }
            if self.reply_without_json {
                return Ok("I'm sorry, I can't help with that.".to_string());
            }

            let title = request
                .user
                .lines()
                .find_map(|line| line.strip_prefix("Title: "))
                .unwrap_or("")
                .to_string();
            Ok(format!(
                "Here is your content:\n{}",
                serde_json::json!({ "title": format!("Generated {}", title), "summary": "S" })
            ))
        }
    }

    fn articles(n: usize) -> Vec<Article> {
        (1..=n)
            .map(|i| Article {
                title: Some(format!("Story {}", i)),
                url: Some(format!("https://example.com/{}", i)),
                ..Default::default()
            })
            .collect()
    }

    fn pipeline(
        source: FixedSource,
        generator: ScriptedGenerator,
        root: &std::path::Path,
    ) -> Pipeline<FixedSource, ScriptedGenerator> {
        Pipeline::new(
            source,
            ContentGenerator::new(generator, GenerationSettings::default()),
            NewsQuery::default(),
            root,
        )
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[tokio::test]
    async fn test_run_writes_all_articles_in_order() {
        let tmp = TempDir::new().unwrap();
        let run = pipeline(
            FixedSource(Ok(articles(3))),
            ScriptedGenerator::new(),
            tmp.path(),
        );

        let outcome = run.run(date()).await.unwrap();

        let dir = tmp.path().join("CGTECH-Daily-News-2026-10-16");
        assert_eq!(
            outcome,
            RunOutcome::Completed {
                dir: dir.clone(),
                articles: 3
            }
        );

        let raw = fs::read_to_string(dir.join("raw-news.txt")).unwrap();
        assert!(raw.starts_with("=== CGTECH DAILY AI NEWS RAW FEED ===\nDate: 2026-10-16\n\n"));
        let first = raw.find("ARTICLE 1: Generated Story 1").unwrap();
        let second = raw.find("ARTICLE 2: Generated Story 2").unwrap();
        let third = raw.find("ARTICLE 3: Generated Story 3").unwrap();
        assert!(first < second && second < third);

        for platform in Platform::ALL {
            let text = fs::read_to_string(dir.join(platform.file_name())).unwrap();
            assert_eq!(text.matches(crate::formatter::SEPARATOR).count(), 3);
        }
    }

    #[tokio::test]
    async fn test_run_with_no_articles_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("output");
        let run = pipeline(FixedSource(Ok(Vec::new())), ScriptedGenerator::new(), &root);

        let outcome = run.run(date()).await.unwrap();

        assert_eq!(outcome, RunOutcome::NoArticles);
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_generation_failure_aborts_without_output() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("output");
        let mut generator = ScriptedGenerator::new();
        generator.fail_on = vec![2];
        let run = pipeline(FixedSource(Ok(articles(3))), generator, &root);

        let err = run.run(date()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Generation(_)));
        assert!(err.to_string().contains("Story 2"));
        assert!(!root.exists());
        // Third article is never attempted
        assert_eq!(run.generator_calls(), 2);
    }

    #[tokio::test]
    async fn test_parse_failure_aborts_without_output() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("output");
        let mut generator = ScriptedGenerator::new();
        generator.reply_without_json = true;
        let run = pipeline(FixedSource(Ok(articles(2))), generator, &root);

        let err = run.run(date()).await.unwrap_err();

        assert_eq!(
            err.raw_completion(),
            Some("I'm sorry, I can't help with that.")
        );
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported() {
        let tmp = TempDir::new().unwrap();
        let run = pipeline(
            FixedSource(Err(anyhow::anyhow!("GNews API returned error: 401"))),
            ScriptedGenerator::new(),
            tmp.path(),
        );

        let err = run.run(date()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Fetch(_)));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_failure_report_names_cause_once() {
        let tmp = TempDir::new().unwrap();
        let mut generator = ScriptedGenerator::new();
        generator.fail_on = vec![1];
        let run = pipeline(FixedSource(Ok(articles(1))), generator, tmp.path());

        let err = run.run(date()).await.unwrap_err();

        // Same shape the binary prints when main returns the error
        let report = format!(
            "Error: {:?}",
            anyhow::Error::from(err).context("Error running CGTECH automation")
        );
        assert!(report.starts_with("Error: Error running CGTECH automation"));
        assert!(report.contains("Story 1"));
        assert_eq!(report.matches("upstream exploded").count(), 1);
    }

    #[tokio::test]
    async fn test_write_failure_is_reported_after_generation() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("not-a-dir");
        fs::write(&root, "occupied").unwrap();
        let run = pipeline(FixedSource(Ok(articles(2))), ScriptedGenerator::new(), &root);

        let err = run.run(date()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Persist { .. }));
        assert!(err.to_string().starts_with("Failed to write "));
        assert_eq!(run.generator_calls(), 2);
    }

    impl Pipeline<FixedSource, ScriptedGenerator> {
        fn generator_calls(&self) -> usize {
            self.generator.inner().calls.load(Ordering::SeqCst)
        }
    }
}
