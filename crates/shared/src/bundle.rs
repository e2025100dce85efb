use chrono::NaiveDate;

use crate::formatter::{Platform, RenderedArticle};

/// The six in-memory files of one run.
///
/// Each buffer starts with its header and only grows, one contribution per
/// article in article order. Nothing reaches disk until the whole run has
/// succeeded.
#[derive(Debug, Clone)]
pub struct OutputBundle {
    date: String,
    buffers: [String; 6],
    articles: usize,
}

impl OutputBundle {
    pub fn new(date: NaiveDate) -> Self {
        let date = date.format("%Y-%m-%d").to_string();
        let buffers = Platform::ALL.map(|platform| platform.header(&date));

        Self {
            date,
            buffers,
            articles: 0,
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn article_count(&self) -> usize {
        self.articles
    }

    pub fn append(&mut self, rendered: &RenderedArticle) {
        for (buffer, platform) in self.buffers.iter_mut().zip(Platform::ALL) {
            buffer.push_str(rendered.block(platform));
        }
        self.articles += 1;
    }

    pub fn contents(&self, platform: Platform) -> &str {
        let position = Platform::ALL
            .iter()
            .position(|p| *p == platform)
            .unwrap_or_default();
        &self.buffers[position]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Platform, &str)> {
        Platform::ALL
            .into_iter()
            .zip(self.buffers.iter().map(String::as_str))
    }
}
