use crate::generator::Persona;
use crate::models::{non_empty, Article, BrollScene, ContentRecord};

/// Line written before every article's contribution
pub const SEPARATOR: &str = "----------------------------------------";

pub const DEFAULT_CTA: &str = "Follow CGTECH for daily AI updates.";

/// One output file of the daily pack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Raw,
    LinkedIn,
    Twitter,
    TikTok,
    YouTube,
    Facebook,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Raw,
        Platform::LinkedIn,
        Platform::Twitter,
        Platform::TikTok,
        Platform::YouTube,
        Platform::Facebook,
    ];

    /// The raw feed is not published anywhere, so it has no voice
    pub fn persona(&self) -> Option<Persona> {
        match self {
            Platform::Raw => None,
            Platform::LinkedIn => Some(Persona::Personal),
            Platform::Twitter | Platform::TikTok | Platform::YouTube | Platform::Facebook => {
                Some(Persona::Brand)
            }
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Raw => "Raw",
            Platform::LinkedIn => "LinkedIn",
            Platform::Twitter => "Twitter",
            Platform::TikTok => "TikTok",
            Platform::YouTube => "YouTube",
            Platform::Facebook => "Facebook",
        }
    }

    pub(crate) fn voice_label(&self) -> &'static str {
        match self {
            Platform::Raw => "RAW",
            Platform::LinkedIn => "LINKEDIN",
            Platform::Twitter => "TWITTER",
            Platform::TikTok => "TIKTOK",
            Platform::YouTube => "YOUTUBE",
            Platform::Facebook => "FACEBOOK",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Platform::Raw => "raw-news.txt",
            Platform::LinkedIn => "linkedin.txt",
            Platform::Twitter => "twitter.txt",
            Platform::TikTok => "tiktok.txt",
            Platform::YouTube => "youtube.txt",
            Platform::Facebook => "facebook.txt",
        }
    }

    /// First line of the file, before the date
    pub fn header_title(&self) -> &'static str {
        match self {
            Platform::Raw => "=== CGTECH DAILY AI NEWS RAW FEED ===",
            Platform::LinkedIn => "=== LINKEDIN PERSONAL BRAND PACK (Chris Gbenlebu) ===",
            Platform::Twitter => "=== CGTECH — TWITTER PACK ===",
            Platform::TikTok => "=== CGTECH — TIKTOK/IG/SHORTS PACK ===",
            Platform::YouTube => "=== CGTECH — YOUTUBE SCRIPTS (1–2 MINUTES) ===",
            Platform::Facebook => "=== CGTECH — FACEBOOK PACK ===",
        }
    }

    pub fn header(&self, date: &str) -> String {
        format!("{}\nDate: {}\n\n", self.header_title(), date)
    }
}

/// The six blocks rendered for one article, separator included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArticle {
    pub raw: String,
    pub linkedin: String,
    pub twitter: String,
    pub tiktok: String,
    pub youtube: String,
    pub facebook: String,
}

impl RenderedArticle {
    pub fn block(&self, platform: Platform) -> &str {
        match platform {
            Platform::Raw => &self.raw,
            Platform::LinkedIn => &self.linkedin,
            Platform::Twitter => &self.twitter,
            Platform::TikTok => &self.tiktok,
            Platform::YouTube => &self.youtube,
            Platform::Facebook => &self.facebook,
        }
    }
}

/// Record fields with every fallback applied
struct Resolved<'a> {
    index: usize,
    title: &'a str,
    source: &'a str,
    url: &'a str,
    summary: &'a str,
    short_script: &'a str,
    linkedin: &'a str,
    twitter: &'a str,
    facebook: &'a str,
    youtube: &'a str,
    hook: &'a str,
    cta: &'a str,
    hashtags_linkedin: String,
    hashtags_twitter: String,
    hashtags_tiktok: String,
    broll_scenes: &'a [BrollScene],
}

impl<'a> Resolved<'a> {
    fn new(index: usize, article: &'a Article, record: &'a ContentRecord) -> Self {
        let text = |value: &'a Option<String>| non_empty(value).unwrap_or("");

        Self {
            index,
            title: non_empty(&record.title)
                .or_else(|| non_empty(&article.title))
                .unwrap_or("Untitled"),
            source: article
                .source_name()
                .filter(|s| !s.is_empty())
                .unwrap_or("Unknown Source"),
            url: text(&article.url),
            summary: text(&record.summary),
            short_script: text(&record.short_script),
            linkedin: text(&record.linkedin),
            twitter: text(&record.twitter),
            facebook: text(&record.facebook),
            youtube: text(&record.youtube),
            hook: text(&record.hook),
            cta: non_empty(&record.cta).unwrap_or(DEFAULT_CTA),
            hashtags_linkedin: record.hashtags_linkedin.join(" "),
            hashtags_twitter: record.hashtags_twitter.join(" "),
            hashtags_tiktok: record.hashtags_tiktok.join(" "),
            broll_scenes: &record.broll_scenes,
        }
    }
}

pub struct ContentFormatter;

impl ContentFormatter {
    /// Render every platform block for the article at `index` (1-based)
    pub fn render(index: usize, article: &Article, record: &ContentRecord) -> RenderedArticle {
        let item = Resolved::new(index, article, record);

        RenderedArticle {
            raw: Self::render_raw(&item),
            linkedin: Self::render_linkedin(&item),
            twitter: Self::render_twitter(&item),
            tiktok: Self::render_tiktok(&item),
            youtube: Self::render_youtube(&item),
            facebook: Self::render_facebook(&item),
        }
    }

    fn start(item: &Resolved) -> String {
        format!("{}\nARTICLE {}: {}\n", SEPARATOR, item.index, item.title)
    }

    fn section(out: &mut String, label: &str, value: &str) {
        out.push_str(&format!("{}:\n{}\n\n", label, value));
    }

    fn render_raw(item: &Resolved) -> String {
        let mut out = Self::start(item);
        out.push_str(&format!("Source: {}\n", item.source));
        if !item.url.is_empty() {
            out.push_str(&format!("URL: {}\n", item.url));
        }
        out.push('\n');
        Self::section(&mut out, "SUMMARY", item.summary);
        Self::section(&mut out, "SHORT-FORM SCRIPT", item.short_script);
        out
    }

    fn render_linkedin(item: &Resolved) -> String {
        let mut out = Self::start(item);
        out.push_str(&format!("Source: {}\n", item.source));
        if !item.url.is_empty() {
            out.push_str(&format!("Link: {}\n", item.url));
        }
        out.push('\n');
        Self::section(&mut out, "POST (PERSONAL INSIGHT)", item.linkedin);
        if !item.hashtags_linkedin.is_empty() {
            Self::section(&mut out, "HASHTAGS", &item.hashtags_linkedin);
        }
        Self::section(&mut out, "CTA", item.cta);
        out
    }

    fn render_twitter(item: &Resolved) -> String {
        let mut out = Self::start(item);
        Self::section(&mut out, "TWEET", item.twitter);
        if !item.hashtags_twitter.is_empty() {
            Self::section(&mut out, "HASHTAGS", &item.hashtags_twitter);
        }
        if !item.url.is_empty() {
            Self::section(&mut out, "LINK", item.url);
        }
        out
    }

    fn render_tiktok(item: &Resolved) -> String {
        let mut out = Self::start(item);
        out.push('\n');
        Self::section(&mut out, "HOOK", item.hook);
        Self::section(&mut out, "SCRIPT (SPOKEN)", item.short_script);

        if !item.broll_scenes.is_empty() {
            out.push_str("B-ROLL SUGGESTIONS:\n");
            for scene in item.broll_scenes {
                out.push_str(&format!("Scene {}:\n", scene.scene));
                if let Some(narration) = non_empty(&scene.narration) {
                    out.push_str(&format!("  Narration: {}\n", narration));
                }
                if let Some(broll) = non_empty(&scene.broll) {
                    out.push_str(&format!("  B-roll: {}\n", broll));
                }
                out.push('\n');
            }
        }

        if !item.hashtags_tiktok.is_empty() {
            Self::section(&mut out, "HASHTAGS", &item.hashtags_tiktok);
        }
        Self::section(&mut out, "CTA", item.cta);
        out
    }

    fn render_youtube(item: &Resolved) -> String {
        let mut out = format!("{}\n", SEPARATOR);
        Self::section(&mut out, "VIDEO TITLE", item.title);
        Self::section(&mut out, "SCRIPT (1–2 MINUTES)", item.youtube);
        if !item.url.is_empty() {
            Self::section(&mut out, "REFERENCE LINK", item.url);
        }
        Self::section(&mut out, "CTA", item.cta);
        out
    }

    fn render_facebook(item: &Resolved) -> String {
        let mut out = Self::start(item);
        out.push_str(&format!("Source: {}\n", item.source));
        if !item.url.is_empty() {
            out.push_str(&format!("Link: {}\n", item.url));
        }
        out.push('\n');
        Self::section(&mut out, "POST", item.facebook);
        Self::section(&mut out, "CTA", item.cta);
        out
    }
}
