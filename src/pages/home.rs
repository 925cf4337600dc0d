use super::strategies::StrategyCard;
use super::{
    decode_list, decode_one, keywords, load_all, ContentSource, Cta, Media, Page, PageMetadata,
};
use crate::config::SiteConfig;
use crate::query::{catalog, QueryKey};
use serde::{Deserialize, Serialize};

/// A page hero; shared by every page whose hero lives in `heroSection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub background_image: Option<Media>,
    #[serde(default)]
    pub background_video: Option<Media>,
    #[serde(default)]
    pub cta: Option<Cta>,
}

impl Hero {
    pub fn fallback(title: &str, subtitle: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: Some(subtitle.to_string()),
            background_image: None,
            background_video: None,
            cta: None,
        }
    }

    pub fn home_fallback() -> Self {
        Self {
            cta: Some(Cta::new("Explore our strategies", "/strategies")),
            ..Self::fallback(
                "Long-term thinking, disciplined investing",
                "Independent investment management for institutions and families.",
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatItem {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub heading: Option<String>,
    pub items: Vec<StatItem>,
}

impl Statistics {
    pub fn fallback() -> Self {
        let item = |value: &str, suffix: Option<&str>, label: &str| StatItem {
            value: value.to_string(),
            label: label.to_string(),
            suffix: suffix.map(str::to_string),
        };
        Self {
            heading: Some("At a glance".to_string()),
            items: vec![
                item("25", Some("+"), "Years of investing"),
                item("100", Some("%"), "Independent ownership"),
            ],
        }
    }
}

/// A `contentNew` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub heading: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub image: Option<Media>,
    #[serde(default)]
    pub cta: Option<Cta>,
}

impl ContentBlock {
    pub fn about_fallback() -> Self {
        Self {
            heading: "Who we are".to_string(),
            body: Some("An independent, partner-owned investment manager.".to_string()),
            image: None,
            cta: None,
        }
    }

    pub fn approach_fallback() -> Self {
        Self {
            heading: "How we invest".to_string(),
            body: Some("Research-led, risk-aware and patient.".to_string()),
            image: None,
            cta: Some(Cta::new("Our strategies", "/strategies")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    pub hero: Hero,
    pub statistics: Statistics,
    pub about: ContentBlock,
    pub approach: ContentBlock,
    pub strategies: Vec<StrategyCard>,
}

pub async fn assemble(source: &dyn ContentSource) -> HomePage {
    let mut loaded = load_all(
        source,
        vec![
            QueryKey::new(catalog::HERO_BY_PAGE).param("page", "home"),
            QueryKey::new(catalog::STATISTICS),
            QueryKey::new(catalog::CONTENT_NEW_BY_SECTION).param("section", "about"),
            QueryKey::new(catalog::CONTENT_NEW_BY_SECTION).param("section", "approach"),
            QueryKey::new(catalog::INVESTMENT_STRATEGIES),
        ],
    )
    .await
    .into_iter();

    HomePage {
        hero: loaded
            .next()
            .and_then(|r| decode_one("homeHero", r))
            .unwrap_or_else(Hero::home_fallback),
        statistics: loaded
            .next()
            .and_then(|r| decode_one("statistics", r))
            .unwrap_or_else(Statistics::fallback),
        about: loaded
            .next()
            .and_then(|r| decode_one("contentNew.about", r))
            .unwrap_or_else(ContentBlock::about_fallback),
        approach: loaded
            .next()
            .and_then(|r| decode_one("contentNew.approach", r))
            .unwrap_or_else(ContentBlock::approach_fallback),
        strategies: loaded
            .next()
            .and_then(|r| decode_list("investmentStrategies", r))
            .unwrap_or_default(),
    }
}

impl Page for HomePage {
    fn path(&self) -> String {
        "/".to_string()
    }

    fn metadata(&self, config: &SiteConfig) -> PageMetadata {
        PageMetadata {
            title: self.hero.title.clone(),
            description: self
                .hero
                .subtitle
                .clone()
                .unwrap_or_else(|| self.about.heading.clone()),
            keywords: keywords(&["investment management", "asset management", "strategies"]),
            canonical_url: config.canonical_url(&self.path()),
        }
    }
}
