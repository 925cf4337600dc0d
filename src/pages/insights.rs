use super::home::Hero;
use super::{decode_list, decode_one, keywords, load_all, ContentSource, Media, Page, PageMetadata};
use crate::config::SiteConfig;
use crate::query::{catalog, QueryKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightCard {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub published_at: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub file: Option<Media>,
    #[serde(default)]
    pub cover_image: Option<Media>,
    #[serde(default)]
    pub featured: bool,
}

impl InsightCard {
    pub fn category_label(&self) -> Option<&'static str> {
        match self.category.as_deref()? {
            "market-commentary" => Some("Market commentary"),
            "research" => Some("Research"),
            "quarterly-letter" => Some("Quarterly letter"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsPage {
    pub hero: Hero,
    /// The newest featured insight, shown above the list.
    pub featured: Option<InsightCard>,
    /// Everything else, newest first.
    pub items: Vec<InsightCard>,
}

impl InsightsPage {
    pub fn hero_fallback() -> Hero {
        Hero::fallback(
            "Insights",
            "Letters, research and market commentary from our investment team.",
        )
    }
}

pub async fn assemble(source: &dyn ContentSource) -> InsightsPage {
    let mut loaded = load_all(
        source,
        vec![
            QueryKey::new(catalog::HERO_BY_PAGE).param("page", "insights"),
            QueryKey::new(catalog::INSIGHTS),
        ],
    )
    .await
    .into_iter();

    let hero = loaded
        .next()
        .and_then(|r| decode_one("insightsHero", r))
        .unwrap_or_else(InsightsPage::hero_fallback);
    let mut items: Vec<InsightCard> = loaded
        .next()
        .and_then(|r| decode_list("insights", r))
        .unwrap_or_default();

    // A card without a downloadable file has nothing to link to.
    items.retain(|item| {
        let keep = item.file.is_some();
        if !keep {
            debug!(id = %item.id, "Dropping insight without a file");
        }
        keep
    });
    let featured = items
        .iter()
        .position(|item| item.featured)
        .map(|index| items.remove(index));

    InsightsPage {
        hero,
        featured,
        items,
    }
}

impl Page for InsightsPage {
    fn path(&self) -> String {
        "/insights".to_string()
    }

    fn metadata(&self, config: &SiteConfig) -> PageMetadata {
        PageMetadata {
            title: self.hero.title.clone(),
            description: self.hero.subtitle.clone().unwrap_or_default(),
            keywords: keywords(&["insights", "market commentary", "research"]),
            canonical_url: config.canonical_url(&self.path()),
        }
    }
}
