use super::home::Hero;
use super::{decode_list, decode_one, keywords, load_all, ContentSource, Page, PageMetadata, Slug};
use crate::config::SiteConfig;
use crate::query::{catalog, QueryKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyCard {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub target_return: Option<f64>,
    #[serde(default)]
    pub minimum_investment: Option<f64>,
    #[serde(default)]
    pub highlights: Vec<String>,
    /// Null when the referenced category was deleted.
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyGroup {
    pub category: Category,
    pub strategies: Vec<StrategyCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategiesPage {
    pub hero: Hero,
    /// Categories in display order; empty categories are left out.
    pub groups: Vec<StrategyGroup>,
    /// Strategies without a resolvable category.
    pub other: Vec<StrategyCard>,
}

impl StrategiesPage {
    pub fn hero_fallback() -> Hero {
        Hero::fallback(
            "Investment strategies",
            "Fixed income, equity and multi-asset portfolios managed with the same discipline.",
        )
    }
}

pub async fn assemble(source: &dyn ContentSource) -> StrategiesPage {
    let mut loaded = load_all(
        source,
        vec![
            QueryKey::new(catalog::HERO_BY_PAGE).param("page", "strategies"),
            QueryKey::new(catalog::STRATEGY_CATEGORIES),
            QueryKey::new(catalog::INVESTMENT_STRATEGIES),
        ],
    )
    .await
    .into_iter();

    let hero = loaded
        .next()
        .and_then(|r| decode_one("strategiesHero", r))
        .unwrap_or_else(StrategiesPage::hero_fallback);
    let categories: Vec<Category> = loaded
        .next()
        .and_then(|r| decode_list("strategyCategories", r))
        .unwrap_or_default();
    let mut remaining: Vec<StrategyCard> = loaded
        .next()
        .and_then(|r| decode_list("investmentStrategies", r))
        .unwrap_or_default();

    let mut groups = Vec::with_capacity(categories.len());
    for category in categories {
        let (strategies, rest) = remaining.into_iter().partition(|s: &StrategyCard| {
            s.category.as_ref().is_some_and(|c| c.id == category.id)
        });
        remaining = rest;
        if !strategies.is_empty() {
            groups.push(StrategyGroup {
                category,
                strategies,
            });
        }
    }

    StrategiesPage {
        hero,
        groups,
        other: remaining,
    }
}

impl Page for StrategiesPage {
    fn path(&self) -> String {
        "/strategies".to_string()
    }

    fn metadata(&self, config: &SiteConfig) -> PageMetadata {
        let mut words = vec!["investment strategies"];
        words.extend(self.groups.iter().map(|g| g.category.title.as_str()));
        PageMetadata {
            title: self.hero.title.clone(),
            description: self.hero.subtitle.clone().unwrap_or_default(),
            keywords: keywords(&words),
            canonical_url: config.canonical_url(&self.path()),
        }
    }
}
