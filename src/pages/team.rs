use super::{decode_list, decode_one, keywords, load_all, ContentSource, Media, Page, PageMetadata};
use crate::config::SiteConfig;
use crate::query::{catalog, QueryKey};
use serde::{Deserialize, Serialize};

pub const FALLBACK_TITLE: &str = "Our Team";
pub const FALLBACK_DESCRIPTION: &str =
    "Meet the portfolio managers, analysts and client partners behind our investment approach.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamHero {
    pub title: String,
    #[serde(default = "fallback_description")]
    pub description: String,
    #[serde(default)]
    pub image: Option<Media>,
}

fn fallback_description() -> String {
    FALLBACK_DESCRIPTION.to_string()
}

impl TeamHero {
    pub fn fallback() -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            description: fallback_description(),
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberCard {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub photo: Option<Media>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub is_leadership: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPage {
    pub hero: TeamHero,
    pub leadership: Vec<TeamMemberCard>,
    pub members: Vec<TeamMemberCard>,
}

/// Builds the team page. Never fails: every slice has a fallback.
pub async fn assemble(source: &dyn ContentSource) -> TeamPage {
    let mut loaded = load_all(
        source,
        vec![
            QueryKey::new(catalog::TEAM_PAGE_HERO),
            QueryKey::new(catalog::TEAM_MEMBERS),
        ],
    )
    .await
    .into_iter();

    let hero = loaded
        .next()
        .and_then(|r| decode_one("teamPageHero", r))
        .unwrap_or_else(TeamHero::fallback);
    let people: Vec<TeamMemberCard> = loaded
        .next()
        .and_then(|r| decode_list("teamMembers", r))
        .unwrap_or_default();
    let (leadership, members) = people.into_iter().partition(|m| m.is_leadership);

    TeamPage {
        hero,
        leadership,
        members,
    }
}

impl Page for TeamPage {
    fn path(&self) -> String {
        "/team".to_string()
    }

    fn metadata(&self, config: &SiteConfig) -> PageMetadata {
        PageMetadata {
            title: self.hero.title.clone(),
            description: self.hero.description.clone(),
            keywords: keywords(&["investment team", "portfolio managers", "leadership"]),
            canonical_url: config.canonical_url(&self.path()),
        }
    }
}
