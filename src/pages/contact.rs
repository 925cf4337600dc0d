use super::home::Hero;
use super::{decode_one, keywords, load_all, ContentSource, Page, PageMetadata};
use crate::config::SiteConfig;
use crate::query::{catalog, QueryKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    pub country: String,
}

impl Address {
    /// One line, comma separated, skipping what is missing.
    pub fn single_line(&self) -> String {
        [
            Some(self.street.as_str()),
            Some(self.city.as_str()),
            self.postal_code.as_deref(),
            Some(self.country.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    #[serde(default = "default_heading")]
    pub heading: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub address: Address,
    #[serde(default)]
    pub office_hours: Option<String>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    #[serde(default)]
    pub map_url: Option<String>,
}

fn default_heading() -> String {
    "Get in touch".to_string()
}

impl ContactDetails {
    pub fn fallback() -> Self {
        Self {
            heading: default_heading(),
            email: "info@harbourline.example".to_string(),
            phone: None,
            address: Address {
                street: "1 Quay Street".to_string(),
                city: "London".to_string(),
                postal_code: None,
                country: "United Kingdom".to_string(),
            },
            office_hours: None,
            socials: Vec::new(),
            map_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactPage {
    pub hero: Hero,
    pub details: ContactDetails,
}

impl ContactPage {
    pub fn hero_fallback() -> Hero {
        Hero::fallback(
            "Contact us",
            "Our client team will put you in touch with the right portfolio manager.",
        )
    }
}

pub async fn assemble(source: &dyn ContentSource) -> ContactPage {
    let mut loaded = load_all(
        source,
        vec![
            QueryKey::new(catalog::HERO_BY_PAGE).param("page", "contact"),
            QueryKey::new(catalog::CONTACT_DETAILS),
        ],
    )
    .await
    .into_iter();

    let hero = loaded
        .next()
        .and_then(|r| decode_one("contactHero", r))
        .unwrap_or_else(ContactPage::hero_fallback);
    let details = loaded
        .next()
        .and_then(|r| decode_one("contactDetails", r))
        .unwrap_or_else(ContactDetails::fallback);

    ContactPage { hero, details }
}

impl Page for ContactPage {
    fn path(&self) -> String {
        "/contact".to_string()
    }

    fn metadata(&self, config: &SiteConfig) -> PageMetadata {
        PageMetadata {
            title: self.hero.title.clone(),
            description: self
                .hero
                .subtitle
                .clone()
                .unwrap_or_else(|| self.details.heading.clone()),
            keywords: keywords(&["contact", "client services", self.details.address.city.as_str()]),
            canonical_url: config.canonical_url(&self.path()),
        }
    }
}
