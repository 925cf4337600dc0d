//! Site chrome shared by every page: name, logo, navigation and footer.

use super::{decode_one, ContentSource, Cta, Media, Seo};
use crate::query::{catalog, QueryKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteLayout {
    pub site_name: String,
    #[serde(default)]
    pub logo: Option<Media>,
    #[serde(default)]
    pub navigation: Vec<Cta>,
    #[serde(default)]
    pub contact_cta: Option<Cta>,
    #[serde(default)]
    pub footer_note: Option<String>,
    #[serde(default)]
    pub seo: Seo,
}

impl SiteLayout {
    pub fn fallback() -> Self {
        Self {
            site_name: "Harbourline Capital".to_string(),
            logo: None,
            navigation: vec![
                Cta::new("Strategies", "/strategies"),
                Cta::new("Insights", "/insights"),
                Cta::new("Team", "/team"),
                Cta::new("Contact", "/contact"),
            ],
            contact_cta: Some(Cta::new("Get in touch", "/contact")),
            footer_note: Some(
                "Capital at risk. Past performance is not a reliable indicator of future results."
                    .to_string(),
            ),
            seo: Seo::default(),
        }
    }
}

pub async fn assemble(source: &dyn ContentSource) -> SiteLayout {
    let loaded = source.load(QueryKey::new(catalog::SITE_SETTINGS)).await;
    decode_one("siteSettings", loaded).unwrap_or_else(SiteLayout::fallback)
}
