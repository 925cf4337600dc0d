//! Legal pages, addressed by a path parameter from a closed list.
//!
//! Unlike the other pages there is no fallback copy: an unknown kind, or a known kind with
//! no active document, is [`PageError::NotFound`].

use super::{keywords, ContentSource, Page, PageError, PageMetadata, Seo, Slug};
use crate::config::SiteConfig;
use crate::query::{catalog, QueryKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegalKind {
    PrivacyPolicy,
    TermsOfUse,
    CookiePolicy,
    Disclaimer,
    RegulatoryDisclosures,
}

impl LegalKind {
    pub const ALL: [LegalKind; 5] = [
        LegalKind::PrivacyPolicy,
        LegalKind::TermsOfUse,
        LegalKind::CookiePolicy,
        LegalKind::Disclaimer,
        LegalKind::RegulatoryDisclosures,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LegalKind::PrivacyPolicy => "privacy-policy",
            LegalKind::TermsOfUse => "terms-of-use",
            LegalKind::CookiePolicy => "cookie-policy",
            LegalKind::Disclaimer => "disclaimer",
            LegalKind::RegulatoryDisclosures => "regulatory-disclosures",
        }
    }
}

impl fmt::Display for LegalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegalKind {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LegalKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PageError::NotFound(format!("/legal/{s}")))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegalDocument {
    title: String,
    slug: Slug,
    last_updated: String,
    #[serde(default)]
    body: Vec<String>,
    #[serde(default)]
    seo: Seo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalPage {
    pub kind: LegalKind,
    pub title: String,
    pub slug: String,
    pub last_updated: String,
    pub body: Vec<String>,
    pub seo: Seo,
}

/// Builds the legal page for the raw path parameter `kind`.
///
/// The parameter is checked against [`LegalKind`] before anything is asked of the store.
pub async fn assemble(source: &dyn ContentSource, kind: &str) -> Result<LegalPage, PageError> {
    let kind: LegalKind = kind.parse().inspect_err(|_| {
        debug!(kind, "Unknown legal page kind");
    })?;

    let result = source
        .load(QueryKey::new(catalog::LEGAL_PAGE_BY_TYPE).param("type", kind.as_str()))
        .await?;
    let Some(value) = result.one() else {
        debug!(%kind, "No active legal page");
        return Err(PageError::NotFound(format!("/legal/{kind}")));
    };

    let document: LegalDocument = serde_json::from_value(value.clone()).map_err(|error| {
        warn!(%kind, %error, "Legal page has unexpected shape");
        PageError::NotFound(format!("/legal/{kind}"))
    })?;

    Ok(LegalPage {
        kind,
        title: document.title,
        slug: document.slug.current,
        last_updated: document.last_updated,
        body: document.body,
        seo: document.seo,
    })
}

impl Page for LegalPage {
    fn path(&self) -> String {
        format!("/legal/{}", self.kind)
    }

    fn metadata(&self, config: &SiteConfig) -> PageMetadata {
        let description = self.seo.meta_description.clone().unwrap_or_else(|| {
            let first = self.body.first().map(String::as_str).unwrap_or_default();
            first.chars().take(160).collect()
        });
        PageMetadata {
            title: self.seo.meta_title.clone().unwrap_or_else(|| self.title.clone()),
            description,
            keywords: self
                .seo
                .keywords
                .clone()
                .unwrap_or_else(|| keywords(&[self.title.as_str(), "legal"])),
            canonical_url: self
                .seo
                .canonical_url
                .clone()
                .unwrap_or_else(|| config.canonical_url(&self.path())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LEGAL_PAGE_TYPES;

    #[test]
    fn allow_list_matches_the_schema_choices() {
        let values: Vec<_> = LEGAL_PAGE_TYPES.iter().map(|(_, v)| *v).collect();
        let kinds: Vec<_> = LegalKind::ALL.iter().map(LegalKind::as_str).collect();
        assert_eq!(values, kinds);
    }

    #[test]
    fn parsing_is_exact() {
        assert_eq!("disclaimer".parse::<LegalKind>(), Ok(LegalKind::Disclaimer));
        assert!("Disclaimer".parse::<LegalKind>().unwrap_err().is_not_found());
        assert!("made-up-type".parse::<LegalKind>().is_err());
    }
}
