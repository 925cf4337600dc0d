//! Demo content for a fictional firm, used by the `site-content` binary and the tests.

use super::{Asset, InMemoryStore};
use serde_json::json;

fn image(asset: &str, alt: &str) -> serde_json::Value {
    json!({ "asset": { "_ref": asset }, "alt": alt })
}

/// A store holding one complete set of site content.
pub fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    seed_assets(&store);
    seed_layout(&store);
    seed_team(&store);
    seed_legal(&store);
    seed_insights(&store);
    seed_strategies(&store);
    store
}

fn seed_assets(store: &InMemoryStore) {
    store.add_asset(Asset::image("image-logo", "https://cdn.harbourline.example/logo.png", 240, 64));
    store.add_asset(
        Asset::image("image-harbour", "https://cdn.harbourline.example/harbour.jpg", 2400, 1350)
            .with_alt("Harbour at dawn"),
    );
    store.add_asset(Asset::image("image-team", "https://cdn.harbourline.example/team.jpg", 1600, 900));
    store.add_asset(Asset::image("image-amara", "https://cdn.harbourline.example/amara.webp", 800, 800));
    store.add_asset(Asset::image("image-jonas", "https://cdn.harbourline.example/jonas.webp", 800, 800));
    store.add_asset(Asset::file(
        "file-harbour-loop",
        "https://cdn.harbourline.example/harbour-loop.mp4",
        "video/mp4",
    ));
    store.add_asset(Asset::file(
        "file-q3-letter",
        "https://cdn.harbourline.example/q3-letter.pdf",
        "application/pdf",
    ));
    store.add_asset(Asset::file(
        "file-rates-outlook",
        "https://cdn.harbourline.example/rates-outlook.pdf",
        "application/pdf",
    ));
}

fn seed_layout(store: &InMemoryStore) {
    store.insert(json!({
        "_id": "siteSettings",
        "_type": "siteSettings",
        "siteName": "Harbourline Capital",
        "logo": image("image-logo", "Harbourline Capital"),
        "navigation": [
            { "label": "Strategies", "href": "/strategies" },
            { "label": "Insights", "href": "/insights" },
            { "label": "Team", "href": "/team" },
            { "label": "Contact", "href": "/contact" }
        ],
        "contactCta": { "label": "Talk to us", "href": "/contact", "variant": "primary" },
        "footerNote": "Capital at risk. Past performance is not a reliable indicator of future results.",
        "seo": {
            "metaTitle": "Harbourline Capital",
            "metaDescription": "Long-horizon investment strategies for institutions and families.",
            "keywords": ["asset management", "fixed income", "multi-asset"]
        }
    }));
    store.insert(json!({
        "_id": "hero-home",
        "_type": "heroSection",
        "page": "home",
        "title": "Patient capital, steady hands",
        "subtitle": "Independent investment management since 1998.",
        "backgroundImage": image("image-harbour", "Harbour at dawn"),
        "backgroundVideo": { "asset": { "_ref": "file-harbour-loop" } },
        "cta": { "label": "Explore strategies", "href": "/strategies", "variant": "primary" }
    }));
    store.insert(json!({
        "_id": "statistics",
        "_type": "statistics",
        "heading": "Harbourline in numbers",
        "items": [
            { "value": "12.4", "suffix": "bn", "label": "Assets under management (GBP)" },
            { "value": "26", "label": "Years of independent ownership" },
            { "value": "41", "label": "Investment professionals" }
        ]
    }));
    store.insert(json!({
        "_id": "content-about",
        "_type": "contentNew",
        "section": "about",
        "heading": "Owned by our partners",
        "body": "We answer to our clients, not to a parent company.",
        "order": 1
    }));
    store.insert(json!({
        "_id": "content-approach",
        "_type": "contentNew",
        "section": "approach",
        "heading": "Research first",
        "body": "Every position starts with primary research and a written thesis.",
        "cta": { "label": "Our strategies", "href": "/strategies", "variant": "secondary" },
        "order": 2
    }));
    store.insert(json!({
        "_id": "contactDetails",
        "_type": "contactDetails",
        "heading": "Speak with our client team",
        "email": "clients@harbourline.example",
        "phone": "+44 20 7946 0000",
        "address": {
            "street": "1 Quay Street",
            "city": "London",
            "postalCode": "EC4R 1AA",
            "country": "United Kingdom"
        },
        "officeHours": "Mon-Fri 08:30-17:30 GMT",
        "socials": [
            { "platform": "linkedin", "url": "https://www.linkedin.com/company/harbourline" }
        ]
    }));
}

fn seed_team(store: &InMemoryStore) {
    store.insert(json!({
        "_id": "teamPageHero",
        "_type": "teamPageHero",
        "title": "The people behind the portfolios",
        "description": "Portfolio managers, analysts and client partners who have worked together for over a decade.",
        "image": image("image-team", "The Harbourline team")
    }));
    store.insert(json!({
        "_id": "member-jonas",
        "_type": "teamMember",
        "name": "Jonas Weber",
        "role": "Head of Fixed Income",
        "photo": image("image-jonas", "Jonas Weber"),
        "order": 2,
        "isLeadership": true
    }));
    store.insert(json!({
        "_id": "member-amara",
        "_type": "teamMember",
        "name": "Amara Okafor",
        "role": "Chief Investment Officer",
        "bio": "Amara leads the investment committee.",
        "photo": image("image-amara", "Amara Okafor"),
        "linkedin": "https://www.linkedin.com/in/amara-okafor",
        "order": 1,
        "isLeadership": true
    }));
    store.insert(json!({
        "_id": "member-lee",
        "_type": "teamMember",
        "name": "Sun-hee Lee",
        "role": "Client Partner",
        "order": 3
    }));
}

fn seed_legal(store: &InMemoryStore) {
    store.insert(json!({
        "_id": "legal-privacy",
        "_type": "legalPage",
        "type": "privacy-policy",
        "title": "Privacy Policy",
        "slug": { "current": "privacy-policy" },
        "isActive": true,
        "lastUpdated": "2026-03-01",
        "body": ["We collect the personal data you give us when you contact us."]
    }));
    store.insert(json!({
        "_id": "legal-terms",
        "_type": "legalPage",
        "type": "terms-of-use",
        "title": "Terms of Use",
        "slug": { "current": "terms-of-use" },
        "isActive": true,
        "lastUpdated": "2025-11-14",
        "body": ["This site is intended for professional investors."]
    }));
    store.insert(json!({
        "_id": "legal-cookies",
        "_type": "legalPage",
        "type": "cookie-policy",
        "title": "Cookie Policy",
        "slug": { "current": "cookie-policy" },
        "isActive": false,
        "lastUpdated": "2024-06-30",
        "body": ["Retired while the cookie banner is reworked."]
    }));
}

fn seed_insights(store: &InMemoryStore) {
    store.insert(json!({
        "_id": "insight-q3",
        "_type": "insightPdf",
        "title": "Q3 letter to clients",
        "summary": "Duration, dispersion and why we are patient.",
        "publishedAt": "2026-10-02",
        "category": "quarterly-letter",
        "file": { "asset": { "_ref": "file-q3-letter" } },
        "featured": true
    }));
    store.insert(json!({
        "_id": "insight-rates",
        "_type": "insightPdf",
        "title": "Rates outlook",
        "publishedAt": "2026-08-19",
        "category": "market-commentary",
        "file": { "asset": { "_ref": "file-rates-outlook" } },
        "coverImage": image("image-missing", "Chart")
    }));
}

fn seed_strategies(store: &InMemoryStore) {
    store.insert(json!({
        "_id": "category-income",
        "_type": "strategyCategory",
        "title": "Income",
        "slug": { "current": "income" },
        "order": 1
    }));
    store.insert(json!({
        "_id": "category-growth",
        "_type": "strategyCategory",
        "title": "Growth",
        "slug": { "current": "growth" },
        "order": 2
    }));
    store.insert(json!({
        "_id": "strategy-global-equity",
        "_type": "investmentStrategy",
        "title": "Global Equity",
        "slug": { "current": "global-equity" },
        "category": { "_ref": "category-growth" },
        "summary": "Concentrated portfolio of 30 to 40 quality compounders.",
        "targetReturn": 8,
        "highlights": ["Low turnover", "Quality bias"],
        "order": 2
    }));
    store.insert(json!({
        "_id": "strategy-strategic-bond",
        "_type": "investmentStrategy",
        "title": "Strategic Bond",
        "slug": { "current": "strategic-bond" },
        "category": { "_ref": "category-income" },
        "summary": "Flexible fixed income with a capital preservation focus.",
        "targetReturn": 5,
        "minimumInvestment": 100000,
        "order": 1
    }));
    store.insert(json!({
        "_id": "strategy-multi-asset",
        "_type": "investmentStrategy",
        "title": "Multi-Asset Income",
        "slug": { "current": "multi-asset-income" },
        "category": { "_ref": "category-income" },
        "order": 3
    }));
}
