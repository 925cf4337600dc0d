//! The content types of the firm's public site.

use super::error::SchemaError;
use super::field::{Field, FieldKind};
use super::registry::SchemaRegistry;
use super::types::{Direction, Ordering, Preview, TypeKind, TypeOptions};
use serde_json::json;

/// Closed list of legal page kinds, shared with the legal page route.
pub const LEGAL_PAGE_TYPES: &[(&str, &str)] = &[
    ("Privacy Policy", "privacy-policy"),
    ("Terms of Use", "terms-of-use"),
    ("Cookie Policy", "cookie-policy"),
    ("Disclaimer", "disclaimer"),
    ("Regulatory Disclosures", "regulatory-disclosures"),
];

/// Builds the registry for every editable type on the site.
pub fn site_schema() -> Result<SchemaRegistry, SchemaError> {
    let mut registry = SchemaRegistry::new();
    register_objects(&mut registry)?;
    register_documents(&mut registry)?;
    registry.check_references()?;
    Ok(registry)
}

fn register_objects(registry: &mut SchemaRegistry) -> Result<(), SchemaError> {
    registry.register_type(
        "address",
        TypeKind::Object,
        vec![
            Field::string("street").required().max_len(120),
            Field::string("city").required().max_len(80),
            Field::string("postalCode").max_len(16),
            Field::string("country").required().max_len(56),
        ],
        TypeOptions::titled("Address"),
    )?;

    registry.register_type(
        "ctaButton",
        TypeKind::Object,
        vec![
            Field::string("label").required().max_len(40),
            Field::string("href")
                .required()
                .description("Absolute URL or a site path such as /contact"),
            Field::string("variant")
                .one_of(&[
                    ("Primary", "primary"),
                    ("Secondary", "secondary"),
                    ("Ghost", "ghost"),
                ])
                .initial(json!("primary")),
        ],
        TypeOptions::titled("Call to action"),
    )?;

    registry.register_type(
        "seo",
        TypeKind::Object,
        vec![
            Field::string("metaTitle").max_len(60),
            Field::text("metaDescription").max_len(160),
            Field::array("keywords", FieldKind::String).max_items(12),
            Field::url("canonicalUrl"),
            Field::image("ogImage").title("Social share image"),
        ],
        TypeOptions::titled("SEO"),
    )?;

    registry.register_type(
        "socialLink",
        TypeKind::Object,
        vec![
            Field::string("platform").required().one_of(&[
                ("LinkedIn", "linkedin"),
                ("X", "x"),
                ("YouTube", "youtube"),
                ("Instagram", "instagram"),
            ]),
            Field::url("url").required(),
        ],
        TypeOptions::titled("Social link"),
    )?;

    registry.register_type(
        "statItem",
        TypeKind::Object,
        vec![
            Field::string("value").required().max_len(20),
            Field::string("label").required().max_len(80),
            Field::string("suffix").max_len(8),
        ],
        TypeOptions::titled("Statistic"),
    )
}

fn register_documents(registry: &mut SchemaRegistry) -> Result<(), SchemaError> {
    registry.register_type(
        "siteSettings",
        TypeKind::Document,
        vec![
            Field::string("siteName").required().max_len(60),
            Field::image("logo"),
            Field::array("navigation", FieldKind::Object("ctaButton".into())).max_items(8),
            Field::object("contactCta", "ctaButton"),
            Field::text("footerNote").max_len(600),
            Field::object("seo", "seo"),
        ],
        TypeOptions::titled("Site settings").singleton(),
    )?;

    registry.register_type(
        "heroSection",
        TypeKind::Document,
        vec![
            Field::string("page").required().one_of(&[
                ("Home", "home"),
                ("Strategies", "strategies"),
                ("Insights", "insights"),
                ("Contact", "contact"),
            ]),
            Field::string("title").required().max_len(120),
            Field::text("subtitle").max_len(300),
            Field::image("backgroundImage"),
            Field::file("backgroundVideo").description("Muted loop shown behind the title"),
            Field::object("cta", "ctaButton"),
        ],
        TypeOptions::titled("Hero section").preview(
            Preview::title("title")
                .subtitle("page")
                .media("backgroundImage"),
        ),
    )?;

    registry.register_type(
        "teamPageHero",
        TypeKind::Document,
        vec![
            Field::string("title").required().max_len(120),
            Field::text("description").max_len(400),
            Field::image("image"),
        ],
        TypeOptions::titled("Team page hero").singleton(),
    )?;

    registry.register_type(
        "teamMember",
        TypeKind::Document,
        vec![
            Field::string("name").required().max_len(80),
            Field::string("role").required().max_len(80),
            Field::text("bio").max_len(1200),
            Field::image("photo"),
            Field::url("linkedin").title("LinkedIn"),
            Field::number("order").min(0.0),
            Field::boolean("isLeadership").initial(json!(false)),
        ],
        TypeOptions::titled("Team member")
            .preview(Preview::title("name").subtitle("role").media("photo"))
            .ordering(
                Ordering::new("Display order")
                    .then("order", Direction::Asc)
                    .then("name", Direction::Asc),
            ),
    )?;

    registry.register_type(
        "legalPage",
        TypeKind::Document,
        vec![
            Field::string("type").required().one_of(LEGAL_PAGE_TYPES),
            Field::string("title").required().max_len(120),
            Field::slug("slug").required().max_len(96),
            Field::boolean("isActive")
                .initial(json!(true))
                .description("Inactive pages answer with not found"),
            Field::date("lastUpdated").required(),
            Field::array("body", FieldKind::Text).required().min_items(1),
            Field::object("seo", "seo"),
        ],
        TypeOptions::titled("Legal page")
            .preview(Preview::title("title").subtitle("type"))
            .ordering(Ordering::new("Last updated").then("lastUpdated", Direction::Desc)),
    )?;

    registry.register_type(
        "contactDetails",
        TypeKind::Document,
        vec![
            Field::string("heading").max_len(120),
            Field::email("email").required(),
            Field::string("phone").max_len(30),
            Field::object("address", "address").required(),
            Field::string("officeHours").max_len(120),
            Field::array("socials", FieldKind::Object("socialLink".into())).max_items(6),
            Field::url("mapUrl"),
        ],
        TypeOptions::titled("Contact details").singleton(),
    )?;

    registry.register_type(
        "insightPdf",
        TypeKind::Document,
        vec![
            Field::string("title").required().max_len(160),
            Field::text("summary").max_len(500),
            Field::date("publishedAt").required(),
            Field::string("category").one_of(&[
                ("Market commentary", "market-commentary"),
                ("Research", "research"),
                ("Quarterly letter", "quarterly-letter"),
            ]),
            Field::file("file").required(),
            Field::image("coverImage"),
            Field::boolean("featured").initial(json!(false)),
        ],
        TypeOptions::titled("Insight PDF")
            .preview(
                Preview::title("title")
                    .subtitle("publishedAt")
                    .media("coverImage"),
            )
            .ordering(Ordering::new("Newest first").then("publishedAt", Direction::Desc)),
    )?;

    registry.register_type(
        "statistics",
        TypeKind::Document,
        vec![
            Field::string("heading").max_len(120),
            Field::array("items", FieldKind::Object("statItem".into()))
                .required()
                .min_items(1)
                .max_items(8),
        ],
        TypeOptions::titled("Statistics").singleton(),
    )?;

    registry.register_type(
        "strategyCategory",
        TypeKind::Document,
        vec![
            Field::string("title").required().max_len(80),
            Field::slug("slug").required(),
            Field::text("description").max_len(300),
            Field::number("order").min(0.0),
        ],
        TypeOptions::titled("Strategy category")
            .ordering(Ordering::new("Display order").then("order", Direction::Asc)),
    )?;

    registry.register_type(
        "investmentStrategy",
        TypeKind::Document,
        vec![
            Field::string("title").required().max_len(120),
            Field::slug("slug").required(),
            Field::reference("category", &["strategyCategory"]).required(),
            Field::text("summary").max_len(400),
            Field::number("targetReturn")
                .title("Target return (%)")
                .range(0.0, 100.0),
            Field::number("minimumInvestment").min(0.0),
            Field::array("highlights", FieldKind::String).max_items(6),
            Field::number("order").min(0.0),
        ],
        TypeOptions::titled("Investment strategy")
            .preview(Preview::title("title").subtitle("summary"))
            .ordering(
                Ordering::new("Display order")
                    .then("order", Direction::Asc)
                    .then("title", Direction::Asc),
            ),
    )?;

    registry.register_type(
        "contentNew",
        TypeKind::Document,
        vec![
            Field::string("section")
                .required()
                .one_of(&[("About", "about"), ("Approach", "approach")]),
            Field::string("heading").required().max_len(160),
            Field::text("body").max_len(2000),
            Field::image("image"),
            Field::object("cta", "ctaButton"),
            Field::number("order").min(0.0),
        ],
        TypeOptions::titled("Content block")
            .ordering(Ordering::new("Display order").then("order", Direction::Asc)),
    )
}
