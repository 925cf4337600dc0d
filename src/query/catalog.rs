use super::definition::{Projection, QueryDefinition};
use crate::error::ContentError;
use crate::schema::{Direction, SchemaError, SchemaRegistry};
use serde_json::json;
use std::collections::HashMap;

pub const SITE_SETTINGS: &str = "siteSettings";
pub const HERO_BY_PAGE: &str = "heroByPage";
pub const TEAM_PAGE_HERO: &str = "teamPageHero";
pub const TEAM_MEMBERS: &str = "teamMembers";
pub const LEGAL_PAGE_BY_TYPE: &str = "legalPageByType";
pub const CONTACT_DETAILS: &str = "contactDetails";
pub const INSIGHTS: &str = "insights";
pub const STATISTICS: &str = "statistics";
pub const STRATEGY_CATEGORIES: &str = "strategyCategories";
pub const INVESTMENT_STRATEGIES: &str = "investmentStrategies";
pub const CONTENT_NEW_BY_SECTION: &str = "contentNewBySection";

/// Definitions by name.
#[derive(Debug, Clone, Default)]
pub struct QueryCatalog {
    definitions: HashMap<String, QueryDefinition>,
}

impl QueryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, replacing one with the same name.
    pub fn insert(&mut self, definition: QueryDefinition) {
        self.definitions.insert(definition.name.clone(), definition);
    }

    pub fn get(&self, name: &str) -> Result<&QueryDefinition, ContentError> {
        self.definitions
            .get(name)
            .ok_or_else(|| ContentError::UnknownQuery(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryDefinition> {
        self.definitions.values()
    }

    /// Checks every definition against the registry; the first problem wins.
    pub fn check(&self, registry: &SchemaRegistry) -> Result<(), SchemaError> {
        let mut names: Vec<_> = self.definitions.keys().collect();
        names.sort();
        for name in names {
            self.definitions[name].check(registry)?;
        }
        Ok(())
    }
}

impl FromIterator<QueryDefinition> for QueryCatalog {
    fn from_iter<I: IntoIterator<Item = QueryDefinition>>(iter: I) -> Self {
        let mut catalog = QueryCatalog::new();
        for definition in iter {
            catalog.insert(definition);
        }
        catalog
    }
}

fn cta() -> Vec<Projection> {
    Projection::values(&["label", "href", "variant"])
}

fn seo() -> Projection {
    Projection::object(
        "seo",
        Projection::values(&["metaTitle", "metaDescription", "keywords", "canonicalUrl"]),
    )
}

/// The queries behind every content area of the site.
pub fn site_queries() -> QueryCatalog {
    [
        QueryDefinition::new(SITE_SETTINGS, "siteSettings")
            .project(Projection::values(&["siteName", "footerNote"]))
            .project([
                Projection::asset("logo"),
                Projection::array("navigation", cta()),
                Projection::object("contactCta", cta()),
                seo(),
            ])
            .singleton(),
        QueryDefinition::new(HERO_BY_PAGE, "heroSection")
            .project(Projection::values(&["title", "subtitle"]))
            .project([
                Projection::asset("backgroundImage"),
                Projection::asset("backgroundVideo"),
                Projection::object("cta", cta()),
            ])
            .where_param("page", "page")
            .singleton(),
        QueryDefinition::new(TEAM_PAGE_HERO, "teamPageHero")
            .project(Projection::values(&["title", "description"]))
            .project([Projection::asset("image")])
            .singleton(),
        QueryDefinition::new(TEAM_MEMBERS, "teamMember")
            .project(Projection::values(&["name", "role", "bio", "linkedin", "isLeadership"]))
            .project([Projection::asset("photo")])
            .order_by("order", Direction::Asc)
            .order_by("name", Direction::Asc),
        QueryDefinition::new(LEGAL_PAGE_BY_TYPE, "legalPage")
            .project(Projection::values(&["type", "title", "slug", "lastUpdated", "body"]))
            .project([seo()])
            .where_param("type", "type")
            .where_eq("isActive", json!(true))
            .order_by("lastUpdated", Direction::Desc)
            .singleton(),
        QueryDefinition::new(CONTACT_DETAILS, "contactDetails")
            .project(Projection::values(&[
                "heading",
                "email",
                "phone",
                "officeHours",
                "mapUrl",
            ]))
            .project([
                Projection::object(
                    "address",
                    Projection::values(&["street", "city", "postalCode", "country"]),
                ),
                Projection::array("socials", Projection::values(&["platform", "url"])),
            ])
            .singleton(),
        QueryDefinition::new(INSIGHTS, "insightPdf")
            .project(Projection::values(&[
                "title",
                "summary",
                "publishedAt",
                "category",
                "featured",
            ]))
            .project([Projection::asset("file"), Projection::asset("coverImage")])
            .order_by("publishedAt", Direction::Desc),
        QueryDefinition::new(STATISTICS, "statistics")
            .project(Projection::values(&["heading"]))
            .project([Projection::array(
                "items",
                Projection::values(&["value", "label", "suffix"]),
            )])
            .singleton(),
        QueryDefinition::new(STRATEGY_CATEGORIES, "strategyCategory")
            .project(Projection::values(&["title", "slug", "description"]))
            .order_by("order", Direction::Asc),
        QueryDefinition::new(INVESTMENT_STRATEGIES, "investmentStrategy")
            .project(Projection::values(&[
                "title",
                "slug",
                "summary",
                "targetReturn",
                "minimumInvestment",
                "highlights",
            ]))
            .project([Projection::reference(
                "category",
                Projection::values(&["_id", "title", "slug"]),
            )])
            .order_by("order", Direction::Asc)
            .order_by("title", Direction::Asc),
        QueryDefinition::new(CONTENT_NEW_BY_SECTION, "contentNew")
            .project(Projection::values(&["section", "heading", "body"]))
            .project([Projection::asset("image"), Projection::object("cta", cta())])
            .where_param("section", "section")
            .order_by("order", Direction::Asc)
            .singleton(),
    ]
    .into_iter()
    .collect()
}
