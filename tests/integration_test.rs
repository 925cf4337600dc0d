use query_framework::QueryHook;
use serde_json::json;
use site_content::config::SiteConfig;
use site_content::lifecycle::SiteSystem;
use site_content::pages::contact::{ContactDetails, ContactPage};
use site_content::pages::home::{ContentBlock, Hero, Statistics};
use site_content::pages::insights::InsightsPage;
use site_content::pages::layout::SiteLayout;
use site_content::pages::strategies::StrategiesPage;
use site_content::pages::team::{self, TeamHero, FALLBACK_DESCRIPTION, FALLBACK_TITLE};
use site_content::pages::{legal, Page, PageError};
use site_content::query::{site_queries, QueryExecutor};
use site_content::store::seed::seeded_store;
use site_content::store::InMemoryStore;
use std::sync::Arc;
use std::time::Duration;

fn start(store: Arc<InMemoryStore>) -> SiteSystem {
    SiteSystem::new(SiteConfig::default(), store).expect("site system")
}

/// Every page assembled from the seeded store.
#[tokio::test]
async fn test_full_site_from_seeded_content() {
    let system = start(Arc::new(seeded_store()));

    let layout = system.layout().await;
    assert_eq!(layout.site_name, "Harbourline Capital");
    assert_eq!(layout.navigation.len(), 4);
    assert_eq!(layout.navigation[0].variant, "primary");
    assert_eq!(
        layout.logo.expect("logo").url,
        "https://cdn.harbourline.example/logo.png"
    );

    let home = system.home().await;
    assert_eq!(home.hero.title, "Patient capital, steady hands");
    assert_eq!(
        home.hero.background_video.expect("video").mime_type.as_deref(),
        Some("video/mp4")
    );
    assert_eq!(home.statistics.items.len(), 3);
    assert_eq!(home.about.heading, "Owned by our partners");
    assert_eq!(home.approach.cta.expect("cta").variant, "secondary");
    assert_eq!(home.strategies.len(), 3);

    let team = system.team().await;
    assert_eq!(team.hero.title, "The people behind the portfolios");
    let leaders: Vec<_> = team.leadership.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(leaders, ["Amara Okafor", "Jonas Weber"]);
    assert_eq!(team.members.len(), 1);

    let strategies = system.strategies().await;
    assert_eq!(strategies.hero, StrategiesPage::hero_fallback());
    let groups: Vec<_> = strategies
        .groups
        .iter()
        .map(|g| (g.category.title.as_str(), g.strategies.len()))
        .collect();
    assert_eq!(groups, [("Income", 2), ("Growth", 1)]);
    assert!(strategies.other.is_empty());
    assert_eq!(strategies.groups[0].strategies[0].slug.current, "strategic-bond");

    let insights = system.insights().await;
    assert_eq!(insights.featured.expect("featured").id, "insight-q3");
    assert_eq!(insights.items.len(), 1);
    assert_eq!(insights.items[0].cover_image, None);

    let contact = system.contact().await;
    assert_eq!(contact.hero, ContactPage::hero_fallback());
    assert_eq!(contact.details.email, "clients@harbourline.example");
    assert_eq!(contact.details.socials.len(), 1);

    let metadata = team.metadata(&system.config);
    assert_eq!(metadata.canonical_url, "http://localhost:3000/team");

    system.shutdown().await.expect("shutdown");
}

/// With nothing in the store every slice renders its fallback.
#[tokio::test]
async fn test_empty_store_renders_fallbacks() {
    let system = start(Arc::new(InMemoryStore::new()));

    assert_eq!(system.layout().await, SiteLayout::fallback());

    let home = system.home().await;
    assert_eq!(home.hero, Hero::home_fallback());
    assert_eq!(home.statistics, Statistics::fallback());
    assert_eq!(home.about, ContentBlock::about_fallback());
    assert_eq!(home.approach, ContentBlock::approach_fallback());
    assert!(home.strategies.is_empty());

    let team = system.team().await;
    assert_eq!(team.hero.title, FALLBACK_TITLE);
    assert_eq!(team.hero.description, FALLBACK_DESCRIPTION);
    assert!(team.leadership.is_empty() && team.members.is_empty());

    assert_eq!(system.contact().await.details, ContactDetails::fallback());
    assert_eq!(system.insights().await.hero, InsightsPage::hero_fallback());
    assert!(system.strategies().await.groups.is_empty());

    let err = system.legal("privacy-policy").await.unwrap_err();
    assert_eq!(err, PageError::NotFound("/legal/privacy-policy".into()));

    system.shutdown().await.expect("shutdown");
}

/// An unreachable store masks to fallbacks, except where content is mandatory.
#[tokio::test]
async fn test_offline_store_masks_to_fallbacks() {
    let store = Arc::new(seeded_store());
    store.set_offline(true);
    let system = start(store.clone());

    assert_eq!(system.team().await.hero, TeamHero::fallback());
    assert_eq!(system.home().await.hero, Hero::home_fallback());

    let err = system.legal("terms-of-use").await.unwrap_err();
    assert!(matches!(err, PageError::Unavailable(ref e) if e.is_transient()));

    system.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_team_hero_without_description_uses_fallback_copy() {
    let store = Arc::new(seeded_store());
    store.insert(json!({
        "_id": "teamPageHero",
        "_type": "teamPageHero",
        "title": "Who we are"
    }));
    let executor = QueryExecutor::new(store, site_queries());

    let page = team::assemble(&executor).await;
    assert_eq!(page.hero.title, "Who we are");
    assert_eq!(page.hero.description, FALLBACK_DESCRIPTION);
}

#[tokio::test]
async fn test_legal_pages_follow_the_allow_list_and_active_flag() {
    let store = Arc::new(seeded_store());
    let executor = QueryExecutor::new(store.clone(), site_queries());

    let privacy = legal::assemble(&executor, "privacy-policy")
        .await
        .expect("active privacy policy");
    assert_eq!(privacy.title, "Privacy Policy");
    assert_eq!(privacy.slug, "privacy-policy");
    let metadata = privacy.metadata(&SiteConfig::default());
    assert_eq!(metadata.title, "Privacy Policy");
    assert_eq!(
        metadata.description,
        "We collect the personal data you give us when you contact us."
    );
    assert_eq!(
        metadata.canonical_url,
        "http://localhost:3000/legal/privacy-policy"
    );

    let before = store.listings();
    let err = legal::assemble(&executor, "made-up-type").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.listings(), before, "unknown kinds never reach the store");

    // Known kind, but its only document is inactive.
    let err = legal::assemble(&executor, "cookie-policy").await.unwrap_err();
    assert!(err.is_not_found());

    store.patch("legal-privacy", json!({ "isActive": false }));
    let err = legal::assemble(&executor, "privacy-policy").await.unwrap_err();
    assert_eq!(err, PageError::NotFound("/legal/privacy-policy".into()));
}

/// Page data is reused until the revalidation interval passes, then refreshed behind
/// one more stale answer.
#[tokio::test(start_paused = true)]
async fn test_pages_revalidate_after_the_interval() {
    let store = Arc::new(seeded_store());
    let system = start(store.clone());

    assert!(system.legal("privacy-policy").await.is_ok());
    store.patch("legal-privacy", json!({ "isActive": false }));

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(system.legal("privacy-policy").await.is_ok());

    tokio::time::sleep(Duration::from_secs(31)).await;
    // Stale: served once more while the refresh runs.
    assert!(system.legal("privacy-policy").await.is_ok());
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(system.legal("privacy-policy").await.unwrap_err().is_not_found());

    system.shutdown().await.expect("shutdown");
}

/// Rendering a page never rewrites the policy a hook registered for the same query.
#[tokio::test(start_paused = true)]
async fn test_page_renders_leave_hook_policies_alone() {
    let store = Arc::new(seeded_store());
    let system = start(store.clone());

    let mut statistics = system.hooks.statistics().observe().await.expect("observe");
    statistics.settled().await.expect("settled");
    // The home page reads the same statistics query.
    assert_eq!(system.home().await.statistics.items.len(), 3);

    let stats = system.hooks.client().stats().await.expect("stats");
    assert_eq!(stats.entries, 1);

    tokio::time::sleep(Duration::from_secs(301)).await;
    assert_eq!(system.hooks.focus_regained().await.expect("focus"), 1);

    system.shutdown().await.expect("shutdown");
}

/// A refresh that fails after the interval keeps serving the last good content.
#[tokio::test(start_paused = true)]
async fn test_failed_page_refresh_keeps_last_content() {
    let store = Arc::new(seeded_store());
    let system = start(store.clone());

    let seeded = system.layout().await;
    assert_eq!(seeded.site_name, "Harbourline Capital");

    tokio::time::sleep(Duration::from_secs(61)).await;
    store.set_offline(true);
    assert_eq!(system.layout().await, seeded);
    tokio::time::sleep(Duration::from_millis(10)).await;
    let layout = system.layout().await;
    assert_eq!(layout, seeded);
    assert_ne!(layout, SiteLayout::fallback());

    system.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_ui_state_is_shared_through_the_system() {
    let system = start(Arc::new(seeded_store()));
    let receiver = system.ui.subscribe();

    system.ui.open_contact_modal();
    assert!(receiver.borrow().contact_modal_open);

    system.shutdown().await.expect("shutdown");
}
