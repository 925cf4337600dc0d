use serde_json::json;
use site_content::error::ContentError;
use site_content::query::{catalog, execute, site_queries, QueryExecutor, QueryKey, QueryParams};
use site_content::schema::{site_schema, ViolationKind};
use site_content::store::seed::seeded_store;
use site_content::store::{ContentStore, InMemoryStore};
use std::sync::Arc;

fn executor(store: Arc<InMemoryStore>) -> QueryExecutor {
    QueryExecutor::new(store, site_queries())
}

// --- Validation ---

#[tokio::test]
async fn test_seeded_documents_validate_clean() {
    let registry = site_schema().expect("site schema");
    let store = seeded_store();

    for type_def in registry.document_types() {
        let documents = store
            .documents(&type_def.name)
            .await
            .expect("listing failed");
        for document in documents {
            let violations = registry
                .validate_instance(&type_def.name, &document.clone().into())
                .expect("type is registered");
            assert!(
                violations.is_empty(),
                "{} has violations: {violations:?}",
                document["_id"]
            );
        }
    }
}

#[test]
fn test_validation_is_empty_only_for_conforming_candidates() {
    let registry = site_schema().expect("site schema");
    let valid = json!({
        "_id": "member-new",
        "_type": "teamMember",
        "name": "Ines Duarte",
        "role": "Analyst",
        "linkedin": "https://www.linkedin.com/in/ines",
        "order": 4
    });
    assert_eq!(registry.validate_instance("teamMember", &valid), Ok(vec![]));

    let breakages = [
        ("name", json!(null), ViolationKind::Missing),
        ("name", json!("   "), ViolationKind::Missing),
        ("role", json!(7), ViolationKind::WrongType { expected: "string".into() }),
        ("linkedin", json!("linkedin.com/in/ines"), ViolationKind::InvalidUrl),
        ("order", json!(-1), ViolationKind::BelowMin { min: 0.0, actual: -1.0 }),
        ("name", json!("x".repeat(81)), ViolationKind::TooLong { max: 80, actual: 81 }),
    ];
    for (field, value, expected) in breakages {
        let mut candidate = valid.clone();
        candidate[field] = value;
        let violations = registry
            .validate_instance("teamMember", &candidate)
            .expect("type is registered");
        assert_eq!(violations.len(), 1, "breaking {field}");
        assert_eq!(violations[0].path, field);
        assert_eq!(violations[0].kind, expected);
    }
}

#[test]
fn test_nested_violations_carry_their_path() {
    let registry = site_schema().expect("site schema");
    let candidate = json!({
        "email": "not-an-email",
        "address": { "street": "1 Quay Street", "country": "United Kingdom" },
        "socials": [
            { "platform": "linkedin", "url": "https://www.linkedin.com/company/h" },
            { "platform": "myspace", "url": "https://myspace.example" }
        ]
    });
    let violations = registry
        .validate_instance("contactDetails", &candidate)
        .expect("type is registered");
    let paths: Vec<_> = violations.iter().map(|v| v.path.as_str()).collect();
    assert_eq!(paths, ["email", "address.city", "socials[1].platform"]);
}

// --- Execution ---

#[tokio::test]
async fn test_singleton_queries_return_at_most_one_document() {
    let store = Arc::new(seeded_store());
    store.insert(json!({
        "_id": "hero-home-2",
        "_type": "heroSection",
        "page": "home",
        "title": "A second home hero"
    }));
    let executor = executor(store);

    let key = QueryKey::new(catalog::HERO_BY_PAGE).param("page", "home");
    let result = executor.run(&key).await.expect("query failed");
    assert_eq!(result.many().len(), 1);
    // Earliest inserted match wins.
    assert_eq!(result.one().unwrap()["_id"], "hero-home");

    let missing = QueryKey::new(catalog::HERO_BY_PAGE).param("page", "contact");
    assert!(executor.run(&missing).await.expect("query failed").is_empty());
}

#[tokio::test]
async fn test_reexecution_without_writes_is_idempotent() {
    let executor = executor(Arc::new(seeded_store()));
    for name in [
        catalog::TEAM_MEMBERS,
        catalog::INVESTMENT_STRATEGIES,
        catalog::INSIGHTS,
        catalog::SITE_SETTINGS,
    ] {
        let key = QueryKey::new(name);
        let first = executor.run(&key).await.expect("query failed");
        let second = executor.run(&key).await.expect("query failed");
        assert_eq!(first, second, "{name}");
    }
}

#[tokio::test]
async fn test_team_members_are_ordered_and_photos_resolved() {
    let executor = executor(Arc::new(seeded_store()));
    let result = executor
        .run(&QueryKey::new(catalog::TEAM_MEMBERS))
        .await
        .expect("query failed");

    let names: Vec<_> = result.many().iter().map(|m| m["name"].clone()).collect();
    assert_eq!(names, [json!("Amara Okafor"), json!("Jonas Weber"), json!("Sun-hee Lee")]);

    let photo = &result.many()[0]["photo"];
    assert_eq!(photo["url"], "https://cdn.harbourline.example/amara.webp");
    assert_eq!(photo["alt"], "Amara Okafor");
    assert_eq!(photo["width"], 800);
    // Unset optional fields are left out of the projection.
    assert!(result.many()[2].get("photo").is_none());
}

#[tokio::test]
async fn test_references_and_missing_assets_resolve() {
    let store = Arc::new(seeded_store());
    let executor = executor(store.clone());

    let strategies = executor
        .run(&QueryKey::new(catalog::INVESTMENT_STRATEGIES))
        .await
        .expect("query failed");
    let first = &strategies.many()[0];
    assert_eq!(first["title"], "Strategic Bond");
    assert_eq!(
        first["category"],
        json!({
            "_id": "category-income",
            "_type": "strategyCategory",
            "title": "Income",
            "slug": { "current": "income" }
        })
    );

    store.remove("category-growth");
    let strategies = executor
        .run(&QueryKey::new(catalog::INVESTMENT_STRATEGIES))
        .await
        .expect("query failed");
    let equity = strategies
        .many()
        .iter()
        .find(|s| s["_id"] == "strategy-global-equity")
        .expect("strategy listed");
    assert!(equity["category"].is_null());

    let insights = executor
        .run(&QueryKey::new(catalog::INSIGHTS))
        .await
        .expect("query failed");
    let rates = &insights.many()[1];
    assert_eq!(rates["_id"], "insight-rates");
    assert!(rates["coverImage"].is_null());
    assert_eq!(rates["file"]["mimeType"], "application/pdf");
}

#[tokio::test]
async fn test_missing_parameters_fail_before_touching_the_store() {
    let store = Arc::new(seeded_store());
    let queries = site_queries();
    let definition = queries.get(catalog::LEGAL_PAGE_BY_TYPE).expect("defined");

    let err = execute(definition, &QueryParams::new(), store.as_ref())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ContentError::MissingParameter {
            query: catalog::LEGAL_PAGE_BY_TYPE.into(),
            param: "type".into()
        }
    );
    assert_eq!(store.listings(), 0);
}

#[tokio::test]
async fn test_store_failures_surface_as_transient_errors() {
    let store = Arc::new(seeded_store());
    store.set_offline(true);
    let err = executor(store)
        .run(&QueryKey::new(catalog::STATISTICS))
        .await
        .unwrap_err();
    assert!(err.is_transient());
}
