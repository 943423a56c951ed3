//! Backlog resolver invariants against the in-memory store.

use std::sync::Arc;

use opex_core::{
    AssessmentService, CountryScope, CreateActionPlanInput, Country, MaturityLevel,
};
use opex_harness::fixtures::{seed_catalogue, user_session};
use opex_harness::MemoryStore;

fn plan_input(element_id: uuid::Uuid, country: &str) -> CreateActionPlanInput {
    CreateActionPlanInput {
        element_id,
        country: Country::new(country),
        level: None,
        problem: "problema".into(),
        action: "ação".into(),
        problem_en: None,
        action_en: None,
        owner: "Ana".into(),
        due_date: None,
    }
}

#[tokio::test]
async fn backlog_excludes_complete_scores() {
    opex_harness::init_tracing();
    let store = Arc::new(MemoryStore::new());
    let cat = seed_catalogue(&store).await;
    store.set_score(cat.e1, "Brazil", MaturityLevel::Foundation, 100).await;
    store.set_score(cat.e2, "Brazil", MaturityLevel::Foundation, 60).await;
    store.set_score(cat.e3, "Brazil", MaturityLevel::Foundation, 0).await;

    let service = AssessmentService::new(store);
    let backlog = service
        .resolve_backlog(
            &user_session(),
            &CountryScope::country("Brazil"),
            MaturityLevel::Foundation,
        )
        .await
        .unwrap();

    assert_eq!(backlog.len(), 2);
    assert!(backlog.iter().all(|e| e.score < 100));
    assert!(backlog.iter().all(|e| e.element.id != cat.e1));
}

#[tokio::test]
async fn backlog_is_idempotent_without_writes() {
    let store = Arc::new(MemoryStore::new());
    let cat = seed_catalogue(&store).await;
    store.set_score(cat.e1, "Brazil", MaturityLevel::Foundation, 40).await;
    store.set_score(cat.e2, "Brazil", MaturityLevel::Foundation, 70).await;

    let service = AssessmentService::new(store);
    let session = user_session();
    let scope = CountryScope::country("Brazil");

    let mut first = service
        .resolve_backlog(&session, &scope, MaturityLevel::Foundation)
        .await
        .unwrap();
    let mut second = service
        .resolve_backlog(&session, &scope, MaturityLevel::Foundation)
        .await
        .unwrap();

    // Ordering is unspecified, so compare as sets.
    let key = |e: &opex_core::BacklogEntry| (e.element.id, e.country.clone());
    first.sort_by_key(key);
    second.sort_by_key(key);
    let first_keys: Vec<_> = first.iter().map(|e| (e.element.id, e.score)).collect();
    let second_keys: Vec<_> = second.iter().map(|e| (e.element.id, e.score)).collect();
    assert_eq!(first_keys, second_keys);
}

#[tokio::test]
async fn global_scope_keeps_one_row_per_country() {
    let store = Arc::new(MemoryStore::new());
    let cat = seed_catalogue(&store).await;
    store.set_score(cat.e1, "Brazil", MaturityLevel::Foundation, 50).await;
    store.set_score(cat.e1, "France", MaturityLevel::Foundation, 80).await;

    let service = AssessmentService::new(store);
    let backlog = service
        .resolve_backlog(&user_session(), &CountryScope::Global, MaturityLevel::Foundation)
        .await
        .unwrap();

    assert_eq!(backlog.len(), 2);
    assert!(backlog.iter().all(|e| e.element.id == cat.e1));
    let mut countries: Vec<&str> = backlog.iter().map(|e| e.country.as_str()).collect();
    countries.sort();
    assert_eq!(countries, vec!["Brazil", "France"]);
}

#[tokio::test]
async fn pillar_deactivation_hides_gaps_immediately() {
    let store = Arc::new(MemoryStore::new());
    let cat = seed_catalogue(&store).await;
    store.set_score(cat.e2, "Brazil", MaturityLevel::Foundation, 60).await;
    store.set_score(cat.e3, "Brazil", MaturityLevel::Foundation, 0).await;

    let service = AssessmentService::new(store.clone());
    let session = user_session();
    let scope = CountryScope::country("Brazil");

    let before = service
        .resolve_backlog(&session, &scope, MaturityLevel::Foundation)
        .await
        .unwrap();
    assert_eq!(before.len(), 2);

    // Soft-delete the pillar owning e3; its score row stays untouched.
    store.set_pillar_active(cat.quality_id, false).await;

    let after = service
        .resolve_backlog(&session, &scope, MaturityLevel::Foundation)
        .await
        .unwrap();
    assert_eq!(after.len(), 1);
    assert!(after.iter().all(|e| e.element.id != cat.e3));
}

#[tokio::test]
async fn inactive_element_is_excluded() {
    let store = Arc::new(MemoryStore::new());
    let cat = seed_catalogue(&store).await;
    store.set_score(cat.e2, "Brazil", MaturityLevel::Foundation, 10).await;
    store.set_element_active(cat.e2, false).await;

    let service = AssessmentService::new(store);
    let backlog = service
        .resolve_backlog(
            &user_session(),
            &CountryScope::country("Brazil"),
            MaturityLevel::Foundation,
        )
        .await
        .unwrap();
    assert!(backlog.is_empty());
}

#[tokio::test]
async fn unscored_country_yields_empty_backlog() {
    let store = Arc::new(MemoryStore::new());
    seed_catalogue(&store).await;

    let service = AssessmentService::new(store);
    let backlog = service
        .resolve_backlog(
            &user_session(),
            &CountryScope::country("Chile"),
            MaturityLevel::Foundation,
        )
        .await
        .unwrap();
    assert!(backlog.is_empty());
}

#[tokio::test]
async fn entries_carry_plans_for_their_own_country_only() {
    let store = Arc::new(MemoryStore::new());
    let cat = seed_catalogue(&store).await;
    store.set_score(cat.e2, "Brazil", MaturityLevel::Foundation, 60).await;
    store.set_score(cat.e2, "France", MaturityLevel::Foundation, 70).await;

    let service = AssessmentService::new(store);
    let session = user_session();
    service
        .create_action_plan(&session, plan_input(cat.e2, "Brazil"))
        .await
        .unwrap();

    let backlog = service
        .resolve_backlog(&session, &CountryScope::Global, MaturityLevel::Foundation)
        .await
        .unwrap();
    for entry in backlog {
        match entry.country.as_str() {
            "Brazil" => assert_eq!(entry.plans.len(), 1),
            "France" => assert!(entry.plans.is_empty()),
            other => panic!("unexpected country {other}"),
        }
    }
}
