//! Cross-country supervisor statistics against the in-memory store.

use std::sync::Arc;

use opex_core::{
    AssessmentService, Country, CreateActionPlanInput, MaturityLevel, OpexError, PlanStatus,
};
use opex_harness::fixtures::{seed_catalogue, supervisor_session, user_session};
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
async fn requires_supervisor_role() {
    opex_harness::init_tracing();
    let store = Arc::new(MemoryStore::new());
    seed_catalogue(&store).await;

    let service = AssessmentService::new(store);
    let err = service
        .global_country_stats(&user_session())
        .await
        .unwrap_err();
    assert!(matches!(err, OpexError::Unauthorized(_)));
}

#[tokio::test]
async fn empty_store_yields_no_countries() {
    let store = Arc::new(MemoryStore::new());
    seed_catalogue(&store).await;

    let service = AssessmentService::new(store);
    let stats = service
        .global_country_stats(&supervisor_session())
        .await
        .unwrap();
    assert!(stats.is_empty());
}

#[tokio::test]
async fn average_score_rounding_golden_values() {
    let store = Arc::new(MemoryStore::new());
    let cat = seed_catalogue(&store).await;
    // Brazil: mean of [50, 100] is exactly 75.
    store.set_score(cat.e1, "Brazil", MaturityLevel::Foundation, 50).await;
    store.set_score(cat.e2, "Brazil", MaturityLevel::Foundation, 100).await;
    // France: mean of [33, 33, 34] is 33.33, rounding down to 33.
    store.set_score(cat.e1, "France", MaturityLevel::Foundation, 33).await;
    store.set_score(cat.e2, "France", MaturityLevel::Foundation, 33).await;
    store.set_score(cat.e3, "France", MaturityLevel::Foundation, 34).await;

    let service = AssessmentService::new(store);
    let stats = service
        .global_country_stats(&supervisor_session())
        .await
        .unwrap();

    let brazil = stats.iter().find(|s| s.country.as_str() == "Brazil").unwrap();
    assert_eq!(brazil.average_score, 75);
    let france = stats.iter().find(|s| s.country.as_str() == "France").unwrap();
    assert_eq!(france.average_score, 33);
}

#[tokio::test]
async fn sorted_by_country_name() {
    let store = Arc::new(MemoryStore::new());
    let cat = seed_catalogue(&store).await;
    store.set_score(cat.e1, "France", MaturityLevel::Foundation, 10).await;
    store.set_score(cat.e1, "Brazil", MaturityLevel::Foundation, 10).await;
    store.set_score(cat.e1, "Argentina", MaturityLevel::Foundation, 10).await;

    let service = AssessmentService::new(store);
    let stats = service
        .global_country_stats(&supervisor_session())
        .await
        .unwrap();
    let names: Vec<&str> = stats.iter().map(|s| s.country.as_str()).collect();
    assert_eq!(names, vec!["Argentina", "Brazil", "France"]);
}

#[tokio::test]
async fn plan_totals_span_complete_elements_too() {
    let store = Arc::new(MemoryStore::new());
    let cat = seed_catalogue(&store).await;
    store.set_score(cat.e1, "Brazil", MaturityLevel::Foundation, 100).await;
    store.set_score(cat.e2, "Brazil", MaturityLevel::Foundation, 60).await;

    let service = AssessmentService::new(store);
    let session = user_session();
    // A plan on the already-complete element plus one on the gap.
    let done_id = service
        .create_action_plan(&session, plan_input(cat.e1, "Brazil"))
        .await
        .unwrap();
    service
        .set_action_plan_status(&session, done_id, PlanStatus::Done)
        .await
        .unwrap();
    service
        .create_action_plan(&session, plan_input(cat.e2, "Brazil"))
        .await
        .unwrap();

    let stats = service
        .global_country_stats(&supervisor_session())
        .await
        .unwrap();
    let brazil = &stats[0];

    // Gap partition only sees e2…
    assert_eq!(brazil.gap_elements, 1);
    assert_eq!(brazil.elements_with_plan, 1);
    assert_eq!(brazil.elements_without_plan, 0);
    // …but plan totals count both plans, and the DONE one.
    assert_eq!(brazil.total_plans, 2);
    assert_eq!(brazil.done_plans, 1);
    assert_eq!(brazil.complete_elements, 1);
    assert_eq!(brazil.average_score, 80);
}

#[tokio::test]
async fn pillar_breakdown_sorted_with_averages() {
    let store = Arc::new(MemoryStore::new());
    let cat = seed_catalogue(&store).await;
    store.set_score(cat.e1, "Brazil", MaturityLevel::Foundation, 60).await;
    store.set_score(cat.e2, "Brazil", MaturityLevel::Foundation, 80).await;
    store.set_score(cat.e3, "Brazil", MaturityLevel::Foundation, 100).await;

    let service = AssessmentService::new(store);
    let stats = service
        .global_country_stats(&supervisor_session())
        .await
        .unwrap();
    let brazil = &stats[0];

    let codes: Vec<&str> = brazil.pillars.iter().map(|b| b.code.as_str()).collect();
    assert_eq!(codes, vec!["QUA", "SAF"]);
    let quality = &brazil.pillars[0];
    assert_eq!(quality.gap_elements, 0);
    assert_eq!(quality.average_score, 100);
    let safety = &brazil.pillars[1];
    assert_eq!(safety.gap_elements, 2);
    assert_eq!(safety.average_score, 70);
}

#[tokio::test]
async fn country_disappears_when_its_scored_elements_deactivate() {
    let store = Arc::new(MemoryStore::new());
    let cat = seed_catalogue(&store).await;
    store.set_score(cat.e3, "France", MaturityLevel::Foundation, 20).await;
    store.set_score(cat.e1, "Brazil", MaturityLevel::Foundation, 20).await;
    store.set_pillar_active(cat.quality_id, false).await;

    let service = AssessmentService::new(store);
    let stats = service
        .global_country_stats(&supervisor_session())
        .await
        .unwrap();
    let names: Vec<&str> = stats.iter().map(|s| s.country.as_str()).collect();
    assert_eq!(names, vec!["Brazil"]);
}
