//! Backlog resolution: every (element, country) pair scored below
//! completion for a level, enriched with pillar metadata and plans.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::ports::{AssessmentStore, Result, ScoreFilter};
use crate::types::{ActionPlan, CountryScope, Element, LevelScore, MaturityLevel};
use crate::views::BacklogEntry;

/// Resolve the backlog for a scope and level.
///
/// The gap-score query runs first; an empty result short-circuits so no
/// element or plan queries are issued for fully-complete scopes. Element
/// and plan lookups then run concurrently; neither depends on the
/// other's result. Under the Global scope each (element, country) pair
/// keeps its own row; countries are never merged.
///
/// Inactive elements and elements under inactive pillars are dropped as
/// the very last step, after score filtering, so a pillar deactivation
/// takes effect immediately without touching score rows. Callers must not
/// depend on result ordering.
pub async fn resolve_backlog(
    store: &dyn AssessmentStore,
    scope: &CountryScope,
    level: MaturityLevel,
) -> Result<Vec<BacklogEntry>> {
    let scores = store.level_scores(&ScoreFilter::gaps(level, scope)).await?;
    if scores.is_empty() {
        return Ok(Vec::new());
    }

    let ids = distinct_element_ids(&scores);
    let (elements, plans) = tokio::try_join!(
        store.elements_by_ids(&ids),
        store.action_plans_by_elements(&ids, Some(level)),
    )?;

    let entries = assemble(scores, elements, plans, level);
    tracing::debug!(%scope, %level, entries = entries.len(), "backlog resolved");
    Ok(entries)
}

/// Distinct element ids referenced by `scores`, first-seen order.
pub(crate) fn distinct_element_ids(scores: &[LevelScore]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    scores
        .iter()
        .map(|s| s.element_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Pure join step: one entry per score row, combining the element, its
/// pillar, and the plans matching the score's country. Scores whose
/// element id resolves to nothing are dropped silently (inconsistent
/// references are not errors); visibility filtering happens last.
fn assemble(
    scores: Vec<LevelScore>,
    elements: Vec<Element>,
    plans: Vec<ActionPlan>,
    level: MaturityLevel,
) -> Vec<BacklogEntry> {
    let by_id: HashMap<Uuid, Element> = elements.into_iter().map(|e| (e.id, e)).collect();
    scores
        .into_iter()
        .filter_map(|score| {
            let element = by_id.get(&score.element_id)?.clone();
            let matching = plans
                .iter()
                .filter(|p| p.element_id == score.element_id && p.country == score.country)
                .cloned()
                .collect();
            Some(BacklogEntry {
                element,
                country: score.country,
                level,
                score: score.score,
                notes: score.notes,
                plans: matching,
            })
        })
        .filter(|entry| entry.element.is_visible())
        .collect()
}
