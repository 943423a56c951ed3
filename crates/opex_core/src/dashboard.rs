//! Dashboard aggregation: headline counts for one country (or Global)
//! at one maturity level.

use std::collections::HashSet;

use uuid::Uuid;

use crate::backlog::{distinct_element_ids, resolve_backlog};
use crate::ports::{AssessmentStore, Result, ScoreFilter};
use crate::types::{CountryScope, LevelScore, MaturityLevel};
use crate::views::{DashboardStats, MaturityCounts};

/// Compute the dashboard numbers for a scope and level.
///
/// `total_elements` is the active catalogue size and is deliberately not
/// filtered by country. `maturity_counts` always spans all five levels;
/// the summary widget shows the whole ladder no matter which level the
/// dashboard is focused on. A scope with zero scored elements yields
/// all-zero counts, never an error.
pub async fn compute_dashboard_stats(
    store: &dyn AssessmentStore,
    scope: &CountryScope,
    level: MaturityLevel,
) -> Result<DashboardStats> {
    let (total_elements, backlog) = tokio::try_join!(
        store.active_element_count(),
        resolve_backlog(store, scope, level),
    )?;

    let gap_elements = backlog.len() as u64;
    let elements_without_plan = backlog.iter().filter(|e| !e.has_plan()).count() as u64;
    let maturity_counts = completion_counts(store, scope).await?;

    Ok(DashboardStats {
        total_elements,
        gap_elements,
        elements_without_plan,
        maturity_counts,
    })
}

/// Count (country, element) pairs at exactly 100 per level, restricted to
/// elements that are currently visible.
async fn completion_counts(
    store: &dyn AssessmentStore,
    scope: &CountryScope,
) -> Result<MaturityCounts> {
    let mut complete: Vec<LevelScore> = Vec::new();
    for level in MaturityLevel::ALL {
        let scores = store.level_scores(&ScoreFilter::all(level, scope)).await?;
        complete.extend(
            scores
                .into_iter()
                .filter(|s| s.score == LevelScore::COMPLETE),
        );
    }
    if complete.is_empty() {
        return Ok(MaturityCounts::default());
    }

    let ids = distinct_element_ids(&complete);
    let visible: HashSet<Uuid> = store
        .elements_by_ids(&ids)
        .await?
        .into_iter()
        .filter(|e| e.is_visible())
        .map(|e| e.id)
        .collect();

    let mut counts = MaturityCounts::default();
    for score in &complete {
        if visible.contains(&score.element_id) {
            counts.increment(score.level);
        }
    }
    Ok(counts)
}
