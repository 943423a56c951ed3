//! Per-pillar gap coverage, fixed to the Foundation level.

use std::collections::HashMap;

use uuid::Uuid;

use crate::backlog::resolve_backlog;
use crate::localize::Language;
use crate::ports::{AssessmentStore, Result};
use crate::types::{CountryScope, MaturityLevel};
use crate::views::{BacklogEntry, PillarStats};

/// Bucket for gaps whose pillar reference cannot be resolved. Gaps are
/// never silently lost to a broken reference.
pub const NO_PILLAR_CODE: &str = "-";
pub const NO_PILLAR_NAME: &str = "No pillar";

/// Group the Foundation backlog by pillar and partition each pillar's
/// gaps by plan coverage. Sorted by pillar code, ascending,
/// case-sensitive.
pub async fn compute_pillar_stats(
    store: &dyn AssessmentStore,
    scope: &CountryScope,
    language: Language,
) -> Result<Vec<PillarStats>> {
    let backlog = resolve_backlog(store, scope, MaturityLevel::Foundation).await?;
    Ok(group_by_pillar(&backlog, language))
}

fn group_by_pillar(backlog: &[BacklogEntry], language: Language) -> Vec<PillarStats> {
    let mut buckets: HashMap<Option<Uuid>, PillarStats> = HashMap::new();
    for entry in backlog {
        let stats = buckets
            .entry(entry.pillar().map(|p| p.id))
            .or_insert_with(|| match entry.pillar() {
                Some(p) => PillarStats {
                    pillar_id: Some(p.id),
                    code: p.code.clone(),
                    name: p.name.resolve(language).to_string(),
                    gap_elements: 0,
                    elements_with_plan: 0,
                    elements_without_plan: 0,
                },
                None => PillarStats {
                    pillar_id: None,
                    code: NO_PILLAR_CODE.into(),
                    name: NO_PILLAR_NAME.into(),
                    gap_elements: 0,
                    elements_with_plan: 0,
                    elements_without_plan: 0,
                },
            });
        stats.gap_elements += 1;
        if entry.has_plan() {
            stats.elements_with_plan += 1;
        } else {
            stats.elements_without_plan += 1;
        }
    }

    let mut out: Vec<PillarStats> = buckets.into_values().collect();
    out.sort_by(|a, b| a.code.cmp(&b.code));
    out
}
