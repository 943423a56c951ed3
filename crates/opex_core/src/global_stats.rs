//! Cross-country supervisor statistics, Foundation level.

use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use crate::backlog::distinct_element_ids;
use crate::pillars::NO_PILLAR_CODE;
use crate::ports::{AssessmentStore, Result, ScoreFilter};
use crate::types::{ActionPlan, Country, CountryScope, Element, LevelScore, MaturityLevel, PlanStatus};
use crate::views::{GlobalCountryStats, PillarBreakdown};

/// One row per country with at least one Foundation score surviving the
/// element join and the active filter. Countries with nothing usable are
/// absent, not zero-filled. Result sorted by country name, ascending.
pub async fn compute_global_country_stats(
    store: &dyn AssessmentStore,
) -> Result<Vec<GlobalCountryStats>> {
    let scores = store
        .level_scores(&ScoreFilter::all(
            MaturityLevel::Foundation,
            &CountryScope::Global,
        ))
        .await?;
    if scores.is_empty() {
        return Ok(Vec::new());
    }

    let ids = distinct_element_ids(&scores);
    let (elements, plans, total_elements) = tokio::try_join!(
        store.elements_by_ids(&ids),
        store.action_plans_by_elements(&ids, Some(MaturityLevel::Foundation)),
        store.active_element_count(),
    )?;

    let by_id: HashMap<Uuid, Element> = elements.into_iter().map(|e| (e.id, e)).collect();

    // BTreeMap keyed by country gives the final name ordering for free.
    let mut by_country: BTreeMap<Country, Vec<LevelScore>> = BTreeMap::new();
    for score in scores {
        let visible = by_id
            .get(&score.element_id)
            .map_or(false, |e| e.is_visible());
        if visible {
            by_country.entry(score.country.clone()).or_default().push(score);
        }
    }

    let out: Vec<GlobalCountryStats> = by_country
        .into_iter()
        .map(|(country, rows)| country_stats(country, &rows, &by_id, &plans, total_elements))
        .collect();
    tracing::debug!(countries = out.len(), "global stats computed");
    Ok(out)
}

/// Arithmetic mean rounded half away from zero. Sums stay exact; the
/// rounding happens only here, where a percentage leaves for display.
pub(crate) fn round_mean(sum: i64, count: u64) -> i32 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as i32
}

fn country_stats(
    country: Country,
    rows: &[LevelScore],
    elements: &HashMap<Uuid, Element>,
    plans: &[ActionPlan],
    total_elements: u64,
) -> GlobalCountryStats {
    let has_plan = |element_id: Uuid| {
        plans
            .iter()
            .any(|p| p.element_id == element_id && p.country == country)
    };

    let gap_elements = rows.iter().filter(|s| s.is_gap()).count() as u64;
    let elements_with_plan = rows
        .iter()
        .filter(|s| s.is_gap() && has_plan(s.element_id))
        .count() as u64;
    let elements_without_plan = gap_elements - elements_with_plan;

    // Plan totals span every visible element with plans for this country,
    // not only gap elements, a wider net than the partition above.
    let country_plans: Vec<&ActionPlan> = plans
        .iter()
        .filter(|p| {
            p.country == country
                && elements
                    .get(&p.element_id)
                    .map_or(false, |e| e.is_visible())
        })
        .collect();
    let total_plans = country_plans.len() as u64;
    let done_plans = country_plans
        .iter()
        .filter(|p| p.status == PlanStatus::Done)
        .count() as u64;

    let sum: i64 = rows.iter().map(|s| s.score as i64).sum();
    let average_score = round_mean(sum, rows.len() as u64);
    let complete_elements = rows
        .iter()
        .filter(|s| s.score == LevelScore::COMPLETE)
        .count() as u64;

    GlobalCountryStats {
        country,
        total_elements,
        gap_elements,
        elements_with_plan,
        elements_without_plan,
        total_plans,
        done_plans,
        average_score,
        complete_elements,
        pillars: pillar_breakdown(rows, elements),
    }
}

/// Group one country's scores by pillar: gap count plus average score,
/// sorted by pillar code. Dangling pillar references keep the same
/// synthetic "-" bucket as pillar stats.
fn pillar_breakdown(
    rows: &[LevelScore],
    elements: &HashMap<Uuid, Element>,
) -> Vec<PillarBreakdown> {
    struct Acc {
        pillar_id: Option<Uuid>,
        code: String,
        gaps: u64,
        sum: i64,
        n: u64,
    }

    let mut buckets: HashMap<Option<Uuid>, Acc> = HashMap::new();
    for score in rows {
        let pillar = elements
            .get(&score.element_id)
            .and_then(|e| e.pillar.as_ref());
        let acc = buckets
            .entry(pillar.map(|p| p.id))
            .or_insert_with(|| Acc {
                pillar_id: pillar.map(|p| p.id),
                code: pillar
                    .map(|p| p.code.clone())
                    .unwrap_or_else(|| NO_PILLAR_CODE.into()),
                gaps: 0,
                sum: 0,
                n: 0,
            });
        if score.is_gap() {
            acc.gaps += 1;
        }
        acc.sum += score.score as i64;
        acc.n += 1;
    }

    let mut out: Vec<PillarBreakdown> = buckets
        .into_values()
        .map(|acc| PillarBreakdown {
            pillar_id: acc.pillar_id,
            code: acc.code,
            gap_elements: acc.gaps,
            average_score: round_mean(acc.sum, acc.n),
        })
        .collect();
    out.sort_by(|a, b| a.code.cmp(&b.code));
    out
}
