//! Storage port for the aggregation core.
//! Implemented by opex_postgres — core logic depends only on this trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::OpexError;
use crate::types::{
    ActionPlan, ActionPlanPatch, Country, CountryScope, Element, LevelScore, MaturityLevel,
    NewActionPlan, PlanStatus,
};

pub type Result<T> = std::result::Result<T, OpexError>;

/// Filter for level-score queries.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreFilter {
    pub level: MaturityLevel,
    /// Restrict to one country; `None` spans all countries (Global scope).
    pub country: Option<Country>,
    /// Keep only scores strictly below this value.
    pub score_below: Option<i32>,
}

impl ScoreFilter {
    /// Gap scores (below completion) for a scope and level.
    pub fn gaps(level: MaturityLevel, scope: &CountryScope) -> Self {
        Self {
            level,
            country: scope.as_country().cloned(),
            score_below: Some(LevelScore::COMPLETE),
        }
    }

    /// Every score for a scope and level, complete ones included.
    pub fn all(level: MaturityLevel, scope: &CountryScope) -> Self {
        Self {
            level,
            country: scope.as_country().cloned(),
            score_below: None,
        }
    }
}

/// Query and mutation capabilities the core requires from the
/// persistence collaborator.
///
/// Reads carry no transactional-isolation guarantee across calls: a
/// score fetch and the element fetch that follows may straddle a
/// concurrent write. Aggregations accept that as eventual consistency.
/// Writes are single fire-and-forget statements with no
/// optimistic-concurrency token, so the last write wins.
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Level scores matching `filter`. Ordering is unspecified.
    async fn level_scores(&self, filter: &ScoreFilter) -> Result<Vec<LevelScore>>;

    /// Elements for the given ids, each embedding its owning pillar.
    /// Ids without a backing element are silently absent from the result.
    async fn elements_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Element>>;

    /// Action plans referencing the given elements, optionally restricted
    /// to one maturity level.
    async fn action_plans_by_elements(
        &self,
        ids: &[Uuid],
        level: Option<MaturityLevel>,
    ) -> Result<Vec<ActionPlan>>;

    /// Count of active elements under active pillars, the catalogue size
    /// shared by every country.
    async fn active_element_count(&self) -> Result<u64>;

    /// Load one action plan by id.
    async fn action_plan(&self, id: Uuid) -> Result<Option<ActionPlan>>;

    /// Insert a validated plan; returns the new id.
    async fn insert_action_plan(&self, record: &NewActionPlan) -> Result<Uuid>;

    /// Apply a partial update. `None` fields keep their stored value.
    async fn update_action_plan(&self, id: Uuid, patch: &ActionPlanPatch) -> Result<()>;

    /// Set the status field only.
    async fn update_action_plan_status(&self, id: Uuid, status: PlanStatus) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_filter_carries_completion_bound() {
        let filter = ScoreFilter::gaps(MaturityLevel::Silver, &CountryScope::country("Brazil"));
        assert_eq!(filter.level, MaturityLevel::Silver);
        assert_eq!(filter.country.as_ref().unwrap().as_str(), "Brazil");
        assert_eq!(filter.score_below, Some(100));
    }

    #[test]
    fn global_scope_drops_country_filter() {
        let filter = ScoreFilter::all(MaturityLevel::Foundation, &CountryScope::Global);
        assert!(filter.country.is_none());
        assert!(filter.score_below.is_none());
    }
}
