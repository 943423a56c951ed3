//! In-memory assessment store.
//!
//! Keeps the four tables in the same relational shape as the real
//! adapter and performs the pillar join at query time, so deactivating a
//! pillar is visible to the very next read, which is the behavior the
//! aggregation invariants rely on.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use opex_core::ports::{AssessmentStore, Result, ScoreFilter};
use opex_core::{
    ActionPlan, ActionPlanPatch, BilingualText, Country, Element, LevelScore, MaturityLevel,
    NewActionPlan, OpexError, Pillar, PlanStatus,
};

/// Element row as stored: pillar referenced by id, not embedded.
#[derive(Debug, Clone)]
struct ElementRecord {
    id: Uuid,
    code: String,
    name: BilingualText,
    active: bool,
    pillar_id: Option<Uuid>,
}

#[derive(Default)]
struct Tables {
    pillars: HashMap<Uuid, Pillar>,
    elements: HashMap<Uuid, ElementRecord>,
    scores: Vec<LevelScore>,
    plans: HashMap<Uuid, ActionPlan>,
}

impl Tables {
    fn materialize(&self, record: &ElementRecord) -> Element {
        Element {
            id: record.id,
            code: record.code.clone(),
            name: record.name.clone(),
            active: record.active,
            pillar: record
                .pillar_id
                .and_then(|id| self.pillars.get(&id).cloned()),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Seeding helpers ────────────────────────────────────────

    pub async fn insert_pillar(&self, pillar: Pillar) {
        self.tables.write().await.pillars.insert(pillar.id, pillar);
    }

    pub async fn insert_element(
        &self,
        id: Uuid,
        code: &str,
        name: BilingualText,
        pillar_id: Option<Uuid>,
    ) {
        self.tables.write().await.elements.insert(
            id,
            ElementRecord {
                id,
                code: code.into(),
                name,
                active: true,
                pillar_id,
            },
        );
    }

    pub async fn set_score(&self, element_id: Uuid, country: &str, level: MaturityLevel, score: i32) {
        let mut tables = self.tables.write().await;
        let country = Country::new(country);
        if let Some(existing) = tables
            .scores
            .iter_mut()
            .find(|s| s.element_id == element_id && s.country == country && s.level == level)
        {
            existing.score = score;
        } else {
            tables.scores.push(LevelScore {
                element_id,
                country,
                level,
                score,
                notes: None,
            });
        }
    }

    pub async fn set_pillar_active(&self, pillar_id: Uuid, active: bool) {
        if let Some(pillar) = self.tables.write().await.pillars.get_mut(&pillar_id) {
            pillar.active = active;
        }
    }

    pub async fn set_element_active(&self, element_id: Uuid, active: bool) {
        if let Some(element) = self.tables.write().await.elements.get_mut(&element_id) {
            element.active = active;
        }
    }

    pub async fn plan_count(&self) -> usize {
        self.tables.read().await.plans.len()
    }
}

#[async_trait]
impl AssessmentStore for MemoryStore {
    async fn level_scores(&self, filter: &ScoreFilter) -> Result<Vec<LevelScore>> {
        let tables = self.tables.read().await;
        Ok(tables
            .scores
            .iter()
            .filter(|s| s.level == filter.level)
            .filter(|s| filter.country.as_ref().map_or(true, |c| &s.country == c))
            .filter(|s| filter.score_below.map_or(true, |bound| s.score < bound))
            .cloned()
            .collect())
    }

    async fn elements_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Element>> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.elements.get(id))
            .map(|record| tables.materialize(record))
            .collect())
    }

    async fn action_plans_by_elements(
        &self,
        ids: &[Uuid],
        level: Option<MaturityLevel>,
    ) -> Result<Vec<ActionPlan>> {
        let tables = self.tables.read().await;
        Ok(tables
            .plans
            .values()
            .filter(|p| ids.contains(&p.element_id))
            .filter(|p| level.map_or(true, |l| p.level == l))
            .cloned()
            .collect())
    }

    async fn active_element_count(&self) -> Result<u64> {
        let tables = self.tables.read().await;
        Ok(tables
            .elements
            .values()
            .filter(|e| {
                e.active
                    && e.pillar_id
                        .and_then(|id| tables.pillars.get(&id))
                        .map_or(false, |p| p.active)
            })
            .count() as u64)
    }

    async fn action_plan(&self, id: Uuid) -> Result<Option<ActionPlan>> {
        Ok(self.tables.read().await.plans.get(&id).cloned())
    }

    async fn insert_action_plan(&self, record: &NewActionPlan) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let plan = ActionPlan {
            id,
            element_id: record.element_id,
            country: record.country.clone(),
            level: record.level,
            problem: BilingualText {
                local: Some(record.problem.clone()),
                en: record.problem_en.clone(),
                legacy: None,
            },
            action: BilingualText {
                local: Some(record.action.clone()),
                en: record.action_en.clone(),
                legacy: None,
            },
            owner: record.owner.clone(),
            due_date: record.due_date,
            status: record.status,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.plans.insert(id, plan);
        Ok(id)
    }

    async fn update_action_plan(&self, id: Uuid, patch: &ActionPlanPatch) -> Result<()> {
        let mut tables = self.tables.write().await;
        let plan = tables
            .plans
            .get_mut(&id)
            .ok_or_else(|| OpexError::NotFound(format!("action plan {id}")))?;

        if let Some(problem) = &patch.problem {
            plan.problem.local = Some(problem.clone());
        }
        if let Some(action) = &patch.action {
            plan.action.local = Some(action.clone());
        }
        if let Some(problem_en) = &patch.problem_en {
            plan.problem.en = problem_en.clone();
        }
        if let Some(action_en) = &patch.action_en {
            plan.action.en = action_en.clone();
        }
        if let Some(owner) = &patch.owner {
            plan.owner = owner.clone();
        }
        if let Some(due_date) = patch.due_date {
            plan.due_date = due_date;
        }
        plan.updated_at = Utc::now();
        Ok(())
    }

    async fn update_action_plan_status(&self, id: Uuid, status: PlanStatus) -> Result<()> {
        let mut tables = self.tables.write().await;
        let plan = tables
            .plans
            .get_mut(&id)
            .ok_or_else(|| OpexError::NotFound(format!("action plan {id}")))?;
        plan.status = status;
        plan.updated_at = Utc::now();
        Ok(())
    }
}
