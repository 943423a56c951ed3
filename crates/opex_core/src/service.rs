//! AssessmentService — the single entry point the UI layer talks to.
//!
//! Holds the store port via `Arc<dyn AssessmentStore>` so the same logic
//! works against Postgres or test doubles. All methods take `&Session`
//! explicitly (no implicit identity, no thread-local context) so every
//! aggregation stays pure given its inputs.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::OpexError;
use crate::ports::{AssessmentStore, Result};
use crate::session::Session;
use crate::types::{CountryScope, CreateActionPlanInput, MaturityLevel, PlanStatus, UpdateActionPlanInput};
use crate::views::{ActionPlanView, BacklogEntry, DashboardStats, GlobalCountryStats, PillarStats};
use crate::{backlog, dashboard, global_stats, pillars, plans};

pub struct AssessmentService {
    store: Arc<dyn AssessmentStore>,
}

impl AssessmentService {
    pub fn new(store: Arc<dyn AssessmentStore>) -> Self {
        Self { store }
    }

    /// Every (element, country) gap for a scope and level.
    pub async fn resolve_backlog(
        &self,
        session: &Session,
        scope: &CountryScope,
        level: MaturityLevel,
    ) -> Result<Vec<BacklogEntry>> {
        tracing::debug!(actor = %session.actor_id, %scope, %level, "resolve backlog");
        backlog::resolve_backlog(self.store.as_ref(), scope, level).await
    }

    /// Headline dashboard numbers for a scope and level.
    pub async fn dashboard_stats(
        &self,
        session: &Session,
        scope: &CountryScope,
        level: MaturityLevel,
    ) -> Result<DashboardStats> {
        tracing::debug!(actor = %session.actor_id, %scope, %level, "dashboard stats");
        dashboard::compute_dashboard_stats(self.store.as_ref(), scope, level).await
    }

    /// Foundation gap coverage per pillar, names resolved through the
    /// session language.
    pub async fn pillar_stats(
        &self,
        session: &Session,
        scope: &CountryScope,
    ) -> Result<Vec<PillarStats>> {
        tracing::debug!(actor = %session.actor_id, %scope, "pillar stats");
        pillars::compute_pillar_stats(self.store.as_ref(), scope, session.language).await
    }

    /// Cross-country statistics. Supervisor role required.
    pub async fn global_country_stats(
        &self,
        session: &Session,
    ) -> Result<Vec<GlobalCountryStats>> {
        session.require_supervisor()?;
        tracing::debug!(actor = %session.actor_id, "global country stats");
        global_stats::compute_global_country_stats(self.store.as_ref()).await
    }

    pub async fn create_action_plan(
        &self,
        session: &Session,
        input: CreateActionPlanInput,
    ) -> Result<Uuid> {
        tracing::debug!(actor = %session.actor_id, "create action plan");
        plans::create_action_plan(self.store.as_ref(), input).await
    }

    pub async fn update_action_plan(
        &self,
        session: &Session,
        input: UpdateActionPlanInput,
    ) -> Result<()> {
        tracing::debug!(actor = %session.actor_id, id = %input.id, "update action plan");
        plans::update_action_plan(self.store.as_ref(), input).await
    }

    pub async fn set_action_plan_status(
        &self,
        session: &Session,
        id: Uuid,
        status: PlanStatus,
    ) -> Result<()> {
        tracing::debug!(actor = %session.actor_id, %id, %status, "set action plan status");
        plans::set_action_plan_status(self.store.as_ref(), id, status).await
    }

    /// One plan with its text resolved for the session language.
    pub async fn action_plan_view(&self, session: &Session, id: Uuid) -> Result<ActionPlanView> {
        let plan = self
            .store
            .action_plan(id)
            .await?
            .ok_or_else(|| OpexError::NotFound(format!("action plan {id}")))?;
        Ok(ActionPlanView::resolve(&plan, session.language))
    }
}
