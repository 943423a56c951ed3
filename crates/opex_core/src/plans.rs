//! Action plan mutations.
//!
//! Validation happens synchronously before any store call; store failures
//! surface unchanged. Writes carry no optimistic-concurrency token;
//! concurrent updates to one plan overwrite each other, last write wins.

use uuid::Uuid;

use crate::error::OpexError;
use crate::ports::{AssessmentStore, Result};
use crate::types::{
    ActionPlanPatch, Country, CreateActionPlanInput, MaturityLevel, NewActionPlan, PlanStatus,
    UpdateActionPlanInput, GLOBAL_SCOPE,
};

/// Validate and insert a new plan. Returns the new id.
pub async fn create_action_plan(
    store: &dyn AssessmentStore,
    input: CreateActionPlanInput,
) -> Result<Uuid> {
    let record = validate_create(input)?;
    let id = store.insert_action_plan(&record).await?;
    tracing::info!(%id, element = %record.element_id, country = %record.country, "action plan created");
    Ok(id)
}

/// Validate and apply a partial update.
pub async fn update_action_plan(
    store: &dyn AssessmentStore,
    input: UpdateActionPlanInput,
) -> Result<()> {
    let id = input.id;
    let patch = validate_update(input)?;
    store.update_action_plan(id, &patch).await?;
    tracing::info!(%id, "action plan updated");
    Ok(())
}

/// Set a plan's status. Any status may follow any other; plans can be
/// reopened, so no transition graph is enforced.
pub async fn set_action_plan_status(
    store: &dyn AssessmentStore,
    id: Uuid,
    status: PlanStatus,
) -> Result<()> {
    store.update_action_plan_status(id, status).await?;
    tracing::info!(%id, %status, "action plan status set");
    Ok(())
}

fn validate_create(input: CreateActionPlanInput) -> Result<NewActionPlan> {
    require_text("problem", &input.problem)?;
    require_text("action", &input.action)?;
    require_text("owner", &input.owner)?;
    validate_country(&input.country)?;

    Ok(NewActionPlan {
        element_id: input.element_id,
        country: input.country,
        level: input.level.unwrap_or(MaturityLevel::Foundation),
        problem: input.problem,
        action: input.action,
        problem_en: overlay(input.problem_en),
        action_en: overlay(input.action_en),
        owner: input.owner,
        due_date: input.due_date,
        status: PlanStatus::Planned,
    })
}

fn validate_update(input: UpdateActionPlanInput) -> Result<ActionPlanPatch> {
    if let Some(problem) = &input.problem {
        require_text("problem", problem)?;
    }
    if let Some(action) = &input.action {
        require_text("action", action)?;
    }
    if let Some(owner) = &input.owner {
        require_text("owner", owner)?;
    }

    Ok(ActionPlanPatch {
        problem: input.problem,
        action: input.action,
        problem_en: input.problem_en.map(overlay_update),
        action_en: input.action_en.map(overlay_update),
        owner: input.owner,
        due_date: input.due_date,
    })
}

/// At creation a blank overlay is simply "not translated yet", stored as
/// absent, never as an empty string.
fn overlay(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// On update a blank overlay is an explicit "clear translation" signal.
fn overlay_update(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(OpexError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

fn validate_country(country: &Country) -> Result<()> {
    if country.as_str().trim().is_empty() {
        return Err(OpexError::Validation("country must not be empty".into()));
    }
    if country.as_str() == GLOBAL_SCOPE {
        return Err(OpexError::Validation(
            "\"Global\" is a query scope, not a country".into(),
        ));
    }
    Ok(())
}
