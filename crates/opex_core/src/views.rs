//! View models consumed by the UI layer.
//! Plain structured records. No wire format is prescribed; transport is
//! an internal call boundary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::localize::Language;
use crate::types::{ActionPlan, Country, Element, MaturityLevel, Pillar, PlanStatus};

// ── Backlog ───────────────────────────────────────────────────

/// One gap row: an element scored below completion for a country/level,
/// enriched with its pillar and the plans addressing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacklogEntry {
    pub element: Element,
    pub country: Country,
    pub level: MaturityLevel,
    pub score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Plans for this element restricted to the same country and level.
    pub plans: Vec<ActionPlan>,
}

impl BacklogEntry {
    pub fn has_plan(&self) -> bool {
        !self.plans.is_empty()
    }

    pub fn pillar(&self) -> Option<&Pillar> {
        self.element.pillar.as_ref()
    }
}

// ── Dashboard ─────────────────────────────────────────────────

/// Per-level completion counts for the summary widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaturityCounts {
    pub foundation: u64,
    pub bronze: u64,
    pub silver: u64,
    pub gold: u64,
    pub platinum: u64,
}

impl MaturityCounts {
    pub fn count(&self, level: MaturityLevel) -> u64 {
        match level {
            MaturityLevel::Foundation => self.foundation,
            MaturityLevel::Bronze => self.bronze,
            MaturityLevel::Silver => self.silver,
            MaturityLevel::Gold => self.gold,
            MaturityLevel::Platinum => self.platinum,
        }
    }

    pub fn increment(&mut self, level: MaturityLevel) {
        match level {
            MaturityLevel::Foundation => self.foundation += 1,
            MaturityLevel::Bronze => self.bronze += 1,
            MaturityLevel::Silver => self.silver += 1,
            MaturityLevel::Gold => self.gold += 1,
            MaturityLevel::Platinum => self.platinum += 1,
        }
    }
}

/// Headline numbers for one country (or Global) at one level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Active catalogue size, not filtered by country: it answers
    /// "how many things could be scored".
    pub total_elements: u64,
    pub gap_elements: u64,
    pub elements_without_plan: u64,
    /// Spans all five levels regardless of the focused level.
    pub maturity_counts: MaturityCounts,
}

// ── Pillar stats ──────────────────────────────────────────────

/// Foundation-level gap coverage for one pillar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarStats {
    /// `None` for the synthetic "No pillar" bucket that collects gaps
    /// whose pillar reference cannot be resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar_id: Option<Uuid>,
    pub code: String,
    pub name: String,
    pub gap_elements: u64,
    pub elements_with_plan: u64,
    pub elements_without_plan: u64,
}

// ── Supervisor stats ──────────────────────────────────────────

/// Foundation gap count and average score for one pillar of one country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarBreakdown {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar_id: Option<Uuid>,
    pub code: String,
    pub gap_elements: u64,
    pub average_score: i32,
}

/// Cross-country supervisor row, Foundation level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalCountryStats {
    pub country: Country,
    /// Active catalogue size, the same constant across countries.
    pub total_elements: u64,
    pub gap_elements: u64,
    pub elements_with_plan: u64,
    pub elements_without_plan: u64,
    /// Plans across ALL scored elements for this country, not only gap
    /// elements, a wider net than the gap-scoped counts above.
    pub total_plans: u64,
    pub done_plans: u64,
    /// Arithmetic mean over every scored element, rounded half away from
    /// zero at this presentation boundary only.
    pub average_score: i32,
    pub complete_elements: u64,
    pub pillars: Vec<PillarBreakdown>,
}

// ── Action plan view ──────────────────────────────────────────

/// An action plan with its bilingual text resolved for one display
/// language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlanView {
    pub id: Uuid,
    pub element_id: Uuid,
    pub country: Country,
    pub level: MaturityLevel,
    pub problem: String,
    pub action: String,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ActionPlanView {
    pub fn resolve(plan: &ActionPlan, lang: Language) -> Self {
        Self {
            id: plan.id,
            element_id: plan.element_id,
            country: plan.country.clone(),
            level: plan.level,
            problem: plan.problem.resolve(lang).to_string(),
            action: plan.action.resolve(lang).to_string(),
            owner: plan.owner.clone(),
            due_date: plan.due_date,
            status: plan.status,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        }
    }
}
