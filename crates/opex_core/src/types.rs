//! Core domain types for the OPEX maturity engine.
//! These are pure value types — no sqlx, no DB dependencies.

// Several enums intentionally use `from_str() -> Option<Self>` instead of
// `FromStr` because they return None for unknown values rather than an error.
#![allow(clippy::should_implement_trait)]

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::localize::BilingualText;

// ── Enums ─────────────────────────────────────────────────────

/// Maturity ladder tier, ordered by increasing rigour.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    #[default]
    Foundation,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl MaturityLevel {
    /// All five tiers, lowest first.
    pub const ALL: [MaturityLevel; 5] = [
        Self::Foundation,
        Self::Bronze,
        Self::Silver,
        Self::Gold,
        Self::Platinum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Foundation => "foundation",
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "foundation" => Some(Self::Foundation),
            "bronze" => Some(Self::Bronze),
            "silver" => Some(Self::Silver),
            "gold" => Some(Self::Gold),
            "platinum" => Some(Self::Platinum),
            _ => None,
        }
    }
}

impl std::fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action plan lifecycle status. Any status may follow any other;
/// plans can be reopened, so no transition graph is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Planned,
    InProgress,
    Done,
    Cancelled,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "planned" => Some(Self::Planned),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Country scope ─────────────────────────────────────────────

/// The reserved scope value. Never a stored country; the mutation
/// boundary rejects it.
pub const GLOBAL_SCOPE: &str = "Global";

/// A concrete country identifier (e.g. "Brazil").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Country(pub String);

impl Country {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Aggregation scope: one country, or the synthetic all-countries view.
/// "Global" exists only at query time; it never appears in persisted data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryScope {
    Global,
    Country(Country),
}

impl CountryScope {
    pub fn parse(value: &str) -> Self {
        if value == GLOBAL_SCOPE {
            Self::Global
        } else {
            Self::Country(Country::new(value))
        }
    }

    pub fn country(name: impl Into<String>) -> Self {
        Self::Country(Country::new(name))
    }

    /// The concrete country, or None for the Global scope.
    pub fn as_country(&self) -> Option<&Country> {
        match self {
            Self::Global => None,
            Self::Country(c) => Some(c),
        }
    }
}

impl std::fmt::Display for CountryScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "{}", GLOBAL_SCOPE),
            Self::Country(c) => write!(f, "{}", c),
        }
    }
}

// ── Entities ──────────────────────────────────────────────────

/// A top-level assessment category (e.g. "Safety", "Quality").
/// Deactivation is a soft delete: the row stays for history but must
/// vanish from every aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub id: Uuid,
    /// Short mnemonic, unique across pillars.
    pub code: String,
    pub name: BilingualText,
    pub description: BilingualText,
    pub active: bool,
}

/// A checklist item owned by exactly one pillar.
///
/// The store embeds the owning pillar on read. A dangling pillar
/// reference surfaces as `pillar: None`; a missing element drops out at
/// the join instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: Uuid,
    pub code: String,
    pub name: BilingualText,
    pub active: bool,
    pub pillar: Option<Pillar>,
}

impl Element {
    /// Whether this element participates in counts and backlogs: the
    /// element itself is active and its pillar, when resolvable, is too.
    /// An unresolvable pillar does not hide the element; only an
    /// explicit inactive flag does.
    pub fn is_visible(&self) -> bool {
        self.active && self.pillar.as_ref().map_or(true, |p| p.active)
    }
}

/// A per-(element, country, level) score. Read-only from the aggregation
/// core's perspective; scoring workflows mutate it elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelScore {
    pub element_id: Uuid,
    pub country: Country,
    pub level: MaturityLevel,
    /// Completion percentage in 0..=100.
    pub score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LevelScore {
    /// A score of exactly this value means "complete for that level".
    pub const COMPLETE: i32 = 100;

    pub fn is_gap(&self) -> bool {
        self.score < Self::COMPLETE
    }
}

/// A remediation record addressing one gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub id: Uuid,
    pub element_id: Uuid,
    pub country: Country,
    pub level: MaturityLevel,
    pub problem: BilingualText,
    pub action: BilingualText,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Mutation inputs ───────────────────────────────────────────

/// Input for creating an action plan. Local-language problem/action text
/// and the owner are required; the maturity level defaults to Foundation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActionPlanInput {
    pub element_id: Uuid,
    pub country: Country,
    #[serde(default)]
    pub level: Option<MaturityLevel>,
    pub problem: String,
    pub action: String,
    /// Optional English overlay, stored only when non-blank, otherwise
    /// left absent ("not translated yet").
    #[serde(default)]
    pub problem_en: Option<String>,
    #[serde(default)]
    pub action_en: Option<String>,
    pub owner: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// Input for a partial action plan update. `None` fields are left
/// unchanged. For the English overlays an empty string is an explicit
/// "clear translation" signal, distinct from omission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateActionPlanInput {
    pub id: Uuid,
    #[serde(default)]
    pub problem: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub problem_en: Option<String>,
    #[serde(default)]
    pub action_en: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    /// Outer `None` keeps the stored date, `Some(None)` clears it,
    /// `Some(Some(d))` replaces it.
    #[serde(default)]
    pub due_date: Option<Option<NaiveDate>>,
}

/// A validated, normalised plan ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewActionPlan {
    pub element_id: Uuid,
    pub country: Country,
    pub level: MaturityLevel,
    pub problem: String,
    pub action: String,
    pub problem_en: Option<String>,
    pub action_en: Option<String>,
    pub owner: String,
    pub due_date: Option<NaiveDate>,
    pub status: PlanStatus,
}

/// A validated partial update as the store applies it.
/// `None` = keep; for the overlay and due-date fields `Some(None)` = clear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPlanPatch {
    pub problem: Option<String>,
    pub action: Option<String>,
    pub problem_en: Option<Option<String>>,
    pub action_en: Option<Option<String>>,
    pub owner: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl ActionPlanPatch {
    pub fn is_empty(&self) -> bool {
        self.problem.is_none()
            && self.action.is_none()
            && self.problem_en.is_none()
            && self.action_en.is_none()
            && self.owner.is_none()
            && self.due_date.is_none()
    }
}

// ── Tests ─────────────────────────────────────────────────────
