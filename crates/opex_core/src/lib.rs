//! OPEX maturity aggregation engine core crate.
//!
//! Computes backlog, dashboard, pillar, and cross-country statistics over
//! four loosely normalized tables (pillars, elements, level scores,
//! action plans), and mutates action plans with bilingual field rules.
//! Storage is an injected [`AssessmentStore`] port; this crate has no
//! database dependency of its own.

pub mod backlog;
pub mod dashboard;
pub mod error;
pub mod global_stats;
pub mod localize;
pub mod pillars;
pub mod plans;
pub mod ports;
pub mod service;
pub mod session;
pub mod types;
pub mod views;

pub use error::OpexError;
pub use localize::{BilingualText, Language};
pub use ports::{AssessmentStore, Result, ScoreFilter};
pub use service::AssessmentService;
pub use session::{Session, ROLE_SUPERVISOR};
pub use types::{
    ActionPlan, ActionPlanPatch, Country, CountryScope, CreateActionPlanInput, Element,
    LevelScore, MaturityLevel, NewActionPlan, Pillar, PlanStatus, UpdateActionPlanInput,
    GLOBAL_SCOPE,
};
pub use views::{
    ActionPlanView, BacklogEntry, DashboardStats, GlobalCountryStats, MaturityCounts,
    PillarBreakdown, PillarStats,
};
