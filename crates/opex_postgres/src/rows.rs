//! sqlx row types and their conversions into domain entities.
//!
//! Shape normalization happens here, once, at the adapter edge; the
//! aggregation core never re-checks what a query returned. Conversions
//! fail with a `String` describing the bad column; the store wraps that
//! into the storage error variant.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use opex_core::{
    ActionPlan, BilingualText, Country, Element, LevelScore, MaturityLevel, Pillar, PlanStatus,
};

// ── Elements (pillar embedded via LEFT JOIN) ──────────────────

#[derive(Debug, FromRow)]
pub struct PgElementRow {
    pub element_id: Uuid,
    pub code: String,
    pub name_local: Option<String>,
    pub name_en: Option<String>,
    /// Legacy single-language column from before the bilingual pair.
    pub name: Option<String>,
    pub active: bool,
    pub pillar_id: Option<Uuid>,
    pub pillar_code: Option<String>,
    pub pillar_name_local: Option<String>,
    pub pillar_name_en: Option<String>,
    pub pillar_name: Option<String>,
    pub pillar_description_local: Option<String>,
    pub pillar_description_en: Option<String>,
    pub pillar_active: Option<bool>,
}

impl TryFrom<PgElementRow> for Element {
    type Error = String;

    fn try_from(row: PgElementRow) -> Result<Self, Self::Error> {
        // The pillar columns are all-or-nothing from the LEFT JOIN; a
        // dangling reference surfaces as `pillar: None`.
        let pillar = match (row.pillar_id, row.pillar_code, row.pillar_active) {
            (Some(id), Some(code), Some(active)) => Some(Pillar {
                id,
                code,
                name: BilingualText {
                    local: row.pillar_name_local,
                    en: row.pillar_name_en,
                    legacy: row.pillar_name,
                },
                description: BilingualText {
                    local: row.pillar_description_local,
                    en: row.pillar_description_en,
                    legacy: None,
                },
                active,
            }),
            (None, _, _) => None,
            (Some(id), _, _) => {
                return Err(format!("pillar {id} joined without code/active columns"))
            }
        };

        Ok(Element {
            id: row.element_id,
            code: row.code,
            name: BilingualText {
                local: row.name_local,
                en: row.name_en,
                legacy: row.name,
            },
            active: row.active,
            pillar,
        })
    }
}

// ── Level scores ──────────────────────────────────────────────

#[derive(Debug, FromRow)]
pub struct PgLevelScoreRow {
    pub element_id: Uuid,
    pub country: String,
    pub level: String,
    pub score: i32,
    pub notes: Option<String>,
}

impl TryFrom<PgLevelScoreRow> for LevelScore {
    type Error = String;

    fn try_from(row: PgLevelScoreRow) -> Result<Self, Self::Error> {
        let level = MaturityLevel::from_str(&row.level)
            .ok_or_else(|| format!("unknown maturity level '{}'", row.level))?;
        Ok(LevelScore {
            element_id: row.element_id,
            country: Country::new(row.country),
            level,
            score: row.score,
            notes: row.notes,
        })
    }
}

// ── Action plans ──────────────────────────────────────────────

#[derive(Debug, FromRow)]
pub struct PgActionPlanRow {
    pub plan_id: Uuid,
    pub element_id: Uuid,
    pub country: String,
    pub level: String,
    pub problem_local: String,
    pub problem_en: Option<String>,
    pub action_local: String,
    pub action_en: Option<String>,
    pub owner_name: String,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PgActionPlanRow> for ActionPlan {
    type Error = String;

    fn try_from(row: PgActionPlanRow) -> Result<Self, Self::Error> {
        let level = MaturityLevel::from_str(&row.level)
            .ok_or_else(|| format!("unknown maturity level '{}'", row.level))?;
        let status = PlanStatus::from_str(&row.status)
            .ok_or_else(|| format!("unknown plan status '{}'", row.status))?;
        Ok(ActionPlan {
            id: row.plan_id,
            element_id: row.element_id,
            country: Country::new(row.country),
            level,
            problem: BilingualText {
                local: Some(row.problem_local),
                en: row.problem_en,
                legacy: None,
            },
            action: BilingualText {
                local: Some(row.action_local),
                en: row.action_en,
                legacy: None,
            },
            owner: row.owner_name,
            due_date: row.due_date,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_row() -> PgElementRow {
        PgElementRow {
            element_id: Uuid::new_v4(),
            code: "SAF-01".into(),
            name_local: Some("Registro de riscos".into()),
            name_en: Some("Risk register".into()),
            name: None,
            active: true,
            pillar_id: Some(Uuid::new_v4()),
            pillar_code: Some("SAF".into()),
            pillar_name_local: Some("Segurança".into()),
            pillar_name_en: Some("Safety".into()),
            pillar_name: None,
            pillar_description_local: None,
            pillar_description_en: None,
            pillar_active: Some(true),
        }
    }

    #[test]
    fn element_row_embeds_pillar() {
        let element: Element = element_row().try_into().unwrap();
        let pillar = element.pillar.unwrap();
        assert_eq!(pillar.code, "SAF");
        assert!(pillar.active);
    }

    #[test]
    fn element_row_with_null_pillar_converts_to_none() {
        let mut row = element_row();
        row.pillar_id = None;
        row.pillar_code = None;
        row.pillar_active = None;
        let element: Element = row.try_into().unwrap();
        assert!(element.pillar.is_none());
    }

    #[test]
    fn element_row_with_partial_pillar_is_an_error() {
        let mut row = element_row();
        row.pillar_code = None;
        let err = Element::try_from(row).unwrap_err();
        assert!(err.contains("joined without"));
    }

    #[test]
    fn score_row_rejects_unknown_level() {
        let row = PgLevelScoreRow {
            element_id: Uuid::new_v4(),
            country: "Brazil".into(),
            level: "diamond".into(),
            score: 50,
            notes: None,
        };
        let err = LevelScore::try_from(row).unwrap_err();
        assert!(err.contains("diamond"));
    }

    #[test]
    fn plan_row_converts_status_and_text() {
        let row = PgActionPlanRow {
            plan_id: Uuid::new_v4(),
            element_id: Uuid::new_v4(),
            country: "France".into(),
            level: "foundation".into(),
            problem_local: "probleme".into(),
            problem_en: None,
            action_local: "corriger".into(),
            action_en: Some("fix it".into()),
            owner_name: "Luc".into(),
            due_date: None,
            status: "in_progress".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let plan: ActionPlan = row.try_into().unwrap();
        assert_eq!(plan.status, PlanStatus::InProgress);
        assert_eq!(plan.problem.local.as_deref(), Some("probleme"));
        assert!(plan.problem.en.is_none());
        assert_eq!(plan.action.en.as_deref(), Some("fix it"));
    }
}
