//! Postgres implementation of the assessment store port.
//!
//! A newtype wrapping PgPool. All SQL is runtime-checked (sqlx::query,
//! not sqlx::query!) to avoid a compile-time DB requirement. Optional
//! filters use `($n IS NULL OR ...)` guards so each read stays a single
//! fixed statement.

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use opex_core::ports::{AssessmentStore, Result, ScoreFilter};
use opex_core::{
    ActionPlan, ActionPlanPatch, Element, LevelScore, MaturityLevel, NewActionPlan, OpexError,
    PlanStatus,
};

use crate::rows::{PgActionPlanRow, PgElementRow, PgLevelScoreRow};

const ELEMENT_COLUMNS: &str = r#"
    e.element_id, e.code, e.name_local, e.name_en, e.name, e.active,
    p.pillar_id, p.code AS pillar_code,
    p.name_local AS pillar_name_local, p.name_en AS pillar_name_en,
    p.name AS pillar_name,
    p.description_local AS pillar_description_local,
    p.description_en AS pillar_description_en,
    p.active AS pillar_active
"#;

const PLAN_COLUMNS: &str = r#"
    plan_id, element_id, country, level::text, problem_local, problem_en,
    action_local, action_en, owner_name, due_date, status::text,
    created_at, updated_at
"#;

/// Connect a pool from a database URL (callers typically read
/// `DATABASE_URL`).
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    tracing::info!(max_connections, "postgres pool connected");
    Ok(pool)
}

pub struct PgAssessmentStore {
    pool: PgPool,
}

impl PgAssessmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssessmentStore for PgAssessmentStore {
    async fn level_scores(&self, filter: &ScoreFilter) -> Result<Vec<LevelScore>> {
        let country = filter.country.as_ref().map(|c| c.as_str().to_string());
        let rows = sqlx::query_as::<_, PgLevelScoreRow>(
            r#"
            SELECT element_id, country, level::text, score, notes
            FROM opex.level_scores
            WHERE level = $1::opex.maturity_level
              AND ($2::text IS NULL OR country = $2)
              AND ($3::int4 IS NULL OR score < $3)
            "#,
        )
        .bind(filter.level.as_str())
        .bind(country)
        .bind(filter.score_below)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        rows.into_iter()
            .map(|r| {
                r.try_into()
                    .map_err(|e: String| OpexError::Storage(anyhow!(e)))
            })
            .collect()
    }

    async fn elements_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Element>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            r#"
            SELECT {ELEMENT_COLUMNS}
            FROM opex.elements e
            LEFT JOIN opex.pillars p ON p.pillar_id = e.pillar_id
            WHERE e.element_id = ANY($1)
            "#
        );
        let rows = sqlx::query_as::<_, PgElementRow>(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!(e))?;
        rows.into_iter()
            .map(|r| {
                r.try_into()
                    .map_err(|e: String| OpexError::Storage(anyhow!(e)))
            })
            .collect()
    }

    async fn action_plans_by_elements(
        &self,
        ids: &[Uuid],
        level: Option<MaturityLevel>,
    ) -> Result<Vec<ActionPlan>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            r#"
            SELECT {PLAN_COLUMNS}
            FROM opex.action_plans
            WHERE element_id = ANY($1)
              AND ($2::opex.maturity_level IS NULL OR level = $2::opex.maturity_level)
            "#
        );
        let rows = sqlx::query_as::<_, PgActionPlanRow>(&sql)
            .bind(ids.to_vec())
            .bind(level.map(|l| l.as_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!(e))?;
        rows.into_iter()
            .map(|r| {
                r.try_into()
                    .map_err(|e: String| OpexError::Storage(anyhow!(e)))
            })
            .collect()
    }

    async fn active_element_count(&self) -> Result<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM opex.elements e
            JOIN opex.pillars p ON p.pillar_id = e.pillar_id
            WHERE e.active AND p.active
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(count as u64)
    }

    async fn action_plan(&self, id: Uuid) -> Result<Option<ActionPlan>> {
        let sql = format!(
            r#"
            SELECT {PLAN_COLUMNS}
            FROM opex.action_plans
            WHERE plan_id = $1
            "#
        );
        let row = sqlx::query_as::<_, PgActionPlanRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!(e))?;
        row.map(|r| {
            r.try_into()
                .map_err(|e: String| OpexError::Storage(anyhow!(e)))
        })
        .transpose()
    }

    async fn insert_action_plan(&self, record: &NewActionPlan) -> Result<Uuid> {
        let plan_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO opex.action_plans (
                element_id, country, level,
                problem_local, problem_en, action_local, action_en,
                owner_name, due_date, status
            ) VALUES (
                $1, $2, $3::opex.maturity_level,
                $4, $5, $6, $7,
                $8, $9, $10::opex.plan_status
            )
            RETURNING plan_id
            "#,
        )
        .bind(record.element_id)
        .bind(record.country.as_str())
        .bind(record.level.as_str())
        .bind(&record.problem)
        .bind(&record.problem_en)
        .bind(&record.action)
        .bind(&record.action_en)
        .bind(&record.owner)
        .bind(record.due_date)
        .bind(record.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;
        Ok(plan_id)
    }

    async fn update_action_plan(&self, id: Uuid, patch: &ActionPlanPatch) -> Result<()> {
        // One fixed statement; each column is gated on a boolean flag so
        // keep/set/clear all stay runtime-checked without dynamic SQL.
        let result = sqlx::query(
            r#"
            UPDATE opex.action_plans SET
                problem_local = CASE WHEN $2 THEN $3::text ELSE problem_local END,
                action_local  = CASE WHEN $4 THEN $5::text ELSE action_local END,
                problem_en    = CASE WHEN $6 THEN $7::text ELSE problem_en END,
                action_en     = CASE WHEN $8 THEN $9::text ELSE action_en END,
                owner_name    = CASE WHEN $10 THEN $11::text ELSE owner_name END,
                due_date      = CASE WHEN $12 THEN $13::date ELSE due_date END,
                updated_at    = now()
            WHERE plan_id = $1
            "#,
        )
        .bind(id)
        .bind(patch.problem.is_some())
        .bind(&patch.problem)
        .bind(patch.action.is_some())
        .bind(&patch.action)
        .bind(patch.problem_en.is_some())
        .bind(patch.problem_en.clone().flatten())
        .bind(patch.action_en.is_some())
        .bind(patch.action_en.clone().flatten())
        .bind(patch.owner.is_some())
        .bind(&patch.owner)
        .bind(patch.due_date.is_some())
        .bind(patch.due_date.flatten())
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;

        if result.rows_affected() == 0 {
            return Err(OpexError::NotFound(format!("action plan {id}")));
        }
        Ok(())
    }

    async fn update_action_plan_status(&self, id: Uuid, status: PlanStatus) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE opex.action_plans
            SET status = $2::opex.plan_status, updated_at = now()
            WHERE plan_id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!(e))?;

        if result.rows_affected() == 0 {
            return Err(OpexError::NotFound(format!("action plan {id}")));
        }
        Ok(())
    }
}
