//! Explicit session context.
//!
//! Every service call takes a `&Session`; there is no implicit or
//! thread-local identity anywhere in the codebase. Authentication itself
//! is the identity provider's job; by the time a `Session` exists the
//! caller is already authenticated.

use serde::{Deserialize, Serialize};

use crate::error::OpexError;
use crate::localize::Language;
use crate::types::Country;

/// Role allowed to view cross-country supervisor statistics.
pub const ROLE_SUPERVISOR: &str = "supervisor";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub actor_id: String,
    pub roles: Vec<String>,
    /// Preferred display language for resolved text fields.
    #[serde(default)]
    pub language: Language,
    /// Home country of the actor, when known. Aggregations take an
    /// explicit scope argument rather than reading this implicitly.
    #[serde(default)]
    pub country: Option<Country>,
}

impl Session {
    pub fn new(actor_id: impl Into<String>, roles: Vec<String>, language: Language) -> Self {
        Self {
            actor_id: actor_id.into(),
            roles,
            language,
            country: None,
        }
    }

    pub fn with_country(mut self, country: Country) -> Self {
        self.country = Some(country);
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_supervisor(&self) -> bool {
        self.has_role(ROLE_SUPERVISOR)
    }

    pub fn require_supervisor(&self) -> Result<(), OpexError> {
        if self.is_supervisor() {
            Ok(())
        } else {
            Err(OpexError::Unauthorized(format!(
                "{} is not a supervisor",
                self.actor_id
            )))
        }
    }
}
