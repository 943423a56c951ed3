//! Localized-text resolution.
//!
//! Every place text is displayed goes through [`BilingualText::resolve`]
//! with one documented priority order, instead of ad-hoc fallback chains
//! at each call site.

use serde::{Deserialize, Serialize};

/// Display language requested by a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// The organisation's local canonical language.
    #[default]
    Local,
    English,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::English => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A text field carried in up to three variants: the local canonical
/// value, an optional English overlay, and a legacy single-language value
/// left over from before the bilingual columns existed.
///
/// `en = None` means "not translated yet", never coerced to an empty
/// string, so absence stays distinguishable from an explicit empty
/// translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<String>,
}

impl BilingualText {
    pub fn local(text: impl Into<String>) -> Self {
        Self {
            local: Some(text.into()),
            en: None,
            legacy: None,
        }
    }

    pub fn new(local: impl Into<String>, en: Option<String>) -> Self {
        Self {
            local: Some(local.into()),
            en,
            legacy: None,
        }
    }

    /// Resolve for display. Priority order: the requested language, then
    /// the local canonical value, then the legacy single-language field,
    /// then the empty string. Blank variants count as absent.
    pub fn resolve(&self, lang: Language) -> &str {
        let requested = match lang {
            Language::Local => self.local.as_deref(),
            Language::English => self.en.as_deref(),
        };
        requested
            .filter(|s| !s.is_empty())
            .or_else(|| self.local.as_deref().filter(|s| !s.is_empty()))
            .or_else(|| self.legacy.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("")
    }
}
