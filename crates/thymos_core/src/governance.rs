//! Governing state: strategy and constitution.
//!
//! Both values are replaced wholesale, never patched in place. Readers load a
//! complete `Arc` snapshot through `arc-swap`, so planning reads can never
//! observe a half-updated strategy or principle set while the upgrade engine
//! is writing.

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Long-term behavioral guidance.
///
/// Generated strategy text is either a successfully structured value or an
/// opaque blob; downstream consumers must handle both variants explicitly
/// rather than assuming structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    Structured {
        fields: serde_json::Map<String, serde_json::Value>,
    },
    Opaque {
        text: String,
    },
}

impl Strategy {
    pub fn structured(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::Structured { fields }
    }

    pub fn opaque(text: &str) -> Self {
        Self::Opaque {
            text: text.to_string(),
        }
    }

    /// An empty structured strategy, the startup default.
    pub fn empty() -> Self {
        Self::Structured {
            fields: serde_json::Map::new(),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured { .. })
    }
}

/// The ordered set of guiding principles, loaded once at startup and only
/// ever replaced as a complete set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constitution {
    principles: Vec<String>,
}

impl Constitution {
    pub fn new(principles: Vec<String>) -> Self {
        Self { principles }
    }

    /// Parse principles from text: one per line, skipping blank lines and
    /// `#` comments.
    pub fn from_text(text: &str) -> Self {
        let principles = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { principles }
    }

    /// Render back to the line-oriented text form used for persistence.
    pub fn to_text(&self) -> String {
        self.principles.join("\n")
    }

    pub fn principles(&self) -> &[String] {
        &self.principles
    }

    pub fn len(&self) -> usize {
        self.principles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.principles.is_empty()
    }
}

/// Copy-on-write holder for the current strategy and constitution.
///
/// Single writer (the upgrade engine), any number of readers. `load` returns
/// a complete, consistent snapshot; `replace` swaps the whole value.
pub struct GovernanceStore {
    strategy: ArcSwap<Strategy>,
    principles: ArcSwap<Constitution>,
}

impl GovernanceStore {
    pub fn new(strategy: Strategy, principles: Constitution) -> Self {
        Self {
            strategy: ArcSwap::from_pointee(strategy),
            principles: ArcSwap::from_pointee(principles),
        }
    }

    pub fn strategy(&self) -> Arc<Strategy> {
        self.strategy.load_full()
    }

    pub fn replace_strategy(&self, strategy: Strategy) {
        tracing::info!("strategy replaced (structured: {})", strategy.is_structured());
        self.strategy.store(Arc::new(strategy));
    }

    pub fn principles(&self) -> Arc<Constitution> {
        self.principles.load_full()
    }

    pub fn replace_principles(&self, principles: Constitution) {
        tracing::info!("constitution replaced ({} principles)", principles.len());
        self.principles.store(Arc::new(principles));
    }
}

impl Default for GovernanceStore {
    fn default() -> Self {
        Self::new(Strategy::empty(), Constitution::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constitution_from_text_filters_comments() {
        let text = "# moral constitution\n\nBe honest.\n  Do no harm.  \n# end\n";
        let c = Constitution::from_text(text);
        assert_eq!(c.principles(), &["Be honest.", "Do no harm."]);
    }

    #[test]
    fn test_constitution_text_roundtrip() {
        let c = Constitution::new(vec!["Be honest.".into(), "Stay curious.".into()]);
        let restored = Constitution::from_text(&c.to_text());
        assert_eq!(restored, c);
    }

    #[test]
    fn test_strategy_tag_serde() {
        let s = Strategy::opaque("post more threads");
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"kind\":\"opaque\""));
        let restored: Strategy = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, s);
    }

    #[test]
    fn test_store_wholesale_replacement() {
        let store = GovernanceStore::default();
        let old = store.strategy();
        assert!(old.is_structured());

        store.replace_strategy(Strategy::opaque("raw text"));
        assert!(!store.strategy().is_structured());
        // Old snapshot is untouched by the replacement.
        assert!(old.is_structured());
    }

    #[test]
    fn test_store_principles_replacement() {
        let store = GovernanceStore::default();
        assert!(store.principles().is_empty());

        store.replace_principles(Constitution::new(vec!["Be kind.".into()]));
        assert_eq!(store.principles().len(), 1);
    }
}
