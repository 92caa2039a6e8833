// Store Entity - top-level container that owns stocks

use serde::{Deserialize, Serialize};

/// A persisted store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    pub name: String,
}

/// Store candidate as submitted by a client (no id yet)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewStore {
    pub name: String,
}

impl NewStore {
    pub fn new(name: impl Into<String>) -> Self {
        NewStore { name: name.into() }
    }

    /// A store needs a name with at least one non-whitespace character
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_serializes_id_then_name() {
        let store = Store {
            id: 3,
            name: "Hardware".to_string(),
        };

        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"id":3,"name":"Hardware"}"#);
    }

    #[test]
    fn test_store_name_must_not_be_blank() {
        assert!(NewStore::new("Hardware").has_name());
        assert!(!NewStore::new("").has_name());
        assert!(!NewStore::new("   \t").has_name());
    }
}
