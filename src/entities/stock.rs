// 🔩 Stock Entity - an item held by a store
//
// Clients submit a NewStock (type as a free string), the service checks it,
// and the repository hands back a Stock with its database id.

use serde::{Deserialize, Serialize};

// ============================================================================
// STOCK TYPE
// ============================================================================

/// Closed set of recognized stock types
///
/// Serialized by variant name, so `StockType::Nail` travels as `"Nail"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockType {
    Nail,
}

impl StockType {
    /// Every recognized type, in declaration order
    pub const ALL: &'static [StockType] = &[StockType::Nail];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockType::Nail => "Nail",
        }
    }

    /// Exact, case-sensitive lookup. Unknown names yield None.
    pub fn parse(name: &str) -> Option<StockType> {
        StockType::ALL
            .iter()
            .copied()
            .find(|stock_type| stock_type.as_str() == name)
    }
}

impl std::fmt::Display for StockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// STOCK ENTITY
// ============================================================================

/// A persisted stock
///
/// Field order here is the wire order: id, name, type, value, storeId.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub stock_type: StockType,
    pub value: i64,
    #[serde(rename = "storeId")]
    pub store_id: i64,
}

/// Stock candidate as submitted by a client
///
/// `stock_type` stays a raw string so unrecognized types reach validation
/// instead of failing at parse time. `store_id` from the body is informative
/// only; the owning store always comes from the route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewStock {
    pub name: String,
    #[serde(rename = "type")]
    pub stock_type: String,
    pub value: i64,
    #[serde(rename = "storeId", default)]
    pub store_id: Option<i64>,
}

impl NewStock {
    pub fn new(name: impl Into<String>, stock_type: impl Into<String>, value: i64) -> Self {
        NewStock {
            name: name.into(),
            stock_type: stock_type.into(),
            value,
            store_id: None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
