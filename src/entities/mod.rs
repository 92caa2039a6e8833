// Entity Models
//
// Each entity has:
// - Integer identity assigned by the database on insert
// - A candidate shape (what clients send) separate from the stored shape

pub mod store;
pub mod stock;

pub use store::{NewStore, Store};
pub use stock::{NewStock, Stock, StockType};
