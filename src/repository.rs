// Repositories - storage seams the services talk to
//
// Services only see these traits; `Database` is the SQLite-backed
// implementation. Id assignment lives entirely on this side.

use anyhow::Result;

use crate::db::{self, Database};
use crate::entities::{Stock, Store};

pub trait StoreRepository: Send + Sync {
    /// Persist a new store and return it with its assigned id
    fn save(&self, name: &str) -> Result<Store>;

    fn find_by_id(&self, id: i64) -> Result<Option<Store>>;

    fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.find_by_id(id)?.is_some())
    }
}

pub trait StockRepository: Send + Sync {
    /// Persist a stock and return it with a fresh, unique id
    fn save(&self, stock: &Stock) -> Result<Stock>;

    fn find_by_id(&self, id: i64) -> Result<Option<Stock>>;

    /// Stocks of one store in insertion order
    fn list_by_store(&self, store_id: i64) -> Result<Vec<Stock>>;
}

impl StoreRepository for Database {
    fn save(&self, name: &str) -> Result<Store> {
        self.with_conn(|conn| db::insert_store(conn, name))
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Store>> {
        self.with_conn(|conn| db::get_store(conn, id))
    }

    fn exists(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| db::store_exists(conn, id))
    }
}

impl StockRepository for Database {
    fn save(&self, stock: &Stock) -> Result<Stock> {
        self.with_conn(|conn| db::insert_stock(conn, stock))
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Stock>> {
        self.with_conn(|conn| db::get_stock(conn, id))
    }

    fn list_by_store(&self, store_id: i64) -> Result<Vec<Stock>> {
        self.with_conn(|conn| db::get_stocks_by_store(conn, store_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::StockType;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_concurrent_saves_get_unique_ids() {
        let db = Database::open_in_memory().unwrap();
        let store_id = StoreRepository::save(&db, "Hardware").unwrap().id;

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let db = db.clone();
                thread::spawn(move || {
                    (0..25)
                        .map(|i| {
                            let stock = Stock {
                                id: 0,
                                name: format!("nail-{worker}-{i}"),
                                stock_type: StockType::Nail,
                                value: 1,
                                store_id,
                            };
                            StockRepository::save(&db, &stock).unwrap().id
                        })
                        .collect::<Vec<i64>>()
                })
            })
            .collect();

        let ids: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let unique: HashSet<i64> = ids.iter().copied().collect();

        assert_eq!(ids.len(), 200);
        assert_eq!(unique.len(), 200, "every save must get its own id");
    }

    #[test]
    fn test_repositories_behind_trait_objects() {
        let db = Database::open_in_memory().unwrap();
        let stores: Arc<dyn StoreRepository> = Arc::new(db.clone());
        let stocks: Arc<dyn StockRepository> = Arc::new(db);

        let store = stores.save("Hardware").unwrap();
        assert!(stores.exists(store.id).unwrap());
        assert!(!stores.exists(store.id + 1).unwrap());

        let saved = stocks
            .save(&Stock {
                id: 0,
                name: "Flat Nail".to_string(),
                stock_type: StockType::Nail,
                value: 100,
                store_id: store.id,
            })
            .unwrap();

        assert_eq!(stocks.find_by_id(saved.id).unwrap(), Some(saved.clone()));
        assert_eq!(stocks.list_by_store(store.id).unwrap(), vec![saved]);
        assert!(stocks.list_by_store(store.id + 1).unwrap().is_empty());
    }
}
