use std::fs;
use std::io::ErrorKind;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::config::StoreConfig;
use crate::models::{Category, NewProduct, Product};

/// The whole catalog, held in memory in display order (newest first) and
/// re-serialized to one JSON document after every mutation.
pub struct CatalogStore {
    path: PathBuf,
    products: Vec<Product>,
}

impl CatalogStore {
    pub fn open(config: &StoreConfig) -> Self {
        Self::open_at(config.data_path.clone())
    }

    /// Reads the catalog file once. A missing or blank file yields the seed
    /// set; an unreadable or corrupt one is logged and also yields the seeds.
    pub fn open_at(path: PathBuf) -> Self {
        let products = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => {
                debug!("Catalog file {} is blank, using seed data", path.display());
                seed_products()
            }
            Ok(text) => match serde_json::from_str(&text) {
                Ok(products) => products,
                Err(e) => {
                    warn!("Failed to parse catalog file {}: {}", path.display(), e);
                    seed_products()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No catalog file at {}, using seed data", path.display());
                seed_products()
            }
            Err(e) => {
                warn!("Failed to read catalog file {}: {}", path.display(), e);
                seed_products()
            }
        };

        info!("Loaded {} products from {}", products.len(), path.display());
        CatalogStore { path, products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Prepends a new record under a freshly minted id and returns the id.
    pub fn insert(&mut self, fields: NewProduct) -> i64 {
        let id = self.mint_id();
        self.products.insert(0, fields.into_product(id));
        self.persist();
        info!("Product created with ID: {}", id);
        id
    }

    /// Replaces a record's fields in place, keeping its id and position.
    /// Returns false without touching anything when the id is absent.
    pub fn update(&mut self, id: i64, fields: NewProduct) -> bool {
        let Some(slot) = self.products.iter_mut().find(|p| p.id == id) else {
            debug!("Product not found for update: {}", id);
            return false;
        };
        *slot = fields.into_product(id);
        self.persist();
        info!("Product updated: {}", id);
        true
    }

    /// Removes a record by id. Absent ids are a silent no-op.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() == before {
            debug!("Product not found for deletion: {}", id);
            return false;
        }
        self.persist();
        info!("Product deleted: {}", id);
        true
    }

    // Creation-timestamp ids, bumped past any collision.
    fn mint_id(&self) -> i64 {
        let mut id = Utc::now().timestamp_millis();
        while self.products.iter().any(|p| p.id == id) {
            id += 1;
        }
        id
    }

    // Full rewrite of the catalog document via a sibling temp file. Failures
    // are logged and otherwise indistinguishable from success.
    fn persist(&self) {
        let json = match serde_json::to_string_pretty(&self.products) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize catalog: {}", e);
                return;
            }
        };

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = match NamedTempFile::new_in(dir) {
            Ok(tmp) => tmp,
            Err(e) => {
                error!("Failed to create temp file in {}: {}", dir.display(), e);
                return;
            }
        };
        if let Err(e) = tmp.write_all(json.as_bytes()) {
            error!("Failed to write catalog: {}", e);
            return;
        }
        if let Err(e) = tmp.persist(&self.path) {
            error!("Failed to persist catalog to {}: {}", self.path.display(), e);
        }
    }
}

fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Laptop Pro".to_string(),
            description: "A powerful laptop for professionals.".to_string(),
            price: 15_000_000.0,
            category: Category::Electronics,
            release_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap_or_default(),
            stock: 50,
            active: true,
        },
        Product {
            id: 2,
            name: "Flannel Shirt".to_string(),
            description: "A flannel shirt cut from premium cotton.".to_string(),
            price: 250_000.0,
            category: Category::Clothing,
            release_date: NaiveDate::from_ymd_opt(2023, 2, 20).unwrap_or_default(),
            stock: 120,
            active: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_fields() -> NewProduct {
        NewProduct {
            name: "Mouse".to_string(),
            description: "A wireless ergonomic mouse.".to_string(),
            price: 150_000.0,
            category: Category::Electronics,
            release_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            stock: 10,
            active: true,
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> CatalogStore {
        CatalogStore::open_at(dir.path().join("catalog.json"))
    }

    #[test]
    fn missing_file_yields_seed_set() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.products().len(), 2);
        assert_eq!(store.products()[0].id, 1);
        assert_eq!(store.products()[1].name, "Flannel Shirt");
    }

    #[test]
    fn corrupt_file_falls_back_to_seed_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{not json").unwrap();
        let store = CatalogStore::open_at(path);
        assert_eq!(store.products().len(), 2);
    }

    #[test]
    fn stored_empty_collection_stays_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "[]").unwrap();
        let store = CatalogStore::open_at(path);
        assert!(store.products().is_empty());
    }

    #[test]
    fn insert_prepends_with_fresh_id() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let before = store.products().len();

        let id = store.insert(sample_fields());

        assert_eq!(store.products().len(), before + 1);
        assert_eq!(store.products()[0].id, id);
        assert_eq!(store.products()[0].name, "Mouse");
        assert!(store.products()[1..].iter().all(|p| p.id != id));
    }

    #[test]
    fn minted_ids_are_unique_under_collision() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let a = store.insert(sample_fields());
        let b = store.insert(sample_fields());
        let c = store.insert(sample_fields());
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn update_preserves_id_position_and_size() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let id = store.insert(sample_fields());
        let before = store.products().len();

        let mut fields = sample_fields();
        fields.name = "Trackball".to_string();
        fields.stock = 3;
        assert!(store.update(id, fields));

        assert_eq!(store.products().len(), before);
        assert_eq!(store.products()[0].id, id);
        assert_eq!(store.products()[0].name, "Trackball");
        assert_eq!(store.products()[0].stock, 3);
    }

    #[test]
    fn update_of_absent_id_is_a_no_op() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let snapshot = store.products().to_vec();
        assert!(!store.update(999, sample_fields()));
        assert_eq!(store.products(), snapshot.as_slice());
    }

    #[test]
    fn remove_of_absent_id_is_a_no_op() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let snapshot = store.products().to_vec();
        assert!(!store.remove(999));
        assert_eq!(store.products(), snapshot.as_slice());
    }

    #[test]
    fn remove_drops_exactly_the_target() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let id = store.insert(sample_fields());
        let before = store.products().len();
        assert!(store.remove(id));
        assert_eq!(store.products().len(), before - 1);
        assert!(store.get(id).is_none());
    }

    #[test]
    fn catalog_round_trips_through_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let mut store = CatalogStore::open_at(path.clone());
        store.insert(sample_fields());
        let written = store.products().to_vec();

        let reopened = CatalogStore::open_at(path);
        assert_eq!(reopened.products(), written.as_slice());
    }
}
