//! Menu catalog
//!
//! Keyed-record CRUD over the menu, persisted as a whole-file overwrite of
//! `menu.json` on every mutation. No lifecycle logic beyond presence checks;
//! broadcasting of `menu-updated` happens in the API handlers.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::storage;
use crate::utils::{AppError, AppResult};

/// A menu record, keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Assigned from the current epoch milliseconds at creation.
    pub id: i64,
    pub name: String,
    pub category: String,
    pub image: String,
    pub price_local: f64,
    pub price_foreign: f64,
    pub description: String,
}

/// Creation payload; every field is required and must be non-empty/non-zero.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub name: String,
    pub category: String,
    pub image: String,
    pub price_local: f64,
    pub price_foreign: f64,
    pub description: String,
}

/// Partial update: explicit field-by-field merge, unknown fields rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub price_local: Option<f64>,
    pub price_foreign: Option<f64>,
    pub description: Option<String>,
}

impl MenuItemCreate {
    fn validate(&self) -> AppResult<()> {
        let required = [
            ("name", self.name.trim().is_empty()),
            ("category", self.category.trim().is_empty()),
            ("image", self.image.trim().is_empty()),
            ("priceLocal", self.price_local == 0.0),
            ("priceForeign", self.price_foreign == 0.0),
            ("description", self.description.trim().is_empty()),
        ];
        for (field, missing) in required {
            if missing {
                return Err(AppError::validation(format!("missing required field: {}", field)));
            }
        }
        Ok(())
    }
}

/// Shared handle over the menu catalog.
#[derive(Clone)]
pub struct MenuService {
    items: Arc<RwLock<Vec<MenuItem>>>,
    path: PathBuf,
}

impl MenuService {
    /// Load the menu file, initializing it to `[]` when missing or corrupt.
    pub fn load(path: PathBuf) -> Self {
        let items: Vec<MenuItem> = storage::load_or_init(&path);
        tracing::info!(items = items.len(), path = %path.display(), "Menu catalog loaded");
        Self {
            items: Arc::new(RwLock::new(items)),
            path,
        }
    }

    pub fn list(&self) -> Vec<MenuItem> {
        self.items.read().clone()
    }

    /// Create a record with a timestamp-derived id.
    ///
    /// Persistence failure surfaces to the caller; the in-memory insert
    /// stands either way (best-effort durability).
    pub fn create(&self, payload: MenuItemCreate) -> AppResult<MenuItem> {
        payload.validate()?;

        let item = {
            let mut items = self.items.write();
            let mut id = chrono::Utc::now().timestamp_millis();
            // two creations inside the same millisecond must not collide
            while items.iter().any(|i| i.id == id) {
                id += 1;
            }
            let item = MenuItem {
                id,
                name: payload.name,
                category: payload.category,
                image: payload.image,
                price_local: payload.price_local,
                price_foreign: payload.price_foreign,
                description: payload.description,
            };
            items.push(item.clone());
            item
        };

        self.save()?;
        tracing::info!(id = item.id, name = %item.name, "Menu item created");
        Ok(item)
    }

    /// Merge a partial update onto an existing record.
    pub fn update(&self, id: i64, patch: MenuItemUpdate) -> AppResult<MenuItem> {
        let item = {
            let mut items = self.items.write();
            let item = items
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;

            if let Some(name) = patch.name {
                item.name = name;
            }
            if let Some(category) = patch.category {
                item.category = category;
            }
            if let Some(image) = patch.image {
                item.image = image;
            }
            if let Some(price_local) = patch.price_local {
                item.price_local = price_local;
            }
            if let Some(price_foreign) = patch.price_foreign {
                item.price_foreign = price_foreign;
            }
            if let Some(description) = patch.description {
                item.description = description;
            }
            item.clone()
        };

        self.save()?;
        tracing::info!(id = item.id, "Menu item updated");
        Ok(item)
    }

    /// Remove a record by id.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        {
            let mut items = self.items.write();
            let before = items.len();
            items.retain(|i| i.id != id);
            if items.len() == before {
                return Err(AppError::not_found(format!("Menu item {} not found", id)));
            }
        }

        self.save()?;
        tracing::info!(id, "Menu item deleted");
        Ok(())
    }

    fn save(&self) -> AppResult<()> {
        let snapshot = self.items.read().clone();
        storage::save_json(&self.path, &snapshot)
    }
}
