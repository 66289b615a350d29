use serde_json::Value;

use super::{fields, Database};
use crate::error::{Error, Result};
use crate::models::{Website, WebsitePatch};
use crate::store::{Direction, Filter, Query, WEBSITES};

impl Database {
    // ==================== WEBSITE CRUD ====================

    pub async fn insert_website(&self, site: &Website) -> Result<Website> {
        if site.domain().is_empty() {
            return Err(Error::Validation(format!("invalid website url: {:?}", site.url)));
        }
        self.insert(WEBSITES, site).await
    }

    pub async fn get_website(&self, id: &str) -> Result<Option<Website>> {
        self.fetch(WEBSITES, id).await
    }

    pub async fn list_websites(&self) -> Result<Vec<Website>> {
        let query = Query::all().sort_by("url", Direction::Asc);
        self.fetch_all(WEBSITES, &query).await
    }

    pub async fn websites_for_organisation(&self, organisation_id: &str) -> Result<Vec<Website>> {
        let query = Query::all()
            .filter(Filter::eq("organisationId", organisation_id))
            .sort_by("url", Direction::Asc);
        self.fetch_all(WEBSITES, &query).await
    }

    pub async fn update_website(&self, id: &str, patch: &WebsitePatch) -> Result<()> {
        self.write_patch(WEBSITES, id, patch).await
    }

    /// Detach the website from its organisation. `WebsitePatch` cannot
    /// express a null, so this is the only way to clear the reference.
    pub async fn clear_website_organisation(&self, id: &str) -> Result<()> {
        self.write_fields(WEBSITES, id, fields([("organisationId", Value::Null)]))
            .await
    }

    pub async fn delete_website(&self, id: &str) -> Result<()> {
        self.store.delete(WEBSITES, id).await
    }
}
