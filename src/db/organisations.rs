use super::Database;
use crate::error::{Error, Result};
use crate::models::{Organisation, OrganisationPatch};
use crate::store::{Direction, Filter, Query, ORGANISATIONS};

impl Database {
    // ==================== ORGANISATION CRUD ====================

    pub async fn insert_organisation(&self, org: &Organisation) -> Result<Organisation> {
        if org.name.trim().is_empty() {
            return Err(Error::Validation("organisation name is required".to_string()));
        }
        self.insert(ORGANISATIONS, org).await
    }

    pub async fn get_organisation(&self, id: &str) -> Result<Option<Organisation>> {
        self.fetch(ORGANISATIONS, id).await
    }

    pub async fn require_organisation(&self, id: &str) -> Result<Organisation> {
        self.fetch_required(ORGANISATIONS, id).await
    }

    /// Exact-name lookup. Returns the first match.
    pub async fn get_organisation_by_name(&self, name: &str) -> Result<Option<Organisation>> {
        let query = Query::all().filter(Filter::eq("name", name)).limit(1);
        Ok(self.fetch_all(ORGANISATIONS, &query).await?.into_iter().next())
    }

    pub async fn list_organisations(&self) -> Result<Vec<Organisation>> {
        let query = Query::all().sort_by("name", Direction::Asc);
        self.fetch_all(ORGANISATIONS, &query).await
    }

    pub async fn update_organisation(&self, id: &str, patch: &OrganisationPatch) -> Result<()> {
        if patch.name.as_deref().map_or(false, |n| n.trim().is_empty()) {
            return Err(Error::Validation("organisation name is required".to_string()));
        }
        self.write_patch(ORGANISATIONS, id, patch).await
    }

    /// Remove the organisation document only. Links and references held by
    /// contacts and leads are left alone; see `relations::cascade`.
    pub async fn delete_organisation_document(&self, id: &str) -> Result<()> {
        self.store.delete(ORGANISATIONS, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_database;
    use crate::models::*;

    #[tokio::test]
    async fn test_insert_and_get_organisation() {
        let db = memory_database();

        let mut org = Organisation::new("Acme".to_string());
        org.industry = Some("Widgets".to_string());
        let created = db.insert_organisation(&org).await.unwrap();
        assert!(!created.id.is_empty());

        let retrieved = db.get_organisation(&created.id).await.unwrap().unwrap();
        assert_eq!(retrieved.name, "Acme");
        assert_eq!(retrieved.industry, Some("Widgets".to_string()));
        assert_eq!(retrieved.created_at, retrieved.updated_at);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = memory_database();
        let err = db
            .insert_organisation(&Organisation::new("  ".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let db = memory_database();
        for name in ["zeta", "Alpha", "mid"] {
            db.insert_organisation(&Organisation::new(name.to_string()))
                .await
                .unwrap();
        }

        let names: Vec<_> = db
            .list_organisations()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = memory_database();
        let org = db
            .insert_organisation(&Organisation::new("Acme".to_string()))
            .await
            .unwrap();

        let patch = OrganisationPatch {
            status: Some(OrganisationStatus::Inactive),
            ..Default::default()
        };
        db.update_organisation(&org.id, &patch).await.unwrap();

        let updated = db.require_organisation(&org.id).await.unwrap();
        assert_eq!(updated.status, OrganisationStatus::Inactive);
        assert_eq!(updated.name, "Acme");
        assert!(updated.updated_at >= org.updated_at);

        assert_eq!(
            db.get_organisation_by_name("Acme").await.unwrap().unwrap().id,
            org.id
        );

        db.delete_organisation_document(&org.id).await.unwrap();
        assert!(db.get_organisation(&org.id).await.unwrap().is_none());
        assert!(db.require_organisation(&org.id).await.unwrap_err().is_not_found());
    }
}
