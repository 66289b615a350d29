use serde_json::Value;

use super::{fields, Database};
use crate::error::{Error, Result};
use crate::models::{is_valid_email, Contact, ContactPatch, OrganisationLink};
use crate::store::{Direction, Filter, Query, CONTACTS};

fn check_email(email: &str) -> Result<()> {
    if is_valid_email(email.trim()) {
        Ok(())
    } else {
        Err(Error::Validation(format!("invalid email address: {:?}", email)))
    }
}

impl Database {
    // ==================== CONTACT CRUD ====================

    /// Email is required. Uniqueness is a convention only and not checked.
    pub async fn insert_contact(&self, contact: &Contact) -> Result<Contact> {
        check_email(&contact.email)?;
        if contact.full_name.trim().is_empty() {
            return Err(Error::Validation("contact name is required".to_string()));
        }
        self.insert(CONTACTS, contact).await
    }

    pub async fn get_contact(&self, id: &str) -> Result<Option<Contact>> {
        self.fetch(CONTACTS, id).await
    }

    pub async fn require_contact(&self, id: &str) -> Result<Contact> {
        self.fetch_required(CONTACTS, id).await
    }

    /// First contact with this email, if any.
    pub async fn get_contact_by_email(&self, email: &str) -> Result<Option<Contact>> {
        let query = Query::all().filter(Filter::eq("email", email)).limit(1);
        Ok(self.fetch_all(CONTACTS, &query).await?.into_iter().next())
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let query = Query::all().sort_by("fullName", Direction::Asc);
        self.fetch_all(CONTACTS, &query).await
    }

    pub async fn update_contact(&self, id: &str, patch: &ContactPatch) -> Result<()> {
        if patch.full_name.as_deref().map_or(false, |n| n.trim().is_empty()) {
            return Err(Error::Validation("contact name is required".to_string()));
        }
        if let Some(ref email) = patch.email {
            check_email(email)?;
        }
        self.write_patch(CONTACTS, id, patch).await
    }

    /// Replace the contact's organisation links wholesale.
    pub async fn set_contact_organisation_links(
        &self,
        id: &str,
        links: &[OrganisationLink],
    ) -> Result<()> {
        let update = fields([("organisations", serde_json::to_value(links)?)]);
        self.write_fields(CONTACTS, id, update).await
    }

    pub async fn delete_contact_document(&self, id: &str) -> Result<()> {
        self.store.delete(CONTACTS, id).await
    }

    /// Contacts whose `organisations` array is non-empty. There is no index
    /// on link contents, so callers scan the result.
    pub async fn list_linked_contacts(&self) -> Result<Vec<Contact>> {
        let query = Query::all()
            .filter(Filter::NotEq("organisations".to_string(), Value::Array(vec![])))
            .sort_by("fullName", Direction::Asc);
        self.fetch_all(CONTACTS, &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_database;
    use crate::models::*;

    fn ann() -> Contact {
        Contact::new("Ann Smith".to_string(), "ann@example.com".to_string())
    }

    #[tokio::test]
    async fn test_insert_and_get_contact() {
        let db = memory_database();
        let created = db.insert_contact(&ann()).await.unwrap();

        let retrieved = db.get_contact(&created.id).await.unwrap().unwrap();
        assert_eq!(retrieved.full_name, "Ann Smith");
        assert!(retrieved.organisations.is_empty());

        let by_email = db.get_contact_by_email("ann@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().id, created.id);
        assert!(db.get_contact_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_required() {
        let db = memory_database();
        let bad = Contact::new("Ann".to_string(), String::new());
        assert!(matches!(
            db.insert_contact(&bad).await,
            Err(crate::Error::Validation(_))
        ));

        let created = db.insert_contact(&ann()).await.unwrap();
        let patch = ContactPatch {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(db.update_contact(&created.id, &patch).await.is_err());
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let db = memory_database();
        let created = db.insert_contact(&ann()).await.unwrap();

        let patch = ContactPatch {
            full_name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            db.update_contact(&created.id, &patch).await,
            Err(crate::Error::Validation(_))
        ));
        assert_eq!(db.require_contact(&created.id).await.unwrap().full_name, "Ann Smith");
    }

    #[tokio::test]
    async fn test_duplicate_email_allowed() {
        let db = memory_database();
        db.insert_contact(&ann()).await.unwrap();
        db.insert_contact(&ann()).await.unwrap();
        assert_eq!(db.list_contacts().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_leaves_links_alone() {
        let db = memory_database();
        let created = db.insert_contact(&ann()).await.unwrap();
        let link = OrganisationLink::new(
            "o1".to_string(),
            "Acme".to_string(),
            "CTO".to_string(),
            true,
            1,
        );
        db.set_contact_organisation_links(&created.id, &[link.clone()])
            .await
            .unwrap();

        let patch = ContactPatch {
            role: Some("Founder".to_string()),
            ..Default::default()
        };
        db.update_contact(&created.id, &patch).await.unwrap();

        let c = db.require_contact(&created.id).await.unwrap();
        assert_eq!(c.role.as_deref(), Some("Founder"));
        assert_eq!(c.organisations, vec![link]);

        let linked = db.list_linked_contacts().await.unwrap();
        assert_eq!(linked.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_contact() {
        let db = memory_database();
        let created = db.insert_contact(&ann()).await.unwrap();
        db.delete_contact_document(&created.id).await.unwrap();
        assert!(db.get_contact(&created.id).await.unwrap().is_none());
    }
}
