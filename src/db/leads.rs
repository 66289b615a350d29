use serde_json::Value;

use super::{fields, Database};
use crate::error::{Error, Result};
use crate::models::{Lead, LeadPatch};
use crate::relations::consistency::{check_lead_organisation_pair, dedup};
use crate::store::{Direction, Filter, Query, LEADS};

impl Database {
    // ==================== LEAD CRUD ====================

    /// The organisation pair must be fully set or fully clear; repeated
    /// contact ids are folded to one.
    pub async fn insert_lead(&self, lead: &Lead) -> Result<Lead> {
        match (&lead.organisation_id, &lead.organisation_name) {
            (Some(oid), Some(name)) => check_lead_organisation_pair(oid, name)?,
            (None, None) => {}
            _ => {
                return Err(Error::Validation(
                    "lead organisation id and name must be set together".to_string(),
                ))
            }
        }

        if dedup(&lead.contact_ids).len() == lead.contact_ids.len() {
            return self.insert(LEADS, lead).await;
        }
        let mut lead = lead.clone();
        lead.contact_ids = dedup(&lead.contact_ids);
        self.insert(LEADS, &lead).await
    }

    pub async fn get_lead(&self, id: &str) -> Result<Option<Lead>> {
        self.fetch(LEADS, id).await
    }

    pub async fn require_lead(&self, id: &str) -> Result<Lead> {
        self.fetch_required(LEADS, id).await
    }

    /// Newest first
    pub async fn list_leads(&self) -> Result<Vec<Lead>> {
        let query = Query::all().sort_by("createdAt", Direction::Desc);
        self.fetch_all(LEADS, &query).await
    }

    pub async fn update_lead(&self, id: &str, patch: &LeadPatch) -> Result<()> {
        self.write_patch(LEADS, id, patch).await
    }

    pub async fn delete_lead(&self, id: &str) -> Result<()> {
        self.store.delete(LEADS, id).await
    }

    // ==================== LEAD RELATIONSHIP FIELDS ====================

    /// Write the organisation pair in one update: both set, or both null.
    pub async fn set_lead_organisation(&self, id: &str, org: Option<(&str, &str)>) -> Result<()> {
        let (org_id, org_name) = match org {
            Some((oid, name)) => (Value::from(oid), Value::from(name)),
            None => (Value::Null, Value::Null),
        };
        let update = fields([("organisationId", org_id), ("organisationName", org_name)]);
        self.write_fields(LEADS, id, update).await
    }

    /// Replace `contactIds` wholesale.
    pub async fn set_lead_contact_ids(&self, id: &str, contact_ids: &[String]) -> Result<()> {
        let update = fields([("contactIds", serde_json::to_value(contact_ids)?)]);
        self.write_fields(LEADS, id, update).await
    }

    pub async fn leads_for_organisation(&self, organisation_id: &str) -> Result<Vec<Lead>> {
        let query = Query::all()
            .filter(Filter::eq("organisationId", organisation_id))
            .sort_by("createdAt", Direction::Desc);
        self.fetch_all(LEADS, &query).await
    }

    pub async fn leads_for_contact(&self, contact_id: &str) -> Result<Vec<Lead>> {
        let query = Query::all()
            .filter(Filter::array_contains("contactIds", contact_id))
            .sort_by("createdAt", Direction::Desc);
        self.fetch_all(LEADS, &query).await
    }
}
