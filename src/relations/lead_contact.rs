use tracing::{debug, info};

use super::consistency::{set_with, set_without};
use super::RelationshipCoordinator;
use crate::error::Result;
use crate::models::{Contact, ContactPerson, Lead};

impl RelationshipCoordinator {
    // ==================== LEAD ↔ CONTACT ====================

    /// Add `contact_id` to the lead's `contactIds`. Already linked is a no-op.
    ///
    /// Read-then-write: the whole array is rewritten from the copy read at
    /// the start, so two concurrent linkers on one lead can lose an update.
    /// `details` is accepted for callers that have it but is not stored; the
    /// lead keeps only the id.
    pub async fn link_lead_to_contact(
        &self,
        lead_id: &str,
        contact_id: &str,
        details: &ContactPerson,
    ) -> Result<()> {
        let lead = self.db.require_lead(lead_id).await?;

        let Some(contact_ids) = set_with(&lead.contact_ids, contact_id) else {
            debug!(lead_id, contact_id, "Contact already linked to lead");
            return Ok(());
        };

        self.db.set_lead_contact_ids(lead_id, &contact_ids).await?;
        info!(
            lead_id,
            contact_id,
            contact_name = %details.full_name,
            "Linked lead to contact"
        );
        Ok(())
    }

    /// Remove `contact_id` from the lead's `contactIds`. Not linked is a no-op.
    pub async fn unlink_lead_from_contact(&self, lead_id: &str, contact_id: &str) -> Result<()> {
        let lead = self.db.require_lead(lead_id).await?;

        let Some(contact_ids) = set_without(&lead.contact_ids, contact_id) else {
            debug!(lead_id, contact_id, "Contact not linked to lead");
            return Ok(());
        };

        self.db.set_lead_contact_ids(lead_id, &contact_ids).await?;
        info!(lead_id, contact_id, "Unlinked lead from contact");
        Ok(())
    }

    /// Contacts the lead links to. Ids whose contact no longer exists are
    /// skipped.
    pub async fn contacts_for_lead(&self, lead_id: &str) -> Result<Vec<Contact>> {
        let lead = self.db.require_lead(lead_id).await?;
        let mut contacts = Vec::with_capacity(lead.contact_ids.len());
        for cid in &lead.contact_ids {
            match self.db.get_contact(cid).await? {
                Some(c) => contacts.push(c),
                None => debug!(lead_id, contact_id = %cid, "Skipping missing contact"),
            }
        }
        Ok(contacts)
    }

    pub async fn leads_for_contact(&self, contact_id: &str) -> Result<Vec<Lead>> {
        self.db.leads_for_contact(contact_id).await
    }
}
