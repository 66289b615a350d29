use chrono::Utc;
use tracing::{debug, info, warn};

use super::consistency::default_priority;
use super::RelationshipCoordinator;
use crate::error::Result;
use crate::models::{Contact, OrganisationLink};

/// Edit to an existing contact↔organisation link. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    pub role: Option<String>,
    pub is_primary: Option<bool>,
    pub priority: Option<u32>,
}

impl RelationshipCoordinator {
    // ==================== CONTACT ↔ ORGANISATION ====================

    /// Append a new link (fresh relationship id) to the contact.
    ///
    /// The organisation is looked up only to snapshot its name; a missing
    /// organisation still gets linked, with an empty name. Nothing is written
    /// to the organisation. There is no duplicate check: linking the same
    /// pair twice leaves two links with different relationship ids.
    pub async fn link_contact_to_organisation(
        &self,
        contact_id: &str,
        organisation_id: &str,
        role: &str,
        is_primary: bool,
        priority: Option<u32>,
    ) -> Result<()> {
        let contact = self.db.require_contact(contact_id).await?;

        let organisation_name = match self.db.get_organisation(organisation_id).await? {
            Some(org) => org.name,
            None => {
                warn!(
                    contact_id,
                    organisation_id, "Linking contact to unknown organisation"
                );
                String::new()
            }
        };

        let priority = priority.unwrap_or_else(|| default_priority(is_primary, self.priorities));
        let link = OrganisationLink::new(
            organisation_id.to_string(),
            organisation_name,
            role.to_string(),
            is_primary,
            priority,
        );
        let relationship_id = link.id.clone();

        let mut links = contact.organisations;
        links.push(link);
        self.db
            .set_contact_organisation_links(contact_id, &links)
            .await?;

        info!(
            contact_id,
            organisation_id,
            relationship_id = %relationship_id,
            is_primary,
            priority,
            "Linked contact to organisation"
        );
        Ok(())
    }

    /// Remove the link with this relationship id. An id no contact holds is a
    /// silent no-op.
    pub async fn unlink_contact_from_organisation(&self, relationship_id: &str) -> Result<()> {
        let Some(contact) = self.find_link_owner(relationship_id).await? else {
            debug!(relationship_id, "Unlink of unknown relationship ignored");
            return Ok(());
        };

        let links: Vec<OrganisationLink> = contact
            .organisations
            .into_iter()
            .filter(|l| l.id != relationship_id)
            .collect();
        self.db
            .set_contact_organisation_links(&contact.id, &links)
            .await?;

        info!(
            contact_id = %contact.id,
            relationship_id, "Unlinked contact from organisation"
        );
        Ok(())
    }

    /// Change role, primary flag or priority of one link in place. Unknown
    /// relationship ids are a silent no-op, as with unlinking.
    pub async fn update_contact_organisation_link(
        &self,
        relationship_id: &str,
        patch: &LinkPatch,
    ) -> Result<()> {
        let Some(mut contact) = self.find_link_owner(relationship_id).await? else {
            debug!(relationship_id, "Update of unknown relationship ignored");
            return Ok(());
        };

        if let Some(link) = contact
            .organisations
            .iter_mut()
            .find(|l| l.id == relationship_id)
        {
            if let Some(ref role) = patch.role {
                link.role = role.clone();
            }
            if let Some(is_primary) = patch.is_primary {
                link.is_primary = is_primary;
            }
            if let Some(priority) = patch.priority {
                link.priority = priority;
            }
            link.updated_at = Utc::now();
        }

        self.db
            .set_contact_organisation_links(&contact.id, &contact.organisations)
            .await?;
        info!(
            contact_id = %contact.id,
            relationship_id, "Updated contact organisation link"
        );
        Ok(())
    }

    /// A contact's links in display order.
    pub async fn organisation_links_for_contact(
        &self,
        contact_id: &str,
    ) -> Result<Vec<OrganisationLink>> {
        let mut links = self.db.require_contact(contact_id).await?.organisations;
        links.sort_by_key(|l| (l.priority, !l.is_primary));
        Ok(links)
    }

    /// Every (contact, link) pair pointing at the organisation, by link
    /// priority then contact name. Organisations keep no member list, so this
    /// scans all linked contacts.
    pub async fn contacts_for_organisation(
        &self,
        organisation_id: &str,
    ) -> Result<Vec<(Contact, OrganisationLink)>> {
        let mut members = Vec::new();
        for contact in self.db.list_linked_contacts().await? {
            for link in &contact.organisations {
                if link.organisation_id == organisation_id {
                    members.push((contact.clone(), link.clone()));
                }
            }
        }
        members.sort_by(|(ca, la), (cb, lb)| {
            la.priority
                .cmp(&lb.priority)
                .then_with(|| ca.full_name.to_lowercase().cmp(&cb.full_name.to_lowercase()))
        });
        Ok(members)
    }

    /// Contacts flagged primary for the organisation. Primary is not unique,
    /// so this can return several.
    pub async fn primary_contacts_for_organisation(
        &self,
        organisation_id: &str,
    ) -> Result<Vec<(Contact, OrganisationLink)>> {
        Ok(self
            .contacts_for_organisation(organisation_id)
            .await?
            .into_iter()
            .filter(|(_, link)| link.is_primary)
            .collect())
    }

    async fn find_link_owner(&self, relationship_id: &str) -> Result<Option<Contact>> {
        Ok(self
            .db
            .list_linked_contacts()
            .await?
            .into_iter()
            .find(|c| c.link(relationship_id).is_some()))
    }
}
