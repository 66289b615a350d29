//! Hooks scoped to one side of a relationship: the members of an
//! organisation, and the contacts attached to a lead.

use super::{HookState, Op};
use crate::error::Result;
use crate::models::{Contact, ContactPerson, OrganisationLink};
use crate::relations::{LinkPatch, RelationshipCoordinator};

/// Contacts linked to one organisation, with the link that joins them.
pub struct OrganisationContactsHook {
    coord: RelationshipCoordinator,
    organisation_id: String,
    state: HookState<(Contact, OrganisationLink)>,
}

impl OrganisationContactsHook {
    pub fn new(coord: RelationshipCoordinator, organisation_id: &str) -> Self {
        Self {
            coord,
            organisation_id: organisation_id.to_string(),
            state: HookState::default(),
        }
    }

    pub fn state(&self) -> &HookState<(Contact, OrganisationLink)> {
        &self.state
    }

    /// Primary members from the last fetch. May hold more than one.
    pub fn primaries(&self) -> Vec<&Contact> {
        self.state
            .items
            .iter()
            .filter(|(_, link)| link.is_primary)
            .map(|(c, _)| c)
            .collect()
    }

    pub async fn fetch(&mut self) -> Result<()> {
        self.state.begin(Op::List);
        let res = self.coord.contacts_for_organisation(&self.organisation_id).await;
        self.state.items = self.state.finish(Op::List, res)?;
        Ok(())
    }

    pub async fn link(
        &mut self,
        contact_id: &str,
        role: &str,
        is_primary: bool,
        priority: Option<u32>,
    ) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self
            .coord
            .link_contact_to_organisation(contact_id, &self.organisation_id, role, is_primary, priority)
            .await;
        self.state.finish(Op::Submit, res)?;
        let _ = self.fetch().await;
        Ok(())
    }

    pub async fn update_link(&mut self, relationship_id: &str, patch: &LinkPatch) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self
            .coord
            .update_contact_organisation_link(relationship_id, patch)
            .await;
        self.state.finish(Op::Submit, res)?;
        let _ = self.fetch().await;
        Ok(())
    }

    pub async fn unlink(&mut self, relationship_id: &str) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self
            .coord
            .unlink_contact_from_organisation(relationship_id)
            .await;
        self.state.finish(Op::Submit, res)?;
        let _ = self.fetch().await;
        Ok(())
    }
}

/// Contacts attached to one lead.
pub struct LeadContactsHook {
    coord: RelationshipCoordinator,
    lead_id: String,
    state: HookState<Contact>,
}

impl LeadContactsHook {
    pub fn new(coord: RelationshipCoordinator, lead_id: &str) -> Self {
        Self {
            coord,
            lead_id: lead_id.to_string(),
            state: HookState::default(),
        }
    }

    pub fn state(&self) -> &HookState<Contact> {
        &self.state
    }

    pub async fn fetch(&mut self) -> Result<()> {
        self.state.begin(Op::List);
        let res = self.coord.contacts_for_lead(&self.lead_id).await;
        self.state.items = self.state.finish(Op::List, res)?;
        Ok(())
    }

    pub async fn link(&mut self, contact: &Contact) -> Result<()> {
        let details = ContactPerson {
            full_name: contact.full_name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone().or_else(|| contact.mobile.clone()),
            job_title: contact.role.clone(),
        };

        self.state.begin(Op::Submit);
        let res = self
            .coord
            .link_lead_to_contact(&self.lead_id, &contact.id, &details)
            .await;
        self.state.finish(Op::Submit, res)?;
        let _ = self.fetch().await;
        Ok(())
    }

    pub async fn unlink(&mut self, contact_id: &str) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self
            .coord
            .unlink_lead_from_contact(&self.lead_id, contact_id)
            .await;
        self.state.finish(Op::Submit, res)?;
        let _ = self.fetch().await;
        Ok(())
    }
}
