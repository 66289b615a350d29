use anyhow::Result;

use super::{LinkCommand, UnlinkCommand};
use crate::hooks::{ContactsHook, LeadContactsHook, LeadsHook};
use crate::relations::RelationshipCoordinator;

pub async fn run_link(coord: &RelationshipCoordinator, cmd: LinkCommand) -> Result<()> {
    match cmd {
        LinkCommand::ContactOrg {
            contact_id,
            organisation_id,
            role,
            primary,
            priority,
        } => {
            let mut contacts = ContactsHook::new(coord.clone());
            contacts
                .link_organisation(&contact_id, &organisation_id, &role, primary, priority)
                .await?;
            contacts.select(&contact_id).await?;
            if let Some(link) = contacts
                .state()
                .selected
                .as_ref()
                .and_then(|c| c.organisations.last())
            {
                println!("Linked (relationship {})", link.id);
            }
        }
        LinkCommand::LeadOrg {
            lead_id,
            organisation_id,
        } => {
            let mut leads = LeadsHook::new(coord.clone());
            leads
                .link_organisation_by_id(&lead_id, &organisation_id)
                .await?;
            println!("Linked lead {} to organisation {}", lead_id, organisation_id);
        }
        LinkCommand::LeadContact {
            lead_id,
            contact_id,
        } => {
            let mut contacts = ContactsHook::new(coord.clone());
            contacts.select(&contact_id).await?;
            let mut lead_contacts = LeadContactsHook::new(coord.clone(), &lead_id);
            if let Some(contact) = contacts.state().selected.as_ref() {
                lead_contacts.link(contact).await?;
            }
            println!("Linked lead {} to contact {}", lead_id, contact_id);
        }
    }

    Ok(())
}

pub async fn run_unlink(coord: &RelationshipCoordinator, cmd: UnlinkCommand) -> Result<()> {
    match cmd {
        UnlinkCommand::ContactOrg { relationship_id } => {
            ContactsHook::new(coord.clone())
                .unlink_organisation(&relationship_id)
                .await?;
            println!("Unlinked relationship {}", relationship_id);
        }
        UnlinkCommand::LeadOrg { lead_id } => {
            LeadsHook::new(coord.clone())
                .unlink_organisation(&lead_id)
                .await?;
            println!("Cleared organisation on lead {}", lead_id);
        }
        UnlinkCommand::LeadContact {
            lead_id,
            contact_id,
        } => {
            LeadContactsHook::new(coord.clone(), &lead_id)
                .unlink(&contact_id)
                .await?;
            println!("Unlinked contact {} from lead {}", contact_id, lead_id);
        }
    }

    Ok(())
}
