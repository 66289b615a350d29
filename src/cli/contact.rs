use anyhow::Result;

use super::display::{print_contact, print_contact_row, print_lead_row};
use super::ContactCommand;
use crate::config::Config;
use crate::hooks::{ContactsHook, LeadsHook};
use crate::models::Contact;
use crate::relations::{DeletePolicy, RelationshipCoordinator};

pub async fn run_contact(
    coord: &RelationshipCoordinator,
    config: &Config,
    cmd: ContactCommand,
) -> Result<()> {
    let mut contacts = ContactsHook::new(coord.clone());

    match cmd {
        ContactCommand::Add(args) => {
            let mut contact = Contact::new(args.name, args.email);
            contact.phone = args.phone;
            contact.role = args.role;
            let created = contacts.create(&contact).await?;
            println!("Added contact {}", created.id);
        }
        ContactCommand::List => {
            contacts.fetch_all().await?;
            if contacts.state().items.is_empty() {
                println!("No contacts.");
            }
            for contact in &contacts.state().items {
                print_contact_row(contact);
            }
        }
        ContactCommand::Show { id } => {
            contacts.select(&id).await?;
            if let Some(contact) = contacts.state().selected.as_ref() {
                print_contact(contact);
            }

            let mut leads = LeadsHook::new(coord.clone());
            leads.fetch_for_contact(&id).await?;
            for lead in &leads.state().items {
                print_lead_row(lead);
            }
        }
        ContactCommand::Delete(args) => {
            let policy = args
                .policy
                .as_deref()
                .map(DeletePolicy::parse)
                .unwrap_or(config.delete_policy);
            let mut contacts = contacts.with_delete_policy(policy);
            contacts.delete(&args.id).await?;
            println!("Deleted contact {} ({})", args.id, policy.as_str());
        }
    }

    Ok(())
}
