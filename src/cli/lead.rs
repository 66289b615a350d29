use anyhow::Result;

use super::display::{print_lead, print_lead_row};
use super::LeadCommand;
use crate::hooks::{LeadContactsHook, LeadsHook};
use crate::models::{ContactPerson, Lead, LeadSource};
use crate::relations::RelationshipCoordinator;

pub async fn run_lead(coord: &RelationshipCoordinator, cmd: LeadCommand) -> Result<()> {
    let mut leads = LeadsHook::new(coord.clone());

    match cmd {
        LeadCommand::Add(args) => {
            let mut lead = Lead::new(ContactPerson {
                full_name: args.name,
                email: args.email,
                phone: args.phone,
                job_title: args.job_title,
            });
            lead.source = args
                .source
                .as_deref()
                .map(LeadSource::parse)
                .unwrap_or_default();
            let created = leads.create(&lead).await?;
            println!("Added lead {}", created.id);
        }
        LeadCommand::List => {
            leads.fetch_all().await?;
            if leads.state().items.is_empty() {
                println!("No leads.");
            }
            for lead in &leads.state().items {
                print_lead_row(lead);
            }
        }
        LeadCommand::Show { id } => {
            leads.select(&id).await?;
            let mut contacts = LeadContactsHook::new(coord.clone(), &id);
            contacts.fetch().await?;
            if let Some(lead) = leads.state().selected.as_ref() {
                print_lead(lead, &contacts.state().items);
            }
        }
    }

    Ok(())
}
