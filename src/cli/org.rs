use anyhow::Result;

use super::display::{print_member, print_lead_row, print_organisation, print_organisation_row, print_website_row};
use super::OrgCommand;
use crate::config::Config;
use crate::hooks::{LeadsHook, OrganisationContactsHook, OrganisationsHook, WebsitesHook};
use crate::models::{Organisation, OrganisationType};
use crate::relations::{DeletePolicy, RelationshipCoordinator};

pub async fn run_org(coord: &RelationshipCoordinator, config: &Config, cmd: OrgCommand) -> Result<()> {
    let mut orgs = OrganisationsHook::new(coord.clone());

    match cmd {
        OrgCommand::Add(args) => {
            let mut org = Organisation::new(args.name);
            org.org_type = args
                .org_type
                .as_deref()
                .map(OrganisationType::parse)
                .unwrap_or_default();
            org.industry = args.industry;
            org.website = args.website;
            let created = orgs.create(&org).await?;
            println!("Added organisation {}", created.id);
        }
        OrgCommand::List => {
            orgs.fetch_all().await?;
            if orgs.state().items.is_empty() {
                println!("No organisations.");
            }
            for org in &orgs.state().items {
                print_organisation_row(org);
            }
        }
        OrgCommand::Show { id } => {
            orgs.select(&id).await?;
            if let Some(org) = orgs.state().selected.as_ref() {
                print_organisation(org);
            }

            let mut members = OrganisationContactsHook::new(coord.clone(), &id);
            members.fetch().await?;
            if !members.state().items.is_empty() {
                println!();
            }
            for (contact, link) in &members.state().items {
                print_member(contact, link);
            }

            let mut leads = LeadsHook::new(coord.clone());
            leads.fetch_for_organisation(&id).await?;
            for lead in &leads.state().items {
                print_lead_row(lead);
            }

            let mut sites = WebsitesHook::new(coord.clone());
            sites.fetch_for_organisation(&id).await?;
            for site in &sites.state().items {
                print_website_row(site);
            }
        }
        OrgCommand::Delete(args) => {
            let policy = args
                .policy
                .as_deref()
                .map(DeletePolicy::parse)
                .unwrap_or(config.delete_policy);
            let mut orgs = orgs.with_delete_policy(policy);
            orgs.delete(&args.id).await?;
            println!("Deleted organisation {} ({})", args.id, policy.as_str());
        }
    }

    Ok(())
}
