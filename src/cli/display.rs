use crate::models::{Contact, Lead, Organisation, OrganisationLink, Website};
use crate::relations::ConsistencyReport;

pub fn print_organisation_row(org: &Organisation) {
    println!("{}  {} ({}, {})", org.id, org.name, org.org_type.as_str(), org.status.as_str());
}

pub fn print_organisation(org: &Organisation) {
    println!("{}\n", org.name);
    println!("  id: {}", org.id);
    println!("  type: {}  status: {}", org.org_type.as_str(), org.status.as_str());
    if let Some(ref industry) = org.industry {
        println!("  industry: {}", industry);
    }
    if let Some(ref website) = org.website {
        println!("  website: {}", website);
    }
    if let Some(loc) = org.billing_address.city_state() {
        println!("  billing: {}", loc);
    }
    if let Some(loc) = org.shipping_address.city_state() {
        println!("  shipping: {}", loc);
    }
}

pub fn print_member(contact: &Contact, link: &OrganisationLink) {
    let primary = if link.is_primary { " *" } else { "" };
    let role = if link.role.is_empty() { "-" } else { link.role.as_str() };
    println!(
        "  [{}] {} <{}> {} (rel {}){}",
        link.priority, contact.full_name, contact.email, role, link.id, primary
    );
}

pub fn print_contact_row(contact: &Contact) {
    let org = contact
        .primary_link()
        .map(|l| format!("  @ {}", l.organisation_name))
        .unwrap_or_default();
    println!("{}  {} <{}>{}", contact.id, contact.full_name, contact.email, org);
}

pub fn print_contact(contact: &Contact) {
    println!("{}\n", contact.full_name);
    println!("  id: {}", contact.id);
    println!("  email: {}", contact.email);
    for phone in [&contact.phone, &contact.mobile].into_iter().flatten() {
        println!("  phone: {}", phone);
    }
    if let Some(ref role) = contact.role {
        println!("  role: {}", role);
    }
    println!("  status: {}", contact.status.as_str());

    let mut links: Vec<_> = contact.organisations.iter().collect();
    links.sort_by_key(|l| l.priority);
    for link in links {
        let name = if link.organisation_name.is_empty() {
            "(unknown organisation)"
        } else {
            link.organisation_name.as_str()
        };
        let primary = if link.is_primary { " *" } else { "" };
        println!("  org: {} {} (rel {}){}", name, link.role, link.id, primary);
    }
}

pub fn print_lead_row(lead: &Lead) {
    let org = lead
        .organisation_name
        .as_deref()
        .map(|n| format!("  @ {}", n))
        .unwrap_or_default();
    println!(
        "{}  {} [{}]{}",
        lead.id,
        lead.contact.full_name,
        lead.status.as_str(),
        org
    );
}

pub fn print_lead(lead: &Lead, contacts: &[Contact]) {
    println!("{}\n", lead.contact.full_name);
    println!("  id: {}", lead.id);
    if !lead.contact.email.is_empty() {
        println!("  email: {}", lead.contact.email);
    }
    if let Some(ref title) = lead.contact.job_title {
        println!("  title: {}", title);
    }
    println!("  status: {}  source: {}", lead.status.as_str(), lead.source.as_str());
    if let (Some(id), Some(name)) = (&lead.organisation_id, &lead.organisation_name) {
        println!("  organisation: {} ({})", name, id);
    }
    for c in contacts {
        println!("  contact: {} <{}>", c.full_name, c.email);
    }
}

pub fn print_website_row(site: &Website) {
    println!("  site: {} [{}]", site.url, site.status.as_str());
}

pub fn print_report(report: &ConsistencyReport) {
    if report.is_clean() && report.drift_count() == 0 {
        println!("No problems found.");
        return;
    }

    for id in &report.broken_lead_pairs {
        println!("lead {}: organisation id and name out of step", id);
    }
    for id in &report.duplicate_contact_ids {
        println!("lead {}: repeated contact ids", id);
    }
    for id in &report.duplicate_relationship_ids {
        println!("relationship {}: held by more than one link", id);
    }
    for (lead, org) in &report.orphaned_lead_organisations {
        println!("lead {}: organisation {} no longer exists", lead, org);
    }
    for (lead, contact) in &report.orphaned_lead_contacts {
        println!("lead {}: contact {} no longer exists", lead, contact);
    }
    for (rel, org) in &report.orphaned_contact_links {
        println!("relationship {}: organisation {} no longer exists", rel, org);
    }
    for (site, org) in &report.orphaned_websites {
        println!("website {}: organisation {} no longer exists", site, org);
    }
    for stale in &report.stale_names {
        println!(
            "{}: stored name {:?} for {}, now {:?}",
            stale.document_id, stale.stored, stale.organisation_id, stale.current
        );
    }
}
