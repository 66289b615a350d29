//! Invariant helpers shared by the link/unlink flows, plus a read-only audit
//! that reports drift between denormalized fields and their sources.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::config::PriorityDefaults;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::Lead;

/// `ids` plus `id`, or `None` if `id` is already present.
pub fn set_with(ids: &[String], id: &str) -> Option<Vec<String>> {
    if ids.iter().any(|x| x == id) {
        return None;
    }
    let mut out = dedup(ids);
    out.push(id.to_string());
    Some(out)
}

/// `ids` minus `id`, or `None` if `id` was not there.
pub fn set_without(ids: &[String], id: &str) -> Option<Vec<String>> {
    if !ids.iter().any(|x| x == id) {
        return None;
    }
    Some(ids.iter().filter(|x| *x != id).cloned().collect())
}

/// Drop repeats, keeping first-seen order.
pub fn dedup(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|x| seen.insert(x.as_str()))
        .cloned()
        .collect()
}

/// Display priority for a new link when the caller gave none.
pub fn default_priority(is_primary: bool, defaults: PriorityDefaults) -> u32 {
    if is_primary {
        defaults.primary
    } else {
        defaults.other
    }
}

/// Guard for the lead organisation pair before it is written.
pub fn check_lead_organisation_pair(organisation_id: &str, organisation_name: &str) -> Result<()> {
    if organisation_id.trim().is_empty() {
        return Err(Error::Validation("organisation id is required".to_string()));
    }
    if organisation_name.trim().is_empty() {
        return Err(Error::Validation(format!(
            "organisation name is required when linking organisation {}",
            organisation_id
        )));
    }
    Ok(())
}

/// A denormalized name that no longer matches its source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaleName {
    pub document_id: String,
    pub organisation_id: String,
    pub stored: String,
    pub current: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    /// Leads with exactly one of organisation id/name set
    pub broken_lead_pairs: Vec<String>,
    /// Leads whose `contactIds` repeat an id
    pub duplicate_contact_ids: Vec<String>,
    /// (lead id, organisation id) where the organisation is gone
    pub orphaned_lead_organisations: Vec<(String, String)>,
    /// (lead id, contact id) where the contact is gone
    pub orphaned_lead_contacts: Vec<(String, String)>,
    /// (relationship id, organisation id) where the organisation is gone
    pub orphaned_contact_links: Vec<(String, String)>,
    /// (website id, organisation id) where the organisation is gone
    pub orphaned_websites: Vec<(String, String)>,
    /// Relationship ids held by more than one link entry
    pub duplicate_relationship_ids: Vec<String>,
    /// Snapshot names that differ from the organisation's current name.
    /// Reported only; links keep their snapshot.
    pub stale_names: Vec<StaleName>,
}

impl ConsistencyReport {
    /// No invariant violations. Orphans and stale names are tolerated drift
    /// and do not count.
    pub fn is_clean(&self) -> bool {
        self.broken_lead_pairs.is_empty()
            && self.duplicate_contact_ids.is_empty()
            && self.duplicate_relationship_ids.is_empty()
    }

    pub fn drift_count(&self) -> usize {
        self.orphaned_lead_organisations.len()
            + self.orphaned_lead_contacts.len()
            + self.orphaned_contact_links.len()
            + self.orphaned_websites.len()
            + self.stale_names.len()
    }
}

fn lead_has_duplicates(lead: &Lead) -> bool {
    dedup(&lead.contact_ids).len() != lead.contact_ids.len()
}

/// Walk every lead and contact and compare relationship fields against the
/// documents they point at. Read-only.
pub async fn audit(db: &Database) -> Result<ConsistencyReport> {
    let organisations: HashMap<String, String> = db
        .list_organisations()
        .await?
        .into_iter()
        .map(|o| (o.id, o.name))
        .collect();
    let contacts = db.list_contacts().await?;
    let contact_ids: HashSet<&str> = contacts.iter().map(|c| c.id.as_str()).collect();
    let leads = db.list_leads().await?;

    let mut report = ConsistencyReport::default();

    for lead in &leads {
        if !lead.organisation_pair_consistent() {
            report.broken_lead_pairs.push(lead.id.clone());
        }
        if lead_has_duplicates(lead) {
            report.duplicate_contact_ids.push(lead.id.clone());
        }
        if let (Some(oid), Some(name)) = (&lead.organisation_id, &lead.organisation_name) {
            match organisations.get(oid) {
                None => report
                    .orphaned_lead_organisations
                    .push((lead.id.clone(), oid.clone())),
                Some(current) if current != name => report.stale_names.push(StaleName {
                    document_id: lead.id.clone(),
                    organisation_id: oid.clone(),
                    stored: name.clone(),
                    current: current.clone(),
                }),
                Some(_) => {}
            }
        }
        for cid in &lead.contact_ids {
            if !contact_ids.contains(cid.as_str()) {
                report
                    .orphaned_lead_contacts
                    .push((lead.id.clone(), cid.clone()));
            }
        }
    }

    let mut seen_links = HashSet::new();
    for contact in &contacts {
        for link in &contact.organisations {
            if !seen_links.insert(link.id.as_str()) {
                report.duplicate_relationship_ids.push(link.id.clone());
            }
            match organisations.get(&link.organisation_id) {
                None => report
                    .orphaned_contact_links
                    .push((link.id.clone(), link.organisation_id.clone())),
                Some(current) if *current != link.organisation_name => {
                    report.stale_names.push(StaleName {
                        document_id: contact.id.clone(),
                        organisation_id: link.organisation_id.clone(),
                        stored: link.organisation_name.clone(),
                        current: current.clone(),
                    })
                }
                Some(_) => {}
            }
        }
    }

    for site in db.list_websites().await? {
        if let Some(oid) = site.organisation_id {
            if !organisations.contains_key(&oid) {
                report.orphaned_websites.push((site.id, oid));
            }
        }
    }

    tracing::debug!(
        clean = report.is_clean(),
        drift = report.drift_count(),
        "Consistency audit finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_set_with() {
        assert_eq!(set_with(&[], "c1"), Some(ids(&["c1"])));
        assert_eq!(set_with(&ids(&["c1"]), "c1"), None);
        assert_eq!(set_with(&ids(&["c1"]), "c2"), Some(ids(&["c1", "c2"])));
        // repeats left by older writers are folded away on the next write
        assert_eq!(set_with(&ids(&["c1", "c1"]), "c2"), Some(ids(&["c1", "c2"])));
    }

    #[test]
    fn test_set_without() {
        assert_eq!(set_without(&ids(&["c1"]), "c2"), None);
        assert_eq!(set_without(&ids(&["c1", "c2"]), "c1"), Some(ids(&["c2"])));
        assert_eq!(set_without(&ids(&["c1", "c1"]), "c1"), Some(vec![]));
        assert_eq!(set_without(&[], "c1"), None);
    }

    #[test]
    fn test_default_priority() {
        let d = PriorityDefaults::default();
        assert_eq!(default_priority(true, d), 1);
        assert_eq!(default_priority(false, d), 10);
        let custom = PriorityDefaults { primary: 0, other: 5 };
        assert_eq!(default_priority(false, custom), 5);
    }

    #[test]
    fn test_check_pair() {
        assert!(check_lead_organisation_pair("o1", "Acme").is_ok());
        assert!(check_lead_organisation_pair("o1", " ").is_err());
        assert!(check_lead_organisation_pair("", "Acme").is_err());
    }

    #[test]
    fn test_report_cleanliness() {
        let mut report = ConsistencyReport::default();
        assert!(report.is_clean());
        report.stale_names.push(StaleName {
            document_id: "c1".into(),
            organisation_id: "o1".into(),
            stored: "Old".into(),
            current: "New".into(),
        });
        assert!(report.is_clean());
        assert_eq!(report.drift_count(), 1);
        report.broken_lead_pairs.push("l1".into());
        assert!(!report.is_clean());
    }
}
