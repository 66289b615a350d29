//! What happens to dependents when an organisation or contact is deleted.
//!
//! Dependents live on other documents, so a cascade is a series of
//! independent single-document writes. If any of them fails the target
//! document is kept and the failures are reported; the writes that did
//! succeed stay applied. Cleanup is idempotent, so rerunning finishes the job.

use tracing::{error, info, warn};

use super::consistency::set_without;
use super::RelationshipCoordinator;
use crate::error::{Error, Result};
use crate::models::OrganisationLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Delete the document only; links and references dangle
    #[default]
    Orphan,
    /// Strip links and references, then delete
    Cascade,
    /// Refuse while anything still refers to the document
    Reject,
}

impl DeletePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orphan => "orphan",
            Self::Cascade => "cascade",
            Self::Reject => "reject",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "cascade" => Self::Cascade,
            "reject" => Self::Reject,
            _ => Self::Orphan,
        }
    }
}

impl RelationshipCoordinator {
    // ==================== DELETES ====================

    pub async fn delete_organisation(&self, organisation_id: &str, policy: DeletePolicy) -> Result<()> {
        if policy != DeletePolicy::Orphan {
            let contacts: Vec<_> = self
                .db
                .list_linked_contacts()
                .await?
                .into_iter()
                .filter(|c| {
                    c.organisations
                        .iter()
                        .any(|l| l.organisation_id == organisation_id)
                })
                .collect();
            let leads = self.db.leads_for_organisation(organisation_id).await?;
            let websites = self.db.websites_for_organisation(organisation_id).await?;

            if policy == DeletePolicy::Reject {
                let count = contacts.len() + leads.len() + websites.len();
                if count > 0 {
                    return Err(Error::Referenced {
                        kind: "organisation",
                        id: organisation_id.to_string(),
                        count,
                    });
                }
            } else {
                let mut failed = Vec::new();
                for contact in contacts {
                    let links: Vec<OrganisationLink> = contact
                        .organisations
                        .into_iter()
                        .filter(|l| l.organisation_id != organisation_id)
                        .collect();
                    if let Err(e) = self
                        .db
                        .set_contact_organisation_links(&contact.id, &links)
                        .await
                    {
                        error!(contact_id = %contact.id, "Cascade cleanup failed: {}", e);
                        failed.push(format!("contacts/{}", contact.id));
                    }
                }
                for lead in leads {
                    if let Err(e) = self.db.set_lead_organisation(&lead.id, None).await {
                        error!(lead_id = %lead.id, "Cascade cleanup failed: {}", e);
                        failed.push(format!("leads/{}", lead.id));
                    }
                }
                for site in websites {
                    if let Err(e) = self.db.clear_website_organisation(&site.id).await {
                        error!(website_id = %site.id, "Cascade cleanup failed: {}", e);
                        failed.push(format!("websites/{}", site.id));
                    }
                }
                if !failed.is_empty() {
                    warn!(organisation_id, failures = failed.len(), "Organisation kept");
                    return Err(Error::PartialCascade {
                        id: organisation_id.to_string(),
                        failed,
                    });
                }
            }
        }

        self.db.delete_organisation_document(organisation_id).await?;
        info!(organisation_id, policy = policy.as_str(), "Deleted organisation");
        Ok(())
    }

    pub async fn delete_contact(&self, contact_id: &str, policy: DeletePolicy) -> Result<()> {
        if policy != DeletePolicy::Orphan {
            let leads = self.db.leads_for_contact(contact_id).await?;

            if policy == DeletePolicy::Reject {
                if !leads.is_empty() {
                    return Err(Error::Referenced {
                        kind: "contact",
                        id: contact_id.to_string(),
                        count: leads.len(),
                    });
                }
            } else {
                let mut failed = Vec::new();
                for lead in leads {
                    let Some(ids) = set_without(&lead.contact_ids, contact_id) else {
                        continue;
                    };
                    if let Err(e) = self.db.set_lead_contact_ids(&lead.id, &ids).await {
                        error!(lead_id = %lead.id, "Cascade cleanup failed: {}", e);
                        failed.push(format!("leads/{}", lead.id));
                    }
                }
                if !failed.is_empty() {
                    warn!(contact_id, failures = failed.len(), "Contact kept");
                    return Err(Error::PartialCascade {
                        id: contact_id.to_string(),
                        failed,
                    });
                }
            }
        }

        self.db.delete_contact_document(contact_id).await?;
        info!(contact_id, policy = policy.as_str(), "Deleted contact");
        Ok(())
    }
}
