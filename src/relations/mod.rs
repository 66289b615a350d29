//! Relationship coordinator
//!
//! Keeps the many-to-many links between contacts, organisations and leads.
//! Links are one-sided: a contact holds its organisation links, a lead holds
//! its organisation pair and contact ids, and organisations hold nothing.
//! Every mutation writes exactly one document, so no flow can half-apply
//! except the explicit cascade deletes.

use crate::config::PriorityDefaults;
use crate::db::Database;

mod cascade;
pub mod consistency;
mod contact_org;
mod lead_contact;
mod lead_org;

pub use cascade::DeletePolicy;
pub use consistency::{ConsistencyReport, StaleName};
pub use contact_org::LinkPatch;

#[derive(Clone)]
pub struct RelationshipCoordinator {
    db: Database,
    priorities: PriorityDefaults,
}

impl RelationshipCoordinator {
    pub fn new(db: Database) -> Self {
        Self::with_priorities(db, PriorityDefaults::default())
    }

    pub fn with_priorities(db: Database, priorities: PriorityDefaults) -> Self {
        Self { db, priorities }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub async fn audit(&self) -> crate::Result<ConsistencyReport> {
        consistency::audit(&self.db).await
    }
}
