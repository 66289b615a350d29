use tracing::info;

use super::consistency::check_lead_organisation_pair;
use super::RelationshipCoordinator;
use crate::error::Result;
use crate::models::Lead;

impl RelationshipCoordinator {
    // ==================== LEAD ↔ ORGANISATION ====================

    /// Point the lead at an organisation, writing id and name in one update.
    ///
    /// The caller resolves the name; the organisation document is not read,
    /// so a stale or placeholder name is stored as given. An empty name is
    /// rejected to keep the id/name pair whole.
    pub async fn link_lead_to_organisation(
        &self,
        lead_id: &str,
        organisation_id: &str,
        organisation_name: &str,
    ) -> Result<()> {
        check_lead_organisation_pair(organisation_id, organisation_name)?;
        self.db.require_lead(lead_id).await?;

        self.db
            .set_lead_organisation(lead_id, Some((organisation_id, organisation_name)))
            .await?;
        info!(lead_id, organisation_id, "Linked lead to organisation");
        Ok(())
    }

    /// Clear both halves of the lead's organisation pair.
    pub async fn unlink_lead_from_organisation(&self, lead_id: &str) -> Result<()> {
        self.db.require_lead(lead_id).await?;
        self.db.set_lead_organisation(lead_id, None).await?;
        info!(lead_id, "Unlinked lead from organisation");
        Ok(())
    }

    pub async fn leads_for_organisation(&self, organisation_id: &str) -> Result<Vec<Lead>> {
        self.db.leads_for_organisation(organisation_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_database;
    use crate::models::ContactPerson;

    async fn setup() -> (RelationshipCoordinator, String) {
        let coord = RelationshipCoordinator::new(memory_database());
        let lead = coord
            .db()
            .insert_lead(&Lead::new(ContactPerson::default()))
            .await
            .unwrap();
        (coord, lead.id)
    }

    #[tokio::test]
    async fn test_link_and_unlink_keep_pair() {
        let (coord, lid) = setup().await;

        coord
            .link_lead_to_organisation(&lid, "O1", "Acme")
            .await
            .unwrap();
        let lead = coord.db().require_lead(&lid).await.unwrap();
        assert_eq!(lead.organisation_id.as_deref(), Some("O1"));
        assert_eq!(lead.organisation_name.as_deref(), Some("Acme"));
        assert!(lead.organisation_pair_consistent());

        coord.unlink_lead_from_organisation(&lid).await.unwrap();
        let lead = coord.db().require_lead(&lid).await.unwrap();
        assert!(lead.organisation_id.is_none());
        assert!(lead.organisation_name.is_none());
    }

    #[tokio::test]
    async fn test_relink_replaces_pair() {
        let (coord, lid) = setup().await;
        coord
            .link_lead_to_organisation(&lid, "O1", "Acme")
            .await
            .unwrap();
        coord
            .link_lead_to_organisation(&lid, "O2", "Globex")
            .await
            .unwrap();

        let lead = coord.db().require_lead(&lid).await.unwrap();
        assert_eq!(lead.organisation_id.as_deref(), Some("O2"));
        assert_eq!(lead.organisation_name.as_deref(), Some("Globex"));
        assert!(coord.leads_for_organisation("O1").await.unwrap().is_empty());
        assert_eq!(coord.leads_for_organisation("O2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_name_rejected_without_write() {
        let (coord, lid) = setup().await;
        let err = coord
            .link_lead_to_organisation(&lid, "O1", "")
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::Validation(_)));

        let lead = coord.db().require_lead(&lid).await.unwrap();
        assert!(lead.organisation_id.is_none());
    }

    #[tokio::test]
    async fn test_missing_lead_is_not_found() {
        let (coord, _) = setup().await;
        assert!(coord
            .link_lead_to_organisation("gone", "O1", "Acme")
            .await
            .unwrap_err()
            .is_not_found());
        assert!(coord
            .unlink_lead_from_organisation("gone")
            .await
            .unwrap_err()
            .is_not_found());
    }
}
