use super::{HookState, ListScope, Op};
use crate::error::Result;
use crate::models::{ContactPerson, Lead, LeadPatch};
use crate::relations::RelationshipCoordinator;

pub struct LeadsHook {
    coord: RelationshipCoordinator,
    state: HookState<Lead>,
    scope: ListScope,
}

impl LeadsHook {
    pub fn new(coord: RelationshipCoordinator) -> Self {
        Self {
            coord,
            state: HookState::default(),
            scope: ListScope::default(),
        }
    }

    pub fn state(&self) -> &HookState<Lead> {
        &self.state
    }

    pub fn scope(&self) -> &ListScope {
        &self.scope
    }

    async fn load(&mut self, scope: ListScope) -> Result<()> {
        self.state.begin(Op::List);
        let res = match &scope {
            ListScope::All => self.coord.db().list_leads().await,
            ListScope::Organisation(id) => self.coord.leads_for_organisation(id).await,
            ListScope::Contact(id) => self.coord.leads_for_contact(id).await,
        };
        self.scope = scope;
        self.state.items = self.state.finish(Op::List, res)?;
        Ok(())
    }

    pub async fn fetch_all(&mut self) -> Result<()> {
        self.load(ListScope::All).await
    }

    pub async fn fetch_for_organisation(&mut self, organisation_id: &str) -> Result<()> {
        self.load(ListScope::Organisation(organisation_id.to_string()))
            .await
    }

    pub async fn fetch_for_contact(&mut self, contact_id: &str) -> Result<()> {
        self.load(ListScope::Contact(contact_id.to_string())).await
    }

    pub async fn select(&mut self, id: &str) -> Result<()> {
        self.state.begin(Op::Item);
        let res = self.coord.db().require_lead(id).await;
        self.state.selected = Some(self.state.finish(Op::Item, res)?);
        Ok(())
    }

    async fn refetch(&mut self) {
        let _ = self.load(self.scope.clone()).await;
        if let Some(id) = self.state.selected.as_ref().map(|l| l.id.clone()) {
            self.state.begin(Op::Item);
            let res = self.coord.db().get_lead(&id).await;
            if let Ok(selected) = self.state.finish(Op::Item, res) {
                self.state.selected = selected;
            }
        }
    }

    pub async fn create(&mut self, lead: &Lead) -> Result<Lead> {
        self.state.begin(Op::Submit);
        let res = self.coord.db().insert_lead(lead).await;
        let created = self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(created)
    }

    pub async fn update(&mut self, id: &str, patch: &LeadPatch) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self.coord.db().update_lead(id, patch).await;
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self.coord.db().delete_lead(id).await;
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }

    /// Link with a name the caller already holds.
    pub async fn link_organisation(
        &mut self,
        lead_id: &str,
        organisation_id: &str,
        organisation_name: &str,
    ) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self
            .coord
            .link_lead_to_organisation(lead_id, organisation_id, organisation_name)
            .await;
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }

    /// Link after reading the organisation's current name, so the snapshot
    /// is fresh. Fails if the organisation does not exist.
    pub async fn link_organisation_by_id(&mut self, lead_id: &str, organisation_id: &str) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = match self.coord.db().require_organisation(organisation_id).await {
            Ok(org) => {
                self.coord
                    .link_lead_to_organisation(lead_id, &org.id, &org.name)
                    .await
            }
            Err(e) => Err(e),
        };
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }

    pub async fn unlink_organisation(&mut self, lead_id: &str) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self.coord.unlink_lead_from_organisation(lead_id).await;
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }

    pub async fn link_contact(
        &mut self,
        lead_id: &str,
        contact_id: &str,
        details: &ContactPerson,
    ) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self
            .coord
            .link_lead_to_contact(lead_id, contact_id, details)
            .await;
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }

    pub async fn unlink_contact(&mut self, lead_id: &str, contact_id: &str) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self.coord.unlink_lead_from_contact(lead_id, contact_id).await;
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_database;
    use crate::models::Organisation;

    #[tokio::test]
    async fn test_link_by_id_uses_current_name() {
        let coord = RelationshipCoordinator::new(memory_database());
        let org = coord
            .db()
            .insert_organisation(&Organisation::new("Acme".into()))
            .await
            .unwrap();
        let mut h = LeadsHook::new(coord);
        let lead = h.create(&Lead::new(ContactPerson::default())).await.unwrap();
        h.select(&lead.id).await.unwrap();

        h.link_organisation_by_id(&lead.id, &org.id).await.unwrap();
        let selected = h.state().selected.as_ref().unwrap();
        assert_eq!(selected.organisation_name.as_deref(), Some("Acme"));

        h.unlink_organisation(&lead.id).await.unwrap();
        assert!(h.state().selected.as_ref().unwrap().organisation_id.is_none());
    }

    #[tokio::test]
    async fn test_link_by_id_unknown_org() {
        let mut h = LeadsHook::new(RelationshipCoordinator::new(memory_database()));
        let lead = h.create(&Lead::new(ContactPerson::default())).await.unwrap();

        assert!(h.link_organisation_by_id(&lead.id, "ghost").await.is_err());
        assert!(h.state().error(Op::Submit).is_some());
        assert!(h.state().items[0].organisation_id.is_none());
    }

    #[tokio::test]
    async fn test_mutation_keeps_scoped_list() {
        let coord = RelationshipCoordinator::new(memory_database());
        let mut h = LeadsHook::new(coord);
        let linked = h.create(&Lead::new(ContactPerson::default())).await.unwrap();
        h.create(&Lead::new(ContactPerson::default())).await.unwrap();
        h.link_organisation(&linked.id, "O1", "Acme").await.unwrap();

        h.fetch_for_organisation("O1").await.unwrap();
        assert_eq!(h.state().items.len(), 1);

        h.link_contact(&linked.id, "C1", &ContactPerson::default())
            .await
            .unwrap();
        assert_eq!(h.scope(), &ListScope::Organisation("O1".to_string()));
        assert_eq!(h.state().items.len(), 1);
        assert_eq!(h.state().items[0].contact_ids, vec!["C1".to_string()]);

        h.fetch_for_contact("C1").await.unwrap();
        h.unlink_contact(&linked.id, "C1").await.unwrap();
        assert!(h.state().items.is_empty());

        h.fetch_all().await.unwrap();
        assert_eq!(h.state().items.len(), 2);
    }

    #[tokio::test]
    async fn test_contact_links_refetch() {
        let mut h = LeadsHook::new(RelationshipCoordinator::new(memory_database()));
        let lead = h.create(&Lead::new(ContactPerson::default())).await.unwrap();

        h.link_contact(&lead.id, "C1", &ContactPerson::default())
            .await
            .unwrap();
        assert_eq!(h.state().items[0].contact_ids, vec!["C1".to_string()]);

        h.unlink_contact(&lead.id, "C1").await.unwrap();
        assert!(h.state().items[0].contact_ids.is_empty());
    }
}
