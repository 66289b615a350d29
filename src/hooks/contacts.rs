use super::{HookState, Op};
use crate::error::Result;
use crate::models::{Contact, ContactPatch};
use crate::relations::{DeletePolicy, LinkPatch, RelationshipCoordinator};

pub struct ContactsHook {
    coord: RelationshipCoordinator,
    delete_policy: DeletePolicy,
    state: HookState<Contact>,
}

impl ContactsHook {
    pub fn new(coord: RelationshipCoordinator) -> Self {
        Self {
            coord,
            delete_policy: DeletePolicy::default(),
            state: HookState::default(),
        }
    }

    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    pub fn state(&self) -> &HookState<Contact> {
        &self.state
    }

    pub async fn fetch_all(&mut self) -> Result<()> {
        self.state.begin(Op::List);
        let res = self.coord.db().list_contacts().await;
        self.state.items = self.state.finish(Op::List, res)?;
        Ok(())
    }

    pub async fn select(&mut self, id: &str) -> Result<()> {
        self.state.begin(Op::Item);
        let res = self.coord.db().require_contact(id).await;
        self.state.selected = Some(self.state.finish(Op::Item, res)?);
        Ok(())
    }

    /// Reload the list and the selected contact. Failures land in the list
    /// and item slots; they never fail the mutation that triggered them.
    async fn refetch(&mut self) {
        let _ = self.fetch_all().await;
        if let Some(id) = self.state.selected.as_ref().map(|c| c.id.clone()) {
            self.state.begin(Op::Item);
            let res = self.coord.db().get_contact(&id).await;
            if let Ok(selected) = self.state.finish(Op::Item, res) {
                self.state.selected = selected;
            }
        }
    }

    pub async fn create(&mut self, contact: &Contact) -> Result<Contact> {
        self.state.begin(Op::Submit);
        let res = self.coord.db().insert_contact(contact).await;
        let created = self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(created)
    }

    pub async fn update(&mut self, id: &str, patch: &ContactPatch) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self.coord.db().update_contact(id, patch).await;
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self.coord.delete_contact(id, self.delete_policy).await;
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }

    pub async fn link_organisation(
        &mut self,
        contact_id: &str,
        organisation_id: &str,
        role: &str,
        is_primary: bool,
        priority: Option<u32>,
    ) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self
            .coord
            .link_contact_to_organisation(contact_id, organisation_id, role, is_primary, priority)
            .await;
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }

    pub async fn update_organisation_link(
        &mut self,
        relationship_id: &str,
        patch: &LinkPatch,
    ) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self
            .coord
            .update_contact_organisation_link(relationship_id, patch)
            .await;
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }

    pub async fn unlink_organisation(&mut self, relationship_id: &str) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self
            .coord
            .unlink_contact_from_organisation(relationship_id)
            .await;
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

    fn hook() -> ContactsHook {
        ContactsHook::new(RelationshipCoordinator::new(memory_database()))
    }

    #[tokio::test]
    async fn test_create_refetches_list() {
        let mut h = hook();
        h.create(&Contact::new("Ann".into(), "ann@example.com".into()))
            .await
            .unwrap();

        assert_eq!(h.state().items.len(), 1);
        assert!(!h.state().is_loading());
    }

    #[tokio::test]
    async fn test_link_refreshes_selected() {
        let mut h = hook();
        let ann = h
            .create(&Contact::new("Ann".into(), "ann@example.com".into()))
            .await
            .unwrap();
        let org = h
            .coord
            .db()
            .insert_organisation(&Organisation::new("Acme".into()))
            .await
            .unwrap();

        h.select(&ann.id).await.unwrap();
        h.link_organisation(&ann.id, &org.id, "CTO", true, None)
            .await
            .unwrap();

        let selected = h.state().selected.as_ref().unwrap();
        assert_eq!(selected.organisations.len(), 1);
        let rel = selected.organisations[0].id.clone();

        h.unlink_organisation(&rel).await.unwrap();
        assert!(h.state().selected.as_ref().unwrap().organisations.is_empty());
    }

    #[tokio::test]
    async fn test_failure_lands_in_submit_slot() {
        let mut h = hook();
        let err = h
            .link_organisation("nobody", "o1", "", false, None)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            h.state().error(Op::Submit),
            Some("contacts document nobody not found")
        );
        assert!(!h.state().loading.submit);
        assert!(h.state().error(Op::List).is_none());
    }

    #[tokio::test]
    async fn test_delete_clears_selection() {
        let mut h = hook();
        let ann = h
            .create(&Contact::new("Ann".into(), "ann@example.com".into()))
            .await
            .unwrap();
        h.select(&ann.id).await.unwrap();

        h.delete(&ann.id).await.unwrap();
        assert!(h.state().selected.is_none());
        assert!(h.state().items.is_empty());
    }
}
