use super::{HookState, Op};
use crate::error::Result;
use crate::models::{Organisation, OrganisationPatch};
use crate::relations::{DeletePolicy, RelationshipCoordinator};

pub struct OrganisationsHook {
    coord: RelationshipCoordinator,
    delete_policy: DeletePolicy,
    state: HookState<Organisation>,
}

impl OrganisationsHook {
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

    pub fn state(&self) -> &HookState<Organisation> {
        &self.state
    }

    pub async fn fetch_all(&mut self) -> Result<()> {
        self.state.begin(Op::List);
        let res = self.coord.db().list_organisations().await;
        self.state.items = self.state.finish(Op::List, res)?;
        Ok(())
    }

    pub async fn select(&mut self, id: &str) -> Result<()> {
        self.state.begin(Op::Item);
        let res = self.coord.db().require_organisation(id).await;
        self.state.selected = Some(self.state.finish(Op::Item, res)?);
        Ok(())
    }

    async fn refetch(&mut self) {
        let _ = self.fetch_all().await;
        if let Some(id) = self.state.selected.as_ref().map(|o| o.id.clone()) {
            self.state.begin(Op::Item);
            let res = self.coord.db().get_organisation(&id).await;
            if let Ok(selected) = self.state.finish(Op::Item, res) {
                self.state.selected = selected;
            }
        }
    }

    pub async fn create(&mut self, org: &Organisation) -> Result<Organisation> {
        self.state.begin(Op::Submit);
        let res = self.coord.db().insert_organisation(org).await;
        let created = self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(created)
    }

    /// Renames are not pushed to the name snapshots on contact links or
    /// leads; run an audit to find them.
    pub async fn update(&mut self, id: &str, patch: &OrganisationPatch) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self.coord.db().update_organisation(id, patch).await;
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self.coord.delete_organisation(id, self.delete_policy).await;
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }
}
