use super::{HookState, Op};
use crate::error::Result;
use crate::models::{Website, WebsitePatch};
use crate::relations::RelationshipCoordinator;

pub struct WebsitesHook {
    coord: RelationshipCoordinator,
    state: HookState<Website>,
    /// Organisation the list is narrowed to, if any
    organisation_id: Option<String>,
}

impl WebsitesHook {
    pub fn new(coord: RelationshipCoordinator) -> Self {
        Self {
            coord,
            state: HookState::default(),
            organisation_id: None,
        }
    }

    pub fn state(&self) -> &HookState<Website> {
        &self.state
    }

    async fn load(&mut self, organisation_id: Option<String>) -> Result<()> {
        self.state.begin(Op::List);
        let res = match organisation_id.as_deref() {
            Some(oid) => self.coord.db().websites_for_organisation(oid).await,
            None => self.coord.db().list_websites().await,
        };
        self.organisation_id = organisation_id;
        self.state.items = self.state.finish(Op::List, res)?;
        Ok(())
    }

    pub async fn fetch_all(&mut self) -> Result<()> {
        self.load(None).await
    }

    pub async fn fetch_for_organisation(&mut self, organisation_id: &str) -> Result<()> {
        self.load(Some(organisation_id.to_string())).await
    }

    async fn refetch(&mut self) {
        let _ = self.load(self.organisation_id.clone()).await;
        if let Some(id) = self.state.selected.as_ref().map(|w| w.id.clone()) {
            self.state.begin(Op::Item);
            let res = self.coord.db().get_website(&id).await;
            if let Ok(selected) = self.state.finish(Op::Item, res) {
                self.state.selected = selected;
            }
        }
    }

    pub async fn select(&mut self, id: &str) -> Result<()> {
        self.state.begin(Op::Item);
        let res = self.coord.db().get_website(id).await.and_then(|w| {
            w.ok_or_else(|| crate::Error::not_found(crate::store::WEBSITES, id))
        });
        self.state.selected = Some(self.state.finish(Op::Item, res)?);
        Ok(())
    }

    pub async fn create(&mut self, site: &Website) -> Result<Website> {
        self.state.begin(Op::Submit);
        let res = self.coord.db().insert_website(site).await;
        let created = self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(created)
    }

    pub async fn update(&mut self, id: &str, patch: &WebsitePatch) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self.coord.db().update_website(id, patch).await;
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.state.begin(Op::Submit);
        let res = self.coord.db().delete_website(id).await;
        self.state.finish(Op::Submit, res)?;
        self.refetch().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_database;

    #[tokio::test]
    async fn test_website_lifecycle() {
        let mut h = WebsitesHook::new(RelationshipCoordinator::new(memory_database()));
        let site = h
            .create(&Website::new("https://acme.com".into()))
            .await
            .unwrap();
        h.select(&site.id).await.unwrap();

        let patch = WebsitePatch {
            hosting_provider: Some("Netlify".into()),
            ..Default::default()
        };
        h.update(&site.id, &patch).await.unwrap();
        assert_eq!(
            h.state().selected.as_ref().unwrap().hosting_provider.as_deref(),
            Some("Netlify")
        );

        h.delete(&site.id).await.unwrap();
        assert!(h.state().items.is_empty());
        assert!(h.state().selected.is_none());
        assert!(h.select(&site.id).await.is_err());
    }

    #[tokio::test]
    async fn test_mutation_keeps_organisation_list() {
        let mut h = WebsitesHook::new(RelationshipCoordinator::new(memory_database()));
        let mut owned = Website::new("https://acme.com".into());
        owned.organisation_id = Some("O1".into());
        let owned = h.create(&owned).await.unwrap();
        h.create(&Website::new("https://other.io".into()))
            .await
            .unwrap();

        h.fetch_for_organisation("O1").await.unwrap();
        assert_eq!(h.state().items.len(), 1);

        let patch = WebsitePatch {
            notes: Some("renewal due".into()),
            ..Default::default()
        };
        h.update(&owned.id, &patch).await.unwrap();
        assert_eq!(h.state().items.len(), 1);
        assert_eq!(h.state().items[0].notes.as_deref(), Some("renewal due"));
    }
}
