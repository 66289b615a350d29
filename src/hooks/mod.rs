//! State-exposure hooks
//!
//! The presentation layer's only entry point. Each hook owns the data it
//! shows plus independent loading flags and error slots for list, single
//! item and submit operations. Every successful mutation is followed by a
//! refetch of the list and the selected entity; there is no optimistic
//! merge and no shared cache.

use tracing::error;

use crate::error::Result;

mod contacts;
mod leads;
mod organisations;
mod relations;
mod websites;

pub use contacts::ContactsHook;
pub use leads::LeadsHook;
pub use organisations::OrganisationsHook;
pub use relations::{LeadContactsHook, OrganisationContactsHook};
pub use websites::WebsitesHook;

/// Which list a hook last loaded. Refetches after a mutation reload the
/// same one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListScope {
    #[default]
    All,
    Organisation(String),
    Contact(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    List,
    Item,
    Submit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    pub list: bool,
    pub item: bool,
    pub submit: bool,
}

/// Last failure per operation class, as a user-facing message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlots {
    pub list: Option<String>,
    pub item: Option<String>,
    pub submit: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HookState<T> {
    pub items: Vec<T>,
    pub selected: Option<T>,
    pub loading: LoadingFlags,
    pub errors: ErrorSlots,
}

impl<T> Default for HookState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            loading: LoadingFlags::default(),
            errors: ErrorSlots::default(),
        }
    }
}

impl<T> HookState<T> {
    fn flag(&mut self, op: Op) -> &mut bool {
        match op {
            Op::List => &mut self.loading.list,
            Op::Item => &mut self.loading.item,
            Op::Submit => &mut self.loading.submit,
        }
    }

    fn slot(&mut self, op: Op) -> &mut Option<String> {
        match op {
            Op::List => &mut self.errors.list,
            Op::Item => &mut self.errors.item,
            Op::Submit => &mut self.errors.submit,
        }
    }

    pub fn error(&self, op: Op) -> Option<&str> {
        match op {
            Op::List => self.errors.list.as_deref(),
            Op::Item => self.errors.item.as_deref(),
            Op::Submit => self.errors.submit.as_deref(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.list || self.loading.item || self.loading.submit
    }

    /// Mark `op` in flight and clear its previous error.
    pub(crate) fn begin(&mut self, op: Op) {
        *self.flag(op) = true;
        *self.slot(op) = None;
    }

    /// Mark `op` settled. A failure is logged and its message parked in the
    /// slot, then handed back unchanged.
    pub(crate) fn finish<R>(&mut self, op: Op, result: Result<R>) -> Result<R> {
        *self.flag(op) = false;
        if let Err(ref e) = result {
            error!(op = ?op, "Hook operation failed: {}", e);
            *self.slot(op) = Some(e.to_string());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_begin_clears_error() {
        let mut state: HookState<u8> = HookState::default();
        state.errors.submit = Some("old".to_string());

        state.begin(Op::Submit);
        assert!(state.loading.submit);
        assert!(state.is_loading());
        assert!(state.error(Op::Submit).is_none());
    }

    #[test]
    fn test_finish_records_error_per_slot() {
        let mut state: HookState<u8> = HookState::default();
        state.begin(Op::Item);
        let res: Result<()> = state.finish(Op::Item, Err(Error::not_found("leads", "l1")));

        assert!(res.is_err());
        assert!(!state.loading.item);
        assert_eq!(state.error(Op::Item), Some("leads document l1 not found"));
        assert!(state.error(Op::List).is_none());
        assert!(state.error(Op::Submit).is_none());
    }

    #[test]
    fn test_finish_ok_leaves_slot_empty() {
        let mut state: HookState<u8> = HookState::default();
        state.begin(Op::List);
        assert_eq!(state.finish(Op::List, Ok(3)).unwrap(), 3);
        assert!(!state.is_loading());
        assert_eq!(state.errors, ErrorSlots::default());
    }
}
