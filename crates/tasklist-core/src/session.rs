use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{PersistError, SessionError};
use crate::filter::{Filter, FilterCounts};
use crate::item::{Item, ItemPatch};
use crate::persist::Snapshot;
use crate::store::ItemStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

/// What a presentation shell mounts: the store, the active filter and
/// whether the initial load has finished.
///
/// Collection mutations are refused until [`finish_load`](Self::finish_load)
/// has run, so a late load can never overwrite edits. Each accepted
/// mutation bumps [`revision`](Self::revision); the shell then persists
/// [`snapshot`](Self::snapshot).
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    store: ItemStore,
    filter: Filter,
    load_state: LoadState,
    revision: u64,
    batch_size: usize,
    batch_title_prefix: String,
}

impl Session {
    pub fn new(cfg: &Config) -> Self {
        Self {
            store: ItemStore::new(),
            filter: Filter::default(),
            load_state: LoadState::Loading,
            revision: 0,
            batch_size: cfg.batch_size,
            batch_title_prefix: cfg.batch_title_prefix.clone(),
        }
    }

    /// Applies the result of the initial load. Only the first call counts.
    ///
    /// A failed or malformed load is logged and the session starts empty.
    #[tracing::instrument(skip_all)]
    pub fn finish_load(&mut self, loaded: Result<Option<Vec<Item>>, PersistError>) {
        if self.load_state == LoadState::Ready {
            warn!("ignoring repeated load result");
            return;
        }

        match loaded {
            Ok(Some(items)) => {
                let count = items.len();
                match self.store.replace_all(items) {
                    Ok(()) => info!(count, "restored items"),
                    Err(err) => warn!(error = %err, "refusing stored items; starting empty"),
                }
            }
            Ok(None) => debug!("starting with an empty list"),
            Err(err) => warn!(error = %err, "failed to load stored items; starting empty"),
        }
        self.load_state = LoadState::Ready;
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_ready(&self) -> bool {
        self.load_state == LoadState::Ready
    }

    pub fn items(&self) -> &[Rc<Item>] {
        self.store.items()
    }

    pub fn visible(&self) -> Vec<Rc<Item>> {
        self.filter.apply(self.store.items())
    }

    pub fn counts(&self) -> FilterCounts {
        FilterCounts::tally(self.store.items().iter().map(|item| item.as_ref()))
    }

    pub fn input_text(&self) -> &str {
        self.store.input_text()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn editing_disabled(&self) -> bool {
        self.filter.editing_disabled()
    }

    pub fn next_id(&self) -> u64 {
        self.store.next_id()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            items: self.store.to_vec(),
        }
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.store.set_input_text(text);
    }

    pub fn set_filter(&mut self, filter: Filter) {
        debug!(%filter, "filter changed");
        self.filter = filter;
    }

    pub fn create(&mut self) -> Result<Rc<Item>, SessionError> {
        self.ensure_ready()?;
        self.ensure_editable()?;
        let item = self.store.create()?;
        self.commit();
        Ok(item)
    }

    pub fn create_titled(&mut self, title: impl Into<String>) -> Result<Rc<Item>, SessionError> {
        self.set_input_text(title);
        self.create()
    }

    /// Applies a single-field patch. Returns whether an item matched.
    ///
    /// Title patches are refused for completed items and in read-only
    /// views; completion and delete toggles are always accepted. A patch on
    /// a missing id still counts as a commit.
    pub fn update(&mut self, id: u64, patch: ItemPatch) -> Result<bool, SessionError> {
        self.ensure_ready()?;
        if let ItemPatch::Title(_) = patch {
            self.ensure_editable()?;
            if self.store.get(id).is_some_and(|item| !item.title_editable()) {
                return Err(SessionError::Locked { id });
            }
        }

        let matched = self.store.update(id, &patch);
        self.commit();
        Ok(matched)
    }

    /// Inserts the configured number of placeholder items.
    pub fn create_batch(&mut self) -> Result<Vec<u64>, SessionError> {
        self.create_batch_of(self.batch_size)
    }

    pub fn create_batch_of(&mut self, count: usize) -> Result<Vec<u64>, SessionError> {
        self.ensure_ready()?;
        self.ensure_editable()?;
        let ids = self.store.create_batch(count, &self.batch_title_prefix)?;
        self.commit();
        Ok(ids)
    }

    /// Permanently removes soft-deleted items. Returns how many went.
    pub fn purge_deleted(&mut self) -> Result<usize, SessionError> {
        self.ensure_ready()?;
        let removed = self.store.purge_deleted();
        self.commit();
        Ok(removed)
    }

    fn ensure_ready(&self) -> Result<(), SessionError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(SessionError::NotReady)
        }
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if self.editing_disabled() {
            Err(SessionError::EditingDisabled {
                filter: self.filter,
            })
        } else {
            Ok(())
        }
    }

    fn commit(&mut self) {
        self.revision += 1;
        debug!(revision = self.revision, count = self.store.len(), "committed");
    }
}
