use std::rc::Rc;

use tracing::{debug, info};

use crate::error::StoreError;
use crate::item::{Item, ItemPatch};

/// Upper bound on a single placeholder batch.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Ordered task collection, newest first, with its id counter and the
/// pending text of the new-item input.
///
/// Items sit behind `Rc`: an update swaps in a fresh value for the touched
/// item only, so every other entry stays pointer-equal to its previous
/// version.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStore {
    items: Vec<Rc<Item>>,
    next_id: u64,
    input: String,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            input: String::new(),
        }
    }
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Rc<Item>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn input_text(&self) -> &str {
        &self.input
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn get(&self, id: u64) -> Option<&Rc<Item>> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Turns the input buffer into a new item at the front of the list.
    ///
    /// Blank input is rejected and leaves the list, counter and buffer as
    /// they were. The title is stored as typed.
    #[tracing::instrument(skip(self), fields(next_id = self.next_id))]
    pub fn create(&mut self) -> Result<Rc<Item>, StoreError> {
        if self.input.trim().is_empty() {
            debug!("ignoring blank title");
            return Err(StoreError::EmptyTitle);
        }

        let next_id = self.next_id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        let title = std::mem::take(&mut self.input);
        let item = Rc::new(Item::new(self.next_id, title));
        self.items.insert(0, Rc::clone(&item));
        self.next_id = next_id;

        debug!(id = item.id, "created item");
        Ok(item)
    }

    pub fn create_titled(&mut self, title: impl Into<String>) -> Result<Rc<Item>, StoreError> {
        self.set_input_text(title);
        self.create()
    }

    /// Applies `patch` to the item with `id`. Returns `false` when no item
    /// has that id; the collection is left untouched in that case.
    #[tracing::instrument(skip(self, patch), fields(field = patch.field_name()))]
    pub fn update(&mut self, id: u64, patch: &ItemPatch) -> bool {
        let Some(slot) = self.items.iter_mut().find(|item| item.id == id) else {
            debug!(id, "update on missing id ignored");
            return false;
        };

        *slot = Rc::new(patch.apply(slot));
        true
    }

    /// Prepends `count` placeholder items titled `{prefix}1..={prefix}count`.
    ///
    /// The batch keeps ascending id order as a block ahead of the existing
    /// items, so on an empty list ids render 1, 2, 3. Batches above
    /// [`MAX_BATCH_SIZE`] are refused, as is any batch that would run the
    /// counter out of ids; nothing is inserted in either case.
    #[tracing::instrument(skip(self, prefix), fields(next_id = self.next_id))]
    pub fn create_batch(&mut self, count: usize, prefix: &str) -> Result<Vec<u64>, StoreError> {
        if count > MAX_BATCH_SIZE {
            return Err(StoreError::BatchTooLarge {
                count,
                max: MAX_BATCH_SIZE,
            });
        }
        let first = self.next_id;
        let next_id = u64::try_from(count)
            .ok()
            .and_then(|count| first.checked_add(count))
            .ok_or(StoreError::IdsExhausted)?;

        let batch: Vec<Rc<Item>> = (first..next_id)
            .zip(1..=count)
            .map(|(id, n)| Rc::new(Item::new(id, format!("{prefix}{n}"))))
            .collect();
        let ids = batch.iter().map(|item| item.id).collect::<Vec<_>>();

        self.items.splice(0..0, batch);
        self.next_id = next_id;

        debug!(count, "created batch");
        Ok(ids)
    }

    /// Drops every soft-deleted item for good and returns how many went.
    #[tracing::instrument(skip(self))]
    pub fn purge_deleted(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.delete_flag);
        let removed = before - self.items.len();

        info!(before, after = self.items.len(), "purged deleted items");
        removed
    }

    /// Replaces the collection with previously persisted items.
    ///
    /// The counter only ever moves forward, past the highest loaded id. A
    /// list holding an id with no successor is refused and the store is
    /// left as it was.
    pub fn replace_all(&mut self, items: Vec<Item>) -> Result<(), StoreError> {
        let max_id = items.iter().map(|item| item.id).max().unwrap_or(0);
        let after_max = max_id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        self.next_id = self.next_id.max(after_max);
        self.items = items.into_iter().map(Rc::new).collect();
        Ok(())
    }

    pub fn to_vec(&self) -> Vec<Item> {
        self.items.iter().map(|item| Item::clone(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{ItemStore, MAX_BATCH_SIZE};
    use crate::error::StoreError;
    use crate::item::{Item, ItemPatch};

    fn ids(store: &ItemStore) -> Vec<u64> {
        store.items().iter().map(|item| item.id).collect()
    }

    #[test]
    fn create_prepends_with_increasing_ids() {
        let mut store = ItemStore::new();
        for title in ["a", "b", "c", "d"] {
            store.create_titled(title).unwrap();
        }

        assert_eq!(ids(&store), vec![4, 3, 2, 1]);
        assert_eq!(store.next_id(), 5);
        assert_eq!(store.items()[0].title, "d");
    }

    #[test]
    fn create_clears_input_buffer() {
        let mut store = ItemStore::new();
        store.set_input_text("buy milk");
        let item = store.create().unwrap();

        assert_eq!(*item, Item::new(1, "buy milk"));
        assert_eq!(store.input_text(), "");
    }

    #[test]
    fn blank_titles_change_nothing() {
        let mut store = ItemStore::new();
        store.create_titled("keep").unwrap();

        for blank in ["", "   ", "\t\n"] {
            store.set_input_text(blank);
            assert_eq!(store.create(), Err(StoreError::EmptyTitle));
            assert_eq!(store.input_text(), blank);
        }

        assert_eq!(ids(&store), vec![1]);
        assert_eq!(store.next_id(), 2);
    }

    #[test]
    fn create_keeps_surrounding_whitespace() {
        let mut store = ItemStore::new();
        let item = store.create_titled("  padded ").unwrap();
        assert_eq!(item.title, "  padded ");
    }

    #[test]
    fn update_preserves_identity_of_untouched_items() {
        let mut store = ItemStore::new();
        store.create_titled("one").unwrap();
        store.create_titled("two").unwrap();
        let before = store.items().to_vec();

        assert!(store.update(1, &ItemPatch::Completed(true)));

        let after = store.items();
        assert!(Rc::ptr_eq(&before[0], &after[0]));
        assert!(!Rc::ptr_eq(&before[1], &after[1]));
        assert!(after[1].completed_flag);
        assert!(!before[1].completed_flag);
    }

    #[test]
    fn update_missing_id_is_a_no_op() {
        let mut store = ItemStore::new();
        store.create_titled("only").unwrap();
        let before = store.clone();

        assert!(!store.update(42, &ItemPatch::Deleted(true)));
        assert_eq!(store, before);
    }

    #[test]
    fn field_updates_compose() {
        let mut store = ItemStore::new();
        store.create_titled("task").unwrap();

        store.update(1, &ItemPatch::Completed(true));
        store.update(1, &ItemPatch::Title("x".to_string()));

        let item = store.get(1).unwrap();
        assert_eq!(item.title, "x");
        assert!(item.completed_flag);
    }

    #[test]
    fn batch_renders_in_ascending_id_order() {
        let mut store = ItemStore::new();
        let created = store.create_batch(3, "テスト_タスク_").unwrap();

        assert_eq!(created, vec![1, 2, 3]);
        assert_eq!(ids(&store), vec![1, 2, 3]);
        assert_eq!(store.items()[0].title, "テスト_タスク_1");
        assert_eq!(store.items()[2].title, "テスト_タスク_3");
        assert_eq!(store.next_id(), 4);
    }

    #[test]
    fn batch_goes_ahead_of_existing_items() {
        let mut store = ItemStore::new();
        store.create_titled("old").unwrap();
        store.create_batch(2, "p").unwrap();

        assert_eq!(ids(&store), vec![2, 3, 1]);
        assert_eq!(store.items()[0].title, "p1");
        assert_eq!(store.next_id(), 4);

        assert_eq!(store.create_batch(0, "p"), Ok(vec![]));
        assert_eq!(ids(&store), vec![2, 3, 1]);
        assert_eq!(store.next_id(), 4);
    }

    #[test]
    fn purge_removes_only_deleted_items_in_order() {
        let mut store = ItemStore::new();
        for title in ["a", "b", "c", "d", "e"] {
            store.create_titled(title).unwrap();
        }
        store.update(2, &ItemPatch::Deleted(true));
        store.update(4, &ItemPatch::Deleted(true));
        store.update(3, &ItemPatch::Completed(true));
        let survivors: Vec<_> = store
            .items()
            .iter()
            .filter(|item| !item.delete_flag)
            .cloned()
            .collect();

        assert_eq!(store.purge_deleted(), 2);
        assert_eq!(ids(&store), vec![5, 3, 1]);
        for (kept, original) in store.items().iter().zip(&survivors) {
            assert!(Rc::ptr_eq(kept, original));
        }
        assert_eq!(store.next_id(), 6);
    }

    #[test]
    fn ids_are_not_reused_after_purge() {
        let mut store = ItemStore::new();
        store.create_titled("gone").unwrap();
        store.update(1, &ItemPatch::Deleted(true));
        store.purge_deleted();

        let item = store.create_titled("fresh").unwrap();
        assert_eq!(item.id, 2);
    }

    #[test]
    fn replace_all_moves_counter_past_loaded_ids() {
        let mut store = ItemStore::new();
        store
            .replace_all(vec![Item::new(9, "nine"), Item::new(4, "four")])
            .unwrap();

        assert_eq!(ids(&store), vec![9, 4]);
        assert_eq!(store.next_id(), 10);

        store.replace_all(vec![]).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 10);
    }

    #[test]
    fn replace_all_refuses_an_id_without_successor() {
        let mut store = ItemStore::new();
        store.create_titled("kept").unwrap();

        assert_eq!(
            store.replace_all(vec![Item::new(u64::MAX, "last")]),
            Err(StoreError::IdsExhausted)
        );
        assert_eq!(ids(&store), vec![1]);
        assert_eq!(store.next_id(), 2);
    }

    #[test]
    fn counter_never_wraps() {
        let mut store = ItemStore::new();
        store.next_id = u64::MAX - 1;

        let last = store.create_titled("last").unwrap();
        assert_eq!(last.id, u64::MAX - 1);

        assert_eq!(store.create_titled("one more"), Err(StoreError::IdsExhausted));
        assert_eq!(store.input_text(), "one more");
        assert_eq!(store.create_batch(1, "p"), Err(StoreError::IdsExhausted));
        assert_eq!(ids(&store), vec![u64::MAX - 1]);
        assert_eq!(store.next_id(), u64::MAX);
    }

    #[test]
    fn oversized_batch_is_refused() {
        let mut store = ItemStore::new();

        assert_eq!(
            store.create_batch(MAX_BATCH_SIZE + 1, "p"),
            Err(StoreError::BatchTooLarge {
                count: MAX_BATCH_SIZE + 1,
                max: MAX_BATCH_SIZE,
            })
        );
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);

        assert_eq!(store.create_batch(MAX_BATCH_SIZE, "p").unwrap().len(), MAX_BATCH_SIZE);
    }
}
