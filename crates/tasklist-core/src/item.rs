use serde::{Deserialize, Serialize};

/// One entry of the task list, in its persisted shape.
///
/// Field order and the camelCase names are the storage format, so records
/// written by earlier builds keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Item {
    pub title: String,
    pub id: u64,
    pub completed_flag: bool,
    pub delete_flag: bool,
}

impl Item {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id,
            completed_flag: false,
            delete_flag: false,
        }
    }

    /// Title editing is only offered for items that are not completed.
    pub fn title_editable(&self) -> bool {
        !self.completed_flag
    }
}

/// A single-field change to an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPatch {
    Title(String),
    Completed(bool),
    Deleted(bool),
}

impl ItemPatch {
    /// Returns a copy of `item` with exactly this field overwritten.
    pub fn apply(&self, item: &Item) -> Item {
        let mut next = item.clone();
        match self {
            ItemPatch::Title(title) => next.title = title.clone(),
            ItemPatch::Completed(flag) => next.completed_flag = *flag,
            ItemPatch::Deleted(flag) => next.delete_flag = *flag,
        }
        next
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            ItemPatch::Title(_) => "title",
            ItemPatch::Completed(_) => "completedFlag",
            ItemPatch::Deleted(_) => "deleteFlag",
        }
    }
}
