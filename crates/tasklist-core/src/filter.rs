use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownFilter;
use crate::item::Item;

/// Named views over the collection. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Completed,
    Unchecked,
    Trash,
}

impl Filter {
    /// Selector order.
    pub const ALL: [Filter; 4] = [
        Filter::All,
        Filter::Completed,
        Filter::Unchecked,
        Filter::Trash,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Completed => "completed",
            Filter::Unchecked => "unchecked",
            Filter::Trash => "trash",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "すべて",
            Filter::Completed => "完了",
            Filter::Unchecked => "未完了",
            Filter::Trash => "ゴミ箱",
        }
    }

    pub fn matches(self, item: &Item) -> bool {
        match self {
            Filter::Completed => item.completed_flag && !item.delete_flag,
            Filter::Unchecked => !item.completed_flag && !item.delete_flag,
            Filter::Trash => item.delete_flag,
            Filter::All => !item.delete_flag,
        }
    }

    pub fn apply(self, items: &[Rc<Item>]) -> Vec<Rc<Item>> {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }

    /// The completed and trash views are read-only for titles and new
    /// items. Completion and delete toggles stay live in every view.
    pub fn editing_disabled(self) -> bool {
        matches!(self, Filter::Completed | Filter::Trash)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "completed" => Ok(Filter::Completed),
            "unchecked" => Ok(Filter::Unchecked),
            "trash" => Ok(Filter::Trash),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

/// Number of items each view would show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCounts {
    pub all: usize,
    pub completed: usize,
    pub unchecked: usize,
    pub trash: usize,
}

impl FilterCounts {
    pub fn tally<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let mut counts = Self::default();
        for item in items {
            if item.delete_flag {
                counts.trash += 1;
                continue;
            }
            counts.all += 1;
            if item.completed_flag {
                counts.completed += 1;
            } else {
                counts.unchecked += 1;
            }
        }
        counts
    }

    pub fn get(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.all,
            Filter::Completed => self.completed,
            Filter::Unchecked => self.unchecked,
            Filter::Trash => self.trash,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{Filter, FilterCounts};
    use crate::item::Item;

    fn item(id: u64, completed: bool, deleted: bool) -> Rc<Item> {
        Rc::new(Item {
            title: format!("item {id}"),
            id,
            completed_flag: completed,
            delete_flag: deleted,
        })
    }

    fn sample() -> Vec<Rc<Item>> {
        vec![
            item(1, false, false),
            item(2, true, false),
            item(3, false, true),
            item(4, true, true),
        ]
    }

    fn visible_ids(filter: Filter, items: &[Rc<Item>]) -> Vec<u64> {
        filter.apply(items).iter().map(|item| item.id).collect()
    }

    #[test]
    fn each_view_selects_its_items() {
        let items = sample();
        assert_eq!(visible_ids(Filter::All, &items), vec![1, 2]);
        assert_eq!(visible_ids(Filter::Completed, &items), vec![2]);
        assert_eq!(visible_ids(Filter::Unchecked, &items), vec![1]);
        assert_eq!(visible_ids(Filter::Trash, &items), vec![3, 4]);
    }

    #[test]
    fn apply_shares_item_allocations() {
        let items = sample();
        let visible = Filter::All.apply(&items);
        assert!(Rc::ptr_eq(&visible[0], &items[0]));
    }

    #[test]
    fn editing_disabled_only_for_read_only_views() {
        assert!(!Filter::All.editing_disabled());
        assert!(!Filter::Unchecked.editing_disabled());
        assert!(Filter::Completed.editing_disabled());
        assert!(Filter::Trash.editing_disabled());
    }

    #[test]
    fn parses_and_displays_names() {
        for filter in Filter::ALL {
            assert_eq!(filter.to_string().parse::<Filter>(), Ok(filter));
        }
        assert_eq!(" Trash ".parse::<Filter>(), Ok(Filter::Trash));
        assert!("archived".parse::<Filter>().is_err());
        assert_eq!(Filter::default(), Filter::All);
    }

    #[test]
    fn labels_are_japanese() {
        let labels = Filter::ALL.map(Filter::label);
        assert_eq!(labels, ["すべて", "完了", "未完了", "ゴミ箱"]);
    }

    #[test]
    fn counts_match_views() {
        let items = sample();
        let counts = FilterCounts::tally(items.iter().map(|item| item.as_ref()));
        for filter in Filter::ALL {
            assert_eq!(counts.get(filter), filter.apply(&items).len(), "{filter}");
        }
    }
}
