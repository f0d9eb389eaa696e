mod filter_select;
mod item_list;
mod item_row;
mod landing;
mod new_item_form;
mod not_found;
mod notice_bar;

pub use filter_select::FilterSelect;
pub use item_list::ItemList;
pub use item_row::ItemRow;
pub use landing::Landing;
pub use new_item_form::NewItemForm;
pub use not_found::NotFound;
pub use notice_bar::NoticeBar;
