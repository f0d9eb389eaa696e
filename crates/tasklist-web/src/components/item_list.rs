use std::rc::Rc;

use tasklist_core::{
  Item,
  ItemPatch
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::ItemRow;

#[derive(Properties, PartialEq)]
pub struct ItemListProps {
  pub items:          Vec<Rc<Item>>,
  pub title_disabled: bool,
  pub on_patch:
    Callback<(u64, ItemPatch)>
}

#[function_component(ItemList)]
pub fn item_list(
  props: &ItemListProps
) -> Html {
  if props.items.is_empty() {
    return html! {
        <p class="empty">{ "タスクはありません" }</p>
    };
  }

  html! {
      <ul class="items">
          {
              for props.items.iter().map(|item| html! {
                  <ItemRow
                      key={item.id}
                      item={item.clone()}
                      title_disabled={props.title_disabled}
                      on_patch={props.on_patch.clone()}
                  />
              })
          }
      </ul>
  }
}
