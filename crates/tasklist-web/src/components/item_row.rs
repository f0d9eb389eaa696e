use std::rc::Rc;

use tasklist_core::{
  Item,
  ItemPatch
};
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Event,
  Html,
  InputEvent,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ItemRowProps {
  pub item:           Rc<Item>,
  pub title_disabled: bool,
  pub on_patch:
    Callback<(u64, ItemPatch)>
}

#[function_component(ItemRow)]
pub fn item_row(
  props: &ItemRowProps
) -> Html {
  let id = props.item.id;
  let completed =
    props.item.completed_flag;
  let deleted = props.item.delete_flag;

  let on_check = {
    let on_patch =
      props.on_patch.clone();
    Callback::from(move |_: Event| {
      on_patch.emit((
        id,
        ItemPatch::Completed(!completed)
      ))
    })
  };
  let on_title = {
    let on_patch =
      props.on_patch.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_patch.emit((
          id,
          ItemPatch::Title(input.value())
        ))
      }
    )
  };
  let on_delete = {
    let on_patch =
      props.on_patch.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_patch.emit((
          id,
          ItemPatch::Deleted(!deleted)
        ))
      }
    )
  };

  let title_disabled = props
    .title_disabled
    || !props.item.title_editable();

  html! {
      <li class={if deleted { "item deleted" } else { "item" }}>
          <input
              type="checkbox"
              checked={completed}
              onchange={on_check}
          />
          <input
              type="text"
              value={props.item.title.clone()}
              disabled={title_disabled}
              oninput={on_title}
          />
          <button class="btn btn-light" onclick={on_delete}>
              { if deleted { "復元" } else { "削除" } }
          </button>
      </li>
  }
}
