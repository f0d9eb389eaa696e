use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  MouseEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct NewItemFormProps {
  pub value:     String,
  pub disabled:  bool,
  pub on_input:  Callback<String>,
  pub on_submit: Callback<()>,
  pub on_seed:   Callback<()>
}

#[function_component(NewItemForm)]
pub fn new_item_form(
  props: &NewItemFormProps
) -> Html {
  let onsubmit = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        on_submit.emit(());
      }
    )
  };
  let oninput = {
    let on_input =
      props.on_input.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_input.emit(input.value());
      }
    )
  };
  let onclick_seed = {
    let on_seed = props.on_seed.clone();
    Callback::from(
      move |e: MouseEvent| {
        e.prevent_default();
        on_seed.emit(());
      }
    )
  };

  html! {
      <form class="new-item" onsubmit={onsubmit}>
          <input
              type="text"
              value={props.value.clone()}
              placeholder="タスクを入力してください"
              disabled={props.disabled}
              oninput={oninput}
          />
          <button class="insert-btn" type="submit" disabled={props.disabled}>{ "追加" }</button>
          <button
              class="btn btn-outline-primary ms-1"
              type="button"
              disabled={props.disabled}
              onclick={onclick_seed}
          >
              { "テストに使うタスクを作成" }
          </button>
      </form>
  }
}
