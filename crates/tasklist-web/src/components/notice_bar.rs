use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

use crate::app::Notice;

#[derive(Properties, PartialEq)]
pub struct NoticeBarProps {
  pub notice:     Option<Notice>,
  pub on_dismiss: Callback<()>
}

#[function_component(NoticeBar)]
pub fn notice_bar(
  props: &NoticeBarProps
) -> Html {
  let Some(notice) = &props.notice
  else {
    return html! {};
  };

  let (class, message) = match notice {
    | Notice::Validation(message) => {
      ("notice validation", message)
    }
    | Notice::Storage(message) => {
      ("notice warning", message)
    }
  };
  let on_dismiss = {
    let on_dismiss =
      props.on_dismiss.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_dismiss.emit(())
      }
    )
  };

  html! {
      <div class={class} role="alert">
          <span>{ message.clone() }</span>
          <button class="btn-close" type="button" onclick={on_dismiss}>{ "×" }</button>
      </div>
  }
}
