use yew::{
  Html,
  function_component,
  html
};
use yew_router::prelude::Link;

use crate::app::Route;

#[function_component(Landing)]
pub fn landing() -> Html {
  html! {
      <div class="top">
          <h1>{ "Tasklist" }</h1>
          <Link<Route> to={Route::Todos}>{ "タスク一覧へ" }</Link<Route>>
      </div>
  }
}
