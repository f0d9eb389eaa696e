use yew::{
  Html,
  function_component,
  html
};
use yew_router::prelude::Link;

use crate::app::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
  html! {
      <div class="not-found">
          <p>{ "ページが見つかりません" }</p>
          <Link<Route> to={Route::Top}>{ "トップへ戻る" }</Link<Route>>
      </div>
  }
}
