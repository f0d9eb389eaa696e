mod model;
mod storage;
mod todos_page;

use yew::{
  Html,
  function_component,
  html
};
use yew_router::prelude::{
  BrowserRouter,
  Routable,
  Switch
};

use crate::components::{
  Landing,
  NotFound
};
pub use model::Notice;
use todos_page::TodosPage;

#[derive(
  Clone, Debug, PartialEq, Routable,
)]
pub enum Route {
  #[at("/")]
  Top,
  #[at("/todos")]
  Todos,
  #[not_found]
  #[at("/404")]
  NotFound
}

fn switch(route: Route) -> Html {
  tracing::debug!(
    ?route,
    "routing"
  );
  match route {
    | Route::Top => {
      html! { <Landing /> }
    }
    | Route::Todos => {
      html! { <TodosPage /> }
    }
    | Route::NotFound => {
      html! { <NotFound /> }
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  html! {
      <BrowserRouter>
          <Switch<Route> render={switch} />
      </BrowserRouter>
  }
}
