use gloo::timers::future::TimeoutFuture;
use tasklist_core::{
  Filter,
  ItemPatch,
  Persistence,
  SaveOutcome
};
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_reducer
};

use super::model::{
  TodoAction,
  TodoModel
};
use super::storage::{
  LocalStorage,
  load_config
};
use crate::components::{
  FilterSelect,
  ItemList,
  NewItemForm,
  NoticeBar
};

#[function_component(TodosPage)]
pub fn todos_page() -> Html {
  let config = use_memo((), |_| {
    load_config()
  });
  let model = {
    let config = config.clone();
    use_reducer(move || {
      TodoModel::new(&config)
    })
  };
  let persistence = {
    let config = config.clone();
    use_memo((), move |_| {
      Persistence::new(
        LocalStorage,
        config.storage_key.clone()
      )
    })
  };

  {
    let model = model.clone();
    let persistence =
      persistence.clone();
    use_effect_with((), move |_| {
      wasm_bindgen_futures::spawn_local(
        async move {
          let loaded =
            persistence.load().await;
          model.dispatch(
            TodoAction::Loaded(loaded)
          );
        }
      );
      || ()
    });
  }

  {
    let model = model.clone();
    let persistence =
      persistence.clone();
    let retry = config.retry.clone();
    use_effect_with(
      model.session.revision(),
      move |revision| {
        if *revision > 0 {
          let snapshot =
            model.session.snapshot();
          wasm_bindgen_futures::spawn_local(async move {
            let result = persistence
              .save_with_retry(&snapshot, &retry, |delay| {
                TimeoutFuture::new(
                  u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
                )
              })
              .await;

            match result {
              | Ok(SaveOutcome::Written) => {
                tracing::debug!(
                  revision = snapshot.revision,
                  "persisted items"
                );
              }
              | Ok(SaveOutcome::Stale) => {
                tracing::debug!(
                  revision = snapshot.revision,
                  "newer items already persisted"
                );
              }
              | Err(error) => {
                tracing::error!(
                  %error,
                  revision = snapshot.revision,
                  "failed persisting items"
                );
                model.dispatch(
                  TodoAction::SaveFailed(
                    error.to_string()
                  )
                );
              }
            }
          });
        }
        || ()
      }
    );
  }

  let on_input = {
    let model = model.clone();
    Callback::from(move |text: String| {
      model.dispatch(
        TodoAction::SetInput(text)
      )
    })
  };
  let on_submit = {
    let model = model.clone();
    Callback::from(move |_: ()| {
      model.dispatch(TodoAction::Submit)
    })
  };
  let on_seed = {
    let model = model.clone();
    Callback::from(move |_: ()| {
      model.dispatch(TodoAction::Seed)
    })
  };
  let on_filter = {
    let model = model.clone();
    Callback::from(
      move |filter: Filter| {
        model.dispatch(
          TodoAction::SetFilter(filter)
        )
      }
    )
  };
  let on_patch = {
    let model = model.clone();
    Callback::from(
      move |(id, patch): (
        u64,
        ItemPatch
      )| {
        model.dispatch(
          TodoAction::Patch(id, patch)
        )
      }
    )
  };
  let on_purge = {
    let model = model.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        model.dispatch(TodoAction::Purge)
      }
    )
  };
  let on_dismiss = {
    let model = model.clone();
    Callback::from(move |_: ()| {
      model.dispatch(
        TodoAction::DismissNotice
      )
    })
  };

  let session = &model.session;
  let ready = session.is_ready();
  let filter = session.filter();
  let editing_disabled =
    session.editing_disabled();
  let counts = session.counts();

  html! {
      <div class="todos">
          <NoticeBar notice={model.notice.clone()} on_dismiss={on_dismiss} />
          <NewItemForm
              value={session.input_text().to_string()}
              disabled={!ready || editing_disabled}
              on_input={on_input}
              on_submit={on_submit}
              on_seed={on_seed}
          />
          <FilterSelect
              value={filter}
              counts={counts}
              disabled={!ready}
              on_change={on_filter}
          />
          {
              if filter == Filter::Trash {
                  html! {
                      <button
                          class="btn btn-danger purge-btn"
                          disabled={!ready || counts.trash == 0}
                          onclick={on_purge}
                      >
                          { "ゴミ箱を空にする" }
                      </button>
                  }
              } else {
                  html! {}
              }
          }
          {
              if ready {
                  html! {
                      <ItemList
                          items={session.visible()}
                          title_disabled={editing_disabled}
                          on_patch={on_patch}
                      />
                  }
              } else {
                  html! { <p class="loading">{ "読み込み中…" }</p> }
              }
          }
      </div>
  }
}
