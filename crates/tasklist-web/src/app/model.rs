use std::rc::Rc;

use tasklist_core::{
  Config,
  Filter,
  Item,
  ItemPatch,
  PersistError,
  Session,
  SessionError,
  StoreError
};
use yew::Reducible;

#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
  Validation(String),
  Storage(String)
}

#[derive(Clone, Debug, PartialEq)]
pub struct TodoModel {
  pub session: Session,
  pub notice:  Option<Notice>
}

pub enum TodoAction {
  Loaded(
    Result<Option<Vec<Item>>, PersistError>
  ),
  SetInput(String),
  Submit,
  Seed,
  Patch(u64, ItemPatch),
  Purge,
  SetFilter(Filter),
  SaveFailed(String),
  DismissNotice
}

impl TodoModel {
  pub fn new(config: &Config) -> Self {
    Self {
      session: Session::new(config),
      notice:  None
    }
  }

  fn report(
    &mut self,
    result: Result<(), SessionError>
  ) {
    match result {
      | Ok(()) => {
        if matches!(
          self.notice,
          Some(Notice::Validation(_))
        ) {
          self.notice = None;
        }
      }
      | Err(SessionError::Store(
        StoreError::EmptyTitle
      )) => {
        self.notice =
          Some(Notice::Validation(
            "タスクを入力してください"
              .to_string()
          ));
      }
      | Err(error) => {
        tracing::debug!(
          %error,
          "action refused"
        );
        self.notice = Some(
          Notice::Validation(
            error.to_string()
          )
        );
      }
    }
  }
}

impl Reducible for TodoModel {
  type Action = TodoAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();

    match action {
      | TodoAction::Loaded(loaded) => {
        if let Err(error) = &loaded {
          next.notice =
            Some(Notice::Storage(
              format!(
                "保存済みのタスクを読み込めませんでした: {error}"
              )
            ));
        }
        next.session.finish_load(loaded);
      }
      | TodoAction::SetInput(text) => {
        next.session.set_input_text(text);
        if matches!(
          next.notice,
          Some(Notice::Validation(_))
        ) {
          next.notice = None;
        }
      }
      | TodoAction::Submit => {
        let result = next
          .session
          .create()
          .map(|_| ());
        next.report(result);
      }
      | TodoAction::Seed => {
        let result = next
          .session
          .create_batch()
          .map(|_| ());
        next.report(result);
      }
      | TodoAction::Patch(id, patch) => {
        let result = next
          .session
          .update(id, patch)
          .map(|_| ());
        next.report(result);
      }
      | TodoAction::Purge => {
        let result = next
          .session
          .purge_deleted()
          .map(|_| ());
        next.report(result);
      }
      | TodoAction::SetFilter(filter) => {
        next.session.set_filter(filter);
      }
      | TodoAction::SaveFailed(message) => {
        next.notice =
          Some(Notice::Storage(format!(
            "変更を保存できませんでした: {message}"
          )));
      }
      | TodoAction::DismissNotice => {
        next.notice = None;
      }
    }

    Rc::new(next)
  }
}
