use tasklist_core::{
  Config,
  KeyValueStore,
  StorageError
};
use wasm_bindgen::JsValue;

const EMBEDDED_CONFIG: &str =
  include_str!("../../tasklist.toml");

/// `window.localStorage`, looked up on every call.
#[derive(
  Debug, Default, Clone, Copy,
)]
pub struct LocalStorage;

fn local_storage()
-> Result<web_sys::Storage, StorageError>
{
  web_sys::window()
    .ok_or_else(|| {
      StorageError::Unavailable(
        "no window".to_string()
      )
    })?
    .local_storage()
    .map_err(|err| {
      StorageError::Unavailable(
        describe(&err)
      )
    })?
    .ok_or_else(|| {
      StorageError::Unavailable(
        "localStorage is disabled"
          .to_string()
      )
    })
}

fn describe(value: &JsValue) -> String {
  value
    .as_string()
    .unwrap_or_else(|| format!("{value:?}"))
}

impl KeyValueStore for LocalStorage {
  async fn get(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    local_storage()?
      .get_item(key)
      .map_err(|err| {
        StorageError::Read(describe(&err))
      })
  }

  async fn set(
    &self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    local_storage()?
      .set_item(key, value)
      .map_err(|err| {
        StorageError::Write(describe(
          &err
        ))
      })
  }
}

pub fn load_config() -> Config {
  match Config::from_toml_str(
    EMBEDDED_CONFIG
  ) {
    | Ok(config) => config,
    | Err(error) => {
      tracing::error!(
        %error,
        "failed parsing embedded \
         config; using defaults"
      );
      Config::default()
    }
  }
}
