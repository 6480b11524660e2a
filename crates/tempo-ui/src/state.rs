use std::rc::Rc;

use serde_json::Value;
use tempo_core::store::{
  TaskPatch,
  TaskStore
};
use tempo_core::task::TaskDraft;
use tempo_core::theme::config::ThemeConfig;
use tempo_core::theme::store::ThemeStore;
use yew::Reducible;

use crate::storage;

/// Store mutations routed through
/// the reducer so every write path
/// persists and re-renders.
pub enum TasksAction {
  AddMany(Vec<TaskDraft>),
  Update {
    id:    String,
    patch: TaskPatch
  },
  Delete(String),
  Duplicate(String)
}

#[derive(Clone, PartialEq)]
pub struct TasksState {
  pub store: TaskStore
}

impl TasksState {
  pub fn load() -> Self {
    Self {
      store: TaskStore::new(
        storage::load_tasks()
      )
    }
  }
}

impl Reducible for TasksState {
  type Action = TasksAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut store =
      self.store.clone();
    match action {
      | TasksAction::AddMany(
        drafts
      ) => {
        store.add_many(drafts);
      }
      | TasksAction::Update {
        id,
        patch
      } => {
        if let Err(error) = store
          .update(&id, &patch)
        {
          tracing::warn!(
            %error,
            "update ignored"
          );
        }
      }
      | TasksAction::Delete(id) => {
        store.delete(&id);
      }
      | TasksAction::Duplicate(
        id
      ) => {
        if let Err(error) =
          store.duplicate(&id)
        {
          tracing::warn!(
            %error,
            "duplicate ignored"
          );
        }
      }
    }
    storage::save_tasks(
      store.tasks()
    );
    Rc::new(Self { store })
  }
}

pub enum ThemeAction {
  Update(Value),
  Reset(Option<ThemeConfig>),
  SetPersisted(bool)
}

#[derive(Clone, PartialEq)]
pub struct ThemeState {
  pub store: ThemeStore
}

impl ThemeState {
  pub fn load() -> Self {
    let store = match storage::load_theme_snapshot()
    {
      | Some(snapshot) => {
        ThemeStore::from_persisted(
          snapshot
        )
      }
      | None => {
        ThemeStore::default()
      }
    };
    Self { store }
  }
}

impl Reducible for ThemeState {
  type Action = ThemeAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut store =
      self.store.clone();
    let mut clear = false;
    match action {
      | ThemeAction::Update(
        patch
      ) => {
        store.update(&patch);
      }
      | ThemeAction::Reset(base) => {
        store
          .reset_to_default(base);
      }
      | ThemeAction::SetPersisted(
        persist
      ) => {
        clear = store
          .set_persisted(persist);
      }
    }
    if clear {
      // Opting out deletes the
      // snapshot outright; a fresh
      // load then starts from the
      // default theme.
      storage::clear_theme_snapshot(
      );
    } else {
      // The payload substitutes
      // the default theme whenever
      // persistence is off, so an
      // un-persisted custom theme
      // never reaches storage.
      storage::save_theme_snapshot(
        &store.persisted_payload()
      );
    }
    Rc::new(Self { store })
  }
}
