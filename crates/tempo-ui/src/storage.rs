use tempo_core::task::Task;
use tempo_core::theme::store::PersistedTheme;

const TASKS_STORAGE_KEY: &str =
  "tempo.tasks";
const THEME_STORAGE_KEY: &str =
  "tempo.theme";

pub fn load_tasks() -> Vec<Task> {
  let stored = web_sys::window()
    .and_then(|window| {
      window
        .local_storage()
        .ok()
        .flatten()
    })
    .and_then(|storage| {
      storage
        .get_item(TASKS_STORAGE_KEY)
        .ok()
        .flatten()
    });

  if let Some(raw) = stored {
    match serde_json::from_str::<
      Vec<Task>
    >(&raw)
    {
      | Ok(mut tasks) => {
        tasks.retain(|task| {
          !task.id.trim().is_empty()
            && task
              .start_index()
              .is_some()
            && task
              .end_index()
              .is_some()
        });
        return tasks;
      }
      | Err(error) => {
        tracing::error!(
          %error,
          "failed parsing tasks \
           from local storage"
        );
      }
    }
  }

  Vec::new()
}

pub fn save_tasks(tasks: &[Task]) {
  if let Some(storage) =
    web_sys::window().and_then(
      |window| {
        window
          .local_storage()
          .ok()
          .flatten()
      }
    )
    && let Ok(json) =
      serde_json::to_string(tasks)
  {
    let _ = storage.set_item(
      TASKS_STORAGE_KEY,
      &json
    );
  }
}

pub fn load_theme_snapshot()
-> Option<PersistedTheme> {
  let stored = web_sys::window()
    .and_then(|window| {
      window
        .local_storage()
        .ok()
        .flatten()
    })
    .and_then(|storage| {
      storage
        .get_item(THEME_STORAGE_KEY)
        .ok()
        .flatten()
    })?;

  match serde_json::from_str::<
    PersistedTheme
  >(&stored)
  {
    | Ok(snapshot) => Some(snapshot),
    | Err(error) => {
      tracing::error!(
        %error,
        "failed parsing theme \
         from local storage"
      );
      None
    }
  }
}

pub fn clear_theme_snapshot() {
  if let Some(storage) =
    web_sys::window().and_then(
      |window| {
        window
          .local_storage()
          .ok()
          .flatten()
      }
    )
  {
    let _ = storage.remove_item(
      THEME_STORAGE_KEY
    );
  }
}

pub fn save_theme_snapshot(
  snapshot: &PersistedTheme
) {
  if let Some(storage) =
    web_sys::window().and_then(
      |window| {
        window
          .local_storage()
          .ok()
          .flatten()
      }
    )
    && let Ok(json) =
      serde_json::to_string(snapshot)
  {
    let _ = storage.set_item(
      THEME_STORAGE_KEY,
      &json
    );
  }
}
