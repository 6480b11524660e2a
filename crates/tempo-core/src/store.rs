use chrono::NaiveDate;
use serde::{
  Deserialize,
  Serialize
};
use uuid::Uuid;

use crate::task::{
  ColorFamily,
  ImprovementInsight,
  Occurrence,
  Task,
  TaskDraft
};

#[derive(
  Debug, thiserror::Error, PartialEq,
)]
pub enum StoreError {
  #[error("no task with id {0}")]
  NotFound(String)
}

/// Sparse update; `None` leaves the
/// field untouched. Nullable task
/// fields nest a second `Option` so
/// a patch can clear them.
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
  pub title:       Option<String>,
  pub description: Option<String>,
  pub client:      Option<String>,
  pub task_type:
    Option<Vec<String>>,
  pub start_time:  Option<String>,
  pub end_time:    Option<String>,
  pub day:         Option<u32>,
  pub month:       Option<u32>,
  pub year:        Option<i32>,
  pub repeat:      Option<bool>,
  pub occurrence:
    Option<Option<Occurrence>>,
  pub custom_days:
    Option<Vec<String>>,
  pub start_date:
    Option<Option<NaiveDate>>,
  pub end_date:
    Option<Option<NaiveDate>>,
  pub kpi_entry:   Option<bool>,
  pub color:
    Option<ColorFamily>,
  pub improvement_insights:
    Option<Vec<ImprovementInsight>>
}

impl TaskPatch {
  fn apply(&self, task: &mut Task) {
    let patch = self.clone();
    if let Some(v) = patch.title {
      task.title = v;
    }
    if let Some(v) = patch.description
    {
      task.description = v;
    }
    if let Some(v) = patch.client {
      task.client = v;
    }
    if let Some(v) = patch.task_type {
      task.task_type = v;
    }
    if let Some(v) = patch.start_time
    {
      task.start_time = v;
    }
    if let Some(v) = patch.end_time {
      task.end_time = v;
    }
    if let Some(v) = patch.day {
      task.day = v;
    }
    if let Some(v) = patch.month {
      task.month = v;
    }
    if let Some(v) = patch.year {
      task.year = v;
    }
    if let Some(v) = patch.repeat {
      task.repeat = v;
    }
    if let Some(v) = patch.occurrence
    {
      task.occurrence = v;
    }
    if let Some(v) = patch.custom_days
    {
      task.custom_days = v;
    }
    if let Some(v) = patch.start_date
    {
      task.start_date = v;
    }
    if let Some(v) = patch.end_date {
      task.end_date = v;
    }
    if let Some(v) = patch.kpi_entry {
      task.kpi_entry = v;
    }
    if let Some(v) = patch.color {
      task.color = v;
    }
    if let Some(v) =
      patch.improvement_insights
    {
      task.improvement_insights = v;
    }
  }
}

/// Canonical in-memory task list.
/// Persistence hangs off the
/// revision counter: any mutation
/// bumps it, and callers flush to
/// storage when it changes.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
)]
pub struct TaskStore {
  tasks:    Vec<Task>,
  revision: u64
}

impl TaskStore {
  pub fn new(tasks: Vec<Task>) -> Self {
    Self {
      tasks,
      revision: 0
    }
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn revision(&self) -> u64 {
    self.revision
  }

  pub fn get(
    &self,
    id: &str
  ) -> Option<&Task> {
    self
      .tasks
      .iter()
      .find(|t| t.id == id)
  }

  /// Tasks shown on one calendar
  /// day, in insertion order.
  pub fn tasks_on(
    &self,
    date: NaiveDate
  ) -> Vec<&Task> {
    self
      .tasks
      .iter()
      .filter(|t| t.falls_on(date))
      .collect()
  }

  pub fn add(
    &mut self,
    draft: TaskDraft
  ) -> &Task {
    let id =
      Uuid::new_v4().to_string();
    tracing::debug!(
      id = %id,
      title = %draft.title,
      "task added"
    );
    self.tasks.push(
      draft.into_task(id)
    );
    self.revision += 1;
    let last =
      self.tasks.len() - 1;
    &self.tasks[last]
  }

  /// Bulk insert for recurrence
  /// expansion; one revision bump.
  pub fn add_many(
    &mut self,
    drafts: Vec<TaskDraft>
  ) -> Vec<String> {
    let ids: Vec<String> = drafts
      .into_iter()
      .map(|draft| {
        let id = Uuid::new_v4()
          .to_string();
        self.tasks.push(
          draft
            .into_task(id.clone())
        );
        id
      })
      .collect();
    if !ids.is_empty() {
      self.revision += 1;
    }
    ids
  }

  pub fn update(
    &mut self,
    id: &str,
    patch: &TaskPatch
  ) -> Result<(), StoreError> {
    let task = self
      .tasks
      .iter_mut()
      .find(|t| t.id == id)
      .ok_or_else(|| {
        StoreError::NotFound(
          id.to_string()
        )
      })?;
    patch.apply(task);
    self.revision += 1;
    Ok(())
  }

  /// Idempotent; deleting an
  /// unknown id is a no-op.
  pub fn delete(&mut self, id: &str) {
    let before = self.tasks.len();
    self
      .tasks
      .retain(|t| t.id != id);
    if self.tasks.len() != before {
      self.revision += 1;
    } else {
      tracing::debug!(
        id,
        "delete for unknown task"
      );
    }
  }

  /// Clone of an existing task
  /// under a fresh id, appended to
  /// the list.
  pub fn duplicate(
    &mut self,
    id: &str
  ) -> Result<&Task, StoreError> {
    let mut copy = self
      .get(id)
      .cloned()
      .ok_or_else(|| {
        StoreError::NotFound(
          id.to_string()
        )
      })?;
    copy.id =
      Uuid::new_v4().to_string();
    self.tasks.push(copy);
    self.revision += 1;
    let last =
      self.tasks.len() - 1;
    Ok(&self.tasks[last])
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::slots::duration_minutes;
  use crate::task::sample_draft;

  #[test]
  fn add_update_delete_round_trip() {
    let mut store =
      TaskStore::default();
    let id = store
      .add(sample_draft())
      .id
      .clone();
    assert_eq!(
      store.tasks().len(),
      1
    );

    let patch = TaskPatch {
      end_time: Some(
        "09:30 AM".to_string()
      ),
      ..TaskPatch::default()
    };
    store
      .update(&id, &patch)
      .expect("task exists");
    let task = store
      .get(&id)
      .expect("task exists");
    assert_eq!(
      duration_minutes(
        &task.start_time,
        &task.end_time
      ),
      Some(30)
    );

    store.delete(&id);
    assert!(store.tasks().is_empty());
  }

  #[test]
  fn ids_are_unique_across_reloads()
  {
    // Reload drops the revision
    // counter but fresh inserts
    // still get fresh ids.
    let mut store =
      TaskStore::default();
    let a = store
      .add(sample_draft())
      .id
      .clone();
    let reloaded =
      store.tasks().to_vec();
    let mut store =
      TaskStore::new(reloaded);
    let b = store
      .add(sample_draft())
      .id
      .clone();
    assert_ne!(a, b);
  }

  #[test]
  fn patch_clears_nullable_fields()
  {
    let mut store =
      TaskStore::default();
    let mut draft = sample_draft();
    draft.occurrence = Some(
      crate::task::Occurrence::Weekly
    );
    let id =
      store.add(draft).id.clone();

    let patch = TaskPatch {
      repeat: Some(false),
      occurrence: Some(None),
      ..TaskPatch::default()
    };
    store
      .update(&id, &patch)
      .expect("task exists");
    let task = store
      .get(&id)
      .expect("task exists");
    assert!(!task.repeat);
    assert_eq!(
      task.occurrence,
      None
    );
  }

  #[test]
  fn duplicate_differs_only_by_id()
  {
    let mut store =
      TaskStore::default();
    let id = store
      .add(sample_draft())
      .id
      .clone();
    let copy = store
      .duplicate(&id)
      .expect("task exists")
      .clone();
    let original = store
      .get(&id)
      .expect("task exists");
    assert_ne!(copy.id, original.id);
    assert_eq!(
      copy.title,
      original.title
    );
    assert_eq!(
      copy.start_time,
      original.start_time
    );
    assert_eq!(
      store.tasks().len(),
      2
    );
  }

  #[test]
  fn missing_task_is_an_error() {
    let mut store =
      TaskStore::default();
    assert_eq!(
      store.update(
        "nope",
        &TaskPatch::default()
      ),
      Err(StoreError::NotFound(
        "nope".to_string()
      ))
    );
    assert!(
      store.duplicate("nope").is_err()
    );
    // Delete stays quiet.
    store.delete("nope");
    assert_eq!(store.revision(), 0);
  }

  #[test]
  fn revision_tracks_mutations() {
    let mut store =
      TaskStore::default();
    assert_eq!(store.revision(), 0);
    let id = store
      .add(sample_draft())
      .id
      .clone();
    assert_eq!(store.revision(), 1);
    store
      .update(
        &id,
        &TaskPatch::default()
      )
      .expect("task exists");
    assert_eq!(store.revision(), 2);
    store.add_many(vec![
      sample_draft(),
      sample_draft(),
    ]);
    assert_eq!(store.revision(), 3);
  }
}
