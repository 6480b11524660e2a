use std::collections::BTreeMap;

use crate::slots::SLOT_MINUTES;
use crate::task::Task;

/// Horizontal placement for one task
/// within its day column.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub struct SlotLayout {
  pub column:        usize,
  pub total_columns: usize
}

impl SlotLayout {
  pub fn width_pct(self) -> f64 {
    100.0
      / self.total_columns.max(1)
        as f64
  }

  pub fn left_pct(self) -> f64 {
    self.column as f64
      * self.width_pct()
  }
}

/// Half-open overlap on slot
/// indices: tasks touching at a
/// boundary do not overlap.
pub fn overlaps(
  a: &Task,
  b: &Task
) -> bool {
  match (
    a.start_index(),
    a.end_index(),
    b.start_index(),
    b.end_index()
  ) {
    | (
      Some(start_a),
      Some(end_a),
      Some(start_b),
      Some(end_b)
    ) => {
      start_a < end_b
        && start_b < end_a
    }
    | _ => false
  }
}

/// Greedy column assignment for one
/// day's tasks. `total_columns` is
/// the local contention width (how
/// many tasks pairwise-overlap this
/// one), so disjoint clusters keep
/// their own widths.
pub fn day_layout(
  day_tasks: &[Task]
) -> BTreeMap<String, SlotLayout> {
  let mut sorted =
    day_tasks.iter().collect::<Vec<_>>();
  sorted.sort_by_key(|task| {
    let start = task
      .start_index()
      .unwrap_or(0);
    let end =
      task.end_index().unwrap_or(start);
    // Start ascending, longer first.
    (
      start,
      usize::MAX
        - end.saturating_sub(start)
    )
  });

  let mut columns =
    Vec::<Vec<&Task>>::new();
  let mut assigned =
    BTreeMap::<String, usize>::new();
  for task in &sorted {
    let slot = columns
      .iter()
      .position(|column| {
        column.iter().all(
          |occupant| {
            !overlaps(task, occupant)
          }
        )
      })
      .unwrap_or_else(|| {
        columns.push(Vec::new());
        columns.len() - 1
      });
    columns[slot].push(task);
    assigned.insert(
      task.id.clone(),
      slot
    );
  }

  sorted
    .iter()
    .map(|task| {
      let contention = sorted
        .iter()
        .filter(|other| {
          overlaps(task, other)
        })
        .count();
      let column = assigned
        .get(&task.id)
        .copied()
        .unwrap_or(0);
      (
        task.id.clone(),
        SlotLayout {
          column,
          total_columns: contention
            .max(1)
        }
      )
    })
    .collect()
}

pub fn day_total_minutes(
  day_tasks: &[Task]
) -> i64 {
  day_tasks
    .iter()
    .filter_map(|task| {
      let start =
        task.start_index()?;
      let end = task.end_index()?;
      Some(
        end.saturating_sub(start)
          as i64
          * SLOT_MINUTES as i64
      )
    })
    .sum()
}

/// Header form, `"7 hrs 30 mins"`.
pub fn format_day_total(
  minutes: i64
) -> String {
  format!(
    "{} hrs {} mins",
    minutes / 60,
    minutes % 60
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::task::sample_draft;

  fn task(
    id: &str,
    start: &str,
    end: &str
  ) -> Task {
    let mut draft = sample_draft();
    draft.start_time =
      start.to_string();
    draft.end_time = end.to_string();
    draft.into_task(id.to_string())
  }

  #[test]
  fn overlap_is_symmetric() {
    let a = task(
      "a", "09:00 AM", "10:00 AM"
    );
    let b = task(
      "b", "09:30 AM", "10:30 AM"
    );
    let c = task(
      "c", "10:00 AM", "11:00 AM"
    );

    assert!(overlaps(&a, &b));
    assert!(overlaps(&b, &a));
    assert!(!overlaps(&a, &c));
    assert!(!overlaps(&c, &a));
    // Half-open: B runs past C's
    // start, so the two overlap.
    assert!(overlaps(&b, &c));
    assert!(overlaps(&c, &b));
  }

  #[test]
  fn chained_tasks_share_columns() {
    // A 9-10, B 9:30-10:30, C 10-11:
    // B overlaps both neighbors, A
    // and C only touch at 10:00 and
    // can share a column.
    let tasks = vec![
      task("a", "09:00 AM", "10:00 AM"),
      task("b", "09:30 AM", "10:30 AM"),
      task("c", "10:00 AM", "11:00 AM"),
    ];
    let layout = day_layout(&tasks);

    let a = layout
      .get("a")
      .copied()
      .expect("layout for a");
    let b = layout
      .get("b")
      .copied()
      .expect("layout for b");
    let c = layout
      .get("c")
      .copied()
      .expect("layout for c");

    assert_ne!(a.column, b.column);
    assert_eq!(a.total_columns, 2);
    assert_eq!(b.total_columns, 3);
    assert_eq!(c.total_columns, 2);
    assert_eq!(c.column, a.column);
  }

  #[test]
  fn disjoint_clusters_keep_widths() {
    // Morning pair overlaps, the
    // evening task stands alone and
    // must stay full width.
    let tasks = vec![
      task("a", "09:00 AM", "11:00 AM"),
      task("b", "10:00 AM", "10:30 AM"),
      task("e", "06:00 PM", "07:00 PM"),
    ];
    let layout = day_layout(&tasks);

    assert_eq!(
      layout
        .get("e")
        .map(|l| l.total_columns),
      Some(1)
    );
    assert_eq!(
      layout
        .get("a")
        .map(|l| l.total_columns),
      Some(2)
    );
  }

  #[test]
  fn longer_tasks_claim_earlier_columns()
  {
    let tasks = vec![
      task("short", "09:00 AM", "09:30 AM"),
      task("long", "09:00 AM", "11:00 AM"),
    ];
    let layout = day_layout(&tasks);
    assert_eq!(
      layout
        .get("long")
        .map(|l| l.column),
      Some(0)
    );
    assert_eq!(
      layout
        .get("short")
        .map(|l| l.column),
      Some(1)
    );
  }

  #[test]
  fn width_and_offset_follow_columns()
  {
    let layout = SlotLayout {
      column:        1,
      total_columns: 2
    };
    assert_eq!(
      layout.width_pct(),
      50.0
    );
    assert_eq!(
      layout.left_pct(),
      50.0
    );
  }

  #[test]
  fn day_totals_sum_per_task() {
    let tasks = vec![
      task("a", "09:00 AM", "10:00 AM"),
      task("b", "01:00 PM", "01:45 PM"),
    ];
    let minutes =
      day_total_minutes(&tasks);
    assert_eq!(minutes, 105);
    assert_eq!(
      format_day_total(minutes),
      "1 hrs 45 mins"
    );
  }
}
