use chrono::{
  Datelike,
  NaiveDate
};

use crate::dates::{
  add_days,
  shift_months,
  shift_years,
  weekday_from_name
};
use crate::task::{
  Occurrence,
  TaskDraft
};

/// Dates a repeat rule covers.
/// `end` defaults to one year after
/// `start`. Custom walks every day
/// and keeps the selected weekdays;
/// the other cadences step by their
/// own period.
pub fn expand_dates(
  occurrence: Occurrence,
  start: NaiveDate,
  end: Option<NaiveDate>,
  custom_days: &[String]
) -> Vec<NaiveDate> {
  let end = end.unwrap_or_else(|| {
    shift_years(start, 1)
  });
  if end < start {
    return Vec::new();
  }

  let mut dates = Vec::new();
  let mut current = start;
  while current <= end {
    match occurrence {
      | Occurrence::Custom => {
        let selected = custom_days
          .iter()
          .filter_map(|name| {
            weekday_from_name(name)
          })
          .any(|day| {
            day == current.weekday()
          });
        if selected {
          dates.push(current);
        }
        current =
          add_days(current, 1);
      }
      | Occurrence::Daily => {
        dates.push(current);
        current =
          add_days(current, 1);
      }
      | Occurrence::Weekly => {
        dates.push(current);
        current =
          add_days(current, 7);
      }
      | Occurrence::Monthly => {
        dates.push(current);
        current =
          shift_months(current, 1);
      }
    }
  }

  dates
}

/// One-shot materialization: a
/// repeating draft becomes N
/// independent drafts sharing every
/// non-temporal field. No rule
/// object survives this call;
/// editing one instance never
/// touches its siblings.
pub fn materialize(
  draft: TaskDraft
) -> Vec<TaskDraft> {
  let (occurrence, start) = match (
    draft.repeat,
    draft.occurrence,
    draft.start_date
  ) {
    | (
      true,
      Some(occurrence),
      Some(start)
    ) => (occurrence, start),
    | _ => return vec![draft]
  };

  let dates = expand_dates(
    occurrence,
    start,
    draft.end_date,
    &draft.custom_days
  );
  tracing::debug!(
    occurrence = occurrence.as_key(),
    instances = dates.len(),
    "expanded repeating task"
  );

  dates
    .into_iter()
    .map(|date| {
      let mut instance =
        draft.clone();
      instance.day = date.day();
      instance.month = date.month();
      instance.year = date.year();
      instance
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::task::sample_draft;

  fn date(
    year: i32,
    month: u32,
    day: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(
      year, month, day
    )
    .expect("valid date")
  }

  #[test]
  fn weekly_expansion_is_inclusive() {
    let dates = expand_dates(
      Occurrence::Weekly,
      date(2024, 3, 4),
      Some(date(2024, 3, 18)),
      &[]
    );
    assert_eq!(
      dates,
      vec![
        date(2024, 3, 4),
        date(2024, 3, 11),
        date(2024, 3, 18),
      ]
    );
  }

  #[test]
  fn custom_keeps_selected_weekdays()
  {
    let days = vec![
      "monday".to_string(),
      "wednesday".to_string(),
    ];
    let dates = expand_dates(
      Occurrence::Custom,
      date(2024, 3, 4),
      Some(date(2024, 3, 10)),
      &days
    );
    assert_eq!(
      dates,
      vec![
        date(2024, 3, 4),
        date(2024, 3, 6),
      ]
    );
  }

  #[test]
  fn end_defaults_to_one_year() {
    let dates = expand_dates(
      Occurrence::Monthly,
      date(2024, 3, 4),
      None,
      &[]
    );
    assert_eq!(dates.len(), 13);
    assert_eq!(
      dates.last().copied(),
      Some(date(2025, 3, 4))
    );
  }

  #[test]
  fn inverted_window_is_empty() {
    let dates = expand_dates(
      Occurrence::Daily,
      date(2024, 3, 10),
      Some(date(2024, 3, 4)),
      &[]
    );
    assert!(dates.is_empty());
  }

  #[test]
  fn materialize_without_repeat_is_identity()
  {
    let draft = sample_draft();
    let instances =
      materialize(draft.clone());
    assert_eq!(
      instances,
      vec![draft]
    );
  }

  #[test]
  fn materialize_sets_only_dates() {
    let mut draft = sample_draft();
    draft.repeat = true;
    draft.occurrence =
      Some(Occurrence::Weekly);
    draft.start_date =
      Some(date(2024, 3, 4));
    draft.end_date =
      Some(date(2024, 3, 18));

    let instances =
      materialize(draft.clone());
    assert_eq!(instances.len(), 3);
    assert_eq!(
      instances[1].day, 11
    );
    for instance in &instances {
      assert_eq!(
        instance.title, draft.title
      );
      assert_eq!(
        instance.start_time,
        draft.start_time
      );
      assert_eq!(
        instance.month, 3
      );
    }
  }
}
