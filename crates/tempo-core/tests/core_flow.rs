use chrono::NaiveDate;
use tempo_core::dates::{start_of_week, week_days};
use tempo_core::layout::day_layout;
use tempo_core::recurrence::materialize;
use tempo_core::slots::duration_minutes;
use tempo_core::store::{TaskPatch, TaskStore};
use tempo_core::task::{Occurrence, TaskDraft, client_color, validate_draft};

fn draft(title: &str, start: &str, end: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: String::new(),
        client: "emsi-solutions".to_string(),
        task_type: vec!["meeting".to_string()],
        start_time: start.to_string(),
        end_time: end.to_string(),
        day: 4,
        month: 3,
        year: 2024,
        repeat: false,
        occurrence: None,
        custom_days: Vec::new(),
        start_date: None,
        end_date: None,
        kpi_entry: false,
        color: client_color("emsi-solutions"),
        improvement_insights: Vec::new(),
    }
}

#[test]
fn weekly_recurrence_lands_on_the_grid() {
    // A repeating draft expands into standalone tasks, each of which
    // shows up on its own day of the proper week.
    let mut entry = draft("Sprint planning", "09:00 AM", "10:00 AM");
    entry.repeat = true;
    entry.occurrence = Some(Occurrence::Weekly);
    entry.start_date = NaiveDate::from_ymd_opt(2024, 3, 4);
    entry.end_date = NaiveDate::from_ymd_opt(2024, 3, 25);
    assert!(validate_draft(&entry).is_empty());

    let mut store = TaskStore::default();
    let ids = store.add_many(materialize(entry));
    assert_eq!(ids.len(), 4);

    let monday = NaiveDate::from_ymd_opt(2024, 3, 11).expect("valid date");
    assert_eq!(start_of_week(monday), monday);
    let week = week_days(monday);
    let on_monday = store.tasks_on(week[0]);
    assert_eq!(on_monday.len(), 1);
    assert_eq!(on_monday[0].title, "Sprint planning");
    assert!(store.tasks_on(week[1]).is_empty());
}

#[test]
fn edited_overlap_splits_the_column() {
    let mut store = TaskStore::default();
    let first = store.add(draft("Standup", "09:00 AM", "10:00 AM")).id.clone();
    store.add(draft("Review", "11:00 AM", "12:00 PM"));

    // No overlap yet: both tasks get the full width.
    let date = NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date");
    let day: Vec<_> = store.tasks_on(date).into_iter().cloned().collect();
    let layout = day_layout(&day);
    assert!(layout.values().all(|slot| slot.total_columns == 1));

    // Stretch the first task over the second; both drop to half width.
    let patch = TaskPatch {
        end_time: Some("11:30 AM".to_string()),
        ..TaskPatch::default()
    };
    store.update(&first, &patch).expect("task exists");
    let task = store.get(&first).expect("task exists");
    assert_eq!(duration_minutes(&task.start_time, &task.end_time), Some(150));

    let day: Vec<_> = store.tasks_on(date).into_iter().cloned().collect();
    let layout = day_layout(&day);
    assert!(layout.values().all(|slot| slot.total_columns == 2));
    let columns: Vec<_> = layout.values().map(|slot| slot.column).collect();
    assert!(columns.contains(&0));
    assert!(columns.contains(&1));
}
