use std::sync::LazyLock;

/// One slot is 15 minutes; a day
/// holds 96 of them.
pub const SLOT_COUNT: usize = 96;
pub const SLOT_MINUTES: u32 = 15;

static TIME_SLOTS: LazyLock<
  Vec<String>,
> = LazyLock::new(|| {
  (0..SLOT_COUNT)
    .filter_map(slot_label)
    .collect()
});

/// Full ordered label table,
/// `"12:00 AM"` through `"11:45 PM"`.
pub fn time_slots() -> &'static [String]
{
  &TIME_SLOTS
}

pub fn slot_label(
  index: usize
) -> Option<String> {
  if index >= SLOT_COUNT {
    return None;
  }

  let minutes =
    index as u32 * SLOT_MINUTES;
  let hour = minutes / 60;
  let minute = minutes % 60;
  let period = if hour >= 12 {
    "PM"
  } else {
    "AM"
  };
  let display = match hour % 12 {
    | 0 => 12,
    | other => other
  };

  Some(format!(
    "{display:02}:{minute:02} {period}"
  ))
}

pub fn slot_index(
  label: &str
) -> Option<usize> {
  let minutes =
    label_minutes(label.trim())?;
  let index =
    (minutes / SLOT_MINUTES) as usize;
  if minutes % SLOT_MINUTES != 0
    || index >= SLOT_COUNT
  {
    return None;
  }
  Some(index)
}

fn label_minutes(
  label: &str
) -> Option<u32> {
  let (clock, period) =
    label.split_once(' ')?;
  let (hour_raw, minute_raw) =
    clock.split_once(':')?;
  let hour =
    hour_raw.parse::<u32>().ok()?;
  let minute =
    minute_raw.parse::<u32>().ok()?;
  if !(1..=12).contains(&hour)
    || minute > 59
  {
    return None;
  }

  let hour24 = match (
    period,
    hour == 12
  ) {
    | ("AM", true) => 0,
    | ("AM", false) => hour,
    | ("PM", true) => 12,
    | ("PM", false) => hour + 12,
    | _ => return None
  };
  Some(hour24 * 60 + minute)
}

/// Signed slot distance in minutes;
/// positive when `start` precedes
/// `end`.
pub fn duration_minutes(
  start: &str,
  end: &str
) -> Option<i64> {
  let start_idx = slot_index(start)?;
  let end_idx = slot_index(end)?;
  Some(
    (end_idx as i64
      - start_idx as i64)
      * SLOT_MINUTES as i64
  )
}

/// Human form, `"1h 30m"` / `"2h"` /
/// `"45m"`.
pub fn calculate_duration(
  start: &str,
  end: &str
) -> Option<String> {
  let minutes =
    duration_minutes(start, end)?;
  if minutes < 0 {
    return None;
  }

  let hours = minutes / 60;
  let mins = minutes % 60;
  Some(match (hours > 0, mins > 0) {
    | (true, true) => {
      format!("{hours}h {mins}m")
    }
    | (true, false) => {
      format!("{hours}h")
    }
    | _ => format!("{mins}m")
  })
}

/// Compact range without the AM/PM
/// suffixes, for task cards.
pub fn format_time_range(
  start: &str,
  end: &str
) -> String {
  format!(
    "{} - {}",
    strip_period(start),
    strip_period(end)
  )
}

fn strip_period(label: &str) -> &str {
  label
    .trim_end_matches(" AM")
    .trim_end_matches(" PM")
}

/// `"09:30 PM"` to `"21:30"` for
/// HTML time inputs.
pub fn to_24_hour(
  label: &str
) -> Option<String> {
  let minutes =
    label_minutes(label.trim())?;
  Some(format!(
    "{:02}:{:02}",
    minutes / 60,
    minutes % 60
  ))
}

/// `"21:30"` back to the slot
/// vocabulary form `"09:30 PM"`.
pub fn to_12_hour(
  time24: &str
) -> Option<String> {
  let (hour_raw, minute_raw) =
    time24.trim().split_once(':')?;
  let hour =
    hour_raw.parse::<u32>().ok()?;
  let minute =
    minute_raw.parse::<u32>().ok()?;
  if hour > 23 || minute > 59 {
    return None;
  }

  let period = if hour >= 12 {
    "PM"
  } else {
    "AM"
  };
  let display = match hour % 12 {
    | 0 => 12,
    | other => other
  };
  Some(format!(
    "{display:02}:{minute:02} {period}"
  ))
}

/// Adds minutes within the day,
/// clamped to the final slot.
pub fn add_slot_minutes(
  label: &str,
  minutes: i64
) -> Option<String> {
  let index =
    slot_index(label)? as i64;
  let shifted = index
    + minutes / SLOT_MINUTES as i64;
  let clamped = shifted
    .clamp(0, SLOT_COUNT as i64 - 1);
  slot_label(clamped as usize)
}

/// Vertical position of the live
/// time line.
pub fn now_offset_px(
  minutes_since_midnight: u32,
  slot_height: f64
) -> f64 {
  f64::from(minutes_since_midnight)
    / f64::from(SLOT_MINUTES)
    * slot_height
}

/// Slot label containing the given
/// wall-clock minute (floored).
pub fn slot_label_for_minutes(
  minutes_since_midnight: u32
) -> Option<String> {
  let index = (minutes_since_midnight
    / SLOT_MINUTES)
    as usize;
  slot_label(index)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn label_table_covers_the_day() {
    let slots = time_slots();
    assert_eq!(slots.len(), SLOT_COUNT);
    assert_eq!(slots[0], "12:00 AM");
    assert_eq!(slots[4], "01:00 AM");
    assert_eq!(slots[48], "12:00 PM");
    assert_eq!(slots[95], "11:45 PM");
  }

  #[test]
  fn index_inverts_label() {
    for (index, label) in
      time_slots().iter().enumerate()
    {
      assert_eq!(
        slot_index(label),
        Some(index)
      );
    }
  }

  #[test]
  fn rejects_off_grid_labels() {
    assert_eq!(
      slot_index("09:10 AM"),
      None
    );
    assert_eq!(
      slot_index("13:00 PM"),
      None
    );
    assert_eq!(slot_index(""), None);
    assert_eq!(
      slot_index("nonsense"),
      None
    );
  }

  #[test]
  fn duration_matches_slot_distance()
  {
    let slots = time_slots();
    for start in (0..SLOT_COUNT)
      .step_by(7)
    {
      for end in
        (start + 1..SLOT_COUNT)
          .step_by(11)
      {
        assert_eq!(
          duration_minutes(
            &slots[start],
            &slots[end]
          ),
          Some(
            (end - start) as i64 * 15
          )
        );
      }
    }
  }

  #[test]
  fn duration_display_forms() {
    assert_eq!(
      calculate_duration(
        "09:00 AM", "10:30 AM"
      )
      .as_deref(),
      Some("1h 30m")
    );
    assert_eq!(
      calculate_duration(
        "09:00 AM", "11:00 AM"
      )
      .as_deref(),
      Some("2h")
    );
    assert_eq!(
      calculate_duration(
        "09:00 AM", "09:45 AM"
      )
      .as_deref(),
      Some("45m")
    );
  }

  #[test]
  fn range_drops_periods() {
    assert_eq!(
      format_time_range(
        "09:00 AM", "01:15 PM"
      ),
      "09:00 - 01:15"
    );
  }

  #[test]
  fn clock_format_round_trips() {
    assert_eq!(
      to_24_hour("12:00 AM")
        .as_deref(),
      Some("00:00")
    );
    assert_eq!(
      to_24_hour("09:30 PM")
        .as_deref(),
      Some("21:30")
    );
    assert_eq!(
      to_12_hour("00:15").as_deref(),
      Some("12:15 AM")
    );
    assert_eq!(
      to_12_hour("13:45").as_deref(),
      Some("01:45 PM")
    );
    assert_eq!(to_12_hour("24:00"), None);
  }

  #[test]
  fn add_minutes_clamps_to_day() {
    assert_eq!(
      add_slot_minutes("09:00 AM", 15)
        .as_deref(),
      Some("09:15 AM")
    );
    assert_eq!(
      add_slot_minutes(
        "11:45 PM", 30
      )
      .as_deref(),
      Some("11:45 PM")
    );
  }

  #[test]
  fn now_line_position() {
    // 09:30 is slot 38.
    assert_eq!(
      now_offset_px(9 * 60 + 30, 80.0),
      38.0 * 80.0
    );
    assert_eq!(
      slot_label_for_minutes(
        9 * 60 + 37
      )
      .as_deref(),
      Some("09:30 AM")
    );
  }
}
