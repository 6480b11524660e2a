use chrono::{
  Datelike,
  Duration,
  NaiveDate,
  Weekday
};

pub const DAY_NAMES: [&str; 7] = [
  "Monday",
  "Tuesday",
  "Wednesday",
  "Thursday",
  "Friday",
  "Saturday",
  "Sunday",
];

pub fn add_days(
  date: NaiveDate,
  days: i64
) -> NaiveDate {
  date
    .checked_add_signed(Duration::days(
      days
    ))
    .unwrap_or(date)
}

/// Most recent Monday; Sunday rolls
/// back six days.
pub fn start_of_week(
  date: NaiveDate
) -> NaiveDate {
  let back = date
    .weekday()
    .num_days_from_monday()
    as i64;
  add_days(date, -back)
}

/// The seven days of the week
/// containing `date`, Monday first.
pub fn week_days(
  date: NaiveDate
) -> [NaiveDate; 7] {
  let start = start_of_week(date);
  std::array::from_fn(|offset| {
    add_days(start, offset as i64)
  })
}

pub fn shift_months(
  date: NaiveDate,
  months: i32
) -> NaiveDate {
  let mut year = date.year();
  let mut month =
    date.month() as i32 + months;

  while month < 1 {
    month += 12;
    year = year.saturating_sub(1);
  }
  while month > 12 {
    month -= 12;
    year = year.saturating_add(1);
  }

  let month = month as u32;
  let day = date
    .day()
    .min(days_in_month(year, month));
  NaiveDate::from_ymd_opt(
    year, month, day
  )
  .unwrap_or(date)
}

pub fn shift_years(
  date: NaiveDate,
  years: i32
) -> NaiveDate {
  shift_months(date, years * 12)
}

fn days_in_month(
  year: i32,
  month: u32
) -> u32 {
  let (next_year, next_month) =
    if month >= 12 {
      (year.saturating_add(1), 1_u32)
    } else {
      (year, month + 1)
    };
  NaiveDate::from_ymd_opt(
    next_year, next_month, 1
  )
  .map(|first| {
    add_days(first, -1).day()
  })
  .unwrap_or(28)
}

pub fn weekday_name(
  day: Weekday
) -> &'static str {
  match day {
    | Weekday::Mon => "monday",
    | Weekday::Tue => "tuesday",
    | Weekday::Wed => "wednesday",
    | Weekday::Thu => "thursday",
    | Weekday::Fri => "friday",
    | Weekday::Sat => "saturday",
    | Weekday::Sun => "sunday"
  }
}

pub fn weekday_from_name(
  name: &str
) -> Option<Weekday> {
  match name
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "monday" => Some(Weekday::Mon),
    | "tuesday" => Some(Weekday::Tue),
    | "wednesday" => {
      Some(Weekday::Wed)
    }
    | "thursday" => {
      Some(Weekday::Thu)
    }
    | "friday" => Some(Weekday::Fri),
    | "saturday" => {
      Some(Weekday::Sat)
    }
    | "sunday" => Some(Weekday::Sun),
    | _ => None
  }
}
