use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{
  Deserialize,
  Serialize
};

use crate::slots;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorFamily {
  Navy,
  Blue,
  Cyan,
  Green,
  Info,
  Yellow,
  Red,
  Gray
}

impl ColorFamily {
  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Navy => "navy",
      | Self::Blue => "blue",
      | Self::Cyan => "cyan",
      | Self::Green => "green",
      | Self::Info => "info",
      | Self::Yellow => "yellow",
      | Self::Red => "red",
      | Self::Gray => "gray"
    }
  }

  pub fn all() -> [Self; 8] {
    [
      Self::Navy,
      Self::Blue,
      Self::Cyan,
      Self::Green,
      Self::Info,
      Self::Yellow,
      Self::Red,
      Self::Gray
    ]
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Occurrence {
  Daily,
  Weekly,
  Monthly,
  Custom
}

impl Occurrence {
  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Daily => "daily",
      | Self::Weekly => "weekly",
      | Self::Monthly => "monthly",
      | Self::Custom => "custom"
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    match key {
      | "daily" => Some(Self::Daily),
      | "weekly" => Some(Self::Weekly),
      | "monthly" => {
        Some(Self::Monthly)
      }
      | "custom" => Some(Self::Custom),
      | _ => None
    }
  }

  pub fn all() -> [Self; 4] {
    [
      Self::Daily,
      Self::Weekly,
      Self::Monthly,
      Self::Custom
    ]
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::Daily => "Daily",
      | Self::Weekly => "Weekly",
      | Self::Monthly => "Monthly",
      | Self::Custom => "Custom"
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum InsightKind {
  RisksOpportunities,
  KnowledgeSkillTransfer,
  ImprovementsValueAdd,
  Learning
}

pub struct InsightMeta {
  pub kind:        InsightKind,
  pub label:       &'static str,
  pub placeholder: &'static str,
  pub description: &'static str
}

pub const INSIGHT_KINDS:
  [InsightMeta; 4] = [
  InsightMeta {
    kind:
      InsightKind::RisksOpportunities,
    label: "Risks & Opportunities",
    placeholder:
      "What risks and opportunities \
       have you encountered?",
    description:
      "Specify the project name, the \
       risks identified, and the \
       solutions implemented to \
       mitigate them."
  },
  InsightMeta {
    kind:
      InsightKind::KnowledgeSkillTransfer,
    label:
      "Knowledge & Skill Transfer",
    placeholder:
      "What knowledge or skills have \
       been transferred?",
    description:
      "Document the knowledge, \
       skills, or expertise shared \
       between team members or \
       departments during this task."
  },
  InsightMeta {
    kind:
      InsightKind::ImprovementsValueAdd,
    label:
      "Improvements and Value Add",
    placeholder:
      "What improvements and value \
       additions have been made?",
    description:
      "Describe any enhancements, \
       optimizations, or value-added \
       contributions made during \
       this task."
  },
  InsightMeta {
    kind: InsightKind::Learning,
    label: "Learning",
    placeholder:
      "What have you learned?",
    description:
      "Share key learnings, \
       insights, or new knowledge \
       gained from working on this \
       task."
  },
];

pub fn insight_meta(
  kind: InsightKind
) -> &'static InsightMeta {
  INSIGHT_KINDS
    .iter()
    .find(|meta| meta.kind == kind)
    .unwrap_or(&INSIGHT_KINDS[0])
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct ImprovementInsight {
  pub id:      String,
  #[serde(rename = "type")]
  pub kind:    InsightKind,
  pub content: String
}

pub struct ClientOption {
  pub label: &'static str,
  pub value: &'static str,
  pub color: ColorFamily
}

pub const CLIENT_OPTIONS:
  [ClientOption; 6] = [
  ClientOption {
    label: "EMSI",
    value: "emsi-solutions",
    color: ColorFamily::Blue
  },
  ClientOption {
    label: "Falcorp",
    value: "falcorp",
    color: ColorFamily::Cyan
  },
  ClientOption {
    label: "Openserve",
    value: "openserve",
    color: ColorFamily::Green
  },
  ClientOption {
    label: "Vodacom",
    value: "vodacom",
    color: ColorFamily::Red
  },
  ClientOption {
    label: "Condor Group",
    value: "condor-green",
    color: ColorFamily::Navy
  },
  ClientOption {
    label: "MTN",
    value: "mtn",
    color: ColorFamily::Yellow
  },
];

pub const TASK_TYPE_OPTIONS:
  [(&str, &str); 8] = [
  ("Development", "development"),
  ("Design", "design"),
  ("Meeting", "meeting"),
  ("Review", "review"),
  ("Planning", "planning"),
  ("Testing", "testing"),
  ("Documentation", "documentation"),
  ("Research", "research"),
];

/// Card color is derived from the
/// client, gray when unknown.
pub fn client_color(
  value: &str
) -> ColorFamily {
  CLIENT_OPTIONS
    .iter()
    .find(|client| {
      client.value == value
    })
    .map(|client| client.color)
    .unwrap_or(ColorFamily::Gray)
}

pub fn client_label(
  value: &str
) -> String {
  CLIENT_OPTIONS
    .iter()
    .find(|client| {
      client.value == value
    })
    .map(|client| {
      client.label.to_string()
    })
    .unwrap_or_else(|| {
      value.to_string()
    })
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  pub id:          String,
  pub title:       String,
  #[serde(default)]
  pub description: String,
  pub client:      String,
  pub task_type:   Vec<String>,
  pub start_time:  String,
  pub end_time:    String,
  pub day:         u32,
  pub month:       u32,
  pub year:        i32,
  #[serde(default)]
  pub repeat:      bool,
  pub occurrence:  Option<Occurrence>,
  #[serde(default)]
  pub custom_days: Vec<String>,
  pub start_date:  Option<NaiveDate>,
  pub end_date:    Option<NaiveDate>,
  #[serde(default)]
  pub kpi_entry:   bool,
  pub color:       ColorFamily,
  #[serde(default)]
  pub improvement_insights:
    Vec<ImprovementInsight>
}

impl Task {
  pub fn date(
    &self
  ) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
      self.year, self.month, self.day
    )
  }

  pub fn falls_on(
    &self,
    date: NaiveDate
  ) -> bool {
    self.date() == Some(date)
  }

  pub fn start_index(
    &self
  ) -> Option<usize> {
    slots::slot_index(&self.start_time)
  }

  pub fn end_index(
    &self
  ) -> Option<usize> {
    slots::slot_index(&self.end_time)
  }
}

/// A task as the add form supplies
/// it, before the store assigns an
/// id.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
  pub title:       String,
  #[serde(default)]
  pub description: String,
  pub client:      String,
  pub task_type:   Vec<String>,
  pub start_time:  String,
  pub end_time:    String,
  pub day:         u32,
  pub month:       u32,
  pub year:        i32,
  #[serde(default)]
  pub repeat:      bool,
  pub occurrence:  Option<Occurrence>,
  #[serde(default)]
  pub custom_days: Vec<String>,
  pub start_date:  Option<NaiveDate>,
  pub end_date:    Option<NaiveDate>,
  #[serde(default)]
  pub kpi_entry:   bool,
  pub color:       ColorFamily,
  #[serde(default)]
  pub improvement_insights:
    Vec<ImprovementInsight>
}

impl TaskDraft {
  pub fn into_task(
    self,
    id: String
  ) -> Task {
    Task {
      id,
      title: self.title,
      description: self.description,
      client: self.client,
      task_type: self.task_type,
      start_time: self.start_time,
      end_time: self.end_time,
      day: self.day,
      month: self.month,
      year: self.year,
      repeat: self.repeat,
      occurrence: self.occurrence,
      custom_days: self.custom_days,
      start_date: self.start_date,
      end_date: self.end_date,
      kpi_entry: self.kpi_entry,
      color: self.color,
      improvement_insights: self
        .improvement_insights
    }
  }
}

/// Per-field form errors; an empty
/// map means the draft may be
/// submitted.
pub fn validate_draft(
  draft: &TaskDraft
) -> BTreeMap<&'static str, String> {
  let mut errors = BTreeMap::new();

  if draft.title.trim().is_empty() {
    errors.insert(
      "title",
      "Task title is required"
        .to_string()
    );
  }
  if draft.client.trim().is_empty() {
    errors.insert(
      "client",
      "Client is required".to_string()
    );
  }
  if draft.task_type.is_empty() {
    errors.insert(
      "taskType",
      "At least one task type is \
       required"
        .to_string()
    );
  }

  match (
    slots::slot_index(
      &draft.start_time
    ),
    slots::slot_index(&draft.end_time)
  ) {
    | (Some(start), Some(end)) => {
      if start >= end {
        errors.insert(
          "endTime",
          "End time must be after \
           start time"
            .to_string()
        );
      }
    }
    | (None, _) => {
      errors.insert(
        "startTime",
        "Start time is required"
          .to_string()
      );
    }
    | (_, None) => {
      errors.insert(
        "endTime",
        "End time is required"
          .to_string()
      );
    }
  }

  if draft.repeat {
    match draft.occurrence {
      | None => {
        errors.insert(
          "occurrence",
          "Occurrence is required \
           when repeat is enabled"
            .to_string()
        );
      }
      | Some(Occurrence::Custom)
        if draft
          .custom_days
          .is_empty() =>
      {
        errors.insert(
          "customDays",
          "At least one day must be \
           selected for custom \
           repeat"
            .to_string()
        );
      }
      | Some(_) => {}
    }
    if draft.start_date.is_none() {
      errors.insert(
        "startDate",
        "Start date is required when \
         repeat is enabled"
          .to_string()
      );
    }
  }

  if let (Some(start), Some(end)) = (
    draft.start_date,
    draft.end_date
  ) && end < start
  {
    errors.insert(
      "endDate",
      "End date must be after start \
       date"
        .to_string()
    );
  }

  errors
}

#[cfg(test)]
pub(crate) fn sample_draft(
) -> TaskDraft {
  TaskDraft {
    title: "Standup".to_string(),
    description: String::new(),
    client: "emsi-solutions"
      .to_string(),
    task_type: vec![
      "meeting".to_string(),
    ],
    start_time: "09:00 AM"
      .to_string(),
    end_time: "09:15 AM".to_string(),
    day: 5,
    month: 3,
    year: 2024,
    repeat: false,
    occurrence: None,
    custom_days: Vec::new(),
    start_date: None,
    end_date: None,
    kpi_entry: false,
    color: client_color(
      "emsi-solutions"
    ),
    improvement_insights: Vec::new()
  }
}
