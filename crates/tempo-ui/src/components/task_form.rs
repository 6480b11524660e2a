use std::collections::BTreeMap;

use chrono::NaiveDate;
use tempo_core::dates::DAY_NAMES;
use tempo_core::slots::time_slots;
use tempo_core::task::{
  CLIENT_OPTIONS,
  INSIGHT_KINDS,
  ImprovementInsight,
  Occurrence,
  TASK_TYPE_OPTIONS,
  TaskDraft,
  client_color
};
use uuid::Uuid;
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement
};
use yew::events::{
  Event,
  InputEvent,
  MouseEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub draft: TaskDraft,
  pub errors:
    BTreeMap<&'static str, String>,
  /// Previously used titles, offered
  /// as datalist suggestions.
  pub title_options: Vec<String>,
  pub is_edit: bool,
  pub on_change: Callback<TaskDraft>,
  pub on_submit: Callback<()>,
  pub on_cancel: Callback<()>
}

fn field_error(
  errors: &BTreeMap<
    &'static str,
    String
  >,
  key: &str
) -> Html {
  match errors.get(key) {
    | Some(message) => html! {
      <span class="error">
        { message.clone() }
      </span>
    },
    | None => Html::default()
  }
}

fn edit_draft<T, F>(
  draft: &TaskDraft,
  on_change: &Callback<TaskDraft>,
  apply: F
) -> Callback<T>
where
  T: 'static,
  F: Fn(&mut TaskDraft, T) + 'static
{
  let draft = draft.clone();
  let on_change = on_change.clone();
  Callback::from(move |value: T| {
    let mut next = draft.clone();
    apply(&mut next, value);
    on_change.emit(next);
  })
}

fn date_value(
  date: Option<NaiveDate>
) -> String {
  date
    .map(|date| {
      date
        .format("%Y-%m-%d")
        .to_string()
    })
    .unwrap_or_default()
}

fn parse_date(
  raw: &str
) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(
    raw.trim(),
    "%Y-%m-%d"
  )
  .ok()
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let pending_insight =
    use_state(|| 0_usize);

  let on_title = edit_draft(
    &props.draft,
    &props.on_change,
    |draft, event: InputEvent| {
      if let Some(input) = event
        .target_dyn_into::<HtmlInputElement>(
        )
      {
        draft.title = input.value();
      }
    }
  );
  let on_description = edit_draft(
    &props.draft,
    &props.on_change,
    |draft, event: InputEvent| {
      if let Some(area) = event
        .target_dyn_into::<HtmlTextAreaElement>(
        )
      {
        draft.description =
          area.value();
      }
    }
  );
  let on_client = edit_draft(
    &props.draft,
    &props.on_change,
    |draft, event: Event| {
      if let Some(select) = event
        .target_dyn_into::<HtmlSelectElement>(
        )
      {
        let value = select.value();
        draft.color =
          client_color(&value);
        draft.client = value;
      }
    }
  );
  let on_start_time = edit_draft(
    &props.draft,
    &props.on_change,
    |draft, event: Event| {
      if let Some(select) = event
        .target_dyn_into::<HtmlSelectElement>(
        )
      {
        draft.start_time =
          select.value();
      }
    }
  );
  let on_end_time = edit_draft(
    &props.draft,
    &props.on_change,
    |draft, event: Event| {
      if let Some(select) = event
        .target_dyn_into::<HtmlSelectElement>(
        )
      {
        draft.end_time =
          select.value();
      }
    }
  );
  let on_repeat = edit_draft(
    &props.draft,
    &props.on_change,
    |draft, event: Event| {
      if let Some(input) = event
        .target_dyn_into::<HtmlInputElement>(
        )
      {
        draft.repeat =
          input.checked();
      }
    }
  );
  let on_occurrence = edit_draft(
    &props.draft,
    &props.on_change,
    |draft, event: Event| {
      if let Some(select) = event
        .target_dyn_into::<HtmlSelectElement>(
        )
      {
        draft.occurrence =
          Occurrence::from_key(
            &select.value()
          );
      }
    }
  );
  let on_start_date = edit_draft(
    &props.draft,
    &props.on_change,
    |draft, event: Event| {
      if let Some(input) = event
        .target_dyn_into::<HtmlInputElement>(
        )
      {
        draft.start_date =
          parse_date(&input.value());
      }
    }
  );
  let on_end_date = edit_draft(
    &props.draft,
    &props.on_change,
    |draft, event: Event| {
      if let Some(input) = event
        .target_dyn_into::<HtmlInputElement>(
        )
      {
        draft.end_date =
          parse_date(&input.value());
      }
    }
  );
  let on_kpi = edit_draft(
    &props.draft,
    &props.on_change,
    |draft, event: Event| {
      if let Some(input) = event
        .target_dyn_into::<HtmlInputElement>(
        )
      {
        draft.kpi_entry =
          input.checked();
      }
    }
  );

  let type_checks = TASK_TYPE_OPTIONS
    .iter()
    .map(|(label, value)| {
      let value = value.to_string();
      let checked = props
        .draft
        .task_type
        .contains(&value);
      let ontoggle = edit_draft(
        &props.draft,
        &props.on_change,
        move |draft, _: Event| {
          if let Some(slot) = draft
            .task_type
            .iter()
            .position(|entry| {
              entry == &value
            })
          {
            draft
              .task_type
              .remove(slot);
          } else {
            draft
              .task_type
              .push(value.clone());
          }
        }
      );
      html! {
        <label>
          <input
            type="checkbox"
            checked={checked}
            onchange={ontoggle}
          />
          { *label }
        </label>
      }
    });

  let custom_day_checks = DAY_NAMES
    .iter()
    .map(|name| {
      let value =
        name.to_ascii_lowercase();
      let checked = props
        .draft
        .custom_days
        .contains(&value);
      let ontoggle = edit_draft(
        &props.draft,
        &props.on_change,
        move |draft, _: Event| {
          if let Some(slot) = draft
            .custom_days
            .iter()
            .position(|entry| {
              entry == &value
            })
          {
            draft
              .custom_days
              .remove(slot);
          } else {
            draft
              .custom_days
              .push(value.clone());
          }
        }
      );
      html! {
        <label>
          <input
            type="checkbox"
            checked={checked}
            onchange={ontoggle}
          />
          { *name }
        </label>
      }
    });

  let slot_options = |selected: &str| {
    time_slots()
      .iter()
      .map(|label| {
        html! {
          <option
            value={label.clone()}
            selected={
              label == selected
            }
          >
            { label.clone() }
          </option>
        }
      })
      .collect::<Html>()
  };

  let insight_rows = props
    .draft
    .improvement_insights
    .iter()
    .enumerate()
    .map(|(slot, insight)| {
      let meta =
        tempo_core::task::insight_meta(
          insight.kind
        );
      let on_content = edit_draft(
        &props.draft,
        &props.on_change,
        move |
          draft,
          event: InputEvent
        | {
          if let Some(area) = event
            .target_dyn_into::<HtmlTextAreaElement>(
            )
            && let Some(entry) =
              draft
                .improvement_insights
                .get_mut(slot)
          {
            entry.content =
              area.value();
          }
        }
      );
      let on_remove = edit_draft(
        &props.draft,
        &props.on_change,
        move |
          draft,
          _: MouseEvent
        | {
          if slot
            < draft
              .improvement_insights
              .len()
          {
            draft
              .improvement_insights
              .remove(slot);
          }
        }
      );
      html! {
        <div class="insight">
          <div class="row">
            <strong>
              { meta.label }
            </strong>
            <button
              type="button"
              onclick={on_remove}
            >
              { "Remove" }
            </button>
          </div>
          <p class="hint">
            { meta.description }
          </p>
          <textarea
            placeholder={
              meta.placeholder
            }
            value={
              insight
                .content
                .clone()
            }
            oninput={on_content}
          />
        </div>
      }
    })
    .collect::<Html>();

  let on_pending_insight = {
    let pending_insight =
      pending_insight.clone();
    Callback::from(
      move |event: Event| {
        if let Some(select) = event
          .target_dyn_into::<HtmlSelectElement>(
          )
          && let Ok(slot) = select
            .value()
            .parse::<usize>()
        {
          pending_insight.set(
            slot.min(
              INSIGHT_KINDS.len()
                - 1
            )
          );
        }
      }
    )
  };
  let on_add_insight = {
    let kind = INSIGHT_KINDS
      [*pending_insight]
      .kind;
    edit_draft(
      &props.draft,
      &props.on_change,
      move |
        draft,
        _: MouseEvent
      | {
        draft
          .improvement_insights
          .push(ImprovementInsight {
            id: Uuid::new_v4()
              .to_string(),
            kind,
            content: String::new()
          });
      }
    )
  };

  let onsubmit = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        on_submit.emit(());
      }
    )
  };
  let oncancel = {
    let on_cancel =
      props.on_cancel.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_cancel.emit(());
      }
    )
  };

  html! {
    <div class="modal-backdrop">
      <form
        class="modal"
        onsubmit={onsubmit}
      >
        <h2>
          { if props.is_edit {
            "Edit Task"
          } else {
            "Add Task"
          } }
        </h2>

        <div class="field">
          <label>{ "Title" }</label>
          <input
            list="task-titles"
            value={
              props
                .draft
                .title
                .clone()
            }
            oninput={on_title}
          />
          <datalist id="task-titles">
            { for props
              .title_options
              .iter()
              .map(|title| html! {
                <option
                  value={
                    title.clone()
                  }
                />
              }) }
          </datalist>
          { field_error(
            &props.errors,
            "title"
          ) }
        </div>

        <div class="field">
          <label>
            { "Description" }
          </label>
          <textarea
            value={
              props
                .draft
                .description
                .clone()
            }
            oninput={on_description}
          />
        </div>

        <div class="field">
          <label>{ "Client" }</label>
          <select
            onchange={on_client}
          >
            <option
              value=""
              selected={
                props
                  .draft
                  .client
                  .is_empty()
              }
              disabled={true}
            >
              { "Select a client" }
            </option>
            { for CLIENT_OPTIONS
              .iter()
              .map(|client| html! {
                <option
                  value={
                    client.value
                  }
                  selected={
                    client.value
                      == props
                        .draft
                        .client
                  }
                >
                  { client.label }
                </option>
              }) }
          </select>
          { field_error(
            &props.errors,
            "client"
          ) }
        </div>

        <div class="field">
          <label>
            { "Task Type" }
          </label>
          <div class="checks">
            { for type_checks }
          </div>
          { field_error(
            &props.errors,
            "taskType"
          ) }
        </div>

        <div class="row">
          <div class="field">
            <label>
              { "Start Time" }
            </label>
            <select
              onchange={
                on_start_time
              }
            >
              { slot_options(
                &props
                  .draft
                  .start_time
              ) }
            </select>
            { field_error(
              &props.errors,
              "startTime"
            ) }
          </div>
          <div class="field">
            <label>
              { "End Time" }
            </label>
            <select
              onchange={on_end_time}
            >
              { slot_options(
                &props
                  .draft
                  .end_time
              ) }
            </select>
            { field_error(
              &props.errors,
              "endTime"
            ) }
          </div>
        </div>

        <div class="field">
          <label>
            <input
              type="checkbox"
              checked={
                props.draft.repeat
              }
              onchange={on_repeat}
            />
            { "Repeat" }
          </label>
        </div>

        if props.draft.repeat {
          <div class="field">
            <label>
              { "Occurrence" }
            </label>
            <select
              onchange={
                on_occurrence
              }
            >
              <option
                value=""
                selected={
                  props
                    .draft
                    .occurrence
                    .is_none()
                }
                disabled={true}
              >
                { "Select \
                   occurrence" }
              </option>
              { for Occurrence::all()
                .iter()
                .map(|choice| html! {
                  <option
                    value={
                      choice
                        .as_key()
                    }
                    selected={
                      props
                        .draft
                        .occurrence
                        == Some(
                          *choice
                        )
                    }
                  >
                    { choice
                      .label() }
                  </option>
                }) }
            </select>
            { field_error(
              &props.errors,
              "occurrence"
            ) }
          </div>

          if props.draft.occurrence
            == Some(
              Occurrence::Custom
            )
          {
            <div class="field">
              <label>
                { "Repeat On" }
              </label>
              <div class="checks">
                { for
                  custom_day_checks }
              </div>
              { field_error(
                &props.errors,
                "customDays"
              ) }
            </div>
          }

          <div class="row">
            <div class="field">
              <label>
                { "Start Date" }
              </label>
              <input
                type="date"
                value={date_value(
                  props
                    .draft
                    .start_date
                )}
                onchange={
                  on_start_date
                }
              />
              { field_error(
                &props.errors,
                "startDate"
              ) }
            </div>
            <div class="field">
              <label>
                { "End Date" }
              </label>
              <input
                type="date"
                value={date_value(
                  props
                    .draft
                    .end_date
                )}
                onchange={
                  on_end_date
                }
              />
              { field_error(
                &props.errors,
                "endDate"
              ) }
            </div>
          </div>
        }

        <div class="field">
          <label>
            <input
              type="checkbox"
              checked={
                props
                  .draft
                  .kpi_entry
              }
              onchange={on_kpi}
            />
            { "KPI Entry" }
          </label>
        </div>

        <div class="field">
          <label>
            { "Insights" }
          </label>
          { insight_rows }
          <div class="row">
            <select
              onchange={
                on_pending_insight
              }
            >
              { for INSIGHT_KINDS
                .iter()
                .enumerate()
                .map(|(slot, meta)| {
                  html! {
                    <option
                      value={
                        slot
                          .to_string()
                      }
                      selected={
                        slot
                          == *pending_insight
                      }
                    >
                      { meta.label }
                    </option>
                  }
                }) }
            </select>
            <button
              type="button"
              onclick={
                on_add_insight
              }
            >
              { "Add Insight" }
            </button>
          </div>
        </div>

        <div class="actions">
          <button
            type="button"
            onclick={oncancel}
          >
            { "Cancel" }
          </button>
          <button
            type="submit"
            class="primary"
          >
            { if props.is_edit {
              "Save Changes"
            } else {
              "Add Task"
            } }
          </button>
        </div>
      </form>
    </div>
  }
}
