use std::collections::{
  BTreeMap,
  BTreeSet
};

use chrono::{
  Datelike,
  Local,
  NaiveDate,
  Timelike
};
use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use tempo_core::dates::{
  add_days,
  start_of_week,
  week_days
};
use tempo_core::drag::{
  DragGesture,
  DragHandle,
  apply_handle
};
use tempo_core::recurrence::materialize;
use tempo_core::slots::{
  add_slot_minutes,
  now_offset_px,
  slot_label
};
use tempo_core::store::TaskPatch;
use tempo_core::task::{
  Task,
  TaskDraft,
  client_color,
  validate_draft
};
use wasm_bindgen::JsCast;
use web_sys::{
  MouseEvent,
  ScrollBehavior,
  ScrollToOptions
};
use yew::{
  Callback,
  Html,
  NodeRef,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_mut_ref,
  use_reducer,
  use_state,
  use_state_eq
};

use crate::components::{
  CalendarGrid,
  ContextMenu,
  OverlayRect,
  SlotOverlay,
  TaskForm,
  ThemeEditor
};
use crate::grid_config::load_grid_config;
use crate::state::{
  TasksAction,
  TasksState,
  ThemeAction,
  ThemeState
};
use crate::theme_apply::{
  apply_theme,
  clear_theme
};

#[derive(Clone, PartialEq)]
enum ModalMode {
  Add,
  Edit(String)
}

/// An in-flight card drag. Document
/// level listeners consult this on
/// every pointer event; the slot
/// indices mirror the store so a
/// fast drag never reads stale
/// state.
struct ActiveDrag {
  gesture:   DragGesture,
  task_id:   String,
  start_idx: usize,
  end_idx:   usize
}

fn blank_draft(
  date: NaiveDate,
  slot: usize
) -> TaskDraft {
  let start = slot_label(slot)
    .unwrap_or_else(|| {
      "09:00 AM".to_string()
    });
  let end =
    add_slot_minutes(&start, 60)
      .unwrap_or_else(|| {
        start.clone()
      });
  TaskDraft {
    title: String::new(),
    description: String::new(),
    client: String::new(),
    task_type: Vec::new(),
    start_time: start,
    end_time: end,
    day: date.day(),
    month: date.month(),
    year: date.year(),
    repeat: false,
    occurrence: None,
    custom_days: Vec::new(),
    start_date: None,
    end_date: None,
    kpi_entry: false,
    color: client_color(""),
    improvement_insights: Vec::new()
  }
}

fn draft_from_task(
  task: &Task
) -> TaskDraft {
  TaskDraft {
    title: task.title.clone(),
    description: task
      .description
      .clone(),
    client: task.client.clone(),
    task_type: task
      .task_type
      .clone(),
    start_time: task
      .start_time
      .clone(),
    end_time: task.end_time.clone(),
    day: task.day,
    month: task.month,
    year: task.year,
    repeat: task.repeat,
    occurrence: task.occurrence,
    custom_days: task
      .custom_days
      .clone(),
    start_date: task.start_date,
    end_date: task.end_date,
    kpi_entry: task.kpi_entry,
    color: task.color,
    improvement_insights: task
      .improvement_insights
      .clone()
  }
}

/// Every field set: editing writes
/// the whole form back, clearing
/// fields the user emptied.
fn patch_from_draft(
  draft: &TaskDraft
) -> TaskPatch {
  TaskPatch {
    title: Some(draft.title.clone()),
    description: Some(
      draft.description.clone()
    ),
    client: Some(
      draft.client.clone()
    ),
    task_type: Some(
      draft.task_type.clone()
    ),
    start_time: Some(
      draft.start_time.clone()
    ),
    end_time: Some(
      draft.end_time.clone()
    ),
    day: Some(draft.day),
    month: Some(draft.month),
    year: Some(draft.year),
    repeat: Some(draft.repeat),
    occurrence: Some(
      draft.occurrence
    ),
    custom_days: Some(
      draft.custom_days.clone()
    ),
    start_date: Some(
      draft.start_date
    ),
    end_date: Some(draft.end_date),
    kpi_entry: Some(
      draft.kpi_entry
    ),
    color: Some(draft.color),
    improvement_insights: Some(
      draft
        .improvement_insights
        .clone()
    )
  }
}

fn minutes_since_midnight() -> u32 {
  let now = Local::now();
  now.hour() * 60 + now.minute()
}

#[function_component(App)]
pub fn app() -> Html {
  let config = use_memo((), |_| {
    load_grid_config()
  });
  let slot_height =
    config.grid.slot_height_px;

  let tasks =
    use_reducer(TasksState::load);
  let theme =
    use_reducer(ThemeState::load);

  let selected_date = use_state(|| {
    Local::now().date_naive()
  });
  let now_offset =
    use_state(|| None::<f64>);
  let modal = use_state(|| {
    None::<ModalMode>
  });
  let draft = use_state(|| {
    blank_draft(
      Local::now().date_naive(),
      36
    )
  });
  let errors = use_state(|| {
    BTreeMap::<
      &'static str,
      String
    >::new()
  });
  let overlay = use_state_eq(|| {
    None::<(OverlayRect, String)>
  });
  let menu = use_state_eq(|| {
    None::<(String, f64, f64)>
  });
  let show_theme_editor =
    use_state(|| false);

  let active_drag = use_mut_ref(|| {
    None::<ActiveDrag>
  });
  let drag_active =
    use_state_eq(|| false);
  // Set on release of a real drag;
  // the click that follows must not
  // open the editor.
  let suppress_click =
    use_mut_ref(|| false);
  let scrolled_week = use_mut_ref(
    || None::<NaiveDate>
  );
  let scroll_ref = NodeRef::default();

  let week =
    week_days(*selected_date);
  let today =
    Local::now().date_naive();

  // Outside-press dismissal for the
  // slot overlay and the context
  // menu.
  {
    let overlay = overlay.clone();
    let menu = menu.clone();
    use_effect_with((), move |_| {
      let listener =
        web_sys::window()
          .and_then(|window| {
            window.document()
          })
          .map(|document| {
            EventListener::new(
              &document,
              "mousedown",
              move |_event| {
                overlay.set(None);
                menu.set(None);
              }
            )
          });
      move || drop(listener)
    });
  }

  // Document-level drag plumbing.
  // Listeners exist only while a
  // gesture is live; release tears
  // them down through the effect
  // cleanup. The handlers read the
  // shared drag cell so they see
  // the gesture a card press just
  // started.
  {
    let active_drag =
      active_drag.clone();
    let suppress_click =
      suppress_click.clone();
    let dispatcher =
      tasks.dispatcher();
    let drag_active_dep =
      *drag_active;
    let drag_active =
      drag_active.clone();
    use_effect_with(
      drag_active_dep,
      move |active| {
      let document = (*active)
        .then(web_sys::window)
        .flatten()
        .and_then(|window| {
          window.document()
        });
      let mut listeners = Vec::new();
      if let Some(document) =
        document
      {
        let drag =
          active_drag.clone();
        listeners.push(
          EventListener::new(
            &document,
            "mousemove",
            move |event| {
              let Some(event) =
                event.dyn_ref::<MouseEvent>()
              else {
                return;
              };
              let y = f64::from(
                event.client_y()
              );
              let now =
                js_sys::Date::now();
              let mut guard =
                drag.borrow_mut();
              let Some(active) =
                guard.as_mut()
              else {
                return;
              };
              let Some(delta) =
                active
                  .gesture
                  .pointer_move(
                    y,
                    now,
                    slot_height
                  )
              else {
                return;
              };
              let Some((
                new_start,
                new_end
              )) = apply_handle(
                active
                  .gesture
                  .handle(),
                active.start_idx,
                active.end_idx,
                delta
              )
              else {
                return;
              };
              let (
                Some(start_time),
                Some(end_time)
              ) = (
                slot_label(
                  new_start
                ),
                slot_label(new_end)
              )
              else {
                return;
              };
              active.start_idx =
                new_start;
              active.end_idx =
                new_end;
              active
                .gesture
                .commit(
                  slot_height,
                  now
                );
              let id = active
                .task_id
                .clone();
              drop(guard);
              dispatcher.dispatch(
                TasksAction::Update {
                  id,
                  patch: TaskPatch {
                    start_time:
                      Some(
                        start_time
                      ),
                    end_time: Some(
                      end_time
                    ),
                    ..TaskPatch::default()
                  }
                }
              );
            }
          )
        );

        let drag =
          active_drag.clone();
        let suppress =
          suppress_click.clone();
        listeners.push(
          EventListener::new(
            &document,
            "mouseup",
            move |_event| {
              if let Some(
                mut active
              ) = drag
                .borrow_mut()
                .take()
              {
                *suppress
                  .borrow_mut() =
                  active
                    .gesture
                    .release();
              }
              drag_active
                .set(false);
            }
          )
        );
      }
      move || drop(listeners)
    });
  }

  // The now line appears on the
  // first clock tick after mount,
  // never in the initial paint, and
  // refreshes on the configured
  // cadence.
  {
    let now_offset =
      now_offset.clone();
    let refresh_ms = config
      .grid
      .now_refresh_secs
      * 1_000;
    use_effect_with((), move |_| {
      let tick = {
        let now_offset =
          now_offset.clone();
        move || {
          now_offset.set(Some(
            now_offset_px(
              minutes_since_midnight(),
              slot_height
            )
          ));
        }
      };
      tick();
      let interval =
        Interval::new(
          refresh_ms, tick
        );
      move || drop(interval)
    });
  }

  // One scroll per distinct week
  // view: center the current time
  // in the visible window, or the
  // working morning when today is
  // off screen.
  {
    let scroll_ref =
      scroll_ref.clone();
    let scrolled_week =
      scrolled_week.clone();
    let auto_scroll =
      config.grid.auto_scroll;
    use_effect_with(
      week[0],
      move |week_start| {
        if !auto_scroll
          || *scrolled_week
            .borrow()
            == Some(*week_start)
        {
          return;
        }
        *scrolled_week
          .borrow_mut() =
          Some(*week_start);
        let Some(element) =
          scroll_ref
            .cast::<web_sys::Element>()
        else {
          return;
        };
        let today =
          Local::now().date_naive();
        let target =
          if start_of_week(today)
            == *week_start
          {
            now_offset_px(
              minutes_since_midnight(),
              slot_height
            )
          } else {
            32.0 * slot_height
          };
        let top = (target
          - f64::from(
            element.client_height()
          ) / 2.0)
          .max(0.0);
        let options =
          ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(
          ScrollBehavior::Smooth
        );
        element
          .scroll_to_with_scroll_to_options(
            &options
          );
      }
    );
  }

  {
    let current = theme
      .store
      .theme()
      .clone();
    use_effect_with(
      current,
      |theme| {
        apply_theme(theme);
      }
    );
  }

  let on_prev = {
    let selected_date =
      selected_date.clone();
    Callback::from(
      move |_: MouseEvent| {
        selected_date.set(add_days(
          *selected_date,
          -7
        ));
      }
    )
  };
  let on_next = {
    let selected_date =
      selected_date.clone();
    Callback::from(
      move |_: MouseEvent| {
        selected_date.set(add_days(
          *selected_date,
          7
        ));
      }
    )
  };
  let on_today = {
    let selected_date =
      selected_date.clone();
    Callback::from(
      move |_: MouseEvent| {
        selected_date.set(
          Local::now().date_naive()
        );
      }
    )
  };
  let on_toggle_theme_editor = {
    let show_theme_editor =
      show_theme_editor.clone();
    Callback::from(
      move |_: MouseEvent| {
        show_theme_editor.set(
          !*show_theme_editor
        );
      }
    )
  };

  let on_slot_click = {
    let draft = draft.clone();
    let errors = errors.clone();
    let modal = modal.clone();
    let overlay = overlay.clone();
    Callback::from(
      move |(date, slot, rect): (
        NaiveDate,
        usize,
        OverlayRect
      )| {
        let label =
          slot_label(slot)
            .unwrap_or_default();
        overlay.set(Some((
          rect, label
        )));
        draft.set(blank_draft(
          date, slot
        ));
        errors.set(BTreeMap::new());
        modal
          .set(Some(ModalMode::Add));
      }
    )
  };

  let on_task_open = {
    let tasks = tasks.clone();
    let draft = draft.clone();
    let errors = errors.clone();
    let modal = modal.clone();
    let suppress_click =
      suppress_click.clone();
    Callback::from(
      move |id: String| {
        // Consume the flag a drag
        // release left behind.
        let mut suppress =
          suppress_click
            .borrow_mut();
        if *suppress {
          *suppress = false;
          return;
        }
        drop(suppress);
        let Some(task) =
          tasks.store.get(&id)
        else {
          return;
        };
        draft.set(
          draft_from_task(task)
        );
        errors.set(BTreeMap::new());
        modal.set(Some(
          ModalMode::Edit(id)
        ));
      }
    )
  };

  let on_task_press = {
    let tasks = tasks.clone();
    let active_drag =
      active_drag.clone();
    let drag_active =
      drag_active.clone();
    let suppress_click =
      suppress_click.clone();
    Callback::from(
      move |(id, handle, y): (
        String,
        DragHandle,
        f64
      )| {
        *suppress_click
          .borrow_mut() = false;
        let Some(task) =
          tasks.store.get(&id)
        else {
          return;
        };
        let (
          Some(start_idx),
          Some(end_idx)
        ) = (
          task.start_index(),
          task.end_index()
        )
        else {
          return;
        };
        *active_drag
          .borrow_mut() =
          Some(ActiveDrag {
            gesture:
              DragGesture::begin(
                handle, y
              ),
            task_id: id,
            start_idx,
            end_idx
          });
        drag_active.set(true);
      }
    )
  };

  let on_task_menu = {
    let menu = menu.clone();
    Callback::from(
      move |(id, x, y): (
        String,
        f64,
        f64
      )| {
        menu.set(Some((id, x, y)));
      }
    )
  };

  let on_menu_duplicate = {
    let tasks = tasks.clone();
    let menu = menu.clone();
    Callback::from(move |()| {
      if let Some((id, _, _)) =
        (*menu).clone()
      {
        tasks.dispatch(
          TasksAction::Duplicate(
            id
          )
        );
      }
      menu.set(None);
    })
  };
  let on_menu_delete = {
    let tasks = tasks.clone();
    let menu = menu.clone();
    Callback::from(move |()| {
      if let Some((id, _, _)) =
        (*menu).clone()
      {
        tasks.dispatch(
          TasksAction::Delete(id)
        );
      }
      menu.set(None);
    })
  };

  let on_form_change = {
    let draft = draft.clone();
    Callback::from(
      move |next: TaskDraft| {
        draft.set(next);
      }
    )
  };
  let on_form_cancel = {
    let modal = modal.clone();
    let overlay = overlay.clone();
    let errors = errors.clone();
    Callback::from(move |()| {
      modal.set(None);
      overlay.set(None);
      errors.set(BTreeMap::new());
    })
  };
  let on_form_submit = {
    let tasks = tasks.clone();
    let draft = draft.clone();
    let errors = errors.clone();
    let modal = modal.clone();
    let overlay = overlay.clone();
    Callback::from(move |()| {
      let current =
        (*draft).clone();
      let found =
        validate_draft(&current);
      if !found.is_empty() {
        errors.set(found);
        return;
      }
      match (*modal).clone() {
        | Some(ModalMode::Add) => {
          tasks.dispatch(
            TasksAction::AddMany(
              materialize(current)
            )
          );
        }
        | Some(ModalMode::Edit(
          id
        )) => {
          tasks.dispatch(
            TasksAction::Update {
              id,
              patch:
                patch_from_draft(
                  &current
                )
            }
          );
        }
        | None => {}
      }
      modal.set(None);
      overlay.set(None);
      errors.set(BTreeMap::new());
    })
  };

  let on_theme_update = {
    let theme = theme.clone();
    Callback::from(
      move |patch: serde_json::Value| {
        theme.dispatch(
          ThemeAction::Update(
            patch
          )
        );
      }
    )
  };
  let on_theme_reset = {
    let theme = theme.clone();
    Callback::from(move |()| {
      // Drop the inline overrides
      // first so the stylesheet
      // defaults show through, then
      // rebase the store.
      clear_theme();
      theme.dispatch(
        ThemeAction::Reset(None)
      );
    })
  };
  let on_toggle_persist = {
    let theme = theme.clone();
    Callback::from(
      move |persist: bool| {
        theme.dispatch(
          ThemeAction::SetPersisted(
            persist
          )
        );
      }
    )
  };
  let on_theme_close = {
    let show_theme_editor =
      show_theme_editor.clone();
    Callback::from(move |()| {
      show_theme_editor.set(false);
    })
  };

  let title_options = tasks
    .store
    .tasks()
    .iter()
    .map(|task| task.title.clone())
    .filter(|title| {
      !title.trim().is_empty()
    })
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect::<Vec<_>>();

  let week_label = format!(
    "{} - {}, {}",
    week[0].format("%b %-d"),
    week[6].format("%b %-d"),
    week[6].year()
  );

  let modal_view = match &*modal {
    | Some(mode) => {
      let is_edit = matches!(
        mode,
        ModalMode::Edit(_)
      );
      html! {
        <TaskForm
          draft={(*draft).clone()}
          errors={
            (*errors).clone()
          }
          title_options={
            title_options.clone()
          }
          is_edit={is_edit}
          on_change={
            on_form_change.clone()
          }
          on_submit={
            on_form_submit.clone()
          }
          on_cancel={
            on_form_cancel.clone()
          }
        />
      }
    }
    | None => Html::default()
  };

  let overlay_view =
    match &*overlay {
      | Some((rect, label)) => {
        html! {
          <SlotOverlay
            rect={rect.clone()}
            label={label.clone()}
          />
        }
      }
      | None => Html::default()
    };

  let menu_view = match &*menu {
    | Some((_, x, y)) => html! {
      <ContextMenu
        x={*x}
        y={*y}
        on_duplicate={
          on_menu_duplicate
            .clone()
        }
        on_delete={
          on_menu_delete.clone()
        }
      />
    },
    | None => Html::default()
  };

  let editor_view =
    if *show_theme_editor {
      html! {
        <ThemeEditor
          theme={
            theme
              .store
              .theme()
              .clone()
          }
          persisted={
            theme
              .store
              .persisted()
          }
          on_update={
            on_theme_update
              .clone()
          }
          on_reset={
            on_theme_reset.clone()
          }
          on_toggle_persist={
            on_toggle_persist
              .clone()
          }
          on_close={
            on_theme_close.clone()
          }
        />
      }
    } else {
      Html::default()
    };

  html! {
    <div class="dashboard">
      <header class="toolbar">
        <h1>{ "Tempo" }</h1>
        <div class="row">
          <button
            onclick={on_prev}
          >
            { "<" }
          </button>
          <button
            onclick={on_today}
          >
            { "Today" }
          </button>
          <button
            onclick={on_next}
          >
            { ">" }
          </button>
          <span class="week-label">
            { week_label }
          </span>
        </div>
        <div class="spacer" />
        <button
          onclick={
            on_toggle_theme_editor
          }
        >
          { "Theme" }
        </button>
      </header>

      <div
        class="calendar-scroll"
        ref={scroll_ref}
      >
        <CalendarGrid
          week={week}
          tasks={
            tasks
              .store
              .tasks()
              .to_vec()
          }
          slot_height={slot_height}
          today={today}
          now_offset_px={
            *now_offset
          }
          on_slot_click={
            on_slot_click
          }
          on_task_open={
            on_task_open
          }
          on_task_press={
            on_task_press
          }
          on_task_menu={
            on_task_menu
          }
        />
      </div>

      { overlay_view }
      { menu_view }
      { modal_view }
      { editor_view }
    </div>
  }
}
