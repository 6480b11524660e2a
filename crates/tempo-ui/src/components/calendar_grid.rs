use chrono::{
  Datelike,
  NaiveDate
};
use tempo_core::dates::DAY_NAMES;
use tempo_core::drag::DragHandle;
use tempo_core::layout::{
  day_layout,
  day_total_minutes,
  format_day_total
};
use tempo_core::slots::{
  SLOT_COUNT,
  slot_label
};
use tempo_core::task::Task;
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use crate::components::slot_overlay::OverlayRect;

#[derive(Properties, PartialEq)]
pub struct CalendarGridProps {
  pub week: [NaiveDate; 7],
  pub tasks: Vec<Task>,
  pub slot_height: f64,
  pub today: NaiveDate,
  /// Pixel offset of the now line;
  /// `None` until the first client
  /// clock tick.
  pub now_offset_px: Option<f64>,
  /// Click on an empty slot: date,
  /// slot index, cell rectangle.
  pub on_slot_click: Callback<(
    NaiveDate,
    usize,
    OverlayRect
  )>,
  pub on_task_open: Callback<String>,
  pub on_task_press:
    Callback<(String, DragHandle, f64)>,
  pub on_task_menu:
    Callback<(String, f64, f64)>
}

fn day_tasks(
  tasks: &[Task],
  date: NaiveDate
) -> Vec<Task> {
  tasks
    .iter()
    .filter(|task| {
      task.falls_on(date)
    })
    .cloned()
    .collect()
}

#[function_component(CalendarGrid)]
pub fn calendar_grid(
  props: &CalendarGridProps
) -> Html {
  let column_height = props
    .slot_height
    * SLOT_COUNT as f64;

  let gutter = {
    let labels = (0..24).map(|hour| {
      let label =
        slot_label(hour * 4)
          .unwrap_or_default();
      let top = hour as f64
        * 4.0
        * props.slot_height;
      html! {
        <div
          class="hour-label"
          style={format!(
            "top: {top}px;"
          )}
        >
          { label }
        </div>
      }
    });
    html! {
      <div
        class="time-gutter"
        style={format!(
          "height: {column_height}px;"
        )}
      >
        { for labels }
      </div>
    }
  };

  let headers = props
    .week
    .iter()
    .enumerate()
    .map(|(weekday, date)| {
      let tasks =
        day_tasks(&props.tasks, *date);
      let total = format_day_total(
        day_total_minutes(&tasks)
      );
      let today =
        *date == props.today;
      html! {
        <div
          class={classes!(
            "day-header",
            today.then_some("today")
          )}
        >
          <div>
            { format!(
              "{} {}",
              DAY_NAMES[weekday],
              date.day()
            ) }
          </div>
          <div class="day-total">
            { total }
          </div>
        </div>
      }
    });

  let columns = props
    .week
    .iter()
    .map(|date| {
      let date = *date;
      let tasks =
        day_tasks(&props.tasks, date);
      let layout =
        day_layout(&tasks);

      let cells = (0..SLOT_COUNT)
        .map(|index| {
          let occupied = tasks
            .iter()
            .find(|task| {
              match (
                task.start_index(),
                task.end_index()
              ) {
                | (
                  Some(start),
                  Some(end)
                ) => {
                  start <= index
                    && index < end
                }
                | _ => false
              }
            })
            .map(|task| {
              task.id.clone()
            });
          let on_slot_click = props
            .on_slot_click
            .clone();
          let on_task_open = props
            .on_task_open
            .clone();
          let onclick =
            Callback::from(
              move |event: yew::events::MouseEvent| {
                // A covered slot
                // opens the task;
                // only empty slots
                // get the add-here
                // affordance.
                if let Some(id) =
                  &occupied
                {
                  on_task_open.emit(
                    id.clone()
                  );
                  return;
                }
                let Some(rect) =
                  event
                    .target()
                    .and_then(|t| {
                      t.dyn_into::<Element>()
                        .ok()
                    })
                    .map(|cell| {
                      cell
                        .get_bounding_client_rect()
                    })
                else {
                  return;
                };
                on_slot_click.emit((
                  date,
                  index,
                  OverlayRect {
                    x:     rect.x(),
                    y:     rect.y(),
                    width: rect
                      .width()
                  }
                ));
              }
            );
          html! {
            <div
              class={classes!(
                "slot-cell",
                ((index + 1) % 4
                  == 0)
                  .then_some("hour")
              )}
              style={format!(
                "height: {}px;",
                props.slot_height
              )}
              onclick={onclick}
            />
          }
        });

      let cards = tasks
        .iter()
        .filter_map(|task| {
          let slot = layout
            .get(&task.id)
            .copied()?;
          Some(html! {
            <crate::components::TaskCard
              key={task.id.clone()}
              task={task.clone()}
              layout={slot}
              slot_height={
                props.slot_height
              }
              on_open={
                props
                  .on_task_open
                  .clone()
              }
              on_press={
                props
                  .on_task_press
                  .clone()
              }
              on_menu={
                props
                  .on_task_menu
                  .clone()
              }
            />
          })
        })
        .collect::<Html>();

      let now_line = (date
        == props.today)
        .then(|| {
          props.now_offset_px.map(
            |offset| {
              html! {
                <div
                  class="now-line"
                  style={format!(
                    "top: {offset}px;"
                  )}
                />
              }
            }
          )
        })
        .flatten();

      html! {
        <div
          class="day-column"
          style={format!(
            "height: {column_height}px;"
          )}
        >
          { for cells }
          { cards }
          { now_line }
        </div>
      }
    });

  html! {
    <div class="calendar-grid">
      <div class="day-header" />
      { for headers }
      { gutter }
      { for columns }
    </div>
  }
}
