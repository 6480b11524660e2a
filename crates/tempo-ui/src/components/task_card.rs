use tempo_core::drag::DragHandle;
use tempo_core::layout::SlotLayout;
use tempo_core::slots::{
  calculate_duration,
  format_time_range
};
use tempo_core::task::Task;
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
  pub task:        Task,
  pub layout:      SlotLayout,
  pub slot_height: f64,
  /// Plain click after a press
  /// that never became a drag.
  pub on_open:  Callback<String>,
  /// Pointer-down on a drag
  /// surface: id, handle, client y.
  pub on_press:
    Callback<(String, DragHandle, f64)>,
  /// Secondary click: id, client
  /// x, client y.
  pub on_menu:
    Callback<(String, f64, f64)>
}

fn pressed_actionable(
  event: &yew::events::MouseEvent
) -> bool {
  event
    .target()
    .and_then(|target| {
      target.dyn_into::<Element>().ok()
    })
    .and_then(|element| {
      element
        .closest("button")
        .ok()
        .flatten()
    })
    .is_some()
}

#[function_component(TaskCard)]
pub fn task_card(
  props: &TaskCardProps
) -> Html {
  let task = &props.task;
  let Some(start) =
    task.start_index()
  else {
    return Html::default();
  };
  let Some(end) = task.end_index()
  else {
    return Html::default();
  };
  if end <= start {
    return Html::default();
  }

  let family = task.color.as_key();
  let style = format!(
    "top: {}px; height: {}px; \
     left: {}%; width: {}%; \
     background: var(--{family}-200); \
     border-left: 3px solid \
     var(--{family}-600); \
     color: var(--{family}-900);",
    start as f64
      * props.slot_height,
    (end - start) as f64
      * props.slot_height,
    props.layout.left_pct(),
    props.layout.width_pct()
  );

  let on_body_press = {
    let on_press =
      props.on_press.clone();
    let id = task.id.clone();
    Callback::from(
      move |event: yew::events::MouseEvent| {
        if event.button() != 0
          || pressed_actionable(
            &event
          )
        {
          return;
        }
        event.prevent_default();
        event.stop_propagation();
        on_press.emit((
          id.clone(),
          DragHandle::Move,
          event.client_y() as f64
        ));
      }
    )
  };
  let handle_press =
    |handle: DragHandle| {
      let on_press =
        props.on_press.clone();
      let id = task.id.clone();
      Callback::from(
        move |event: yew::events::MouseEvent| {
          if event.button() != 0 {
            return;
          }
          event.prevent_default();
          event.stop_propagation();
          on_press.emit((
            id.clone(),
            handle,
            event.client_y() as f64
          ));
        }
      )
    };
  let on_click = {
    let on_open =
      props.on_open.clone();
    let id = task.id.clone();
    Callback::from(
      move |event: yew::events::MouseEvent| {
        event.stop_propagation();
        on_open.emit(id.clone());
      }
    )
  };
  let on_context = {
    let on_menu =
      props.on_menu.clone();
    let id = task.id.clone();
    Callback::from(
      move |event: yew::events::MouseEvent| {
        event.prevent_default();
        event.stop_propagation();
        on_menu.emit((
          id.clone(),
          event.client_x() as f64,
          event.client_y() as f64
        ));
      }
    )
  };

  html! {
    <div
      class="task-card"
      style={style}
      onmousedown={on_body_press}
      onclick={on_click}
      oncontextmenu={on_context}
    >
      <div
        class="handle top"
        onmousedown={handle_press(
          DragHandle::Start
        )}
      />
      <div class="title">
        { task.title.clone() }
      </div>
      <div class="time-range">
        { format!(
          "{} ({})",
          format_time_range(
            &task.start_time,
            &task.end_time
          ),
          calculate_duration(
            &task.start_time,
            &task.end_time
          )
          .unwrap_or_default()
        ) }
      </div>
      <div
        class="handle bottom"
        onmousedown={handle_press(
          DragHandle::End
        )}
      />
    </div>
  }
}
