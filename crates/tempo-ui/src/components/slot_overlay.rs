use yew::{
  Html,
  Properties,
  function_component,
  html
};

/// Screen rectangle of a clicked
/// slot cell, captured from its
/// bounding box at click time.
#[derive(Clone, PartialEq)]
pub struct OverlayRect {
  pub x:     f64,
  pub y:     f64,
  pub width: f64
}

#[derive(Properties, PartialEq)]
pub struct SlotOverlayProps {
  pub rect:  OverlayRect,
  pub label: String
}

/// Transient "add task here" marker
/// shown over an empty slot while
/// the add dialog opens.
#[function_component(SlotOverlay)]
pub fn slot_overlay(
  props: &SlotOverlayProps
) -> Html {
  let style = format!(
    "left: {}px; top: {}px; \
     min-width: {}px;",
    props.rect.x,
    props.rect.y,
    props.rect.width
  );

  html! {
    <div
      class="slot-overlay"
      style={style}
    >
      { format!(
        "+ Add task at {}",
        props.label
      ) }
    </div>
  }
}
