use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ContextMenuProps {
  pub x: f64,
  pub y: f64,
  pub on_duplicate: Callback<()>,
  pub on_delete:    Callback<()>
}

/// Secondary-click menu anchored at
/// the pointer. The app dismisses
/// it on any outside press.
#[function_component(ContextMenu)]
pub fn context_menu(
  props: &ContextMenuProps
) -> Html {
  let style = format!(
    "left: {}px; top: {}px;",
    props.x, props.y
  );
  let on_duplicate =
    props.on_duplicate.clone();
  let on_delete =
    props.on_delete.clone();

  html! {
    <div
      class="context-menu"
      style={style}
      onmousedown={|event: yew::events::MouseEvent| {
        event.stop_propagation();
      }}
    >
      <div
        class="item"
        onclick={move |_| {
          on_duplicate.emit(());
        }}
      >
        { "Duplicate" }
      </div>
      <div
        class="item danger"
        onclick={move |_| {
          on_delete.emit(());
        }}
      >
        { "Delete" }
      </div>
    </div>
  }
}
