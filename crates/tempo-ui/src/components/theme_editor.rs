use std::collections::BTreeMap;

use serde_json::{
  Value,
  json
};
use tempo_core::theme::color::{
  to_display_string,
  to_editable_hex
};
use tempo_core::theme::config::{
  ColorValue,
  SemanticColorPair,
  ThemeConfig
};
use web_sys::HtmlInputElement;
use yew::events::{
  Event,
  InputEvent,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

use crate::theme_apply::collect_root_rules;

#[derive(Properties, PartialEq)]
pub struct ThemeEditorProps {
  pub theme: ThemeConfig,
  pub persisted: bool,
  /// Sparse patch in the theme's
  /// wire shape, merged by the
  /// store.
  pub on_update: Callback<Value>,
  pub on_reset: Callback<()>,
  pub on_toggle_persist:
    Callback<bool>,
  pub on_close: Callback<()>
}

/// Wraps `value` in nested objects
/// so it lands at `path` when
/// deep-merged into a theme.
fn nested(
  path: &[String],
  value: Value
) -> Value {
  let mut out = value;
  for key in path.iter().rev() {
    out = json!({ key.as_str(): out });
  }
  out
}

fn swatch_row(
  label: String,
  color: &ColorValue,
  path: Vec<String>,
  rules: &BTreeMap<String, String>,
  on_update: &Callback<Value>
) -> Html {
  let hex =
    to_editable_hex(color, rules);
  let display =
    to_display_string(color, rules);

  let on_pick = {
    let path = path.clone();
    let on_update = on_update.clone();
    Callback::from(
      move |event: InputEvent| {
        if let Some(input) = event
          .target_dyn_into::<HtmlInputElement>(
          )
        {
          on_update.emit(nested(
            &path,
            Value::String(
              input.value()
            )
          ));
        }
      }
    )
  };
  let on_text = {
    let on_update = on_update.clone();
    Callback::from(
      move |event: Event| {
        if let Some(input) = event
          .target_dyn_into::<HtmlInputElement>(
          )
        {
          let raw = input
            .value()
            .trim()
            .to_string();
          if !raw.is_empty() {
            on_update.emit(nested(
              &path,
              Value::String(raw)
            ));
          }
        }
      }
    )
  };

  html! {
    <div class="swatch-row">
      <span>{ label }</span>
      <input
        type="color"
        value={hex}
        oninput={on_pick}
      />
      <input
        type="text"
        value={display}
        onchange={on_text}
      />
    </div>
  }
}

fn pair_rows(
  name: &str,
  pair: &SemanticColorPair,
  rules: &BTreeMap<String, String>,
  on_update: &Callback<Value>
) -> Html {
  let base = vec![
    "colors".to_string(),
    name.to_string(),
  ];
  let mut color_path = base.clone();
  color_path.push(
    "color".to_string()
  );
  let mut fg_path = base;
  fg_path.push(
    "foreground".to_string()
  );
  html! {
    <>
      { swatch_row(
        name.to_string(),
        &pair.color,
        color_path,
        rules,
        on_update
      ) }
      { swatch_row(
        format!(
          "{name} foreground"
        ),
        &pair.foreground,
        fg_path,
        rules,
        on_update
      ) }
    </>
  }
}

#[function_component(ThemeEditor)]
pub fn theme_editor(
  props: &ThemeEditorProps
) -> Html {
  let rules = collect_root_rules();

  let c = &props.theme.colors;
  let pairs: [(&str,
    &SemanticColorPair);
    12] = [
    ("primary", &c.primary),
    ("secondary", &c.secondary),
    ("tertiary", &c.tertiary),
    ("accent", &c.accent),
    ("destructive", &c.destructive),
    ("success", &c.success),
    ("warning", &c.warning),
    ("info", &c.info),
    ("muted", &c.muted),
    ("background", &c.background),
    ("card", &c.card),
    ("popover", &c.popover)
  ];
  let semantic_rows = pairs
    .iter()
    .map(|(name, pair)| {
      pair_rows(
        name,
        pair,
        &rules,
        &props.on_update
      )
    })
    .collect::<Html>();

  let flat_rows = [
    ("border", &c.border),
    ("input", &c.input),
    ("ring", &c.ring)
  ]
  .iter()
  .map(|(name, color)| {
    swatch_row(
      name.to_string(),
      color,
      vec![
        "colors".to_string(),
        name.to_string(),
      ],
      &rules,
      &props.on_update
    )
  })
  .collect::<Html>();

  let family_rows = props
    .theme
    .color_families
    .as_ref()
    .map(|families| {
      families
        .entries()
        .iter()
        .filter_map(
          |(family, shades)| {
            let shades =
              (*shades)?;
            let rows = shades
              .shades()
              .into_iter()
              .map(
                |(shade, color)| {
                  swatch_row(
                    format!(
                      "{family}-{shade}"
                    ),
                    color,
                    vec![
                      "colorFamilies"
                        .to_string(),
                      family
                        .to_string(),
                      shade
                        .to_string(),
                    ],
                    &rules,
                    &props.on_update
                  )
                }
              )
              .collect::<Html>();
            Some(html! {
              <details>
                <summary>
                  { *family }
                </summary>
                { rows }
              </details>
            })
          }
        )
        .collect::<Html>()
    })
    .unwrap_or_default();

  let on_persist = {
    let on_toggle_persist = props
      .on_toggle_persist
      .clone();
    Callback::from(
      move |event: Event| {
        if let Some(input) = event
          .target_dyn_into::<HtmlInputElement>(
          )
        {
          on_toggle_persist
            .emit(input.checked());
        }
      }
    )
  };
  let on_reset = {
    let on_reset =
      props.on_reset.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_reset.emit(());
      }
    )
  };
  let on_close = {
    let on_close =
      props.on_close.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_close.emit(());
      }
    )
  };

  html! {
    <aside class="theme-editor">
      <div class="row">
        <h2>{ "Theme" }</h2>
        <button
          type="button"
          onclick={on_close}
        >
          { "Close" }
        </button>
      </div>

      <label class="persist-row">
        <input
          type="checkbox"
          checked={props.persisted}
          onchange={on_persist}
        />
        { "Remember my theme" }
      </label>

      <h3>{ "Colors" }</h3>
      { semantic_rows }
      { flat_rows }

      <h3>{ "Palettes" }</h3>
      { family_rows }

      <button
        type="button"
        onclick={on_reset}
      >
        { "Reset to Default" }
      </button>
    </aside>
  }
}
