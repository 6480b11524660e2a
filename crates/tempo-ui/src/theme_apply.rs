use std::collections::BTreeMap;

use wasm_bindgen::JsCast;
use web_sys::CssStyleRule;
use tempo_core::theme::config::{
  THEME_VARIABLES,
  ThemeConfig
};

fn root_element()
-> Option<web_sys::HtmlElement> {
  web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| {
      document.document_element()
    })
    .and_then(|element| {
      element
        .dyn_into::<
          web_sys::HtmlElement
        >()
        .ok()
    })
}

/// Snapshot of every custom
/// property declared on `:root`,
/// inline overrides included.
/// Reading the authored rule text
/// (rather than computed style)
/// keeps perceptual color syntax
/// intact.
pub fn collect_root_rules()
-> BTreeMap<String, String> {
  let mut rules = BTreeMap::new();
  let Some(document) =
    web_sys::window().and_then(
      |window| window.document()
    )
  else {
    return rules;
  };

  let sheets =
    document.style_sheets();
  for i in 0..sheets.length() {
    let Some(sheet) = sheets
      .item(i)
      .and_then(|sheet| {
        sheet
          .dyn_into::<
            web_sys::CssStyleSheet
          >()
          .ok()
      })
    else {
      continue;
    };
    // Cross-origin sheets refuse
    // access to their rules.
    let Ok(css_rules) =
      sheet.css_rules()
    else {
      continue;
    };
    for j in 0..css_rules.length() {
      let Some(rule) = css_rules
        .item(j)
        .and_then(|rule| {
          rule
            .dyn_into::<CssStyleRule>()
            .ok()
        })
      else {
        continue;
      };
      if rule.selector_text()
        != ":root"
      {
        continue;
      }
      let style = rule.style();
      for k in 0..style.length() {
        let name = style.item(k);
        if !name.starts_with("--") {
          continue;
        }
        if let Ok(value) = style
          .get_property_value(&name)
        {
          rules.insert(
            name,
            value
              .trim()
              .to_string()
          );
        }
      }
    }
  }

  // Inline overrides written by a
  // previous apply pass win.
  if let Some(root) = root_element()
  {
    let style = root.style();
    for k in 0..style.length() {
      let name = style.item(k);
      if !name.starts_with("--") {
        continue;
      }
      if let Ok(value) = style
        .get_property_value(&name)
      {
        rules.insert(
          name,
          value.trim().to_string()
        );
      }
    }
  }

  rules
}

/// Publish the theme's variables as
/// inline custom properties on the
/// document root.
pub fn apply_theme(
  theme: &ThemeConfig
) {
  let Some(root) = root_element()
  else {
    return;
  };
  let style = root.style();
  for (name, value) in
    theme.css_variables()
  {
    if let Err(error) = style
      .set_property(&name, &value)
    {
      tracing::warn!(
        ?error,
        name,
        "failed setting css \
         variable"
      );
    }
  }
}

/// Drop every inline override so
/// the stylesheet defaults show
/// through again.
pub fn clear_theme() {
  let Some(root) = root_element()
  else {
    return;
  };
  let style = root.style();
  for name in THEME_VARIABLES {
    let _ =
      style.remove_property(name);
  }
}
