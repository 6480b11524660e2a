use serde_json::Value;

use crate::theme::config::{
  ThemeConfig,
  default_theme
};

/// Recursive object merge. Patch
/// objects overlay base objects
/// key by key; any other patch
/// value replaces the base
/// outright. Nulls in the patch
/// leave the base value alone, so
/// a sparse document never blanks
/// a slot.
pub fn deep_merge(
  base: &mut Value,
  patch: &Value
) {
  match (base, patch) {
    | (
      Value::Object(base),
      Value::Object(patch)
    ) => {
      for (key, value) in patch {
        if value.is_null() {
          continue;
        }
        match base.get_mut(key) {
          | Some(slot) => {
            deep_merge(
              slot, value
            );
          }
          | None => {
            base.insert(
              key.clone(),
              value.clone()
            );
          }
        }
      }
    }
    | (base, patch) => {
      if !patch.is_null() {
        *base = patch.clone();
      }
    }
  }
}

/// A payload with a name and a
/// substantially populated color
/// table counts as a whole theme
/// (an import or preset); anything
/// smaller is an edit to the
/// current one.
pub fn is_full_theme(
  patch: &Value
) -> bool {
  patch
    .get("name")
    .is_some_and(|n| !n.is_null())
    && patch
      .get("colors")
      .and_then(Value::as_object)
      .is_some_and(|colors| {
        colors.len() > 5
      })
}

/// Overlay a free-form patch onto a
/// base config. Falls back to the
/// base when the merged document no
/// longer deserializes, and to the
/// default theme if even the base
/// cannot serialize.
pub fn merge_theme(
  base: &ThemeConfig,
  patch: &Value
) -> ThemeConfig {
  let mut merged =
    match serde_json::to_value(base)
    {
      | Ok(value) => value,
      | Err(err) => {
        tracing::error!(
          %err,
          "theme not serializable"
        );
        return default_theme();
      }
    };
  deep_merge(&mut merged, patch);
  match serde_json::from_value(
    merged
  ) {
    | Ok(theme) => theme,
    | Err(err) => {
      tracing::warn!(
        %err,
        "discarding malformed \
         theme patch"
      );
      base.clone()
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::theme::config::ColorValue;

  #[test]
  fn nested_keys_survive_a_sparse_patch()
  {
    let mut base = json!({
      "primary": {
        "color": "#111111",
        "foreground": "#eeeeee"
      }
    });
    deep_merge(
      &mut base,
      &json!({
        "primary": {
          "color": "#222222"
        }
      })
    );
    assert_eq!(
      base["primary"]["color"],
      "#222222"
    );
    assert_eq!(
      base["primary"]
        ["foreground"],
      "#eeeeee"
    );
  }

  #[test]
  fn null_patch_values_are_ignored()
  {
    let mut base =
      json!({ "name": "default" });
    deep_merge(
      &mut base,
      &json!({ "name": null })
    );
    assert_eq!(
      base["name"],
      "default"
    );
  }

  #[test]
  fn scalars_replace_wholesale() {
    let mut base =
      json!({ "radius": "4px" });
    deep_merge(
      &mut base,
      &json!({ "radius": {
        "sm": "2px"
      } })
    );
    assert_eq!(
      base["radius"]["sm"],
      "2px"
    );
  }

  #[test]
  fn full_theme_detection() {
    assert!(is_full_theme(&json!({
      "name": "ocean",
      "colors": {
        "primary": {},
        "secondary": {},
        "accent": {},
        "muted": {},
        "border": "#000",
        "ring": "#000"
      }
    })));
    // Too few color keys: an edit,
    // not an import.
    assert!(!is_full_theme(
      &json!({
        "name": "ocean",
        "colors": {
          "primary": {}
        }
      })
    ));
    assert!(!is_full_theme(
      &json!({
        "colors": {}
      })
    ));
  }

  #[test]
  fn merge_patches_one_slot() {
    let base = default_theme();
    let merged = merge_theme(
      &base,
      &json!({
        "colors": {
          "primary": {
            "color": "#7c3aed"
          }
        }
      })
    );
    assert_eq!(
      merged.colors.primary.color,
      ColorValue::Plain(
        "#7c3aed".to_string()
      )
    );
    // The paired foreground keeps
    // its default reference.
    assert_eq!(
      merged
        .colors
        .primary
        .foreground,
      base
        .colors
        .primary
        .foreground
    );
  }

  #[test]
  fn malformed_patch_keeps_base() {
    let base = default_theme();
    let merged = merge_theme(
      &base,
      &json!({ "colors": 7 })
    );
    assert_eq!(merged, base);
  }
}
