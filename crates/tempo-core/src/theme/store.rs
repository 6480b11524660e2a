use serde::{
  Deserialize,
  Serialize
};
use serde_json::Value;

use crate::theme::config::{
  ThemeConfig,
  default_theme
};
use crate::theme::merge::{
  is_full_theme,
  merge_theme
};

/// Snapshot written to storage.
/// When persistence is off the
/// default theme is written in
/// place of the live one, so a
/// reload always comes back clean
/// while the flag itself survives.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTheme {
  pub theme:        ThemeConfig,
  pub is_persisted: bool
}

/// Owns the active theme and the
/// opt-in persistence flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeStore {
  theme:     ThemeConfig,
  persisted: bool
}

impl Default for ThemeStore {
  fn default() -> Self {
    Self {
      theme:     default_theme(),
      persisted: false
    }
  }
}

impl ThemeStore {
  /// Rebuild from a stored
  /// snapshot. The saved theme is
  /// merged over the current
  /// default so slots added since
  /// it was written pick up their
  /// defaults.
  pub fn from_persisted(
    snapshot: PersistedTheme
  ) -> Self {
    let patch =
      match serde_json::to_value(
        &snapshot.theme
      ) {
        | Ok(value) => value,
        | Err(err) => {
          tracing::warn!(
            %err,
            "stored theme \
             unreadable"
          );
          Value::Null
        }
      };
    Self {
      theme:     merge_theme(
        &default_theme(),
        &patch
      ),
      persisted: snapshot
        .is_persisted
    }
  }

  pub fn theme(&self) -> &ThemeConfig {
    &self.theme
  }

  pub fn persisted(&self) -> bool {
    self.persisted
  }

  /// Apply a free-form update. A
  /// payload that looks like a
  /// whole theme rebases onto the
  /// default so stale slots from
  /// the previous theme cannot
  /// leak through; smaller patches
  /// layer onto the current theme.
  pub fn update(
    &mut self,
    patch: &Value
  ) {
    let base =
      if is_full_theme(patch) {
        tracing::debug!(
          "full theme replace"
        );
        default_theme()
      } else {
        self.theme.clone()
      };
    self.theme =
      merge_theme(&base, patch);
  }

  pub fn reset_to_default(
    &mut self,
    base: Option<ThemeConfig>
  ) {
    self.theme = base
      .unwrap_or_else(
        default_theme
      );
  }

  /// Flip the persistence opt-in.
  /// Returns true when the stored
  /// snapshot should be deleted.
  pub fn set_persisted(
    &mut self,
    persist: bool
  ) -> bool {
    self.persisted = persist;
    !persist
  }

  pub fn persisted_payload(
    &self
  ) -> PersistedTheme {
    let theme = if self.persisted {
      self.theme.clone()
    } else {
      default_theme()
    };
    PersistedTheme {
      theme,
      is_persisted: self.persisted
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::theme::config::ColorValue;

  fn full_patch() -> Value {
    let mut theme =
      serde_json::to_value(
        default_theme()
      )
      .expect("serializable");
    theme["name"] =
      json!("midnight");
    theme["colors"]["primary"]
      ["color"] =
      json!("#0f172a");
    theme
  }

  #[test]
  fn partial_update_layers_on_current()
  {
    let mut store =
      ThemeStore::default();
    store.update(&json!({
      "colors": { "ring": "#f59e0b" }
    }));
    store.update(&json!({
      "colors": {
        "border": "#94a3b8"
      }
    }));
    // Both edits stick.
    assert_eq!(
      store.theme().colors.ring,
      ColorValue::Plain(
        "#f59e0b".to_string()
      )
    );
    assert_eq!(
      store.theme().colors.border,
      ColorValue::Plain(
        "#94a3b8".to_string()
      )
    );
  }

  #[test]
  fn full_update_rebases_on_default()
  {
    let mut store =
      ThemeStore::default();
    store.update(&json!({
      "colors": { "ring": "#f59e0b" }
    }));
    store.update(&full_patch());
    assert_eq!(
      store.theme().name,
      "midnight"
    );
    // The earlier partial edit is
    // gone: the import replaced
    // the theme.
    assert_eq!(
      store.theme().colors.ring,
      ColorValue::Plain(
        "var(--ring)".to_string()
      )
    );
  }

  #[test]
  fn reset_restores_default() {
    let mut store =
      ThemeStore::default();
    store.update(&full_patch());
    store.reset_to_default(None);
    assert_eq!(
      store.theme(),
      &default_theme()
    );
  }

  #[test]
  fn payload_hides_theme_unless_opted_in()
  {
    let mut store =
      ThemeStore::default();
    store.update(&full_patch());

    let payload =
      store.persisted_payload();
    assert!(!payload.is_persisted);
    assert_eq!(
      payload.theme,
      default_theme()
    );

    store.set_persisted(true);
    let payload =
      store.persisted_payload();
    assert!(payload.is_persisted);
    assert_eq!(
      payload.theme.name,
      "midnight"
    );
  }

  #[test]
  fn disabling_persistence_clears_storage()
  {
    let mut store =
      ThemeStore::default();
    assert!(
      !store.set_persisted(true)
    );
    assert!(
      store.set_persisted(false)
    );
  }

  #[test]
  fn rehydration_merges_over_default()
  {
    let mut store =
      ThemeStore::default();
    store.update(&full_patch());
    store.set_persisted(true);

    let restored =
      ThemeStore::from_persisted(
        store.persisted_payload()
      );
    assert_eq!(
      restored.theme().name,
      "midnight"
    );
    assert_eq!(
      restored
        .theme()
        .colors
        .primary
        .color,
      ColorValue::Plain(
        "#0f172a".to_string()
      )
    );
    assert!(restored.persisted());
  }
}
