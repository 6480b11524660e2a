use serde::Deserialize;

const GRID_CONFIG_TOML: &str =
  include_str!(
    "../assets/tempo.toml"
  );

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct GridConfig {
  #[serde(default)]
  pub version: u32,
  #[serde(default)]
  pub grid:    GridSection
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct GridSection {
  #[serde(
    default = "default_slot_height"
  )]
  pub slot_height_px:   f64,
  #[serde(
    default = "default_now_refresh"
  )]
  pub now_refresh_secs: u32,
  #[serde(
    default = "default_auto_scroll"
  )]
  pub auto_scroll:      bool
}

fn default_slot_height() -> f64 {
  80.0
}

fn default_now_refresh() -> u32 {
  60
}

fn default_auto_scroll() -> bool {
  true
}

impl Default for GridSection {
  fn default() -> Self {
    Self {
      slot_height_px:
        default_slot_height(),
      now_refresh_secs:
        default_now_refresh(),
      auto_scroll:
        default_auto_scroll()
    }
  }
}

impl Default for GridConfig {
  fn default() -> Self {
    Self {
      version: 1,
      grid:    GridSection::default()
    }
  }
}

pub fn load_grid_config() -> GridConfig {
  match toml::from_str::<GridConfig>(
    GRID_CONFIG_TOML
  ) {
    | Ok(mut config) => {
      sanitize_grid_config(
        &mut config
      );
      tracing::info!(
        version = config.version,
        slot_height =
          config.grid.slot_height_px,
        "loaded grid config"
      );
      config
    }
    | Err(error) => {
      tracing::error!(%error, "failed parsing grid config; using defaults");
      GridConfig::default()
    }
  }
}

fn sanitize_grid_config(
  config: &mut GridConfig
) {
  let height =
    config.grid.slot_height_px;
  if !(10.0..=200.0)
    .contains(&height)
  {
    config.grid.slot_height_px =
      default_slot_height();
  }
  if config.grid.now_refresh_secs
    == 0
  {
    config.grid.now_refresh_secs =
      default_now_refresh();
  }
}
