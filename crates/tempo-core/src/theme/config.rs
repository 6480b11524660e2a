use serde::{
  Deserialize,
  Serialize
};

/// A color slot. Either one CSS
/// color string (hex, oklch, rgb,
/// hsl, or a `var(--x)` reference)
/// or a per-format object carrying
/// parallel spellings of the same
/// color.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
#[serde(untagged)]
pub enum ColorValue {
  Plain(String),
  Spaces {
    #[serde(
      default,
      skip_serializing_if =
        "Option::is_none"
    )]
    oklch: Option<String>,
    #[serde(
      default,
      skip_serializing_if =
        "Option::is_none"
    )]
    hex:   Option<String>,
    #[serde(
      default,
      skip_serializing_if =
        "Option::is_none"
    )]
    rgb:   Option<String>,
    #[serde(
      default,
      skip_serializing_if =
        "Option::is_none"
    )]
    hsl:   Option<String>
  }
}

impl ColorValue {
  /// The single string this slot
  /// contributes to a stylesheet.
  /// Format objects prefer oklch,
  /// then hex, rgb, hsl.
  pub fn as_css(&self) -> &str {
    match self {
      | Self::Plain(s) => s,
      | Self::Spaces {
        oklch,
        hex,
        rgb,
        hsl
      } => {
        oklch
          .as_deref()
          .or(hex.as_deref())
          .or(rgb.as_deref())
          .or(hsl.as_deref())
          .unwrap_or("")
      }
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct SemanticColorPair {
  pub color:      ColorValue,
  pub foreground: ColorValue
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ChartColors {
  #[serde(rename = "1")]
  pub c1: ColorValue,
  #[serde(rename = "2")]
  pub c2: ColorValue,
  #[serde(rename = "3")]
  pub c3: ColorValue,
  #[serde(rename = "4")]
  pub c4: ColorValue,
  #[serde(rename = "5")]
  pub c5: ColorValue
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct SidebarColors {
  pub background: ColorValue,
  pub foreground: ColorValue,
  pub primary: SemanticColorPair,
  pub accent:  SemanticColorPair,
  pub border:  ColorValue,
  pub ring:    ColorValue
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ThemeColors {
  pub primary:     SemanticColorPair,
  pub secondary:   SemanticColorPair,
  pub tertiary:    SemanticColorPair,
  pub accent:      SemanticColorPair,
  pub destructive: SemanticColorPair,
  pub success:     SemanticColorPair,
  pub warning:     SemanticColorPair,
  pub info:        SemanticColorPair,
  pub muted:       SemanticColorPair,
  /// `foreground` here is the page
  /// text color, published as
  /// `--foreground`.
  pub background:  SemanticColorPair,
  pub card:        SemanticColorPair,
  pub popover:     SemanticColorPair,
  pub border:      ColorValue,
  pub input:       ColorValue,
  pub ring:        ColorValue,
  #[serde(
    default,
    skip_serializing_if =
      "Option::is_none"
  )]
  pub chart: Option<ChartColors>,
  #[serde(
    default,
    skip_serializing_if =
      "Option::is_none"
  )]
  pub sidebar: Option<SidebarColors>
}

/// Nine shades of one hue, keyed
/// 100 (lightest) through 900.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ColorFamily {
  #[serde(rename = "100")]
  pub c100: ColorValue,
  #[serde(rename = "200")]
  pub c200: ColorValue,
  #[serde(rename = "300")]
  pub c300: ColorValue,
  #[serde(rename = "400")]
  pub c400: ColorValue,
  #[serde(rename = "500")]
  pub c500: ColorValue,
  #[serde(rename = "600")]
  pub c600: ColorValue,
  #[serde(rename = "700")]
  pub c700: ColorValue,
  #[serde(rename = "800")]
  pub c800: ColorValue,
  #[serde(rename = "900")]
  pub c900: ColorValue
}

impl ColorFamily {
  pub fn shades(
    &self
  ) -> [(&'static str, &ColorValue);
       9] {
    [
      ("100", &self.c100),
      ("200", &self.c200),
      ("300", &self.c300),
      ("400", &self.c400),
      ("500", &self.c500),
      ("600", &self.c600),
      ("700", &self.c700),
      ("800", &self.c800),
      ("900", &self.c900)
    ]
  }
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ColorFamilies {
  #[serde(
    default,
    skip_serializing_if =
      "Option::is_none"
  )]
  pub navy:   Option<ColorFamily>,
  #[serde(
    default,
    skip_serializing_if =
      "Option::is_none"
  )]
  pub blue:   Option<ColorFamily>,
  #[serde(
    default,
    skip_serializing_if =
      "Option::is_none"
  )]
  pub cyan:   Option<ColorFamily>,
  #[serde(
    default,
    skip_serializing_if =
      "Option::is_none"
  )]
  pub green:  Option<ColorFamily>,
  #[serde(
    default,
    skip_serializing_if =
      "Option::is_none"
  )]
  pub info:   Option<ColorFamily>,
  #[serde(
    default,
    skip_serializing_if =
      "Option::is_none"
  )]
  pub yellow: Option<ColorFamily>,
  #[serde(
    default,
    skip_serializing_if =
      "Option::is_none"
  )]
  pub red:    Option<ColorFamily>,
  #[serde(
    default,
    skip_serializing_if =
      "Option::is_none"
  )]
  pub gray:   Option<ColorFamily>
}

impl ColorFamilies {
  pub fn entries(
    &self
  ) -> [(&'static str,
       Option<&ColorFamily>); 8]
  {
    [
      ("navy", self.navy.as_ref()),
      ("blue", self.blue.as_ref()),
      ("cyan", self.cyan.as_ref()),
      ("green", self.green.as_ref()),
      ("info", self.info.as_ref()),
      (
        "yellow",
        self.yellow.as_ref()
      ),
      ("red", self.red.as_ref()),
      ("gray", self.gray.as_ref())
    ]
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct RadiusScale {
  pub sm:  String,
  pub md:  String,
  pub lg:  String,
  pub xl:  String,
  #[serde(rename = "2xl")]
  pub xxl: String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
  pub name:   String,
  pub colors: ThemeColors,
  #[serde(
    default,
    skip_serializing_if =
      "Option::is_none"
  )]
  pub color_families:
    Option<ColorFamilies>,
  #[serde(
    default,
    skip_serializing_if =
      "Option::is_none"
  )]
  pub radius: Option<RadiusScale>
}

/// Every custom property the engine
/// may publish; cleared in bulk
/// when a theme is reset.
pub const THEME_VARIABLES:
  &[&str] = &[
  "--primary",
  "--primary-foreground",
  "--secondary",
  "--secondary-foreground",
  "--tertiary",
  "--tertiary-foreground",
  "--accent",
  "--accent-foreground",
  "--destructive",
  "--destructive-foreground",
  "--success",
  "--success-foreground",
  "--warning",
  "--warning-foreground",
  "--info",
  "--info-foreground",
  "--muted",
  "--muted-foreground",
  "--background",
  "--foreground",
  "--card",
  "--card-foreground",
  "--popover",
  "--popover-foreground",
  "--border",
  "--input",
  "--ring",
  "--chart-1",
  "--chart-2",
  "--chart-3",
  "--chart-4",
  "--chart-5",
  "--sidebar",
  "--sidebar-foreground",
  "--sidebar-primary",
  "--sidebar-primary-foreground",
  "--sidebar-accent",
  "--sidebar-accent-foreground",
  "--sidebar-border",
  "--sidebar-ring"
];

/// True when `value` is a var()
/// reference back to `name` itself.
/// Writing those would shadow the
/// stylesheet definition with a
/// circular inline one.
pub fn is_self_reference(
  name: &str,
  value: &str
) -> bool {
  crate::theme::color::css_var_name(
    value
  )
  .map(|referenced| {
    referenced
      .trim_start_matches("--")
      == name
  })
  .unwrap_or(false)
}

impl ThemeConfig {
  /// Flattens the document into
  /// `(property, value)` pairs
  /// ready to publish on `:root`.
  /// Self-references are dropped;
  /// the stylesheet already defines
  /// those.
  pub fn css_variables(
    &self
  ) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut push =
      |name: &str, value: &str| {
        if !is_self_reference(
          name, value
        ) {
          out.push((
            format!("--{name}"),
            value.to_string()
          ));
        }
      };

    let c = &self.colors;
    let pairs: [(&str,
      &SemanticColorPair);
      12] = [
      ("primary", &c.primary),
      ("secondary", &c.secondary),
      ("tertiary", &c.tertiary),
      ("accent", &c.accent),
      (
        "destructive",
        &c.destructive
      ),
      ("success", &c.success),
      ("warning", &c.warning),
      ("info", &c.info),
      ("muted", &c.muted),
      ("background", &c.background),
      ("card", &c.card),
      ("popover", &c.popover)
    ];
    for (name, pair) in pairs {
      push(
        name,
        pair.color.as_css()
      );
      let fg_name =
        if name == "background" {
          "foreground".to_string()
        } else {
          format!(
            "{name}-foreground"
          )
        };
      push(
        &fg_name,
        pair.foreground.as_css()
      );
    }
    push(
      "border",
      c.border.as_css()
    );
    push("input", c.input.as_css());
    push("ring", c.ring.as_css());

    if let Some(chart) = &c.chart {
      push(
        "chart-1",
        chart.c1.as_css()
      );
      push(
        "chart-2",
        chart.c2.as_css()
      );
      push(
        "chart-3",
        chart.c3.as_css()
      );
      push(
        "chart-4",
        chart.c4.as_css()
      );
      push(
        "chart-5",
        chart.c5.as_css()
      );
    }

    if let Some(sidebar) =
      &c.sidebar
    {
      push(
        "sidebar",
        sidebar.background.as_css()
      );
      push(
        "sidebar-foreground",
        sidebar.foreground.as_css()
      );
      push(
        "sidebar-primary",
        sidebar
          .primary
          .color
          .as_css()
      );
      push(
        "sidebar-primary-foreground",
        sidebar
          .primary
          .foreground
          .as_css()
      );
      push(
        "sidebar-accent",
        sidebar
          .accent
          .color
          .as_css()
      );
      push(
        "sidebar-accent-foreground",
        sidebar
          .accent
          .foreground
          .as_css()
      );
      push(
        "sidebar-border",
        sidebar.border.as_css()
      );
      push(
        "sidebar-ring",
        sidebar.ring.as_css()
      );
    }

    if let Some(radius) =
      &self.radius
    {
      push("radius-sm", &radius.sm);
      push("radius-md", &radius.md);
      push("radius-lg", &radius.lg);
      push("radius-xl", &radius.xl);
      push(
        "radius-2xl",
        &radius.xxl
      );
    }

    if let Some(families) =
      &self.color_families
    {
      for (family, shades) in
        families.entries()
      {
        let Some(shades) = shades
        else {
          continue;
        };
        for (shade, color) in
          shades.shades()
        {
          push(
            &format!(
              "{family}-{shade}"
            ),
            color.as_css()
          );
        }
      }
    }

    out
  }
}

fn var_ref(name: &str) -> ColorValue {
  ColorValue::Plain(format!(
    "var(--{name})"
  ))
}

fn var_pair(
  color: &str,
  foreground: &str
) -> SemanticColorPair {
  SemanticColorPair {
    color:      var_ref(color),
    foreground: var_ref(foreground)
  }
}

fn var_family(
  name: &str
) -> ColorFamily {
  let shade = |s: u32| {
    var_ref(&format!("{name}-{s}"))
  };
  ColorFamily {
    c100: shade(100),
    c200: shade(200),
    c300: shade(300),
    c400: shade(400),
    c500: shade(500),
    c600: shade(600),
    c700: shade(700),
    c800: shade(800),
    c900: shade(900)
  }
}

/// The built-in theme. Every slot
/// points back at the stylesheet
/// variable of the same name, so
/// applying it is a no-op until the
/// user edits a color.
pub fn default_theme() -> ThemeConfig {
  ThemeConfig {
    name:   "default".to_string(),
    colors: ThemeColors {
      primary: var_pair(
        "primary",
        "primary-foreground"
      ),
      secondary: var_pair(
        "secondary",
        "secondary-foreground"
      ),
      tertiary: var_pair(
        "tertiary",
        "tertiary-foreground"
      ),
      accent: var_pair(
        "accent",
        "accent-foreground"
      ),
      destructive: var_pair(
        "destructive",
        "destructive-foreground"
      ),
      success: var_pair(
        "success",
        "success-foreground"
      ),
      warning: var_pair(
        "warning",
        "warning-foreground"
      ),
      info: var_pair(
        "info",
        "info-foreground"
      ),
      muted: var_pair(
        "muted",
        "muted-foreground"
      ),
      background: var_pair(
        "background",
        "foreground"
      ),
      card: var_pair(
        "card",
        "card-foreground"
      ),
      popover: var_pair(
        "popover",
        "popover-foreground"
      ),
      border: var_ref("border"),
      input: var_ref("input"),
      ring: var_ref("ring"),
      chart: Some(ChartColors {
        c1: var_ref("chart-1"),
        c2: var_ref("chart-2"),
        c3: var_ref("chart-3"),
        c4: var_ref("chart-4"),
        c5: var_ref("chart-5")
      }),
      sidebar: Some(SidebarColors {
        background: var_ref(
          "sidebar"
        ),
        foreground: var_ref(
          "sidebar-foreground"
        ),
        primary: var_pair(
          "sidebar-primary",
          "sidebar-primary-foreground"
        ),
        accent: var_pair(
          "sidebar-accent",
          "sidebar-accent-foreground"
        ),
        border: var_ref(
          "sidebar-border"
        ),
        ring: var_ref(
          "sidebar-ring"
        )
      })
    },
    color_families: Some(
      ColorFamilies {
        navy: Some(var_family(
          "navy"
        )),
        blue: Some(var_family(
          "blue"
        )),
        cyan: Some(var_family(
          "cyan"
        )),
        green: Some(var_family(
          "green"
        )),
        info: Some(var_family(
          "info"
        )),
        yellow: Some(var_family(
          "yellow"
        )),
        red: Some(var_family("red")),
        gray: Some(var_family(
          "gray"
        ))
      }
    ),
    radius: Some(RadiusScale {
      sm:  "var(--radius-sm)"
        .to_string(),
      md:  "var(--radius-md)"
        .to_string(),
      lg:  "var(--radius-lg)"
        .to_string(),
      xl:  "var(--radius-xl)"
        .to_string(),
      xxl: "var(--radius-2xl)"
        .to_string()
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn color_value_prefers_oklch() {
    let spaces = ColorValue::Spaces {
      oklch: Some(
        "oklch(0.7 0.1 250)"
          .to_string()
      ),
      hex:   Some(
        "#336699".to_string()
      ),
      rgb:   None,
      hsl:   None
    };
    assert_eq!(
      spaces.as_css(),
      "oklch(0.7 0.1 250)"
    );
    let hex_only =
      ColorValue::Spaces {
        oklch: None,
        hex:   Some(
          "#336699".to_string()
        ),
        rgb:   None,
        hsl:   None
      };
    assert_eq!(
      hex_only.as_css(),
      "#336699"
    );
  }

  #[test]
  fn untagged_color_value_round_trip()
  {
    let plain: ColorValue =
      serde_json::from_str(
        "\"#aabbcc\""
      )
      .expect("plain string");
    assert_eq!(
      plain,
      ColorValue::Plain(
        "#aabbcc".to_string()
      )
    );
    let spaces: ColorValue =
      serde_json::from_str(
        r##"{"hex":"#aabbcc"}"##
      )
      .expect("format object");
    assert_eq!(
      spaces.as_css(),
      "#aabbcc"
    );
  }

  #[test]
  fn default_theme_is_all_self_references()
  {
    // Applying the default theme
    // must publish nothing.
    assert!(
      default_theme()
        .css_variables()
        .is_empty()
    );
  }

  #[test]
  fn foreground_of_background_is_foreground()
  {
    let mut theme = default_theme();
    theme.colors.background =
      SemanticColorPair {
        color:      ColorValue::Plain(
          "#ffffff".to_string()
        ),
        foreground: ColorValue::Plain(
          "#111111".to_string()
        )
      };
    let vars =
      theme.css_variables();
    assert!(vars.contains(&(
      "--background".to_string(),
      "#ffffff".to_string()
    )));
    assert!(vars.contains(&(
      "--foreground".to_string(),
      "#111111".to_string()
    )));
  }

  #[test]
  fn cross_references_are_kept() {
    // var(--blue-500) under the
    // `primary` slot is not a self
    // reference.
    let mut theme = default_theme();
    theme.colors.primary.color =
      ColorValue::Plain(
        "var(--blue-500)"
          .to_string()
      );
    assert!(theme
      .css_variables()
      .contains(&(
        "--primary".to_string(),
        "var(--blue-500)"
          .to_string()
      )));
  }

  #[test]
  fn family_shades_flatten_to_vars()
  {
    let mut theme = default_theme();
    if let Some(families) =
      theme.color_families.as_mut()
      && let Some(red) =
        families.red.as_mut()
    {
      red.c500 = ColorValue::Plain(
        "#ef4444".to_string()
      );
    }
    assert!(theme
      .css_variables()
      .contains(&(
        "--red-500".to_string(),
        "#ef4444".to_string()
      )));
  }

  #[test]
  fn camel_case_wire_format() {
    let json = serde_json::to_value(
      default_theme()
    )
    .expect("serializable");
    assert!(
      json
        .get("colorFamilies")
        .is_some()
    );
    assert!(
      json["radius"]
        .get("2xl")
        .is_some()
    );
    assert!(
      json["colors"]["chart"]
        .get("1")
        .is_some()
    );
  }
}
