use std::collections::{
  BTreeMap,
  BTreeSet
};

use crate::theme::config::ColorValue;

/// Fallback for anything that fails
/// to parse; `<input type="color">`
/// rejects everything else.
pub const FALLBACK_HEX: &str =
  "#000000";

/// Extracts the variable name from
/// a `var(--x)` reference, with the
/// leading dashes.
pub fn css_var_name(
  value: &str
) -> Option<&str> {
  let start = value.find("var(")?;
  let rest =
    &value[start + "var(".len()..];
  let end = rest.find(')')?;
  let name = rest[..end].trim();
  name
    .starts_with("--")
    .then_some(name)
}

/// Outcome of a reference walk.
/// Callers choose their own
/// fallback value rather than
/// receiving a sentinel string.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum Resolution {
  Resolved(String),
  Fallback
}

impl Resolution {
  pub fn resolved(
    self
  ) -> Option<String> {
    match self {
      | Self::Resolved(value) => {
        Some(value)
      }
      | Self::Fallback => None
    }
  }
}

/// Walks `var(--a)` chains through
/// the rule map until a concrete
/// value appears. A visited set
/// breaks cycles; missing and
/// cyclic references come back as
/// `Fallback`.
pub fn resolve_css_reference(
  value: &str,
  rules: &BTreeMap<String, String>
) -> Resolution {
  let mut visited = BTreeSet::new();
  let mut current =
    value.trim().to_string();
  while let Some(name) =
    css_var_name(&current)
  {
    if !visited
      .insert(name.to_string())
    {
      tracing::warn!(
        name,
        "cyclic css variable chain"
      );
      return Resolution::Fallback;
    }
    match rules.get(name) {
      | Some(next) => {
        current =
          next.trim().to_string();
      }
      | None => {
        return Resolution::Fallback;
      }
    }
  }
  Resolution::Resolved(current)
}

fn hex_digit(b: u8) -> Option<u8> {
  match b {
    | b'0'..=b'9' => Some(b - b'0'),
    | b'a'..=b'f' => {
      Some(b - b'a' + 10)
    }
    | b'A'..=b'F' => {
      Some(b - b'A' + 10)
    }
    | _ => None
  }
}

/// `#rgb`, `#rgba`, `#rrggbb` and
/// `#rrggbbaa`; alpha is parsed and
/// discarded.
pub fn parse_hex(
  value: &str
) -> Option<(u8, u8, u8)> {
  let digits = value
    .trim()
    .strip_prefix('#')?
    .as_bytes();
  match digits.len() {
    | 3 | 4 => {
      let r = hex_digit(digits[0])?;
      let g = hex_digit(digits[1])?;
      let b = hex_digit(digits[2])?;
      if digits.len() == 4 {
        hex_digit(digits[3])?;
      }
      Some((
        r << 4 | r,
        g << 4 | g,
        b << 4 | b
      ))
    }
    | 6 | 8 => {
      let mut out = [0u8; 4];
      for (i, pair) in digits
        .chunks(2)
        .enumerate()
      {
        out[i] = hex_digit(pair[0])?
          << 4
          | hex_digit(pair[1])?;
      }
      Some((out[0], out[1], out[2]))
    }
    | _ => None
  }
}

/// `rgb(r, g, b)` or
/// `rgba(r, g, b, a)`; channels are
/// clamped to 255.
pub fn parse_rgb(
  value: &str
) -> Option<(u8, u8, u8)> {
  let value = value.trim();
  if !value.starts_with("rgb") {
    return None;
  }
  let inner = value
    .find('(')
    .and_then(|open| {
      let close =
        value.rfind(')')?;
      value.get(open + 1..close)
    })?;
  let mut channels = inner
    .split([',', ' ', '/'])
    .filter(|s| !s.is_empty())
    .map(|s| {
      s.trim().parse::<f64>().ok()
    });
  let r = channels.next()??;
  let g = channels.next()??;
  let b = channels.next()??;
  Some((
    clamp_channel(r / 255.0),
    clamp_channel(g / 255.0),
    clamp_channel(b / 255.0)
  ))
}

fn clamp_channel(unit: f64) -> u8 {
  (unit.clamp(0.0, 1.0) * 255.0)
    .round() as u8
}

/// `hsl(h, s%, l%)` with hue in
/// degrees.
pub fn parse_hsl(
  value: &str
) -> Option<(u8, u8, u8)> {
  let value = value.trim();
  if !value.starts_with("hsl") {
    return None;
  }
  let inner = value
    .find('(')
    .and_then(|open| {
      let close =
        value.rfind(')')?;
      value.get(open + 1..close)
    })?;
  let mut parts = inner
    .split([',', ' ', '/'])
    .filter(|s| !s.is_empty())
    .map(|s| {
      s.trim()
        .trim_end_matches('%')
        .trim_end_matches("deg")
        .parse::<f64>()
        .ok()
    });
  let h = parts
    .next()??
    .rem_euclid(360.0);
  let s = (parts.next()?? / 100.0)
    .clamp(0.0, 1.0);
  let l = (parts.next()?? / 100.0)
    .clamp(0.0, 1.0);

  let c = (1.0
    - (2.0 * l - 1.0).abs())
    * s;
  let hp = h / 60.0;
  let x = c
    * (1.0
      - (hp % 2.0 - 1.0).abs());
  let (r1, g1, b1) =
    match hp as u32 {
      | 0 => (c, x, 0.0),
      | 1 => (x, c, 0.0),
      | 2 => (0.0, c, x),
      | 3 => (0.0, x, c),
      | 4 => (x, 0.0, c),
      | _ => (c, 0.0, x)
    };
  let m = l - c / 2.0;
  Some((
    clamp_channel(r1 + m),
    clamp_channel(g1 + m),
    clamp_channel(b1 + m)
  ))
}

fn gamma_encode(linear: f64) -> f64 {
  if linear <= 0.003_130_8 {
    12.92 * linear
  } else {
    1.055
      * linear.powf(1.0 / 2.4)
      - 0.055
  }
}

/// `oklch(L C H)` with L in 0..=1,
/// H in degrees. OKLab to linear
/// sRGB, then gamma encoded; out of
/// gamut channels clamp.
pub fn parse_oklch(
  value: &str
) -> Option<(u8, u8, u8)> {
  let value = value.trim();
  if !value.starts_with("oklch") {
    return None;
  }
  let inner = value
    .find('(')
    .and_then(|open| {
      let close =
        value.rfind(')')?;
      value.get(open + 1..close)
    })?;
  let mut parts = inner
    .split([',', ' ', '/'])
    .filter(|s| !s.is_empty())
    .map(|s| {
      s.trim()
        .trim_end_matches('%')
        .trim_end_matches("deg")
        .parse::<f64>()
        .ok()
    });
  let lightness = parts.next()??;
  let chroma = parts.next()??;
  let hue = parts
    .next()??
    .to_radians();

  let a = chroma * hue.cos();
  let b = chroma * hue.sin();

  let l_ = lightness
    + 0.396_337_777_4 * a
    + 0.215_803_757_3 * b;
  let m_ = lightness
    - 0.105_561_345_8 * a
    - 0.063_854_172_8 * b;
  let s_ = lightness
    - 0.089_484_177_5 * a
    - 1.291_485_548_0 * b;

  let l = l_ * l_ * l_;
  let m = m_ * m_ * m_;
  let s = s_ * s_ * s_;

  let r_lin = 4.076_741_662_1 * l
    - 3.307_711_591_3 * m
    + 0.230_969_929_2 * s;
  let g_lin = -1.268_438_004_6 * l
    + 2.609_757_401_1 * m
    - 0.341_319_396_5 * s;
  let b_lin = -0.004_196_086_3 * l
    - 0.703_418_614_7 * m
    + 1.707_614_701_0 * s;

  Some((
    clamp_channel(gamma_encode(
      r_lin
    )),
    clamp_channel(gamma_encode(
      g_lin
    )),
    clamp_channel(gamma_encode(
      b_lin
    ))
  ))
}

fn parse_any(
  value: &str
) -> Option<(u8, u8, u8)> {
  let value = value.trim();
  if value.starts_with('#') {
    parse_hex(value)
  } else if value
    .starts_with("oklch")
  {
    parse_oklch(value)
  } else if value.starts_with("rgb")
  {
    parse_rgb(value)
  } else if value.starts_with("hsl")
  {
    parse_hsl(value)
  } else {
    None
  }
}

fn to_hex(
  (r, g, b): (u8, u8, u8)
) -> String {
  format!("#{r:02x}{g:02x}{b:02x}")
}

/// Normalizes any supported color
/// for a native color input. Var
/// references are resolved through
/// `rules` first; anything that
/// still fails to parse becomes
/// `#000000`.
pub fn to_editable_hex(
  color: &ColorValue,
  rules: &BTreeMap<String, String>
) -> String {
  let raw = color.as_css();
  let parsed =
    resolve_css_reference(
      raw, rules
    )
    .resolved()
    .and_then(|value| {
      parse_any(&value)
    });
  match parsed {
    | Some(rgb) => to_hex(rgb),
    | None => {
      tracing::warn!(
        color = raw,
        "unparseable color, \
         falling back"
      );
      FALLBACK_HEX.to_string()
    }
  }
}

/// String shown in the free-form
/// text field. Direct values pass
/// through untouched so an authored
/// oklch spelling survives; var
/// references resolve through the
/// rule map, and keep the original
/// token when the chain dead-ends.
pub fn to_display_string(
  color: &ColorValue,
  rules: &BTreeMap<String, String>
) -> String {
  let raw = color.as_css();
  if css_var_name(raw).is_none() {
    return raw.to_string();
  }
  match resolve_css_reference(
    raw, rules
  ) {
    | Resolution::Resolved(value)
      if !value.is_empty() =>
    {
      value
    }
    | _ => raw.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rules(
    entries: &[(&str, &str)]
  ) -> BTreeMap<String, String> {
    entries
      .iter()
      .map(|(k, v)| {
        (
          k.to_string(),
          v.to_string()
        )
      })
      .collect()
  }

  fn plain(s: &str) -> ColorValue {
    ColorValue::Plain(
      s.to_string()
    )
  }

  #[test]
  fn hex_forms() {
    assert_eq!(
      parse_hex("#abc"),
      Some((0xaa, 0xbb, 0xcc))
    );
    assert_eq!(
      parse_hex("#336699"),
      Some((0x33, 0x66, 0x99))
    );
    // Alpha is dropped.
    assert_eq!(
      parse_hex("#33669980"),
      Some((0x33, 0x66, 0x99))
    );
    assert_eq!(
      parse_hex("#33669"),
      None
    );
    assert_eq!(
      parse_hex("336699"),
      None
    );
  }

  #[test]
  fn rgb_forms() {
    assert_eq!(
      parse_rgb(
        "rgb(51, 102, 153)"
      ),
      Some((51, 102, 153))
    );
    assert_eq!(
      parse_rgb(
        "rgba(255, 0, 0, 0.5)"
      ),
      Some((255, 0, 0))
    );
    assert_eq!(
      parse_rgb("rgb(300 0 0)"),
      Some((255, 0, 0))
    );
  }

  #[test]
  fn hsl_primaries() {
    assert_eq!(
      parse_hsl(
        "hsl(0, 100%, 50%)"
      ),
      Some((255, 0, 0))
    );
    assert_eq!(
      parse_hsl(
        "hsl(120, 100%, 25%)"
      ),
      Some((0, 128, 0))
    );
    assert_eq!(
      parse_hsl("hsl(0, 0%, 100%)"),
      Some((255, 255, 255))
    );
  }

  #[test]
  fn oklch_extremes() {
    assert_eq!(
      parse_oklch("oklch(1 0 0)"),
      Some((255, 255, 255))
    );
    assert_eq!(
      parse_oklch("oklch(0 0 0)"),
      Some((0, 0, 0))
    );
  }

  #[test]
  fn oklch_red_round_trips() {
    let (r, g, b) = parse_oklch(
      "oklch(0.6280 0.2577 29.23)"
    )
    .expect("valid oklch");
    assert!(r >= 254);
    assert!(g <= 2);
    assert!(b <= 2);
  }

  #[test]
  fn var_chains_resolve() {
    let rules = rules(&[
      (
        "--primary",
        "var(--blue-500)"
      ),
      ("--blue-500", "#3b82f6"),
    ]);
    assert_eq!(
      resolve_css_reference(
        "var(--primary)",
        &rules
      ),
      Resolution::Resolved(
        "#3b82f6".to_string()
      )
    );
    assert_eq!(
      to_editable_hex(
        &plain("var(--primary)"),
        &rules
      ),
      "#3b82f6"
    );
  }

  #[test]
  fn cyclic_chain_falls_back() {
    let rules = rules(&[
      ("--a", "var(--b)"),
      ("--b", "var(--a)"),
    ]);
    assert_eq!(
      resolve_css_reference(
        "var(--a)",
        &rules
      ),
      Resolution::Fallback
    );
    assert_eq!(
      to_editable_hex(
        &plain("var(--a)"),
        &rules
      ),
      FALLBACK_HEX
    );
  }

  #[test]
  fn missing_var_keeps_token_for_display()
  {
    let rules = rules(&[]);
    assert_eq!(
      to_display_string(
        &plain("var(--mystery)"),
        &rules
      ),
      "var(--mystery)"
    );
    assert_eq!(
      to_editable_hex(
        &plain("var(--mystery)"),
        &rules
      ),
      FALLBACK_HEX
    );
  }

  #[test]
  fn display_preserves_authored_oklch()
  {
    let rules = rules(&[(
      "--primary",
      "oklch(0.7 0.1 250)"
    )]);
    assert_eq!(
      to_display_string(
        &plain(
          "oklch(0.55 0.2 30)"
        ),
        &rules
      ),
      "oklch(0.55 0.2 30)"
    );
    assert_eq!(
      to_display_string(
        &plain("var(--primary)"),
        &rules
      ),
      "oklch(0.7 0.1 250)"
    );
  }

  #[test]
  fn editable_hex_is_lowercase_six_digits()
  {
    let rules = rules(&[]);
    assert_eq!(
      to_editable_hex(
        &plain("#ABC"),
        &rules
      ),
      "#aabbcc"
    );
    assert_eq!(
      to_editable_hex(
        &plain(
          "hsl(0, 100%, 50%)"
        ),
        &rules
      ),
      "#ff0000"
    );
    assert_eq!(
      to_editable_hex(
        &plain("not-a-color"),
        &rules
      ),
      FALLBACK_HEX
    );
    // Idempotent on valid hex.
    let once = to_editable_hex(
      &plain("#AaBbCc"),
      &rules
    );
    assert_eq!(
      to_editable_hex(
        &plain(&once),
        &rules
      ),
      once
    );
  }

  #[test]
  fn var_name_extraction() {
    assert_eq!(
      css_var_name(
        "var(--primary)"
      ),
      Some("--primary")
    );
    assert_eq!(
      css_var_name(
        "var( --gap )"
      ),
      Some("--gap")
    );
    assert_eq!(
      css_var_name("#fff"),
      None
    );
  }
}
