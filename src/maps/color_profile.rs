// ============================================================================
// COLOR PROFILES - Nivel de señal (1..=5) -> color
// ============================================================================

use std::fmt;

use crate::models::SignalStrength;

/// Color para niveles fuera de 1..=5
pub const FALLBACK_COLOR: &str = "gray";

/// Paleta inicial del perfil custom
pub const DEFAULT_CUSTOM_COLORS: [&str; 5] = ["#F2C447", "#F76280", "#FF1D68", "#B10065", "#740580"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorProfileId {
    Vibrant,
    Soft,
    Contrast,
    Mono,
    Custom,
}

impl ColorProfileId {
    pub const PRESETS: [ColorProfileId; 4] = [
        ColorProfileId::Vibrant,
        ColorProfileId::Soft,
        ColorProfileId::Contrast,
        ColorProfileId::Mono,
    ];

    /// Presets + custom, en el orden del menú
    pub const ALL: [ColorProfileId; 5] = [
        ColorProfileId::Vibrant,
        ColorProfileId::Soft,
        ColorProfileId::Contrast,
        ColorProfileId::Mono,
        ColorProfileId::Custom,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ColorProfileId::Vibrant => "vibrant",
            ColorProfileId::Soft => "soft",
            ColorProfileId::Contrast => "contrast",
            ColorProfileId::Mono => "mono",
            ColorProfileId::Custom => "custom",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorProfileId::Vibrant => "Vibrant",
            ColorProfileId::Soft => "Soft",
            ColorProfileId::Contrast => "High Contrast",
            ColorProfileId::Mono => "Monochrome",
            ColorProfileId::Custom => "Custom",
        }
    }

    /// Colores de un preset (None para custom, que vive en MapSettings)
    pub fn preset_colors(&self) -> Option<[&'static str; 5]> {
        match self {
            ColorProfileId::Vibrant => Some(["#214475", "#1E8A96", "#17BB7C", "#0DE32A", "#0ce71f"]),
            ColorProfileId::Soft => Some(["#F4D88A", "#F6A6A6", "#F59EAD", "#C78AB3", "#9C7AC1"]),
            ColorProfileId::Contrast => Some(["#00E6A8", "#00B3FF", "#FFB800", "#FF4D4D", "#8A2BE2"]),
            ColorProfileId::Mono => Some(["#9cd67d", "#7ec35a", "#60b137", "#3f8f17", "#2c6d0f"]),
            ColorProfileId::Custom => None,
        }
    }
}

impl fmt::Display for ColorProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Color CSS "#RRGGBB" validado (lo que devuelve un <input type="color">)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let digits = value.strip_prefix('#')?;
        if (digits.len() == 6 || digits.len() == 3) && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Paleta de 5 niveles; índice 0 = nivel 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [HexColor; 5],
}

impl Palette {
    pub fn from_static(colors: [&'static str; 5]) -> Self {
        Self {
            colors: colors.map(|c| HexColor(c.to_string())),
        }
    }

    pub fn default_custom() -> Self {
        Self::from_static(DEFAULT_CUSTOM_COLORS)
    }

    /// Color para un nivel; gris si está fuera de rango
    pub fn color_for(&self, strength: SignalStrength) -> &str {
        match strength.level() {
            level @ SignalStrength::MIN..=SignalStrength::MAX => self.colors[(level - 1) as usize].as_str(),
            _ => FALLBACK_COLOR,
        }
    }

    pub fn set(&mut self, strength: SignalStrength, color: HexColor) {
        self.colors[(strength.level() - 1) as usize] = color;
    }

    pub fn levels(&self) -> impl Iterator<Item = (SignalStrength, &str)> {
        SignalStrength::all().map(move |s| (s, self.color_for(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SignalStrength;

    #[test]
    fn hex_color_validation() {
        assert!(HexColor::parse("#a1B2c3").is_some());
        assert!(HexColor::parse("#fff").is_some());
        assert!(HexColor::parse("a1b2c3").is_none());
        assert!(HexColor::parse("#zzzzzz").is_none());
        assert!(HexColor::parse("#12345").is_none());
    }

    #[test]
    fn palette_maps_levels_in_order() {
        let p = Palette::from_static(ColorProfileId::Vibrant.preset_colors().unwrap());
        assert_eq!(p.color_for(SignalStrength::new(1).unwrap()), "#214475");
        assert_eq!(p.color_for(SignalStrength::new(5).unwrap()), "#0ce71f");
        assert_eq!(p.levels().count(), 5);
    }

    #[test]
    fn out_of_range_strength_is_gray() {
        let p = Palette::default_custom();
        assert_eq!(p.color_for(SignalStrength::clamped(0)), "#F2C447"); // clamped -> 1
        let raw: SignalStrength = serde_json::from_value(serde_json::json!(9)).unwrap();
        assert_eq!(p.color_for(raw), FALLBACK_COLOR);
    }

    #[test]
    fn only_custom_has_no_preset() {
        for id in ColorProfileId::PRESETS {
            assert!(id.preset_colors().is_some());
        }
        assert!(ColorProfileId::Custom.preset_colors().is_none());
    }
}
