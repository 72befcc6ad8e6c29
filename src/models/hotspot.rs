use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::LatLng;

// ============================================================================
// HOTSPOT - Fila de la tabla `wifi_spots`
// ============================================================================

/// Identificador asignado por el backend. Puede llegar como número o texto.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HotspotId(String);

impl HotspotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HotspotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HotspotId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => HotspotId(n.to_string()),
            RawId::Text(s) => HotspotId(s),
        })
    }
}

/// Banda de frecuencia. En la base de datos se guarda como "2.4" | "5" | "6".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrequencyBand {
    #[default]
    Ghz2_4,
    Ghz5,
    Ghz6,
}

impl FrequencyBand {
    pub const ALL: [FrequencyBand; 3] = [FrequencyBand::Ghz2_4, FrequencyBand::Ghz5, FrequencyBand::Ghz6];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyBand::Ghz2_4 => "2.4",
            FrequencyBand::Ghz5 => "5",
            FrequencyBand::Ghz6 => "6",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "2.4" => Some(FrequencyBand::Ghz2_4),
            "5" | "5.0" => Some(FrequencyBand::Ghz5),
            "6" | "6.0" => Some(FrequencyBand::Ghz6),
            _ => None,
        }
    }

    fn from_ghz(value: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|band| (band.ghz() - value).abs() < 1e-6)
    }

    pub fn ghz(&self) -> f64 {
        match self {
            FrequencyBand::Ghz2_4 => 2.4,
            FrequencyBand::Ghz5 => 5.0,
            FrequencyBand::Ghz6 => 6.0,
        }
    }

    /// Posición en el slider del formulario (0..=2)
    pub fn slider_index(&self) -> u8 {
        match self {
            FrequencyBand::Ghz2_4 => 0,
            FrequencyBand::Ghz5 => 1,
            FrequencyBand::Ghz6 => 2,
        }
    }

    pub fn from_slider_index(index: u8) -> Self {
        match index {
            0 => FrequencyBand::Ghz2_4,
            1 => FrequencyBand::Ghz5,
            _ => FrequencyBand::Ghz6,
        }
    }

    /// Radio del círculo de cobertura en metros.
    /// Menor frecuencia = mayor alcance.
    pub fn coverage_radius_m(&self) -> f64 {
        match self {
            FrequencyBand::Ghz2_4 => 100.0,
            FrequencyBand::Ghz5 => 30.0,
            FrequencyBand::Ghz6 => 15.0,
        }
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FrequencyBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FrequencyBand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // La columna puede ser text o numeric según cómo se creó la tabla
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawBand {
            Text(String),
            Number(f64),
        }

        let parsed = match RawBand::deserialize(deserializer)? {
            RawBand::Text(s) => FrequencyBand::parse(&s),
            RawBand::Number(n) => FrequencyBand::from_ghz(n),
        };
        parsed.ok_or_else(|| de::Error::custom("unknown frequency band"))
    }
}

/// Nivel de señal 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalStrength(u8);

impl SignalStrength {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Devuelve None fuera de 1..=5
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    /// Ajusta al rango válido (el slider nunca debería salirse, pero por si acaso)
    pub fn clamped(level: i64) -> Self {
        Self(level.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = SignalStrength> {
        (Self::MIN..=Self::MAX).map(SignalStrength)
    }
}

impl Default for SignalStrength {
    fn default() -> Self {
        Self(3)
    }
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fila tal como la devuelve el backend (solo lectura en cliente)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotRecord {
    pub id: HotspotId,
    pub lat: f64,
    pub lng: f64,
    pub ssid: String,
    pub strength: SignalStrength,
    pub freq: FrequencyBand,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl HotspotRecord {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    pub fn notes_or_placeholder(&self) -> &str {
        match self.notes.as_deref() {
            Some(n) if !n.trim().is_empty() => n,
            _ => "No notes",
        }
    }
}

/// Cuerpo del INSERT. Debe coincidir exactamente con las columnas de la tabla.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewHotspot {
    pub lat: f64,
    pub lng: f64,
    pub ssid: String,
    pub strength: SignalStrength,
    pub freq: FrequencyBand,
    pub notes: Option<String>,
    pub user_id: String,
}
