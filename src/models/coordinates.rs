use serde::{Deserialize, Serialize};

/// Punto en grados decimales (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Formato corto para el formulario: "Lat: 13.0500, Lng: 80.2700"
    pub fn display_short(&self) -> String {
        format!("Lat: {:.4}, Lng: {:.4}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_short_uses_four_decimals() {
        let p = LatLng::new(13.05, 80.27);
        assert_eq!(p.display_short(), "Lat: 13.0500, Lng: 80.2700");
    }
}
