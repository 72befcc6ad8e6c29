use async_trait::async_trait;
use gloo_net::http::Request;

use crate::error::AppError;
use crate::models::{HotspotRecord, NewHotspot};
use crate::utils::constants::HOTSPOTS_TABLE;
use super::supabase_client::{network_error, read_json, SupabaseClient};

/// Fuente de datos de hotspots: leer todo e insertar una fila.
/// No hay update ni delete.
#[async_trait(?Send)]
pub trait HotspotSource {
    /// Todas las filas, en el orden que devuelva el backend
    async fn fetch_all(&self) -> Result<Vec<HotspotRecord>, AppError>;

    /// Inserta una fila con el token del usuario y devuelve la fila creada
    async fn insert(&self, spot: &NewHotspot, access_token: &str) -> Result<HotspotRecord, AppError>;
}

/// Implementación sobre PostgREST
#[derive(Clone)]
pub struct SupabaseHotspots {
    client: SupabaseClient,
}

impl SupabaseHotspots {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl HotspotSource for SupabaseHotspots {
    async fn fetch_all(&self) -> Result<Vec<HotspotRecord>, AppError> {
        let url = self.client.rest_url(HOTSPOTS_TABLE);
        log::info!("📡 Obteniendo hotspots...");

        let response = self
            .client
            .authorize(Request::get(&url), None)
            .query([("select", "*")])
            .send()
            .await
            .map_err(network_error)?;

        let rows: Vec<serde_json::Value> = read_json(response).await?;
        let spots = decode_rows(rows);
        log::info!("✅ {} hotspots cargados", spots.len());
        Ok(spots)
    }

    async fn insert(&self, spot: &NewHotspot, access_token: &str) -> Result<HotspotRecord, AppError> {
        let url = self.client.rest_url(HOTSPOTS_TABLE);
        log::info!("📝 Insertando hotspot '{}' en ({}, {})", spot.ssid, spot.lat, spot.lng);

        let response = self
            .client
            .authorize(Request::post(&url), Some(access_token))
            .header("Prefer", "return=representation")
            .json(spot)
            .map_err(|e| AppError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(network_error)?;

        // return=representation devuelve un array con la fila insertada
        let mut rows: Vec<HotspotRecord> = read_json(response).await?;
        rows.pop()
            .ok_or_else(|| AppError::Decode("insert returned no rows".to_string()))
    }
}

/// Decodifica fila a fila: una fila inválida se descarta sin perder el resto
pub fn decode_rows(rows: Vec<serde_json::Value>) -> Vec<HotspotRecord> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<HotspotRecord>(row) {
            Ok(spot) => Some(spot),
            Err(e) => {
                log::warn!("⚠️ Fila {} de wifi_spots descartada: {}", index, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FrequencyBand;
    use serde_json::json;

    fn row(id: i64, strength: serde_json::Value, freq: serde_json::Value) -> serde_json::Value {
        json!({
            "id": id,
            "lat": 13.05,
            "lng": 80.27,
            "ssid": format!("net-{}", id),
            "strength": strength,
            "freq": freq,
            "notes": null,
            "user_id": "user-1"
        })
    }

    #[test]
    fn bad_rows_do_not_hide_good_ones() {
        let rows = vec![
            row(1, json!(4), json!("5")),
            row(2, json!(3), json!("5.8")),
            row(3, json!(null), json!("2.4")),
            row(4, json!("strong"), json!("6")),
            row(5, json!(2), json!(6)),
        ];

        let spots = decode_rows(rows);
        let ids: Vec<&str> = spots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5"]);
        assert_eq!(spots[1].freq, FrequencyBand::Ghz6);
    }

    #[test]
    fn out_of_range_strength_is_kept() {
        let spots = decode_rows(vec![row(7, json!(9), json!("2.4"))]);
        assert_eq!(spots.len(), 1);
        assert_eq!(spots[0].strength.level(), 9);
    }

    #[test]
    fn empty_table_decodes_to_nothing() {
        assert!(decode_rows(Vec::new()).is_empty());
    }
}
