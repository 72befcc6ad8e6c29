// ============================================================================
// MAP VIEWMODEL - Hotspots -> overlays dibujables
// ============================================================================
// Lógica pura: ni DOM ni Leaflet. El componente MapView solo pasa el
// resultado al renderizador.
// ============================================================================

use crate::maps::traits::{SELECTED_OPACITY, UNSELECTED_OPACITY};
use crate::maps::{Palette, PopupContent, SpotOverlay};
use crate::models::{HotspotId, HotspotRecord, LatLng, SessionState};
use crate::services::HotspotSource;

pub struct MapViewModel;

impl MapViewModel {
    /// Un overlay por hotspot, en el orden del backend
    pub fn build_overlays(
        hotspots: &[HotspotRecord],
        palette: &Palette,
        selected: Option<&HotspotId>,
    ) -> Vec<SpotOverlay> {
        hotspots
            .iter()
            .map(|spot| SpotOverlay {
                id: spot.id.clone(),
                center: spot.position(),
                radius_m: spot.freq.coverage_radius_m(),
                color: palette.color_for(spot.strength).to_string(),
                opacity: if selected == Some(&spot.id) {
                    SELECTED_OPACITY
                } else {
                    UNSELECTED_OPACITY
                },
                popup: Self::popup_for(spot),
            })
            .collect()
    }

    pub fn popup_for(spot: &HotspotRecord) -> PopupContent {
        PopupContent {
            title: format!("SSID: {}", spot.ssid),
            lines: vec![
                format!("Strength: {}/5", spot.strength),
                format!("Frequency: {} GHz", spot.freq),
                format!("Notes: {}", spot.notes_or_placeholder()),
            ],
        }
    }

    /// Lista tras un fetch completo. Si falla se loguea y se conserva la actual.
    pub async fn reload(source: &dyn HotspotSource, current: &[HotspotRecord]) -> Vec<HotspotRecord> {
        match source.fetch_all().await {
            Ok(rows) => {
                log::info!("📶 {} hotspots cargados", rows.len());
                rows
            }
            Err(e) => {
                log::error!("❌ Error cargando hotspots: {}", e);
                current.to_vec()
            }
        }
    }

    /// Click en zona vacía: solo fija posición pendiente con sesión activa
    pub fn pending_from_click(session: &SessionState, at: LatLng) -> Option<LatLng> {
        session.is_authenticated().then_some(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::{ColorProfileId, MapSettings};
    use crate::models::auth::fixtures::session;
    use crate::models::{FrequencyBand, SignalStrength};
    use crate::error::AppError;
    use crate::services::mock::{record, MockHotspots};

    fn spots() -> Vec<HotspotRecord> {
        (1..=5)
            .map(|n| record(&n.to_string(), n, FrequencyBand::ALL[(n as usize) % 3]))
            .collect()
    }

    #[test]
    fn colors_follow_active_profile() {
        let settings = MapSettings::new(false);
        let records = spots();
        let overlays = MapViewModel::build_overlays(&records, &settings.active_palette(), None);

        for (overlay, spot) in overlays.iter().zip(&records) {
            assert_eq!(overlay.color, settings.color_for(spot.strength));
            assert_eq!(overlay.radius_m, spot.freq.coverage_radius_m());
        }
    }

    #[test]
    fn switching_profile_recolors_without_touching_records() {
        let mut settings = MapSettings::new(false);
        let records = spots();
        let snapshot = records.clone();

        let before = MapViewModel::build_overlays(&records, &settings.active_palette(), None);
        settings.select_profile(ColorProfileId::Soft);
        let after = MapViewModel::build_overlays(&records, &settings.active_palette(), None);

        assert_eq!(records, snapshot);
        assert!(before.iter().zip(&after).all(|(a, b)| a.color != b.color));
        assert_eq!(after[0].color, "#F4D88A");
    }

    #[test]
    fn only_the_selected_spot_is_highlighted() {
        let records = spots();
        let selected = records[2].id.clone();
        let overlays = MapViewModel::build_overlays(&records, &Palette::default_custom(), Some(&selected));

        let highlighted: Vec<_> = overlays.iter().filter(|o| o.opacity == SELECTED_OPACITY).collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].id, selected);
        assert!(overlays
            .iter()
            .filter(|o| o.id != selected)
            .all(|o| o.opacity == UNSELECTED_OPACITY));
    }

    #[test]
    fn popup_labels_every_field() {
        let mut spot = record("7", 4, FrequencyBand::Ghz5);
        let popup = MapViewModel::popup_for(&spot);
        assert_eq!(popup.title, "SSID: net-7");
        assert_eq!(popup.lines, vec!["Strength: 4/5", "Frequency: 5 GHz", "Notes: No notes"]);

        spot.notes = Some("Near the window".into());
        spot.strength = SignalStrength::new(2).unwrap();
        spot.freq = FrequencyBand::Ghz2_4;
        let popup = MapViewModel::popup_for(&spot);
        assert_eq!(popup.lines, vec!["Strength: 2/5", "Frequency: 2.4 GHz", "Notes: Near the window"]);
    }

    #[test]
    fn anonymous_clicks_do_not_set_a_position() {
        let at = LatLng::new(13.05, 80.27);
        assert_eq!(MapViewModel::pending_from_click(&SessionState::Anonymous, at), None);

        let signed_in = SessionState::from_session(Some(session("u1", Some("Ana"))));
        assert_eq!(MapViewModel::pending_from_click(&signed_in, at), Some(at));
    }

    #[tokio::test]
    async fn reload_keeps_backend_order() {
        let rows = vec![
            record("9", 1, FrequencyBand::Ghz6),
            record("2", 5, FrequencyBand::Ghz2_4),
        ];
        let source = MockHotspots::new(rows.clone());
        let loaded = MapViewModel::reload(&source, &[]).await;
        assert_eq!(loaded, rows);
        assert_eq!(source.fetch_calls.get(), 1);
    }

    #[tokio::test]
    async fn failed_reload_leaves_list_unchanged() {
        let current = spots();
        let source = MockHotspots::new(vec![]);
        *source.fetch_error.borrow_mut() = Some(AppError::Network("offline".into()));
        assert_eq!(MapViewModel::reload(&source, &current).await, current);
        assert!(MapViewModel::reload(&source, &[]).await.is_empty());
    }
}
