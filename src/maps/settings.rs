// ============================================================================
// MAP SETTINGS - Basemap + perfil de color seleccionados
// ============================================================================
// Estado puro: el hook use_map_settings lo envuelve en un reducer y el mapa
// solo lee `basemap` y `active_palette()`.
// ============================================================================

use super::basemap::Basemap;
use super::color_profile::{ColorProfileId, HexColor, Palette};
use crate::models::SignalStrength;

#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub basemap: Basemap,
    /// true cuando el usuario eligió un basemap a mano
    pub basemap_overridden: bool,
    pub profile: ColorProfileId,
    /// Ediciones del perfil custom; sobreviven a cambios de perfil
    pub custom_palette: Palette,
}

impl MapSettings {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            basemap: Basemap::for_system_theme(prefers_dark),
            basemap_overridden: false,
            profile: ColorProfileId::Vibrant,
            custom_palette: Palette::default_custom(),
        }
    }

    pub fn select_basemap(&mut self, basemap: Basemap) {
        self.basemap = basemap;
        self.basemap_overridden = true;
    }

    /// Quita el override y vuelve a derivar del esquema actual
    pub fn use_system_default(&mut self, prefers_dark: bool) {
        self.basemap_overridden = false;
        self.basemap = Basemap::for_system_theme(prefers_dark);
    }

    /// El esquema del sistema cambió; solo aplica sin override
    pub fn system_theme_changed(&mut self, prefers_dark: bool) {
        if !self.basemap_overridden {
            self.basemap = Basemap::for_system_theme(prefers_dark);
        }
    }

    pub fn select_profile(&mut self, profile: ColorProfileId) {
        self.profile = profile;
    }

    pub fn set_custom_color(&mut self, strength: SignalStrength, color: HexColor) {
        self.custom_palette.set(strength, color);
    }

    /// Colores de un perfil (custom con las ediciones actuales)
    pub fn palette_for(&self, profile: ColorProfileId) -> Palette {
        match profile.preset_colors() {
            Some(colors) => Palette::from_static(colors),
            None => self.custom_palette.clone(),
        }
    }

    pub fn active_palette(&self) -> Palette {
        self.palette_for(self.profile)
    }

    pub fn color_for(&self, strength: SignalStrength) -> String {
        self.active_palette().color_for(strength).to_string()
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: u8) -> SignalStrength {
        SignalStrength::new(n).unwrap()
    }

    #[test]
    fn defaults_follow_system_theme() {
        let dark = MapSettings::new(true);
        assert_eq!(dark.basemap, Basemap::CartoDark);
        assert!(!dark.basemap_overridden);
        assert_eq!(dark.profile, ColorProfileId::Vibrant);
        assert_eq!(MapSettings::new(false).basemap, Basemap::CartoLight);
    }

    #[test]
    fn override_survives_theme_change() {
        let mut s = MapSettings::new(false);
        s.select_basemap(Basemap::EsriSatellite);
        s.system_theme_changed(true);
        assert_eq!(s.basemap, Basemap::EsriSatellite);
        assert!(s.basemap_overridden);
    }

    #[test]
    fn clearing_override_rederives_from_current_preference() {
        let mut s = MapSettings::new(false);
        s.select_basemap(Basemap::OsmStandard);
        s.use_system_default(true);
        assert_eq!(s.basemap, Basemap::CartoDark);
        assert!(!s.basemap_overridden);

        s.system_theme_changed(false);
        assert_eq!(s.basemap, Basemap::CartoLight);
    }

    #[test]
    fn custom_edit_survives_profile_switch() {
        let mut s = MapSettings::new(false);
        s.select_profile(ColorProfileId::Custom);
        s.set_custom_color(level(3), HexColor::parse("#123456").unwrap());
        assert_eq!(s.color_for(level(3)), "#123456");

        s.select_profile(ColorProfileId::Mono);
        assert_eq!(s.color_for(level(3)), "#60b137");

        s.select_profile(ColorProfileId::Custom);
        assert_eq!(s.color_for(level(3)), "#123456");
        assert_eq!(s.color_for(level(1)), "#F2C447");
    }

    #[test]
    fn every_profile_previews_its_own_colors() {
        let mut s = MapSettings::new(false);
        s.set_custom_color(level(5), HexColor::parse("#abcdef").unwrap());

        let soft = s.palette_for(ColorProfileId::Soft);
        assert_eq!(soft.color_for(level(1)), "#F4D88A");
        let custom = s.palette_for(ColorProfileId::Custom);
        assert_eq!(custom.color_for(level(5)), "#abcdef");
        assert_eq!(s.active_palette(), s.palette_for(ColorProfileId::Vibrant));
    }

    #[test]
    fn profile_switch_recomputes_all_levels() {
        let mut s = MapSettings::new(false);
        let before: Vec<String> = SignalStrength::all().map(|l| s.color_for(l)).collect();
        s.select_profile(ColorProfileId::Contrast);
        let after: Vec<String> = SignalStrength::all().map(|l| s.color_for(l)).collect();
        assert_eq!(after, vec!["#00E6A8", "#00B3FF", "#FFB800", "#FF4D4D", "#8A2BE2"]);
        assert!(before.iter().zip(&after).all(|(a, b)| a != b));
    }
}
