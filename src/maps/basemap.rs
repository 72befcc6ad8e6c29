use std::fmt;

/// Proveedores de teselas (ninguno necesita API key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Basemap {
    OsmStandard,
    CartoLight,
    CartoDark,
    EsriSatellite,
}

impl Basemap {
    pub const ALL: [Basemap; 4] = [
        Basemap::OsmStandard,
        Basemap::CartoLight,
        Basemap::CartoDark,
        Basemap::EsriSatellite,
    ];

    /// Basemap por defecto según el esquema de color del sistema
    pub fn for_system_theme(prefers_dark: bool) -> Self {
        if prefers_dark {
            Basemap::CartoDark
        } else {
            Basemap::CartoLight
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Basemap::OsmStandard => "osm",
            Basemap::CartoLight => "cartoLight",
            Basemap::CartoDark => "cartoDark",
            Basemap::EsriSatellite => "esriSat",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Basemap::OsmStandard => "OSM Standard",
            Basemap::CartoLight => "CARTO Light",
            Basemap::CartoDark => "CARTO Dark",
            Basemap::EsriSatellite => "Esri Satellite",
        }
    }

    pub fn url_template(&self) -> &'static str {
        match self {
            Basemap::OsmStandard => "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            Basemap::CartoLight => "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
            Basemap::CartoDark => "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
            Basemap::EsriSatellite => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
        }
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            Basemap::OsmStandard => {
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            }
            Basemap::CartoLight | Basemap::CartoDark => {
                "&copy; OpenStreetMap &copy; <a href=\"https://carto.com/attributions\">CARTO</a>"
            }
            Basemap::EsriSatellite => {
                "Tiles &copy; Esri — Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community"
            }
        }
    }
}

impl fmt::Display for Basemap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_theme_picks_carto_variant() {
        assert_eq!(Basemap::for_system_theme(true), Basemap::CartoDark);
        assert_eq!(Basemap::for_system_theme(false), Basemap::CartoLight);
    }

    #[test]
    fn keys_are_unique_and_providers_complete() {
        for (i, b) in Basemap::ALL.iter().enumerate() {
            assert!(Basemap::ALL.iter().skip(i + 1).all(|other| other.key() != b.key()));
            assert!(b.url_template().contains("{z}"));
            assert!(!b.attribution().is_empty());
        }
    }
}
