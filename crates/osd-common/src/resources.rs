//! Named resources: fonts and navball skins.
//!
//! Config files refer to assets by short names; this module maps those
//! names onto files below a resource root.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{OsdError, OsdResult};

/// Fonts shipped with the OSD resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontName {
    #[default]
    LiberationSansBold,
    B612MonoBold,
    ShareTechMono,
    OrbitronBold,
}

impl FontName {
    pub const ALL: [FontName; 4] = [
        FontName::LiberationSansBold,
        FontName::B612MonoBold,
        FontName::ShareTechMono,
        FontName::OrbitronBold,
    ];

    pub fn config_name(self) -> &'static str {
        match self {
            FontName::LiberationSansBold => "liberation_sans_bold",
            FontName::B612MonoBold => "b612_mono_bold",
            FontName::ShareTechMono => "share_tech_mono",
            FontName::OrbitronBold => "orbitron_bold",
        }
    }

    /// Path relative to the resource root.
    pub fn relative_path(self) -> &'static str {
        match self {
            FontName::LiberationSansBold => "fonts/LiberationSans-Bold.ttf",
            FontName::B612MonoBold => "fonts/B612Mono-Bold.ttf",
            FontName::ShareTechMono => "fonts/ShareTechMono-Regular.ttf",
            FontName::OrbitronBold => "fonts/Orbitron-Bold.ttf",
        }
    }

    pub fn from_config_name(name: &str) -> OsdResult<Self> {
        FontName::ALL
            .into_iter()
            .find(|font| font.config_name() == name)
            .ok_or_else(|| OsdError::UnknownFont(name.to_string()))
    }
}

/// Equirectangular navball skins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavballSkin {
    #[default]
    Stock,
    StockIva,
    #[serde(rename = "5th_horseman_v2")]
    FifthHorsemanV2,
    #[serde(rename = "5th_horseman_black")]
    FifthHorsemanBlack,
    #[serde(rename = "5th_horseman_brown")]
    FifthHorsemanBrown,
    Jafo,
    Kbob,
    OrdinaryKerman,
    Trekky,
    Apollo,
    WhiteOwl,
    Zasnold,
    Falconb,
}

impl NavballSkin {
    pub fn filename(self) -> &'static str {
        match self {
            NavballSkin::Stock => "stock.png",
            NavballSkin::StockIva => "stock-iva.png",
            NavballSkin::FifthHorsemanV2 => "5thHorseman_v2-navball.png",
            NavballSkin::FifthHorsemanBlack => "5thHorseman-navball_blackgrey_DIF.png",
            NavballSkin::FifthHorsemanBrown => "5thHorseman-navball_brownblue_DIF.png",
            NavballSkin::Jafo => "JAFO.png",
            NavballSkin::Kbob => "kBob_v2.2.png",
            NavballSkin::OrdinaryKerman => "OrdinaryKerman.png",
            NavballSkin::Trekky => "Trekky0623_DIF.png",
            NavballSkin::Apollo => "tooRelic_Apollo.png",
            NavballSkin::WhiteOwl => "White_Owl.png",
            NavballSkin::Zasnold => "Zasnold_DIF.png",
            NavballSkin::Falconb => "FalconB.png",
        }
    }

    /// Lenient lookup: unknown names fall back to the stock skin.
    pub fn from_name(name: &str) -> Self {
        serde_json::from_value(serde_json::Value::String(name.to_string())).unwrap_or_else(|_| {
            tracing::warn!(skin = %name, "Unknown navball skin, using stock");
            NavballSkin::Stock
        })
    }
}

/// Root directory that relative resource paths resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePaths {
    root: PathBuf,
}

impl ResourcePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn font(&self, font: FontName) -> PathBuf {
        self.root.join(font.relative_path())
    }

    pub fn navball_skin(&self, skin: NavballSkin) -> PathBuf {
        self.root.join("navball_skins").join(skin.filename())
    }

    /// Resolve a config-provided path; absolute paths are kept as-is.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self::new("resources")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_registry_lookup() {
        assert_eq!(
            FontName::from_config_name("b612_mono_bold").unwrap(),
            FontName::B612MonoBold
        );
        assert!(FontName::from_config_name("comic_sans").is_err());

        let paths = ResourcePaths::new("/opt/osd");
        assert_eq!(
            paths.font(FontName::LiberationSansBold),
            PathBuf::from("/opt/osd/fonts/LiberationSans-Bold.ttf")
        );
    }

    #[test]
    fn test_skin_names_and_files() {
        assert_eq!(NavballSkin::from_name("apollo"), NavballSkin::Apollo);
        assert_eq!(NavballSkin::from_name("5th_horseman_black").filename(), "5thHorseman-navball_blackgrey_DIF.png");
        assert_eq!(NavballSkin::from_name("stock_iva").filename(), "stock-iva.png");
        assert_eq!(NavballSkin::from_name("does_not_exist"), NavballSkin::Stock);
    }

    #[test]
    fn test_resolve_keeps_absolute_paths() {
        let paths = ResourcePaths::new("resources");
        assert_eq!(paths.resolve("/tmp/sun.svg"), PathBuf::from("/tmp/sun.svg"));
        assert_eq!(
            paths.resolve("radar_indicators/sun.svg"),
            PathBuf::from("resources/radar_indicators/sun.svg")
        );
        assert_eq!(
            paths.navball_skin(NavballSkin::Stock),
            PathBuf::from("resources/navball_skins/stock.png")
        );
    }
}
