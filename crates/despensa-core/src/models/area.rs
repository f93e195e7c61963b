//! Stock areas — the four fixed operational zones of the venue.

use serde::{Deserialize, Serialize};

/// One of the four zones that each hold an independent stock quantity
/// per ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Almacen,
    Cocina,
    Ensalada,
    Isla,
}

impl Area {
    /// All areas, in capture order.
    pub const ALL: [Area; 4] = [Area::Almacen, Area::Cocina, Area::Ensalada, Area::Isla];

    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Almacen => "almacen",
            Area::Cocina => "cocina",
            Area::Ensalada => "ensalada",
            Area::Isla => "isla",
        }
    }

    pub fn parse(s: &str) -> Option<Area> {
        match s {
            "almacen" => Some(Area::Almacen),
            "cocina" => Some(Area::Cocina),
            "ensalada" => Some(Area::Ensalada),
            "isla" => Some(Area::Isla),
            _ => None,
        }
    }
}

/// Target of a snapshot: one specific area, or every area summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaSelector {
    All,
    One(Area),
}

impl AreaSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaSelector::All => "all",
            AreaSelector::One(area) => area.as_str(),
        }
    }

    pub fn parse(s: &str) -> Option<AreaSelector> {
        if s == "all" {
            return Some(AreaSelector::All);
        }
        Area::parse(s).map(AreaSelector::One)
    }
}

impl Serialize for AreaSelector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AreaSelector {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        AreaSelector::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown area selector: {s}")))
    }
}
