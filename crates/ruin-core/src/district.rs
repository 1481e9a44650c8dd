use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::map::{Layer, MapId};

/// The character of a district, biasing which buildings its street map gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistrictKind {
    /// Offices dominate.
    Business,
    /// No bias.
    General,
    /// Parks dominate.
    Green,
    /// Houses dominate.
    Residential,
    /// Shops dominate.
    Shopping,
}

impl DistrictKind {
    /// Every kind, in the order used when rolling one.
    pub const ALL: [DistrictKind; 5] = [
        Self::Business,
        Self::General,
        Self::Green,
        Self::Residential,
        Self::Shopping,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Business => "Business",
            Self::General => "General",
            Self::Green => "Green",
            Self::Residential => "Residential",
            Self::Shopping => "Shopping",
        }
    }
}

impl fmt::Display for DistrictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One cell of the world grid.
#[derive(Debug, Clone, PartialEq)]
pub struct District {
    /// Grid coordinate.
    pub position: Point,
    /// District character.
    pub kind: DistrictKind,
    /// Display name, e.g. "Business District B3".
    pub name: String,
    /// Seed every layer seed of this district derives from.
    pub seed: u64,
    /// Street level map.
    pub entry: Option<MapId>,
    /// Sewers map.
    pub sewers: Option<MapId>,
    /// Subway map (middle row only).
    pub subway: Option<MapId>,
    /// Hand-designated maps anchored in this district.
    pub unique_maps: Vec<MapId>,
}

impl District {
    /// Create a district with no maps yet.
    pub fn new(position: Point, kind: DistrictKind, seed: u64) -> Self {
        Self {
            position,
            kind,
            name: Self::default_name(position, kind),
            seed,
            entry: None,
            sewers: None,
            subway: None,
            unique_maps: Vec::new(),
        }
    }

    /// "<Kind> District <column letter><row number>".
    pub fn default_name(position: Point, kind: DistrictKind) -> String {
        let column = char::from(b'A' + (position.x.rem_euclid(26)) as u8);
        format!("{kind} District {column}{}", position.y + 1)
    }

    /// The map on `layer`, if generated.
    pub fn map(&self, layer: Layer) -> Option<MapId> {
        match layer {
            Layer::Entry => self.entry,
            Layer::Sewers => self.sewers,
            Layer::Subway => self.subway,
            Layer::Underground => self.unique_maps.first().copied(),
        }
    }

    /// Store the map of a stacked layer. Underground maps go to `unique_maps`.
    pub fn set_map(&mut self, layer: Layer, id: MapId) {
        match layer {
            Layer::Entry => self.entry = Some(id),
            Layer::Sewers => self.sewers = Some(id),
            Layer::Subway => self.subway = Some(id),
            Layer::Underground => self.unique_maps.push(id),
        }
    }

    /// All maps of this district, stacked layers first.
    pub fn maps(&self) -> Vec<MapId> {
        [self.entry, self.sewers, self.subway]
            .into_iter()
            .flatten()
            .chain(self.unique_maps.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_uses_column_letter_and_row() {
        assert_eq!(
            District::default_name(Point::new(1, 2), DistrictKind::Green),
            "Green District B3"
        );
    }

    #[test]
    fn layers_round_trip_through_setters() {
        let mut d = District::new(Point::new(0, 0), DistrictKind::Business, 9);
        assert!(d.maps().is_empty());
        d.set_map(Layer::Entry, MapId(1));
        d.set_map(Layer::Sewers, MapId(2));
        d.set_map(Layer::Underground, MapId(5));
        assert_eq!(d.map(Layer::Entry), Some(MapId(1)));
        assert_eq!(d.map(Layer::Subway), None);
        assert_eq!(d.maps(), vec![MapId(1), MapId(2), MapId(5)]);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&DistrictKind::Residential).unwrap();
        assert_eq!(json, "\"residential\"");
    }
}
