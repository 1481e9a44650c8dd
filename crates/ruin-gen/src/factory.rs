use ruin_core::{District, DistrictKind, Map, Point, Zone};

use crate::error::GenResult;

/// Percent chances, per city block, of the three biased building types.
/// A block that rolls none of them becomes a house.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingWeights {
    /// Office building.
    pub office: i32,
    /// Shop.
    pub shop: i32,
    /// Park.
    pub park: i32,
}

impl BuildingWeights {
    /// Unbiased chances.
    pub const BASE: BuildingWeights = BuildingWeights {
        office: 10,
        shop: 10,
        park: 10,
    };

    /// Chances for a district kind: the favored type is multiplied by
    /// `factor`, the others divided by it.
    pub fn for_kind(kind: DistrictKind, factor: i32) -> Self {
        let factor = factor.max(1);
        let up = |v: i32| (v * factor).min(100);
        let down = |v: i32| v / factor;
        let b = Self::BASE;
        match kind {
            DistrictKind::Business => Self {
                office: up(b.office),
                shop: down(b.shop),
                park: down(b.park),
            },
            DistrictKind::Shopping => Self {
                office: down(b.office),
                shop: up(b.shop),
                park: down(b.park),
            },
            DistrictKind::Green => Self {
                office: down(b.office),
                shop: down(b.shop),
                park: up(b.park),
            },
            DistrictKind::Residential => Self {
                office: down(b.office),
                shop: down(b.shop),
                park: down(b.park),
            },
            DistrictKind::General => b,
        }
    }
}

/// Everything a street map generation call needs. Passed by reference to
/// each call; nothing about it is shared between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct MapParams {
    /// Map name.
    pub name: String,
    /// Width in tiles.
    pub width: i32,
    /// Height in tiles.
    pub height: i32,
    /// Owning district coordinate.
    pub district: Point,
    /// Owning district kind.
    pub kind: DistrictKind,
    /// Biased building chances.
    pub weights: BuildingWeights,
    /// The map must contain the police station.
    pub force_police_station: bool,
    /// The map must contain the hospital.
    pub force_hospital: bool,
}

/// A unique underground map plus where it connects to the surface.
#[derive(Debug, Clone)]
pub struct UndergroundLayout {
    /// The underground map.
    pub map: Map,
    /// Surface tile (on the anchor map) leading down.
    pub anchor: Point,
    /// Underground tile leading up.
    pub entry: Point,
}

/// Lays out individual maps. The generator treats it as a black box and only
/// relies on the tile queries [`Map`] exposes.
///
/// Implementations must be pure in their inputs: the same seed and
/// parameters give the same map.
pub trait MapFactory {
    /// Street level map of a district.
    fn generate(&mut self, seed: u64, params: &MapParams) -> GenResult<Map>;

    /// Sewers below a district.
    fn generate_sewers(
        &mut self,
        seed: u64,
        district: &District,
        width: i32,
        height: i32,
    ) -> GenResult<Map>;

    /// Subway tunnels below a district of the middle row.
    fn generate_subway(
        &mut self,
        seed: u64,
        district: &District,
        width: i32,
        height: i32,
    ) -> GenResult<Map>;

    /// The unique underground facility, entered from `zone` of `anchor`.
    fn generate_underground(
        &mut self,
        seed: u64,
        anchor: &Map,
        zone: &Zone,
    ) -> GenResult<UndergroundLayout>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_favors_offices() {
        let w = BuildingWeights::for_kind(DistrictKind::Business, 8);
        assert_eq!(w, BuildingWeights { office: 80, shop: 1, park: 1 });
    }

    #[test]
    fn residential_disfavors_everything() {
        let w = BuildingWeights::for_kind(DistrictKind::Residential, 8);
        assert_eq!(w, BuildingWeights { office: 1, shop: 1, park: 1 });
    }

    #[test]
    fn general_is_unbiased_and_chances_cap_at_100() {
        assert_eq!(
            BuildingWeights::for_kind(DistrictKind::General, 8),
            BuildingWeights::BASE
        );
        assert_eq!(BuildingWeights::for_kind(DistrictKind::Green, 50).park, 100);
    }
}
