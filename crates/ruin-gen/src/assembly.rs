//! World creation, district creation, the underground facility, and grid
//! linking. Each function is one queued step of the generation program.

use ruin_core::{
    District, DistrictKind, Layer, MapId, Point, UniqueMap, UniqueMapKind, Weather, World, Zone,
};
use tracing::{debug, info};

use crate::error::{GenError, GenResult};
use crate::factory::{BuildingWeights, MapParams};
use crate::link::Edge;
use crate::seed::{district_seed, layer_seed};
use crate::state::GenState;

const WEATHER_MIN_TURNS: i32 = 90;
const WEATHER_MAX_TURNS: i32 = 360;

/// Allocate an empty grid, roll the weather, and reserve the police
/// station and hospital cells.
pub fn create_world(state: &mut GenState) -> GenResult<()> {
    let size = state.config.size;
    let mut world = World::new(state.config.seed, size);
    world.weather = state
        .dice
        .choose(&Weather::ALL)
        .copied()
        .unwrap_or(Weather::Clear);
    world.next_weather_check = state.dice.roll(WEATHER_MIN_TURNS, WEATHER_MAX_TURNS) as u32;
    state.world = world;

    // Two distinct cells, sampled without replacement.
    let cells = (size * size) as i32;
    let first = state.dice.roll(0, cells);
    let mut second = state.dice.roll(0, cells - 1);
    if second >= first {
        second += 1;
    }
    state.police_cell = cell_at(first, size);
    state.hospital_cell = cell_at(second, size);

    info!(
        size,
        weather = %state.world.weather,
        police = %state.police_cell,
        hospital = %state.hospital_cell,
        "world created"
    );
    Ok(())
}

fn cell_at(index: i32, size: u32) -> Point {
    let size = size as i32;
    Point::new(index % size, index / size)
}

/// Create the district at `pos` with all of its stacked maps.
pub fn create_district(state: &mut GenState, pos: Point) -> GenResult<()> {
    let kind = if pos == Point::new(0, 0) {
        DistrictKind::Business
    } else {
        state
            .dice
            .choose(&DistrictKind::ALL)
            .copied()
            .unwrap_or(DistrictKind::General)
    };
    let seed = district_seed(state.config.seed, pos);
    let mut district = District::new(pos, kind, seed);
    let (width, height) = (state.config.map_width, state.config.map_height);

    let params = MapParams {
        name: district.name.clone(),
        width,
        height,
        district: pos,
        kind,
        weights: BuildingWeights::for_kind(kind, state.config.kind_factor),
        force_police_station: pos == state.police_cell,
        force_hospital: pos == state.hospital_cell,
    };
    let entry_seed = layer_seed(seed, Layer::Entry);
    let mut entry = state.factory.generate(entry_seed, &params)?;
    entry.seed = entry_seed;
    entry.district = pos;
    let entry = state.world.add_map(entry);
    district.set_map(Layer::Entry, entry);

    let handle = UniqueMap {
        map: entry,
        district: pos,
    };
    if params.force_police_station {
        state
            .world
            .uniques
            .set_map(UniqueMapKind::PoliceStation, handle)?;
    }
    if params.force_hospital {
        state.world.uniques.set_map(UniqueMapKind::Hospital, handle)?;
    }

    let sewers_seed = layer_seed(seed, Layer::Sewers);
    let mut sewers = state
        .factory
        .generate_sewers(sewers_seed, &district, width, height)?;
    sewers.seed = sewers_seed;
    sewers.district = pos;
    let sewers = state.world.add_map(sewers);
    district.set_map(Layer::Sewers, sewers);

    if pos.y == state.world.middle_row() {
        let subway_seed = layer_seed(seed, Layer::Subway);
        let mut subway = state
            .factory
            .generate_subway(subway_seed, &district, width, height)?;
        subway.seed = subway_seed;
        subway.district = pos;
        let subway = state.world.add_map(subway);
        district.set_map(Layer::Subway, subway);
    }

    debug!(
        %pos,
        %kind,
        name = %district.name,
        maps = district.maps().len(),
        "district created"
    );
    state.world.set_district(district)?;
    Ok(())
}

/// Street maps of business districts that have at least one office.
fn facility_candidates(world: &World) -> Vec<(Point, MapId)> {
    let mut out = Vec::new();
    for district in world.districts() {
        if district.kind != DistrictKind::Business {
            continue;
        }
        let Some(entry) = district.entry else {
            continue;
        };
        if world
            .map(entry)
            .is_some_and(|m| !m.zones_with_tag("office").is_empty())
        {
            out.push((district.position, entry));
        }
    }
    out
}

/// Lay out the underground facility below a random office of a random
/// business district and connect it to the surface.
pub fn generate_facility(state: &mut GenState) -> GenResult<()> {
    let candidates = facility_candidates(&state.world);
    let &(pos, anchor_id) = state
        .dice
        .choose(&candidates)
        .ok_or(GenError::NoFacilityAnchor)?;

    let anchor = state.world.try_map(anchor_id)?;
    let offices: Vec<Zone> = anchor
        .zones_with_tag("office")
        .into_iter()
        .cloned()
        .collect();
    let zone = state
        .dice
        .choose(&offices)
        .ok_or(GenError::NoFacilityAnchor)?;

    let base = state
        .world
        .district(pos)
        .map(|d| d.seed)
        .unwrap_or_else(|| district_seed(state.config.seed, pos));
    let seed = layer_seed(base, Layer::Underground);
    let layout = state.factory.generate_underground(seed, anchor, zone)?;

    let mut map = layout.map;
    map.seed = seed;
    map.district = pos;
    let facility = state.world.add_map(map);
    let (surface, below) = state.world.maps_pair_mut(anchor_id, facility)?;
    state
        .linker
        .link_stairs(surface, layout.anchor, below, layout.entry)?;

    if let Some(district) = state.world.district_mut(pos) {
        district.set_map(Layer::Underground, facility);
    }
    state.world.uniques.set_map(
        UniqueMapKind::UndergroundFacility,
        UniqueMap {
            map: facility,
            district: pos,
        },
    )?;
    state.facility_anchor = Some((anchor_id, layout.anchor));

    info!(district = %pos, zone = %zone.name, anchor = %layout.anchor, "underground facility placed");
    Ok(())
}

/// Link the district at `pos` with its west and north neighbours.
///
/// Street west, street north, sewers west, sewers north, then subway west;
/// the order fixes how the shared dice are consumed.
pub fn link_district(state: &mut GenState, pos: Point) -> GenResult<()> {
    let west = pos.offset(-1, 0);
    let north = pos.offset(0, -1);
    let passes = [
        (Layer::Entry, west, Edge::Horizontal),
        (Layer::Entry, north, Edge::Vertical),
        (Layer::Sewers, west, Edge::Horizontal),
        (Layer::Sewers, north, Edge::Vertical),
        (Layer::Subway, west, Edge::Horizontal),
    ];

    for (layer, neighbour, edge) in passes {
        let from = state.world.district(neighbour).and_then(|d| d.map(layer));
        let to = state.world.district(pos).and_then(|d| d.map(layer));
        let (Some(from), Some(to)) = (from, to) else {
            continue;
        };
        let (from, to) = state.world.maps_pair_mut(from, to)?;
        match layer {
            Layer::Entry => {
                state.stats.street_pairs +=
                    state.linker.link_street(from, to, edge, &mut state.dice)?;
            }
            Layer::Sewers => state.stats.sewer_pairs += state.linker.link_sewers(from, to, edge)?,
            Layer::Subway => state.stats.subway_pairs += state.linker.link_subway(from, to)?,
            Layer::Underground => {}
        }
    }
    debug!(%pos, "district linked");
    Ok(())
}
