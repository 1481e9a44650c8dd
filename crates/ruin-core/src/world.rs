use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ActorId};
use crate::district::District;
use crate::error::{WorldError, WorldResult};
use crate::geometry::Point;
use crate::map::{Layer, Map, MapId};
use crate::unique::UniqueRegistry;

/// Current weather over the whole city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    /// Clear skies.
    Clear,
    /// Overcast.
    Cloudy,
    /// Rain.
    Rain,
    /// Heavy rain.
    HeavyRain,
}

impl Weather {
    /// Every weather, in the order used when rolling one.
    pub const ALL: [Weather; 4] = [Self::Clear, Self::Cloudy, Self::Rain, Self::HeavyRain];
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::HeavyRain => "heavy rain",
        })
    }
}

/// The city: a square grid of districts plus every map, actor and unique
/// handle generated for it.
///
/// Maps live in an arena indexed by [`MapId`]; districts and exits refer to
/// maps by id so the aggregate has a single owner.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    /// Master seed the world was generated from.
    pub seed: u64,
    /// Current weather.
    pub weather: Weather,
    /// Turns until the weather is rolled again.
    pub next_weather_check: u32,
    /// Unique maps and actors.
    pub uniques: UniqueRegistry,
    /// The player's actor, once created.
    pub player: Option<ActorId>,
    size: u32,
    districts: Vec<Option<District>>,
    maps: Vec<Map>,
    actors: Vec<Actor>,
}

impl World {
    /// Create an empty `size`×`size` world.
    pub fn new(seed: u64, size: u32) -> Self {
        Self {
            seed,
            weather: Weather::Clear,
            next_weather_check: 0,
            uniques: UniqueRegistry::new(),
            player: None,
            size,
            districts: vec![None; (size * size) as usize],
            maps: Vec::new(),
            actors: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Grid
    // -----------------------------------------------------------------------

    /// Width (and height) of the district grid.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The row that carries subway maps.
    pub fn middle_row(&self) -> i32 {
        (self.size / 2) as i32
    }

    /// Whether `pos` is a cell of the grid.
    pub fn contains(&self, pos: Point) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.size && (pos.y as u32) < self.size
    }

    /// Every grid cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Point> + use<> {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Point::new(x, y)))
    }

    fn cell_index(&self, pos: Point) -> WorldResult<usize> {
        if !self.contains(pos) {
            return Err(WorldError::DistrictOutOfBounds {
                pos,
                size: self.size,
            });
        }
        Ok(pos.y as usize * self.size as usize + pos.x as usize)
    }

    // -----------------------------------------------------------------------
    // Districts
    // -----------------------------------------------------------------------

    /// Store a district at its own position, replacing any previous one.
    pub fn set_district(&mut self, district: District) -> WorldResult<()> {
        let i = self.cell_index(district.position)?;
        self.districts[i] = Some(district);
        Ok(())
    }

    /// The district at `pos`, if created.
    pub fn district(&self, pos: Point) -> Option<&District> {
        self.cell_index(pos)
            .ok()
            .and_then(|i| self.districts[i].as_ref())
    }

    /// Mutable access to the district at `pos`.
    pub fn district_mut(&mut self, pos: Point) -> Option<&mut District> {
        let i = self.cell_index(pos).ok()?;
        self.districts[i].as_mut()
    }

    /// All created districts in row-major order.
    pub fn districts(&self) -> impl Iterator<Item = &District> {
        self.districts.iter().flatten()
    }

    /// The map of `layer` in the district at `pos`.
    pub fn district_map(&self, pos: Point, layer: Layer) -> Option<&Map> {
        self.district(pos)
            .and_then(|d| d.map(layer))
            .and_then(|id| self.map(id))
    }

    // -----------------------------------------------------------------------
    // Maps
    // -----------------------------------------------------------------------

    /// Move a map into the arena and assign its identity.
    pub fn add_map(&mut self, mut map: Map) -> MapId {
        let id = MapId(self.maps.len() as u32);
        map.id = id;
        self.maps.push(map);
        id
    }

    /// The map with `id`.
    pub fn map(&self, id: MapId) -> Option<&Map> {
        self.maps.get(id.0 as usize)
    }

    /// Mutable access to the map with `id`.
    pub fn map_mut(&mut self, id: MapId) -> Option<&mut Map> {
        self.maps.get_mut(id.0 as usize)
    }

    /// The map with `id`, or an error naming it.
    pub fn try_map(&self, id: MapId) -> WorldResult<&Map> {
        self.map(id).ok_or(WorldError::MapNotFound(id))
    }

    /// Mutable map lookup, or an error naming it.
    pub fn try_map_mut(&mut self, id: MapId) -> WorldResult<&mut Map> {
        self.map_mut(id).ok_or(WorldError::MapNotFound(id))
    }

    /// Borrow two distinct maps mutably at once.
    pub fn maps_pair_mut(&mut self, a: MapId, b: MapId) -> WorldResult<(&mut Map, &mut Map)> {
        let (ia, ib) = (a.0 as usize, b.0 as usize);
        if ia >= self.maps.len() || ia == ib {
            return Err(WorldError::MapNotFound(a));
        }
        if ib >= self.maps.len() {
            return Err(WorldError::MapNotFound(b));
        }
        if ia < ib {
            let (head, tail) = self.maps.split_at_mut(ib);
            Ok((&mut head[ia], &mut tail[0]))
        } else {
            let (head, tail) = self.maps.split_at_mut(ia);
            Ok((&mut tail[0], &mut head[ib]))
        }
    }

    /// Every map in creation order.
    pub fn maps(&self) -> &[Map] {
        &self.maps
    }

    /// Number of maps on `layer`.
    pub fn count_layer(&self, layer: Layer) -> usize {
        self.maps.iter().filter(|m| m.layer == layer).count()
    }

    // -----------------------------------------------------------------------
    // Actors
    // -----------------------------------------------------------------------

    /// Add an actor.
    pub fn add_actor(&mut self, actor: Actor) -> ActorId {
        self.actors.push(actor);
        ActorId(self.actors.len() - 1)
    }

    /// The actor with `id`.
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0)
    }

    /// Every actor in creation order.
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// The actor standing on `pos` of `map`, if any.
    pub fn actor_at(&self, map: MapId, pos: Point) -> Option<ActorId> {
        self.actors
            .iter()
            .position(|a| a.map == map && a.position == pos)
            .map(ActorId)
    }

    /// Whether an actor could be placed on `pos` of `map`.
    pub fn is_free_for_actor(&self, map: MapId, pos: Point) -> bool {
        self.map(map).is_some_and(|m| m.is_free(pos)) && self.actor_at(map, pos).is_none()
    }
}
