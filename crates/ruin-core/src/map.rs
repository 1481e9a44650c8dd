use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{WorldError, WorldResult};
use crate::geometry::{Point, Rect};

/// Identity of a map within its world's map arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapId(pub u32);

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which stacked layer of a district a map belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Street level.
    Entry,
    /// The sewers below the street.
    Sewers,
    /// Subway tunnels (middle row of the grid only).
    Subway,
    /// A hand-designated underground map anchored in one district.
    Underground,
}

impl Layer {
    /// Lowercase label used in names and CLI arguments.
    pub fn label(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Sewers => "sewers",
            Self::Subway => "subway",
            Self::Underground => "underground",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static content of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Actors can stand here.
    pub walkable: bool,
    /// Part of a building interior or an underground space.
    pub inside: bool,
    /// The player has already seen this tile.
    pub seen: bool,
}

impl Tile {
    /// Solid wall or rock.
    pub const WALL: Tile = Tile {
        walkable: false,
        inside: true,
        seen: false,
    };
    /// Walkable interior floor.
    pub const FLOOR: Tile = Tile {
        walkable: true,
        inside: true,
        seen: false,
    };
    /// Walkable outdoor ground (roads, parks, sidewalks).
    pub const GROUND: Tile = Tile {
        walkable: true,
        inside: false,
        seen: false,
    };
}

/// Furniture, cars, trees: anything placed on a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapObject {
    /// Display name.
    pub name: String,
    /// Whether the object prevents actors from entering its tile.
    pub blocks: bool,
}

impl MapObject {
    /// An object that blocks movement.
    pub fn blocking(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: true,
        }
    }

    /// An object actors can walk over.
    pub fn passable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: false,
        }
    }
}

/// A named, tagged sub-region of a map ("Office@12,4" tagged `office`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone name; unique within a map by convention, not enforced.
    pub name: String,
    /// Covered tiles.
    pub bounds: Rect,
    /// Free-form tags such as `office`, `shop`, `park`.
    pub tags: Vec<String>,
}

impl Zone {
    /// Create a zone with the given tags.
    pub fn new(name: impl Into<String>, bounds: Rect, tags: &[&str]) -> Self {
        Self {
            name: name.into(),
            bounds,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    /// Whether the zone carries `tag` (case-insensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// A directed passage from a tile of one map to a tile of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exit {
    /// Destination map.
    pub to_map: MapId,
    /// Landing tile on the destination map.
    pub to_position: Point,
}

impl Exit {
    /// Create an exit.
    pub fn new(to_map: MapId, to_position: Point) -> Self {
        Self {
            to_map,
            to_position,
        }
    }
}

/// One traversable tile grid.
///
/// Exits may be keyed one tile beyond the map edge: stepping off the map at
/// that point follows the exit. Everything else is strictly in bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    /// Identity in the world's arena; assigned by [`World::add_map`](crate::World::add_map).
    pub id: MapId,
    /// Display name.
    pub name: String,
    /// Seed the layout was generated from.
    pub seed: u64,
    /// Grid coordinate of the owning district.
    pub district: Point,
    /// Layer within the district.
    pub layer: Layer,
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    objects: BTreeMap<Point, MapObject>,
    items: BTreeMap<Point, Vec<String>>,
    decorations: BTreeMap<Point, Vec<String>>,
    exits: BTreeMap<Point, Exit>,
    zones: Vec<Zone>,
}

impl Map {
    /// Create a map of solid walls.
    pub fn new(name: impl Into<String>, layer: Layer, width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            id: MapId(0),
            name: name.into(),
            seed: 0,
            district: Point::new(0, 0),
            layer,
            width,
            height,
            tiles: vec![Tile::WALL; (width * height) as usize],
            objects: BTreeMap::new(),
            items: BTreeMap::new(),
            decorations: BTreeMap::new(),
            exits: BTreeMap::new(),
            zones: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Tiles
    // -----------------------------------------------------------------------

    /// Width in tiles.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in tiles.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The whole map as a rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Whether `p` is a tile of this map.
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    fn index(&self, p: Point) -> Option<usize> {
        self.in_bounds(p)
            .then(|| (p.y * self.width + p.x) as usize)
    }

    /// The tile at `p`, if in bounds.
    pub fn tile(&self, p: Point) -> Option<&Tile> {
        self.index(p).map(|i| &self.tiles[i])
    }

    /// Overwrite the tile at `p`. Out-of-bounds writes are ignored.
    pub fn set_tile(&mut self, p: Point, tile: Tile) {
        if let Some(i) = self.index(p) {
            self.tiles[i] = tile;
        }
    }

    /// Overwrite every in-bounds tile of `rect`.
    pub fn fill(&mut self, rect: Rect, tile: Tile) {
        for p in rect.points() {
            self.set_tile(p, tile);
        }
    }

    /// Whether an actor could stand on `p` if nothing were in the way.
    pub fn is_walkable(&self, p: Point) -> bool {
        self.tile(p).is_some_and(|t| t.walkable)
    }

    /// Whether `p` is an interior tile.
    pub fn is_inside(&self, p: Point) -> bool {
        self.tile(p).is_some_and(|t| t.inside)
    }

    /// Iterate over all in-bounds points, row by row.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let width = self.width;
        (0..self.tiles.len() as i32).map(move |i| Point::new(i % width, i / width))
    }

    /// Flag the tile at `p` as seen by the player.
    pub fn mark_seen(&mut self, p: Point) {
        if let Some(i) = self.index(p) {
            self.tiles[i].seen = true;
        }
    }

    /// Number of tiles already seen.
    pub fn seen_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.seen).count()
    }

    // -----------------------------------------------------------------------
    // Objects, items, decorations
    // -----------------------------------------------------------------------

    /// The object on `p`, if any.
    pub fn object_at(&self, p: Point) -> Option<&MapObject> {
        self.objects.get(&p)
    }

    /// Put an object on an in-bounds tile, replacing any previous one.
    pub fn place_object(&mut self, p: Point, object: MapObject) {
        if self.in_bounds(p) {
            self.objects.insert(p, object);
        }
    }

    /// Whether a blocking object sits on `p`.
    pub fn is_blocked(&self, p: Point) -> bool {
        self.objects.get(&p).is_some_and(|o| o.blocks)
    }

    /// Walkable and not blocked by an object.
    pub fn is_free(&self, p: Point) -> bool {
        self.is_walkable(p) && !self.is_blocked(p)
    }

    /// Drop an item on an in-bounds tile.
    pub fn add_item(&mut self, p: Point, item: impl Into<String>) {
        if self.in_bounds(p) {
            self.items.entry(p).or_default().push(item.into());
        }
    }

    /// Items lying on `p`.
    pub fn items_at(&self, p: Point) -> &[String] {
        self.items.get(&p).map(Vec::as_slice).unwrap_or_default()
    }

    /// Add a cosmetic decoration to an in-bounds tile.
    pub fn add_decoration(&mut self, p: Point, decoration: impl Into<String>) {
        if self.in_bounds(p) {
            self.decorations.entry(p).or_default().push(decoration.into());
        }
    }

    /// Decorations on `p`.
    pub fn decorations_at(&self, p: Point) -> &[String] {
        self.decorations
            .get(&p)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Zones
    // -----------------------------------------------------------------------

    /// Register a zone.
    pub fn add_zone(&mut self, zone: Zone) {
        self.zones.push(zone);
    }

    /// All zones in registration order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Zones covering `p`.
    pub fn zones_at(&self, p: Point) -> Vec<&Zone> {
        self.zones.iter().filter(|z| z.bounds.contains(p)).collect()
    }

    /// Zones whose name contains `fragment` (case-insensitive).
    pub fn zones_by_partial_name(&self, fragment: &str) -> Vec<&Zone> {
        let needle = fragment.to_lowercase();
        self.zones
            .iter()
            .filter(|z| z.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Zones carrying `tag`.
    pub fn zones_with_tag(&self, tag: &str) -> Vec<&Zone> {
        self.zones.iter().filter(|z| z.has_tag(tag)).collect()
    }

    // -----------------------------------------------------------------------
    // Exits
    // -----------------------------------------------------------------------

    /// Whether an exit may be keyed at `p`: in bounds or one tile beyond an edge.
    pub fn exit_slot_in_range(&self, p: Point) -> bool {
        p.x >= -1 && p.x <= self.width && p.y >= -1 && p.y <= self.height
    }

    /// The exit keyed at `p`, if any.
    pub fn exit_at(&self, p: Point) -> Option<&Exit> {
        self.exits.get(&p)
    }

    /// Write an exit, replacing any previous one at `p`.
    pub fn set_exit(&mut self, p: Point, exit: Exit) -> WorldResult<()> {
        if !self.exit_slot_in_range(p) {
            return Err(WorldError::ExitOutOfRange { map: self.id, pos: p });
        }
        self.exits.insert(p, exit);
        Ok(())
    }

    /// All exits ordered by source tile.
    pub fn exits(&self) -> impl Iterator<Item = (Point, &Exit)> {
        self.exits.iter().map(|(p, e)| (*p, e))
    }

    /// Number of exits leaving this map.
    pub fn exit_count(&self) -> usize {
        self.exits.len()
    }
}
