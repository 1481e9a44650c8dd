//! The built-in map factory.
//!
//! Street maps are cut into square blocks separated by one-tile roads; each
//! block becomes a building or a park. Sewers are rock with a lattice of
//! tunnels, subways a single rail corridor, and the underground facility a
//! fixed four-room complex. Every map is a pure function of its seed.

use ruin_core::{District, DistrictKind, Layer, Map, MapObject, Point, Rect, Tile, Zone};

use crate::dice::Dice;
use crate::error::{GenError, GenResult};
use crate::factory::{BuildingWeights, MapFactory, MapParams, UndergroundLayout};

const BLOCK_STRIDE: i32 = 10;
const MIN_BLOCK: i32 = 5;
const CIVIC_MIN_BLOCK: i32 = 7;
const CAR_CHANCE: i32 = 2;
const TREE_CHANCE: i32 = 15;
const SEWER_SPACING: i32 = 5;
const UNDERGROUND_SIZE: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Building {
    Office,
    Shop,
    Park,
    House,
    PoliceStation,
    Hospital,
}

impl Building {
    fn label(self) -> &'static str {
        match self {
            Self::Office => "Office",
            Self::Shop => "Shop",
            Self::Park => "Park",
            Self::House => "House",
            Self::PoliceStation => "Police Station",
            Self::Hospital => "Hospital",
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Self::Office => "office",
            Self::Shop => "shop",
            Self::Park => "park",
            Self::House => "house",
            Self::PoliceStation => "police",
            Self::Hospital => "hospital",
        }
    }

    fn furniture(self) -> &'static str {
        match self {
            Self::Office => "desk",
            Self::Shop => "shelf",
            Self::Park => "bench",
            Self::House => "bed",
            Self::PoliceStation => "gun rack",
            Self::Hospital => "hospital bed",
        }
    }
}

/// Lays out maps from city blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockFactory;

/// Block rectangles of a `width`×`height` street map, row by row. The
/// outermost ring of the map is always road.
fn blocks(width: i32, height: i32) -> Vec<Rect> {
    let mut out = Vec::new();
    let mut top = 1;
    while top < height - 1 {
        let h = (BLOCK_STRIDE - 1).min(height - 1 - top);
        let mut left = 1;
        while left < width - 1 {
            let w = (BLOCK_STRIDE - 1).min(width - 1 - left);
            if w >= MIN_BLOCK && h >= MIN_BLOCK {
                out.push(Rect::new(left, top, w, h));
            }
            left += BLOCK_STRIDE;
        }
        top += BLOCK_STRIDE;
    }
    out
}

fn roll_building(dice: &mut Dice, weights: &BuildingWeights) -> Building {
    if dice.roll_chance(weights.office) {
        Building::Office
    } else if dice.roll_chance(weights.shop) {
        Building::Shop
    } else if dice.roll_chance(weights.park) {
        Building::Park
    } else {
        Building::House
    }
}

fn zone_name(label: &str, rect: Rect) -> String {
    format!("{label}@{},{}", rect.left, rect.top)
}

fn make_building(map: &mut Map, rect: Rect, building: Building, dice: &mut Dice) {
    map.fill(rect, Tile::WALL);
    let inner = rect.inset(1);
    map.fill(inner, Tile::FLOOR);

    let door_x = dice.roll(rect.left + 1, rect.right() - 1);
    let (door, doorstep) = if dice.roll_chance(50) {
        let door = Point::new(door_x, rect.top);
        (door, door.offset(0, 1))
    } else {
        let door = Point::new(door_x, rect.bottom() - 1);
        (door, door.offset(0, -1))
    };
    map.set_tile(door, Tile::FLOOR);
    map.place_object(door, MapObject::passable("door"));

    for _ in 0..dice.roll(1, 4) {
        let p = Point::new(
            dice.roll(inner.left, inner.right()),
            dice.roll(inner.top, inner.bottom()),
        );
        if p != doorstep && map.object_at(p).is_none() {
            map.place_object(p, MapObject::blocking(building.furniture()));
        }
    }

    map.add_zone(Zone::new(
        zone_name(building.label(), rect),
        rect,
        &[building.tag()],
    ));
}

fn make_park(map: &mut Map, rect: Rect, dice: &mut Dice) {
    for p in rect.points() {
        if !rect.on_border(p) && dice.roll_chance(TREE_CHANCE) {
            map.place_object(p, MapObject::blocking("tree"));
        }
    }
    let bench = rect.center();
    if map.object_at(bench).is_none() {
        map.place_object(bench, MapObject::passable(Building::Park.furniture()));
    }
    map.add_zone(Zone::new(zone_name("Park", rect), rect, &["park"]));
}

fn scatter_cars(map: &mut Map, dice: &mut Dice) {
    let roads: Vec<Point> = map
        .points()
        .filter(|p| !map.is_inside(*p) && map.zones_at(*p).is_empty())
        .collect();
    for p in roads {
        if dice.roll_chance(CAR_CHANCE) {
            map.place_object(p, MapObject::blocking("wrecked car"));
        }
    }
}

impl MapFactory for BlockFactory {
    fn generate(&mut self, seed: u64, params: &MapParams) -> GenResult<Map> {
        let mut dice = Dice::new(seed);
        let mut map = Map::new(&params.name, Layer::Entry, params.width, params.height);
        map.seed = seed;
        map.district = params.district;
        let bounds = map.bounds();
        map.fill(bounds, Tile::GROUND);

        let mut police = params.force_police_station;
        let mut hospital = params.force_hospital;
        // Business districts always get at least one office.
        let mut office = params.kind != DistrictKind::Business;
        let rects = blocks(params.width, params.height);
        let last = rects.len().saturating_sub(1);
        for (i, rect) in rects.into_iter().enumerate() {
            let civic = rect.width >= CIVIC_MIN_BLOCK && rect.height >= CIVIC_MIN_BLOCK;
            let building = if police && civic {
                police = false;
                Building::PoliceStation
            } else if hospital && civic {
                hospital = false;
                Building::Hospital
            } else if !office && i == last {
                Building::Office
            } else {
                roll_building(&mut dice, &params.weights)
            };
            office |= building == Building::Office;
            match building {
                Building::Park => make_park(&mut map, rect, &mut dice),
                other => make_building(&mut map, rect, other, &mut dice),
            }
        }
        if police || hospital {
            return Err(GenError::Layout(format!(
                "{} has no block large enough for its civic buildings",
                params.name
            )));
        }

        scatter_cars(&mut map, &mut dice);
        Ok(map)
    }

    fn generate_sewers(
        &mut self,
        seed: u64,
        district: &District,
        width: i32,
        height: i32,
    ) -> GenResult<Map> {
        let mut dice = Dice::new(seed);
        let mut map = Map::new(
            format!("{} - sewers", district.name),
            Layer::Sewers,
            width,
            height,
        );
        map.seed = seed;
        map.district = district.position;

        let tunnels: Vec<Point> = map
            .points()
            .filter(|p| p.x % SEWER_SPACING == 2 || p.y % SEWER_SPACING == 2)
            .collect();
        for p in tunnels {
            map.set_tile(p, Tile::FLOOR);
        }

        let columns = (width - 4) / SEWER_SPACING + 1;
        let rows = (height - 4) / SEWER_SPACING + 1;
        for _ in 0..dice.roll(1, 4) {
            let at = Point::new(
                2 + SEWER_SPACING * dice.roll(0, columns),
                2 + SEWER_SPACING * dice.roll(0, rows),
            );
            let room = Rect::new(at.x - 1, at.y - 1, 3, 3);
            map.fill(room, Tile::FLOOR);
            map.add_zone(Zone::new(
                zone_name("Maintenance", room),
                room,
                &["sewers", "maintenance"],
            ));
        }
        Ok(map)
    }

    fn generate_subway(
        &mut self,
        seed: u64,
        district: &District,
        width: i32,
        height: i32,
    ) -> GenResult<Map> {
        let mut map = Map::new(
            format!("{} - subway", district.name),
            Layer::Subway,
            width,
            height,
        );
        map.seed = seed;
        map.district = district.position;

        let mid = height / 2;
        let corridor = Rect::new(0, mid - 2, width, 5);
        map.fill(corridor, Tile::FLOOR);
        for x in 0..width {
            map.place_object(Point::new(x, mid - 1), MapObject::passable("rails"));
            map.place_object(Point::new(x, mid + 1), MapObject::passable("rails"));
        }
        map.add_zone(Zone::new(zone_name("Rails", corridor), corridor, &["subway"]));

        let platform = Rect::new(width / 2 - 4, mid - 4, 8, 2);
        map.fill(platform, Tile::FLOOR);
        map.add_zone(Zone::new(
            zone_name("Platform", platform),
            platform,
            &["subway", "platform"],
        ));
        Ok(map)
    }

    fn generate_underground(
        &mut self,
        seed: u64,
        anchor: &Map,
        zone: &Zone,
    ) -> GenResult<UndergroundLayout> {
        let mut dice = Dice::new(seed);
        let spots: Vec<Point> = zone
            .bounds
            .inset(1)
            .points()
            .filter(|p| anchor.is_free(*p) && anchor.exit_at(*p).is_none())
            .collect();
        let anchor_pos = *dice.choose(&spots).ok_or_else(|| {
            GenError::Layout(format!("{} has no free tile for an entrance", zone.name))
        })?;

        let size = UNDERGROUND_SIZE;
        let mid = size / 2;
        let mut map = Map::new("Underground Facility", Layer::Underground, size, size);
        map.seed = seed;
        map.district = anchor.district;

        let hall = Rect::new(mid - 1, 1, 3, size - 2);
        map.fill(Rect::new(1, mid - 1, size - 2, 3), Tile::FLOOR);
        map.fill(hall, Tile::FLOOR);
        map.add_zone(Zone::new("Facility Hall", hall, &["facility"]));

        let rooms = [
            ("Facility Office", "office", 2, 2),
            ("Facility Lab", "lab", mid + 3, 2),
            ("Facility Storage", "storage", 2, mid + 3),
            ("Facility Armory", "armory", mid + 3, mid + 3),
        ];
        for (label, tag, left, top) in rooms {
            let room = Rect::new(left, top, mid - 4, mid - 4);
            map.fill(room, Tile::FLOOR);
            let door_x = if left < mid { mid - 2 } else { mid + 2 };
            map.set_tile(Point::new(door_x, room.center().y), Tile::FLOOR);
            map.add_zone(Zone::new(zone_name(label, room), room, &["facility", tag]));
        }

        Ok(UndergroundLayout {
            map,
            anchor: anchor_pos,
            entry: Point::new(mid, mid),
        })
    }
}
