use std::collections::BTreeSet;

use colored::Colorize;
use ruin_core::{Layer, Map, Point, World};
use ruin_gen::GenConfig;

pub fn run(config: GenConfig, pos: Point, layer: Layer) -> Result<(), String> {
    let (world, _) = super::build_world(config)?;

    let district = world
        .district(pos)
        .ok_or_else(|| format!("no district at {pos} in a {0}x{0} world", world.size()))?;
    let id = district
        .map(layer)
        .ok_or_else(|| format!("{} has no {layer} map", district.name))?;
    let map = world
        .map(id)
        .ok_or_else(|| format!("map {id} is missing"))?;

    println!(
        "  {} {}",
        map.name.bold(),
        format!(
            "({layer}, {}x{}, seed {}, {} exits)",
            map.width(),
            map.height(),
            map.seed,
            map.exit_count()
        )
        .dimmed()
    );
    print!("{}", render(&world, map));
    Ok(())
}

/// Tiles an exit can be taken from: the exit tile itself when in bounds,
/// otherwise the edge tiles next to the off-map slot.
fn exit_tiles(map: &Map) -> BTreeSet<Point> {
    let mut tiles = BTreeSet::new();
    for (slot, _) in map.exits() {
        if map.in_bounds(slot) {
            tiles.insert(slot);
        } else {
            tiles.extend(slot.neighbours().into_iter().filter(|p| map.in_bounds(*p)));
        }
    }
    tiles
}

fn render(world: &World, map: &Map) -> String {
    let exits = exit_tiles(map);
    let actors: BTreeSet<Point> = world
        .actors()
        .iter()
        .filter(|a| a.map == map.id)
        .map(|a| a.position)
        .collect();

    let mut out = String::with_capacity(((map.width() + 1) * map.height()) as usize);
    for y in 0..map.height() {
        for x in 0..map.width() {
            let p = Point::new(x, y);
            let glyph = if actors.contains(&p) {
                '@'
            } else if exits.contains(&p) {
                '>'
            } else if map.is_blocked(p) {
                'o'
            } else if !map.is_walkable(p) {
                '#'
            } else if map.is_inside(p) {
                '.'
            } else {
                ','
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use ruin_core::{Actor, Exit, MapId, MapObject, Rect, Tile};

    use super::*;

    #[test]
    fn glyphs() {
        let mut world = World::new(1, 2);
        let mut map = Map::new("tiny", Layer::Entry, 4, 3);
        map.fill(Rect::new(0, 0, 4, 1), Tile::GROUND);
        map.fill(Rect::new(0, 1, 4, 1), Tile::FLOOR);
        map.place_object(Point::new(1, 1), MapObject::blocking("desk"));
        map.set_exit(Point::new(4, 0), Exit::new(MapId(9), Point::new(0, 0)))
            .unwrap();
        let id = world.add_map(map);
        world.add_actor(Actor::new("Sam Stone", id, Point::new(2, 1)));

        let text = render(&world, world.map(id).unwrap());
        assert_eq!(text, ",,,>\n.o@.\n####\n");
    }
}
