//! Bidirectional passages between adjacent maps.
//!
//! An exit is keyed on the tile just beyond the source map's edge and lands
//! on the neighbour's edge tile, so walking off a map continues on the next
//! one. Passages are always written in matched pairs.

use ruin_core::{Exit, Map, Point};
use tracing::debug;

use crate::dice::Dice;
use crate::error::GenResult;

/// Which side two neighbouring maps share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// `from` lies west of `to`.
    Horizontal,
    /// `from` lies north of `to`.
    Vertical,
}

/// One candidate passage across a shared edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Crossing {
    from_exit: Point,
    from_landing: Point,
    to_exit: Point,
    to_landing: Point,
}

impl Crossing {
    fn write(self, from: &mut Map, to: &mut Map) -> GenResult<()> {
        from.set_exit(self.from_exit, Exit::new(to.id, self.to_landing))?;
        to.set_exit(self.to_exit, Exit::new(from.id, self.from_landing))?;
        Ok(())
    }
}

/// Candidate passages for every index both maps share along `edge`.
fn crossings(from: &Map, to: &Map, edge: Edge) -> Vec<Crossing> {
    match edge {
        Edge::Horizontal => (0..from.height().min(to.height()))
            .map(|y| Crossing {
                from_exit: Point::new(from.width(), y),
                from_landing: Point::new(from.width() - 1, y),
                to_exit: Point::new(-1, y),
                to_landing: Point::new(0, y),
            })
            .collect(),
        Edge::Vertical => (0..from.width().min(to.width()))
            .map(|x| Crossing {
                from_exit: Point::new(x, from.height()),
                from_landing: Point::new(x, from.height() - 1),
                to_exit: Point::new(x, -1),
                to_landing: Point::new(x, 0),
            })
            .collect(),
    }
}

/// Writes passages between maps according to their layer's rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Linker {
    exit_chance: i32,
}

impl Linker {
    /// Create a linker giving each shared street tile `exit_chance` percent
    /// odds of a passage.
    pub fn new(exit_chance: i32) -> Self {
        Self { exit_chance }
    }

    /// Link two street maps. Each shared index rolls once; a passage is
    /// written only when both landing tiles are free, otherwise neither
    /// direction is. Each edge slot is visited by exactly one pair of maps,
    /// so it is never already taken.
    pub fn link_street(
        &self,
        from: &mut Map,
        to: &mut Map,
        edge: Edge,
        dice: &mut Dice,
    ) -> GenResult<usize> {
        let mut written = 0;
        for c in crossings(from, to, edge) {
            if !dice.roll_chance(self.exit_chance) {
                continue;
            }
            if !(from.is_free(c.from_landing) && to.is_free(c.to_landing)) {
                continue;
            }
            c.write(from, to)?;
            written += 1;
        }
        debug!(from = %from.id, to = %to.id, ?edge, written, "linked streets");
        Ok(written)
    }

    /// Link two sewers maps at every shared index.
    pub fn link_sewers(&self, from: &mut Map, to: &mut Map, edge: Edge) -> GenResult<usize> {
        let all = crossings(from, to, edge);
        let written = all.len();
        for c in all {
            c.write(from, to)?;
        }
        debug!(from = %from.id, to = %to.id, ?edge, written, "linked sewers");
        Ok(written)
    }

    /// Link two subway maps side by side wherever both landings are walkable.
    pub fn link_subway(&self, from: &mut Map, to: &mut Map) -> GenResult<usize> {
        let mut written = 0;
        for c in crossings(from, to, Edge::Horizontal) {
            if from.is_walkable(c.from_landing) && to.is_walkable(c.to_landing) {
                c.write(from, to)?;
                written += 1;
            }
        }
        debug!(from = %from.id, to = %to.id, written, "linked subway");
        Ok(written)
    }

    /// Link two tiles of stacked maps, such as a staircase down to an
    /// underground level. Both tiles are in bounds and each exit lands on
    /// the other's tile.
    pub fn link_stairs(&self, upper: &mut Map, at: Point, lower: &mut Map, to: Point) -> GenResult<()> {
        upper.set_exit(at, Exit::new(lower.id, to))?;
        lower.set_exit(to, Exit::new(upper.id, at))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use ruin_core::{Layer, MapId, MapObject, Rect, Tile};

    use super::*;

    fn open(id: u32, w: i32, h: i32) -> Map {
        let mut map = Map::new(format!("open {id}"), Layer::Entry, w, h);
        map.id = MapId(id);
        let bounds = map.bounds();
        map.fill(bounds, Tile::GROUND);
        map
    }

    fn assert_mirrored(from: &Map, to: &Map, edge: Edge) {
        for (slot, exit) in from.exits() {
            assert_eq!(exit.to_map, to.id);
            let back = match edge {
                Edge::Horizontal => Point::new(-1, exit.to_position.y),
                Edge::Vertical => Point::new(exit.to_position.x, -1),
            };
            let mirror = to.exit_at(back).expect("mirrored exit");
            assert_eq!(mirror.to_map, from.id);
            let landing = match edge {
                Edge::Horizontal => Point::new(from.width() - 1, slot.y),
                Edge::Vertical => Point::new(slot.x, from.height() - 1),
            };
            assert_eq!(mirror.to_position, landing);
        }
        assert_eq!(from.exit_count(), to.exit_count());
    }

    #[test]
    fn full_chance_links_every_free_row() {
        let mut a = open(0, 8, 6);
        let mut b = open(1, 8, 6);
        let n = Linker::new(100)
            .link_street(&mut a, &mut b, Edge::Horizontal, &mut Dice::new(1))
            .unwrap();
        assert_eq!(n, 6);
        assert_eq!(
            a.exit_at(Point::new(8, 2)),
            Some(&Exit::new(MapId(1), Point::new(0, 2)))
        );
        assert_eq!(
            b.exit_at(Point::new(-1, 2)),
            Some(&Exit::new(MapId(0), Point::new(7, 2)))
        );
    }

    #[test]
    fn zero_chance_links_nothing() {
        let mut a = open(0, 8, 6);
        let mut b = open(1, 8, 6);
        let n = Linker::new(0)
            .link_street(&mut a, &mut b, Edge::Vertical, &mut Dice::new(1))
            .unwrap();
        assert_eq!(n, 0);
        assert_eq!(a.exit_count() + b.exit_count(), 0);
    }

    #[test]
    fn blocked_landing_writes_neither_direction() {
        let mut a = open(0, 6, 6);
        let mut b = open(1, 6, 6);
        b.place_object(Point::new(0, 3), MapObject::blocking("wrecked car"));
        a.set_tile(Point::new(5, 1), Tile::WALL);
        Linker::new(100)
            .link_street(&mut a, &mut b, Edge::Horizontal, &mut Dice::new(1))
            .unwrap();
        assert!(a.exit_at(Point::new(6, 3)).is_none());
        assert!(b.exit_at(Point::new(-1, 3)).is_none());
        assert!(a.exit_at(Point::new(6, 1)).is_none());
        assert!(b.exit_at(Point::new(-1, 1)).is_none());
        assert_eq!(a.exit_count(), 4);
        assert_mirrored(&a, &b, Edge::Horizontal);
    }

    #[test]
    fn shorter_neighbour_bounds_the_indices() {
        let mut a = open(0, 10, 4);
        let mut b = open(1, 6, 4);
        let n = Linker::new(100)
            .link_street(&mut a, &mut b, Edge::Vertical, &mut Dice::new(1))
            .unwrap();
        assert_eq!(n, 6);
        assert!(a.exit_at(Point::new(7, 4)).is_none());
        assert_eq!(
            a.exit_at(Point::new(5, 4)),
            Some(&Exit::new(MapId(1), Point::new(5, 0)))
        );
    }

    #[test]
    fn sewers_ignore_content() {
        let mut a = Map::new("rock a", Layer::Sewers, 5, 5);
        let mut b = Map::new("rock b", Layer::Sewers, 5, 5);
        b.id = MapId(1);
        let n = Linker::new(0)
            .link_sewers(&mut a, &mut b, Edge::Vertical)
            .unwrap();
        assert_eq!(n, 5);
        assert_mirrored(&a, &b, Edge::Vertical);
    }

    #[test]
    fn subway_needs_walkable_landings() {
        let mut a = Map::new("tunnel a", Layer::Subway, 6, 7);
        let mut b = Map::new("tunnel b", Layer::Subway, 6, 7);
        b.id = MapId(1);
        a.fill(Rect::new(0, 2, 6, 3), Tile::FLOOR);
        b.fill(Rect::new(0, 3, 6, 3), Tile::FLOOR);
        let n = Linker::new(0).link_subway(&mut a, &mut b).unwrap();
        assert_eq!(n, 2);
        assert!(a.exit_at(Point::new(6, 3)).is_some());
        assert!(a.exit_at(Point::new(6, 4)).is_some());
        assert!(a.exit_at(Point::new(6, 2)).is_none());
    }

    #[test]
    fn stairs_link_in_bounds_tiles() {
        let mut street = open(0, 6, 6);
        let mut below = open(1, 6, 6);
        Linker::new(50)
            .link_stairs(&mut street, Point::new(2, 2), &mut below, Point::new(3, 3))
            .unwrap();
        assert_eq!(
            street.exit_at(Point::new(2, 2)),
            Some(&Exit::new(MapId(1), Point::new(3, 3)))
        );
        assert_eq!(
            below.exit_at(Point::new(3, 3)),
            Some(&Exit::new(MapId(0), Point::new(2, 2)))
        );
    }

    fn patchy(id: u32, w: i32, h: i32, walls: &[bool]) -> Map {
        let mut map = open(id, w, h);
        let points: Vec<Point> = map.points().collect();
        for (p, wall) in points.into_iter().zip(walls) {
            if *wall {
                map.set_tile(p, Tile::WALL);
            }
        }
        map
    }

    proptest! {
        #[test]
        fn street_links_are_symmetric(
            seed in any::<u64>(),
            chance in 0i32..=100,
            vertical in any::<bool>(),
            walls_a in proptest::collection::vec(any::<bool>(), 64),
            walls_b in proptest::collection::vec(any::<bool>(), 64),
        ) {
            let edge = if vertical { Edge::Vertical } else { Edge::Horizontal };
            let mut a = patchy(0, 8, 8, &walls_a);
            let mut b = patchy(1, 8, 8, &walls_b);
            let n = Linker::new(chance)
                .link_street(&mut a, &mut b, edge, &mut Dice::new(seed))
                .unwrap();
            prop_assert_eq!(n, a.exit_count());
            for (_, exit) in a.exits() {
                prop_assert!(b.is_free(exit.to_position));
            }
            for (_, exit) in b.exits() {
                prop_assert!(a.is_free(exit.to_position));
            }
            assert_mirrored(&a, &b, edge);
        }

        #[test]
        fn linking_is_deterministic(seed in any::<u64>(), chance in 0i32..=100) {
            let run = || {
                let mut a = open(0, 8, 8);
                let mut b = open(1, 8, 8);
                Linker::new(chance)
                    .link_street(&mut a, &mut b, Edge::Horizontal, &mut Dice::new(seed))
                    .unwrap();
                a
            };
            prop_assert_eq!(run(), run());
        }
    }
}
