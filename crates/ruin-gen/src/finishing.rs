//! Unique actors, unique items, decorations, and the player.

use ruin_core::{
    Actor, DistrictKind, Layer, MapId, Point, Rect, UniqueActorKind, UniqueMapKind, World,
    WorldError,
};
use tracing::{debug, info, warn};

use crate::error::{GenError, GenResult};
use crate::state::GenState;

const MAX_PLACEMENT_ATTEMPTS: usize = 200;

const FIRST_NAMES: [&str; 12] = [
    "Alex", "Dana", "Frank", "Helen", "Jack", "Kim", "Lena", "Marcus", "Nora", "Oscar", "Rita",
    "Sam",
];
const LAST_NAMES: [&str; 10] = [
    "Barker", "Cole", "Dunn", "Fisher", "Grant", "Hale", "Moss", "Reyes", "Stone", "Walsh",
];

/// Where something may be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    layer: Layer,
    /// `Some(true)` for interior tiles only, `Some(false)` for outdoors only.
    indoors: Option<bool>,
    /// Preferred district kind; any district when none of this kind exists.
    district: Option<DistrictKind>,
}

impl Placement {
    const fn new(layer: Layer, indoors: Option<bool>, district: Option<DistrictKind>) -> Self {
        Self {
            layer,
            indoors,
            district,
        }
    }

    fn for_unique(kind: UniqueActorKind) -> Self {
        use DistrictKind::*;
        match kind {
            UniqueActorKind::JasonMyers => Self::new(Layer::Entry, Some(true), None),
            UniqueActorKind::BigBear => Self::new(Layer::Entry, Some(true), Some(Residential)),
            UniqueActorKind::FamuFataru => Self::new(Layer::Entry, Some(false), Some(Green)),
            UniqueActorKind::Santaman => Self::new(Layer::Entry, Some(true), Some(Shopping)),
            UniqueActorKind::Roguedjack => Self::new(Layer::Entry, Some(true), Some(Business)),
            UniqueActorKind::SewersThing => Self::new(Layer::Sewers, None, None),
        }
    }

    /// Maps matching the layer, narrowed to the preferred district kind
    /// when the world has one.
    fn maps(&self, world: &World) -> Vec<MapId> {
        let on_layer = |kind: Option<DistrictKind>| -> Vec<MapId> {
            world
                .districts()
                .filter(|d| kind.is_none_or(|k| d.kind == k))
                .filter_map(|d| d.map(self.layer))
                .collect()
        };
        let preferred = on_layer(self.district);
        if preferred.is_empty() {
            on_layer(None)
        } else {
            preferred
        }
    }
}

/// Roll random tiles of random `maps` until one is free for an actor,
/// matches `indoors`, and holds no exit.
fn find_spot(
    state: &mut GenState,
    what: &str,
    maps: &[MapId],
    indoors: Option<bool>,
) -> GenResult<(MapId, Point)> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let Some(&id) = state.dice.choose(maps) else {
            break;
        };
        let map = state.world.try_map(id)?;
        let p = Point::new(
            state.dice.roll(0, map.width()),
            state.dice.roll(0, map.height()),
        );
        if indoors.is_some_and(|inside| map.is_inside(p) != inside) || map.exit_at(p).is_some() {
            continue;
        }
        if state.world.is_free_for_actor(id, p) {
            return Ok((id, p));
        }
    }
    Err(GenError::PlacementFailed(what.to_string()))
}

/// Place one of the named characters and register it.
pub fn place_unique_actor(state: &mut GenState, kind: UniqueActorKind) -> GenResult<()> {
    let rule = Placement::for_unique(kind);
    let maps = rule.maps(&state.world);
    let (map, position) = find_spot(state, kind.name(), &maps, rule.indoors)?;

    let mut actor = Actor::new(kind.name(), map, position);
    actor.invulnerable = true;
    actor.unique = Some(kind);
    let id = state.world.add_actor(actor);
    state.world.uniques.set_actor(kind, id)?;

    debug!(actor = kind.name(), %map, %position, "unique actor placed");
    Ok(())
}

/// Drop the subway worker badge in a subway tunnel and the facility
/// keycard in the facility's surface map.
pub fn place_unique_items(state: &mut GenState) -> GenResult<()> {
    let subways = Placement::new(Layer::Subway, None, None).maps(&state.world);
    if subways.is_empty() {
        warn!("no subway map for the subway worker badge");
    } else {
        let (map, p) = find_spot(state, "the subway worker badge", &subways, None)?;
        state.world.try_map_mut(map)?.add_item(p, "subway worker badge");
    }

    let (surface, _) = state.facility_anchor.ok_or(GenError::NoFacilityAnchor)?;
    let (map, p) = find_spot(state, "the facility keycard", &[surface], Some(true))?;
    state.world.try_map_mut(map)?.add_item(p, "facility keycard");
    Ok(())
}

/// Tiles just outside the walkable border tiles of `bounds`.
fn doorsteps(world: &World, map: MapId, bounds: Rect) -> Vec<Point> {
    let Some(m) = world.map(map) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for p in bounds.points() {
        if !bounds.on_border(p) || !m.is_walkable(p) {
            continue;
        }
        for n in p.neighbours() {
            if !bounds.contains(n) && m.in_bounds(n) && !out.contains(&n) {
                out.push(n);
            }
        }
    }
    out
}

/// The agency sign over the facility entrance and a sign by every entrance
/// of the police station and the hospital.
pub fn place_decorations(state: &mut GenState) -> GenResult<()> {
    if let Some((map, anchor)) = state.facility_anchor {
        state
            .world
            .try_map_mut(map)?
            .add_decoration(anchor, "agency sign");
    }

    let civic = [
        (UniqueMapKind::PoliceStation, "police station sign"),
        (UniqueMapKind::Hospital, "hospital sign"),
    ];
    for (kind, sign) in civic {
        let Some(handle) = state.world.uniques.map(kind) else {
            warn!(building = kind.label(), "no unique map to sign");
            continue;
        };
        let zones: Vec<Rect> = state
            .world
            .try_map(handle.map)?
            .zones_by_partial_name(kind.label())
            .iter()
            .map(|z| z.bounds)
            .collect();
        if zones.is_empty() {
            warn!(building = kind.label(), map = %handle.map, "no zone to sign");
            continue;
        }
        for bounds in zones {
            let steps = doorsteps(&state.world, handle.map, bounds);
            let map = state.world.try_map_mut(handle.map)?;
            for p in steps {
                map.add_decoration(p, sign);
            }
        }
    }
    Ok(())
}

/// Create the player indoors on a street map.
pub fn place_player(state: &mut GenState) -> GenResult<()> {
    let first = state.cosmetic.choose(&FIRST_NAMES).copied().unwrap_or("Sam");
    let last = state.cosmetic.choose(&LAST_NAMES).copied().unwrap_or("Stone");
    let name = format!("{first} {last}");

    let maps = Placement::new(Layer::Entry, Some(true), None).maps(&state.world);
    let (map, position) = find_spot(state, "the player", &maps, Some(true))?;
    let mut actor = Actor::new(&name, map, position);
    actor.is_player = true;
    let id = state.world.add_actor(actor);
    state.world.player = Some(id);

    info!(%name, %map, %position, "player placed");
    Ok(())
}

/// Mark the player's starting building and every outdoor tile of the
/// starting map as seen.
pub fn reveal_start_map(state: &mut GenState) -> GenResult<()> {
    if !state.config.reveal_start_map {
        return Ok(());
    }
    let id = state
        .world
        .player
        .ok_or_else(|| GenError::PlacementFailed("the player".into()))?;
    let player = state
        .world
        .actor(id)
        .ok_or(WorldError::ActorNotFound(id.0))?;
    let (map_id, position) = (player.map, player.position);

    let map = state.world.try_map_mut(map_id)?;
    let structures: Vec<Rect> = map.zones_at(position).iter().map(|z| z.bounds).collect();
    let outdoors: Vec<Point> = map.points().filter(|p| !map.is_inside(*p)).collect();
    for p in outdoors {
        map.mark_seen(p);
    }
    for bounds in structures {
        for p in bounds.points() {
            map.mark_seen(p);
        }
    }
    debug!(map = %map_id, seen = map.seen_count(), "start map revealed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::{create_district, create_world, generate_facility};
    use crate::config::GenConfig;
    use crate::layout::BlockFactory;

    fn assembled(seed: u64) -> GenState {
        let mut s = GenState::new(
            GenConfig::default().with_seed(seed).with_size(3),
            Box::new(BlockFactory),
        );
        create_world(&mut s).unwrap();
        for pos in s.world.cells() {
            create_district(&mut s, pos).unwrap();
        }
        generate_facility(&mut s).unwrap();
        s
    }

    #[test]
    fn unique_actors_follow_their_rules() {
        let mut s = assembled(11);
        for kind in UniqueActorKind::ALL {
            place_unique_actor(&mut s, kind).unwrap();
        }
        assert_eq!(s.world.actors().len(), 6);

        for kind in UniqueActorKind::ALL {
            let id = s.world.uniques.actor(kind).unwrap();
            let actor = s.world.actor(id).unwrap();
            assert!(actor.invulnerable);
            assert_eq!(actor.unique, Some(kind));
            let map = s.world.map(actor.map).unwrap();
            assert!(map.is_free(actor.position));
            let rule = Placement::for_unique(kind);
            assert_eq!(map.layer, rule.layer);
            if let Some(inside) = rule.indoors {
                assert_eq!(map.is_inside(actor.position), inside);
            }
        }
    }

    #[test]
    fn registering_a_unique_twice_fails() {
        let mut s = assembled(11);
        place_unique_actor(&mut s, UniqueActorKind::BigBear).unwrap();
        assert!(matches!(
            place_unique_actor(&mut s, UniqueActorKind::BigBear),
            Err(GenError::World(WorldError::UniqueAlreadySet(_)))
        ));
    }

    #[test]
    fn items_land_where_they_belong() {
        let mut s = assembled(3);
        place_unique_items(&mut s).unwrap();
        let badge = s
            .world
            .maps()
            .iter()
            .filter(|m| m.layer == Layer::Subway)
            .flat_map(|m| m.points().map(move |p| (m, p)))
            .filter(|(m, p)| m.items_at(*p).iter().any(|i| i == "subway worker badge"))
            .count();
        assert_eq!(badge, 1);

        let (surface, _) = s.facility_anchor.unwrap();
        let map = s.world.map(surface).unwrap();
        assert!(
            map.points()
                .any(|p| map.items_at(p).iter().any(|i| i == "facility keycard"))
        );
    }

    #[test]
    fn signs_mark_facility_and_civic_buildings() {
        let mut s = assembled(5);
        place_decorations(&mut s).unwrap();
        let (surface, anchor) = s.facility_anchor.unwrap();
        assert_eq!(
            s.world.map(surface).unwrap().decorations_at(anchor),
            ["agency sign".to_string()]
        );

        let police = s.world.uniques.map(UniqueMapKind::PoliceStation).unwrap();
        let map = s.world.map(police.map).unwrap();
        assert!(map.points().any(|p| {
            map.decorations_at(p)
                .iter()
                .any(|d| d == "police station sign")
        }));
    }

    #[test]
    fn player_starts_indoors_with_a_name() {
        let mut s = assembled(8);
        place_player(&mut s).unwrap();
        let id = s.world.player.unwrap();
        let player = s.world.actor(id).unwrap();
        assert!(player.is_player);
        assert!(!player.invulnerable);
        assert!(player.name.contains(' '));
        let map = s.world.map(player.map).unwrap();
        assert_eq!(map.layer, Layer::Entry);
        assert!(map.is_inside(player.position));
    }

    #[test]
    fn player_name_does_not_disturb_structure() {
        let mut a = assembled(8);
        let mut b = assembled(8);
        b.cosmetic = crate::dice::Dice::new(999);
        place_player(&mut a).unwrap();
        place_player(&mut b).unwrap();
        let pa = a.world.actor(a.world.player.unwrap()).unwrap();
        let pb = b.world.actor(b.world.player.unwrap()).unwrap();
        assert_eq!((pa.map, pa.position), (pb.map, pb.position));
    }

    #[test]
    fn reveal_covers_outdoors_and_start_building() {
        let mut s = assembled(4);
        place_player(&mut s).unwrap();
        reveal_start_map(&mut s).unwrap();

        let player = s.world.actor(s.world.player.unwrap()).unwrap();
        let map = s.world.map(player.map).unwrap();
        assert!(map.tile(player.position).unwrap().seen);
        assert!(
            map.points()
                .filter(|p| !map.is_inside(*p))
                .all(|p| map.tile(p).unwrap().seen)
        );
        let others: usize = s
            .world
            .maps()
            .iter()
            .filter(|m| m.id != map.id)
            .map(|m| m.seen_count())
            .sum();
        assert_eq!(others, 0);
    }

    #[test]
    fn reveal_can_be_disabled() {
        let mut s = assembled(4);
        s.config.reveal_start_map = false;
        place_player(&mut s).unwrap();
        reveal_start_map(&mut s).unwrap();
        assert!(s.world.maps().iter().all(|m| m.seen_count() == 0));
    }
}
