use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use ruin_core::{
    ActorId, DistrictKind, Layer, MapId, Point, UniqueActorKind, UniqueMapKind, Weather, World,
};
use ruin_gen::{GenConfig, GenStats};
use serde::Serialize;

#[derive(Serialize)]
struct DistrictSummary<'a> {
    position: Point,
    kind: DistrictKind,
    name: &'a str,
    seed: u64,
    layers: Vec<Layer>,
    exits: usize,
}

#[derive(Serialize)]
struct UniqueMapSummary {
    kind: UniqueMapKind,
    map: MapId,
    district: Point,
}

#[derive(Serialize)]
struct ActorSummary<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    unique: Option<UniqueActorKind>,
    map: MapId,
    district: Point,
    position: Point,
}

#[derive(Serialize)]
struct Summary<'a> {
    seed: u64,
    size: u32,
    weather: Weather,
    next_weather_check: u32,
    districts: Vec<DistrictSummary<'a>>,
    unique_maps: Vec<UniqueMapSummary>,
    unique_actors: Vec<ActorSummary<'a>>,
    player: Option<ActorSummary<'a>>,
    passages: GenStats,
}

fn actor_summary(world: &World, id: ActorId) -> Option<ActorSummary<'_>> {
    let actor = world.actor(id)?;
    let district = world.map(actor.map)?.district;
    Some(ActorSummary {
        name: &actor.name,
        unique: actor.unique,
        map: actor.map,
        district,
        position: actor.position,
    })
}

fn summarize(world: &World, passages: GenStats) -> Summary<'_> {
    let districts = world
        .districts()
        .map(|d| {
            let maps = d.maps();
            DistrictSummary {
                position: d.position,
                kind: d.kind,
                name: &d.name,
                seed: d.seed,
                layers: maps
                    .iter()
                    .filter_map(|id| world.map(*id))
                    .map(|m| m.layer)
                    .collect(),
                exits: maps
                    .iter()
                    .filter_map(|id| world.map(*id))
                    .map(|m| m.exit_count())
                    .sum(),
            }
        })
        .collect();

    Summary {
        seed: world.seed,
        size: world.size(),
        weather: world.weather,
        next_weather_check: world.next_weather_check,
        districts,
        unique_maps: world
            .uniques
            .maps()
            .map(|(kind, handle)| UniqueMapSummary {
                kind,
                map: handle.map,
                district: handle.district,
            })
            .collect(),
        unique_actors: world
            .uniques
            .actors()
            .filter_map(|(_, id)| actor_summary(world, id))
            .collect(),
        player: world.player.and_then(|id| actor_summary(world, id)),
        passages,
    }
}

pub fn run(config: GenConfig, json: bool, output: Option<&Path>) -> Result<(), String> {
    let (world, stats) = super::build_world(config)?;
    let summary = summarize(&world, stats);

    if json || output.is_some() {
        let content = serde_json::to_string_pretty(&summary)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        if let Some(path) = output {
            std::fs::write(path, &content)
                .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
            println!("  Exported to {}", path.display());
        } else {
            println!("{content}");
        }
        return Ok(());
    }

    println!(
        "  {} {}",
        "World".bold(),
        format!(
            "(seed={}, {}x{} districts, {} maps)",
            summary.seed,
            summary.size,
            summary.size,
            world.maps().len()
        )
        .dimmed()
    );
    println!(
        "  Weather: {}, next change in {} turns",
        summary.weather, summary.next_weather_check
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Pos", "Kind", "Name", "Layers", "Exits"]);
    for d in &summary.districts {
        let layers: Vec<&str> = d.layers.iter().map(|l| l.label()).collect();
        table.add_row(vec![
            d.position.to_string(),
            d.kind.to_string(),
            d.name.to_string(),
            layers.join(", "),
            d.exits.to_string(),
        ]);
    }
    println!("{table}");
    println!();

    println!("  {}", "Unique Maps".bold().underline());
    for m in &summary.unique_maps {
        println!("  {:<22} district {} map {}", m.kind.label(), m.district, m.map);
    }
    println!();

    println!("  {}", "Unique Actors".bold().underline());
    for a in &summary.unique_actors {
        println!(
            "  {:<22} district {} at {}",
            a.name, a.district, a.position
        );
    }
    println!();

    if let Some(player) = &summary.player {
        println!(
            "  {} {} starts in district {} at {}",
            "Player".bold(),
            player.name,
            player.district,
            player.position
        );
    }
    println!(
        "  {} passages: {} street, {} sewers, {} subway",
        summary.passages.total(),
        summary.passages.street_pairs,
        summary.passages.sewer_pairs,
        summary.passages.subway_pairs
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use ruin_gen::generator::generate;

    use super::*;

    #[test]
    fn summary_covers_every_district() {
        let world = generate(GenConfig::default().with_seed(2).with_size(2)).unwrap();
        let summary = summarize(&world, GenStats::default());
        assert_eq!(summary.districts.len(), 4);
        assert_eq!(summary.unique_maps.len(), 3);
        assert_eq!(summary.unique_actors.len(), 6);
        assert!(summary.player.is_some());

        let origin = &summary.districts[0];
        assert_eq!(origin.kind, DistrictKind::Business);
        assert!(origin.layers.contains(&Layer::Entry));
        assert!(origin.layers.contains(&Layer::Sewers));
        assert!(origin.exits > 0);
    }
}
