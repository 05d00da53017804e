use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use frontier_core::category::Category;
use frontier_core::changer::{ChangeOptions, PacifistPolicy};
use frontier_core::core_api::Engine;
use frontier_core::types::{MineralData, MineralType, Point};
use frontier_render::{
    FieldSelection, JsonStyle, SaveReport, TextRenderOptions, TextStyle, render_json_full,
    render_json_selected, render_layout_text, render_text_with_options,
};
use log::LevelFilter;
use serde_json::Value as JsonValue;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PacifistArg {
    Off,
    Keep,
    On,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "SAVE")]
    path: PathBuf,
    #[arg(long)]
    metadata: bool,
    #[arg(long)]
    camera: bool,
    #[arg(long = "world-size")]
    world_size: bool,
    #[arg(long)]
    categories: bool,
    #[arg(long)]
    minerals: bool,
    #[arg(long)]
    forageables: bool,
    #[arg(long)]
    raiders: bool,
    #[arg(long)]
    enemies: bool,
    #[arg(long)]
    animals: bool,
    #[arg(long = "animal-details")]
    animal_details: bool,
    #[arg(long = "animal-spawns")]
    animal_spawns: bool,
    #[arg(long)]
    houses: bool,
    /// Print the byte layout of every record.
    #[arg(long)]
    layout: bool,
    /// Decode one record, e.g. `Raider` or `Raider:2`.
    #[arg(long, value_name = "CATEGORY[:N]", value_parser = parse_record_arg)]
    record: Option<(Category, usize)>,
    #[arg(long)]
    json: bool,
    #[arg(short, long)]
    verbose: bool,
    #[arg(long = "remove-fow")]
    remove_fow: bool,
    #[arg(long = "remove-building-sites")]
    remove_building_sites: bool,
    #[arg(long = "double-minerals")]
    double_minerals: bool,
    #[arg(long = "set-name")]
    set_name: Option<String>,
    #[arg(long)]
    pacifist: Option<PacifistArg>,
    #[arg(
        long = "add-mineral",
        value_name = "TYPE:X,Y,Z:RADIUS:AMOUNT",
        value_parser = parse_mineral
    )]
    add_mineral: Vec<MineralData>,
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn field_selection(&self) -> FieldSelection {
        FieldSelection {
            metadata: self.metadata,
            camera: self.camera,
            world_size: self.world_size,
            categories: self.categories,
            minerals: self.minerals,
            forageables: self.forageables,
            raiders: self.raiders,
            enemies: self.enemies,
            animals: self.animals,
            animal_details: self.animal_details,
            animal_spawns: self.animal_spawns,
            houses: self.houses,
        }
    }

    fn change_options(&self) -> ChangeOptions {
        ChangeOptions {
            remove_fow: self.remove_fow,
            remove_building_sites: self.remove_building_sites,
            double_minerals: self.double_minerals,
            name: self.set_name.clone(),
            pacifist: self.pacifist.map(to_core_pacifist).unwrap_or_default(),
        }
    }

    fn has_edits(&self) -> bool {
        self.remove_fow
            || self.remove_building_sites
            || self.double_minerals
            || self.set_name.is_some()
            || self.pacifist.is_some()
            || !self.add_mineral.is_empty()
    }
}

fn main() {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let fields = cli.field_selection();
    let has_edits = cli.has_edits();

    if has_edits && cli.output.is_none() {
        eprintln!("edit flags require --output <PATH>");
        process::exit(2);
    }
    if !has_edits && cli.output.is_some() {
        eprintln!("--output requires at least one edit flag");
        process::exit(2);
    }

    let engine = Engine::new();

    if let Some(out_path) = cli.output.as_ref() {
        let report = engine
            .copy(&cli.path, out_path, cli.change_options(), &cli.add_mineral)
            .unwrap_or_else(|e| {
                eprintln!("Error writing {}: {e}", out_path.display());
                process::exit(1);
            });
        if cli.json {
            print_json(&serde_json::to_value(report).unwrap_or_else(|e| {
                eprintln!("Error rendering JSON output: {e}");
                process::exit(1);
            }));
        } else {
            println!(
                "Wrote edited save to {} ({} records, {} patched, {} dropped)",
                out_path.display(),
                report.records_written,
                report.records_patched,
                report.records_dropped
            );
        }
        return;
    }

    let session = engine.open(&cli.path).unwrap_or_else(|e| {
        eprintln!("Error reading save file: {}", cli.path.display());
        eprintln!("  {e}");
        process::exit(1);
    });

    if cli.layout {
        if cli.json {
            print_json(&serde_json::to_value(session.layout()).unwrap_or_else(|e| {
                eprintln!("Error rendering JSON output: {e}");
                process::exit(1);
            }));
        } else {
            print!("{}", render_layout_text(session.layout()));
        }
        return;
    }

    if let Some((category, occurrence)) = cli.record {
        let mut reader = session.reader().unwrap_or_else(|e| {
            eprintln!("Error reading save file: {e}");
            process::exit(1);
        });
        let decoded = reader.record(category, occurrence).unwrap_or_else(|e| {
            eprintln!("Error decoding {category} #{occurrence}: {e}");
            process::exit(1);
        });
        let Some(decoded) = decoded else {
            eprintln!(
                "No {category} #{occurrence} in {} ({} present)",
                cli.path.display(),
                session.record_count(category)
            );
            process::exit(1);
        };
        print_json(&serde_json::to_value(decoded).unwrap_or_else(|e| {
            eprintln!("Error rendering JSON output: {e}");
            process::exit(1);
        }));
        return;
    }

    let collect_fields = if fields.is_any_selected() {
        fields
    } else {
        FieldSelection::all()
    };
    let report = SaveReport::collect(&session, &collect_fields).unwrap_or_else(|e| {
        eprintln!("Error decoding save file: {}", cli.path.display());
        eprintln!("  {e}");
        process::exit(1);
    });

    if cli.json {
        let json = if fields.is_any_selected() {
            render_json_selected(&report, &fields, JsonStyle::CanonicalV1)
        } else {
            render_json_full(&report, JsonStyle::CanonicalV1)
        };
        print_json(&json);
        return;
    }

    print!(
        "{}",
        render_text_with_options(
            &report,
            TextStyle::SettlementSheet,
            TextRenderOptions {
                verbose: cli.verbose
            },
        )
    );
}

fn print_json(value: &JsonValue) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}

fn to_core_pacifist(arg: PacifistArg) -> PacifistPolicy {
    match arg {
        PacifistArg::Off => PacifistPolicy::Off,
        PacifistArg::Keep => PacifistPolicy::Keep,
        PacifistArg::On => PacifistPolicy::On,
    }
}

fn parse_record_arg(value: &str) -> Result<(Category, usize), String> {
    let (name, occurrence) = match value.split_once(':') {
        Some((name, n)) => (
            name,
            n.parse::<usize>()
                .map_err(|_| format!("invalid occurrence '{n}'"))?,
        ),
        None => (value, 0),
    };
    let category =
        Category::from_name(name).ok_or_else(|| format!("unknown category '{name}'"))?;
    Ok((category, occurrence))
}

fn parse_mineral_type(value: &str) -> Result<MineralType, String> {
    match value.to_ascii_lowercase().as_str() {
        "clay" => Ok(MineralType::Clay),
        "sand" => Ok(MineralType::Sand),
        "iron" => Ok(MineralType::Iron),
        "gold" => Ok(MineralType::Gold),
        "coal" => Ok(MineralType::Coal),
        _ => Err(format!(
            "invalid mineral type '{value}' (expected clay, sand, iron, gold or coal)"
        )),
    }
}

fn parse_mineral(value: &str) -> Result<MineralData, String> {
    let parts: Vec<&str> = value.split(':').collect();
    let [kind, position, radius, amount] = parts.as_slice() else {
        return Err(format!(
            "expected TYPE:X,Y,Z:RADIUS:AMOUNT, got '{value}'"
        ));
    };

    let mineral_type = parse_mineral_type(kind)?;
    let coords = position
        .split(',')
        .map(|c| {
            c.trim()
                .parse::<f32>()
                .map_err(|_| format!("invalid coordinate '{c}'"))
        })
        .collect::<Result<Vec<f32>, String>>()?;
    let [x, y, z] = coords.as_slice() else {
        return Err(format!("expected three coordinates, got '{position}'"));
    };
    let radius = radius
        .parse::<f32>()
        .map_err(|_| format!("invalid radius '{radius}'"))?;
    let amount = amount
        .parse::<u32>()
        .map_err(|_| format!("invalid amount '{amount}'"))?;

    Ok(MineralData::new(
        mineral_type,
        Point::new(*x, *y, *z),
        radius,
        amount,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mineral_argument() {
        let mineral = parse_mineral("Gold:1.5,2,-3:4:250").unwrap();
        assert_eq!(mineral.mineral_type, MineralType::Gold);
        assert_eq!(mineral.position, Point::new(1.5, 2.0, -3.0));
        assert_eq!(mineral.radius, 4.0);
        assert_eq!(mineral.amount, 250);
    }

    #[test]
    fn rejects_malformed_mineral_arguments() {
        assert!(parse_mineral("clay:1,2:4:250").is_err());
        assert!(parse_mineral("ruby:1,2,3:4:250").is_err());
        assert!(parse_mineral("clay:1,2,3:4").is_err());
        assert!(parse_mineral("clay:1,2,3:4:-5").is_err());
    }

    #[test]
    fn parses_record_argument() {
        assert_eq!(
            parse_record_arg("raider:2").unwrap(),
            (Category::Raider, 2)
        );
        assert_eq!(
            parse_record_arg("TownCenter").unwrap(),
            (Category::TownCenter, 0)
        );
        assert!(parse_record_arg("Castle").is_err());
    }
}
