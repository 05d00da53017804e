use std::fmt::Write as _;

use frontier_core::core_api::{CategoryCount, CoreError, Session};
use frontier_core::layout::FileLayout;
use frontier_core::types::{
    AnimalData, AnimalSpawnData, BaseData, ForageableData, GeneralSaveData, MineralData,
    MineralType, Point, RaiderData,
};
use serde_json::{Map as JsonMap, Value as JsonValue};

const SHEET_WIDTH: usize = 76;
const LABEL_WIDTH: usize = 14;
const POINT_WIDTH: usize = 30;
const HALF_WIDTH: usize = 38;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    #[default]
    SettlementSheet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    pub verbose: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelection {
    pub metadata: bool,
    pub camera: bool,
    pub world_size: bool,
    pub categories: bool,
    pub minerals: bool,
    pub forageables: bool,
    pub raiders: bool,
    pub enemies: bool,
    pub animals: bool,
    pub animal_details: bool,
    pub animal_spawns: bool,
    pub houses: bool,
}

impl FieldSelection {
    pub fn all() -> Self {
        Self {
            metadata: true,
            camera: true,
            world_size: true,
            categories: true,
            minerals: true,
            forageables: true,
            raiders: true,
            enemies: true,
            animals: true,
            animal_details: true,
            animal_spawns: true,
            houses: true,
        }
    }

    pub fn is_any_selected(&self) -> bool {
        self.metadata
            || self.camera
            || self.world_size
            || self.categories
            || self.minerals
            || self.forageables
            || self.raiders
            || self.enemies
            || self.animals
            || self.animal_details
            || self.animal_spawns
            || self.houses
    }
}

/// Decoded values gathered from a session for rendering. Lists that were
/// not selected stay empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveReport {
    pub file_len: u64,
    pub record_count: usize,
    pub categories: Vec<CategoryCount>,
    pub metadata: GeneralSaveData,
    pub camera: Point,
    pub world_size: Option<(f32, f32)>,
    pub minerals: Vec<MineralData>,
    pub forageables: Vec<ForageableData>,
    pub raiders: Vec<RaiderData>,
    pub enemies: Vec<BaseData>,
    pub animals: Vec<BaseData>,
    pub animal_details: Vec<AnimalData>,
    pub animal_spawns: Vec<AnimalSpawnData>,
    pub houses: Vec<BaseData>,
}

impl SaveReport {
    pub fn collect(session: &Session, fields: &FieldSelection) -> Result<Self, CoreError> {
        let mut reader = session.reader()?;
        let mut report = SaveReport {
            file_len: session.layout().file_len,
            record_count: session.index().total(),
            categories: session.category_counts(),
            metadata: reader.general_save_data()?,
            camera: reader.camera()?,
            world_size: reader.world_size()?,
            ..SaveReport::default()
        };

        if fields.minerals {
            report.minerals = reader.minerals()?;
        }
        if fields.forageables {
            report.forageables = reader.forageables()?;
        }
        if fields.raiders {
            report.raiders = reader.raiders()?;
        }
        if fields.enemies {
            report.enemies = reader.enemies()?;
        }
        if fields.animals {
            report.animals = reader.animals()?;
        }
        if fields.animal_details {
            report.animal_details = reader.animal_details()?;
        }
        if fields.animal_spawns {
            report.animal_spawns = reader.animal_spawns()?;
        }
        if fields.houses {
            report.houses = reader.houses()?;
        }

        Ok(report)
    }
}

/// Deposit count and summed amount for one mineral type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MineralTotal {
    pub mineral_type: MineralType,
    pub deposits: usize,
    pub amount: u64,
}

const MINERAL_ORDER: [MineralType; 6] = [
    MineralType::Clay,
    MineralType::Sand,
    MineralType::Iron,
    MineralType::Gold,
    MineralType::Coal,
    MineralType::Unknown,
];

/// Per-type totals in a fixed order; types without deposits are left out.
pub fn mineral_totals(minerals: &[MineralData]) -> Vec<MineralTotal> {
    MINERAL_ORDER
        .iter()
        .filter_map(|&mineral_type| {
            let (deposits, amount) = minerals
                .iter()
                .filter(|m| m.mineral_type == mineral_type)
                .fold((0usize, 0u64), |(n, sum), m| (n + 1, sum + u64::from(m.amount)));
            (deposits > 0).then_some(MineralTotal {
                mineral_type,
                deposits,
                amount,
            })
        })
        .collect()
}

pub fn render_json_full(report: &SaveReport, style: JsonStyle) -> JsonValue {
    render_json_selected(report, &FieldSelection::all(), style)
}

pub fn render_json_selected(
    report: &SaveReport,
    fields: &FieldSelection,
    style: JsonStyle,
) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(selected_json(fields, report)),
    }
}

pub fn render_text(report: &SaveReport, style: TextStyle) -> String {
    render_text_with_options(report, style, TextRenderOptions::default())
}

pub fn render_text_with_options(
    report: &SaveReport,
    style: TextStyle,
    options: TextRenderOptions,
) -> String {
    match style {
        TextStyle::SettlementSheet => render_settlement_sheet(report, options),
    }
}

fn selected_json(fields: &FieldSelection, report: &SaveReport) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();

    if fields.metadata {
        out.insert("metadata".to_string(), metadata_to_json(&report.metadata));
    }
    if fields.camera {
        out.insert("camera".to_string(), point_to_json(report.camera));
    }
    if fields.world_size {
        out.insert(
            "world_size".to_string(),
            match report.world_size {
                Some((width, height)) => {
                    let mut m = JsonMap::new();
                    m.insert("width".to_string(), JsonValue::from(width));
                    m.insert("height".to_string(), JsonValue::from(height));
                    JsonValue::Object(m)
                }
                None => JsonValue::Null,
            },
        );
    }
    if fields.categories {
        out.insert("file_len".to_string(), JsonValue::from(report.file_len));
        out.insert(
            "record_count".to_string(),
            JsonValue::from(report.record_count),
        );
        out.insert(
            "categories".to_string(),
            categories_to_json(&report.categories),
        );
    }
    if fields.minerals {
        out.insert(
            "minerals".to_string(),
            JsonValue::Array(report.minerals.iter().map(mineral_to_json).collect()),
        );
    }
    if fields.forageables {
        out.insert(
            "forageables".to_string(),
            JsonValue::Array(report.forageables.iter().map(forageable_to_json).collect()),
        );
    }
    if fields.raiders {
        out.insert(
            "raiders".to_string(),
            JsonValue::Array(report.raiders.iter().map(raider_to_json).collect()),
        );
    }
    if fields.enemies {
        out.insert("enemies".to_string(), base_list_to_json(&report.enemies));
    }
    if fields.animals {
        out.insert("animals".to_string(), base_list_to_json(&report.animals));
    }
    if fields.animal_details {
        out.insert(
            "animal_details".to_string(),
            JsonValue::Array(report.animal_details.iter().map(animal_to_json).collect()),
        );
    }
    if fields.animal_spawns {
        out.insert(
            "animal_spawns".to_string(),
            JsonValue::Array(report.animal_spawns.iter().map(spawn_to_json).collect()),
        );
    }
    if fields.houses {
        out.insert("houses".to_string(), base_list_to_json(&report.houses));
    }

    out
}

fn metadata_to_json(meta: &GeneralSaveData) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("name".to_string(), JsonValue::String(meta.name.clone()));
    m.insert(
        "version".to_string(),
        JsonValue::String(meta.version.clone()),
    );
    m.insert("seed".to_string(), JsonValue::String(meta.seed.clone()));
    m.insert("villagers".to_string(), JsonValue::from(meta.villagers));
    m.insert("years".to_string(), JsonValue::from(meta.years));
    m.insert("hours".to_string(), JsonValue::from(meta.hours));
    m.insert("mins".to_string(), JsonValue::from(meta.mins));
    m.insert("timestamp".to_string(), JsonValue::from(meta.timestamp));
    m.insert(
        "wildlife_difficulty".to_string(),
        JsonValue::from(meta.wildlife_difficulty),
    );
    m.insert(
        "raiders_difficulty".to_string(),
        JsonValue::from(meta.raiders_difficulty),
    );
    m.insert("pacifist".to_string(), JsonValue::from(meta.pacifist != 0));
    m.insert("v1".to_string(), JsonValue::from(meta.v1));
    m.insert("v2".to_string(), JsonValue::from(meta.v2));
    m.insert("v3".to_string(), JsonValue::from(meta.v3));
    m.insert("v4".to_string(), JsonValue::from(meta.v4));
    JsonValue::Object(m)
}

fn point_to_json(p: Point) -> JsonValue {
    JsonValue::Array(vec![
        JsonValue::from(p.x),
        JsonValue::from(p.y),
        JsonValue::from(p.z),
    ])
}

fn categories_to_json(categories: &[CategoryCount]) -> JsonValue {
    let mut m = JsonMap::new();
    for entry in categories {
        m.insert(
            entry.category.as_str().to_string(),
            JsonValue::from(entry.count),
        );
    }
    JsonValue::Object(m)
}

fn mineral_to_json(mineral: &MineralData) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert(
        "type".to_string(),
        JsonValue::String(mineral.mineral_type.as_str().to_string()),
    );
    m.insert("position".to_string(), point_to_json(mineral.position));
    m.insert("radius".to_string(), JsonValue::from(mineral.radius));
    m.insert("amount".to_string(), JsonValue::from(mineral.amount));
    JsonValue::Object(m)
}

fn forageable_to_json(forageable: &ForageableData) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert(
        "item".to_string(),
        JsonValue::String(forageable.item.as_str().to_string()),
    );
    m.insert("position".to_string(), point_to_json(forageable.position));
    m.insert("amount".to_string(), JsonValue::from(forageable.amount));
    JsonValue::Object(m)
}

fn raider_to_json(raider: &RaiderData) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert(
        "type".to_string(),
        JsonValue::String(raider.raider_type.as_str().to_string()),
    );
    m.insert("position".to_string(), point_to_json(raider.position));
    m.insert("spawn".to_string(), point_to_json(raider.spawn));
    m.insert("hp".to_string(), JsonValue::from(raider.hp));
    m.insert("p1".to_string(), JsonValue::from(raider.p1));
    m.insert("p2".to_string(), JsonValue::from(raider.p2));
    JsonValue::Object(m)
}

fn base_list_to_json(list: &[BaseData]) -> JsonValue {
    JsonValue::Array(
        list.iter()
            .map(|entry| {
                let mut m = JsonMap::new();
                m.insert(
                    "category".to_string(),
                    JsonValue::String(entry.category.as_str().to_string()),
                );
                m.insert("position".to_string(), point_to_json(entry.position));
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn animal_to_json(animal: &AnimalData) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("position".to_string(), point_to_json(animal.position));
    m.insert("hp".to_string(), JsonValue::from(animal.hp));
    m.insert("spawn_area".to_string(), JsonValue::from(animal.spawn_area));
    m.insert(
        "spawn_points".to_string(),
        JsonValue::Array(animal.spawn_points.iter().copied().map(point_to_json).collect()),
    );
    m.insert(
        "wander_points".to_string(),
        JsonValue::Array(
            animal
                .wander_points
                .iter()
                .copied()
                .map(point_to_json)
                .collect(),
        ),
    );
    JsonValue::Object(m)
}

fn spawn_to_json(spawn: &AnimalSpawnData) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("spawn_area".to_string(), JsonValue::from(spawn.spawn_area));
    m.insert(
        "species".to_string(),
        JsonValue::String(spawn.species.as_str().to_string()),
    );
    JsonValue::Object(m)
}

/// Plain-text listing of a record layout, one record per line.
pub fn render_layout_text(layout: &FileLayout) -> String {
    let mut out = String::new();
    writeln!(
        &mut out,
        "{:>10}  {:>10}  {:>10}  {:<24}{}",
        "start", "end", "payload", "category", "kind"
    )
    .expect("writing to String cannot fail");
    for record in &layout.records {
        writeln!(
            &mut out,
            "{:>10}  {:>10}  {:>10}  {:<24}{}",
            record.range.start,
            record.range.end,
            record.payload.len(),
            record.category.as_str(),
            record.kind_name
        )
        .expect("writing to String cannot fail");
    }
    writeln!(
        &mut out,
        "{} records, {} bytes",
        layout.records.len(),
        format_number_with_commas(layout.file_len)
    )
    .expect("writing to String cannot fail");
    out
}

fn render_settlement_sheet(report: &SaveReport, options: TextRenderOptions) -> String {
    let meta = &report.metadata;
    let title = if meta.name.is_empty() {
        "UNNAMED SETTLEMENT".to_string()
    } else {
        meta.name.to_uppercase()
    };
    let date_time_str = format!(
        "Year {}  {:02}:{:02}  {} villagers",
        meta.years, meta.hours, meta.mins, meta.villagers
    );

    let mut out = String::new();
    writeln!(&mut out).expect("writing to String cannot fail");
    writeln!(&mut out, "{}", centered_no_trailing("FARTHEST FRONTIER", SHEET_WIDTH))
        .expect("writing to String cannot fail");
    writeln!(&mut out, "{}", centered_no_trailing(&title, SHEET_WIDTH))
        .expect("writing to String cannot fail");
    writeln!(&mut out, "{}", centered_no_trailing(&date_time_str, SHEET_WIDTH))
        .expect("writing to String cannot fail");
    writeln!(&mut out).expect("writing to String cannot fail");

    write_pair(
        &mut out,
        &format!("Version: {}", meta.version),
        &format!("Seed: {}", meta.seed),
    );
    write_pair(
        &mut out,
        &format!("Wildlife: {}", meta.wildlife_difficulty),
        &format!("Raiders: {}", meta.raiders_difficulty),
    );
    write_pair(
        &mut out,
        &format!("Pacifist: {}", if meta.pacifist != 0 { "yes" } else { "no" }),
        &format!("Camera: {}", format_point(report.camera)),
    );
    if let Some((width, height)) = report.world_size {
        writeln!(&mut out, "  World: {width} x {height}").expect("writing to String cannot fail");
    }

    if !report.minerals.is_empty() {
        write_section(&mut out, "Mineral Totals");
        for total in mineral_totals(&report.minerals) {
            writeln!(
                &mut out,
                "  {:<w$}x{:<6}total: {}",
                total.mineral_type.as_str(),
                total.deposits,
                format_number_with_commas(total.amount),
                w = LABEL_WIDTH,
            )
            .expect("writing to String cannot fail");
        }

        write_section(&mut out, "Minerals");
        for mineral in &report.minerals {
            writeln!(
                &mut out,
                "  {:<w$}{:<p$}r={:<8.1}{}",
                mineral.mineral_type.as_str(),
                format_point(mineral.position),
                mineral.radius,
                format_number_with_commas(u64::from(mineral.amount)),
                w = LABEL_WIDTH,
                p = POINT_WIDTH,
            )
            .expect("writing to String cannot fail");
        }
    }

    if !report.forageables.is_empty() {
        write_section(&mut out, "Forageables");
        for forageable in &report.forageables {
            writeln!(
                &mut out,
                "  {:<w$}{:<p$}{}",
                fit_column(forageable.item.as_str(), LABEL_WIDTH - 1),
                format_point(forageable.position),
                forageable.amount,
                w = LABEL_WIDTH,
                p = POINT_WIDTH,
            )
            .expect("writing to String cannot fail");
        }
    }

    if !report.raiders.is_empty() {
        write_section(&mut out, "Raiders");
        for raider in &report.raiders {
            writeln!(
                &mut out,
                "  {:<w$}{:<p$}hp={}",
                fit_column(raider.raider_type.as_str(), LABEL_WIDTH - 1),
                format_point(raider.position),
                raider.hp,
                w = LABEL_WIDTH,
                p = POINT_WIDTH,
            )
            .expect("writing to String cannot fail");
        }
    }

    write_base_section(&mut out, "Enemies", &report.enemies);
    write_base_section(&mut out, "Animals", &report.animals);

    if !report.animal_details.is_empty() {
        write_section(&mut out, "Deer");
        for deer in &report.animal_details {
            writeln!(
                &mut out,
                "  {:<p$}hp={}  area={}  spawn={}  wander={}",
                format_point(deer.position),
                deer.hp,
                deer.spawn_area,
                deer.spawn_points.len(),
                deer.wander_points.len(),
                p = POINT_WIDTH,
            )
            .expect("writing to String cannot fail");
        }
    }

    if !report.animal_spawns.is_empty() {
        write_section(&mut out, "Spawn Areas");
        for spawn in &report.animal_spawns {
            writeln!(
                &mut out,
                "  {:<w$}{}",
                spawn.spawn_area,
                spawn.species.as_str(),
                w = LABEL_WIDTH,
            )
            .expect("writing to String cannot fail");
        }
    }

    write_base_section(&mut out, "Houses", &report.houses);

    if options.verbose {
        write_section(&mut out, "Records");
        for entry in &report.categories {
            writeln!(
                &mut out,
                "  {:<24}{}",
                entry.category.as_str(),
                entry.count
            )
            .expect("writing to String cannot fail");
        }
        writeln!(
            &mut out,
            "  {} records, {} bytes",
            report.record_count,
            format_number_with_commas(report.file_len)
        )
        .expect("writing to String cannot fail");
    }

    out
}

fn write_pair(out: &mut String, left: &str, right: &str) {
    let line = format!("  {:<w$}{}", fit_column(left, HALF_WIDTH - 3), right, w = HALF_WIDTH - 2);
    writeln!(out, "{}", line.trim_end()).expect("writing to String cannot fail");
}

fn write_section(out: &mut String, title: &str) {
    writeln!(out).expect("writing to String cannot fail");
    writeln!(out, " ::: {title} :::").expect("writing to String cannot fail");
}

fn write_base_section(out: &mut String, title: &str, list: &[BaseData]) {
    if list.is_empty() {
        return;
    }
    write_section(out, title);
    for entry in list {
        writeln!(
            out,
            "  {:<w$}{}",
            entry.category.as_str(),
            format_point(entry.position),
            w = LABEL_WIDTH,
        )
        .expect("writing to String cannot fail");
    }
}

fn format_point(p: Point) -> String {
    format!("({:.1}, {:.1}, {:.1})", p.x, p.y, p.z)
}

fn fit_column(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 3 {
        return value.chars().take(width).collect();
    }

    let mut out = String::with_capacity(width);
    for ch in value.chars().take(width - 3) {
        out.push(ch);
    }
    out.push_str("...");
    out
}

fn centered_no_trailing(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }

    let left_padding = (width - len) / 2;
    format!("{}{}", " ".repeat(left_padding), value)
}

fn format_number_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}
