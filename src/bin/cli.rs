// src/bin/cli.rs
//! CLI-интерфейс генератора политической карты
//!
//! ## Конвейер генерации
//!
//! 1. **Загрузка конфигурации** — параметры из TOML-файла
//! 2. **Маски** — стены, океан и суша из входных растров
//! 3. **Провинции** — заливка от семян, раздача стен, сборка сетки
//! 4. **Биомы** — сопоставление палитры по центроидам провинций
//! 5. **Территории** — укрупнённое разбиение и раскладка провинций
//! 6. **Планарный граф** — вершины, рёбра и смежность областей
//! 7. **Реки** — накопление стока по карте высот
//! 8. **Экспорт** — PNG, CSV, JSON и манифест комплекта
//!
//! ## Использование
//! ```bash
//! # Полная генерация
//! maptool-cli generate --config map.toml --boundary borders.png \
//!     --ocean ocean.png --biome-image biomes.png --heightmap height.png \
//!     --output output/
//!
//! # Каркасная сверка экспорта
//! maptool-cli reconstruct --shapes output/province_shapes.json \
//!     --csv output/provinces.csv --output check.png
//! ```
//!
//! ## Выходные файлы
//! - `provinces.png` — карта провинций (уникальные цвета)
//! - `biomes.png` — карта биомов провинций
//! - `territories.png` — карта территорий по провинциям
//! - `provinces.csv`, `territories.csv` — табличные данные
//! - `territories/<id>.json` — состав каждой территории
//! - `province_shapes.json` — планарный граф с флагами рек
//! - `manifest.json` — перечень артефактов и версия

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use maptool::export::{
    export_manifest, export_province_csv, export_shapes_json, export_territory_csv,
    export_territory_jsons, reconstruct_map,
};
use maptool::{
    BiomePalette, Heightmap, MapMasks, ToolParams, extract_shapes, generate_province_map,
    generate_rivers, generate_territory_map,
};

/// Параметры командной строки
#[derive(Parser, Debug)]
#[command(
    name = "maptool",
    version,
    about = "Province and territory map generator",
    long_about = "Turns raster masks into provinces, territories, biomes, a planar\n\
                  boundary graph and river annotations, with PNG/CSV/JSON exports."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Полный конвейер: провинции, территории, граф, реки, экспорт
    Generate {
        /// Путь к конфигурационному TOML-файлу (без него — значения по умолчанию)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Растр маски границ (стены по опорному цвету)
        #[arg(long, value_name = "IMAGE")]
        boundary: Option<PathBuf>,

        /// Растр океана (пиксели опорного цвета — вода)
        #[arg(long, value_name = "IMAGE")]
        ocean: Option<PathBuf>,

        /// Цветной растр биомов
        #[arg(long, value_name = "IMAGE")]
        biome_image: Option<PathBuf>,

        /// Одноканальная карта высот для рек
        #[arg(long, value_name = "IMAGE")]
        heightmap: Option<PathBuf>,

        /// JSON-палитра биомов
        #[arg(long, default_value = "biomes.json", value_name = "FILE")]
        palette: PathBuf,

        /// Каталог для результатов генерации
        #[arg(short, long, default_value = "output", value_name = "DIR")]
        output: PathBuf,
    },
    /// Каркасная карта из экспортированных фигур для визуальной сверки
    Reconstruct {
        /// Файл `province_shapes.json`
        #[arg(long, value_name = "FILE")]
        shapes: PathBuf,

        /// CSV провинций для цветных отметок центроидов
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Путь итогового PNG
        #[arg(short, long, default_value = "reconstructed_map.png", value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            config,
            boundary,
            ocean,
            biome_image,
            heightmap,
            palette,
            output,
        } => generate(
            config.as_deref(),
            boundary.as_deref(),
            ocean.as_deref(),
            biome_image.as_deref(),
            heightmap.as_deref(),
            &palette,
            &output,
        ),
        Command::Reconstruct {
            shapes,
            csv,
            output,
        } => {
            reconstruct_map(&shapes, csv.as_deref(), &output)?;
            Ok(())
        }
    }
}

#[allow(clippy::too_many_lines)] // CLI-бинарник допускает длинную функцию конвейера
fn generate(
    config: Option<&Path>,
    boundary: Option<&Path>,
    ocean: Option<&Path>,
    biome_image: Option<&Path>,
    heightmap: Option<&Path>,
    palette_path: &Path,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(output)?;
    println!("📁 Вывод: {}", output.display());

    // === ЭТАП 1: Конфигурация ===
    let params = match config {
        Some(path) => {
            println!("🔍 Загрузка конфигурации из {}...", path.display());
            ToolParams::from_toml_file(path)?
        }
        None => {
            println!("🔍 Конфигурация не задана, берутся значения по умолчанию");
            ToolParams::default()
        }
    };
    println!(
        "⚙️  Сид: {}, плотности: {} суша / {} океан",
        params.seed, params.province_land_points, params.province_ocean_points
    );

    // === ЭТАП 2: Входные растры и маски ===
    let boundary_image = boundary.map(image::open).transpose()?;
    let ocean_image = ocean.map(image::open).transpose()?;
    let biome_raster = biome_image
        .map(image::open)
        .transpose()?
        .map(|img| img.to_rgb8());
    let height_raster = heightmap
        .map(image::open)
        .transpose()?
        .map(|img| Heightmap::from_image(&img));

    let masks = MapMasks::build(boundary_image.as_ref(), ocean_image.as_ref(), &params)?;
    println!(
        "🗺️  Маски построены: {}×{}, суша {} пикс., океан {} пикс.",
        masks.width,
        masks.height,
        masks.land.count(),
        masks.sea.count()
    );

    let palette = BiomePalette::load_or_empty(palette_path);
    if !palette.is_empty() {
        println!("🌿 Палитра биомов: {} записей", palette.len());
    }

    // === ЭТАП 3: Провинции ===
    println!("🌱 Генерация провинций...");
    let provinces = generate_province_map(&masks, biome_raster.as_ref(), &palette, &params)?;
    println!("✅ Провинций: {}", provinces.metadata.len());

    provinces.province_image.save(output.join("provinces.png"))?;
    println!("✅ provinces.png сохранён");
    provinces.biome_image.save(output.join("biomes.png"))?;
    println!("✅ biomes.png сохранён");

    // === ЭТАП 4: Территории ===
    println!("🧩 Генерация территорий...");
    let territories = generate_territory_map(&masks, &provinces, &params)?;
    println!("✅ Территорий: {}", territories.metadata.len());

    territories
        .territory_image
        .save(output.join("territories.png"))?;
    println!("✅ territories.png сохранён");

    // === ЭТАП 5: Табличный экспорт ===
    export_province_csv(&provinces.metadata, &output.join("provinces.csv"))?;
    println!("✅ provinces.csv сохранён");
    export_territory_csv(&territories.metadata, &output.join("territories.csv"))?;
    println!("✅ territories.csv сохранён");

    let territory_files =
        export_territory_jsons(&territories.metadata, &output.join("territories"))?;
    println!("✅ Состав территорий: {} файлов", territory_files.len());

    // === ЭТАП 6: Планарный граф ===
    println!("📐 Извлечение фигур провинций...");
    let region_ids: Vec<String> = provinces
        .metadata
        .iter()
        .map(|d| d.region_id.clone())
        .collect();
    let shapes = extract_shapes(&provinces.grid, &region_ids);
    println!(
        "✅ Граф: {} вершин, {} рёбер",
        shapes.vertices.len(),
        shapes.edges.len()
    );

    // === ЭТАП 7: Реки ===
    let rivers = match &height_raster {
        Some(hm) => {
            println!("🌊 Генерация рек (порог {})...", params.river_threshold);
            let data = generate_rivers(&shapes, hm, &provinces.metadata, params.river_threshold);
            println!("✅ Рёбер-рек: {}", data.river_edges.len());
            Some(data)
        }
        None => {
            println!("⚠️  Карта высот не задана — реки пропущены");
            None
        }
    };

    export_shapes_json(
        &shapes,
        rivers.as_ref(),
        &output.join("province_shapes.json"),
    )?;
    println!("✅ province_shapes.json сохранён");

    // === ЭТАП 8: Манифест ===
    let mut artifacts = vec![
        "provinces.png".to_string(),
        "biomes.png".to_string(),
        "territories.png".to_string(),
        "provinces.csv".to_string(),
        "territories.csv".to_string(),
        "province_shapes.json".to_string(),
    ];
    artifacts.extend(territory_files.iter().map(|f| format!("territories/{f}")));
    export_manifest(&artifacts, &output.join("manifest.json"))?;
    println!("✅ manifest.json сохранён");

    // === ЗАВЕРШЕНИЕ ===
    println!("\n✅ Генерация завершена, результаты в {}", output.display());
    println!("\n📊 Статистика карты:");
    println!("   • Провинций: {}", provinces.metadata.len());
    println!("   • Территорий: {}", territories.metadata.len());
    println!("   • Вершин графа: {}", shapes.vertices.len());
    println!("   • Рёбер графа: {}", shapes.edges.len());
    if let Some(data) = &rivers {
        println!("   • Рёбер-рек: {}", data.river_edges.len());
    }

    Ok(())
}
