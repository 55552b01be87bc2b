// src/export.rs
//! Экспорт артефактов генерации
//!
//! Табличные данные пишутся в CSV с разделителем `;`, геометрия — в JSON,
//! растры — в PNG. Манифест перечисляет относительные пути всех
//! артефактов и версию инструмента, чтобы потребитель мог забрать весь
//! комплект одной ссылкой. Реконструкция — обратный проход: по
//! экспортированным фигурам восстанавливается каркасная карта для
//! визуальной сверки.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::MapToolError;
use crate::province::ProvinceRecord;
use crate::rivers::RiverData;
use crate::shapes::ShapeData;
use crate::territory::TerritoryRecord;

/// Пишет CSV провинций: одна строка на провинцию в порядке метаданных
pub fn export_province_csv(metadata: &[ProvinceRecord], path: &Path) -> Result<(), MapToolError> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_path(path)?;
    writer.write_record([
        "province_id",
        "R",
        "G",
        "B",
        "province_type",
        "x",
        "y",
        "Biome_R",
        "Biome_G",
        "Biome_B",
        "Biome_ID",
        "Biome_Name",
    ])?;
    for d in metadata {
        writer.write_record([
            d.region_id.clone(),
            d.color[0].to_string(),
            d.color[1].to_string(),
            d.color[2].to_string(),
            d.kind.as_str().to_string(),
            format!("{:.2}", d.centroid.0),
            format!("{:.2}", d.centroid.1),
            d.biome_color[0].to_string(),
            d.biome_color[1].to_string(),
            d.biome_color[2].to_string(),
            d.biome_id.clone(),
            d.biome_name.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Пишет CSV территорий
pub fn export_territory_csv(
    metadata: &[TerritoryRecord],
    path: &Path,
) -> Result<(), MapToolError> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_path(path)?;
    writer.write_record(["territory_id", "R", "G", "B", "territory_type", "x", "y"])?;
    for d in metadata {
        writer.write_record([
            d.region_id.clone(),
            d.color[0].to_string(),
            d.color[1].to_string(),
            d.color[2].to_string(),
            d.kind.as_str().to_string(),
            format!("{:.2}", d.centroid.0),
            format!("{:.2}", d.centroid.1),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct TerritoryJson<'a> {
    territory_id: &'a str,
    provinces: &'a [String],
}

/// Пишет по файлу `<territory_id>.json` на территорию
///
/// Возвращает имена созданных файлов для манифеста.
pub fn export_territory_jsons(
    metadata: &[TerritoryRecord],
    dir: &Path,
) -> Result<Vec<String>, MapToolError> {
    fs::create_dir_all(dir)?;
    let mut files = Vec::with_capacity(metadata.len());
    for territory in metadata {
        let body = TerritoryJson {
            territory_id: &territory.region_id,
            provinces: &territory.province_ids,
        };
        // отступ в четыре пробела, как принято у потребителей формата
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let file = fs::File::create(dir.join(format!("{}.json", territory.region_id)))?;
        let mut serializer = serde_json::Serializer::with_formatter(file, formatter);
        body.serialize(&mut serializer)?;
        files.push(format!("{}.json", territory.region_id));
    }
    Ok(files)
}

#[derive(Serialize, Deserialize)]
struct VertexJson {
    id: usize,
    x: u32,
    y: u32,
}

#[derive(Serialize, Deserialize)]
struct EdgeJson {
    id: usize,
    v1: usize,
    v2: usize,
    #[serde(default)]
    is_river: bool,
}

#[derive(Serialize)]
struct ProvinceShapeJson<'a> {
    id: &'a str,
    edges: &'a [usize],
}

#[derive(Serialize)]
struct ShapesJson<'a> {
    vertices: Vec<VertexJson>,
    edges: Vec<EdgeJson>,
    provinces: Vec<ProvinceShapeJson<'a>>,
}

/// Пишет планарный граф с флагами рек
///
/// Без карты высот рек нет: `is_river` присутствует на каждом ребре и
/// всюду ложен.
pub fn export_shapes_json(
    shapes: &ShapeData,
    rivers: Option<&RiverData>,
    path: &Path,
) -> Result<(), MapToolError> {
    let body = ShapesJson {
        vertices: shapes
            .vertices
            .iter()
            .map(|v| VertexJson {
                id: v.id,
                x: v.x,
                y: v.y,
            })
            .collect(),
        edges: shapes
            .edges
            .iter()
            .map(|e| EdgeJson {
                id: e.id,
                v1: e.v1,
                v2: e.v2,
                is_river: rivers.is_some_and(|r| r.river_edges.contains(&e.id)),
            })
            .collect(),
        provinces: shapes
            .provinces
            .iter()
            .map(|p| ProvinceShapeJson {
                id: &p.id,
                edges: &p.edges,
            })
            .collect(),
    };
    fs::write(path, serde_json::to_string(&body)?)?;
    Ok(())
}

#[derive(Serialize)]
struct Manifest<'a> {
    version: &'a str,
    artifacts: &'a [String],
}

/// Пишет манифест комплекта артефактов
pub fn export_manifest(artifacts: &[String], path: &Path) -> Result<(), MapToolError> {
    let manifest = Manifest {
        version: env!("CARGO_PKG_VERSION"),
        artifacts,
    };
    fs::write(path, serde_json::to_string_pretty(&manifest)?)?;
    Ok(())
}

#[derive(Deserialize)]
struct ShapesFileIn {
    vertices: Vec<VertexJson>,
    edges: Vec<EdgeJson>,
}

#[derive(Deserialize)]
struct ProvinceCsvRow {
    #[serde(rename = "R")]
    r: u8,
    #[serde(rename = "G")]
    g: u8,
    #[serde(rename = "B")]
    b: u8,
    x: f64,
    y: f64,
}

/// Восстанавливает каркасную карту из экспортированных фигур
///
/// Рёбра рисуются серыми линиями; при наличии CSV провинций их центроиды
/// отмечаются точками цвета провинции. Нужна для сверки экспорта глазами.
pub fn reconstruct_map(
    shapes_path: &Path,
    csv_path: Option<&Path>,
    output_path: &Path,
) -> Result<(), MapToolError> {
    println!("🧭 Загрузка фигур из {}...", shapes_path.display());
    let shapes: ShapesFileIn = serde_json::from_str(&fs::read_to_string(shapes_path)?)?;

    let positions: HashMap<usize, (f32, f32)> = shapes
        .vertices
        .iter()
        .map(|v| (v.id, (v.x as f32, v.y as f32)))
        .collect();

    let max_x = shapes.vertices.iter().map(|v| v.x).max().unwrap_or(0);
    let max_y = shapes.vertices.iter().map(|v| v.y).max().unwrap_or(0);
    let mut image = RgbImage::from_pixel(max_x + 10, max_y + 10, Rgb([20, 20, 20]));

    println!("✏️  Отрисовка {} рёбер...", shapes.edges.len());
    for edge in &shapes.edges {
        let (Some(&a), Some(&b)) = (positions.get(&edge.v1), positions.get(&edge.v2)) else {
            continue;
        };
        let color = if edge.is_river {
            Rgb([90, 140, 255])
        } else {
            Rgb([200, 200, 200])
        };
        draw_line_segment_mut(&mut image, a, b, color);
    }

    if let Some(csv_path) = csv_path {
        println!("🎨 Центроиды провинций из {}...", csv_path.display());
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_path(csv_path)?;
        for row in reader.deserialize::<ProvinceCsvRow>() {
            let row = row?;
            draw_filled_circle_mut(
                &mut image,
                (row.x as i32, row.y as i32),
                2,
                Rgb([row.r, row.g, row.b]),
            );
        }
    }

    image.save(output_path)?;
    println!("💾 Реконструкция сохранена в {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::province::{RegionAccumulator, RegionKind};
    use crate::shapes::{ProvinceShape, ShapeEdge, ShapeVertex};
    use std::collections::HashSet;

    fn sample_provinces() -> Vec<ProvinceRecord> {
        let mut acc = RegionAccumulator::new(
            "prv-0001".to_string(),
            RegionKind::Land,
            [10, 20, 30],
            (0, 0),
        );
        acc.absorb(1, 1);
        vec![acc.into_province()]
    }

    fn sample_shapes() -> ShapeData {
        ShapeData {
            vertices: vec![
                ShapeVertex { id: 0, x: 0, y: 0 },
                ShapeVertex { id: 1, x: 4, y: 3 },
            ],
            edges: vec![ShapeEdge { id: 0, v1: 0, v2: 1 }],
            provinces: vec![ProvinceShape {
                id: "prv-0001".to_string(),
                edges: vec![0],
            }],
        }
    }

    #[test]
    fn province_csv_header_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("provinces.csv");
        export_province_csv(&sample_provinces(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "province_id;R;G;B;province_type;x;y;Biome_R;Biome_G;Biome_B;Biome_ID;Biome_Name"
        );
        assert_eq!(
            lines.next().unwrap(),
            "prv-0001;10;20;30;land;0.50;0.50;0;0;0;unknown;Unknown"
        );
    }

    #[test]
    fn territory_json_uses_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let territory = TerritoryRecord {
            region_id: "ter-001".to_string(),
            kind: RegionKind::Land,
            color: [5, 6, 7],
            centroid: (1.0, 2.0),
            province_ids: vec!["prv-0001".to_string()],
        };
        let files = export_territory_jsons(&[territory], dir.path()).unwrap();
        assert_eq!(files, vec!["ter-001.json".to_string()]);

        let contents = fs::read_to_string(dir.path().join("ter-001.json")).unwrap();
        assert!(contents.contains("    \"territory_id\": \"ter-001\""));
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["provinces"][0], "prv-0001");
    }

    #[test]
    fn shapes_json_carries_river_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("province_shapes.json");
        let rivers = RiverData {
            river_edges: HashSet::from([0]),
            edge_flow: HashMap::new(),
        };
        export_shapes_json(&sample_shapes(), Some(&rivers), &path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["edges"][0]["is_river"], true);
        assert_eq!(parsed["vertices"][1]["x"], 4);
        assert_eq!(parsed["provinces"][0]["id"], "prv-0001");
    }

    #[test]
    fn reconstruction_rebuilds_an_image_from_the_exports() {
        let dir = tempfile::tempdir().unwrap();
        let shapes_path = dir.path().join("province_shapes.json");
        let csv_path = dir.path().join("provinces.csv");
        let out_path = dir.path().join("reconstructed.png");

        export_shapes_json(&sample_shapes(), None, &shapes_path).unwrap();
        export_province_csv(&sample_provinces(), &csv_path).unwrap();
        reconstruct_map(&shapes_path, Some(&csv_path), &out_path).unwrap();

        let image = image::open(&out_path).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (14, 13));
    }

    #[test]
    fn manifest_lists_artifacts_and_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let artifacts = vec!["provinces.png".to_string(), "provinces.csv".to_string()];
        export_manifest(&artifacts, &path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(parsed["artifacts"][1], "provinces.csv");
    }
}
