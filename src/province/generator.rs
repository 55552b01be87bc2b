// src/province/generator.rs
//! Сквозной конвейер генерации провинций
//!
//! Порядок стадий: маски → заливка суши с нулевого индекса → заливка
//! океана со смещением на число сухопутных областей → сборка единой сетки
//! → биомы по центроидам → отрисовка карт. Индекс области в сетке всегда
//! равен её позиции в объединённом списке метаданных.

use image::RgbImage;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::biome::BiomePalette;
use crate::color::{Color, ColorAllocator};
use crate::config::ToolParams;
use crate::error::MapToolError;
use crate::grid::IndexGrid;
use crate::ids::IdSeries;
use crate::mask::MapMasks;
use crate::province::compose::compose;
use crate::province::partition::{Partition, build_partition};
use crate::province::{ProvinceRecord, RegionAccumulator, RegionKind};
use crate::render::render_index_map;

/// Результат генерации провинций
#[derive(Debug)]
pub struct ProvinceMapOutput {
    /// Единая сетка: индекс области в каждом пикселе
    pub grid: IndexGrid,
    /// Записи провинций; позиция в списке равна индексу в сетке
    pub metadata: Vec<ProvinceRecord>,
    pub province_image: RgbImage,
    pub biome_image: RgbImage,
}

/// Запускает конвейер провинций
pub fn generate_province_map(
    masks: &MapMasks,
    biome_image: Option<&RgbImage>,
    palette: &BiomePalette,
    params: &ToolParams,
) -> Result<ProvinceMapOutput, MapToolError> {
    let mut series = IdSeries::new(
        &params.province_id_prefix,
        params.province_id_start,
        params.province_id_end,
    );
    let mut colors = ColorAllocator::new();
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);

    // суша обязательна
    let (land_fill, land_border) = masks.fill_and_border(RegionKind::Land);
    let land = build_partition(
        &land_fill,
        &land_border,
        params.province_land_points,
        0,
        RegionKind::Land,
        &mut series,
        &mut colors,
        &mut rng,
    )?
    .ok_or(MapToolError::EmptyDomain("land"))?;
    if land.regions.is_empty() {
        return Err(MapToolError::EmptyDomain("land"));
    }

    // океан разбивается только при ненулевой плотности и наличии растра
    let sea = if params.province_ocean_points > 0 && masks.has_ocean {
        let (sea_fill, sea_border) = masks.fill_and_border(RegionKind::Ocean);
        let part = build_partition(
            &sea_fill,
            &sea_border,
            params.province_ocean_points,
            land.regions.len(),
            RegionKind::Ocean,
            &mut series,
            &mut colors,
            &mut rng,
        )?
        .ok_or(MapToolError::EmptyDomain("ocean"))?;
        Some(part)
    } else {
        None
    };

    let Partition {
        grid: land_grid,
        regions: land_regions,
    } = land;
    let (sea_grid, sea_regions) = match sea {
        Some(Partition { grid, regions }) => (grid, regions),
        None => (IndexGrid::unassigned(masks.width, masks.height), Vec::new()),
    };

    let combined = compose(&land_grid, &sea_grid, &masks.land, &masks.sea);

    let mut metadata: Vec<ProvinceRecord> = land_regions
        .into_iter()
        .chain(sea_regions)
        .map(RegionAccumulator::into_province)
        .collect();

    if let Some(img) = biome_image {
        resolve_biomes(&mut metadata, img, palette);
    }

    let color_lut: Vec<Color> = metadata.iter().map(|d| d.color).collect();
    let biome_lut: Vec<Color> = metadata.iter().map(|d| d.biome_color).collect();
    let province_image = render_index_map(&combined, &color_lut);
    let biome_image = render_index_map(&combined, &biome_lut);

    Ok(ProvinceMapOutput {
        grid: combined,
        metadata,
        province_image,
        biome_image,
    })
}

/// Сопоставляет каждой провинции биом по цвету растра в её центроиде
fn resolve_biomes(metadata: &mut [ProvinceRecord], biome_image: &RgbImage, palette: &BiomePalette) {
    let (w, h) = biome_image.dimensions();
    for record in metadata.iter_mut() {
        let ix = record.centroid.0 as i64;
        let iy = record.centroid.1 as i64;
        if ix < 0 || iy < 0 || ix >= i64::from(w) || iy >= i64::from(h) {
            continue;
        }
        let sampled = biome_image.get_pixel(ix as u32, iy as u32).0;
        record.biome_color = sampled;
        if let Some(biome) = palette.resolve(sampled) {
            record.biome_id = biome.id.clone();
            record.biome_name = biome.name.clone();
        }
    }
}
