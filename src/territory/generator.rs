// src/territory/generator.rs
//! Конвейер генерации территорий
//!
//! Территории строятся той же машинерией, что и провинции, но с более
//! редкими семенами и собственной серией идентификаторов. Принадлежность
//! провинции территории определяется поточечно: в сыром растре территорий
//! берётся цвет под центроидом провинции и отображается в идентификатор
//! территории. Итоговое изображение рисуется по провинциям: пиксель
//! получает цвет территории своей провинции, неприписанные провинции
//! остаются чёрными.

use image::{Rgb, RgbImage};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

use crate::color::{Color, ColorAllocator};
use crate::config::ToolParams;
use crate::error::MapToolError;
use crate::grid::IndexGrid;
use crate::ids::IdSeries;
use crate::mask::MapMasks;
use crate::province::compose::compose;
use crate::province::generator::ProvinceMapOutput;
use crate::province::partition::{Partition, build_partition};
use crate::province::RegionKind;
use crate::render::render_index_map;
use crate::territory::TerritoryRecord;

// Сдвиг сида, чтобы семена территорий не повторяли семена провинций
const SEED_OFFSET: u64 = 1_000_000;

/// Результат генерации территорий
#[derive(Debug)]
pub struct TerritoryMapOutput {
    pub metadata: Vec<TerritoryRecord>,
    /// Карта территорий, построенная по провинциям
    pub territory_image: RgbImage,
}

/// Запускает конвейер территорий поверх готовых провинций
pub fn generate_territory_map(
    masks: &MapMasks,
    provinces: &ProvinceMapOutput,
    params: &ToolParams,
) -> Result<TerritoryMapOutput, MapToolError> {
    let mut series = IdSeries::new(
        &params.territory_id_prefix,
        params.territory_id_start,
        params.territory_id_end,
    );
    let mut colors = ColorAllocator::new();
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed.wrapping_add(SEED_OFFSET));

    let (land_fill, land_border) = masks.fill_and_border(RegionKind::Land);
    let land = build_partition(
        &land_fill,
        &land_border,
        params.territory_land_points,
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

    let sea = if params.territory_ocean_points > 0 && masks.has_ocean {
        let (sea_fill, sea_border) = masks.fill_and_border(RegionKind::Ocean);
        let part = build_partition(
            &sea_fill,
            &sea_border,
            params.territory_ocean_points,
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

    let mut metadata: Vec<TerritoryRecord> = land_regions
        .into_iter()
        .chain(sea_regions)
        .map(TerritoryRecord::from_accumulator)
        .collect();

    // сырой растр территорий нужен только для поиска по центроидам
    let lut: Vec<Color> = metadata.iter().map(|d| d.color).collect();
    let raw_image = render_index_map(&combined, &lut);

    let color_to_territory: HashMap<Color, usize> = metadata
        .iter()
        .enumerate()
        .map(|(i, d)| (d.color, i))
        .collect();

    // раскладка провинций по территориям в порядке списка провинций
    let mut assigned: Vec<Vec<String>> = vec![Vec::new(); metadata.len()];
    for province in &provinces.metadata {
        let ix = province.centroid.0 as u32;
        let iy = province.centroid.1 as u32;
        let sampled = raw_image.get_pixel(ix, iy).0;
        if let Some(&t) = color_to_territory.get(&sampled) {
            assigned[t].push(province.region_id.clone());
        }
    }
    for (record, ids) in metadata.iter_mut().zip(assigned) {
        record.province_ids = ids;
    }

    let territory_image = build_province_based_image(provinces, &metadata);

    Ok(TerritoryMapOutput {
        metadata,
        territory_image,
    })
}

/// Красит пиксели по территориям их провинций
fn build_province_based_image(
    provinces: &ProvinceMapOutput,
    territories: &[TerritoryRecord],
) -> RgbImage {
    let mut province_to_territory_color: HashMap<&str, Color> = HashMap::new();
    for territory in territories {
        for pid in &territory.province_ids {
            province_to_territory_color.insert(pid.as_str(), territory.color);
        }
    }
    let color_to_province: HashMap<Color, &str> = provinces
        .metadata
        .iter()
        .map(|d| (d.color, d.region_id.as_str()))
        .collect();

    let (w, h) = provinces.province_image.dimensions();
    let mut out = RgbImage::new(w, h);
    for (x, y, pixel) in provinces.province_image.enumerate_pixels() {
        if let Some(pid) = color_to_province.get(&pixel.0) {
            if let Some(&territory_color) = province_to_territory_color.get(pid) {
                out.put_pixel(x, y, Rgb(territory_color));
            }
        }
    }
    out
}
