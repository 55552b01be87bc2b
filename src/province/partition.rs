// src/province/partition.rs
//! Разбиение маски заливки на области
//!
//! Многоисточниковый поиск в ширину от точек-семян: все семена попадают в
//! очередь до начала роста, поэтому при равном расстоянии побеждает более
//! ранний сосед (FIFO). Стены в заливку не входят и раздаются областям
//! отдельным проходом по преобразованию расстояния.

use rand::Rng;
use std::collections::VecDeque;

use crate::color::ColorAllocator;
use crate::edt::nearest_source_indices;
use crate::error::MapToolError;
use crate::grid::{IndexGrid, Mask, UNASSIGNED};
use crate::ids::IdSeries;
use crate::province::seeder::jitter_seeds;
use crate::province::{RegionAccumulator, RegionKind};

const NEIGHBORS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Результат разбиения одного типа поверхности
#[derive(Debug)]
pub struct Partition {
    pub grid: IndexGrid,
    pub regions: Vec<RegionAccumulator>,
}

/// Заливает маску от заданных семян
///
/// Индексы областей идут подряд от `start_index` в порядке семян. Семя,
/// которому серия не смогла выдать идентификатор, пропускается и индекс
/// не расходует — сетка всегда ссылается на плотный список областей.
pub fn partition(
    fill: &Mask,
    seeds: &[(u32, u32)],
    start_index: usize,
    kind: RegionKind,
    series: &mut IdSeries,
    colors: &mut ColorAllocator,
) -> Result<Partition, MapToolError> {
    let w = fill.width as i32;
    let h = fill.height as i32;
    let mut grid = IndexGrid::unassigned(fill.width, fill.height);
    let mut regions: Vec<RegionAccumulator> = Vec::with_capacity(seeds.len());
    let mut queue = VecDeque::new();

    for &(sx, sy) in seeds {
        let Some(region_id) = series.next_id() else {
            continue;
        };
        let index = start_index + regions.len();
        let color = colors.alloc(index, kind)?;
        grid.set(sx, sy, index as i32);
        regions.push(RegionAccumulator::new(region_id, kind, color, (sx, sy)));
        queue.push_back((sx as i32, sy as i32, index));
    }

    while let Some((x, y, index)) = queue.pop_front() {
        for &(dx, dy) in &NEIGHBORS {
            let nx = x + dx;
            let ny = y + dy;
            if nx < 0 || nx >= w || ny < 0 || ny >= h {
                continue;
            }
            let (ux, uy) = (nx as u32, ny as u32);
            if grid.get(ux, uy) == UNASSIGNED && fill.get(ux, uy) {
                grid.set(ux, uy, index as i32);
                regions[index - start_index].absorb(ux, uy);
                queue.push_back((nx, ny, index));
            }
        }
    }

    Ok(Partition { grid, regions })
}

/// Раздаёт пиксели стен ближайшим областям
///
/// Для множества уже назначенных пикселей строится преобразование
/// расстояния с индексами ближайших источников; каждый пиксель стены
/// получает индекс своего ближайшего источника. Даёт визуально прямые
/// швы даже вдоль длинных стен.
pub fn assign_borders(grid: &mut IndexGrid, border: &Mask) {
    let valid = grid.assigned_mask();
    if !valid.any() || !border.any() {
        return;
    }

    let nearest = nearest_source_indices(&valid);
    for idx in 0..grid.data.len() {
        if border.data[idx] {
            grid.data[idx] = grid.data[nearest[idx]];
        }
    }
}

/// Сеет, заливает и раздаёт стены для одного типа поверхности
///
/// `None` — тип не запрошен или в маске нет ни пикселей, ни семян.
pub fn build_partition<R: Rng>(
    fill: &Mask,
    border: &Mask,
    num_points: usize,
    start_index: usize,
    kind: RegionKind,
    series: &mut IdSeries,
    colors: &mut ColorAllocator,
    rng: &mut R,
) -> Result<Option<Partition>, MapToolError> {
    if num_points == 0 || !fill.any() {
        return Ok(None);
    }

    let seeds = jitter_seeds(fill, num_points, rng);
    if seeds.is_empty() {
        return Ok(None);
    }

    let mut part = partition(fill, &seeds, start_index, kind, series, colors)?;
    assign_borders(&mut part.grid, border);
    Ok(Some(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wall_column_setup() -> (Mask, Mask) {
        // 10×10, одиночная стена в столбце x=5
        let mut fill = Mask::filled(10, 10, true);
        let mut border = Mask::new(10, 10);
        for y in 0..10 {
            fill.set(5, y, false);
            border.set(5, y, true);
        }
        (fill, border)
    }

    #[test]
    fn walls_stay_unassigned_until_the_border_pass() {
        let (fill, border) = wall_column_setup();
        let mut series = IdSeries::new("prv-", 1, 99);
        let mut colors = ColorAllocator::new();
        let part = partition(
            &fill,
            &[(2, 5), (7, 5)],
            0,
            RegionKind::Land,
            &mut series,
            &mut colors,
        )
        .unwrap();

        for y in 0..10 {
            assert_eq!(part.grid.get(5, y), UNASSIGNED);
        }
        assert_eq!(part.regions.len(), 2);
        assert_eq!(part.regions[0].count, 50);
        assert_eq!(part.regions[1].count, 40);
    }

    #[test]
    fn border_pixels_inherit_the_nearest_region() {
        let (fill, border) = wall_column_setup();
        let mut series = IdSeries::new("prv-", 1, 99);
        let mut colors = ColorAllocator::new();
        let mut part = partition(
            &fill,
            &[(2, 5), (7, 5)],
            0,
            RegionKind::Land,
            &mut series,
            &mut colors,
        )
        .unwrap();
        assign_borders(&mut part.grid, &border);

        assert!(part.grid.is_complete());
        for y in 0..10 {
            let owner = part.grid.get(5, y);
            assert!(owner == 0 || owner == 1);
            // сосед слева в одном пикселе, он и выигрывает
            assert_eq!(owner, part.grid.get(4, y));
        }

        // центроиды считаются только по пикселям до раздачи стен
        let (cx, cy) = part.regions[0].centroid();
        assert_relative_eq!(cx, 2.0);
        assert_relative_eq!(cy, 4.5);
        let (cx, cy) = part.regions[1].centroid();
        assert_relative_eq!(cx, 7.5);
        assert_relative_eq!(cy, 4.5);
    }

    #[test]
    fn fifo_order_breaks_ties_in_favor_of_the_earlier_seed() {
        // два семени на одной строке, равноудалённая середина
        let fill = Mask::filled(9, 1, true);
        let mut series = IdSeries::new("prv-", 1, 99);
        let mut colors = ColorAllocator::new();
        let part = partition(
            &fill,
            &[(2, 0), (6, 0)],
            0,
            RegionKind::Land,
            &mut series,
            &mut colors,
        )
        .unwrap();
        assert_eq!(part.grid.get(4, 0), 0);
    }

    #[test]
    fn exhausted_series_skips_seeds_without_index_gaps() {
        let fill = Mask::filled(6, 2, true);
        let mut series = IdSeries::new("prv-", 1, 1);
        let mut colors = ColorAllocator::new();
        let part = partition(
            &fill,
            &[(1, 0), (4, 0)],
            0,
            RegionKind::Land,
            &mut series,
            &mut colors,
        )
        .unwrap();

        assert_eq!(part.regions.len(), 1);
        assert_eq!(part.regions[0].region_id, "prv-1");
        // вся заливка досталась единственной области
        assert!(part.grid.data.iter().all(|&v| v == 0));
    }
}
