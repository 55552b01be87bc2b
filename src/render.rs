// src/render.rs
//! Отрисовка сетки индексов в цветное изображение
//!
//! Рендеринг — чистый поиск по таблице: по метаданным строится таблица
//! `индекс → цвет`, каждый пиксель получает цвет своей области. Индексы
//! вне таблицы дают чёрный пиксель — визуальный сигнал ошибки генерации.

use image::{ImageBuffer, RgbImage};

use crate::color::Color;
use crate::grid::IndexGrid;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Красит сетку индексов по таблице цветов
#[must_use]
pub fn render_index_map(grid: &IndexGrid, lut: &[Color]) -> RgbImage {
    let lookup = |v: i32| -> Color {
        if v >= 0 && (v as usize) < lut.len() {
            lut[v as usize]
        } else {
            [0, 0, 0]
        }
    };

    #[cfg(feature = "parallel")]
    let raw: Vec<u8> = grid.data.par_iter().flat_map_iter(|&v| lookup(v)).collect();

    #[cfg(not(feature = "parallel"))]
    let raw: Vec<u8> = grid.data.iter().flat_map(|&v| lookup(v)).collect();

    ImageBuffer::from_raw(grid.width, grid.height, raw).expect("buffer size matches dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_take_their_region_color() {
        let mut grid = IndexGrid::unassigned(2, 1);
        grid.set(0, 0, 0);
        grid.set(1, 0, 1);
        let lut = [[10, 20, 30], [40, 50, 60]];

        let image = render_index_map(&grid, &lut);
        assert_eq!(image.get_pixel(0, 0).0, [10, 20, 30]);
        assert_eq!(image.get_pixel(1, 0).0, [40, 50, 60]);
    }

    #[test]
    fn out_of_range_indices_render_black() {
        let mut grid = IndexGrid::unassigned(2, 1);
        grid.set(0, 0, 5);
        let image = render_index_map(&grid, &[[1, 1, 1]]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0]);
    }
}
