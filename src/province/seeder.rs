// src/province/seeder.rs
//! Равномерно-случайные точки-семена по сетке
//!
//! Карта делится на G×G ячеек, где G = ⌊√N⌋, и в каждой ячейке выбирается
//! один случайный пиксель, попадающий в маску. Ячейки без подходящих
//! пикселей пропускаются, поэтому итоговых семян может быть меньше N.
//! Порядок семян — построчный по ячейкам, что фиксирует индексы областей.

use rand::Rng;

use crate::grid::Mask;

/// Генерирует до `⌊√N⌋²` семян внутри маски
#[must_use]
pub fn jitter_seeds<R: Rng>(mask: &Mask, num_points: usize, rng: &mut R) -> Vec<(u32, u32)> {
    if num_points == 0 {
        return Vec::new();
    }

    let h = mask.height as usize;
    let w = mask.width as usize;
    let grid = ((num_points as f64).sqrt() as usize).max(1);

    let cell_h = h as f64 / grid as f64;
    let cell_w = w as f64 / grid as f64;
    let mut seeds = Vec::new();

    for gy in 0..grid {
        let y0 = (gy as f64 * cell_h) as usize;
        let y1 = ((gy as f64 + 1.0) * cell_h) as usize;

        for gx in 0..grid {
            let x0 = (gx as f64 * cell_w) as usize;
            let x1 = ((gx as f64 + 1.0) * cell_w) as usize;

            // кандидаты ячейки в построчном порядке
            let mut cell = Vec::new();
            for y in y0..y1.min(h) {
                for x in x0..x1.min(w) {
                    if mask.data[y * w + x] {
                        cell.push((x as u32, y as u32));
                    }
                }
            }
            if cell.is_empty() {
                continue;
            }

            let pick = rng.gen_range(0..cell.len());
            seeds.push(cell[pick]);
        }
    }

    seeds
}
