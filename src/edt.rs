// src/edt.rs
//! Евклидово преобразование расстояния с индексами ближайших источников
//!
//! Двухпроходная точная схема по квадратам расстояний: сначала для каждого
//! столбца ищется ближайшая строка-источник, затем по каждой строке строится
//! нижняя огибающая парабол. Итог — для каждого пикселя линейный индекс
//! ближайшего пикселя-источника. Разрешение ничьих детерминировано:
//! по вертикали побеждает меньшая строка, по горизонтали — левая парабола.

use crate::grid::Mask;

// «Бесконечность» для столбцов без источников
const FAR: f64 = 1e20;

/// Для каждого пикселя возвращает линейный индекс ближайшего источника.
///
/// Маска должна содержать хотя бы один истинный пиксель, иначе результат
/// не определён (вызывающая сторона обязана проверить `sources.any()`).
#[must_use]
pub fn nearest_source_indices(sources: &Mask) -> Vec<usize> {
    let w = sources.width as usize;
    let h = sources.height as usize;
    let total = w * h;

    // Этап 1: по каждому столбцу — ближайшая строка-источник и квадрат
    // вертикального расстояния до неё
    let mut col_row = vec![usize::MAX; total];
    let mut col_dist = vec![FAR; total];
    for x in 0..w {
        let mut last: Option<usize> = None;
        for y in 0..h {
            if sources.data[y * w + x] {
                last = Some(y);
            }
            if let Some(r) = last {
                col_row[y * w + x] = r;
                col_dist[y * w + x] = ((y - r) * (y - r)) as f64;
            }
        }
        last = None;
        for y in (0..h).rev() {
            if sources.data[y * w + x] {
                last = Some(y);
            }
            if let Some(r) = last {
                let d = ((r - y) * (r - y)) as f64;
                // строго меньше: при равенстве остаётся верхний источник
                if d < col_dist[y * w + x] {
                    col_dist[y * w + x] = d;
                    col_row[y * w + x] = r;
                }
            }
        }
    }

    // Этап 2: нижняя огибающая парабол вдоль каждой строки
    let mut out = vec![usize::MAX; total];
    let mut hull = vec![0usize; w]; // абсциссы парабол огибающей
    let mut bound = vec![0.0f64; w + 1]; // границы зон влияния
    for y in 0..h {
        let row = y * w;
        let mut k = 0usize;
        hull[0] = 0;
        bound[0] = f64::NEG_INFINITY;
        bound[1] = f64::INFINITY;
        for q in 1..w {
            let fq = col_dist[row + q] + (q * q) as f64;
            loop {
                let p = hull[k];
                let fp = col_dist[row + p] + (p * p) as f64;
                let s = (fq - fp) / (2.0 * (q as f64 - p as f64));
                if s <= bound[k] {
                    // bound[0] = -∞, поэтому k здесь всегда > 0
                    k -= 1;
                } else {
                    k += 1;
                    hull[k] = q;
                    bound[k] = s;
                    bound[k + 1] = f64::INFINITY;
                    break;
                }
            }
        }
        k = 0;
        for q in 0..w {
            while bound[k + 1] < q as f64 {
                k += 1;
            }
            let src_x = hull[k];
            out[row + q] = col_row[row + src_x] * w + src_x;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn brute_force_distance(sources: &Mask, x: usize, y: usize) -> u64 {
        let w = sources.width as usize;
        let h = sources.height as usize;
        let mut best = u64::MAX;
        for sy in 0..h {
            for sx in 0..w {
                if sources.data[sy * w + sx] {
                    let dx = (sx as i64 - x as i64).unsigned_abs();
                    let dy = (sy as i64 - y as i64).unsigned_abs();
                    best = best.min(dx * dx + dy * dy);
                }
            }
        }
        best
    }

    #[test]
    fn single_source_points_everywhere() {
        let mut mask = Mask::new(5, 4);
        mask.set(2, 1, true);
        let nearest = nearest_source_indices(&mask);
        let expected = 7usize; // линейный индекс пикселя (2, 1)
        assert!(nearest.iter().all(|&idx| idx == expected));
    }

    #[test]
    fn nearest_index_is_a_source_at_minimal_distance() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let (w, h) = (12u32, 9u32);
        let mut mask = Mask::new(w, h);
        for v in &mut mask.data {
            *v = rng.gen_bool(0.15);
        }
        if !mask.any() {
            mask.set(3, 3, true);
        }

        let nearest = nearest_source_indices(&mask);
        for y in 0..h as usize {
            for x in 0..w as usize {
                let idx = nearest[y * w as usize + x];
                assert!(mask.data[idx], "nearest index must be a source pixel");
                let (sx, sy) = (idx % w as usize, idx / w as usize);
                let dx = (sx as i64 - x as i64).unsigned_abs();
                let dy = (sy as i64 - y as i64).unsigned_abs();
                assert_eq!(
                    dx * dx + dy * dy,
                    brute_force_distance(&mask, x, y),
                    "pixel ({x}, {y}) must point at a nearest source"
                );
            }
        }
    }

    #[test]
    fn horizontal_tie_prefers_left_source() {
        let mut mask = Mask::new(7, 1);
        mask.set(1, 0, true);
        mask.set(5, 0, true);
        let nearest = nearest_source_indices(&mask);
        // пиксель x=3 равноудалён от обоих источников
        assert_eq!(nearest[3], 1);
    }
}
