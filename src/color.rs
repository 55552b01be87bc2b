// src/color.rs
//! Детерминированное выделение уникальных цветов областей
//!
//! Цвет области — чистая функция её индекса и типа поверхности плюс
//! множество уже занятых цветов. Генератор случайных чисел сеется числом
//! `индекс + 1`, поэтому перезапуск с теми же входами даёт те же цвета.
//! Океанские области рисуются в синей гамме, чтобы читались на карте.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

use crate::error::MapToolError;
use crate::province::RegionKind;

pub type Color = [u8; 3];

// Палитра заведомо больше числа областей; лимит страхует от вырождения
const MAX_ATTEMPTS: usize = 4096;

/// Выделитель цветов с множеством занятых значений
///
/// Живёт ровно одну генерацию: оркестратор создаёт новый экземпляр на
/// каждый запуск конвейера, глобального состояния нет.
#[derive(Debug, Default)]
pub struct ColorAllocator {
    used: HashSet<Color>,
}

impl ColorAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Выделяет области с данным индексом уникальный цвет
    pub fn alloc(&mut self, index: usize, kind: RegionKind) -> Result<Color, MapToolError> {
        let mut rng = ChaCha8Rng::seed_from_u64(index as u64 + 1);
        for _ in 0..MAX_ATTEMPTS {
            let color: Color = match kind {
                RegionKind::Ocean => [
                    rng.gen_range(0..60),
                    rng.gen_range(0..80),
                    rng.gen_range(100..180),
                ],
                RegionKind::Land => [
                    rng.gen_range(0..=255),
                    rng.gen_range(0..=255),
                    rng.gen_range(0..=255),
                ],
            };
            if self.used.insert(color) {
                return Ok(color);
            }
        }
        Err(MapToolError::ColorExhausted)
    }

    #[must_use]
    pub fn used_count(&self) -> usize {
        self.used.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_index_yields_same_color() {
        let mut a = ColorAllocator::new();
        let mut b = ColorAllocator::new();
        let ca = a.alloc(17, RegionKind::Land).unwrap();
        let cb = b.alloc(17, RegionKind::Land).unwrap();
        assert_eq!(ca, cb);
    }

    #[test]
    fn ocean_colors_stay_in_the_blue_band() {
        let mut allocator = ColorAllocator::new();
        for index in 0..200 {
            let [r, g, b] = allocator.alloc(index, RegionKind::Ocean).unwrap();
            assert!(r < 60);
            assert!(g < 80);
            assert!((100..180).contains(&b));
        }
    }

    #[test]
    fn colors_are_unique_across_kinds() {
        let mut allocator = ColorAllocator::new();
        let mut seen = HashSet::new();
        for index in 0..300 {
            let kind = if index % 3 == 0 {
                RegionKind::Ocean
            } else {
                RegionKind::Land
            };
            let color = allocator.alloc(index, kind).unwrap();
            assert!(seen.insert(color), "color {color:?} issued twice");
        }
        assert_eq!(allocator.used_count(), 300);
    }
}
