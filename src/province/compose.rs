// src/province/compose.rs
//! Сборка единой сетки индексов из разбиений суши и океана
//!
//! Каждое разбиение вносит свои пиксели только в пределах собственной
//! маски, оставшиеся дыры (например, стены, не доставшиеся ни одной
//! стороне) закрываются ближайшей назначенной областью.

use crate::edt::nearest_source_indices;
use crate::grid::{IndexGrid, Mask, UNASSIGNED};

/// Объединяет сетки суши и океана в одну
#[must_use]
pub fn compose(
    land_grid: &IndexGrid,
    sea_grid: &IndexGrid,
    land_mask: &Mask,
    sea_mask: &Mask,
) -> IndexGrid {
    let mut combined = IndexGrid::unassigned(land_grid.width, land_grid.height);

    for idx in 0..combined.data.len() {
        if land_grid.data[idx] >= 0 && land_mask.data[idx] {
            combined.data[idx] = land_grid.data[idx];
        }
    }
    for idx in 0..combined.data.len() {
        if sea_grid.data[idx] >= 0 && sea_mask.data[idx] {
            combined.data[idx] = sea_grid.data[idx];
        }
    }

    let valid = combined.assigned_mask();
    if valid.any() {
        let missing = combined.data.len() - valid.count();
        if missing > 0 {
            println!("🔍 Заполнение {missing} непокрытых пикселей...");
            let nearest = nearest_source_indices(&valid);
            for idx in 0..combined.data.len() {
                if combined.data[idx] == UNASSIGNED {
                    combined.data[idx] = combined.data[nearest[idx]];
                }
            }
        }
    }

    combined
}
