// src/mask.rs
//! Маски карты из входных растров
//!
//! Из растров строятся три булевы сетки одинакового размера: стены
//! (маска границ), океан (пиксели опорного цвета) и суша (всё остальное).
//! Из них для каждого типа поверхности выводятся маска заливки (где тип
//! может расти) и маска стен (противоположный тип плюс границы).

use image::DynamicImage;

use crate::config::{BoundaryColor, ToolParams};
use crate::error::MapToolError;
use crate::grid::Mask;
use crate::province::RegionKind;

#[derive(Debug, Clone)]
pub struct MapMasks {
    pub width: u32,
    pub height: u32,
    /// Нарисованные пользователем стены; `None`, если маска границ не задана
    pub boundary: Option<Mask>,
    pub sea: Mask,
    pub land: Mask,
    /// Был ли предоставлен растр океана (без него океан не разбивается)
    pub has_ocean: bool,
}

impl MapMasks {
    /// Строит маски из имеющихся растров
    ///
    /// Достаточно любого из двух изображений; по нему определяется размер
    /// карты. Присутствуют оба — размеры обязаны совпадать.
    pub fn build(
        boundary_image: Option<&DynamicImage>,
        ocean_image: Option<&DynamicImage>,
        params: &ToolParams,
    ) -> Result<Self, MapToolError> {
        let boundary = boundary_image.map(|img| boundary_mask(img, params.boundary_color));
        let sea_from_image = ocean_image.map(|img| sea_mask(img, params.ocean_color));

        let (width, height) = match (&boundary, &sea_from_image) {
            (Some(b), Some(s)) => {
                if (b.width, b.height) != (s.width, s.height) {
                    return Err(MapToolError::DimensionMismatch {
                        expected_w: b.width,
                        expected_h: b.height,
                        got_w: s.width,
                        got_h: s.height,
                    });
                }
                (b.width, b.height)
            }
            (Some(b), None) => (b.width, b.height),
            (None, Some(s)) => (s.width, s.height),
            (None, None) => return Err(MapToolError::InputMissing),
        };

        let has_ocean = sea_from_image.is_some();
        // без растра океана вся карта — суша
        let sea = sea_from_image.unwrap_or_else(|| Mask::new(width, height));
        let land = sea.inverted();

        Ok(Self {
            width,
            height,
            boundary,
            sea,
            land,
            has_ocean,
        })
    }

    /// Маска заливки и маска стен для данного типа поверхности
    ///
    /// Заливка и стены не пересекаются: стены вычтены из заливки.
    #[must_use]
    pub fn fill_and_border(&self, kind: RegionKind) -> (Mask, Mask) {
        let (own, other) = match kind {
            RegionKind::Land => (&self.land, &self.sea),
            RegionKind::Ocean => (&self.sea, &self.land),
        };
        match &self.boundary {
            Some(walls) => (own.minus(walls), walls.union(other)),
            None => (own.clone(), other.clone()),
        }
    }
}

fn boundary_mask(image: &DynamicImage, color: BoundaryColor) -> Mask {
    match color {
        BoundaryColor::Rgb(rgb) => {
            let buffer = image.to_rgb8();
            Mask {
                width: buffer.width(),
                height: buffer.height(),
                data: buffer.pixels().map(|p| p.0 == rgb).collect(),
            }
        }
        BoundaryColor::Gray(value) => {
            let buffer = image.to_luma8();
            Mask {
                width: buffer.width(),
                height: buffer.height(),
                data: buffer.pixels().map(|p| p.0[0] == value).collect(),
            }
        }
    }
}

fn sea_mask(image: &DynamicImage, color: [u8; 3]) -> Mask {
    let buffer = image.to_rgb8();
    Mask {
        width: buffer.width(),
        height: buffer.height(),
        data: buffer.pixels().map(|p| p.0 == color).collect(),
    }
}
