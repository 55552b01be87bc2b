// src/heightmap.rs
//! Карта высот из входного растра
//!
//! Карта представляет собой плоский вектор значений яркости 0..255,
//! приведённых к `f32`. Многоканальные изображения сводятся к яркости.
//! Для расчёта стока применяется гауссово размытие: сглаженные градиенты
//! дают более длинные и естественные русла.

use image::{DynamicImage, ImageBuffer, Luma};
use imageproc::filter::gaussian_blur_f32;

/// Двумерная карта высот
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    /// Ширина карты в пикселях
    pub width: u32,
    /// Высота карты в пикселях
    pub height: u32,
    /// Значения высот 0.0..255.0, вектор размером `width × height`
    ///
    /// Индекс пикселя вычисляется как `y * width + x`.
    pub data: Vec<f32>,
}

impl Heightmap {
    /// Строит карту высот из любого изображения, сводя каналы к яркости
    #[must_use]
    pub fn from_image(image: &DynamicImage) -> Self {
        let gray = image.to_luma8();
        Self {
            width: gray.width(),
            height: gray.height(),
            data: gray.pixels().map(|p| f32::from(p.0[0])).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[(y * self.width + x) as usize]
    }

    /// Возвращает сглаженную копию карты (гауссово размытие)
    #[must_use]
    pub fn blurred(&self, sigma: f32) -> Self {
        let buffer: ImageBuffer<Luma<f32>, Vec<f32>> =
            ImageBuffer::from_raw(self.width, self.height, self.data.clone())
                .expect("data length matches dimensions");
        let blurred = gaussian_blur_f32(&buffer, sigma);
        Self {
            width: self.width,
            height: self.height,
            data: blurred.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    #[test]
    fn luminance_is_taken_as_height() {
        let mut img = GrayImage::new(4, 2);
        img.put_pixel(3, 1, Luma([200]));
        let hm = Heightmap::from_image(&DynamicImage::ImageLuma8(img));
        assert_eq!(hm.get(0, 0), 0.0);
        assert_eq!(hm.get(3, 1), 200.0);
    }

    #[test]
    fn blur_preserves_a_constant_field() {
        let img = GrayImage::from_pixel(8, 8, Luma([90]));
        let hm = Heightmap::from_image(&DynamicImage::ImageLuma8(img));
        let blurred = hm.blurred(3.0);
        for &v in &blurred.data {
            assert!((v - 90.0).abs() < 0.5, "blur must not shift a flat field");
        }
    }
}
