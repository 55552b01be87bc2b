// src/grid.rs
//! Плоские растровые сетки с явной формой
//!
//! Все сетки хранятся одним непрерывным вектором в построчном порядке,
//! индекс пикселя вычисляется как `y * width + x`. Две специализации:
//! - `Mask` — булева сетка (маски суши, океана, границ);
//! - `IndexGrid` — знаковая сетка индексов областей, где `-1` означает
//!   «не назначено» (стена или ещё не залитый пиксель).

/// Значение «пиксель не назначен ни одной области»
pub const UNASSIGNED: i32 = -1;

/// Булева сетка размером `width × height`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    pub width: u32,
    pub height: u32,
    pub data: Vec<bool>,
}

impl Mask {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![false; (width * height) as usize],
        }
    }

    #[must_use]
    pub fn filled(width: u32, height: u32, value: bool) -> Self {
        Self {
            width,
            height,
            data: vec![value; (width * height) as usize],
        }
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.data[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        self.data[(y * self.width + x) as usize] = value;
    }

    /// Есть ли хотя бы один истинный пиксель
    #[must_use]
    pub fn any(&self) -> bool {
        self.data.iter().any(|&v| v)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// `self ∧ ¬other` — маска заливки при вычитании стен
    #[must_use]
    pub fn minus(&self, other: &Mask) -> Mask {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        Mask {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| a && !b)
                .collect(),
        }
    }

    /// `self ∨ other` — объединение масок стен
    #[must_use]
    pub fn union(&self, other: &Mask) -> Mask {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        Mask {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| a || b)
                .collect(),
        }
    }

    #[must_use]
    pub fn inverted(&self) -> Mask {
        Mask {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| !v).collect(),
        }
    }
}

/// Сетка индексов областей размером `width × height`
///
/// Значение `>= 0` — индекс области в списке метаданных, `-1` — пиксель
/// пока никому не принадлежит. После завершения конвейера `-1` не остаётся.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGrid {
    pub width: u32,
    pub height: u32,
    pub data: Vec<i32>,
}

impl IndexGrid {
    #[must_use]
    pub fn unassigned(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![UNASSIGNED; (width * height) as usize],
        }
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> i32 {
        self.data[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: i32) {
        self.data[(y * self.width + x) as usize] = value;
    }

    /// Маска пикселей, уже отнесённых к какой-либо области
    #[must_use]
    pub fn assigned_mask(&self) -> Mask {
        Mask {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| v >= 0).collect(),
        }
    }

    /// Не осталось ли неназначенных пикселей
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.data.iter().all(|&v| v >= 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_set_operations() {
        let mut a = Mask::new(3, 2);
        let mut b = Mask::new(3, 2);
        a.set(0, 0, true);
        a.set(1, 0, true);
        b.set(1, 0, true);
        b.set(2, 1, true);

        assert_eq!(a.minus(&b).count(), 1);
        assert_eq!(a.union(&b).count(), 3);
        assert_eq!(a.inverted().count(), 4);
        assert!(a.any());
        assert!(!Mask::new(3, 2).any());
    }

    #[test]
    fn index_grid_completeness() {
        let mut grid = IndexGrid::unassigned(2, 2);
        assert!(!grid.is_complete());
        for y in 0..2 {
            for x in 0..2 {
                grid.set(x, y, 0);
            }
        }
        assert!(grid.is_complete());
        assert_eq!(grid.assigned_mask().count(), 4);
    }
}
