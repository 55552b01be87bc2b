// src/ids.rs
//! Серия внешних идентификаторов областей
//!
//! Идентификатор — строка вида `префикс + число с ведущими нулями`.
//! Ширина числа определяется верхней границей серии, номера выдаются
//! монотонно. Исчерпанная серия возвращает `None`, и вызывающая сторона
//! пропускает область, не прерывая конвейер.

#[derive(Debug, Clone)]
pub struct IdSeries {
    prefix: String,
    end: u64,
    width: usize,
    next: u64,
}

impl IdSeries {
    #[must_use]
    pub fn new(prefix: &str, start: u64, end: u64) -> Self {
        Self {
            prefix: prefix.to_string(),
            end,
            width: end.to_string().len(),
            next: start,
        }
    }

    /// Следующий свободный идентификатор, либо `None`, если серия исчерпана
    pub fn next_id(&mut self) -> Option<String> {
        if self.next > self.end {
            println!("⚠️  Серия идентификаторов '{}' исчерпана", self.prefix);
            return None;
        }
        let id = format!("{}{:0width$}", self.prefix, self.next, width = self.width);
        self.next += 1;
        Some(id)
    }

    /// Сколько идентификаторов ещё доступно
    #[must_use]
    pub fn remaining(&self) -> u64 {
        if self.next > self.end {
            0
        } else {
            self.end - self.next + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pads_to_the_width_of_the_upper_bound() {
        let mut series = IdSeries::new("prv-", 1, 9999);
        assert_eq!(series.next_id().as_deref(), Some("prv-0001"));
        assert_eq!(series.next_id().as_deref(), Some("prv-0002"));
    }

    #[test]
    fn exhausted_series_yields_none() {
        let mut series = IdSeries::new("ter-", 998, 999);
        assert_eq!(series.next_id().as_deref(), Some("ter-998"));
        assert_eq!(series.next_id().as_deref(), Some("ter-999"));
        assert_eq!(series.next_id(), None);
        assert_eq!(series.remaining(), 0);
    }
}
