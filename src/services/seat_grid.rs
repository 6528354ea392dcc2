//! Генерация схемы мест автобуса.
//!
//! Генератор сам по себе чистый: форму схемы (ряды × колонки) он
//! превращает в места, а категорию каждого места спрашивает у
//! [`SeatInventoryProvider`]. Случайная занятость живет в
//! [`RandomInventory`], детерминированные фикстуры в [`FixedInventory`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

use crate::error::{BookingError, BookingResult};
use crate::models::{Seat, SeatCategory};

pub const DEFAULT_BOOKED_PROBABILITY: f64 = 0.3;
pub const DEFAULT_LADIES_PROBABILITY: f64 = 0.2;

/// Источник текущей занятости мест.
pub trait SeatInventoryProvider {
    fn category_of(&mut self, seat_id: u32) -> SeatCategory;
}

/// Случайная занятость: сначала "занято" с вероятностью `p_booked`,
/// затем среди оставшихся "женское" с вероятностью `p_ladies`.
#[derive(Debug, Clone)]
pub struct RandomInventory {
    rng: ChaCha8Rng,
    p_booked: f64,
    p_ladies: f64,
}

impl RandomInventory {
    pub fn new(p_booked: f64, p_ladies: f64) -> BookingResult<Self> {
        Self::with_rng(ChaCha8Rng::from_entropy(), p_booked, p_ladies)
    }

    pub fn seeded(seed: u64, p_booked: f64, p_ladies: f64) -> BookingResult<Self> {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed), p_booked, p_ladies)
    }

    fn with_rng(rng: ChaCha8Rng, p_booked: f64, p_ladies: f64) -> BookingResult<Self> {
        check_probability("p_booked", p_booked)?;
        check_probability("p_ladies", p_ladies)?;
        Ok(Self { rng, p_booked, p_ladies })
    }
}

impl Default for RandomInventory {
    fn default() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            p_booked: DEFAULT_BOOKED_PROBABILITY,
            p_ladies: DEFAULT_LADIES_PROBABILITY,
        }
    }
}

impl SeatInventoryProvider for RandomInventory {
    fn category_of(&mut self, _seat_id: u32) -> SeatCategory {
        // порядок проверок важен: "занято" имеет приоритет
        if self.rng.gen_bool(self.p_booked) {
            SeatCategory::Booked
        } else if self.rng.gen_bool(self.p_ladies) {
            SeatCategory::LadiesOnly
        } else {
            SeatCategory::Available
        }
    }
}

fn check_probability(name: &str, p: f64) -> BookingResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(BookingError::InvalidArgument(format!(
            "{} must be within [0, 1], got {}",
            name, p
        )))
    }
}

/// Заранее заданные категории; все неуказанные места свободны.
#[derive(Debug, Clone, Default)]
pub struct FixedInventory {
    categories: HashMap<u32, SeatCategory>,
}

impl FixedInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, seat_id: u32, category: SeatCategory) -> Self {
        self.categories.insert(seat_id, category);
        self
    }

    pub fn booked(self, seat_ids: &[u32]) -> Self {
        seat_ids
            .iter()
            .fold(self, |inv, id| inv.with(*id, SeatCategory::Booked))
    }
}

impl SeatInventoryProvider for FixedInventory {
    fn category_of(&mut self, seat_id: u32) -> SeatCategory {
        self.categories
            .get(&seat_id)
            .copied()
            .unwrap_or(SeatCategory::Available)
    }
}

/// Схема мест: прямоугольная сетка, id от 1 по строкам.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatLayout {
    rows: u32,
    columns: u32,
    seats: Vec<Seat>,
}

impl SeatLayout {
    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    // id плотные и начинаются с 1, поэтому индекс вычисляется напрямую
    pub fn get(&self, seat_id: u32) -> Option<&Seat> {
        let index = usize::try_from(seat_id.checked_sub(1)?).ok()?;
        self.seats.get(index)
    }
}

pub fn generate(
    rows: u32,
    columns: u32,
    inventory: &mut dyn SeatInventoryProvider,
) -> BookingResult<SeatLayout> {
    if rows == 0 || columns == 0 {
        return Err(BookingError::InvalidArgument(format!(
            "seat layout must be at least 1x1, got {}x{}",
            rows, columns
        )));
    }
    let total = rows.checked_mul(columns).ok_or_else(|| {
        BookingError::InvalidArgument(format!("seat layout {}x{} is too large", rows, columns))
    })?;

    let mut seats = Vec::with_capacity(total as usize);
    let mut id = 1;
    for row in 1..=rows {
        for column in 1..=columns {
            seats.push(Seat {
                id,
                row,
                column,
                category: inventory.category_of(id),
            });
            id += 1;
        }
    }

    Ok(SeatLayout { rows, columns, seats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn layout_is_row_major_with_dense_ids() {
        let layout = generate(4, 4, &mut FixedInventory::new()).unwrap();
        assert_eq!(layout.len(), 16);

        let first = &layout.seats()[0];
        assert_eq!((first.id, first.row, first.column), (1, 1, 1));
        let second = &layout.seats()[1];
        assert_eq!((second.id, second.row, second.column), (2, 1, 2));
        let fifth = &layout.seats()[4];
        assert_eq!((fifth.id, fifth.row, fifth.column), (5, 2, 1));
        let last = &layout.seats()[15];
        assert_eq!((last.id, last.row, last.column), (16, 4, 4));
    }

    #[test]
    fn zero_sized_layout_is_rejected() {
        let err = generate(0, 4, &mut FixedInventory::new()).unwrap_err();
        assert!(matches!(err, BookingError::InvalidArgument(_)));
        assert!(generate(4, 0, &mut FixedInventory::new()).is_err());
    }

    #[test]
    fn fixed_inventory_assigns_categories() {
        let mut inventory = FixedInventory::new()
            .booked(&[1, 4])
            .with(6, SeatCategory::LadiesOnly);
        let layout = generate(2, 4, &mut inventory).unwrap();

        assert_eq!(layout.get(1).unwrap().category, SeatCategory::Booked);
        assert_eq!(layout.get(4).unwrap().category, SeatCategory::Booked);
        assert_eq!(layout.get(6).unwrap().category, SeatCategory::LadiesOnly);
        assert_eq!(layout.get(2).unwrap().category, SeatCategory::Available);
        assert!(layout.get(0).is_none());
        assert!(layout.get(9).is_none());
    }

    #[test]
    fn seeded_inventory_is_reproducible() {
        let a = generate(4, 4, &mut RandomInventory::seeded(7, 0.3, 0.2).unwrap()).unwrap();
        let b = generate(4, 4, &mut RandomInventory::seeded(7, 0.3, 0.2).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn probabilities_out_of_range_are_rejected() {
        assert!(RandomInventory::new(1.5, 0.2).is_err());
        assert!(RandomInventory::new(0.3, -0.1).is_err());
        assert!(RandomInventory::seeded(1, f64::NAN, 0.2).is_err());
    }

    #[test]
    fn extreme_probabilities() {
        let all_booked = generate(3, 3, &mut RandomInventory::new(1.0, 1.0).unwrap()).unwrap();
        assert!(all_booked.seats().iter().all(|s| s.category == SeatCategory::Booked));

        let all_ladies = generate(3, 3, &mut RandomInventory::new(0.0, 1.0).unwrap()).unwrap();
        assert!(all_ladies.seats().iter().all(|s| s.category == SeatCategory::LadiesOnly));
    }

    #[test]
    fn category_distribution_matches_weights() {
        let mut inventory = RandomInventory::seeded(2024, 0.3, 0.2).unwrap();
        let layout = generate(1_000, 100, &mut inventory).unwrap();
        let total = layout.len() as f64;

        let booked = layout
            .seats()
            .iter()
            .filter(|s| s.category == SeatCategory::Booked)
            .count() as f64;
        let ladies = layout
            .seats()
            .iter()
            .filter(|s| s.category == SeatCategory::LadiesOnly)
            .count() as f64;

        assert!((booked / total - 0.30).abs() < 0.01, "booked share {}", booked / total);
        assert!((ladies / total - 0.14).abs() < 0.01, "ladies share {}", ladies / total);
        assert!((ladies / (total - booked) - 0.20).abs() < 0.01);
    }

    proptest! {
        #[test]
        fn generates_rows_times_columns_unique_ids(rows in 1u32..40, columns in 1u32..40) {
            let layout = generate(rows, columns, &mut RandomInventory::default()).unwrap();
            prop_assert_eq!(layout.len(), (rows * columns) as usize);
            for (index, seat) in layout.seats().iter().enumerate() {
                prop_assert_eq!(seat.id as usize, index + 1);
                prop_assert!(seat.row >= 1 && seat.row <= rows);
                prop_assert!(seat.column >= 1 && seat.column <= columns);
            }
        }
    }
}
