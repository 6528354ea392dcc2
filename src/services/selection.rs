use std::collections::HashSet;

use crate::error::{BookingError, BookingResult};
use crate::services::seat_grid::SeatLayout;

/// Места, выбранные текущей сессией. Множество без порядка.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    seats: HashSet<u32>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Переключает место. Занятые места молча игнорируются, неизвестный
    /// id отклоняется. Возвращает, выбрано ли место после вызова.
    pub fn toggle(&mut self, layout: &SeatLayout, seat_id: u32) -> BookingResult<bool> {
        let seat = layout.get(seat_id).ok_or_else(|| {
            BookingError::InvalidArgument(format!("seat {} is not part of this bus", seat_id))
        })?;

        if !seat.category.is_selectable() {
            tracing::debug!("Ignoring toggle of booked seat {}", seat_id);
            return Ok(false);
        }

        if self.seats.remove(&seat_id) {
            Ok(false)
        } else {
            self.seats.insert(seat_id);
            Ok(true)
        }
    }

    pub fn is_selected(&self, seat_id: u32) -> bool {
        self.seats.contains(&seat_id)
    }

    pub fn selected_ids(&self) -> &HashSet<u32> {
        &self.seats
    }

    /// Отсортированные id для стабильного отображения.
    pub fn sorted_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.seats.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn count(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}
