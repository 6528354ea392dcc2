use serde::{Deserialize, Serialize};

/// Хранимая категория места. "Выбрано" сюда не попадает никогда,
/// это производное состояние, см. [`SeatDisplay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatCategory {
    Available,
    Booked,
    LadiesOnly,
}

impl SeatCategory {
    /// Женские места тоже можно выбрать, отличается только отображение.
    pub fn is_selectable(self) -> bool {
        !matches!(self, SeatCategory::Booked)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: u32,
    pub row: u32,
    pub column: u32,
    pub category: SeatCategory,
}

impl Seat {
    pub fn label(&self) -> String {
        seat_label(self.id)
    }

    /// Проекция для отображения с учетом текущего выбора.
    pub fn view(&self, selected: bool) -> SeatView {
        let display = match (self.category, selected) {
            (SeatCategory::Booked, _) => SeatDisplay::Booked,
            (_, true) => SeatDisplay::Selected,
            (SeatCategory::LadiesOnly, false) => SeatDisplay::LadiesOnly,
            (SeatCategory::Available, false) => SeatDisplay::Available,
        };

        let tooltip_state = match self.category {
            SeatCategory::LadiesOnly => "Ladies Seat",
            SeatCategory::Booked => "Booked",
            SeatCategory::Available => "Available",
        };

        SeatView {
            id: self.id,
            row: self.row,
            column: self.column,
            display,
            label: self.label(),
            tooltip: format!("Seat {} - {}", self.id, tooltip_state),
            selectable: self.category.is_selectable(),
        }
    }
}

pub fn seat_label(id: u32) -> String {
    format!("Seat {}", id)
}

/// Состояние места для отрисовки: категория, перекрытая выбором сессии.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatDisplay {
    Available,
    Selected,
    Booked,
    LadiesOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub id: u32,
    pub row: u32,
    pub column: u32,
    pub display: SeatDisplay,
    pub label: String,
    pub tooltip: String,
    pub selectable: bool,
}
