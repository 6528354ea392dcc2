//! Состояние экрана выбора мест для одного посетителя.
//!
//! `Loading -> Ready | Error`, `Ready` переключает места, `Ready -> Submitting`
//! только при непустом выборе. Каждая загрузка рейса получает номер
//! поколения; результат устаревшей загрузки отбрасывается.

use chrono::NaiveDate;
use serde::Serialize;
use tokio::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};
use crate::models::{BookingSummary, Money, Schedule, SeatView};
use crate::services::{fare, seat_grid::SeatLayout, selection::Selection, summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    Loading,
    Ready,
    Error,
    Submitting,
}

impl SessionPhase {
    /// Состояние для сообщения "Seat selection session is ...".
    pub fn describe(&self) -> &'static str {
        match self {
            SessionPhase::Loading => "loading",
            SessionPhase::Ready => "ready",
            SessionPhase::Error => "in error",
            SessionPhase::Submitting => "already submitted",
        }
    }
}

/// Квитанция на загрузку рейса. Применяется только если поколение
/// сессии не изменилось с момента выдачи.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    schedule_id: String,
}

impl LoadTicket {
    pub fn schedule_id(&self) -> &str {
        &self.schedule_id
    }
}

#[derive(Debug, Clone)]
struct Board {
    schedule: Schedule,
    layout: SeatLayout,
    selection: Selection,
}

#[derive(Debug, Clone)]
enum State {
    Loading { schedule_id: String },
    Ready { board: Board, notice: Option<String> },
    Error { schedule_id: String, error: BookingError },
    Submitting { board: Board, summary: BookingSummary },
}

#[derive(Debug, Clone)]
pub struct SeatSession {
    id: Uuid,
    generation: u64,
    state: State,
    last_active: Instant,
}

/// То, что видит экран: рейс, места с наложенным выбором, итог.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub state: SessionPhase,
    pub schedule_id: String,
    pub schedule: Option<Schedule>,
    pub rows: u32,
    pub columns: u32,
    pub seats: Vec<SeatView>,
    pub selected: Vec<u32>,
    pub selected_count: usize,
    pub total: Money,
    pub notice: Option<String>,
    pub error: Option<String>,
    pub summary: Option<BookingSummary>,
}

impl SeatSession {
    pub fn open(id: Uuid, schedule_id: &str) -> (Self, LoadTicket) {
        let mut session = Self {
            id,
            generation: 0,
            state: State::Loading { schedule_id: schedule_id.to_string() },
            last_active: Instant::now(),
        };
        let ticket = session.issue_ticket(schedule_id);
        (session, ticket)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> SessionPhase {
        match self.state {
            State::Loading { .. } => SessionPhase::Loading,
            State::Ready { .. } => SessionPhase::Ready,
            State::Error { .. } => SessionPhase::Error,
            State::Submitting { .. } => SessionPhase::Submitting,
        }
    }

    pub fn error(&self) -> Option<&BookingError> {
        match &self.state {
            State::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&BookingSummary> {
        match &self.state {
            State::Submitting { summary, .. } => Some(summary),
            _ => None,
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }

    fn issue_ticket(&mut self, schedule_id: &str) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
            schedule_id: schedule_id.to_string(),
        }
    }

    /// Начинает (пере)загрузку рейса. Выбор и схема сбрасываются,
    /// все ранее выданные квитанции становятся устаревшими.
    pub fn begin_load(&mut self, schedule_id: &str) -> BookingResult<LoadTicket> {
        if self.phase() == SessionPhase::Submitting {
            return Err(BookingError::SessionNotReady(SessionPhase::Submitting.describe()));
        }
        self.state = State::Loading { schedule_id: schedule_id.to_string() };
        self.touch();
        Ok(self.issue_ticket(schedule_id))
    }

    /// Применяет результат поиска рейса. Схема мест строится только для
    /// найденного рейса. `Ok(false)` означает, что квитанция устарела.
    pub fn complete_load<F>(
        &mut self,
        ticket: LoadTicket,
        found: Option<Schedule>,
        build_layout: F,
    ) -> BookingResult<bool>
    where
        F: FnOnce() -> BookingResult<SeatLayout>,
    {
        if ticket.generation != self.generation || self.phase() != SessionPhase::Loading {
            debug!(
                "Session {}: discarding stale load of schedule {} (generation {} != {})",
                self.id, ticket.schedule_id, ticket.generation, self.generation
            );
            return Ok(false);
        }

        let schedule = match found {
            Some(schedule) => schedule,
            None => {
                warn!("Session {}: schedule {} not found", self.id, ticket.schedule_id);
                self.state = State::Error {
                    error: BookingError::ScheduleNotFound(ticket.schedule_id.clone()),
                    schedule_id: ticket.schedule_id,
                };
                return Ok(true);
            }
        };

        match build_layout() {
            Ok(layout) => {
                info!(
                    "Session {}: schedule {} ready with {} seats",
                    self.id,
                    schedule.id,
                    layout.len()
                );
                self.state = State::Ready {
                    board: Board { schedule, layout, selection: Selection::new() },
                    notice: None,
                };
                Ok(true)
            }
            Err(e) => {
                tracing::error!("Session {}: failed to build seat layout: {}", self.id, e);
                self.state = State::Error {
                    schedule_id: ticket.schedule_id,
                    error: e.clone(),
                };
                Err(e)
            }
        }
    }

    fn ready_board(&mut self) -> BookingResult<(&mut Board, &mut Option<String>)> {
        let phase = self.phase();
        match &mut self.state {
            State::Ready { board, notice } => Ok((board, notice)),
            _ => Err(BookingError::SessionNotReady(phase.describe())),
        }
    }

    pub fn toggle(&mut self, seat_id: u32) -> BookingResult<bool> {
        self.touch();
        let (board, notice) = self.ready_board()?;
        let selected = board.selection.toggle(&board.layout, seat_id)?;
        *notice = None;
        Ok(selected)
    }

    /// Переход к оплате. При пустом выборе сессия остается в `Ready`
    /// с сообщением для пользователя.
    pub fn proceed(&mut self, booking_date: NaiveDate) -> BookingResult<BookingSummary> {
        self.touch();
        let id = self.id;
        let (board, notice) = self.ready_board()?;

        let built = match summary::build_on(&board.schedule, &board.selection, booking_date) {
            Ok(built) => built,
            Err(e) => {
                if e == BookingError::NoSeatsSelected {
                    *notice = Some(e.to_string());
                }
                return Err(e);
            }
        };

        let board = board.clone();
        info!(
            "Session {}: proceeding to payment with {} seats, total {}",
            id,
            built.seats.len(),
            built.total
        );
        self.state = State::Submitting { board, summary: built.clone() };
        Ok(built)
    }

    pub fn view(&self) -> BookingResult<SessionView> {
        let mut view = SessionView {
            id: self.id,
            state: self.phase(),
            schedule_id: String::new(),
            schedule: None,
            rows: 0,
            columns: 0,
            seats: Vec::new(),
            selected: Vec::new(),
            selected_count: 0,
            total: Money::ZERO,
            notice: None,
            error: None,
            summary: None,
        };

        let board = match &self.state {
            State::Loading { schedule_id } => {
                view.schedule_id = schedule_id.clone();
                None
            }
            State::Error { schedule_id, error } => {
                view.schedule_id = schedule_id.clone();
                view.error = Some(error.to_string());
                None
            }
            State::Ready { board, notice } => {
                view.notice = notice.clone();
                Some(board)
            }
            State::Submitting { board, summary } => {
                view.summary = Some(summary.clone());
                Some(board)
            }
        };

        if let Some(board) = board {
            view.schedule_id = board.schedule.id.clone();
            view.schedule = Some(board.schedule.clone());
            view.rows = board.layout.rows();
            view.columns = board.layout.columns();
            view.seats = board
                .layout
                .seats()
                .iter()
                .map(|seat| seat.view(board.selection.is_selected(seat.id)))
                .collect();
            view.selected = board.selection.sorted_ids();
            view.selected_count = board.selection.count();
            view.total = fare::total(board.selection.count(), board.schedule.price)?;
        }

        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::sample_schedules;
    use crate::models::{SeatCategory, SeatDisplay};
    use crate::services::seat_grid::{generate, FixedInventory};

    fn schedule(id: &str) -> Schedule {
        sample_schedules().into_iter().find(|s| s.id == id).unwrap()
    }

    fn layout() -> BookingResult<SeatLayout> {
        generate(4, 4, &mut FixedInventory::new().booked(&[3]).with(4, SeatCategory::LadiesOnly))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn ready_session() -> SeatSession {
        let (mut session, ticket) = SeatSession::open(Uuid::new_v4(), "1");
        assert!(session.complete_load(ticket, Some(schedule("1")), layout).unwrap());
        session
    }

    #[test]
    fn found_schedule_becomes_ready() {
        let session = ready_session();
        assert_eq!(session.phase(), SessionPhase::Ready);

        let view = session.view().unwrap();
        assert_eq!(view.seats.len(), 16);
        assert_eq!(view.rows, 4);
        assert_eq!(view.total, Money::ZERO);
        assert_eq!(view.seats[2].display, SeatDisplay::Booked);
        assert_eq!(view.seats[3].display, SeatDisplay::LadiesOnly);
    }

    #[test]
    fn missing_schedule_is_an_error_without_grid() {
        let (mut session, ticket) = SeatSession::open(Uuid::new_v4(), "999");
        let applied = session
            .complete_load(ticket, None, || panic!("layout must not be generated"))
            .unwrap();
        assert!(applied);
        assert_eq!(session.phase(), SessionPhase::Error);
        assert_eq!(
            session.error(),
            Some(&BookingError::ScheduleNotFound("999".to_string()))
        );

        let view = session.view().unwrap();
        assert!(view.seats.is_empty());
        assert!(view.schedule.is_none());
        assert_eq!(view.schedule_id, "999");
    }

    #[test]
    fn stale_load_is_discarded() {
        let (mut session, first) = SeatSession::open(Uuid::new_v4(), "1");
        let second = session.begin_load("2").unwrap();

        // первый ответ пришел после того, как пользователь ушел на другой рейс
        assert!(!session.complete_load(first, Some(schedule("1")), layout).unwrap());
        assert_eq!(session.phase(), SessionPhase::Loading);

        assert!(session.complete_load(second, Some(schedule("2")), layout).unwrap());
        assert_eq!(session.view().unwrap().schedule_id, "2");
    }

    #[test]
    fn toggles_update_total() {
        let mut session = ready_session();
        assert!(session.toggle(2).unwrap());
        assert!(session.toggle(5).unwrap());
        assert!(!session.toggle(3).unwrap());

        let view = session.view().unwrap();
        assert_eq!(view.selected, vec![2, 5]);
        assert_eq!(view.total, Money::from_rupees(900));
        assert_eq!(view.seats[1].display, SeatDisplay::Selected);
    }

    #[test]
    fn toggle_while_loading_is_rejected() {
        let (mut session, _ticket) = SeatSession::open(Uuid::new_v4(), "1");
        assert_eq!(
            session.toggle(1),
            Err(BookingError::SessionNotReady("loading"))
        );
    }

    #[test]
    fn proceed_without_seats_keeps_ready_with_notice() {
        let mut session = ready_session();
        assert_eq!(session.proceed(today()), Err(BookingError::NoSeatsSelected));
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(session.view().unwrap().notice.is_some());

        // следующее действие убирает сообщение
        session.toggle(1).unwrap();
        assert!(session.view().unwrap().notice.is_none());
    }

    #[test]
    fn proceed_moves_to_submitting() {
        let mut session = ready_session();
        session.toggle(5).unwrap();
        session.toggle(2).unwrap();

        let summary = session.proceed(today()).unwrap();
        assert_eq!(summary.seats, vec!["Seat 2", "Seat 5"]);
        assert_eq!(summary.total, Money::from_rupees(900));
        assert_eq!(session.phase(), SessionPhase::Submitting);
        assert_eq!(session.summary(), Some(&summary));

        // Submitting терминально для экрана
        assert!(session.toggle(1).is_err());
        assert!(session.proceed(today()).is_err());
        assert!(session.begin_load("2").is_err());
    }

    #[test]
    fn reload_resets_selection() {
        let mut session = ready_session();
        session.toggle(1).unwrap();

        let ticket = session.begin_load("8").unwrap();
        assert!(session.complete_load(ticket, Some(schedule("8")), layout).unwrap());

        let view = session.view().unwrap();
        assert!(view.selected.is_empty());
        assert_eq!(view.schedule.unwrap().destination, "Mumbai");
    }

    #[test]
    fn layout_failure_is_reported() {
        let (mut session, ticket) = SeatSession::open(Uuid::new_v4(), "1");
        let err = session
            .complete_load(ticket, Some(schedule("1")), || {
                generate(0, 4, &mut FixedInventory::new())
            })
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidArgument(_)));
        assert_eq!(session.phase(), SessionPhase::Error);
    }
}
