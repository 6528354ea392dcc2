//! Хранилище сессий выбора мест в памяти.
//!
//! Каждая сессия принадлежит одному посетителю. Все изменения одной сессии
//! идут под блокировкой хранилища, но блокировка не удерживается во время
//! обращения к справочнику рейсов.

use chrono::Local;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{PaymentConfig, SeatLayoutConfig};
use crate::directory::ScheduleDirectory;
use crate::error::{BookingError, BookingResult};
use crate::models::{BookingSummary, PaymentConfirmation};
use crate::services::{
    payment::{self, PaymentRequest},
    seat_grid,
    seat_session::{LoadTicket, SeatSession, SessionPhase, SessionView},
};

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SeatSession>>>,
    directory: Arc<dyn ScheduleDirectory>,
    layout: SeatLayoutConfig,
    payment: PaymentConfig,
}

impl SessionStore {
    pub fn new(
        directory: Arc<dyn ScheduleDirectory>,
        layout: SeatLayoutConfig,
        payment: PaymentConfig,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            directory,
            layout,
            payment,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Открывает экран выбора мест для рейса. Если первая загрузка не
    /// удалась, сессия сразу удаляется: ее id клиенту не возвращается.
    pub async fn open(&self, schedule_id: &str) -> BookingResult<SessionView> {
        let id = Uuid::new_v4();
        let (session, ticket) = SeatSession::open(id, schedule_id);
        self.sessions.write().await.insert(id, session);
        info!("Seat session {} opened for schedule {}", id, schedule_id);

        let result = self.load(id, ticket).await;
        if let Err(e) = &result {
            self.sessions.write().await.remove(&id);
            warn!("Seat session {} dropped after failed load: {}", id, e);
        }
        result
    }

    /// Загружает в сессию другой рейс, начиная новое поколение.
    pub async fn reload(&self, id: Uuid, schedule_id: &str) -> BookingResult<SessionView> {
        let ticket = {
            let mut sessions = self.sessions.write().await;
            let session = sessions.get_mut(&id).ok_or(BookingError::SessionNotFound(id))?;
            session.begin_load(schedule_id)?
        };
        self.load(id, ticket).await
    }

    async fn load(&self, id: Uuid, ticket: LoadTicket) -> BookingResult<SessionView> {
        let found = self.directory.find_by_id(ticket.schedule_id()).await;

        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(BookingError::SessionNotFound(id))?;

        let layout = &self.layout;
        session.complete_load(ticket, found, || {
            let mut inventory = layout.inventory()?;
            seat_grid::generate(layout.rows, layout.columns, &mut inventory)
        })?;

        if let Some(error) = session.error() {
            return Err(error.clone());
        }
        session.view()
    }

    pub async fn get(&self, id: Uuid) -> BookingResult<SessionView> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .ok_or(BookingError::SessionNotFound(id))?
            .view()
    }

    pub async fn toggle(&self, id: Uuid, seat_id: u32) -> BookingResult<SessionView> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(BookingError::SessionNotFound(id))?;
        session.toggle(seat_id)?;
        session.view()
    }

    pub async fn proceed(&self, id: Uuid) -> BookingResult<BookingSummary> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(BookingError::SessionNotFound(id))?;
        session.proceed(Local::now().date_naive())
    }

    /// Посетитель ушел с экрана: выбор никуда не сохраняется.
    pub async fn discard(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!("Seat session {} discarded", id);
        }
        removed
    }

    /// Оплата сводки, сформированной сессией. После подтверждения
    /// сессия удаляется.
    pub async fn pay(&self, request: &PaymentRequest) -> BookingResult<PaymentConfirmation> {
        let id = request.session_id;

        let (summary, generation) = {
            let sessions = self.sessions.read().await;
            let session = sessions.get(&id).ok_or(BookingError::SessionNotFound(id))?;
            let summary = session
                .summary()
                .cloned()
                .ok_or(BookingError::SessionNotReady(session.phase().describe()))?;
            (summary, session.generation())
        };

        payment::validate_request(request)?;

        let delay = self.payment.processing_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut sessions = self.sessions.write().await;
        match sessions.get(&id) {
            Some(s) if s.generation() == generation && s.phase() == SessionPhase::Submitting => {
                sessions.remove(&id);
            }
            _ => {
                warn!("Seat session {} changed while payment was processing", id);
                return Err(BookingError::SessionNotFound(id));
            }
        }
        drop(sessions);

        let confirmation = payment::confirm(summary, request.method);
        info!(
            "Payment {} confirmed for session {}: {} for {:?}",
            confirmation.reference, id, confirmation.amount, confirmation.summary.seats
        );
        Ok(confirmation)
    }

    /// Удаляет сессии, простаивающие дольше `ttl`.
    pub async fn sweep_expired(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.idle_for() < ttl);
        let removed = before - sessions.len();
        if removed > 0 {
            info!("Swept {} idle seat sessions", removed);
        }
        removed
    }
}
