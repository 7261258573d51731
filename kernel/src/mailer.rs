use async_trait::async_trait;
use derive_new::new;
use shared::error::AppResult;

use crate::model::id::ReservationId;

/// Small structured payload handed to the mail port; times are preformatted
/// strings because the template layer has no use for timezone math.
#[derive(Debug, Clone, new)]
pub struct ReservationMailPayload {
    pub reservation_id: ReservationId,
    pub user_name: String,
    pub space_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

/// Outbound notification port. Delivery is best effort: callers log failures
/// and must never let them fail the operation that triggered the mail.
#[async_trait]
pub trait ReservationMailer: Send + Sync {
    async fn send_confirmation(&self, to: &str, payload: &ReservationMailPayload)
        -> AppResult<()>;
    async fn send_cancellation(&self, to: &str, payload: &ReservationMailPayload)
        -> AppResult<()>;
    async fn send_reminder(&self, to: &str, payload: &ReservationMailPayload) -> AppResult<()>;
}
