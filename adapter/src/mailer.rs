use async_trait::async_trait;

use kernel::mailer::{ReservationMailPayload, ReservationMailer};
use shared::error::AppResult;

/// Mailer that records outgoing mail in the log instead of delivering it.
/// Stands in for a real SMTP transport in development and tests.
#[derive(Default)]
pub struct LoggingMailer;

#[async_trait]
impl ReservationMailer for LoggingMailer {
    async fn send_confirmation(
        &self,
        to: &str,
        payload: &ReservationMailPayload,
    ) -> AppResult<()> {
        tracing::info!(
            to,
            reservation_id = %payload.reservation_id,
            space = %payload.space_name,
            "confirmation mail: {} reserved {} on {} from {} to {}",
            payload.user_name,
            payload.space_name,
            payload.date,
            payload.start_time,
            payload.end_time,
        );
        Ok(())
    }

    async fn send_cancellation(
        &self,
        to: &str,
        payload: &ReservationMailPayload,
    ) -> AppResult<()> {
        tracing::info!(
            to,
            reservation_id = %payload.reservation_id,
            space = %payload.space_name,
            "cancellation mail: reservation by {} for {} on {} was cancelled",
            payload.user_name,
            payload.space_name,
            payload.date,
        );
        Ok(())
    }

    async fn send_reminder(&self, to: &str, payload: &ReservationMailPayload) -> AppResult<()> {
        tracing::info!(
            to,
            reservation_id = %payload.reservation_id,
            space = %payload.space_name,
            "reminder mail: {} has {} on {} from {} to {}",
            payload.user_name,
            payload.space_name,
            payload.date,
            payload.start_time,
            payload.end_time,
        );
        Ok(())
    }
}
