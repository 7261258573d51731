use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

use crate::model::id::{NotificationId, UserId};

pub mod event;

use event::CreateNotification;

pub const MAX_SUBJECT_LENGTH: usize = 255;
pub const MAX_CONTENT_LENGTH: usize = 2000;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    ReservationConfirmation,
    ReservationCancellation,
    ReservationReminder,
    SystemAnnouncement,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
}

impl NotificationStatus {
    /// Only failed deliveries may be queued again; a sent notification is
    /// final.
    pub fn can_retry(self) -> bool {
        matches!(self, Self::Failed)
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub notification_id: NotificationId,
    pub user_id: UserId,
    pub notification_type: NotificationType,
    pub subject: String,
    pub content: String,
    pub status: NotificationStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(event: CreateNotification) -> AppResult<Self> {
        let CreateNotification {
            user_id,
            notification_type,
            subject,
            content,
        } = event;

        validate_subject(&subject)?;
        validate_content(&content)?;

        let now = Utc::now();
        Ok(Self {
            notification_id: NotificationId::new(),
            user_id,
            notification_type,
            subject,
            content,
            status: NotificationStatus::Pending,
            sent_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn mark_as_sent(&mut self) -> AppResult<()> {
        if self.status != NotificationStatus::Pending {
            return Err(AppError::BusinessRuleViolation(format!(
                "only pending notifications can be marked as sent, current status: {}",
                self.status
            )));
        }
        self.status = NotificationStatus::Sent;
        self.sent_at = Some(Utc::now());
        self.touch();
        Ok(())
    }

    pub fn mark_as_failed(&mut self) -> AppResult<()> {
        if self.status != NotificationStatus::Pending {
            return Err(AppError::BusinessRuleViolation(format!(
                "only pending notifications can be marked as failed, current status: {}",
                self.status
            )));
        }
        self.status = NotificationStatus::Failed;
        self.touch();
        Ok(())
    }

    pub fn retry(&mut self) -> AppResult<()> {
        if !self.status.can_retry() {
            return Err(AppError::BusinessRuleViolation(
                "only failed notifications can be retried".into(),
            ));
        }
        self.status = NotificationStatus::Pending;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn validate_subject(subject: &str) -> AppResult<()> {
    if subject.trim().is_empty() {
        return Err(AppError::InvalidData("the subject is required".into()));
    }
    if subject.chars().count() > MAX_SUBJECT_LENGTH {
        return Err(AppError::InvalidData(format!(
            "the subject cannot exceed {MAX_SUBJECT_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_content(content: &str) -> AppResult<()> {
    if content.trim().is_empty() {
        return Err(AppError::InvalidData("the content is required".into()));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(AppError::InvalidData(format!(
            "the content cannot exceed {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(subject: &str, content: &str) -> AppResult<Notification> {
        Notification::new(CreateNotification::new(
            UserId::new(),
            NotificationType::ReservationConfirmation,
            subject.into(),
            content.into(),
        ))
    }

    #[test]
    fn new_notification_starts_pending_without_sent_at() {
        let n = create("Booking confirmed", "See you there.").unwrap();
        assert_eq!(n.status, NotificationStatus::Pending);
        assert!(n.sent_at.is_none());
    }

    #[test]
    fn subject_bound_is_inclusive() {
        assert!(create(&"s".repeat(255), "body").is_ok());
        assert!(matches!(
            create(&"s".repeat(256), "body"),
            Err(AppError::InvalidData(_))
        ));
        assert!(create("", "body").is_err());
    }

    #[test]
    fn content_bound_is_inclusive() {
        assert!(create("subject", &"c".repeat(2000)).is_ok());
        assert!(matches!(
            create("subject", &"c".repeat(2001)),
            Err(AppError::InvalidData(_))
        ));
        assert!(create("subject", "  ").is_err());
    }

    #[test]
    fn marking_as_sent_sets_sent_at_once() {
        let mut n = create("subject", "body").unwrap();
        assert!(n.mark_as_sent().is_ok());
        assert_eq!(n.status, NotificationStatus::Sent);
        assert!(n.sent_at.is_some());

        // Sent is final.
        assert!(n.mark_as_sent().is_err());
        assert!(n.mark_as_failed().is_err());
        assert!(n.retry().is_err());
    }

    #[test]
    fn retry_is_only_legal_from_failed() {
        let mut n = create("subject", "body").unwrap();
        assert!(matches!(
            n.retry(),
            Err(AppError::BusinessRuleViolation(_))
        ));

        n.mark_as_failed().unwrap();
        assert!(n.retry().is_ok());
        assert_eq!(n.status, NotificationStatus::Pending);
        assert!(n.sent_at.is_none());
    }
}
