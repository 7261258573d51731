use chrono::{DateTime, Utc};
use regex::Regex;
use shared::error::{AppError, AppResult};
use std::sync::LazyLock;

use crate::model::id::UserId;

pub mod event;

use event::CreateUser;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 255;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(event: CreateUser) -> AppResult<Self> {
        let CreateUser { name, email } = event;

        let name = validated_name(&name)?;
        validate_email(&email)?;

        let now = Utc::now();
        Ok(Self {
            user_id: UserId::new(),
            name,
            email,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_name(&mut self, name: &str) -> AppResult<()> {
        self.name = validated_name(name)?;
        self.touch();
        Ok(())
    }

    pub fn update_email(&mut self, email: &str) -> AppResult<()> {
        validate_email(email)?;
        self.email = email.to_string();
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn validated_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidData("the user name is required".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::InvalidData(format!(
            "the user name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_email(email: &str) -> AppResult<()> {
    if email.is_empty() {
        return Err(AppError::InvalidData("the email is required".into()));
    }
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(AppError::InvalidData(format!(
            "the email cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(AppError::InvalidData("the email format is invalid".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, email: &str) -> AppResult<User> {
        User::new(CreateUser::new(name.into(), email.into()))
    }

    #[test]
    fn valid_users_are_accepted() {
        let user = create("Ana Torres", "ana@example.com").unwrap();
        assert_eq!(user.name, "Ana Torres");
        assert_eq!(user.email, "ana@example.com");
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["", "ana", "ana@example", "ana example@x.com", "a@@b.com"] {
            assert!(
                matches!(create("Ana", email), Err(AppError::InvalidData(_))),
                "expected rejection for {email:?}"
            );
        }
    }

    #[test]
    fn email_length_bound_is_inclusive() {
        // 243 + "@example.com" (12) = 255 characters.
        let at_limit = format!("{}@example.com", "a".repeat(243));
        assert!(create("Ana", &at_limit).is_ok());

        let over_limit = format!("{}@example.com", "a".repeat(244));
        assert!(matches!(
            create("Ana", &over_limit),
            Err(AppError::InvalidData(_))
        ));
    }

    #[test]
    fn name_bounds_are_enforced() {
        assert!(create("", "ana@example.com").is_err());
        assert!(create(&"n".repeat(101), "ana@example.com").is_err());
        assert!(create(&"n".repeat(100), "ana@example.com").is_ok());
    }

    #[test]
    fn update_email_revalidates() {
        let mut user = create("Ana", "ana@example.com").unwrap();
        assert!(user.update_email("not-an-email").is_err());
        assert_eq!(user.email, "ana@example.com");
        assert!(user.update_email("ana@beispiel.de").is_ok());
    }
}
