use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

use crate::model::id::SpaceId;

pub mod event;

use event::CreateSpace;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MIN_CAPACITY: i32 = 1;
pub const MAX_CAPACITY: i32 = 1000;

/// Closed set of bookable space categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SpaceType {
    MeetingRoom,
    SportsCourt,
    Auditorium,
    EventHall,
    Laboratory,
    Library,
    Patio,
    Gym,
}

#[derive(Debug, Clone)]
pub struct Space {
    pub space_id: SpaceId,
    pub name: String,
    pub space_type: SpaceType,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Space {
    pub fn new(event: CreateSpace) -> AppResult<Self> {
        let CreateSpace {
            name,
            space_type,
            capacity,
        } = event;

        let name = validated_name(&name)?;
        validate_capacity(capacity)?;

        let now = Utc::now();
        Ok(Self {
            space_id: SpaceId::new(),
            name,
            space_type,
            capacity,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_name(&mut self, name: &str) -> AppResult<()> {
        self.name = validated_name(name)?;
        self.touch();
        Ok(())
    }

    pub fn update_space_type(&mut self, space_type: SpaceType) {
        self.space_type = space_type;
        self.touch();
    }

    pub fn update_capacity(&mut self, capacity: i32) -> AppResult<()> {
        validate_capacity(capacity)?;
        self.capacity = capacity;
        self.touch();
        Ok(())
    }

    pub fn can_accommodate(&self, required_capacity: i32) -> bool {
        self.capacity >= required_capacity
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn validated_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidData("the space name is required".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::InvalidData(format!(
            "the space name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_capacity(capacity: i32) -> AppResult<()> {
    if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
        return Err(AppError::InvalidData(format!(
            "the capacity must be between {MIN_CAPACITY} and {MAX_CAPACITY}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, capacity: i32) -> AppResult<Space> {
        Space::new(CreateSpace::new(
            name.into(),
            SpaceType::MeetingRoom,
            capacity,
        ))
    }

    #[test]
    fn name_and_capacity_bounds_are_enforced() {
        assert!(create("Sala Norte", 10).is_ok());
        assert!(create(&"a".repeat(100), 10).is_ok());
        assert!(matches!(
            create(&"a".repeat(101), 10),
            Err(AppError::InvalidData(_))
        ));
        assert!(matches!(create("", 10), Err(AppError::InvalidData(_))));
        assert!(matches!(create("   ", 10), Err(AppError::InvalidData(_))));
        assert!(matches!(create("Patio", 0), Err(AppError::InvalidData(_))));
        assert!(matches!(
            create("Patio", 1001),
            Err(AppError::InvalidData(_))
        ));
        assert!(create("Patio", 1).is_ok());
        assert!(create("Patio", 1000).is_ok());
    }

    #[test]
    fn update_mutators_revalidate() {
        let mut space = create("Auditorium A", 200).unwrap();
        assert!(space.update_name("  Auditorium B  ").is_ok());
        assert_eq!(space.name, "Auditorium B");
        assert!(space.update_name("").is_err());
        assert!(space.update_capacity(1001).is_err());
        assert_eq!(space.capacity, 200);
    }

    #[test]
    fn can_accommodate_compares_against_capacity() {
        let space = create("Court", 12).unwrap();
        assert!(space.can_accommodate(12));
        assert!(!space.can_accommodate(13));
    }
}
