use derive_new::new;

use super::SpaceType;

#[derive(Debug, new)]
pub struct CreateSpace {
    pub name: String,
    pub space_type: SpaceType,
    pub capacity: i32,
}
