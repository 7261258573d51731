pub mod id;
pub mod notification;
pub mod reservation;
pub mod space;
pub mod user;
