use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    mailer::LoggingMailer,
    repository::{
        health::HealthCheckRepositoryImpl, notification::NotificationRepositoryImpl,
        reservation::ReservationRepositoryImpl, space::SpaceRepositoryImpl,
        user::UserRepositoryImpl,
    },
};
use kernel::{
    mailer::ReservationMailer,
    repository::{
        health::HealthCheckRepository, notification::NotificationRepository,
        reservation::ReservationRepository, space::SpaceRepository, user::UserRepository,
    },
};

/// Wires concrete repositories to their kernel traits. Handlers pull what
/// they need through the accessor methods and stay adapter-agnostic.
#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    user_repository: Arc<dyn UserRepository>,
    space_repository: Arc<dyn SpaceRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    notification_repository: Arc<dyn NotificationRepository>,
    reservation_mailer: Arc<dyn ReservationMailer>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let space_repository = Arc::new(SpaceRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let notification_repository = Arc::new(NotificationRepositoryImpl::new(pool.clone()));
        let reservation_mailer = Arc::new(LoggingMailer);
        Self {
            health_check_repository,
            user_repository,
            space_repository,
            reservation_repository,
            notification_repository,
            reservation_mailer,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn space_repository(&self) -> Arc<dyn SpaceRepository> {
        self.space_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn notification_repository(&self) -> Arc<dyn NotificationRepository> {
        self.notification_repository.clone()
    }

    pub fn reservation_mailer(&self) -> Arc<dyn ReservationMailer> {
        self.reservation_mailer.clone()
    }
}
