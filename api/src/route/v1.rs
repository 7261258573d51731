use axum::Router;
use registry::AppRegistry;

use crate::route::{
    health::build_health_check_routers, notification::build_notification_routers,
    reservation::build_reservation_routers, space::build_space_routers, user::build_user_routers,
};

pub fn routes() -> Router<AppRegistry> {
    let routers = Router::new()
        .merge(build_health_check_routers())
        .merge(build_user_routers())
        .merge(build_space_routers())
        .merge(build_reservation_routers())
        .merge(build_notification_routers());

    Router::new().nest("/api/v1", routers)
}
