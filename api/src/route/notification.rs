use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::notification::{
    get_notification, list_notifications, register_notification, retry_notification,
};

pub fn build_notification_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", get(list_notifications).post(register_notification))
        .route("/:notification_id", get(get_notification))
        .route("/:notification_id/retry", post(retry_notification));

    Router::new().nest("/notifications", routers)
}
