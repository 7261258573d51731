use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::{
    notification::list_notifications_by_user,
    user::{delete_user, get_user, list_users, register_user, update_user},
};

pub fn build_user_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", get(list_users).post(register_user))
        .route("/:user_id", get(get_user).put(update_user).delete(delete_user))
        .route("/:user_id/notifications", get(list_notifications_by_user));

    Router::new().nest("/users", routers)
}
