use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::space::{
    delete_space, get_space, list_available_spaces, list_spaces, register_space, update_space,
};

pub fn build_space_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", get(list_spaces).post(register_space))
        .route("/available", get(list_available_spaces))
        .route(
            "/:space_id",
            get(get_space).put(update_space).delete(delete_space),
        );

    Router::new().nest("/spaces", routers)
}
