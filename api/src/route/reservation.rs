use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    cancel_reservation, complete_reservation, confirm_reservation, create_reservation,
    get_reservation, list_reservations,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/", get(list_reservations).post(create_reservation))
        .route("/:reservation_id", get(get_reservation))
        .route("/:reservation_id/cancel", post(cancel_reservation))
        .route("/:reservation_id/confirm", post(confirm_reservation))
        .route("/:reservation_id/complete", post(complete_reservation));

    Router::new().nest("/reservations", routers)
}
