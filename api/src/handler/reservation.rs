use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::{
    mailer::ReservationMailPayload,
    model::{
        id::ReservationId,
        reservation::Reservation,
        space::Space,
        user::User,
    },
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::reservation::{
    CancelReservationRequest, CreateReservationRequest, ListReservationsQuery,
    ReservationDetailResponse, ReservationResponse,
};

pub async fn create_reservation(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let user_repo = registry.user_repository();
    let space_repo = registry.space_repository();
    let (user, space) = tokio::join!(
        user_repo.find_by_id(req.user_id),
        space_repo.find_by_id(req.space_id),
    );
    let user = user?.ok_or_else(|| {
        AppError::EntityNotFound(format!("user ({}) was not found", req.user_id))
    })?;
    let space = space?.ok_or_else(|| {
        AppError::EntityNotFound(format!("space ({}) was not found", req.space_id))
    })?;

    let reservation = Reservation::new(req.into())?;

    let conflicts = registry
        .reservation_repository()
        .find_conflicting(
            reservation.space_id,
            reservation.date,
            reservation.start_time,
            reservation.end_time,
            None,
        )
        .await?;
    if !conflicts.is_empty() {
        return Err(AppError::BusinessRuleViolation(format!(
            "space ({}) already has an active reservation in the requested time slot",
            reservation.space_id
        )));
    }

    registry.reservation_repository().save(&reservation).await?;

    let payload = mail_payload(&reservation, &user, &space);
    if let Err(e) = registry
        .reservation_mailer()
        .send_confirmation(&user.email, &payload)
        .await
    {
        tracing::warn!(
            error = %e,
            reservation_id = %reservation.reservation_id,
            "failed to send the confirmation mail"
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse::from(reservation)),
    ))
}

pub async fn list_reservations(
    State(registry): State<AppRegistry>,
    Query(query): Query<ListReservationsQuery>,
) -> AppResult<Json<Vec<ReservationResponse>>> {
    let repo = registry.reservation_repository();
    let reservations = match (query.user_id, query.space_id, query.from, query.to) {
        (Some(user_id), _, _, _) => repo.find_by_user_id(user_id).await?,
        (_, Some(space_id), _, _) => repo.find_by_space_id(space_id).await?,
        (_, _, Some(from), Some(to)) => {
            if from > to {
                return Err(AppError::InvalidData(
                    "the from date must not be after the to date".into(),
                ));
            }
            repo.find_by_date_range(from, to).await?
        }
        _ => repo.find_all().await?,
    };

    Ok(Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    ))
}

pub async fn get_reservation(
    State(registry): State<AppRegistry>,
    Path(reservation_id): Path<ReservationId>,
) -> AppResult<Json<ReservationDetailResponse>> {
    let reservation = find_reservation(&registry, reservation_id).await?;

    let user_repo = registry.user_repository();
    let space_repo = registry.space_repository();
    let (user, space) = tokio::join!(
        user_repo.find_by_id(reservation.user_id),
        space_repo.find_by_id(reservation.space_id),
    );

    Ok(Json(ReservationDetailResponse {
        reservation: ReservationResponse::from(reservation),
        user: user?.map(Into::into),
        space: space?.map(Into::into),
    }))
}

pub async fn cancel_reservation(
    State(registry): State<AppRegistry>,
    Path(reservation_id): Path<ReservationId>,
    Json(req): Json<CancelReservationRequest>,
) -> AppResult<Json<ReservationResponse>> {
    let mut reservation = find_reservation(&registry, reservation_id).await?;

    reservation.cancel(req.user_id)?;
    registry
        .reservation_repository()
        .update(&reservation)
        .await?;

    let user_repo = registry.user_repository();
    let space_repo = registry.space_repository();
    let (user, space) = tokio::join!(
        user_repo.find_by_id(reservation.user_id),
        space_repo.find_by_id(reservation.space_id),
    );
    if let (Ok(Some(user)), Ok(Some(space))) = (user, space) {
        let payload = mail_payload(&reservation, &user, &space);
        if let Err(e) = registry
            .reservation_mailer()
            .send_cancellation(&user.email, &payload)
            .await
        {
            tracing::warn!(
                error = %e,
                reservation_id = %reservation.reservation_id,
                "failed to send the cancellation mail"
            );
        }
    }

    Ok(Json(ReservationResponse::from(reservation)))
}

pub async fn confirm_reservation(
    State(registry): State<AppRegistry>,
    Path(reservation_id): Path<ReservationId>,
) -> AppResult<Json<ReservationResponse>> {
    let mut reservation = find_reservation(&registry, reservation_id).await?;

    reservation.confirm()?;
    registry
        .reservation_repository()
        .update(&reservation)
        .await?;

    Ok(Json(ReservationResponse::from(reservation)))
}

pub async fn complete_reservation(
    State(registry): State<AppRegistry>,
    Path(reservation_id): Path<ReservationId>,
) -> AppResult<Json<ReservationResponse>> {
    let mut reservation = find_reservation(&registry, reservation_id).await?;

    reservation.complete()?;
    registry
        .reservation_repository()
        .update(&reservation)
        .await?;

    Ok(Json(ReservationResponse::from(reservation)))
}

async fn find_reservation(
    registry: &AppRegistry,
    reservation_id: ReservationId,
) -> AppResult<Reservation> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("reservation ({reservation_id}) was not found"))
        })
}

fn mail_payload(reservation: &Reservation, user: &User, space: &Space) -> ReservationMailPayload {
    ReservationMailPayload::new(
        reservation.reservation_id,
        user.name.clone(),
        space.name.clone(),
        reservation.date.to_string(),
        reservation.start_time.to_rfc3339(),
        reservation.end_time.to_rfc3339(),
    )
}
