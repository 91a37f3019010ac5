//! Route table

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{auth, health, report, reservation, room, user};
use crate::middleware::{authenticate, require_admin, require_staff};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Admin or receptionist: room and reservation management, customer
    // listing, reports.
    let staff_routes = Router::new()
        .route("/customers", get(user::list_customers))
        .route(
            "/users/{user_id}",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::delete_user),
        )
        .route("/rooms", post(room::create_room).get(room::list_rooms))
        .route(
            "/rooms/{room_id}",
            get(room::get_room)
                .put(room::update_room)
                .delete(room::delete_room),
        )
        .route(
            "/reservations",
            post(reservation::create_reservation).get(reservation::list_reservations),
        )
        .route(
            "/reservations/{reservation_id}",
            get(reservation::get_reservation)
                .put(reservation::update_reservation)
                .delete(reservation::delete_reservation),
        )
        .route(
            "/reservations/status/{reservation_id}",
            put(reservation::update_reservation_status),
        )
        .route("/occupancy", post(report::occupancy))
        .route("/revenue", post(report::total_revenue))
        .route("/revenue/daily", post(report::daily_revenue))
        .route("/revenue/monthly", post(report::monthly_revenue))
        .layer(from_fn(require_staff));

    let admin_routes = Router::new()
        .route("/users", get(user::list_users))
        .layer(from_fn(require_admin));

    // Any authenticated user may manage their own profile.
    let profile_routes = Router::new()
        .route(
            "/profile",
            get(user::get_profile).put(user::update_profile),
        )
        .route("/profile/password", put(user::change_password));

    let protected = staff_routes
        .merge(admin_routes)
        .merge(profile_routes)
        .layer(from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/health", get(health::health_check))
        .merge(protected)
        .with_state(state)
}
