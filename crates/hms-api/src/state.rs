//! Shared application state

use std::sync::Arc;

use sqlx::PgPool;

use hms_core::mailer::Mailer;
use hms_core::services::{
    AuthService, ReportService, ReservationService, RoomService, UserService,
};
use hms_infrastructure::{PgReservationRepository, PgRoomRepository, PgUserRepository};
use hms_security::jwt::JwtService;
use hms_shared::config::AppConfig;

/// Everything the handlers need, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt: Arc<JwtService>,
    pub auth_service: Arc<AuthService<PgUserRepository>>,
    pub user_service: Arc<UserService<PgUserRepository>>,
    pub room_service: Arc<RoomService<PgRoomRepository>>,
    pub reservation_service:
        Arc<ReservationService<PgReservationRepository, PgRoomRepository, PgUserRepository>>,
    pub report_service: Arc<ReportService<PgReservationRepository, PgRoomRepository>>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig, mailer: Option<Arc<dyn Mailer>>) -> Self {
        let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
        let room_repo = Arc::new(PgRoomRepository::new(pool.clone()));
        let reservation_repo = Arc::new(PgReservationRepository::new(pool));

        let jwt = Arc::new(JwtService::new(
            config.jwt.secret.clone(),
            config.jwt.token_expiry_hours,
        ));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repo),
            config.jwt.secret.clone(),
            config.jwt.token_expiry_hours,
        ));
        let user_service = Arc::new(UserService::new(Arc::clone(&user_repo)));
        let room_service = Arc::new(RoomService::new(Arc::clone(&room_repo)));
        let reservation_service = Arc::new(ReservationService::new(
            Arc::clone(&reservation_repo),
            Arc::clone(&room_repo),
            Arc::clone(&user_repo),
            mailer,
        ));
        let report_service = Arc::new(ReportService::new(reservation_repo, room_repo));

        Self {
            config: Arc::new(config),
            jwt,
            auth_service,
            user_service,
            room_service,
            reservation_service,
            report_service,
        }
    }
}
