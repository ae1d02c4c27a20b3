use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::{
    auth::AuthService,
    services::{orders::OrderService, reservations::ReservationService, users::UserService},
};

pub mod analytics;
pub mod auth;
pub mod common;
pub mod fnb;
pub mod guests;
pub mod orders;
pub mod payments;
pub mod reservations;
pub mod rooms;

/// Aggregated services used by the HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub reservations: ReservationService,
    pub orders: OrderService,
    pub users: UserService,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>, auth: AuthService) -> Self {
        Self {
            reservations: ReservationService::new(db.clone()),
            orders: OrderService::new(db.clone()),
            users: UserService::new(db, auth),
        }
    }
}
