use axum::{extract::State, response::Json, routing::get, Router};

use crate::{
    auth::CurrentUser,
    services::analytics::{
        AnalyticsService, ArprSnapshot, DashboardKpis, GuestSpendingSnapshot, OccupancySnapshot,
        OutletPerformanceSnapshot, PaymentMethodSnapshot, RevenueSplitSnapshot, RevenueToday,
        RoomTypePerformanceSnapshot, TopItemsSnapshot,
    },
    ApiResponse, ApiResult, AppState,
};

/// Build the analytics Router scoped under `/api/v1/analytics`.
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/revenue-today", get(get_revenue_today))
        .route("/occupancy-rate", get(get_occupancy_rate))
        .route("/top-items-sold", get(get_top_items_sold))
        .route("/guest-spending", get(get_guest_spending))
        .route("/revenue-split", get(get_revenue_split))
        .route("/arpr", get(get_arpr))
        .route("/dashboard-kpis", get(get_dashboard_kpis))
        .route("/outlet-performance", get(get_outlet_performance))
        .route("/room-type-performance", get(get_room_type_performance))
        .route("/payment-methods", get(get_payment_method_breakdown))
}

/// Today's total revenue with the room/F&B breakdown.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/revenue-today",
    responses(
        (status = 200, description = "Revenue snapshot", body = ApiResponse<RevenueToday>),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    tag = "analytics"
)]
pub async fn get_revenue_today(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> ApiResult<RevenueToday> {
    let analytics = AnalyticsService::new(state.db);
    Ok(Json(ApiResponse::success(analytics.revenue_today().await?)))
}

/// Current room occupancy statistics.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/occupancy-rate",
    responses(
        (status = 200, description = "Occupancy snapshot", body = ApiResponse<OccupancySnapshot>)
    ),
    tag = "analytics"
)]
pub async fn get_occupancy_rate(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> ApiResult<OccupancySnapshot> {
    let analytics = AnalyticsService::new(state.db);
    Ok(Json(ApiResponse::success(analytics.occupancy_rate().await?)))
}

/// Top 5 items sold today with quantities and revenue.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/top-items-sold",
    responses(
        (status = 200, description = "Top items snapshot", body = ApiResponse<TopItemsSnapshot>)
    ),
    tag = "analytics"
)]
pub async fn get_top_items_sold(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> ApiResult<TopItemsSnapshot> {
    let analytics = AnalyticsService::new(state.db);
    Ok(Json(ApiResponse::success(analytics.top_items_sold().await?)))
}

/// Ranking of checked-in guests by spending today.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/guest-spending",
    responses(
        (status = 200, description = "Guest spending snapshot", body = ApiResponse<GuestSpendingSnapshot>)
    ),
    tag = "analytics"
)]
pub async fn get_guest_spending(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> ApiResult<GuestSpendingSnapshot> {
    let analytics = AnalyticsService::new(state.db);
    Ok(Json(ApiResponse::success(analytics.guest_spending().await?)))
}

/// Rooms vs F&B revenue percentages for today.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/revenue-split",
    responses(
        (status = 200, description = "Revenue split snapshot", body = ApiResponse<RevenueSplitSnapshot>)
    ),
    tag = "analytics"
)]
pub async fn get_revenue_split(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> ApiResult<RevenueSplitSnapshot> {
    let analytics = AnalyticsService::new(state.db);
    Ok(Json(ApiResponse::success(analytics.revenue_split().await?)))
}

/// Average revenue per occupied room for today.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/arpr",
    responses(
        (status = 200, description = "ARPR snapshot", body = ApiResponse<ArprSnapshot>)
    ),
    tag = "analytics"
)]
pub async fn get_arpr(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> ApiResult<ArprSnapshot> {
    let analytics = AnalyticsService::new(state.db);
    Ok(Json(ApiResponse::success(
        analytics.average_revenue_per_room().await?,
    )))
}

/// Every dashboard KPI in one consistent snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/dashboard-kpis",
    responses(
        (status = 200, description = "Dashboard snapshot", body = ApiResponse<DashboardKpis>)
    ),
    tag = "analytics"
)]
pub async fn get_dashboard_kpis(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> ApiResult<DashboardKpis> {
    let analytics = AnalyticsService::new(state.db);
    Ok(Json(ApiResponse::success(analytics.dashboard_kpis().await?)))
}

/// Per-outlet order count, revenue and average order value for today.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/outlet-performance",
    responses(
        (status = 200, description = "Outlet performance snapshot", body = ApiResponse<OutletPerformanceSnapshot>)
    ),
    tag = "analytics"
)]
pub async fn get_outlet_performance(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> ApiResult<OutletPerformanceSnapshot> {
    let analytics = AnalyticsService::new(state.db);
    Ok(Json(ApiResponse::success(
        analytics.outlet_performance().await?,
    )))
}

/// Per room type bookings, revenue and occupancy.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/room-type-performance",
    responses(
        (status = 200, description = "Room type performance snapshot", body = ApiResponse<RoomTypePerformanceSnapshot>)
    ),
    tag = "analytics"
)]
pub async fn get_room_type_performance(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> ApiResult<RoomTypePerformanceSnapshot> {
    let analytics = AnalyticsService::new(state.db);
    Ok(Json(ApiResponse::success(
        analytics.room_type_performance().await?,
    )))
}

/// Today's completed payments grouped by method.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/payment-methods",
    responses(
        (status = 200, description = "Payment method snapshot", body = ApiResponse<PaymentMethodSnapshot>)
    ),
    tag = "analytics"
)]
pub async fn get_payment_method_breakdown(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> ApiResult<PaymentMethodSnapshot> {
    let analytics = AnalyticsService::new(state.db);
    Ok(Json(ApiResponse::success(
        analytics.payment_method_breakdown().await?,
    )))
}
