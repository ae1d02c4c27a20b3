use utoipa::OpenApi;

use crate::{handlers, services::analytics};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Innkeeper API",
        version = "0.1.0",
        description = r#"
# Hotel Back-Office API

Front desk, F&B point of sale, payments and a dashboard of
revenue/occupancy analytics for a single property.

## Authentication

All endpoints under `/api/v1` except `/api/v1/auth/login` require a
bearer token:

```
Authorization: Bearer <your-jwt-token>
```

Role gates: reception features require `admin` or `receptionist`;
F&B features require `admin` or `cashier`; user registration is
`admin` only.
"#,
        contact(name = "Innkeeper API")
    ),
    paths(
        handlers::auth::login,
        handlers::auth::register,
        handlers::auth::me,
        handlers::auth::change_password,
        handlers::auth::refresh,
        handlers::guests::create_guest,
        handlers::guests::list_guests,
        handlers::guests::get_guest,
        handlers::guests::update_guest,
        handlers::rooms::create_room_type,
        handlers::rooms::list_room_types,
        handlers::rooms::get_room_type,
        handlers::rooms::update_room_type,
        handlers::rooms::create_room,
        handlers::rooms::list_rooms,
        handlers::rooms::available_rooms,
        handlers::rooms::get_room,
        handlers::rooms::update_room,
        handlers::rooms::set_room_status,
        handlers::fnb::create_outlet,
        handlers::fnb::list_outlets,
        handlers::fnb::get_outlet,
        handlers::fnb::update_outlet,
        handlers::fnb::create_category,
        handlers::fnb::list_categories,
        handlers::fnb::get_category,
        handlers::fnb::update_category,
        handlers::fnb::create_item,
        handlers::fnb::list_items,
        handlers::fnb::get_item,
        handlers::fnb::update_item,
        handlers::fnb::set_item_availability,
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::order_summary,
        handlers::orders::get_order_lines,
        handlers::orders::add_order_item,
        handlers::orders::remove_order_item,
        handlers::orders::confirm_order,
        handlers::orders::prepare_order,
        handlers::orders::ready_order,
        handlers::orders::serve_order,
        handlers::orders::pay_order,
        handlers::orders::cancel_order,
        handlers::payments::record_payment,
        handlers::payments::list_payments,
        handlers::payments::get_payment,
        handlers::reservations::create_reservation,
        handlers::reservations::list_reservations,
        handlers::reservations::get_reservation,
        handlers::reservations::update_reservation,
        handlers::reservations::stay_summary,
        handlers::reservations::check_in,
        handlers::reservations::check_out,
        handlers::reservations::cancel_reservation,
        handlers::analytics::get_revenue_today,
        handlers::analytics::get_occupancy_rate,
        handlers::analytics::get_top_items_sold,
        handlers::analytics::get_guest_spending,
        handlers::analytics::get_revenue_split,
        handlers::analytics::get_arpr,
        handlers::analytics::get_dashboard_kpis,
        handlers::analytics::get_outlet_performance,
        handlers::analytics::get_room_type_performance,
        handlers::analytics::get_payment_method_breakdown,
    ),
    components(schemas(
        analytics::RevenueToday,
        analytics::OccupancySnapshot,
        analytics::TopItemsSnapshot,
        analytics::GuestSpendingSnapshot,
        analytics::RevenueSplitSnapshot,
        analytics::ArprSnapshot,
        analytics::DashboardKpis,
        analytics::OutletPerformanceSnapshot,
        analytics::RoomTypePerformanceSnapshot,
        analytics::PaymentMethodSnapshot,
    )),
    tags(
        (name = "auth", description = "Authentication and staff accounts"),
        (name = "guests", description = "Guest profiles"),
        (name = "rooms", description = "Room types and rooms"),
        (name = "fnb", description = "Outlets, categories and menu items"),
        (name = "orders", description = "F&B orders"),
        (name = "payments", description = "Recorded transactions"),
        (name = "reservations", description = "Stay bookings and the check-in/out flow"),
        (name = "analytics", description = "Dashboard KPIs")
    )
)]
pub struct ApiDoc;
