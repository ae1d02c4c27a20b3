pub mod audit_log;
pub mod guest;
pub mod item;
pub mod item_category;
pub mod order;
pub mod order_line;
pub mod outlet;
pub mod payment;
pub mod reservation;
pub mod room;
pub mod room_type;
pub mod user;

pub use audit_log::Entity as AuditLog;
pub use guest::Entity as Guest;
pub use item::Entity as Item;
pub use item_category::Entity as ItemCategory;
pub use order::Entity as Order;
pub use order_line::Entity as OrderLine;
pub use outlet::Entity as Outlet;
pub use payment::Entity as Payment;
pub use reservation::Entity as Reservation;
pub use room::Entity as Room;
pub use room_type::Entity as RoomType;
pub use user::Entity as User;
