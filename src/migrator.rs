use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_guests_table::Migration),
            Box::new(m20250301_000003_create_room_tables::Migration),
            Box::new(m20250301_000004_create_fnb_tables::Migration),
            Box::new(m20250301_000005_create_reservations_table::Migration),
            Box::new(m20250301_000006_create_order_tables::Migration),
            Box::new(m20250301_000007_create_payments_table::Migration),
            Box::new(m20250301_000008_create_audit_logs_table::Migration),
        ]
    }
}

mod m20250301_000001_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Users::Username)
                                .string_len(50)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Users::Email)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Users::FullName).string_len(100).not_null())
                        .col(ColumnDef::new(Users::Role).string_len(20).not_null())
                        .col(
                            ColumnDef::new(Users::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Users::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Users {
        Table,
        Id,
        Username,
        Email,
        PasswordHash,
        FullName,
        Role,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250301_000002_create_guests_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_guests_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Guests::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Guests::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Guests::FirstName).string_len(50).not_null())
                        .col(ColumnDef::new(Guests::LastName).string_len(50).not_null())
                        .col(ColumnDef::new(Guests::Email).string_len(100).null())
                        .col(ColumnDef::new(Guests::Phone).string_len(20).not_null())
                        .col(ColumnDef::new(Guests::Address).text().null())
                        .col(ColumnDef::new(Guests::Nationality).string_len(50).null())
                        .col(ColumnDef::new(Guests::IdType).string_len(20).null())
                        .col(ColumnDef::new(Guests::IdNumber).string_len(50).null())
                        .col(ColumnDef::new(Guests::DateOfBirth).date().null())
                        .col(
                            ColumnDef::new(Guests::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Guests::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_guests_phone")
                        .table(Guests::Table)
                        .col(Guests::Phone)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Guests::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Guests {
        Table,
        Id,
        FirstName,
        LastName,
        Email,
        Phone,
        Address,
        Nationality,
        IdType,
        IdNumber,
        DateOfBirth,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250301_000003_create_room_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_room_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(RoomTypes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RoomTypes::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(RoomTypes::Name).string_len(50).not_null())
                        .col(ColumnDef::new(RoomTypes::Description).text().null())
                        .col(
                            ColumnDef::new(RoomTypes::BasePrice)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(RoomTypes::MaxOccupancy).integer().not_null())
                        .col(ColumnDef::new(RoomTypes::Amenities).json().not_null())
                        .col(
                            ColumnDef::new(RoomTypes::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RoomTypes::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Rooms::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Rooms::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Rooms::RoomNumber)
                                .string_len(10)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Rooms::RoomTypeId).uuid().not_null())
                        .col(ColumnDef::new(Rooms::FloorNumber).integer().not_null())
                        .col(
                            ColumnDef::new(Rooms::Status)
                                .string_len(20)
                                .not_null()
                                .default("available"),
                        )
                        .col(ColumnDef::new(Rooms::Description).text().null())
                        .col(
                            ColumnDef::new(Rooms::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Rooms::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_rooms_room_type")
                                .from(Rooms::Table, Rooms::RoomTypeId)
                                .to(RoomTypes::Table, RoomTypes::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_rooms_status")
                        .table(Rooms::Table)
                        .col(Rooms::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Rooms::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(RoomTypes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum RoomTypes {
        Table,
        Id,
        Name,
        Description,
        BasePrice,
        MaxOccupancy,
        Amenities,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum Rooms {
        Table,
        Id,
        RoomNumber,
        RoomTypeId,
        FloorNumber,
        Status,
        Description,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250301_000004_create_fnb_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000004_create_fnb_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Outlets::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Outlets::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Outlets::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Outlets::OutletType).string_len(20).not_null())
                        .col(ColumnDef::new(Outlets::Location).string_len(100).null())
                        .col(ColumnDef::new(Outlets::Description).text().null())
                        .col(ColumnDef::new(Outlets::OperatingHours).json().null())
                        .col(
                            ColumnDef::new(Outlets::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Outlets::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Outlets::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ItemCategories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ItemCategories::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ItemCategories::Name)
                                .string_len(50)
                                .not_null(),
                        )
                        .col(ColumnDef::new(ItemCategories::Description).text().null())
                        .col(ColumnDef::new(ItemCategories::OutletId).uuid().null())
                        .col(
                            ColumnDef::new(ItemCategories::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ItemCategories::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_item_categories_outlet")
                                .from(ItemCategories::Table, ItemCategories::OutletId)
                                .to(Outlets::Table, Outlets::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Items::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Items::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Items::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Items::Description).text().null())
                        .col(ColumnDef::new(Items::CategoryId).uuid().null())
                        .col(ColumnDef::new(Items::OutletId).uuid().not_null())
                        .col(ColumnDef::new(Items::Price).decimal_len(8, 2).not_null())
                        .col(ColumnDef::new(Items::Cost).decimal_len(8, 2).null())
                        .col(
                            ColumnDef::new(Items::IsAvailable)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Items::PreparationTime).integer().null())
                        .col(ColumnDef::new(Items::Allergens).json().not_null())
                        .col(ColumnDef::new(Items::DietaryInfo).json().not_null())
                        .col(ColumnDef::new(Items::ImageUrl).string_len(255).null())
                        .col(
                            ColumnDef::new(Items::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Items::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_items_outlet")
                                .from(Items::Table, Items::OutletId)
                                .to(Outlets::Table, Outlets::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_items_category")
                                .from(Items::Table, Items::CategoryId)
                                .to(ItemCategories::Table, ItemCategories::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_items_outlet")
                        .table(Items::Table)
                        .col(Items::OutletId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Items::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ItemCategories::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Outlets::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Outlets {
        Table,
        Id,
        Name,
        OutletType,
        Location,
        Description,
        OperatingHours,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum ItemCategories {
        Table,
        Id,
        Name,
        Description,
        OutletId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum Items {
        Table,
        Id,
        Name,
        Description,
        CategoryId,
        OutletId,
        Price,
        Cost,
        IsAvailable,
        PreparationTime,
        Allergens,
        DietaryInfo,
        ImageUrl,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250301_000005_create_reservations_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000005_create_reservations_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Reservations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Reservations::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Reservations::GuestId).uuid().not_null())
                        .col(ColumnDef::new(Reservations::RoomId).uuid().not_null())
                        .col(ColumnDef::new(Reservations::CheckinDate).date().not_null())
                        .col(ColumnDef::new(Reservations::CheckoutDate).date().not_null())
                        .col(
                            ColumnDef::new(Reservations::ActualCheckin)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Reservations::ActualCheckout)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Reservations::Adults)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(Reservations::Children)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Reservations::TotalAmount)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Reservations::Status)
                                .string_len(20)
                                .not_null()
                                .default("confirmed"),
                        )
                        .col(ColumnDef::new(Reservations::SpecialRequests).text().null())
                        .col(ColumnDef::new(Reservations::CreatedBy).uuid().null())
                        .col(
                            ColumnDef::new(Reservations::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Reservations::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_reservations_guest")
                                .from(Reservations::Table, Reservations::GuestId)
                                .to(Guests::Table, Guests::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_reservations_room")
                                .from(Reservations::Table, Reservations::RoomId)
                                .to(Rooms::Table, Rooms::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_reservations_room_status")
                        .table(Reservations::Table)
                        .col(Reservations::RoomId)
                        .col(Reservations::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Reservations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Reservations {
        Table,
        Id,
        GuestId,
        RoomId,
        CheckinDate,
        CheckoutDate,
        ActualCheckin,
        ActualCheckout,
        Adults,
        Children,
        TotalAmount,
        Status,
        SpecialRequests,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Guests {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Rooms {
        Table,
        Id,
    }
}

mod m20250301_000006_create_order_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000006_create_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Orders::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Orders::OrderNumber)
                                .string_len(20)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Orders::OutletId).uuid().not_null())
                        .col(ColumnDef::new(Orders::GuestId).uuid().null())
                        .col(ColumnDef::new(Orders::ReservationId).uuid().null())
                        .col(ColumnDef::new(Orders::TableNumber).string_len(10).null())
                        .col(
                            ColumnDef::new(Orders::OrderType)
                                .string_len(20)
                                .not_null()
                                .default("dine_in"),
                        )
                        .col(
                            ColumnDef::new(Orders::Status)
                                .string_len(20)
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(Orders::Subtotal)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::TaxAmount)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::ServiceCharge)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::DiscountAmount)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::TotalAmount)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Orders::PaymentMethod).string_len(20).null())
                        .col(
                            ColumnDef::new(Orders::PaymentStatus)
                                .string_len(20)
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(Orders::Notes).text().null())
                        .col(ColumnDef::new(Orders::CreatedBy).uuid().null())
                        .col(
                            ColumnDef::new(Orders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_outlet")
                                .from(Orders::Table, Orders::OutletId)
                                .to(Outlets::Table, Outlets::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrderLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrderLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrderLines::OrderId).uuid().not_null())
                        .col(ColumnDef::new(OrderLines::ItemId).uuid().not_null())
                        .col(ColumnDef::new(OrderLines::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(OrderLines::UnitPrice)
                                .decimal_len(8, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrderLines::LineTotal)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrderLines::SpecialInstructions)
                                .text()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(OrderLines::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrderLines::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_lines_order")
                                .from(OrderLines::Table, OrderLines::OrderId)
                                .to(Orders::Table, Orders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_created_at")
                        .table(Orders::Table)
                        .col(Orders::CreatedAt)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_order_lines_order")
                        .table(OrderLines::Table)
                        .col(OrderLines::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Orders {
        Table,
        Id,
        OrderNumber,
        OutletId,
        GuestId,
        ReservationId,
        TableNumber,
        OrderType,
        Status,
        Subtotal,
        TaxAmount,
        ServiceCharge,
        DiscountAmount,
        TotalAmount,
        PaymentMethod,
        PaymentStatus,
        Notes,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum OrderLines {
        Table,
        Id,
        OrderId,
        ItemId,
        Quantity,
        UnitPrice,
        LineTotal,
        SpecialInstructions,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Outlets {
        Table,
        Id,
    }
}

mod m20250301_000007_create_payments_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000007_create_payments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Payments::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Payments::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Payments::OrderId).uuid().null())
                        .col(ColumnDef::new(Payments::ReservationId).uuid().null())
                        .col(
                            ColumnDef::new(Payments::Amount)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Payments::PaymentMethod)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Payments::PaymentType)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Payments::TransactionId)
                                .string_len(100)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Payments::Status)
                                .string_len(20)
                                .not_null()
                                .default("completed"),
                        )
                        .col(ColumnDef::new(Payments::ProcessedBy).uuid().null())
                        .col(
                            ColumnDef::new(Payments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Payments::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_payments_created_at")
                        .table(Payments::Table)
                        .col(Payments::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Payments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Payments {
        Table,
        Id,
        OrderId,
        ReservationId,
        Amount,
        PaymentMethod,
        PaymentType,
        TransactionId,
        Status,
        ProcessedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250301_000008_create_audit_logs_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000008_create_audit_logs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(AuditLogs::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AuditLogs::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AuditLogs::TableName)
                                .string_len(50)
                                .not_null(),
                        )
                        .col(ColumnDef::new(AuditLogs::RecordId).uuid().not_null())
                        .col(ColumnDef::new(AuditLogs::Action).string_len(10).not_null())
                        .col(ColumnDef::new(AuditLogs::OldValues).json().null())
                        .col(ColumnDef::new(AuditLogs::NewValues).json().null())
                        .col(ColumnDef::new(AuditLogs::ChangedBy).uuid().null())
                        .col(
                            ColumnDef::new(AuditLogs::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AuditLogs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum AuditLogs {
        Table,
        Id,
        TableName,
        RecordId,
        Action,
        OldValues,
        NewValues,
        ChangedBy,
        CreatedAt,
    }
}
