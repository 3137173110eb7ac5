// `MigrationTrait` declares `&SchemaManager` with an elided lifetime, so the
// impls must match it exactly (E0195); spelling `<'_>` here does not compile.
#![allow(elided_lifetimes_in_paths)]

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_personnel_records_table::Migration),
            Box::new(m20260801_000002_create_stock_items_table::Migration),
            Box::new(m20260801_000003_create_ledger_items_table::Migration),
        ]
    }
}

mod m20260801_000001_create_personnel_records_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260801_000001_create_personnel_records_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PersonnelRecords::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PersonnelRecords::Id)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PersonnelRecords::Name).string().not_null())
                        .col(
                            ColumnDef::new(PersonnelRecords::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PersonnelRecords::Category)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PersonnelRecords::Size).string().null())
                        .col(ColumnDef::new(PersonnelRecords::Ranks).string().null())
                        .col(ColumnDef::new(PersonnelRecords::Ribbons).integer().null())
                        .col(
                            ColumnDef::new(PersonnelRecords::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PersonnelRecords::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Group list endpoints filter on category
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_personnel_records_category")
                        .table(PersonnelRecords::Table)
                        .col(PersonnelRecords::Category)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_personnel_records_name")
                        .table(PersonnelRecords::Table)
                        .col(PersonnelRecords::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PersonnelRecords::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum PersonnelRecords {
        Table,
        Id,
        Name,
        Quantity,
        Category,
        Size,
        Ranks,
        Ribbons,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20260801_000002_create_stock_items_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260801_000002_create_stock_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StockItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockItems::Id)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockItems::Name).string().not_null())
                        .col(ColumnDef::new(StockItems::Quantity).integer().not_null())
                        .col(ColumnDef::new(StockItems::Category).string().not_null())
                        .col(ColumnDef::new(StockItems::Size).string().not_null())
                        .col(ColumnDef::new(StockItems::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(StockItems::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            // Stock page fetches one family at a time
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_stock_items_category")
                        .table(StockItems::Table)
                        .col(StockItems::Category)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum StockItems {
        Table,
        Id,
        Name,
        Quantity,
        Category,
        Size,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20260801_000003_create_ledger_items_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260801_000003_create_ledger_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(LedgerItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(LedgerItems::Id)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(LedgerItems::Name).string().not_null())
                        .col(ColumnDef::new(LedgerItems::Category).string().not_null())
                        .col(
                            ColumnDef::new(LedgerItems::Size)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(ColumnDef::new(LedgerItems::Quantity).integer().not_null())
                        .col(ColumnDef::new(LedgerItems::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(LedgerItems::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            // The upsert-increment contract resolves insert races through
            // this key
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_ledger_items_key")
                        .table(LedgerItems::Table)
                        .col(LedgerItems::Name)
                        .col(LedgerItems::Category)
                        .col(LedgerItems::Size)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(LedgerItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum LedgerItems {
        Table,
        Id,
        Name,
        Category,
        Size,
        Quantity,
        CreatedAt,
        UpdatedAt,
    }
}
