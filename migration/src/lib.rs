pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_user_tables;
mod m20240301_000002_create_catalog_tables;
mod m20240301_000003_create_commerce_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_user_tables::Migration),
            Box::new(m20240301_000002_create_catalog_tables::Migration),
            Box::new(m20240301_000003_create_commerce_tables::Migration),
        ]
    }
}

/// Audit columns shared by every table: creation/update stamps plus the
/// soft-delete flag that read queries filter on.
#[derive(DeriveIden)]
pub(crate) enum Audit {
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
    Deleted,
}

pub(crate) fn with_audit(mut table: TableCreateStatement) -> TableCreateStatement {
    table
        .col(
            ColumnDef::new(Audit::CreatedAt)
                .timestamp()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(ColumnDef::new(Audit::CreatedBy).string().not_null())
        .col(
            ColumnDef::new(Audit::UpdatedAt)
                .timestamp()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(ColumnDef::new(Audit::UpdatedBy).string().not_null())
        .col(
            ColumnDef::new(Audit::Deleted)
                .boolean()
                .not_null()
                .default(false),
        )
        .to_owned()
}
