use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MoneyRequests::Table)
                    .if_not_exists()
                    .col(pk_auto(MoneyRequests::Id))
                    .col(integer(MoneyRequests::UserId).not_null())
                    .col(string_len(MoneyRequests::Name, 100).not_null())
                    .col(string_len(MoneyRequests::TransactionId, 100).not_null())
                    .col(decimal_len(MoneyRequests::Amount, 12, 2).not_null())
                    .col(string_len(MoneyRequests::Upiid, 100).default(""))
                    .col(string_len(MoneyRequests::AccountNumber, 255).default(""))
                    .col(boolean(MoneyRequests::IsProRecharge).default(false))
                    .col(text(MoneyRequests::SecureUrl).not_null())
                    .col(string_len(MoneyRequests::PublicId, 255).not_null())
                    .col(string_len(MoneyRequests::Status, 20).default("PENDING"))
                    .col(timestamp(MoneyRequests::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(MoneyRequests::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_money_requests_user_id")
                            .from(MoneyRequests::Table, MoneyRequests::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Pending-queue scans filter on status and page by id.
        manager
            .create_index(
                Index::create()
                    .name("idx_money_requests_status_id")
                    .table(MoneyRequests::Table)
                    .col(MoneyRequests::Status)
                    .col(MoneyRequests::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MoneyRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MoneyRequests {
    Table,
    Id,
    UserId,
    Name,
    TransactionId,
    Amount,
    Upiid,
    AccountNumber,
    IsProRecharge,
    SecureUrl,
    PublicId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
