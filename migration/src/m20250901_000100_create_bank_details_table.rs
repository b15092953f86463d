use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BankDetails::Table)
                    .if_not_exists()
                    .col(pk_auto(BankDetails::Id))
                    .col(integer(BankDetails::UserId).not_null().unique_key())
                    .col(string_len(BankDetails::Upiid, 100).not_null())
                    .col(string_len(BankDetails::AccountDetails, 255).not_null())
                    .col(string_len(BankDetails::PublicId, 255).default(""))
                    .col(text(BankDetails::SecureUrl).default(""))
                    .col(timestamp(BankDetails::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(BankDetails::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bank_details_user_id")
                            .from(BankDetails::Table, BankDetails::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BankDetails::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BankDetails {
    Table,
    Id,
    UserId,
    Upiid,
    AccountDetails,
    PublicId,
    SecureUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
