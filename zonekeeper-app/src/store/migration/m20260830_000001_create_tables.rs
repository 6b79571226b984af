use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(User::ChatId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::Username).string().null())
                    .col(ColumnDef::new(User::FirstName).string().null())
                    .col(ColumnDef::new(User::LastName).string().null())
                    .col(ColumnDef::new(User::CreatedAt).string().not_null())
                    .col(ColumnDef::new(User::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProviderAccount::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProviderAccount::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProviderAccount::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProviderAccount::Email).string().not_null())
                    .col(ColumnDef::new(ProviderAccount::ApiKey).string().not_null())
                    .col(
                        ColumnDef::new(ProviderAccount::AccountId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProviderAccount::ZoneId).string().not_null())
                    .col(
                        ColumnDef::new(ProviderAccount::ZoneName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProviderAccount::CreatedAt)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProviderAccount::UpdatedAt)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_provider_accounts_user")
                            .from(ProviderAccount::Table, ProviderAccount::UserId)
                            .to(User::Table, User::ChatId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One account per zone per user.
        manager
            .create_index(
                Index::create()
                    .name("idx_provider_accounts_user_zone")
                    .table(ProviderAccount::Table)
                    .col(ProviderAccount::UserId)
                    .col(ProviderAccount::ZoneId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProviderAccount::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    ChatId,
    Username,
    FirstName,
    LastName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProviderAccount {
    #[sea_orm(iden = "provider_accounts")]
    Table,
    Id,
    UserId,
    Email,
    ApiKey,
    AccountId,
    ZoneId,
    ZoneName,
    CreatedAt,
    UpdatedAt,
}
