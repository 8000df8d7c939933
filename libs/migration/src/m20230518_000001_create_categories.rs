use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(string(Categories::Id).primary_key())
                    .col(string_null(Categories::ParentId))
                    .col(string_len(Categories::Label, 128))
                    .to_owned(),
            )
            .await?;

        // Store-level backstop for the service-level duplicate-label check
        manager
            .create_index(
                Index::create()
                    .name("idx_categories_label_unique")
                    .table(Categories::Table)
                    .col(Categories::Label)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Tree traversal reads children by parent_id
        manager
            .create_index(
                Index::create()
                    .name("idx_categories_parent_id")
                    .table(Categories::Table)
                    .col(Categories::ParentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    ParentId,
    Label,
}
