use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_leads_table::Migration)]
    }
}

// Migration implementations

mod m20240101_000001_create_leads_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_leads_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Create leads table aligned with entities::lead Model
            manager
                .create_table(
                    Table::create()
                        .table(Leads::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Leads::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Leads::Email)
                                .string_len(120)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Leads::Name).string_len(100).null())
                        .col(ColumnDef::new(Leads::Company).string_len(100).null())
                        .col(ColumnDef::new(Leads::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            // Duplicate emails are rejected by this constraint, not by an
            // application-level existence check.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_leads_email_unique")
                        .table(Leads::Table)
                        .col(Leads::Email)
                        .unique()
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Leads::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Leads {
        Table,
        Id,
        Email,
        Name,
        Company,
        CreatedAt,
    }
}
