use sea_orm::EntityTrait;
use sea_orm_migration::{prelude::*, sea_orm::Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_database_backend();
        let schema = Schema::new(db);

        create_entity_table(manager, &schema, entity::users::Entity).await?;
        create_entity_table(manager, &schema, entity::auth_tokens::Entity).await?;
        create_entity_table(manager, &schema, entity::professors::Entity).await?;
        create_entity_table(manager, &schema, entity::modules::Entity).await?;
        create_entity_table(manager, &schema, entity::module_instances::Entity).await?;
        create_entity_table(manager, &schema, entity::module_instance_professors::Entity).await?;
        create_entity_table(manager, &schema, entity::ratings::Entity).await?;

        // At most one instance of a module per year and semester.
        manager
            .create_index(
                Index::create()
                    .name("idx_module_instances_offering")
                    .table(Alias::new("module_instances"))
                    .col(entity::module_instances::Column::ModuleCode)
                    .col(entity::module_instances::Column::Year)
                    .col(entity::module_instances::Column::Semester)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // At most one rating per (user, professor, module instance) triple.
        // The rating submission relies on this index for its conflict handling.
        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_user_professor_instance")
                    .table(Alias::new("ratings"))
                    .col(entity::ratings::Column::UserId)
                    .col(entity::ratings::Column::ProfessorId)
                    .col(entity::ratings::Column::ModuleInstanceId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_database_backend();
        let schema = Schema::new(db);

        drop_entity_table(manager, &schema, entity::ratings::Entity).await?;
        drop_entity_table(manager, &schema, entity::module_instance_professors::Entity).await?;
        drop_entity_table(manager, &schema, entity::module_instances::Entity).await?;
        drop_entity_table(manager, &schema, entity::modules::Entity).await?;
        drop_entity_table(manager, &schema, entity::professors::Entity).await?;
        drop_entity_table(manager, &schema, entity::auth_tokens::Entity).await?;
        drop_entity_table(manager, &schema, entity::users::Entity).await?;

        Ok(())
    }
}

async fn create_entity_table<'a, E: EntityTrait>(
    manager: &'a SchemaManager<'a>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(schema.create_table_from_entity(entity))
        .await
}

async fn drop_entity_table<'a, E: EntityTrait>(
    manager: &'a SchemaManager<'a>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .drop_table(
            Table::drop()
                .table(
                    schema
                        .create_table_from_entity(entity)
                        .get_table_name()
                        .cloned()
                        .unwrap(),
                )
                .take(),
        )
        .await
}
