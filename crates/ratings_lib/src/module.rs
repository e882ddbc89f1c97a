//! This module contains anything related to modules and their instances in this library.

use entity::{module_instance_professors, module_instances, modules, professors};
use sea_orm::{
    ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _, ModelTrait as _,
    QueryFilter as _, QueryOrder as _, TransactionTrait,
};

use crate::error::{RatingsError, RatingsResult};
use crate::must;

/// Returns the optional module from the provided code.
pub async fn get_module_from_code<C: ConnectionTrait>(
    conn: &C,
    module_code: &str,
) -> RatingsResult<Option<modules::Model>> {
    let module = modules::Entity::find_by_id(module_code).one(conn).await?;
    Ok(module)
}

/// Returns all the modules, ordered by their code.
pub async fn get_all_modules<C: ConnectionTrait>(conn: &C) -> RatingsResult<Vec<modules::Model>> {
    let modules = modules::Entity::find()
        .order_by_asc(modules::Column::Code)
        .all(conn)
        .await?;
    Ok(modules)
}

/// Creates a new module with the provided code and name.
///
/// The code must not be taken by another module.
pub async fn insert_module<C: ConnectionTrait>(
    conn: &C,
    module_code: &str,
    name: &str,
) -> RatingsResult<modules::Model> {
    let module = modules::ActiveModel {
        code: Set(module_code.to_owned()),
        name: Set(name.to_owned()),
    };

    modules::Entity::insert(module)
        .exec(conn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                RatingsError::ModuleAlreadyExists(module_code.to_owned())
            }
            _ => e.into(),
        })?;

    Ok(modules::Model {
        code: module_code.to_owned(),
        name: name.to_owned(),
    })
}

/// Returns the optional instance of the module for the provided year and semester.
pub async fn get_instance<C: ConnectionTrait>(
    conn: &C,
    module_code: &str,
    year: i32,
    semester: u8,
) -> RatingsResult<Option<module_instances::Model>> {
    let instance = module_instances::Entity::find()
        .filter(module_instances::Column::ModuleCode.eq(module_code))
        .filter(module_instances::Column::Year.eq(year))
        .filter(module_instances::Column::Semester.eq(semester))
        .one(conn)
        .await?;
    Ok(instance)
}

/// Returns all the module instances with their module, ordered by module code,
/// then year and semester.
pub async fn get_all_instances<C: ConnectionTrait>(
    conn: &C,
) -> RatingsResult<Vec<(module_instances::Model, Option<modules::Model>)>> {
    let instances = module_instances::Entity::find()
        .find_also_related(modules::Entity)
        .order_by_asc(module_instances::Column::ModuleCode)
        .order_by_asc(module_instances::Column::Year)
        .order_by_asc(module_instances::Column::Semester)
        .all(conn)
        .await?;
    Ok(instances)
}

/// Returns the professors teaching the provided module instance, ordered by their ID.
pub async fn get_instance_professors<C: ConnectionTrait>(
    conn: &C,
    instance: &module_instances::Model,
) -> RatingsResult<Vec<professors::Model>> {
    let professors = instance
        .find_related(professors::Entity)
        .order_by_asc(professors::Column::Id)
        .all(conn)
        .await?;
    Ok(professors)
}

/// Creates a new instance of the provided module for the provided year and semester,
/// taught by the provided professors.
///
/// The module and the professors must already exist, and the module must not
/// already have an instance for this year and semester.
pub async fn insert_instance<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    module_code: &str,
    year: i32,
    semester: u8,
    professor_ids: &[String],
) -> RatingsResult<module_instances::Model> {
    let module = must::have_module(conn, module_code).await?;
    for professor_id in professor_ids {
        must::have_professor(conn, professor_id).await?;
    }

    let module_code = module.code;
    let professor_ids = professor_ids.to_vec();

    let instance = conn
        .transaction::<_, module_instances::Model, RatingsError>(move |txn| {
            Box::pin(async move {
                let instance = module_instances::ActiveModel {
                    module_code: Set(module_code.clone()),
                    year: Set(year),
                    semester: Set(semester),
                    ..Default::default()
                };

                let res = module_instances::Entity::insert(instance)
                    .exec(txn)
                    .await
                    .map_err(|e| match e.sql_err() {
                        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                            RatingsError::ModuleInstanceAlreadyExists(
                                module_code.clone(),
                                year,
                                semester,
                            )
                        }
                        _ => e.into(),
                    })?;

                if !professor_ids.is_empty() {
                    let links = professor_ids.into_iter().map(|professor_id| {
                        module_instance_professors::ActiveModel {
                            module_instance_id: Set(res.last_insert_id),
                            professor_id: Set(professor_id),
                        }
                    });
                    module_instance_professors::Entity::insert_many(links)
                        .exec(txn)
                        .await?;
                }

                Ok(module_instances::Model {
                    id: res.last_insert_id,
                    module_code,
                    year,
                    semester,
                })
            })
        })
        .await?;

    Ok(instance)
}
