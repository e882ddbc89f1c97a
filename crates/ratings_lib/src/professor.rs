//! This module contains anything related to professors in this library,
//! including the average rating computations.

use entity::{module_instances, professors, ratings};
use sea_orm::{
    ActiveValue::Set, ColumnTrait as _, ConnectionTrait, EntityTrait as _, JoinType,
    QueryFilter as _, QueryOrder as _, QuerySelect as _, RelationTrait as _,
};

use crate::error::{RatingsError, RatingsResult};

/// Returns the optional professor from the provided ID.
pub async fn get_professor_from_id<C: ConnectionTrait>(
    conn: &C,
    professor_id: &str,
) -> RatingsResult<Option<professors::Model>> {
    let professor = professors::Entity::find_by_id(professor_id).one(conn).await?;
    Ok(professor)
}

/// Returns all the professors, ordered by their ID.
pub async fn get_all_professors<C: ConnectionTrait>(
    conn: &C,
) -> RatingsResult<Vec<professors::Model>> {
    let professors = professors::Entity::find()
        .order_by_asc(professors::Column::Id)
        .all(conn)
        .await?;
    Ok(professors)
}

/// Creates a new professor with the provided ID and name.
///
/// The ID must not be taken by another professor.
pub async fn insert_professor<C: ConnectionTrait>(
    conn: &C,
    professor_id: &str,
    name: &str,
) -> RatingsResult<professors::Model> {
    let professor = professors::ActiveModel {
        id: Set(professor_id.to_owned()),
        name: Set(name.to_owned()),
    };

    professors::Entity::insert(professor)
        .exec(conn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                RatingsError::ProfessorAlreadyExists(professor_id.to_owned())
            }
            _ => e.into(),
        })?;

    Ok(professors::Model {
        id: professor_id.to_owned(),
        name: name.to_owned(),
    })
}

/// Computes the rounded mean of the provided scores.
///
/// Returns `None` when there is no score. Ties round up, so a mean of 3.5
/// shows as 4 stars.
pub fn rounded_mean(scores: &[u8]) -> Option<u8> {
    if scores.is_empty() {
        return None;
    }
    let sum = scores.iter().map(|s| u32::from(*s)).sum::<u32>();
    let mean = f64::from(sum) / scores.len() as f64;
    Some((mean + 0.5).floor() as u8)
}

/// Returns the rounded average rating of the professor, across every module instance.
///
/// A professor with no rating has an average of 0.
pub async fn get_average_rating<C: ConnectionTrait>(
    conn: &C,
    professor_id: &str,
) -> RatingsResult<u8> {
    let scores: Vec<u8> = ratings::Entity::find()
        .filter(ratings::Column::ProfessorId.eq(professor_id))
        .select_only()
        .column(ratings::Column::Score)
        .into_tuple()
        .all(conn)
        .await?;

    Ok(rounded_mean(&scores).unwrap_or(0))
}

/// Returns the rounded average rating of the professor, restricted to the instances
/// of the provided module.
///
/// Returns `None` when no rating exists for this pair. This is distinct from
/// an unknown professor or module, which the caller checks beforehand.
pub async fn get_module_average_rating<C: ConnectionTrait>(
    conn: &C,
    professor_id: &str,
    module_code: &str,
) -> RatingsResult<Option<u8>> {
    let scores: Vec<u8> = ratings::Entity::find()
        .filter(ratings::Column::ProfessorId.eq(professor_id))
        .join(JoinType::InnerJoin, ratings::Relation::ModuleInstances.def())
        .filter(module_instances::Column::ModuleCode.eq(module_code))
        .select_only()
        .column(ratings::Column::Score)
        .into_tuple()
        .all(conn)
        .await?;

    Ok(rounded_mean(&scores))
}

#[cfg(test)]
mod tests {
    use super::rounded_mean;

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(rounded_mean(&[]), None);
    }

    #[test]
    fn mean_of_single_score_is_itself() {
        assert_eq!(rounded_mean(&[3]), Some(3));
    }

    #[test]
    fn mean_rounds_down_below_half() {
        // mean(3, 4, 5, 1) = 3.25
        assert_eq!(rounded_mean(&[3, 4, 5, 1]), Some(3));
    }

    #[test]
    fn exact_mean_is_kept() {
        // mean(3, 4, 5) = 4
        assert_eq!(rounded_mean(&[3, 4, 5]), Some(4));
    }

    #[test]
    fn ties_round_up() {
        // mean(3, 4) = 3.5
        assert_eq!(rounded_mean(&[3, 4]), Some(4));
        // mean(4, 5) = 4.5
        assert_eq!(rounded_mean(&[4, 5]), Some(5));
    }

    #[test]
    fn mean_rounds_up_above_half() {
        // mean(4, 5, 5) ≈ 4.67
        assert_eq!(rounded_mean(&[4, 5, 5]), Some(5));
    }
}
