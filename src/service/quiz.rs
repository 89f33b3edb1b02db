use std::collections::BTreeSet;

use sqlx::SqlitePool;

use crate::db::{queries::questions, Question};
use crate::telemetry::QUIZ_DRAWS;

use super::ServiceResult;

/// Draws the next quiz question: uniformly random among the questions of
/// `category` (every category when `None`) whose ids are not in `previous`.
///
/// `Ok(None)` means the quiz is over, including for an unknown category.
pub async fn next_question(
    pool: &SqlitePool,
    category: Option<i64>,
    previous: &BTreeSet<i64>,
) -> ServiceResult<Option<Question>> {
    let exclude: Vec<i64> = previous.iter().copied().collect();
    let question = questions::get_random_question(pool, category, &exclude).await?;
    match &question {
        Some(q) => {
            QUIZ_DRAWS.with_label_values(&["question"]).inc();
            tracing::debug!("Drew question {} for category {:?}", q.id, category);
        }
        None => {
            QUIZ_DRAWS.with_label_values(&["finished"]).inc();
            tracing::debug!("No questions left for category {:?}", category);
        }
    }
    Ok(question)
}
