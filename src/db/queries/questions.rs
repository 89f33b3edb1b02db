use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// A question that passed validation and is ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE questions.category = ?1
        ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Questions whose text contains `term`, ignoring case (Unicode-aware), in id order.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let needle = term.to_lowercase();
    let questions = get_all_questions(pool).await?;
    Ok(questions
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .collect())
}

/// Picks one question uniformly at random, optionally restricted to a
/// category, skipping every id in `exclude`.
pub async fn get_random_question(
    pool: &SqlitePool,
    category: Option<i64>,
    exclude: &[i64],
) -> sqlx::Result<Option<Question>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, question, answer, category, difficulty FROM questions WHERE 1 = 1",
    );
    if let Some(category) = category {
        query.push(" AND category = ").push_bind(category);
    }
    if !exclude.is_empty() {
        query.push(" AND id NOT IN (");
        let mut ids = query.separated(", ");
        for id in exclude {
            ids.push_bind(*id);
        }
        ids.push_unseparated(")");
    }
    query.push(" ORDER BY RANDOM() LIMIT 1");

    query
        .build_query_as::<Question>()
        .fetch_optional(pool)
        .await
}

pub async fn create_question(pool: &SqlitePool, question: &NewQuestion) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&question.question)
    .bind(&question.answer)
    .bind(question.category)
    .bind(question.difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Returns the number of deleted rows, zero when the id did not exist.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let deleted = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(deleted)
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                category = excluded.category,
                difficulty = excluded.difficulty
            "#,
        )
        .bind(question.id)
        .bind(question.question)
        .bind(question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn new_question(question: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: question.to_owned(),
            answer: "answer".to_owned(),
            category,
            difficulty: 1,
        }
    }

    #[tokio::test]
    async fn created_question_can_be_read_back() {
        let pool = test_pool().await;
        let id = create_question(&pool, &new_question("Who?", 4)).await.unwrap();

        let questions = get_questions_for_category(&pool, 4).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, id);
        assert_eq!(questions[0].question, "Who?");
    }

    #[tokio::test]
    async fn delete_reports_affected_rows() {
        let pool = test_pool().await;
        let id = create_question(&pool, &new_question("Who?", 4)).await.unwrap();

        assert_eq!(delete_question(&pool, id).await.unwrap(), 1);
        assert_eq!(delete_question(&pool, id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn search_ignores_case_and_matches_literally() {
        let pool = test_pool().await;
        create_question(
            &pool,
            &new_question("What boxer's original name is Cassius Clay?", 6),
        )
        .await
        .unwrap();
        create_question(&pool, &new_question("100% of what?", 1))
            .await
            .unwrap();

        let found = search_questions(&pool, "NAME").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, 6);

        let found = search_questions(&pool, "%").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "100% of what?");

        assert!(search_questions(&pool, "_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let pool = test_pool().await;
        let id = create_question(&pool, &new_question("Who painted ÉTOILE?", 2))
            .await
            .unwrap();
        create_question(&pool, &new_question("Où est la gare?", 3))
            .await
            .unwrap();

        let found = search_questions(&pool, "étoile").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);

        let found = search_questions(&pool, "OÙ").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, 3);
    }

    #[tokio::test]
    async fn random_question_respects_category_and_exclusions() {
        let pool = test_pool().await;
        let first = create_question(&pool, &new_question("a", 1)).await.unwrap();
        let second = create_question(&pool, &new_question("b", 1)).await.unwrap();
        create_question(&pool, &new_question("c", 2)).await.unwrap();

        for _ in 0..10 {
            let picked = get_random_question(&pool, Some(1), &[first])
                .await
                .unwrap()
                .unwrap();
            assert_eq!(picked.id, second);
        }
        let none = get_random_question(&pool, Some(1), &[first, second])
            .await
            .unwrap();
        assert!(none.is_none());
        assert!(get_random_question(&pool, None, &[])
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn foreign_key_rejects_unknown_category() {
        let pool = test_pool().await;
        assert!(create_question(&pool, &new_question("orphan", 1000))
            .await
            .is_err());
    }
}
