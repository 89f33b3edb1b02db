use std::ops::RangeInclusive;

use sqlx::SqlitePool;

use crate::db::{queries::questions, NewQuestion, Question};
use crate::pagination::Page;
use crate::telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED};

use super::categories::{self, CategoryMap};
use super::{ServiceError, ServiceResult};

pub const DIFFICULTY: RangeInclusive<i64> = 1..=5;

pub struct QuestionListing {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
}

pub struct DeletedQuestion {
    pub deleted: i64,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

pub struct CreatedQuestion {
    pub created: i64,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<i64>,
}

pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: i64,
}

/// Question fields as submitted, before validation.
#[derive(Debug, Default, Clone)]
pub struct QuestionDraft {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i64>,
    pub difficulty: Option<i64>,
}

impl QuestionDraft {
    fn validate(self) -> ServiceResult<NewQuestion> {
        let question = required_text("question", self.question)?;
        let answer = required_text("answer", self.answer)?;
        let category = self
            .category
            .ok_or_else(|| ServiceError::Unprocessable("category is required".to_owned()))?;
        let difficulty = self
            .difficulty
            .ok_or_else(|| ServiceError::Unprocessable("difficulty is required".to_owned()))?;
        if !DIFFICULTY.contains(&difficulty) {
            return Err(ServiceError::Unprocessable(format!(
                "difficulty {difficulty} is outside {}..={}",
                DIFFICULTY.start(),
                DIFFICULTY.end()
            )));
        }
        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

fn required_text(field: &str, value: Option<String>) -> ServiceResult<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ServiceError::Unprocessable(format!("{field} is required"))),
    }
}

async fn first_page(pool: &SqlitePool, page_size: u32) -> ServiceResult<(Vec<Question>, usize)> {
    let all = questions::get_all_questions(pool).await?;
    let page = Page::first(page_size).slice(&all).to_vec();
    Ok((page, all.len()))
}

pub async fn list_page(pool: &SqlitePool, page: Page) -> ServiceResult<QuestionListing> {
    let all = questions::get_all_questions(pool).await?;
    let questions = page.slice(&all).to_vec();
    tracing::debug!(
        "Page {} of size {} holds {} of {} questions",
        page.number(),
        page.size(),
        questions.len(),
        all.len()
    );
    Ok(QuestionListing {
        questions,
        total_questions: all.len(),
        categories: categories::list_categories(pool).await?.categories,
    })
}

pub async fn delete_question(
    pool: &SqlitePool,
    id: i64,
    page_size: u32,
) -> ServiceResult<DeletedQuestion> {
    if questions::delete_question(pool, id).await? == 0 {
        return Err(ServiceError::NotFound);
    }
    QUESTIONS_DELETED.inc();
    tracing::info!("Deleted question {id}");

    let (questions, total_questions) = first_page(pool, page_size).await?;
    Ok(DeletedQuestion {
        deleted: id,
        questions,
        total_questions,
    })
}

pub async fn create_question(
    pool: &SqlitePool,
    draft: QuestionDraft,
    page_size: u32,
) -> ServiceResult<CreatedQuestion> {
    let new_question = draft.validate()?;
    if let Err(err) = categories::get_category(pool, new_question.category).await {
        return Err(match err {
            ServiceError::NotFound => ServiceError::Unprocessable(format!(
                "category {} does not exist",
                new_question.category
            )),
            err => err,
        });
    }

    let created = questions::create_question(pool, &new_question).await?;
    QUESTIONS_CREATED.inc();
    tracing::info!("Created question {created}");

    let (questions, total_questions) = first_page(pool, page_size).await?;
    Ok(CreatedQuestion {
        created,
        questions,
        total_questions,
    })
}

pub async fn search(pool: &SqlitePool, term: &str) -> ServiceResult<SearchResults> {
    if term.trim().is_empty() {
        return Err(ServiceError::Unprocessable(
            "search term is required".to_owned(),
        ));
    }
    let questions = questions::search_questions(pool, term).await?;
    Ok(SearchResults {
        total_questions: questions.len(),
        current_category: questions.first().map(|q| q.category),
        questions,
    })
}

pub async fn list_by_category(
    pool: &SqlitePool,
    category_id: i64,
) -> ServiceResult<CategoryQuestions> {
    let category = categories::get_category(pool, category_id).await?;
    let questions = questions::get_questions_for_category(pool, category.id).await?;
    Ok(CategoryQuestions {
        total_questions: questions.len(),
        questions,
        current_category: category.id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn draft(question: &str, category: i64, difficulty: i64) -> QuestionDraft {
        QuestionDraft {
            question: Some(question.to_owned()),
            answer: Some("A".to_owned()),
            category: Some(category),
            difficulty: Some(difficulty),
        }
    }

    async fn seed(pool: &SqlitePool, count: usize) -> Vec<i64> {
        let mut ids = Vec::new();
        for n in 0..count {
            let created = create_question(pool, draft(&format!("Question {n}"), 1, 1), 10)
                .await
                .unwrap();
            ids.push(created.created);
        }
        ids
    }

    #[tokio::test]
    async fn pages_partition_all_questions() {
        let pool = test_pool().await;
        seed(&pool, 23).await;

        let mut sizes = Vec::new();
        for number in 1..=4 {
            let listing = list_page(&pool, Page::new(number, 10).unwrap())
                .await
                .unwrap();
            assert_eq!(listing.total_questions, 23);
            assert_eq!(listing.categories.len(), 6);
            sizes.push(listing.questions.len());
        }
        assert_eq!(sizes, [10, 10, 3, 0]);
    }

    #[tokio::test]
    async fn pages_are_ordered_by_id() {
        let pool = test_pool().await;
        let ids = seed(&pool, 12).await;
        let listing = list_page(&pool, Page::new(2, 10).unwrap()).await.unwrap();
        let page_ids: Vec<i64> = listing.questions.iter().map(|q| q.id).collect();
        assert_eq!(page_ids, ids[10..]);
    }

    #[tokio::test]
    async fn create_increments_total_and_is_listed_by_category() {
        let pool = test_pool().await;
        seed(&pool, 3).await;

        let created = create_question(&pool, draft("Q", 2, 2), 10).await.unwrap();
        assert_eq!(created.total_questions, 4);

        let by_category = list_by_category(&pool, 2).await.unwrap();
        assert_eq!(by_category.current_category, 2);
        assert_eq!(by_category.total_questions, 1);
        assert_eq!(by_category.questions[0].id, created.created);
    }

    #[tokio::test]
    async fn create_rejects_invalid_drafts() {
        let pool = test_pool().await;
        let invalid = [
            QuestionDraft::default(),
            QuestionDraft {
                question: Some("   ".to_owned()),
                ..draft("Q", 1, 1)
            },
            QuestionDraft {
                answer: None,
                ..draft("Q", 1, 1)
            },
            draft("Q", 1, 0),
            draft("Q", 1, 6),
            draft("Q", 1000, 1),
        ];
        for draft in invalid {
            assert!(matches!(
                create_question(&pool, draft, 10).await,
                Err(ServiceError::Unprocessable(_))
            ));
        }
        assert!(questions::get_all_questions(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let pool = test_pool().await;
        let ids = seed(&pool, 2).await;

        let deleted = delete_question(&pool, ids[0], 10).await.unwrap();
        assert_eq!(deleted.deleted, ids[0]);
        assert_eq!(deleted.total_questions, 1);
        assert!(deleted.questions.iter().all(|q| q.id != ids[0]));

        assert!(matches!(
            delete_question(&pool, ids[0], 10).await,
            Err(ServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn search_matches_substrings_case_insensitively() {
        let pool = test_pool().await;
        create_question(
            &pool,
            draft("What boxer's original name is Cassius Clay?", 4, 1),
            10,
        )
        .await
        .unwrap();
        create_question(&pool, draft("Whose autobiography is entitled?", 5, 2), 10)
            .await
            .unwrap();

        let results = search(&pool, "name").await.unwrap();
        assert_eq!(results.total_questions, 1);
        assert_eq!(results.current_category, Some(4));

        let results = search(&pool, "WHO").await.unwrap();
        assert_eq!(results.total_questions, 1);
        assert_eq!(results.current_category, Some(5));

        let results = search(&pool, "xxx").await.unwrap();
        assert!(results.questions.is_empty());
        assert_eq!(results.current_category, None);
    }

    #[tokio::test]
    async fn blank_search_term_is_unprocessable() {
        let pool = test_pool().await;
        assert!(matches!(
            search(&pool, "").await,
            Err(ServiceError::Unprocessable(_))
        ));
    }

    #[tokio::test]
    async fn category_listing_distinguishes_unknown_from_empty() {
        let pool = test_pool().await;
        assert!(matches!(
            list_by_category(&pool, 1000).await,
            Err(ServiceError::NotFound)
        ));
        let empty = list_by_category(&pool, 3).await.unwrap();
        assert!(empty.questions.is_empty());
        assert_eq!(empty.current_category, 3);
    }
}
