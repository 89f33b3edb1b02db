use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::Question,
    pagination::Page,
    server::{
        app::{AppState, QuestionsPerPage},
        error::ApiError,
    },
    service::{
        categories::CategoryMap,
        questions::{self, QuestionDraft},
    },
};

use super::ApiResponse;

#[derive(Deserialize)]
struct PageQuery {
    page: Option<u64>,
}

// the frontend form posts category and difficulty as strings
#[derive(Deserialize)]
struct NewQuestion {
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", default)]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<i64>,
    categories: CategoryMap,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<i64>,
}

async fn questions_page(
    State(pool): State<SqlitePool>,
    State(QuestionsPerPage(per_page)): State<QuestionsPerPage>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<QuestionsPage> {
    let Query(PageQuery { page }) = query?;
    let page = Page::new(page.unwrap_or(1), per_page).ok_or(ApiError::BadRequest)?;
    let listing = questions::list_page(&pool, page).await?;
    Ok(Json(QuestionsPage {
        success: true,
        current_category: listing.questions.first().map(|q| q.category),
        questions: listing.questions,
        total_questions: listing.total_questions,
        categories: listing.categories,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    State(QuestionsPerPage(per_page)): State<QuestionsPerPage>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Deleted> {
    let Path(id) = id?;
    let deleted = questions::delete_question(&pool, id, per_page).await?;
    Ok(Json(Deleted {
        success: true,
        deleted: deleted.deleted,
        questions: deleted.questions,
        total_questions: deleted.total_questions,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    State(QuestionsPerPage(per_page)): State<QuestionsPerPage>,
    body: Result<Json<NewQuestion>, JsonRejection>,
) -> ApiResponse<Created> {
    let Json(new_question) = body?;
    let draft = QuestionDraft {
        question: new_question.question,
        answer: new_question.answer,
        category: new_question.category,
        difficulty: new_question.difficulty,
    };
    let created = questions::create_question(&pool, draft, per_page).await?;
    Ok(Json(Created {
        success: true,
        created: created.created,
        questions: created.questions,
        total_questions: created.total_questions,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<SearchResults> {
    let Json(SearchBody { search_term }) = body?;
    let results = questions::search(&pool, &search_term).await?;
    Ok(Json(SearchResults {
        success: true,
        questions: results.questions,
        total_questions: results.total_questions,
        current_category: results.current_category,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(questions_page).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/searches", post(search_questions))
        .with_state(state)
}
