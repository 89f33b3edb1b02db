use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::Question,
    server::app::AppState,
    service::{
        categories::{self, CategoryMap},
        questions,
    },
};

use super::ApiResponse;

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: CategoryMap,
    total_categories: usize,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesBody> {
    let listing = categories::list_categories(&pool).await?;
    Ok(Json(CategoriesBody {
        success: true,
        categories: listing.categories,
        total_categories: listing.total_categories,
    }))
}

async fn get_category_questions(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<CategoryQuestionsBody> {
    let Path(id) = id?;
    let listing = questions::list_by_category(&pool, id).await?;
    Ok(Json(CategoryQuestionsBody {
        success: true,
        questions: listing.questions,
        total_questions: listing.total_questions,
        current_category: listing.current_category,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
        .with_state(state)
}
