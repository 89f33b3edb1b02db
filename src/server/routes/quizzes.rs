use std::collections::BTreeSet;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::Question,
    server::{
        app::AppState,
        deserializers::{deserialize_quiz_category, QuestionRef},
    },
    service::quiz,
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizBody {
    #[serde(default, deserialize_with = "deserialize_quiz_category")]
    quiz_category: Option<i64>,
    #[serde(default)]
    previous_questions: Vec<QuestionRef>,
}

#[derive(Serialize)]
struct NextQuestion {
    success: bool,
    question: Option<Question>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizBody>, JsonRejection>,
) -> ApiResponse<NextQuestion> {
    let Json(body) = body?;
    let previous: BTreeSet<i64> = body.previous_questions.iter().map(QuestionRef::id).collect();
    let question = quiz::next_question(&pool, body.quiz_category, &previous).await?;
    Ok(Json(NextQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
