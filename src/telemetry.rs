use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUESTIONS_CREATED: IntCounter = register_int_counter!(
        "trivia_questions_created_total",
        "Number of created questions"
    )
    .unwrap();
    pub static ref QUESTIONS_DELETED: IntCounter = register_int_counter!(
        "trivia_questions_deleted_total",
        "Number of deleted questions"
    )
    .unwrap();
    pub static ref QUIZ_DRAWS: IntCounterVec = register_int_counter_vec!(
        "trivia_quiz_draws_total",
        "Number of quiz draws by outcome",
        &["outcome"]
    )
    .unwrap();
}

/// Span lifecycle events for the fmt layer, from the `INCLUDE_SPAN_EVENTS` value.
fn span_events(setting: Option<&str>) -> FmtSpan {
    match setting.map(str::trim) {
        Some(value) if value.eq_ignore_ascii_case("true") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::NONE,
    }
}

/// Installs the global subscriber. `LOG_LEVEL` holds `EnvFilter` directives;
/// unparsable directives are skipped and everything else logs at `info`.
pub fn init_tracing() {
    let span_setting = std::env::var("INCLUDE_SPAN_EVENTS").ok();
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("LOG_LEVEL")
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_span_events(span_events(span_setting.as_deref()))
                .with_filter(filter),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_events_follow_setting() {
        assert_eq!(span_events(Some("true")), FmtSpan::ENTER | FmtSpan::EXIT);
        assert_eq!(span_events(Some(" TRUE ")), FmtSpan::ENTER | FmtSpan::EXIT);
        assert_eq!(span_events(Some("1")), FmtSpan::NONE);
        assert_eq!(span_events(None), FmtSpan::NONE);
    }

    #[test]
    fn counters_are_registered() {
        QUESTIONS_CREATED.inc_by(0);
        QUIZ_DRAWS.with_label_values(&["finished"]).inc_by(0);

        let exposition = prometheus::TextEncoder::new()
            .encode_to_string(&prometheus::gather())
            .unwrap();
        assert!(exposition.contains("trivia_questions_created_total"));
        assert!(exposition.contains("trivia_quiz_draws_total"));
    }
}
