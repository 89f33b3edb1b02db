use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_number_from_string;

// the quiz frontend sends back whole question objects as previously asked
// questions, older clients only send their ids
#[derive(Deserialize)]
#[serde(untagged)]
pub enum QuestionRef {
    Id(i64),
    Question { id: i64 },
}

impl QuestionRef {
    pub fn id(&self) -> i64 {
        match self {
            QuestionRef::Id(id) | QuestionRef::Question { id } => *id,
        }
    }
}

#[derive(Deserialize)]
pub struct QuizCategory {
    // category ids come from JSON object keys on the frontend, so they arrive as strings
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub id: i64,
}

/// `null`, a missing category and id 0 all mean "every category".
pub fn deserialize_quiz_category<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let category = Option::<QuizCategory>::deserialize(deserializer)?;
    Ok(category.map(|c| c.id).filter(|id| *id != 0))
}
