pub mod exemplars;
pub mod turns;

use crate::shared::ClassifyError;
use exemplars::render_options;

pub use exemplars::{
    Exemplar, ExemplarOutput, EXEMPLARS, INTENT_OPTIONS, SENTIMENT_OPTIONS, TOPIC_OPTIONS,
};
pub use turns::{Prompt, PromptTurn, TurnRole};

pub const QUERY_HEADER: &str = "Customer Query:";
pub const QUERY_FOOTER: &str = "Return ONLY JSON:";

pub fn system_instructions() -> String {
    [
        "You are a highly accurate customer-support query classifier.".to_string(),
        "Your task is to classify the conversation into a short description, intent, topic, and sentiment.".to_string(),
        "IMPORTANT:".to_string(),
        "1. Use the **entire conversation** to determine intent and topic.".to_string(),
        "2. Determine sentiment **ONLY from the customer's messages**.".to_string(),
        "   - Positive: satisfaction, happiness, appreciation.".to_string(),
        "   - Neutral: questions, clarifications, factual statements.".to_string(),
        "   - Negative: frustration, anger, disappointment, urgency.".to_string(),
        "3. Completely ignore the agent's tone for sentiment.".to_string(),
        "4. Return a SINGLE JSON object **exactly** matching this schema:".to_string(),
        "   - categorization: short descriptive summary of the customer issue.".to_string(),
        format!("   - intent: one of {}", render_options(INTENT_OPTIONS)),
        format!("   - topic: one of {}", render_options(TOPIC_OPTIONS)),
        format!("   - sentiment: one of {}", render_options(SENTIMENT_OPTIONS)),
        "5. NO extra keys, NO explanations, NO commentary, ONLY JSON.".to_string(),
        "6. If unsure, make the best judgment based on customer words.".to_string(),
    ]
    .join("\n")
}

/// System turn, four exemplar user/assistant pairs, then the real query.
pub fn build_prompt(
    conversation_number: &str,
    aggregated_text: &str,
) -> Result<Prompt, ClassifyError> {
    if conversation_number.is_empty() || aggregated_text.is_empty() {
        return Err(ClassifyError::PromptInputMissing);
    }

    let mut turns = Vec::with_capacity(2 + EXEMPLARS.len() * 2);
    turns.push(PromptTurn::system(system_instructions()));
    for exemplar in &EXEMPLARS {
        turns.push(PromptTurn::user(exemplar.render_transcript()));
        turns.push(PromptTurn::assistant(exemplar.output.to_json()));
    }
    turns.push(PromptTurn::user(format!(
        "{QUERY_HEADER}\n{aggregated_text}\n{QUERY_FOOTER}"
    )));
    Ok(Prompt::new(turns))
}
