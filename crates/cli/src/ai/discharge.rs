//! Discharge note generation from consultation data

use discharge_core::{ConsultationData, DischargeError, DischargeNote, clean_note};

use super::client::CompletionClient;

pub const SYSTEM_PROMPT: &str = "You are a compassionate and professional veterinary assistant tasked with understanding and writing a discharge note for a pet owner.";

const GUIDELINES: &str = r#"You are a compassionate and professional veterinary assistant tasked with understanding and writing a discharge note for a pet owner. The note should be based entirely on the consultation data provided below.

Please follow these guidelines:
1. Begin with a warm greeting, and end with a thoughtful closing, signed as "The Veterinary Team".
2. Include **all relevant information** from the consultation data to keep the owner fully informed.
3. Use a **friendly, clear, and professional tone** throughout the message.
4. If some information is missing from the data, simply omit it, do not guess or invent.
5. **Do not** use any placeholders like [text] or [xx].
6. Output **only** the discharge note, **do not add explanations or extra comments.**"#;

/// Build the user message embedding the consultation record
pub fn build_prompt(data: &ConsultationData) -> Result<String, DischargeError> {
    Ok(format!(
        "{GUIDELINES}\n\nConsultation Data:\n{}\n\nGenerate only the final discharge note.",
        data.to_pretty_json()?
    ))
}

/// Ask the model for a discharge note and clean up its answer
pub async fn generate_discharge_note<C: CompletionClient>(
    client: &C,
    data: &ConsultationData,
) -> Result<DischargeNote, DischargeError> {
    let prompt = build_prompt(data)?;

    let raw = client
        .complete(SYSTEM_PROMPT, &prompt)
        .await
        .map_err(|e| DischargeError::Api(e.to_string()))?;

    if raw.contains(['[', ']']) {
        tracing::warn!("Completion contained placeholder brackets, stripping them");
    }

    let note = clean_note(&raw);
    if note.is_empty() {
        return Err(DischargeError::Api(
            "completion returned an empty discharge note".to_string(),
        ));
    }

    tracing::info!(chars = note.len(), "Discharge note generated");
    Ok(DischargeNote::new(note))
}
