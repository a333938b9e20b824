// ABOUTME: System prompt builders for the wellness intake conversation
// ABOUTME: Interview, report summarization, and check-frequency classification prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

//! Prompt construction for the three completion-request shapes the system
//! issues: the turn-budgeted interview, the report summarization, and the
//! numeric check-frequency classification.

use crate::models::UserProfile;

/// Exact terminal sentence the assistant must emit to end the interview
pub const COMPLETION_SENTENCE: &str = "Thank you for completing the wellness check.";

/// Lower-cased substring whose presence in a reply signals completion
pub const COMPLETION_PHRASE: &str = "thank you for completing the wellness check";

/// Maximum number of follow-up questions the assistant may ask
pub const MAX_FOLLOW_UPS: usize = 4;

/// Build the interview system prompt for the current turn
///
/// `follow_ups_asked` is the number of assistant turns issued so far,
/// excluding the fixed welcome message.
#[must_use]
pub fn interview_prompt(follow_ups_asked: usize) -> String {
    format!(
        "You are a compassionate healthcare assistant conducting a wellness check interview.\n\
         \n\
         The user will describe how they are feeling. Ask focused follow-up questions to \
         understand their symptoms, one question per reply. You have asked {follow_ups_asked} \
         follow-up question(s) so far, out of a maximum of {MAX_FOLLOW_UPS}. Once you have \
         asked {MAX_FOLLOW_UPS} follow-up questions, or sooner if you have enough information, \
         you must conclude the interview.\n\
         \n\
         To conclude, give exactly one of these two recommendations:\n\
         - If the symptoms warrant professional attention, say: \"Based on your symptoms, I \
         recommend that you book an appointment with your doctor.\"\n\
         - If no visit is needed, say: \"Your symptoms do not appear to require a doctor's \
         visit at this time.\"\n\
         \n\
         After giving your recommendation and the user has acknowledged it, end your final \
         reply with this exact sentence: \"{COMPLETION_SENTENCE}\"\n\
         \n\
         Do not provide a diagnosis. Do not prescribe medication. Keep replies short and \
         conversational."
    )
}

/// Build the report summarization system prompt
///
/// `profile_context` is the optional "Patient Health Profile" block from
/// the store; when present the summary must fold in the medical context.
#[must_use]
pub fn summary_prompt(profile_context: Option<&str>) -> String {
    let base = "You are a clinical documentation assistant. Summarize the following wellness \
                check conversation in 2-3 sentences, written in a clinical style. Cover: \
                (a) an overview of the reported symptoms, (b) whether a doctor's appointment \
                was recommended, and (c) whether the user agreed to the recommendation.";

    match profile_context {
        Some(context) if !context.is_empty() => format!(
            "{base}\n\nFold the relevant parts of the patient's profile into the summary, \
             particularly chronic conditions, current medications, hereditary risk patterns, \
             age, and sex:\n\n{context}"
        ),
        _ => base.to_owned(),
    }
}

/// Build the numeric-only check-frequency classification prompt
#[must_use]
pub fn frequency_prompt() -> String {
    "You are a healthcare professional determining the recommended wellness check frequency \
     for a patient.\n\
     \n\
     Based on the patient's demographics, medical history, chronic conditions, medications, \
     and hereditary risk patterns, recommend how often (in days) they should complete a \
     wellness check.\n\
     \n\
     CRITICAL: You must respond with ONLY a number representing days. The number must be one \
     of these exact values:\n\
     - 1 (daily checks - high-risk patients, elderly with serious conditions)\n\
     - 2 (every 2 days - moderate-high risk)\n\
     - 7 (weekly checks - moderate risk or ongoing monitoring)\n\
     - 14 (bi-weekly checks - low-moderate risk)\n\
     - 30 (monthly checks - healthy individuals with minimal risk factors)\n\
     \n\
     Respond with ONLY the number (1, 2, 7, 14, or 30). No explanation, no text, just the \
     number."
        .to_owned()
}

/// Render a profile as the user-context block for the frequency prompt
#[must_use]
pub fn frequency_context(profile: &UserProfile) -> String {
    let or_none = |s: &str| {
        if s.is_empty() {
            "None".to_owned()
        } else {
            s.to_owned()
        }
    };
    format!(
        "Patient Demographics and Health Profile:\n\
         - Age: {}\n\
         - Biological Sex: {}\n\
         - Height: {}\n\
         - Weight: {}\n\
         - Medical Background: {}\n\
         - Chronic Conditions: {}\n\
         - Current Medications: {}\n\
         - Hereditary Risk Patterns: {}",
        profile.age,
        profile.sex,
        profile.height,
        profile.weight,
        or_none(&profile.medical_background),
        or_none(&profile.chronic_conditions),
        or_none(&profile.current_medications),
        or_none(&profile.hereditary_risk_patterns),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interview_prompt_states_follow_up_count() {
        let prompt = interview_prompt(0);
        assert!(prompt.contains("You have asked 0 follow-up question(s) so far"));
        assert!(prompt.contains("maximum of 4"));

        let prompt = interview_prompt(3);
        assert!(prompt.contains("You have asked 3 follow-up question(s) so far"));
    }

    #[test]
    fn interview_prompt_mandates_terminal_sentence() {
        let prompt = interview_prompt(1);
        assert!(prompt.contains(COMPLETION_SENTENCE));
    }

    #[test]
    fn summary_prompt_folds_in_context_when_present() {
        let with = summary_prompt(Some("Patient Health Profile (anonymized):\n- Age: 36\n"));
        assert!(with.contains("- Age: 36"));

        let without = summary_prompt(None);
        assert!(!without.contains("patient's profile"));
    }

    #[test]
    fn frequency_context_substitutes_none_for_empty_fields() {
        let profile = UserProfile {
            id: None,
            name: "Ada".into(),
            age: 36,
            sex: "Female".into(),
            height: "5'6\"".into(),
            weight: "140lbs".into(),
            medical_background: String::new(),
            chronic_conditions: "asthma".into(),
            current_medications: String::new(),
            hereditary_risk_patterns: String::new(),
            check_interval: None,
            wellness_report: None,
        };
        let context = frequency_context(&profile);
        assert!(context.contains("- Medical Background: None"));
        assert!(context.contains("- Chronic Conditions: asthma"));
    }
}
