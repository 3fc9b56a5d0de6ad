use crate::models::PatientProfile;

/// Merge the raw prompt with optional patient context.
///
/// Without a profile the result is the trimmed prompt, unchanged. With a
/// profile a fixed-format context block is appended; fields that are missing
/// or empty render as the literal `None`.
pub fn compose_prompt(prompt: &str, profile: Option<&PatientProfile>) -> String {
    let prompt = prompt.trim();

    match profile {
        Some(profile) => format!(
            "{}\n\nPatient Context:\n- Medical History: {}\n- Allergies: {}\n- Current Medication: {}",
            prompt,
            field_or_none(&profile.medical_history),
            field_or_none(&profile.allergies),
            field_or_none(&profile.current_medication),
        ),
        None => prompt.to_string(),
    }
}

fn field_or_none(field: &Option<String>) -> &str {
    match field {
        Some(value) if !value.is_empty() => value,
        _ => "None",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_render_as_none() {
        let profile = PatientProfile {
            medical_history: Some("Asthma".to_string()),
            allergies: None,
            current_medication: Some("Albuterol".to_string()),
        };

        let composed = compose_prompt("What should I watch out for?", Some(&profile));

        assert_eq!(
            composed,
            "What should I watch out for?\n\nPatient Context:\n\
             - Medical History: Asthma\n\
             - Allergies: None\n\
             - Current Medication: Albuterol"
        );
    }

    #[test]
    fn empty_fields_render_as_none() {
        let profile = PatientProfile {
            medical_history: Some(String::new()),
            allergies: Some("Penicillin".to_string()),
            current_medication: None,
        };

        let composed = compose_prompt("prompt", Some(&profile));

        assert!(composed.contains("- Medical History: None"));
        assert!(composed.contains("- Allergies: Penicillin"));
        assert!(composed.contains("- Current Medication: None"));
    }

    #[test]
    fn no_profile_yields_trimmed_prompt_unchanged() {
        let composed = compose_prompt("  Is this rash serious?  \n", None);

        assert_eq!(composed, "Is this rash serious?");
        assert!(!composed.contains("Patient Context"));
    }
}
