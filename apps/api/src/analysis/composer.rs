//! Request Composer: turns the intake into the instructions sent to the model.

use crate::analysis::models::Medication;
use crate::analysis::prompts::{
    ADDITIONAL_INFO_HEADING, ANALYSIS_SYSTEM, CLINICAL_DIRECTIVE, MEDICATIONS_HEADING, UNSPECIFIED,
};

/// System and user instructions for one analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedInstructions {
    pub system: String,
    pub user: String,
}

/// Builds the instruction pair. Blank medications are skipped; blank
/// `additional_info` is ignored. Optional sections are only ever appended
/// after `CLINICAL_DIRECTIVE`.
pub fn compose_instructions(
    medications: &[Medication],
    additional_info: Option<&str>,
) -> ComposedInstructions {
    let mut user = CLINICAL_DIRECTIVE.to_string();

    if let Some(section) = render_medications(medications) {
        user.push_str("\n\n");
        user.push_str(MEDICATIONS_HEADING);
        user.push('\n');
        user.push_str(&section);
    }

    if let Some(info) = additional_info.map(str::trim).filter(|s| !s.is_empty()) {
        user.push_str("\n\n");
        user.push_str(ADDITIONAL_INFO_HEADING);
        user.push('\n');
        user.push_str(info);
    }

    ComposedInstructions {
        system: ANALYSIS_SYSTEM.to_string(),
        user,
    }
}

/// One line per non-blank medication, in input order. `None` when nothing is left.
pub fn render_medications(medications: &[Medication]) -> Option<String> {
    let lines: Vec<String> = medications
        .iter()
        .filter(|m| !m.is_blank())
        .map(render_medication)
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn render_medication(medication: &Medication) -> String {
    let dose = if medication.dose > 0.0 {
        medication.dose.to_string()
    } else {
        UNSPECIFIED.to_string()
    };

    format!(
        "- {}: dosis {}, frecuencia {}, inicio {}",
        or_unspecified(&medication.name),
        dose,
        or_unspecified(&medication.frequency),
        or_unspecified(&medication.starting_date),
    )
}

fn or_unspecified(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNSPECIFIED
    } else {
        trimmed
    }
}
