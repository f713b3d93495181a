//! The standard triage policy.
//!
//! Declaration order is significant: it fixes the position of each suggestion in the
//! deduplicated output and places the fallback rule last, where it only fires when nothing
//! before it produced a suggestion.

use crate::rule::{Effects, MatchClause, Rule};
use triage_types::{Symptom, UrgencyFlag};

/// Identifier of the fallback rule in the standard catalog.
pub const FALLBACK_RULE_ID: &str = "general-guidance";

/// Upper bound of the "no fever" band used by the mild single-symptom rules.
const AFEBRILE_MAX_TEMP: f64 = 37.4;

/// Builds the standard rule list, in evaluation order.
pub fn rules() -> Vec<Rule> {
    vec![
        // Emergency
        Rule::standard(
            "emergency-chest-pain",
            "Chest pain or shortness of breath indicates potential emergency.",
            MatchClause::any_of([Symptom::ChestPain, Symptom::ShortnessOfBreath]),
            Effects::new(10.0).flag(UrgencyFlag::Emergency).suggest([
                "Seek immediate medical care or call emergency services.",
                "Do not drive yourself; arrange transport to the nearest ER.",
            ]),
        ),
        // High severity
        Rule::standard(
            "high-fever",
            "High temperature (>= 39°C) warrants attention.",
            MatchClause::default()
                .with_min_temp(39.0)
                .requiring_temperature(),
            Effects::new(5.0)
                .suggest(["Use antipyretics as directed and monitor temperature."])
                .flag(UrgencyFlag::Attention),
        ),
        // Moderate severity
        Rule::standard(
            "fever-cough",
            "Fever with cough may indicate respiratory infection.",
            MatchClause::all_of([Symptom::Fever, Symptom::Cough]),
            Effects::new(4.0).suggest([
                "Hydrate and rest.",
                "Consider at-home COVID/flu testing.",
                "If symptoms persist beyond 3 days, consult your doctor.",
            ]),
        ),
        Rule::standard(
            "fever-sore-throat",
            "Fever with sore throat may indicate infection.",
            MatchClause::all_of([Symptom::Fever, Symptom::SoreThroat]),
            Effects::new(3.0).suggest([
                "Gargle with warm salt water.",
                "Stay hydrated and rest.",
                "Consider throat lozenges for comfort.",
            ]),
        ),
        Rule::standard(
            "fever-fatigue",
            "Fever with fatigue may indicate viral infection.",
            MatchClause::all_of([Symptom::Fever, Symptom::Fatigue]),
            Effects::new(3.0).suggest([
                "Get plenty of rest.",
                "Stay hydrated.",
                "Monitor temperature regularly.",
            ]),
        ),
        // Low-moderate severity
        Rule::standard(
            "prolonged-symptoms",
            "Symptoms lasting >= 5 days should be reviewed by a clinician.",
            MatchClause::default().with_min_duration_days(5),
            Effects::new(2.0)
                .suggest(["Schedule a non-urgent appointment with your clinician."])
                .flag(UrgencyFlag::Review),
        ),
        Rule::standard(
            "mild-fever",
            "Low-grade fever (37.5-38.9°C) with general symptoms.",
            MatchClause::default()
                .with_min_temp(37.5)
                .with_max_temp(38.9)
                .requiring_temperature(),
            Effects::new(2.0).suggest([
                "Monitor temperature regularly.",
                "Stay hydrated and rest.",
                "Use fever-reducing medication if needed.",
            ]),
        ),
        // Low severity
        Rule::standard(
            "headache-mild",
            "Mild isolated headache.",
            MatchClause::all_of([Symptom::Headache]).with_max_temp(AFEBRILE_MAX_TEMP),
            Effects::new(1.0).suggest([
                "Hydration, rest, and over-the-counter analgesics as needed.",
                "Avoid bright lights and loud noises.",
                "Consider relaxation techniques.",
            ]),
        ),
        Rule::standard(
            "cough-mild",
            "Mild cough without fever.",
            MatchClause::all_of([Symptom::Cough]).with_max_temp(AFEBRILE_MAX_TEMP),
            Effects::new(1.0).suggest([
                "Stay hydrated with warm liquids.",
                "Use cough drops or honey for throat irritation.",
                "Consider humidifier for dry air.",
            ]),
        ),
        Rule::standard(
            "fatigue-mild",
            "Mild fatigue without other symptoms.",
            MatchClause::all_of([Symptom::Fatigue]).with_max_temp(AFEBRILE_MAX_TEMP),
            Effects::new(1.0).suggest([
                "Ensure adequate sleep (7-9 hours).",
                "Stay hydrated and eat nutritious meals.",
                "Consider light exercise if feeling up to it.",
            ]),
        ),
        Rule::standard(
            "sore-throat-mild",
            "Mild sore throat without fever.",
            MatchClause::all_of([Symptom::SoreThroat]).with_max_temp(AFEBRILE_MAX_TEMP),
            Effects::new(1.0).suggest([
                "Gargle with warm salt water 3-4 times daily.",
                "Stay hydrated with warm liquids.",
                "Avoid irritants like smoking or dry air.",
            ]),
        ),
        Rule::standard(
            "nausea-mild",
            "Mild nausea without other severe symptoms.",
            MatchClause::all_of([Symptom::Nausea]).with_max_temp(AFEBRILE_MAX_TEMP),
            Effects::new(1.0).suggest([
                "Eat small, bland meals.",
                "Stay hydrated with small sips of water.",
                "Avoid strong smells and spicy foods.",
            ]),
        ),
        // Duration based
        Rule::standard(
            "short-duration",
            "Symptoms lasting less than 24 hours.",
            MatchClause::default().with_max_duration_days(1),
            Effects::new(0.0).suggest([
                "Monitor symptoms closely.",
                "Rest and stay hydrated.",
                "Seek medical attention if symptoms worsen.",
            ]),
        ),
        // Must stay last.
        Rule::fallback(
            FALLBACK_RULE_ID,
            "General health guidance for any symptoms.",
            Effects::new(0.0).suggest([
                "Monitor your symptoms closely.",
                "Stay hydrated and get adequate rest.",
                "Seek medical attention if symptoms worsen or persist.",
            ]),
        ),
    ]
}
