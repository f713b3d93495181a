//! The triage evaluator.
//!
//! A single pass over the rule catalog in declaration order. Every standard rule whose match
//! clause holds contributes its effects; the fallback rule contributes only if no suggestion has
//! been accumulated by the time it is reached. After the pass the severity sum is rounded
//! (half away from zero) and clamped to `0..=10`, and suggestions and flags are deduplicated
//! keeping their first occurrence. The explanation keeps one entry per fired rule.
//!
//! Evaluation only reads the catalog, so one catalog can serve any number of concurrent calls.

use crate::constants::MAX_SEVERITY;
use crate::input::{Assessment, SymptomInput};
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;
use triage_rules::{MatchClause, Rule, RuleCatalog, RuleKind};
use triage_types::UrgencyFlag;

/// Evaluate one symptom record against `catalog`.
pub fn evaluate(input: &SymptomInput, catalog: &RuleCatalog) -> Assessment {
    let mut aggregate = Aggregate::default();

    for rule in catalog {
        match rule.kind {
            RuleKind::Fallback => {
                if aggregate.steps.is_empty() {
                    aggregate.apply(rule);
                }
            }
            RuleKind::Standard => {
                if clause_matches(&rule.match_clause, input) {
                    aggregate.apply(rule);
                }
            }
        }
    }

    let fired = aggregate.explanation.len();
    let assessment = aggregate.finish();
    tracing::debug!(
        "evaluated {} rules: {} fired, severity {}",
        catalog.len(),
        fired,
        assessment.severity_score
    );
    assessment
}

/// Test one match clause against an input.
///
/// Present clauses are ANDed. Empty symptom sets impose no constraint, and temperature bounds
/// are skipped when no temperature was measured.
pub fn clause_matches(clause: &MatchClause, input: &SymptomInput) -> bool {
    let any_symptoms = match &clause.any_symptoms {
        Some(wanted) if !wanted.is_empty() => wanted.iter().any(|s| input.has_symptom(*s)),
        _ => true,
    };

    let all_symptoms = clause
        .all_symptoms
        .as_ref()
        .map_or(true, |wanted| wanted.iter().all(|s| input.has_symptom(*s)));

    let temperature = match input.temperature {
        Some(t) => {
            clause.min_temp.map_or(true, |min| t >= min)
                && clause.max_temp.map_or(true, |max| t <= max)
        }
        None => !clause.requires_temperature,
    };

    let duration = clause
        .min_duration_days
        .map_or(true, |min| input.duration_days >= min)
        && clause
            .max_duration_days
            .map_or(true, |max| input.duration_days <= max);

    any_symptoms && all_symptoms && temperature && duration
}

/// Round half away from zero, then clamp into `0..=MAX_SEVERITY`. A NaN sum scores 0.
pub fn severity_score(severity_sum: f64) -> u8 {
    let rounded = severity_sum.round();
    if rounded.is_nan() {
        return 0;
    }
    rounded.clamp(0.0, f64::from(MAX_SEVERITY)) as u8
}

/// Keep the first occurrence of every item, in order.
pub fn dedupe_preserving_first_occurrence<T>(items: Vec<T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// An evaluator bound to one shared catalog.
#[derive(Clone, Debug)]
pub struct TriageEvaluator {
    catalog: Arc<RuleCatalog>,
}

impl TriageEvaluator {
    pub fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn evaluate(&self, input: &SymptomInput) -> Assessment {
        evaluate(input, &self.catalog)
    }
}

impl Default for TriageEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(RuleCatalog::standard()))
    }
}

#[derive(Default)]
struct Aggregate {
    severity_sum: f64,
    steps: Vec<String>,
    flags: Vec<UrgencyFlag>,
    explanation: Vec<String>,
}

impl Aggregate {
    fn apply(&mut self, rule: &Rule) {
        self.severity_sum += rule.effects.severity_delta;
        self.steps.extend(rule.effects.suggestions.iter().cloned());
        self.flags.extend(rule.effects.flags.iter().copied());
        self.explanation.push(rule.description.clone());
    }

    fn finish(self) -> Assessment {
        Assessment {
            severity_score: severity_score(self.severity_sum),
            suggested_next_steps: dedupe_preserving_first_occurrence(self.steps),
            flags: dedupe_preserving_first_occurrence(self.flags),
            explanation: self.explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_rules::{Effects, FALLBACK_RULE_ID};
    use triage_types::Symptom;

    fn standard() -> RuleCatalog {
        RuleCatalog::standard()
    }

    fn description(id: &str) -> String {
        standard()
            .get(id)
            .unwrap_or_else(|| panic!("standard catalog has no rule {id}"))
            .description
            .clone()
    }

    fn suggestions(id: &str) -> Vec<String> {
        standard()
            .get(id)
            .unwrap_or_else(|| panic!("standard catalog has no rule {id}"))
            .effects
            .suggestions
            .clone()
    }

    fn fallback(suggestion: &str) -> Rule {
        Rule::fallback(
            "fallback",
            "Fallback.",
            Effects::new(0.0).suggest([suggestion]),
        )
    }

    fn catalog(rules: Vec<Rule>) -> RuleCatalog {
        RuleCatalog::new(rules).expect("test catalog should validate")
    }

    #[test]
    fn chest_pain_without_temperature_is_an_emergency() {
        let input = SymptomInput::new(None, [Symptom::ChestPain, Symptom::ShortnessOfBreath], 1);
        let assessment = evaluate(&input, &standard());

        assert_eq!(assessment.severity_score, 10);
        assert_eq!(assessment.flags, vec![UrgencyFlag::Emergency]);
        assert_eq!(
            assessment.explanation,
            vec![description("emergency-chest-pain"), description("short-duration")]
        );
        for step in suggestions(FALLBACK_RULE_ID) {
            assert!(!assessment.suggested_next_steps.contains(&step));
        }
    }

    #[test]
    fn mild_headache_scores_one() {
        let input = SymptomInput::new(Some(36.9), [Symptom::Headache], 1);
        let assessment = evaluate(&input, &standard());

        assert_eq!(assessment.severity_score, 1);
        assert!(assessment.flags.is_empty());
        assert_eq!(
            assessment.explanation,
            vec![description("headache-mild"), description("short-duration")]
        );
        assert!(!assessment
            .explanation
            .contains(&description(FALLBACK_RULE_ID)));
    }

    #[test]
    fn empty_record_on_day_zero_only_gets_short_duration_advice() {
        let input = SymptomInput::new(None, [], 0);
        let assessment = evaluate(&input, &standard());

        assert_eq!(assessment.severity_score, 0);
        assert!(assessment.flags.is_empty());
        assert_eq!(assessment.explanation, vec![description("short-duration")]);
        assert_eq!(
            assessment.suggested_next_steps,
            suggestions("short-duration")
        );
    }

    #[test]
    fn prolonged_symptoms_are_flagged_for_review() {
        let input = SymptomInput::new(None, [], 6);
        let assessment = evaluate(&input, &standard());

        assert_eq!(assessment.severity_score, 2);
        assert_eq!(assessment.flags, vec![UrgencyFlag::Review]);
        assert_eq!(
            assessment.explanation,
            vec![description("prolonged-symptoms")]
        );
    }

    #[test]
    fn fallback_fires_when_nothing_else_suggests() {
        let input = SymptomInput::new(Some(37.0), [Symptom::Fever], 3);
        let assessment = evaluate(&input, &standard());

        assert_eq!(assessment.severity_score, 0);
        assert_eq!(
            assessment.explanation,
            vec![description(FALLBACK_RULE_ID)]
        );
        assert_eq!(
            assessment.suggested_next_steps,
            suggestions(FALLBACK_RULE_ID)
        );
    }

    #[test]
    fn fever_with_cough_combines_rules() {
        let input = SymptomInput::new(Some(38.5), [Symptom::Fever, Symptom::Cough], 2);
        let assessment = evaluate(&input, &standard());

        assert_eq!(assessment.severity_score, 6);
        assert_eq!(
            assessment.explanation,
            vec![description("fever-cough"), description("mild-fever")]
        );
        let mut expected = suggestions("fever-cough");
        expected.extend(suggestions("mild-fever"));
        assert_eq!(assessment.suggested_next_steps, expected);
    }

    #[test]
    fn duplicate_suggestions_keep_first_position() {
        let input = SymptomInput::new(
            Some(38.0),
            [Symptom::Fever, Symptom::Fatigue, Symptom::SoreThroat],
            3,
        );
        let assessment = evaluate(&input, &standard());

        assert_eq!(assessment.severity_score, 8);
        assert_eq!(
            assessment.suggested_next_steps,
            vec![
                "Gargle with warm salt water.",
                "Stay hydrated and rest.",
                "Consider throat lozenges for comfort.",
                "Get plenty of rest.",
                "Stay hydrated.",
                "Monitor temperature regularly.",
                "Use fever-reducing medication if needed.",
            ]
        );
        assert_eq!(assessment.explanation.len(), 3);
    }

    #[test]
    fn mild_rules_fire_on_symptoms_alone_when_temperature_unmeasured() {
        let input = SymptomInput::new(None, [Symptom::Headache], 3);
        let assessment = evaluate(&input, &standard());

        assert_eq!(assessment.severity_score, 1);
        assert_eq!(assessment.explanation, vec![description("headache-mild")]);
    }

    #[test]
    fn score_is_clamped_to_ten() {
        let input = SymptomInput::new(Some(39.5), Symptom::ALL, 0);
        let assessment = evaluate(&input, &standard());

        assert_eq!(assessment.severity_score, 10);
        assert_eq!(
            assessment.flags,
            vec![UrgencyFlag::Emergency, UrgencyFlag::Attention]
        );
    }

    #[test]
    fn negative_sums_clamp_to_zero() {
        let rules = vec![
            Rule::standard(
                "soothing",
                "Very reassuring.",
                MatchClause::default().with_max_duration_days(1),
                Effects::new(-250.0).suggest(["Relax."]),
            ),
            fallback("Rest."),
        ];
        let assessment = evaluate(&SymptomInput::default(), &catalog(rules));
        assert_eq!(assessment.severity_score, 0);
    }

    #[test]
    fn score_rounds_half_away_from_zero() {
        assert_eq!(severity_score(2.5), 3);
        assert_eq!(severity_score(2.49), 2);
        assert_eq!(severity_score(0.4), 0);
        assert_eq!(severity_score(-0.5), 0);
        assert_eq!(severity_score(f64::INFINITY), 10);
        assert_eq!(severity_score(f64::NEG_INFINITY), 0);
        assert_eq!(severity_score(f64::NAN), 0);
    }

    #[test]
    fn explanation_keeps_repeated_descriptions() {
        let rules = vec![
            Rule::standard(
                "first",
                "Same words.",
                MatchClause::any_of([Symptom::Cough]),
                Effects::new(1.5).suggest(["Drink water."]),
            ),
            Rule::standard(
                "second",
                "Same words.",
                MatchClause::all_of([Symptom::Cough]),
                Effects::new(1.0)
                    .suggest(["Drink water."])
                    .flag(UrgencyFlag::Review),
            ),
            fallback("Rest."),
        ];
        let input = SymptomInput::new(None, [Symptom::Cough], 2);
        let assessment = evaluate(&input, &catalog(rules));

        assert_eq!(assessment.explanation, vec!["Same words.", "Same words."]);
        assert_eq!(assessment.suggested_next_steps, vec!["Drink water."]);
        assert_eq!(assessment.flags, vec![UrgencyFlag::Review]);
        assert_eq!(assessment.severity_score, 3);
    }

    #[test]
    fn fallback_ignores_rules_that_only_flag() {
        let rules = vec![
            Rule::standard(
                "flag-only",
                "Flags without advice.",
                MatchClause::default().with_max_duration_days(1),
                Effects::new(1.0).flag(UrgencyFlag::Attention),
            ),
            fallback("Rest."),
        ];
        let assessment = evaluate(&SymptomInput::default(), &catalog(rules));

        assert_eq!(assessment.suggested_next_steps, vec!["Rest."]);
        assert_eq!(assessment.flags, vec![UrgencyFlag::Attention]);
        assert_eq!(assessment.explanation.len(), 2);
    }

    #[test]
    fn fallback_gate_depends_on_position() {
        let cough = Rule::standard(
            "cough",
            "Cough.",
            MatchClause::any_of([Symptom::Cough]),
            Effects::new(1.0).suggest(["Drink water."]),
        );
        let input = SymptomInput::new(None, [Symptom::Cough], 2);

        let last = evaluate(&input, &catalog(vec![cough.clone(), fallback("Rest.")]));
        assert_eq!(last.suggested_next_steps, vec!["Drink water."]);

        let first = evaluate(&input, &catalog(vec![fallback("Rest."), cough]));
        assert_eq!(first.suggested_next_steps, vec!["Rest.", "Drink water."]);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let evaluator = TriageEvaluator::default();
        let input = SymptomInput::new(Some(38.2), [Symptom::Fever, Symptom::SoreThroat], 5);

        let first = evaluator.evaluate(&input);
        let second = evaluator.evaluate(&input);
        assert_eq!(first, second);
        assert_eq!(first, evaluate(&input, evaluator.catalog()));
    }

    #[test]
    fn clause_order_does_not_change_the_result() {
        let a = MatchClause::all_of([Symptom::Cough])
            .with_max_temp(37.4)
            .with_min_duration_days(2);
        let mut b = MatchClause::default().with_min_duration_days(2);
        b = b.with_max_temp(37.4);
        b.all_symptoms = Some(vec![Symptom::Cough]);

        let inputs = [
            SymptomInput::new(Some(37.0), [Symptom::Cough], 2),
            SymptomInput::new(Some(38.0), [Symptom::Cough], 2),
            SymptomInput::new(None, [Symptom::Cough], 1),
            SymptomInput::new(None, [Symptom::Fever], 4),
        ];
        for input in &inputs {
            assert_eq!(clause_matches(&a, input), clause_matches(&b, input));
        }
    }

    #[test]
    fn temperature_bounds_are_inclusive() {
        let clause = MatchClause::default().with_min_temp(37.5).with_max_temp(38.9);
        assert!(clause_matches(&clause, &SymptomInput::new(Some(37.5), [], 2)));
        assert!(clause_matches(&clause, &SymptomInput::new(Some(38.9), [], 2)));
        assert!(!clause_matches(&clause, &SymptomInput::new(Some(39.0), [], 2)));
        assert!(clause_matches(&clause, &SymptomInput::new(None, [], 2)));

        let measured = clause.requiring_temperature();
        assert!(!clause_matches(&measured, &SymptomInput::new(None, [], 2)));
    }

    #[test]
    fn duration_bounds_are_inclusive() {
        let clause = MatchClause::default()
            .with_min_duration_days(2)
            .with_max_duration_days(4);
        assert!(!clause_matches(&clause, &SymptomInput::new(None, [], 1)));
        assert!(clause_matches(&clause, &SymptomInput::new(None, [], 2)));
        assert!(clause_matches(&clause, &SymptomInput::new(None, [], 4)));
        assert!(!clause_matches(&clause, &SymptomInput::new(None, [], 5)));
    }

    #[test]
    fn empty_symptom_sets_impose_no_constraint() {
        let input = SymptomInput::new(None, [], 2);
        assert!(clause_matches(&MatchClause::unconstrained(), &input));
        assert!(clause_matches(&MatchClause::all_of(Vec::<Symptom>::new()), &input));
        assert!(!clause_matches(&MatchClause::any_of([Symptom::Fever]), &input));
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let items = vec!["b", "a", "b", "c", "a"];
        assert_eq!(dedupe_preserving_first_occurrence(items), vec!["b", "a", "c"]);
    }

    #[test]
    fn scores_and_lists_hold_invariants_for_every_single_symptom() {
        let catalog = standard();
        for symptom in Symptom::ALL {
            for temperature in [None, Some(36.5), Some(38.0), Some(40.0)] {
                for duration_days in [0, 1, 3, 5, 30] {
                    let input = SymptomInput::new(temperature, [symptom], duration_days);
                    let assessment = evaluate(&input, &catalog);

                    assert!(assessment.severity_score <= MAX_SEVERITY);
                    assert!(!assessment.suggested_next_steps.is_empty());
                    let unique: HashSet<_> = assessment.suggested_next_steps.iter().collect();
                    assert_eq!(unique.len(), assessment.suggested_next_steps.len());
                    let unique: HashSet<_> = assessment.flags.iter().collect();
                    assert_eq!(unique.len(), assessment.flags.len());
                }
            }
        }
    }
}
