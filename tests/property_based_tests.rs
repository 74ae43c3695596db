use patient_triage::evaluation::{
    calculate_age_risk, calculate_blood_pressure_risk, calculate_risk_scores,
    calculate_temperature_risk, has_data_quality_issue, has_fever, is_high_risk,
    parse_blood_pressure, parse_decimal_prefix, parse_temperature,
};
use patient_triage::models::{Patient, RawField};
use patient_triage::orchestration::categorize_patients;
use proptest::prelude::*;
use serde_json::{json, Value};

fn raw_vital_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        (-50.0f64..250.0).prop_map(|n| json!(n)),
        (0u32..200).prop_map(|n| json!(n.to_string())),
        "[0-9]{2,3}/[0-9]{2,3}".prop_map(Value::String),
        prop_oneof![Just("N/A"), Just("INVALID"), Just(""), Just("TEMP_ERROR")]
            .prop_map(|s| json!(s)),
        ".{0,12}".prop_map(Value::String),
        any::<bool>().prop_map(Value::Bool),
    ]
}

fn identifier_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None),
        4 => "DEMO[0-9]{3}".prop_map(Some),
    ]
}

fn patient_strategy() -> impl Strategy<Value = Patient> {
    (
        identifier_strategy(),
        raw_vital_strategy(),
        raw_vital_strategy(),
        raw_vital_strategy(),
    )
        .prop_map(|(id, age, blood_pressure, temperature)| {
            let mut value = json!({
                "age": age,
                "blood_pressure": blood_pressure,
                "temperature": temperature
            });
            if let Some(id) = id {
                value["patient_id"] = json!(id);
            }
            Patient::from_value(value)
        })
}

proptest! {
    /// Property: Parsing arbitrary input never panics
    #[test]
    fn parsers_never_panic(input in ".*") {
        let _ = parse_decimal_prefix(&input);
        let field = RawField::Text(input);
        let _ = parse_blood_pressure(Some(&field));
        let _ = parse_temperature(Some(&field));
    }

    /// Property: Total risk is the sum of the three factors
    #[test]
    fn risk_total_is_sum_of_factors(patient in patient_strategy()) {
        let scores = calculate_risk_scores(&patient);
        prop_assert_eq!(scores.blood_pressure, calculate_blood_pressure_risk(&patient));
        prop_assert_eq!(scores.temperature, calculate_temperature_risk(&patient));
        prop_assert_eq!(scores.age, calculate_age_risk(&patient));
        prop_assert_eq!(scores.total, scores.blood_pressure + scores.temperature + scores.age);
        prop_assert!(scores.blood_pressure <= 3 && scores.temperature <= 2 && scores.age <= 2);
        prop_assert_eq!(is_high_risk(&patient), scores.total >= 4);
    }

    /// Property: A fever always carries a non-zero temperature score
    #[test]
    fn fever_implies_temperature_risk(patient in patient_strategy()) {
        if has_fever(&patient) {
            prop_assert!(calculate_temperature_risk(&patient) >= 1);
        }
    }

    /// Property: Classification is repeatable and respects identifiers
    #[test]
    fn classifier_is_idempotent(patients in prop::collection::vec(patient_strategy(), 0..30)) {
        let first = categorize_patients(&patients);
        let second = categorize_patients(&patients);
        prop_assert_eq!(&first, &second);

        let identified: Vec<&Patient> =
            patients.iter().filter(|p| p.identifier().is_some()).collect();
        let expected_quality: Vec<String> = identified
            .iter()
            .filter(|p| has_data_quality_issue(p))
            .filter_map(|p| p.identifier().map(str::to_string))
            .collect();
        prop_assert_eq!(&first.data_quality_issues, &expected_quality);
        prop_assert!(first.high_risk_patients.len() <= identified.len());
        prop_assert!(first.fever_patients.len() <= identified.len());
    }
}
