use proptest::prelude::*;
use riasec_core::{
    explain, rank, score, similarity, AnswerCode, Dimension, DimensionScores, MajorProfile,
    MajorTable, MatchPolicy, Rule, RuleTable, DIMENSION_LABELS,
};

fn weights() -> impl Strategy<Value = [u64; 6]> {
    prop::array::uniform6(0u64..20)
}

fn rule_table() -> impl Strategy<Value = RuleTable> {
    let points = prop_oneof![4 => 0u32..6, 1 => Just(u32::MAX)];
    prop::collection::vec(prop::array::uniform6(points), 1..12).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, points)| {
                let code = AnswerCode::new(&(i + 1).to_string(), "a");
                let rule = Rule::new(code.clone(), Dimension::ALL.into_iter().zip(points));
                (code, rule)
            })
            .collect()
    })
}

fn major_table() -> impl Strategy<Value = MajorTable> {
    prop::collection::vec(weights(), 0..10).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, w)| MajorProfile {
                name: format!("Jurusan {i}"),
                weights: DimensionScores::new(w),
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn accumulation_is_exact(rules in rule_table(), picks in prop::collection::vec(0usize..16, 0..20)) {
        let codes: Vec<String> = picks.iter().map(|p| format!("Q{}a", p + 1)).collect();
        let vector = score(&codes, &rules);
        let expected: u64 = codes
            .iter()
            .filter_map(|c| rules.get(c.as_str()))
            .map(|r| r.total())
            .sum();
        prop_assert_eq!(vector.total(), expected);
    }

    #[test]
    fn accumulation_ignores_order(rules in rule_table(), picks in prop::collection::vec(0usize..16, 0..20)) {
        let codes: Vec<String> = picks.iter().map(|p| format!("Q{}a", p + 1)).collect();
        let mut reversed = codes.clone();
        reversed.reverse();
        prop_assert_eq!(score(&codes, &rules), score(&reversed, &rules));
    }

    #[test]
    fn score_stays_in_range(student in weights(), profile in weights()) {
        let s = DimensionScores::new(student);
        let p = DimensionScores::new(profile);
        let value = similarity(&s, &p, &MatchPolicy::default());
        prop_assert!((0.0..=10.0).contains(&value), "score {} out of range", value);
        if s.total() == 0 || p.total() == 0 {
            prop_assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn score_has_two_decimals(student in weights(), profile in weights()) {
        let value = similarity(&DimensionScores::new(student), &DimensionScores::new(profile), &MatchPolicy::default());
        let hundredths = value * 100.0;
        prop_assert!((hundredths - hundredths.round()).abs() < 1e-6);
    }

    #[test]
    fn ranking_is_idempotent_and_sorted(student in weights(), majors in major_table()) {
        let s = DimensionScores::new(student);
        let policy = MatchPolicy::default();
        let first: Vec<(String, f64)> = rank(&s, &majors, &policy).iter().map(|r| (r.major.name.clone(), r.score)).collect();
        let second: Vec<(String, f64)> = rank(&s, &majors, &policy).iter().map(|r| (r.major.name.clone(), r.score)).collect();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), majors.len());
        for pair in first.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn identical_profiles_keep_table_order(student in weights(), shared in weights(), filler in weights()) {
        let majors: MajorTable = vec![
            MajorProfile { name: "Pertama".into(), weights: DimensionScores::new(shared) },
            MajorProfile { name: "Tengah".into(), weights: DimensionScores::new(filler) },
            MajorProfile { name: "Kedua".into(), weights: DimensionScores::new(shared) },
        ]
        .into_iter()
        .collect();
        let ranked = rank(&DimensionScores::new(student), &majors, &MatchPolicy::default());
        let first = ranked.iter().position(|r| r.major.name == "Pertama").unwrap();
        let second = ranked.iter().position(|r| r.major.name == "Kedua").unwrap();
        prop_assert!(first < second);
    }

    #[test]
    fn explanation_names_major_and_two_distinct_dimensions(profile in weights(), name in "[a-z]{3,12}( [a-z]{3,12})?") {
        let text = explain(&name, &DimensionScores::new(profile));
        prop_assert!(text.contains(&name));
        let named: Vec<&str> = DIMENSION_LABELS
            .iter()
            .copied()
            .filter(|label| text.contains(label))
            .collect();
        prop_assert_eq!(named.len(), 2, "explanation {:?} names {:?}", text, named);
    }
}
