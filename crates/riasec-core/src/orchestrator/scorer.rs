//! Answer codes -> interest vector.

use crate::knowledge::RuleTable;
use crate::shared::InterestVector;

/// Accumulates the interest vector for a set of answer codes. Codes without a rule carry
/// no signal and are skipped. The result depends only on the multiset of codes.
pub fn score<S: AsRef<str>>(codes: &[S], rules: &RuleTable) -> InterestVector {
    let mut vector = InterestVector::default();
    let mut unknown = 0usize;
    for code in codes {
        match rules.get(code.as_ref()) {
            Some(rule) => {
                for (dimension, points) in rule.iter() {
                    vector.add(dimension, points);
                }
            }
            None => unknown += 1,
        }
    }
    if unknown > 0 {
        tracing::debug!(
            target: "riasec::engine",
            unknown,
            answers = codes.len(),
            "answer codes without a rule were ignored"
        );
    }
    vector
}
