//! Dev-time smoke test for a hand-written [`Engine`] implementation:
//! exercises the full uniform protocol and reports every violation
//! instead of stopping at the first one, mirroring the original's
//! `algorithm_extension_validator.py`.

use crate::engine::Engine;
use crate::key::CacheKey;
use crate::value::CacheValue;

/// One protocol violation found while validating a custom engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation(pub String);

/// Builds five entries (evicting, if the engine is bounded to fewer
/// than five slots), then checks that `len`, `is_empty`, `is_full`,
/// `contains_key`, `contains_result`, `for_each`, and `remove_if` all
/// behave consistently with each other. Returns every violation found;
/// an empty vec means the engine passed.
pub fn validate<E, A, R>(mut engine: E, sample_args: [A; 5], sample_results: [R; 5]) -> Vec<Violation>
where
    E: Engine<A, R>,
    A: Clone + std::fmt::Debug + std::hash::Hash + Eq,
    R: Clone + PartialEq + std::fmt::Debug,
{
    let mut violations = Vec::new();

    for (args, result) in sample_args.iter().zip(sample_results.iter()) {
        let key = CacheKey::hashed(args);
        engine.insert(key, args.clone(), CacheValue::bare(result.clone()));
    }

    if engine.is_empty() && engine.len() > 0 {
        violations.push(Violation(
            "is_empty() returned true while len() > 0".into(),
        ));
    }
    if !engine.is_empty() && engine.len() == 0 {
        violations.push(Violation(
            "is_empty() returned false while len() == 0".into(),
        ));
    }
    if let Some(max) = engine.max_size() {
        if engine.len() > max {
            violations.push(Violation(format!(
                "len() {} exceeds max_size() {}",
                engine.len(),
                max
            )));
        }
        if engine.len() == max && !engine.is_full() {
            violations.push(Violation(
                "is_full() returned false at len() == max_size()".into(),
            ));
        }
    }

    let mut seen_in_for_each = 0usize;
    engine.for_each(&mut |_k, _a, _v| seen_in_for_each += 1);
    if seen_in_for_each != engine.len() {
        violations.push(Violation(format!(
            "for_each visited {seen_in_for_each} entries but len() is {}",
            engine.len()
        )));
    }

    for result in &sample_results {
        if engine.len() == sample_results.len() && !engine.contains_result(&|r| r == result) {
            violations.push(Violation(format!(
                "contains_result missed a value still present: {result:?}"
            )));
        }
    }

    for args in &sample_args {
        let key = CacheKey::hashed(args);
        if engine.len() == sample_args.len() && !engine.contains_key(&key) {
            violations.push(Violation(format!(
                "contains_key missed a key still present: {args:?}"
            )));
        }
    }

    let before = engine.len();
    let removed = engine.remove_if(&|_, _, _| true);
    if removed != before {
        violations.push(Violation(format!(
            "remove_if(|_| true) removed {removed} of {before} entries"
        )));
    }
    if !engine.is_empty() {
        violations.push(Violation(
            "engine is not empty after remove_if(|_| true)".into(),
        ));
    }

    engine.clear();
    if engine.len() != 0 {
        violations.push(Violation("clear() left len() > 0".into()));
    }

    violations
}
