//! Unit tests for the built-in constraint library.
//!
//! Focuses on the contracts of the predicates themselves: absence handling,
//! boundary cases, coercion behavior, and the fixed patterns.

use proviso::constraints::BUILTIN_CONSTRAINTS;
use proviso::{ConstraintRegistry, Value};

fn s(text: &str) -> Value {
    Value::String(text.to_string())
}

fn n(num: f64) -> Value {
    Value::Number(num)
}

#[cfg(test)]
mod absence_tests {
    use super::*;

    /// Every constraint except `required` is automatically satisfied by an
    /// absent value, whatever its options.
    #[test]
    fn absent_satisfies_everything_but_required() {
        let registry = ConstraintRegistry::with_builtins();
        for (name, _) in BUILTIN_CONSTRAINTS {
            let constraint = registry.get(name).unwrap();
            let expected = *name != "required";
            assert_eq!(
                constraint.test(&Value::Nil, &[n(3.0), s("x")]),
                expected,
                "constraint `{}` mishandled absence",
                name
            );
        }
    }

    #[test]
    fn required_rejects_absent_and_empty_string() {
        let registry = ConstraintRegistry::with_builtins();
        let required = registry.get("required").unwrap();
        assert!(!required.test(&Value::Nil, &[]));
        assert!(!required.test(&s(""), &[]));
        assert!(required.test(&s("x"), &[]));
        assert!(required.test(&n(0.0), &[]));
        assert!(required.test(&Value::Bool(false), &[]));
        assert!(required.test(&Value::List(vec![]), &[]));
    }
}

#[cfg(test)]
mod numeric_bound_tests {
    use super::*;
    use proviso::constraints::{MAX, MIN, NEGATIVE, POSITIVE};

    #[test]
    fn min_is_inclusive() {
        assert!(MIN(&n(18.0), &[n(18.0)]));
        assert!(MIN(&n(19.0), &[n(18.0)]));
        assert!(!MIN(&n(17.9), &[n(18.0)]));
    }

    #[test]
    fn max_is_inclusive() {
        assert!(MAX(&n(18.0), &[n(18.0)]));
        assert!(!MAX(&n(18.1), &[n(18.0)]));
    }

    #[test]
    fn numeric_strings_are_coerced() {
        assert!(MIN(&s("20"), &[n(18.0)]));
        assert!(!MIN(&s("15"), &[n(18.0)]));
        assert!(MAX(&s(" 12 "), &[s("18")]));
    }

    #[test]
    fn non_numeric_present_values_fail() {
        assert!(!MIN(&s("twenty"), &[n(18.0)]));
        assert!(!MIN(&Value::Bool(true), &[n(18.0)]));
        assert!(!MAX(&Value::List(vec![]), &[n(18.0)]));
    }

    #[test]
    fn malformed_options_fail_the_step() {
        assert!(!MIN(&n(20.0), &[]));
        assert!(!MIN(&n(20.0), &[s("tall")]));
    }

    #[test]
    fn positive_and_negative_include_zero() {
        assert!(POSITIVE(&n(0.0), &[]));
        assert!(NEGATIVE(&n(0.0), &[]));
        assert!(POSITIVE(&n(4.2), &[]));
        assert!(!POSITIVE(&n(-4.2), &[]));
        assert!(NEGATIVE(&n(-4.2), &[]));
        assert!(!NEGATIVE(&n(4.2), &[]));
    }
}

#[cfg(test)]
mod size_bound_tests {
    use super::*;
    use proviso::constraints::{LENGTH, MAX_LENGTH, MIN_LENGTH};

    #[test]
    fn string_size_is_character_count() {
        // Four characters, five bytes.
        assert!(LENGTH(&s("élan"), &[n(4.0)]));
        assert!(MIN_LENGTH(&s("élan"), &[n(4.0)]));
        assert!(!MIN_LENGTH(&s("élan"), &[n(5.0)]));
    }

    #[test]
    fn list_size_is_element_count() {
        let list = Value::List(vec![n(1.0), n(2.0), n(3.0)]);
        assert!(LENGTH(&list, &[n(3.0)]));
        assert!(MAX_LENGTH(&list, &[n(3.0)]));
        assert!(!MAX_LENGTH(&list, &[n(2.0)]));
    }

    #[test]
    fn empty_string_is_present_with_size_zero() {
        // Absence is required's concern; "" still has a size.
        assert!(!MIN_LENGTH(&s(""), &[n(1.0)]));
        assert!(MAX_LENGTH(&s(""), &[n(1.0)]));
    }

    #[test]
    fn unsized_present_values_fail() {
        assert!(!LENGTH(&n(123.0), &[n(3.0)]));
        assert!(!MIN_LENGTH(&Value::Bool(true), &[n(0.0)]));
    }

    #[test]
    fn fractional_or_negative_bounds_fail_the_step() {
        assert!(!LENGTH(&s("abc"), &[n(3.5)]));
        assert!(!MIN_LENGTH(&s("abc"), &[n(-1.0)]));
    }
}

#[cfg(test)]
mod pattern_tests {
    use super::*;
    use proviso::constraints::{
        ALPHANUM, ALPHANUM_SPACE, EMAIL, MATCH, NUMERIC, NUMERIC_SPACE,
    };

    #[test]
    fn email_pattern() {
        assert!(EMAIL(&s("kim@example.com"), &[]));
        assert!(EMAIL(&s("a@b.fr"), &[]));
        assert!(!EMAIL(&s("not-an-email"), &[]));
        assert!(!EMAIL(&s("two@at@signs.com"), &[]));
        assert!(!EMAIL(&s("spaces in@mail.com"), &[]));
    }

    #[test]
    fn numeric_family() {
        assert!(NUMERIC(&s("0123456789"), &[]));
        assert!(!NUMERIC(&s("12a"), &[]));
        assert!(!NUMERIC(&s("12 34"), &[]));
        assert!(NUMERIC_SPACE(&s("12 34"), &[]));
        assert!(!NUMERIC_SPACE(&s("12-34"), &[]));
    }

    #[test]
    fn alphanum_family() {
        assert!(ALPHANUM(&s("abc123XYZ"), &[]));
        assert!(!ALPHANUM(&s("abc 123"), &[]));
        assert!(ALPHANUM_SPACE(&s("abc 123"), &[]));
        assert!(!ALPHANUM_SPACE(&s("abc_123"), &[]));
    }

    #[test]
    fn numbers_are_rendered_before_matching() {
        assert!(NUMERIC(&n(42.0), &[]));
        assert!(ALPHANUM(&n(42.0), &[]));
    }

    #[test]
    fn non_text_values_fail_patterns() {
        assert!(!EMAIL(&Value::Bool(true), &[]));
        assert!(!NUMERIC(&Value::List(vec![]), &[]));
    }

    #[test]
    fn match_takes_a_pattern_option() {
        assert!(MATCH(&s("AB-12"), &[s(r"^[A-Z]{2}-\d{2}$")]));
        assert!(!MATCH(&s("ab-12"), &[s(r"^[A-Z]{2}-\d{2}$")]));
    }

    #[test]
    fn match_with_missing_or_invalid_pattern_fails() {
        assert!(!MATCH(&s("anything"), &[]));
        assert!(!MATCH(&s("anything"), &[s("(unclosed")]));
    }

    #[test]
    fn match_is_stateless_across_calls() {
        // Same arguments, same answer, however many times it runs.
        let pattern = [s(r"\d+")];
        for _ in 0..3 {
            assert!(MATCH(&s("route 66"), &pattern));
        }
    }
}

#[cfg(test)]
mod membership_tests {
    use super::*;
    use proviso::constraints::ONE_OF;

    #[test]
    fn one_of_uses_strict_equality() {
        let candidates = [s("a"), s("b"), s("c")];
        assert!(ONE_OF(&s("b"), &candidates));
        assert!(!ONE_OF(&s("d"), &candidates));
        // A number never equals its string rendering.
        assert!(!ONE_OF(&n(1.0), &[s("1")]));
    }

    #[test]
    fn one_of_with_no_candidates_fails_present_values() {
        assert!(!ONE_OF(&s("a"), &[]));
    }
}
