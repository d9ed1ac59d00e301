//! Assertion helpers for headless scenario steps.

use folio_core::Property;

use crate::page::Page;

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

pub fn evaluate_assert_property(
    page: &Page,
    class: &str,
    index: usize,
    property: &str,
    expected: f32,
    tolerance: f32,
) -> AssertionResult {
    let Ok(parsed) = property.parse::<Property>() else {
        return AssertionResult::failed(
            "unknown_property",
            format!("{class}[{index}]: unknown property '{property}'"),
        );
    };
    let Some(actual) = page.property_of(class, index, parsed) else {
        return AssertionResult::failed(
            "missing_element",
            format!("{class}[{index}]: element not found"),
        );
    };
    if (actual - expected).abs() <= tolerance {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "value_mismatch",
            format!("{class}[{index}].{parsed}: expected {expected} ± {tolerance}, got {actual}"),
        )
    }
}

pub fn evaluate_assert_text(
    page: &Page,
    class: &str,
    index: usize,
    expected: &str,
) -> AssertionResult {
    if page.query(class).get(index).is_none() {
        return AssertionResult::failed(
            "missing_element",
            format!("{class}[{index}]: element not found"),
        );
    }
    let actual = page.text_of(class, index).unwrap_or_default();
    if actual == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "text_mismatch",
            format!("{class}[{index}]: expected '{expected}', got '{actual}'"),
        )
    }
}
