use staffbook_core::{Employee, Review, ReviewValidationError, MIN_REVIEW_YEAR};
use std::collections::HashMap;

fn directory_with(ids: &[i64]) -> HashMap<i64, Employee> {
    ids.iter()
        .map(|&id| {
            (
                id,
                Employee {
                    id,
                    name: format!("Employee {id}"),
                    job_title: "Engineer".to_string(),
                },
            )
        })
        .collect()
}

#[test]
fn new_review_starts_transient_with_validated_fields() {
    let directory = directory_with(&[1]);
    let review = Review::new(2023, "Met expectations", 1, &directory).unwrap();

    assert_eq!(review.id(), None);
    assert!(!review.is_persisted());
    assert_eq!(review.year(), 2023);
    assert_eq!(review.summary(), "Met expectations");
    assert_eq!(review.employee_id(), 1);
}

#[test]
fn minimum_year_is_accepted() {
    let directory = directory_with(&[1]);
    let review = Review::new(MIN_REVIEW_YEAR, "Edge year", 1, &directory).unwrap();
    assert_eq!(review.year(), MIN_REVIEW_YEAR);
}

#[test]
fn year_before_minimum_is_rejected() {
    let directory = directory_with(&[1]);
    let err = Review::new(1999, "Too early", 1, &directory).unwrap_err();
    assert_eq!(err, ReviewValidationError::YearBeforeMinimum { year: 1999 });
}

#[test]
fn empty_summary_is_rejected() {
    let directory = directory_with(&[1]);
    let err = Review::new(2023, "", 1, &directory).unwrap_err();
    assert_eq!(err, ReviewValidationError::EmptySummary);
}

#[test]
fn unknown_employee_is_rejected() {
    let directory = directory_with(&[1]);
    let err = Review::new(2023, "Ghost employee", 999, &directory).unwrap_err();
    assert_eq!(err, ReviewValidationError::UnknownEmployee(999));
}

#[test]
fn rejected_setter_keeps_prior_value() {
    let directory = directory_with(&[1, 2]);
    let mut review = Review::new(2023, "Met expectations", 1, &directory).unwrap();

    let err = review.set_year(1995).unwrap_err();
    assert_eq!(err, ReviewValidationError::YearBeforeMinimum { year: 1995 });
    assert_eq!(review.year(), 2023);

    let err = review.set_summary("").unwrap_err();
    assert_eq!(err, ReviewValidationError::EmptySummary);
    assert_eq!(review.summary(), "Met expectations");

    let err = review.set_employee_id(999, &directory).unwrap_err();
    assert_eq!(err, ReviewValidationError::UnknownEmployee(999));
    assert_eq!(review.employee_id(), 1);
}

#[test]
fn accepted_setters_mutate_in_place() {
    let directory = directory_with(&[1, 2]);
    let mut review = Review::new(2023, "Met expectations", 1, &directory).unwrap();

    review.set_year(2024).unwrap();
    review.set_summary("Exceeded expectations").unwrap();
    review.set_employee_id(2, &directory).unwrap();

    assert_eq!(review.year(), 2024);
    assert_eq!(review.summary(), "Exceeded expectations");
    assert_eq!(review.employee_id(), 2);
}

#[test]
fn transient_review_display_marks_missing_id() {
    let directory = directory_with(&[1]);
    let review = Review::new(2023, "Met expectations", 1, &directory).unwrap();

    assert_eq!(
        review.to_string(),
        "<Review unsaved: 2023, Met expectations, Employee: 1>"
    );
}

#[test]
fn review_serialization_uses_expected_wire_fields() {
    let directory = directory_with(&[1]);
    let review = Review::new(2023, "Met expectations", 1, &directory).unwrap();

    let json = serde_json::to_value(&review).unwrap();
    assert_eq!(json["id"], serde_json::Value::Null);
    assert_eq!(json["year"], 2023);
    assert_eq!(json["summary"], "Met expectations");
    assert_eq!(json["employee_id"], 1);
}
