use chrono::{DateTime, TimeDelta};
use cronfig::{CronExpression, Result};
use rstest::rstest;

/// Monotonicity, satisfaction and minimality of `next_occurrence`, checked by
/// an exhaustive scan over every minute between the basis and the result.
#[rstest]
#[case("* * * * *", "2024-05-27T10:30:00Z")]
#[case("*/10 * * * *", "2024-05-27T00:00:00Z")]
#[case("00 * * * *", "2024-05-27T00:59:00Z")]
#[case("00,30 0-6 * * *", "2019-05-26T01:00:00Z")]
#[case("00 12 1,2 1,2,3 *", "2024-01-01T12:00:00Z")]
#[case("* * * * 1", "2024-05-24T23:59:00Z")]
#[case("00 00 1 * *", "2024-05-27T23:59:00Z")]
#[case("15,45 9-17 * * *", "2024-05-27T08:00:00Z")]
#[case("30 14 * * *", "2024-05-27T15:00:00Z")]
fn next_occurrence_is_minimal_and_satisfying(#[case] expression: &str, #[case] basis: &str) -> Result<()> {
    let expression = CronExpression::new(expression)?;
    let basis = DateTime::parse_from_rfc3339(basis).unwrap();

    let next = expression.next_occurrence(&basis);
    assert!(next > basis, "expression = {expression}");
    assert!(expression.matches(&next), "expression = {expression}, next = {next}");

    let mut probe = basis + TimeDelta::minutes(1);
    while probe < next {
        assert!(
            !expression.matches(&probe),
            "expression = {expression} matched {probe} before {next}"
        );
        probe = probe + TimeDelta::minutes(1);
    }

    Ok(())
}

#[test]
fn chained_occurrences_stay_monotonic() -> Result<()> {
    let expression = CronExpression::new("*/10 * * * *")?;
    let mut basis = DateTime::parse_from_rfc3339("2024-05-27T00:00:00Z").unwrap();

    for _ in 0..100 {
        let next = expression.next_occurrence(&basis);
        assert!(next > basis);
        assert!(expression.matches(&next));
        basis = next;
    }

    Ok(())
}
