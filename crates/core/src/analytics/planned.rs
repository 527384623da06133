use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{StudyPlan, StudyRecord};

/// Planned and logged hours for one (date, subject, chapter).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedVsActualRow {
    pub date: NaiveDate,
    pub subject: String,
    pub chapter: String,
    pub planned_hours: f64,
    pub actual_hours: f64,
    /// `actual_hours - planned_hours`; positive when more was studied than planned.
    pub difference: f64,
}

#[derive(Default)]
struct Hours {
    planned: f64,
    actual: f64,
}

/// Full outer join of plan hours and logged hours on (date, subject, chapter).
///
/// A key present on only one side reports `0.0` for the other. Rows come back
/// newest date first; rows sharing a date are ordered by subject, then chapter.
#[must_use]
pub fn planned_vs_actual(plans: &[StudyPlan], records: &[StudyRecord]) -> Vec<PlannedVsActualRow> {
    let mut joined: BTreeMap<(NaiveDate, &str, &str), Hours> = BTreeMap::new();

    for plan in plans {
        joined
            .entry((plan.plan_date(), plan.subject(), plan.chapter()))
            .or_default()
            .planned += plan.planned_hours();
    }
    for record in records {
        joined
            .entry((record.date(), record.subject(), record.chapter()))
            .or_default()
            .actual += record.hours_studied();
    }

    let mut rows: Vec<_> = joined
        .into_iter()
        .map(|((date, subject, chapter), hours)| PlannedVsActualRow {
            date,
            subject: subject.to_owned(),
            chapter: chapter.to_owned(),
            planned_hours: hours.planned,
            actual_hours: hours.actual,
            difference: hours.actual - hours.planned,
        })
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::{day, plan, record};

    #[test]
    fn empty_inputs_give_empty_result() {
        assert!(planned_vs_actual(&[], &[]).is_empty());
    }

    #[test]
    fn plan_without_record_reports_zero_actual() {
        let plans = [plan(1, day(2024, 1, 1), "Math", "Algebra", 2.0)];
        let rows = planned_vs_actual(&plans, &[]);
        assert_eq!(
            rows,
            [PlannedVsActualRow {
                date: day(2024, 1, 1),
                subject: "Math".into(),
                chapter: "Algebra".into(),
                planned_hours: 2.0,
                actual_hours: 0.0,
                difference: -2.0,
            }]
        );
    }

    #[test]
    fn record_without_plan_takes_record_date() {
        let records = [record(1, day(2024, 1, 5), "Math", "Algebra", "KS QB", 1.0)];
        let rows = planned_vs_actual(&[], &records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, day(2024, 1, 5));
        assert_eq!(rows[0].planned_hours, 0.0);
        assert_eq!(rows[0].actual_hours, 1.0);
    }

    #[test]
    fn matching_keys_keep_separate_columns() {
        let plans = [plan(1, day(2024, 1, 1), "Math", "Algebra", 2.0)];
        let records = [record(1, day(2024, 1, 1), "Math", "Algebra", "KS QB", 1.5)];
        let rows = planned_vs_actual(&plans, &records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].planned_hours, 2.0);
        assert_eq!(rows[0].actual_hours, 1.5);
        assert_eq!(rows[0].difference, -0.5);
    }

    #[test]
    fn sums_within_key_and_sorts_newest_first() {
        let plans = [
            plan(1, day(2024, 1, 1), "Math", "Algebra", 1.0),
            plan(2, day(2024, 1, 1), "Math", "Algebra", 0.5),
            plan(3, day(2024, 1, 3), "Science", "Electricity", 2.0),
        ];
        let records = [
            record(1, day(2024, 1, 1), "Math", "Algebra", "KS QB", 1.0),
            record(2, day(2024, 1, 1), "Math", "Algebra", "US Notes", 1.0),
            record(3, day(2024, 1, 2), "English", "Bholi", "US Notes", 0.5),
            record(4, day(2024, 1, 3), "Math", "Circles", "KS QB", 1.0),
        ];
        let rows = planned_vs_actual(&plans, &records);
        let keys: Vec<_> = rows
            .iter()
            .map(|r| (r.date, r.subject.as_str(), r.chapter.as_str()))
            .collect();
        assert_eq!(
            keys,
            [
                (day(2024, 1, 3), "Math", "Circles"),
                (day(2024, 1, 3), "Science", "Electricity"),
                (day(2024, 1, 2), "English", "Bholi"),
                (day(2024, 1, 1), "Math", "Algebra"),
            ]
        );
        let algebra = &rows[3];
        assert_eq!(algebra.planned_hours, 1.5);
        assert_eq!(algebra.actual_hours, 2.0);
        assert_eq!(algebra.difference, 0.5);
    }

    #[test]
    fn difference_is_serialized_with_the_row() {
        let plans = [plan(1, day(2024, 1, 1), "Math", "Algebra", 2.0)];
        let records = [record(1, day(2024, 1, 1), "Math", "Algebra", "KS QB", 3.0)];
        let rows = planned_vs_actual(&plans, &records);
        let value = toml::Value::try_from(&rows[0]).unwrap();
        assert_eq!(value.get("difference").and_then(toml::Value::as_float), Some(1.0));
    }
}
