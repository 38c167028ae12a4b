//! Marks aggregation and grading. Everything here is pure: the route
//! handlers fetch rows, this module reduces them, the presentation layer
//! renders the result. No function in this module can fail.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

/// Label used when a mark's subject reference no longer resolves.
pub const UNKNOWN_SUBJECT_LABEL: &str = "Unknown";

/// Letter grades, ordered worst to best so the derived `Ord` matches the
/// academic ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
pub enum Grade {
    #[serde(rename = "F")]
    F,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold table, first match wins, lower bound inclusive. Total over all
/// reals: anything below 40 (including negatives, and NaN, which fails
/// every comparison) lands on F, anything at or above 90 on A+.
pub fn classify_grade(percentage: f64) -> Grade {
    if percentage >= 90.0 {
        Grade::APlus
    } else if percentage >= 80.0 {
        Grade::A
    } else if percentage >= 70.0 {
        Grade::BPlus
    } else if percentage >= 60.0 {
        Grade::B
    } else if percentage >= 50.0 {
        Grade::C
    } else if percentage >= 40.0 {
        Grade::D
    } else {
        Grade::F
    }
}

/// One exam result as read from the store, numeric fields already parsed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MarkEntry {
    pub mark_id: i32,
    pub subject_name: Option<String>,
    pub subject_code: Option<String>,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub max_marks: f64,
    pub exam_date: NaiveDate,
    pub academic_year: String,
}

impl MarkEntry {
    /// Subject label this entry aggregates under.
    pub fn subject_label(&self) -> String {
        self.subject_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_SUBJECT_LABEL.to_string())
    }
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct SubjectAggregate {
    pub obtained: f64,
    pub max: f64,
    /// Contributing exams in input order.
    pub exams: Vec<MarkEntry>,
}

impl SubjectAggregate {
    pub fn percentage(&self) -> f64 {
        if self.max > 0.0 {
            self.obtained / self.max * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportSummary {
    pub total_marks: f64,
    pub total_max_marks: f64,
    pub overall_percentage: f64,
    pub overall_grade: Grade,
}

/// Reduces one student's marks for one academic year into per-subject
/// buckets and an overall summary. Single pass, deterministic; records are
/// taken verbatim (no validation of `marks_obtained` against `max_marks`,
/// and `max_marks <= 0` flows through untouched).
pub fn aggregate(entries: &[MarkEntry]) -> (BTreeMap<String, SubjectAggregate>, ReportSummary) {
    let mut subjects: BTreeMap<String, SubjectAggregate> = BTreeMap::new();

    for entry in entries {
        let bucket = subjects.entry(entry.subject_label()).or_default();
        bucket.obtained += entry.marks_obtained;
        bucket.max += entry.max_marks;
        bucket.exams.push(entry.clone());
    }

    let mut total_marks = 0.0;
    let mut total_max_marks = 0.0;
    for bucket in subjects.values() {
        total_marks += bucket.obtained;
        total_max_marks += bucket.max;
    }

    let overall_percentage = if total_max_marks > 0.0 {
        total_marks / total_max_marks * 100.0
    } else {
        0.0
    };

    let summary = ReportSummary {
        total_marks,
        total_max_marks,
        overall_percentage,
        overall_grade: classify_grade(overall_percentage),
    };

    (subjects, summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(subject: Option<&str>, obtained: f64, max: f64) -> MarkEntry {
        MarkEntry {
            mark_id: 0,
            subject_name: subject.map(|s| s.to_string()),
            subject_code: None,
            exam_type: "midterm".to_string(),
            marks_obtained: obtained,
            max_marks: max,
            exam_date: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
            academic_year: "2024-2025".to_string(),
        }
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(classify_grade(90.0), Grade::APlus);
        assert_eq!(classify_grade(89.999), Grade::A);
        assert_eq!(classify_grade(80.0), Grade::A);
        assert_eq!(classify_grade(70.0), Grade::BPlus);
        assert_eq!(classify_grade(60.0), Grade::B);
        assert_eq!(classify_grade(50.0), Grade::C);
        assert_eq!(classify_grade(40.0), Grade::D);
        assert_eq!(classify_grade(39.999), Grade::F);
        assert_eq!(classify_grade(0.0), Grade::F);
        assert_eq!(classify_grade(-5.0), Grade::F);
        assert_eq!(classify_grade(150.0), Grade::APlus);
        assert_eq!(classify_grade(f64::NAN), Grade::F);
    }

    #[test]
    fn grade_is_monotonic() {
        let samples = [
            -50.0, -0.001, 0.0, 10.0, 39.999, 40.0, 49.5, 50.0, 59.9, 60.0, 69.0, 70.0, 79.9,
            80.0, 89.999, 90.0, 100.0, 150.0,
        ];

        for window in samples.windows(2) {
            assert!(
                classify_grade(window[1]) >= classify_grade(window[0]),
                "grade dropped between {} and {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn empty_input_yields_zero_summary() {
        let (subjects, summary) = aggregate(&[]);

        assert!(subjects.is_empty());
        assert_eq!(summary.total_marks, 0.0);
        assert_eq!(summary.total_max_marks, 0.0);
        assert_eq!(summary.overall_percentage, 0.0);
        assert_eq!(summary.overall_grade, Grade::F);
    }

    #[test]
    fn totals_match_input_sums_regardless_of_grouping() {
        let entries = [
            entry(Some("Math"), 12.0, 20.0),
            entry(Some("Science"), 7.5, 10.0),
            entry(None, 3.0, 5.0),
            entry(Some("Math"), 18.0, 20.0),
        ];

        let (_, summary) = aggregate(&entries);

        let expected_obtained: f64 = entries.iter().map(|e| e.marks_obtained).sum();
        let expected_max: f64 = entries.iter().map(|e| e.max_marks).sum();
        assert_eq!(summary.total_marks, expected_obtained);
        assert_eq!(summary.total_max_marks, expected_max);
    }

    #[test]
    fn zero_max_marks_never_divides() {
        let entries = [entry(Some("Math"), 10.0, 0.0), entry(Some("Science"), 5.0, 0.0)];

        let (subjects, summary) = aggregate(&entries);

        assert_eq!(summary.overall_percentage, 0.0);
        assert!(summary.overall_percentage.is_finite());
        assert_eq!(summary.overall_grade, Grade::F);
        // the degenerate records still pass through
        assert_eq!(subjects["Math"].obtained, 10.0);
        assert_eq!(subjects["Math"].percentage(), 0.0);
    }

    #[test]
    fn unresolved_subject_falls_back_to_unknown() {
        let entries = [entry(None, 8.0, 10.0)];

        let (subjects, _) = aggregate(&entries);

        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[UNKNOWN_SUBJECT_LABEL].obtained, 8.0);
    }

    #[test]
    fn report_card_scenario() {
        let entries = [
            entry(Some("Math"), 45.0, 50.0),
            entry(Some("Math"), 40.0, 50.0),
            entry(Some("Science"), 30.0, 50.0),
        ];

        let (subjects, summary) = aggregate(&entries);

        assert_eq!(subjects["Math"].obtained, 85.0);
        assert_eq!(subjects["Math"].max, 100.0);
        assert_eq!(subjects["Math"].exams.len(), 2);
        assert_eq!(subjects["Science"].obtained, 30.0);
        assert_eq!(subjects["Science"].max, 50.0);

        assert_eq!(summary.total_marks, 115.0);
        assert_eq!(summary.total_max_marks, 150.0);
        assert!((summary.overall_percentage - 76.666_666_666_666_67).abs() < 1e-9);
        assert_eq!(summary.overall_grade, Grade::BPlus);
    }

    #[test]
    fn exam_lists_keep_input_order() {
        let mut first = entry(Some("Math"), 10.0, 20.0);
        first.exam_type = "quiz".to_string();
        let mut second = entry(Some("Math"), 15.0, 20.0);
        second.exam_type = "final".to_string();

        let (subjects, _) = aggregate(&[first, second]);

        let exams = &subjects["Math"].exams;
        assert_eq!(exams[0].exam_type, "quiz");
        assert_eq!(exams[1].exam_type, "final");
    }
}
