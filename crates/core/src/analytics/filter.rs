use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{ExamRecord, StudyPlan, StudyRecord};

/// Inclusive date bounds; either side may be left open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Anything that can be filtered like a study session.
pub trait StudyEntry {
    fn entry_date(&self) -> NaiveDate;
    fn entry_subject(&self) -> &str;
    fn entry_chapter(&self) -> &str;
    /// Plans carry no material, so material filters do not apply to them.
    fn entry_material(&self) -> Option<&str>;
}

impl StudyEntry for StudyRecord {
    fn entry_date(&self) -> NaiveDate {
        self.date()
    }

    fn entry_subject(&self) -> &str {
        self.subject()
    }

    fn entry_chapter(&self) -> &str {
        self.chapter()
    }

    fn entry_material(&self) -> Option<&str> {
        Some(self.book_material())
    }
}

impl StudyEntry for StudyPlan {
    fn entry_date(&self) -> NaiveDate {
        self.plan_date()
    }

    fn entry_subject(&self) -> &str {
        self.subject()
    }

    fn entry_chapter(&self) -> &str {
        self.chapter()
    }

    fn entry_material(&self) -> Option<&str> {
        None
    }
}

fn allows(set: &BTreeSet<String>, value: &str) -> bool {
    set.is_empty() || set.contains(value)
}

fn to_set<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

//
// ─── STUDY FILTER ──────────────────────────────────────────────────────────────
//

/// Dashboard filter selections for study records and plans.
///
/// Every criterion is optional: an empty set or open bound matches everything,
/// and the criteria combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyFilter {
    pub subjects: BTreeSet<String>,
    pub chapters: BTreeSet<String>,
    pub materials: BTreeSet<String>,
    pub dates: DateRange,
}

impl StudyFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects = to_set(subjects);
        self
    }

    #[must_use]
    pub fn with_chapters<I, S>(mut self, chapters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chapters = to_set(chapters);
        self
    }

    #[must_use]
    pub fn with_materials<I, S>(mut self, materials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.materials = to_set(materials);
        self
    }

    #[must_use]
    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.dates = DateRange::new(start, end);
        self
    }

    /// True when no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
            && self.chapters.is_empty()
            && self.materials.is_empty()
            && self.dates.is_unbounded()
    }

    #[must_use]
    pub fn matches<E: StudyEntry + ?Sized>(&self, entry: &E) -> bool {
        allows(&self.subjects, entry.entry_subject())
            && allows(&self.chapters, entry.entry_chapter())
            && entry
                .entry_material()
                .is_none_or(|material| allows(&self.materials, material))
            && self.dates.contains(entry.entry_date())
    }

    /// Entries that satisfy every criterion, in input order.
    #[must_use]
    pub fn apply<E: StudyEntry + Clone>(&self, entries: &[E]) -> Vec<E> {
        entries.iter().filter(|e| self.matches(*e)).cloned().collect()
    }
}

/// Free-function form of [`StudyFilter::apply`].
#[must_use]
pub fn filter_by<E: StudyEntry + Clone>(entries: &[E], filter: &StudyFilter) -> Vec<E> {
    filter.apply(entries)
}

//
// ─── EXAM FILTER ───────────────────────────────────────────────────────────────
//

/// Dashboard filter selections for exam results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamFilter {
    pub subjects: BTreeSet<String>,
    pub exam_types: BTreeSet<String>,
    pub dates: DateRange,
}

impl ExamFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects = to_set(subjects);
        self
    }

    #[must_use]
    pub fn with_exam_types<I, S>(mut self, exam_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exam_types = to_set(exam_types);
        self
    }

    #[must_use]
    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.dates = DateRange::new(start, end);
        self
    }

    #[must_use]
    pub fn matches(&self, exam: &ExamRecord) -> bool {
        allows(&self.subjects, exam.subject())
            && allows(&self.exam_types, exam.exam_type())
            && self.dates.contains(exam.exam_date())
    }

    #[must_use]
    pub fn apply(&self, exams: &[ExamRecord]) -> Vec<ExamRecord> {
        exams.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}
