use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Curriculum bundled with the crate, used when no catalog file is configured.
const BUILTIN_CATALOG: &str = include_str!("../../data/cbse_class10.toml");

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog is not valid TOML: {0}")]
    Parse(String),

    #[error("catalog must list at least one subject")]
    NoSubjects,

    #[error("subject name cannot be empty")]
    EmptySubjectName,

    #[error("subject listed twice: {0}")]
    DuplicateSubject(String),

    #[error("subject {0} has no chapters")]
    NoChapters(String),

    #[error("chapter listed twice under {subject}: {chapter}")]
    DuplicateChapter { subject: String, chapter: String },

    #[error("catalog must list at least one book or material")]
    NoMaterials,

    #[error("catalog must list at least one exam type")]
    NoExamTypes,
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// One subject and the chapters that may be logged under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectEntry {
    pub name: String,
    pub chapters: Vec<String>,
}

/// Static curriculum data: subjects with their chapters, study materials and
/// exam types. Loaded once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    subjects: Vec<SubjectEntry>,
    materials: Vec<String>,
    exam_types: Vec<String>,
}

impl Catalog {
    /// Builds a catalog and checks its shape.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when a list is empty or a name is duplicated.
    pub fn new(
        subjects: Vec<SubjectEntry>,
        materials: Vec<String>,
        exam_types: Vec<String>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            subjects,
            materials,
            exam_types,
        };
        catalog.check()?;
        Ok(catalog)
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed TOML, or a shape error.
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Self = toml::from_str(raw).map_err(|e| CatalogError::Parse(e.to_string()))?;
        catalog.check()?;
        Ok(catalog)
    }

    /// The CBSE Class 10 curriculum shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled data file is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.subjects.is_empty() {
            return Err(CatalogError::NoSubjects);
        }
        let mut names = HashSet::new();
        for subject in &self.subjects {
            if subject.name.trim().is_empty() {
                return Err(CatalogError::EmptySubjectName);
            }
            if !names.insert(subject.name.as_str()) {
                return Err(CatalogError::DuplicateSubject(subject.name.clone()));
            }
            if subject.chapters.is_empty() {
                return Err(CatalogError::NoChapters(subject.name.clone()));
            }
            let mut chapters = HashSet::new();
            for chapter in &subject.chapters {
                if !chapters.insert(chapter.as_str()) {
                    return Err(CatalogError::DuplicateChapter {
                        subject: subject.name.clone(),
                        chapter: chapter.clone(),
                    });
                }
            }
        }
        if self.materials.is_empty() {
            return Err(CatalogError::NoMaterials);
        }
        if self.exam_types.is_empty() {
            return Err(CatalogError::NoExamTypes);
        }
        Ok(())
    }

    /// Subject names in catalog order.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().map(|s| s.name.as_str())
    }

    #[must_use]
    pub fn subject_entries(&self) -> &[SubjectEntry] {
        &self.subjects
    }

    /// Chapters listed under `subject`, or an empty slice for unknown subjects.
    #[must_use]
    pub fn chapters(&self, subject: &str) -> &[String] {
        self.subjects
            .iter()
            .find(|s| s.name == subject)
            .map(|s| s.chapters.as_slice())
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn materials(&self) -> &[String] {
        &self.materials
    }

    #[must_use]
    pub fn exam_types(&self) -> &[String] {
        &self.exam_types
    }

    #[must_use]
    pub fn has_subject(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s.name == subject)
    }

    #[must_use]
    pub fn has_chapter(&self, subject: &str, chapter: &str) -> bool {
        self.chapters(subject).iter().any(|c| c == chapter)
    }

    #[must_use]
    pub fn has_material(&self, material: &str) -> bool {
        self.materials.iter().any(|m| m == material)
    }

    #[must_use]
    pub fn has_exam_type(&self, exam_type: &str) -> bool {
        self.exam_types.iter().any(|t| t == exam_type)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
