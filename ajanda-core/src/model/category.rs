//! Event categories and the optional fields each one exposes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Category row as returned by `GET /event-categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
}

impl Category {
    pub fn kind(&self) -> Option<CategoryKind> {
        CategoryKind::try_from(self.category_id).ok()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category_name)
    }
}

/// The closed set of event categories known to the backend (ids 1 to 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum CategoryKind {
    Meeting,
    Visitor,
    Audit,
    Ceremony,
    PressConference,
    Seminar,
    ReportAnalysis,
    Other,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 8] = [
        CategoryKind::Meeting,
        CategoryKind::Visitor,
        CategoryKind::Audit,
        CategoryKind::Ceremony,
        CategoryKind::PressConference,
        CategoryKind::Seminar,
        CategoryKind::ReportAnalysis,
        CategoryKind::Other,
    ];

    pub fn id(self) -> i64 {
        match self {
            CategoryKind::Meeting => 1,
            CategoryKind::Visitor => 2,
            CategoryKind::Audit => 3,
            CategoryKind::Ceremony => 4,
            CategoryKind::PressConference => 5,
            CategoryKind::Seminar => 6,
            CategoryKind::ReportAnalysis => 7,
            CategoryKind::Other => 8,
        }
    }

    /// Fallback label, used when the backend category list is unavailable.
    pub fn label(self) -> &'static str {
        match self {
            CategoryKind::Meeting => "Meeting",
            CategoryKind::Visitor => "Visitor",
            CategoryKind::Audit => "Audit",
            CategoryKind::Ceremony => "Ceremony",
            CategoryKind::PressConference => "Press conference",
            CategoryKind::Seminar => "Seminar",
            CategoryKind::ReportAnalysis => "Report analysis",
            CategoryKind::Other => "Other",
        }
    }

    /// Optional event fields shown and editable for this category.
    pub fn fields(self) -> FieldSet {
        match self {
            CategoryKind::Meeting => FieldSet::LOCATION_AND_PARTICIPANT,
            CategoryKind::Visitor => FieldSet::PARTICIPANT,
            CategoryKind::Audit
            | CategoryKind::Ceremony
            | CategoryKind::PressConference
            | CategoryKind::Seminar => FieldSet::LOCATION,
            CategoryKind::ReportAnalysis | CategoryKind::Other => FieldSet::NONE,
        }
    }
}

impl TryFrom<i64> for CategoryKind {
    type Error = ValidationError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        CategoryKind::ALL
            .into_iter()
            .find(|kind| kind.id() == id)
            .ok_or(ValidationError::UnknownCategory(id))
    }
}

impl From<CategoryKind> for i64 {
    fn from(kind: CategoryKind) -> Self {
        kind.id()
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An optional event field whose presence depends on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalField {
    Location,
    Participant,
}

impl OptionalField {
    pub fn label(self) -> &'static str {
        match self {
            OptionalField::Location => "Location",
            OptionalField::Participant => "Participant",
        }
    }
}

/// The optional fields a category exposes, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSet(&'static [OptionalField]);

impl FieldSet {
    pub const NONE: FieldSet = FieldSet(&[]);
    pub const LOCATION: FieldSet = FieldSet(&[OptionalField::Location]);
    pub const PARTICIPANT: FieldSet = FieldSet(&[OptionalField::Participant]);
    pub const LOCATION_AND_PARTICIPANT: FieldSet =
        FieldSet(&[OptionalField::Location, OptionalField::Participant]);

    pub fn contains(&self, field: OptionalField) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = OptionalField> + '_ {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeting_has_location_and_participant() {
        let fields = CategoryKind::Meeting.fields();
        assert!(fields.contains(OptionalField::Location));
        assert!(fields.contains(OptionalField::Participant));
    }

    #[test]
    fn visitor_has_participant_only() {
        let fields = CategoryKind::Visitor.fields();
        assert!(fields.contains(OptionalField::Participant));
        assert!(!fields.contains(OptionalField::Location));
    }

    #[test]
    fn location_only_categories() {
        for id in 3..=6 {
            let fields = CategoryKind::try_from(id).unwrap().fields();
            assert!(fields.contains(OptionalField::Location), "category {id}");
            assert!(!fields.contains(OptionalField::Participant), "category {id}");
        }
    }

    #[test]
    fn report_and_other_have_no_optional_fields() {
        for id in [7, 8] {
            let fields = CategoryKind::try_from(id).unwrap().fields();
            assert!(fields.is_empty());
            assert!(!fields.contains(OptionalField::Location));
            assert!(!fields.contains(OptionalField::Participant));
        }
    }

    #[test]
    fn ids_round_trip_through_the_enum() {
        for kind in CategoryKind::ALL {
            assert_eq!(CategoryKind::try_from(kind.id()), Ok(kind));
        }
        assert_eq!(
            CategoryKind::try_from(0),
            Err(ValidationError::UnknownCategory(0))
        );
        assert_eq!(
            CategoryKind::try_from(9),
            Err(ValidationError::UnknownCategory(9))
        );
    }

    #[test]
    fn deserializes_from_backend_integers() {
        let kind: CategoryKind = serde_json::from_str("5").unwrap();
        assert_eq!(kind, CategoryKind::PressConference);
        assert!(serde_json::from_str::<CategoryKind>("42").is_err());
        assert_eq!(serde_json::to_string(&CategoryKind::Other).unwrap(), "8");
    }

    #[test]
    fn category_row_maps_to_kind() {
        let row: Category =
            serde_json::from_str(r#"{"category_id": 2, "category_name": "Ziyaretçi"}"#).unwrap();
        assert_eq!(row.kind(), Some(CategoryKind::Visitor));
        assert_eq!(row.to_string(), "Ziyaretçi");
    }
}
