//! Multi-field filter criteria for submission listings.
//!
//! A filter is compiled to a tagged predicate list before it reaches a
//! backend. The Postgres backend maps each predicate to a fixed column name
//! and a bind parameter, so no criterion value ever enters query text; the
//! memory backend evaluates the same predicates directly. Both therefore
//! share one set of matching semantics.

use grievance_core::Submission;
use serde::Deserialize;

/// Hard cap on listing results.
pub const MAX_RESULTS: usize = 500;

/// Optional criteria accepted by the listing endpoint.
///
/// Equality criteria are exact and case-sensitive. The free-text term `q`
/// matches case-folded substrings of the id or the description, ANDed with
/// every supplied equality criterion. An empty string is treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionFilter {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub department: Option<String>,
    pub taluk: Option<String>,
    pub firka: Option<String>,
    pub village: Option<String>,
    pub q: Option<String>,
}

/// Recognized filterable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Kind,
    Status,
    Category,
    Department,
    Taluk,
    Firka,
    Village,
    /// Free-text target: id OR description.
    IdOrDescription,
}

impl FilterField {
    /// Column name for equality predicates. Fixed strings only; criterion
    /// values never reach query text.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Kind => "type",
            Self::Status => "status",
            Self::Category => "category",
            Self::Department => "department",
            Self::Taluk => "taluk",
            Self::Firka => "firka",
            Self::Village => "village",
            Self::IdOrDescription => "id",
        }
    }
}

/// Predicate operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Exact, case-sensitive equality.
    Eq,
    /// Case-folded substring match.
    ContainsFolded,
}

/// One compiled criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: FilterField,
    pub op: FilterOp,
    pub value: String,
}

impl Predicate {
    /// Evaluate against a record. This is the reference semantics the
    /// Postgres compilation must agree with.
    pub fn matches(&self, submission: &Submission) -> bool {
        match self.op {
            FilterOp::ContainsFolded => {
                let term = self.value.to_lowercase();
                submission.id.to_lowercase().contains(&term)
                    || submission.description.to_lowercase().contains(&term)
            }
            FilterOp::Eq => match self.field {
                FilterField::Kind => submission.kind.as_str() == self.value,
                FilterField::Status => submission.status == self.value,
                FilterField::Category => submission.category.as_deref() == Some(&self.value),
                FilterField::Department => submission.department.as_deref() == Some(&self.value),
                FilterField::Taluk => submission.taluk == self.value,
                FilterField::Firka => submission.firka == self.value,
                FilterField::Village => submission.village == self.value,
                FilterField::IdOrDescription => false,
            },
        }
    }
}

impl SubmissionFilter {
    /// Compile the supplied criteria to a predicate list. Absent and
    /// empty-string criteria impose no restriction.
    pub fn predicates(&self) -> Vec<Predicate> {
        let equality = [
            (FilterField::Kind, &self.kind),
            (FilterField::Status, &self.status),
            (FilterField::Category, &self.category),
            (FilterField::Department, &self.department),
            (FilterField::Taluk, &self.taluk),
            (FilterField::Firka, &self.firka),
            (FilterField::Village, &self.village),
        ];

        let mut predicates = Vec::new();
        for (field, value) in equality {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                predicates.push(Predicate {
                    field,
                    op: FilterOp::Eq,
                    value: value.to_string(),
                });
            }
        }
        if let Some(term) = self.q.as_deref().filter(|q| !q.is_empty()) {
            predicates.push(Predicate {
                field: FilterField::IdOrDescription,
                op: FilterOp::ContainsFolded,
                value: term.to_string(),
            });
        }
        predicates
    }

    /// True when no criterion restricts the listing.
    pub fn is_unrestricted(&self) -> bool {
        self.predicates().is_empty()
    }
}
