//! ConstraintValidator: parses the user's include/exclude number lists.
//!
//! Each field is a comma-separated list of integers. A single bad token
//! invalidates the whole field; nothing is silently dropped or corrected.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::models::draw::{in_range, MAX_NUMBER, PICK_COUNT};

pub const MAX_INCLUDED: usize = PICK_COUNT;
/// At least one full set must stay available.
pub const MAX_EXCLUDED: usize = MAX_NUMBER as usize - PICK_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintField {
    Include,
    Exclude,
}

impl fmt::Display for ConstraintField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintField::Include => write!(f, "include"),
            ConstraintField::Exclude => write!(f, "exclude"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} numbers: '{token}' is not a number")]
    NotANumber {
        field: ConstraintField,
        token: String,
    },

    #[error("{field} numbers: {value} is outside 1-45")]
    OutOfRange { field: ConstraintField, value: i64 },

    #[error("{field} numbers: {value} is listed more than once")]
    Duplicate { field: ConstraintField, value: u8 },

    #[error("at most 6 numbers can be included, got {count}")]
    TooManyIncluded { count: usize },

    #[error("at most 39 numbers can be excluded, got {count}")]
    TooManyExcluded { count: usize },

    #[error("numbers cannot be both included and excluded: {}", join(.numbers))]
    Overlap { numbers: Vec<u8> },
}

/// Validated constraints. Empty sets mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecommendationConstraints {
    pub include_numbers: BTreeSet<u8>,
    pub exclude_numbers: BTreeSet<u8>,
}

/// Parses and cross-checks both raw fields.
pub fn validate_constraints(
    include_raw: Option<&str>,
    exclude_raw: Option<&str>,
) -> Result<RecommendationConstraints, ValidationError> {
    let include_numbers = parse_field(include_raw, ConstraintField::Include)?;
    if include_numbers.len() > MAX_INCLUDED {
        return Err(ValidationError::TooManyIncluded {
            count: include_numbers.len(),
        });
    }

    let exclude_numbers = parse_field(exclude_raw, ConstraintField::Exclude)?;
    if exclude_numbers.len() > MAX_EXCLUDED {
        return Err(ValidationError::TooManyExcluded {
            count: exclude_numbers.len(),
        });
    }

    let overlap: Vec<u8> = include_numbers
        .intersection(&exclude_numbers)
        .copied()
        .collect();
    if !overlap.is_empty() {
        return Err(ValidationError::Overlap { numbers: overlap });
    }

    Ok(RecommendationConstraints {
        include_numbers,
        exclude_numbers,
    })
}

fn parse_field(raw: Option<&str>, field: ConstraintField) -> Result<BTreeSet<u8>, ValidationError> {
    let mut numbers = BTreeSet::new();

    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(numbers);
    };

    for token in raw.split(',').map(str::trim) {
        let value: i64 = token.parse().map_err(|_| ValidationError::NotANumber {
            field,
            token: token.to_string(),
        })?;

        let number = u8::try_from(value)
            .ok()
            .filter(|&n| in_range(n))
            .ok_or(ValidationError::OutOfRange { field, value })?;

        if !numbers.insert(number) {
            return Err(ValidationError::Duplicate {
                field,
                value: number,
            });
        }
    }

    Ok(numbers)
}

fn join(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
