//! Input rows and per-row outcomes.

use std::fmt;

/// One catalog row to reconcile. Identity is `line_number`: the 1-based
/// record count in the input file, where record 1 is the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    pub sku: String,
    pub name: String,
    pub description: String,
    pub colour: String,
    pub size: String,
    pub line_number: u64,
}

impl InputRow {
    /// Builds a row from raw record fields. Returns `None` when fewer than
    /// five fields are present; extra fields are ignored.
    #[must_use]
    pub fn from_fields(line_number: u64, fields: &[String]) -> Option<Self> {
        if fields.len() < 5 {
            return None;
        }
        Some(Self {
            sku: fields[0].trim().to_string(),
            name: fields[1].trim().to_string(),
            description: fields[2].trim().to_string(),
            colour: fields[3].trim().to_string(),
            size: fields[4].trim().to_string(),
            line_number,
        })
    }
}

/// The fixed diagnostic set for the failure sink. The `Display` strings are
/// the sink contract and must not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    NotEnoughFields,
    NoGoodMatch,
    DimensionsMissing,
    NoMatchingVariant,
    AsinNotPresent,
    SizeColourMismatch,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FailureReason::NotEnoughFields => "Input data error - not enough fields.",
            FailureReason::NoGoodMatch => "Could not find good match.",
            FailureReason::DimensionsMissing => {
                "Match Found but could not locate size and colour dimensions."
            }
            FailureReason::NoMatchingVariant => {
                "Match Found but no variant matched the given size and colour."
            }
            FailureReason::AsinNotPresent => "Match Found but ASIN Not Present",
            FailureReason::SizeColourMismatch => {
                "Match Found but failed on size or colour mismatch."
            }
        };
        f.write_str(text)
    }
}

/// The single outcome every input row resolves to: a confident SKU→ASIN
/// mapping or a diagnostic failure. Never both, never neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Success {
        sku: String,
        asin: String,
    },
    Failure {
        line_number: u64,
        sku: Option<String>,
        reason: FailureReason,
    },
}
