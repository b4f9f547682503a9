//! Product-identifier resolution for a fixed candidate page.
//!
//! Pages with sibling colour/size listings embed a variant-configuration
//! payload in an inline script; the payload maps each identifier to its
//! dimension values. Pages without variants carry a single identifier in a
//! hidden form field. The presence of the variant script decides which path
//! applies: once it is seen, the single-identifier fallback is never
//! consulted, even when the payload turns out to be unusable.

use thiserror::Error;

use asinmap_core::{is_match, FailureReason};

use crate::dom::Page;

/// Marks the script block that carries the variant configuration.
const VARIANT_SCRIPT_MARKER: &str = "twister-js-init-mason-data";
/// Key naming the payload object inside the marker script.
const PAYLOAD_KEY: &str = "dataToReturn";
/// Map of identifier → ordered dimension values inside the payload.
const VALUES_KEY: &str = "dimensionValuesDisplayData";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VariantError {
    #[error("variant dimensions not present on page")]
    DimensionsMissing,

    #[error("no variant entry matched the given size and colour")]
    NoMatchingVariant,

    #[error("product identifier field not present on page")]
    AsinNotPresent,

    #[error("page colour or size does not match the input")]
    SizeColourMismatch,
}

impl From<VariantError> for FailureReason {
    fn from(e: VariantError) -> Self {
        match e {
            VariantError::DimensionsMissing => FailureReason::DimensionsMissing,
            VariantError::NoMatchingVariant => FailureReason::NoMatchingVariant,
            VariantError::AsinNotPresent => FailureReason::AsinNotPresent,
            VariantError::SizeColourMismatch => FailureReason::SizeColourMismatch,
        }
    }
}

/// Resolves the identifier for the given colour and size on a candidate
/// page.
///
/// # Errors
///
/// Returns a [`VariantError`] naming the specific way resolution failed;
/// each maps onto one diagnostic row in the failure sink.
pub fn resolve_asin(page: &Page, colour: &str, size: &str) -> Result<String, VariantError> {
    for script in page.script_contents() {
        if script.contains(VARIANT_SCRIPT_MARKER) {
            return resolve_from_variant_script(&script, colour, size);
        }
    }
    resolve_single_asin(page, colour, size)
}

/// Structured path: pull the embedded payload out of the marker script and
/// walk its identifier table.
fn resolve_from_variant_script(
    script: &str,
    colour: &str,
    size: &str,
) -> Result<String, VariantError> {
    let payload = extract_payload(script).ok_or(VariantError::DimensionsMissing)?;
    let json: serde_json::Value =
        serde_json::from_str(payload).map_err(|_| VariantError::DimensionsMissing)?;

    let dimensions = json
        .get("dimensions")
        .and_then(|d| d.as_array())
        .ok_or(VariantError::DimensionsMissing)?;

    let mut colour_key = None;
    let mut size_key = None;
    for (idx, dimension) in dimensions.iter().enumerate() {
        let name = dimension.as_str().unwrap_or_default().to_lowercase();
        tracing::debug!(dimension = %name, "variant dimension");
        if name.contains("color") || name.contains("colour") {
            colour_key = Some(idx);
        }
        if name.contains("size") {
            size_key = Some(idx);
        }
    }
    let (Some(colour_key), Some(size_key)) = (colour_key, size_key) else {
        tracing::debug!("could not locate colour and size dimension keys");
        return Err(VariantError::DimensionsMissing);
    };

    let entries = json
        .get(VALUES_KEY)
        .and_then(|v| v.as_object())
        .ok_or(VariantError::DimensionsMissing)?;

    // Document order; the first entry matching both dimensions wins.
    for (asin, values) in entries {
        let entry_colour = values
            .get(colour_key)
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let entry_size = values
            .get(size_key)
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        tracing::debug!(asin = %asin, colour = %entry_colour, size = %entry_size, "variant entry");
        if is_match(colour, entry_colour) && is_match(size, entry_size) {
            tracing::debug!(asin = %asin, "matched variant entry");
            return Ok(asin.clone());
        }
    }

    Err(VariantError::NoMatchingVariant)
}

/// Fallback for pages without a variant script: a single identifier field,
/// guarded by deliberately loose colour/size checks.
fn resolve_single_asin(page: &Page, colour: &str, size: &str) -> Result<String, VariantError> {
    tracing::debug!("no variant script; looking for a single product identifier");
    let Some(asin) = page
        .find_first("input#ASIN")
        .and_then(|node| node.attr("value").map(str::to_string))
    else {
        return Err(VariantError::AsinNotPresent);
    };

    if loose_dimension_match(page, "div#variation_color_name", colour)
        && loose_dimension_match(page, "div#variation_size_name", size)
    {
        tracing::debug!(asin = %asin, "using single product identifier");
        Ok(asin)
    } else {
        Err(VariantError::SizeColourMismatch)
    }
}

/// Loose single-product gate: passes when the input value is empty, the
/// page exposes no selection element for the dimension, or the selected
/// text contains the input value (case-insensitive substring — looser on
/// purpose than the fuzzy threshold).
fn loose_dimension_match(page: &Page, region_selector: &str, wanted: &str) -> bool {
    if wanted.is_empty() {
        return true;
    }
    let Some(region) = page.find_first(region_selector) else {
        return true;
    };
    let Some(selection) = region.find_first("span.selection") else {
        return true;
    };
    let selected = selection.text();
    tracing::debug!(wanted, selected = %selected, "checking single-product dimension");
    selected.trim().to_uppercase().contains(&wanted.to_uppercase())
}

/// The payload is the first object nested inside the balanced `{…}` span
/// that mentions [`PAYLOAD_KEY`]. The script has no reliable end delimiter
/// other than brace balance, hence the span scan.
fn extract_payload(script: &str) -> Option<&str> {
    for span in balanced_object_spans(script) {
        if span.contains(PAYLOAD_KEY) {
            let interior = &span[1..span.len() - 1];
            return balanced_object_spans(interior).into_iter().next();
        }
    }
    None
}

/// Collects every top-level balanced `{…}` span of `s`, in order.
///
/// Depth-counting scan: push on `{`, pop on `}`, record the span when depth
/// returns to zero. String literals and escape sequences are respected so
/// braces inside quoted values never unbalance the scan; an unterminated
/// span is simply not recorded.
fn balanced_object_spans(s: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut depth: u32 = 0;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escape = false;
    for (i, c) in s.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        if in_string {
            match c {
                '\\' => escape = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            '}' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        spans.push(&s[start..=i]);
                    }
                }
            }
            _ => {}
        }
    }
    spans
}
