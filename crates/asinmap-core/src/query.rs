//! Search-query relaxation planning.
//!
//! Catalog names frequently carry the SKU and sometimes the colour as noise
//! tokens at the front ("ABC123 Red Ankle Boot"). When the verbatim name
//! fails to match, the plan retries without those tokens, in order: full
//! name, name minus the SKU-like leading token, then minus a colour-like
//! token as well. A token is only dropped when it appears at the start of
//! the compared field.

/// The ordered queries to attempt for one input row. Pull-based: callers
/// take the next query only after the previous one failed to produce a
/// confident match. At most three entries; not restartable once exhausted.
#[derive(Debug)]
pub struct QueryPlan {
    queries: std::vec::IntoIter<String>,
}

impl QueryPlan {
    #[must_use]
    pub fn new(name: &str, sku: &str, colour: &str) -> Self {
        let mut queries = Vec::with_capacity(3);

        let full = collapse_whitespace(name);
        if !full.is_empty() {
            queries.push(full.clone());
            if leading_token_starts(&full, sku) {
                let relaxed = delete_first_word(&full);
                if !relaxed.is_empty() {
                    queries.push(relaxed.clone());
                    if leading_token_starts(&relaxed, colour) {
                        let shorter = delete_first_word(&relaxed);
                        if !shorter.is_empty() {
                            queries.push(shorter);
                        }
                    }
                }
            }
        }

        Self {
            queries: queries.into_iter(),
        }
    }
}

impl Iterator for QueryPlan {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.queries.next()
    }
}

/// `true` when the first whitespace-delimited token of `name` appears at
/// the start of `field`, case-insensitively. This is the exact direction
/// the relaxation rule uses: the token must be a prefix of the SKU or
/// colour, not the other way round.
fn leading_token_starts(name: &str, field: &str) -> bool {
    let Some(token) = name.split_whitespace().next() else {
        return false;
    };
    if field.is_empty() {
        return false;
    }
    field.to_uppercase().starts_with(&token.to_uppercase())
}

/// Drops the leading token, then trims surrounding hyphens and whitespace
/// left behind ("ABC123 - Red Boot" relaxes to "Red Boot").
fn delete_first_word(s: &str) -> String {
    let rest = s
        .split_whitespace()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    rest.trim().trim_matches('-').trim().to_string()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
