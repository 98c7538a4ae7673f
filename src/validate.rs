//! Optional post-parse checks.
//!
//! The parser accepts schemas with no variants and with repeated variant
//! names. Both can be rejected here; neither is on by default.

use std::collections::HashSet;

use crate::error::ParseError;
use crate::model::Schema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationRules {
    /// Reject a schema that declares no variants.
    pub require_variants: bool,
    /// Reject a schema that declares the same variant name twice.
    pub unique_variant_names: bool,
}

pub fn validate(schema: &Schema, rules: &ValidationRules) -> Result<(), ParseError> {
    if rules.require_variants && schema.variants().is_empty() {
        return Err(ParseError::NoVariants { schema: schema.name().to_string() });
    }
    if rules.unique_variant_names {
        let mut seen = HashSet::new();
        for variant in schema.variants() {
            if !seen.insert(variant.name()) {
                return Err(ParseError::DuplicateVariant {
                    line: variant.line(),
                    name: variant.name().to_string(),
                });
            }
        }
    }
    Ok(())
}
