//! Configuration types for the diff engine.

use super::attributes::{AttributeRule, COMPARED_ATTRIBUTES, EXTENDED_ATTRIBUTES};

/// Options controlling what the diff engine compares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Compare class sets only and skip per-class field comparison
    pub classes_only: bool,
    /// Also compare `external_name`, `override_count` and `float_tolerance`
    pub extended_attributes: bool,
}

impl DiffOptions {
    /// Attribute rule table implied by these options.
    #[must_use]
    pub fn attribute_rules(&self) -> Vec<AttributeRule> {
        let mut rules = COMPARED_ATTRIBUTES.to_vec();
        if self.extended_attributes {
            rules.extend_from_slice(EXTENDED_ATTRIBUTES);
        }
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_selection() {
        assert_eq!(
            DiffOptions::default().attribute_rules().len(),
            COMPARED_ATTRIBUTES.len()
        );
        let extended = DiffOptions {
            extended_attributes: true,
            ..DiffOptions::default()
        };
        assert_eq!(
            extended.attribute_rules().len(),
            COMPARED_ATTRIBUTES.len() + EXTENDED_ATTRIBUTES.len()
        );
    }
}
