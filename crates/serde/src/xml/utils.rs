//! Helper functions and constants for the XML encoder.

use hl7cvt_er7::{Component, Field, Repetition};

/// HL7 v2.xml namespace URI, carried on the document root.
pub const V2_NAMESPACE: &str = "urn:hl7-org:v2xml";

/// Element name for a field position: `PID.3`.
pub fn field_name(segment_id: &str, index: usize) -> String {
    format!("{}.{}", segment_id, index)
}

/// Element name for a nested position under a field or component element:
/// `PID.3.1`, `PID.3.1.2`.
pub fn child_name(parent: &str, index: usize) -> String {
    format!("{}.{}", parent, index)
}

/// A repetition collapses to a text leaf when it has exactly one component
/// holding exactly one subcomponent.
pub fn is_leaf_repetition(rep: &Repetition) -> bool {
    rep.components.len() == 1 && is_leaf_component(&rep.components[0])
}

/// A component collapses to a text leaf when it has exactly one subcomponent.
pub fn is_leaf_component(component: &Component) -> bool {
    component.subcomponents.len() == 1
}

/// Empty fields produce no element at all.
pub fn should_emit_field(field: &Field) -> bool {
    !field.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(values: &[&str]) -> Component {
        Component {
            subcomponents: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn test_field_name() {
        assert_eq!(field_name("PID", 3), "PID.3");
        assert_eq!(field_name("MSH", 12), "MSH.12");
    }

    #[test]
    fn test_child_name() {
        assert_eq!(child_name("PID.3", 1), "PID.3.1");
        assert_eq!(child_name("PID.3.1", 2), "PID.3.1.2");
    }

    #[test]
    fn test_is_leaf_repetition() {
        assert!(is_leaf_repetition(&Repetition {
            components: vec![component(&["123"])]
        }));
        assert!(!is_leaf_repetition(&Repetition {
            components: vec![component(&["123"]), component(&["MRN"])]
        }));
        assert!(!is_leaf_repetition(&Repetition {
            components: vec![component(&["a", "b"])]
        }));
    }

    #[test]
    fn test_should_emit_field() {
        assert!(!should_emit_field(&Field {
            repetitions: vec![Repetition {
                components: vec![component(&[""])]
            }]
        }));
        assert!(should_emit_field(&Field::literal("x")));
    }
}
