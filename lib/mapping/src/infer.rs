//! Field type inference from native types
//!
//! Collections are mapped by what they carry: `Option<Vec<i64>>` is a `long`
//! field, not an array field.

use nestmap_core::{FieldType, NativeType};

/// Unwrap optional, array and generic wrappers down to the carried element type.
///
/// A generic is unwrapped to its first type argument. Wrappers are peeled
/// repeatedly, so `Option<Vec<T>>` yields `T`.
pub fn element_type(native: &NativeType) -> &NativeType {
    let mut current = native;
    loop {
        current = match current {
            NativeType::Optional(inner) | NativeType::Array(inner) => &**inner,
            NativeType::Generic { args, .. } if !args.is_empty() => &args[0],
            _ => return current,
        };
    }
}

/// Infer the field type of a native type, [`FieldType::None`] when no rule applies
pub fn infer(native: &NativeType) -> FieldType {
    match element_type(native) {
        NativeType::String => FieldType::String,
        NativeType::Int32 => FieldType::Integer,
        NativeType::Int64 => FieldType::Long,
        NativeType::Float32 => FieldType::Float,
        NativeType::Float64 | NativeType::Decimal => FieldType::Double,
        NativeType::DateTime => FieldType::Date,
        NativeType::Bool => FieldType::Boolean,
        // reference-like shapes
        NativeType::Struct(_) | NativeType::Dynamic | NativeType::Generic { .. } => {
            FieldType::Object
        }
        NativeType::Char
        | NativeType::Int8
        | NativeType::Int16
        | NativeType::UInt8
        | NativeType::UInt16
        | NativeType::UInt32
        | NativeType::UInt64
        | NativeType::Uuid
        | NativeType::Enum(_) => FieldType::None,
        NativeType::Optional(_) | NativeType::Array(_) => FieldType::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_table() {
        assert_eq!(infer(&NativeType::String), FieldType::String);
        assert_eq!(infer(&NativeType::Int32), FieldType::Integer);
        assert_eq!(infer(&NativeType::Int64), FieldType::Long);
        assert_eq!(infer(&NativeType::Float32), FieldType::Float);
        assert_eq!(infer(&NativeType::Float64), FieldType::Double);
        assert_eq!(infer(&NativeType::Decimal), FieldType::Double);
        assert_eq!(infer(&NativeType::DateTime), FieldType::Date);
        assert_eq!(infer(&NativeType::Bool), FieldType::Boolean);
    }

    #[test]
    fn test_unmatched_value_types() {
        assert_eq!(infer(&NativeType::Int16), FieldType::None);
        assert_eq!(infer(&NativeType::UInt64), FieldType::None);
        assert_eq!(infer(&NativeType::Char), FieldType::None);
        assert_eq!(infer(&NativeType::Uuid), FieldType::None);
        assert_eq!(infer(&NativeType::Enum("Color".into())), FieldType::None);
    }

    #[test]
    fn test_structured_is_object() {
        assert_eq!(infer(&NativeType::structured("Address")), FieldType::Object);
        assert_eq!(infer(&NativeType::Dynamic), FieldType::Object);
        assert_eq!(infer(&NativeType::generic("Bag", vec![])), FieldType::Object);
    }

    #[test]
    fn test_collections_map_by_element() {
        let list_of_longs = NativeType::generic("List", vec![NativeType::Int64]);
        assert_eq!(infer(&list_of_longs), FieldType::Long);

        let optional_array = NativeType::optional(NativeType::array(NativeType::Float32));
        assert_eq!(infer(&optional_array), FieldType::Float);

        let list_of_nodes = NativeType::generic("List", vec![NativeType::structured("Node")]);
        assert_eq!(infer(&list_of_nodes), FieldType::Object);
        assert_eq!(
            element_type(&list_of_nodes),
            &NativeType::structured("Node")
        );
    }

    #[test]
    fn test_map_uses_first_argument() {
        let map = NativeType::generic("HashMap", vec![NativeType::String, NativeType::Int32]);
        assert_eq!(infer(&map), FieldType::String);
    }
}
