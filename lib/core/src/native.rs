//! Native type shapes
//!
//! [`NativeType`] is the declared type of a field as the host program sees it,
//! before any mapping decision is made. Wrappers (optional, array, generic) are
//! kept so that the mapping engine can unwrap them to the carried element type.

use crate::descriptor::{Describe, TypeName};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NativeType {
    String,
    Char,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Decimal,
    DateTime,
    Bool,
    Uuid,
    /// A value-like enumeration, identified by name
    Enum(String),
    Optional(Box<NativeType>),
    Array(Box<NativeType>),
    /// A parameterized container such as a list, set or map
    Generic {
        name: String,
        #[serde(default)]
        args: Vec<NativeType>,
    },
    /// A reference to a structured type held in the [`TypeRegistry`](crate::TypeRegistry)
    Struct(TypeName),
    /// Untyped, schemaless value (a JSON blob, `dyn Any`, ...)
    Dynamic,
}

impl NativeType {
    pub fn optional(inner: NativeType) -> Self {
        NativeType::Optional(Box::new(inner))
    }

    pub fn array(element: NativeType) -> Self {
        NativeType::Array(Box::new(element))
    }

    pub fn generic(name: impl Into<String>, args: Vec<NativeType>) -> Self {
        NativeType::Generic {
            name: name.into(),
            args,
        }
    }

    pub fn structured(name: impl Into<TypeName>) -> Self {
        NativeType::Struct(name.into())
    }

    /// Reference to a type that describes itself
    pub fn of_described<T: Describe>() -> Self {
        NativeType::Struct(T::type_name())
    }

    /// Shorthand for `T::native_type()`
    pub fn of<T: NativeTyped + ?Sized>() -> Self {
        T::native_type()
    }

    /// The structured type this shape refers to, if it is a bare struct reference
    pub fn as_struct(&self) -> Option<&TypeName> {
        match self {
            NativeType::Struct(name) => Some(name),
            _ => None,
        }
    }
}

/// Static native-type information for a Rust type.
///
/// Implemented for std scalars and containers. Structured types implement it
/// by pointing at their [`Describe`] name:
///
/// ```rust
/// use nestmap_core::{Describe, FieldDescriptor, NativeType, NativeTyped, TypeName};
///
/// struct Person;
///
/// impl Describe for Person {
///     fn type_name() -> TypeName {
///         TypeName::from("Person")
///     }
///
///     fn fields() -> Vec<FieldDescriptor> {
///         vec![
///             FieldDescriptor::of::<String>("name"),
///             FieldDescriptor::of::<i32>("age"),
///         ]
///     }
/// }
///
/// impl NativeTyped for Person {
///     fn native_type() -> NativeType {
///         NativeType::of_described::<Self>()
///     }
/// }
/// ```
pub trait NativeTyped {
    fn native_type() -> NativeType;
}

macro_rules! native_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl NativeTyped for $ty {
                fn native_type() -> NativeType {
                    NativeType::$variant
                }
            }
        )*
    };
}

native_scalar! {
    String => String,
    str => String,
    char => Char,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    isize => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    usize => UInt64,
    f32 => Float32,
    f64 => Float64,
    bool => Bool,
    std::time::SystemTime => DateTime,
    chrono::NaiveDate => DateTime,
    chrono::NaiveDateTime => DateTime,
    uuid::Uuid => Uuid,
    serde_json::Value => Dynamic,
}

impl<Tz: chrono::TimeZone> NativeTyped for chrono::DateTime<Tz> {
    fn native_type() -> NativeType {
        NativeType::DateTime
    }
}

impl<T: NativeTyped + ?Sized> NativeTyped for &T {
    fn native_type() -> NativeType {
        T::native_type()
    }
}

impl<T: NativeTyped + ?Sized> NativeTyped for Box<T> {
    fn native_type() -> NativeType {
        T::native_type()
    }
}

impl<T: NativeTyped + ?Sized> NativeTyped for Arc<T> {
    fn native_type() -> NativeType {
        T::native_type()
    }
}

impl<T: NativeTyped> NativeTyped for Option<T> {
    fn native_type() -> NativeType {
        NativeType::optional(T::native_type())
    }
}

impl<T: NativeTyped> NativeTyped for [T] {
    fn native_type() -> NativeType {
        NativeType::array(T::native_type())
    }
}

impl<T: NativeTyped, const N: usize> NativeTyped for [T; N] {
    fn native_type() -> NativeType {
        NativeType::array(T::native_type())
    }
}

impl<T: NativeTyped> NativeTyped for Vec<T> {
    fn native_type() -> NativeType {
        NativeType::generic("Vec", vec![T::native_type()])
    }
}

impl<T: NativeTyped> NativeTyped for VecDeque<T> {
    fn native_type() -> NativeType {
        NativeType::generic("VecDeque", vec![T::native_type()])
    }
}

impl<T: NativeTyped, S> NativeTyped for HashSet<T, S> {
    fn native_type() -> NativeType {
        NativeType::generic("HashSet", vec![T::native_type()])
    }
}

impl<T: NativeTyped> NativeTyped for BTreeSet<T> {
    fn native_type() -> NativeType {
        NativeType::generic("BTreeSet", vec![T::native_type()])
    }
}

impl<K: NativeTyped, V: NativeTyped, S> NativeTyped for HashMap<K, V, S> {
    fn native_type() -> NativeType {
        NativeType::generic("HashMap", vec![K::native_type(), V::native_type()])
    }
}

impl<K: NativeTyped, V: NativeTyped> NativeTyped for BTreeMap<K, V> {
    fn native_type() -> NativeType {
        NativeType::generic("BTreeMap", vec![K::native_type(), V::native_type()])
    }
}
