#![deny(missing_docs)]

//! # Schema Derivation
//!
//! Maps Rust types to OpenAPI schemas inside a [`Declare`] computation.
//!
//! Types carrying a [`ToSchema::schema_name`] are registered once in the
//! declarations table and referenced by `$ref` everywhere else; unnamed types
//! are inlined. Primitives follow the usual JSON mapping:
//! - `bool` -> `boolean`
//! - `String`, `str`, `char` -> `string`
//! - integers -> `integer` (`int32` / `int64`, unsigned types get `minimum: 0`)
//! - `f32` / `f64` -> `number` (`float` / `double`)
//! - `Vec<T>`, sets -> `array`
//! - maps keyed by `String` -> `object` with `additionalProperties`

use crate::declare::{Declarations, Declare};
use crate::oas::refs::schema_ref;
use indexmap::IndexMap;
use openapiv3::{
    AdditionalProperties, AnySchema, ArrayType, BooleanType, IntegerFormat, IntegerType,
    NumberFormat, NumberType, ObjectType, ReferenceOr, Schema, SchemaData, SchemaKind, StringType,
    Type, VariantOrUnknownOrEmpty,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// A schema with an optional component name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSchema {
    /// Component name under which the schema is registered, if any.
    pub name: Option<String>,
    /// The schema itself.
    pub schema: Schema,
}

/// Types that can describe themselves as an OpenAPI schema.
pub trait ToSchema {
    /// Component name for this type. `None` means the schema is always inlined.
    fn schema_name() -> Option<String> {
        None
    }

    /// Builds the schema, registering any named schemas it depends on.
    fn declare_schema(decls: &mut Declarations) -> Schema;
}

/// Returns a `$ref` for named types (registering them on first use) or the inline schema.
///
/// The name is registered before the schema is built so self-referential types
/// terminate.
pub fn declare_schema_ref_in<T: ToSchema + ?Sized>(decls: &mut Declarations) -> ReferenceOr<Schema> {
    match T::schema_name() {
        Some(name) => {
            if !decls.contains(&name) {
                decls.declare_one(name.clone(), any_schema());
                let schema = T::declare_schema(decls);
                decls.declare_one(name.clone(), schema);
            }
            schema_ref(&name)
        }
        None => ReferenceOr::Item(T::declare_schema(decls)),
    }
}

/// [`declare_schema_ref_in`] as a deferred computation.
pub fn declare_schema_ref<'a, T>() -> Declare<'a, ReferenceOr<Schema>>
where
    T: ToSchema + ?Sized + 'a,
{
    Declare::new(declare_schema_ref_in::<T>)
}

/// The schema of `T` as a deferred computation (never a reference).
pub fn declare_schema<'a, T>() -> Declare<'a, Schema>
where
    T: ToSchema + ?Sized + 'a,
{
    Declare::new(T::declare_schema)
}

/// The schema of `T`, discarding any definitions it would register.
pub fn to_schema<T: ToSchema + ?Sized>() -> Schema {
    T::declare_schema(&mut Declarations::new())
}

/// The schema of `T` together with its component name.
pub fn to_named_schema<T: ToSchema + ?Sized>() -> NamedSchema {
    NamedSchema {
        name: T::schema_name(),
        schema: to_schema::<T>(),
    }
}

/// A `$ref` for named types, otherwise the inline schema; nothing is registered.
pub fn to_schema_ref<T: ToSchema + ?Sized>() -> ReferenceOr<Schema> {
    match T::schema_name() {
        Some(name) => schema_ref(&name),
        None => ReferenceOr::Item(to_schema::<T>()),
    }
}

/// Component name of `T`, if any.
pub fn schema_name<T: ToSchema + ?Sized>() -> Option<String> {
    T::schema_name()
}

/// Builder for object schemas in hand-written [`ToSchema`] impls.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    title: Option<String>,
    description: Option<String>,
    properties: IndexMap<String, ReferenceOr<Box<Schema>>>,
    required: Vec<String>,
}

impl ObjectSchema {
    /// Starts an empty object schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schema title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the schema description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an optional property.
    pub fn property(mut self, name: impl Into<String>, schema: ReferenceOr<Schema>) -> Self {
        self.properties.insert(name.into(), boxed(schema));
        self
    }

    /// Adds a property listed under `required`.
    pub fn required(mut self, name: impl Into<String>, schema: ReferenceOr<Schema>) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name.clone());
        }
        self.properties.insert(name, boxed(schema));
        self
    }

    /// Adds a property for `T`, declaring its schema; `Option<_>` fields are not required.
    pub fn field<T: ToSchema + ?Sized>(
        self,
        decls: &mut Declarations,
        name: impl Into<String>,
        required: bool,
    ) -> Self {
        let schema = declare_schema_ref_in::<T>(decls);
        if required {
            self.required(name, schema)
        } else {
            self.property(name, schema)
        }
    }

    /// Finishes the schema.
    pub fn build(self) -> Schema {
        Schema {
            schema_data: SchemaData {
                title: self.title,
                description: self.description,
                ..Default::default()
            },
            schema_kind: SchemaKind::Type(Type::Object(ObjectType {
                properties: self.properties,
                required: self.required,
                ..Default::default()
            })),
        }
    }
}

fn boxed(schema: ReferenceOr<Schema>) -> ReferenceOr<Box<Schema>> {
    match schema {
        ReferenceOr::Reference { reference } => ReferenceOr::Reference { reference },
        ReferenceOr::Item(item) => ReferenceOr::Item(Box::new(item)),
    }
}

fn of_type(ty: Type) -> Schema {
    Schema {
        schema_data: SchemaData::default(),
        schema_kind: SchemaKind::Type(ty),
    }
}

fn any_schema() -> Schema {
    Schema {
        schema_data: SchemaData::default(),
        schema_kind: SchemaKind::Any(AnySchema::default()),
    }
}

fn array_of(items: ReferenceOr<Schema>, unique_items: bool) -> Schema {
    of_type(Type::Array(ArrayType {
        items: Some(boxed(items)),
        min_items: None,
        max_items: None,
        unique_items,
    }))
}

fn map_of(values: ReferenceOr<Schema>) -> Schema {
    of_type(Type::Object(ObjectType {
        additional_properties: Some(AdditionalProperties::Schema(Box::new(values))),
        ..Default::default()
    }))
}

impl ToSchema for bool {
    fn declare_schema(_: &mut Declarations) -> Schema {
        of_type(Type::Boolean(BooleanType::default()))
    }
}

impl ToSchema for str {
    fn declare_schema(_: &mut Declarations) -> Schema {
        of_type(Type::String(StringType::default()))
    }
}

impl ToSchema for String {
    fn declare_schema(decls: &mut Declarations) -> Schema {
        <str as ToSchema>::declare_schema(decls)
    }
}

impl ToSchema for char {
    fn declare_schema(_: &mut Declarations) -> Schema {
        of_type(Type::String(StringType {
            min_length: Some(1),
            max_length: Some(1),
            ..Default::default()
        }))
    }
}

macro_rules! integer_schema {
    ($($ty:ty => $format:ident, $min:expr, $max:expr;)*) => {
        $(
            impl ToSchema for $ty {
                fn declare_schema(_: &mut Declarations) -> Schema {
                    of_type(Type::Integer(IntegerType {
                        format: VariantOrUnknownOrEmpty::Item(IntegerFormat::$format),
                        minimum: $min,
                        maximum: $max,
                        ..Default::default()
                    }))
                }
            }
        )*
    };
}

integer_schema! {
    i8 => Int32, Some(i8::MIN as i64), Some(i8::MAX as i64);
    i16 => Int32, Some(i16::MIN as i64), Some(i16::MAX as i64);
    i32 => Int32, None, None;
    i64 => Int64, None, None;
    isize => Int64, None, None;
    u8 => Int32, Some(0), Some(u8::MAX as i64);
    u16 => Int32, Some(0), Some(u16::MAX as i64);
    u32 => Int64, Some(0), Some(u32::MAX as i64);
    u64 => Int64, Some(0), None;
    usize => Int64, Some(0), None;
}

impl ToSchema for f32 {
    fn declare_schema(_: &mut Declarations) -> Schema {
        of_type(Type::Number(NumberType {
            format: VariantOrUnknownOrEmpty::Item(NumberFormat::Float),
            ..Default::default()
        }))
    }
}

impl ToSchema for f64 {
    fn declare_schema(_: &mut Declarations) -> Schema {
        of_type(Type::Number(NumberType {
            format: VariantOrUnknownOrEmpty::Item(NumberFormat::Double),
            ..Default::default()
        }))
    }
}

impl ToSchema for serde_json::Value {
    fn declare_schema(_: &mut Declarations) -> Schema {
        any_schema()
    }
}

// Wrappers describe the same shape as their contents, name included.
impl<T: ToSchema + ?Sized> ToSchema for Box<T> {
    fn schema_name() -> Option<String> {
        T::schema_name()
    }

    fn declare_schema(decls: &mut Declarations) -> Schema {
        T::declare_schema(decls)
    }
}

impl<T: ToSchema + ?Sized> ToSchema for &T {
    fn schema_name() -> Option<String> {
        T::schema_name()
    }

    fn declare_schema(decls: &mut Declarations) -> Schema {
        T::declare_schema(decls)
    }
}

impl<T: ToSchema> ToSchema for Option<T> {
    fn schema_name() -> Option<String> {
        T::schema_name()
    }

    fn declare_schema(decls: &mut Declarations) -> Schema {
        T::declare_schema(decls)
    }
}

impl<T: ToSchema> ToSchema for [T] {
    fn declare_schema(decls: &mut Declarations) -> Schema {
        array_of(declare_schema_ref_in::<T>(decls), false)
    }
}

impl<T: ToSchema> ToSchema for Vec<T> {
    fn declare_schema(decls: &mut Declarations) -> Schema {
        <[T]>::declare_schema(decls)
    }
}

impl<T: ToSchema> ToSchema for BTreeSet<T> {
    fn declare_schema(decls: &mut Declarations) -> Schema {
        array_of(declare_schema_ref_in::<T>(decls), true)
    }
}

impl<T: ToSchema, S> ToSchema for HashSet<T, S> {
    fn declare_schema(decls: &mut Declarations) -> Schema {
        array_of(declare_schema_ref_in::<T>(decls), true)
    }
}

impl<V: ToSchema> ToSchema for BTreeMap<String, V> {
    fn declare_schema(decls: &mut Declarations) -> Schema {
        map_of(declare_schema_ref_in::<V>(decls))
    }
}

impl<V: ToSchema, S> ToSchema for HashMap<String, V, S> {
    fn declare_schema(decls: &mut Declarations) -> Schema {
        map_of(declare_schema_ref_in::<V>(decls))
    }
}

impl<V: ToSchema, S> ToSchema for IndexMap<String, V, S> {
    fn declare_schema(decls: &mut Declarations) -> Schema {
        map_of(declare_schema_ref_in::<V>(decls))
    }
}
