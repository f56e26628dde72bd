//! Schema kinds and the factory that builds them.
//!
//! Every schema implements [`SchemaLike`]; primitives are aliases of the
//! generic [`ScalarSchema`], composites ([`ArraySchema`], [`ObjectSchema`],
//! [`OptionSchema`]) recurse into child schemas. [`Schema`] is the entry
//! point that constructs all of them.

mod array;
mod boolean;
mod file;
mod numeric;
mod object;
mod option;
mod scalar;
mod string;
mod traits;

pub use array::ArraySchema;
pub use boolean::BooleanSchema;
pub use file::FileSchema;
pub use numeric::{FloatSchema, IntegerSchema};
pub use object::ObjectSchema;
pub use option::OptionSchema;
pub use scalar::ScalarSchema;
pub use string::StringSchema;
pub use traits::{SchemaKind, SchemaLike};

/// The factory for every schema kind.
///
/// # Example
///
/// ```rust
/// use intake::{Schema, SchemaLike};
/// use serde_json::json;
///
/// #[derive(Default, Clone)]
/// struct Signup {
///     email: String,
///     tags: Vec<String>,
/// }
///
/// let schema = Schema::object()
///     .field("email", Schema::string().required().email(), |s: &mut Signup| {
///         &mut s.email
///     })
///     .field("tags", Schema::array(Schema::string()), |s: &mut Signup| {
///         &mut s.tags
///     });
///
/// let mut signup = Signup::default();
/// let issues = schema.parse(json!({"email": "a@b.co", "tags": ["x"]}), &mut signup);
/// assert!(issues.is_empty());
/// ```
pub struct Schema;

impl Schema {
    /// A string schema.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// An integer schema.
    pub fn integer() -> IntegerSchema {
        IntegerSchema::new()
    }

    /// A float schema.
    pub fn float() -> FloatSchema {
        FloatSchema::new()
    }

    /// A boolean schema.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// An uploaded-file schema.
    pub fn file() -> FileSchema {
        FileSchema::new()
    }

    /// An array schema applying `element` to every item.
    pub fn array<S>(element: S) -> ArraySchema<S>
    where
        S: SchemaLike,
        S::Output: Clone + Default + Send + Sync + 'static,
    {
        ArraySchema::new(element)
    }

    /// An object schema with no fields declared yet.
    pub fn object<T: Clone + Send + Sync + 'static>() -> ObjectSchema<T> {
        ObjectSchema::new()
    }

    /// An optional wrapper around any schema, targeting `Option<T>`.
    pub fn optional<S>(inner: S) -> OptionSchema<S>
    where
        S: SchemaLike,
        S::Output: Default + Send + Sync + 'static,
    {
        OptionSchema::new(inner)
    }
}
