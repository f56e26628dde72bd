//! Keyed-structure schemas.
//!
//! An object schema binds declared fields to the fields of a typed
//! destination struct. Each binding pairs a lookup key with a child schema
//! and a lens projecting the destination to the child's slot; processing
//! walks the bindings in declaration order, pushing one path segment per
//! field.

use crate::context::{ExecCtx, SchemaCtx};
use crate::engine::{resolve_blank, run_pipeline, Processor, Rules, Test};
use crate::error::{CoerceError, Issue, IssueCode};
use crate::provider::{FieldKey, ParseData, Provider};
use crate::value::Value;

use super::traits::{SchemaKind, SchemaLike};

/// One declared field: a child schema plus the lens into the destination.
struct Binding<T, S: SchemaLike> {
    key: FieldKey,
    schema: S,
    lens: fn(&mut T) -> &mut S::Output,
}

/// The type-erased view the object walks: key resolution and child
/// dispatch without knowing the child's output type.
trait FieldBinding<T>: Send + Sync {
    fn key(&self) -> &FieldKey;
    fn kind(&self) -> SchemaKind;
    fn process(&self, data: ParseData<'_>, dest: &mut T, exec: &mut ExecCtx);
    fn verify(&self, dest: &mut T, exec: &mut ExecCtx);
}

impl<T, S> FieldBinding<T> for Binding<T, S>
where
    S: SchemaLike,
{
    fn key(&self) -> &FieldKey {
        &self.key
    }

    fn kind(&self) -> SchemaKind {
        self.schema.kind()
    }

    fn process(&self, data: ParseData<'_>, dest: &mut T, exec: &mut ExecCtx) {
        let mut ctx = SchemaCtx {
            data,
            dest: (self.lens)(dest),
            exec,
            kind: self.schema.kind(),
        };
        self.schema.process(&mut ctx);
    }

    fn verify(&self, dest: &mut T, exec: &mut ExecCtx) {
        self.schema.verify((self.lens)(dest), exec);
    }
}

/// A schema mapping keyed input onto the fields of a destination struct.
///
/// Fields process in declaration order, so issue discovery order is
/// deterministic. Keys absent from the schema are ignored; keys absent
/// from the input resolve through each field's required/default settings.
///
/// # Example
///
/// ```rust
/// use intake::{ObjectSchema, Schema, SchemaLike};
/// use serde_json::json;
///
/// #[derive(Default, Clone)]
/// struct User {
///     name: String,
///     age: i64,
/// }
///
/// let schema = ObjectSchema::new()
///     .field("name", Schema::string().required(), |u: &mut User| &mut u.name)
///     .field("age", Schema::integer().min(0), |u: &mut User| &mut u.age);
///
/// let mut user = User::default();
/// let issues = schema.parse(json!({"name": "Jane", "age": "30"}), &mut user);
/// assert!(issues.is_empty());
/// assert_eq!(user.name, "Jane");
/// assert_eq!(user.age, 30);
/// ```
pub struct ObjectSchema<T> {
    fields: Vec<Box<dyn FieldBinding<T>>>,
    rules: Rules<T>,
}

impl<T: Clone + Send + Sync + 'static> ObjectSchema<T> {
    /// Creates an object schema with no declared fields.
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            rules: Rules::default(),
        }
    }

    /// Declares a field: a lookup key, the child schema, and the lens
    /// projecting the destination to the child's slot.
    ///
    /// The key accepts a plain string or a [`FieldKey`] carrying per-source
    /// aliases.
    pub fn field<S>(
        mut self,
        key: impl Into<FieldKey>,
        schema: S,
        lens: fn(&mut T) -> &mut S::Output,
    ) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.fields.push(Box::new(Binding {
            key: key.into(),
            schema,
            lens,
        }));
        self
    }

    /// Marks the object as required: blank input records a `required`
    /// issue instead of silently skipping every field.
    pub fn required(mut self) -> Self {
        self.rules.required = Some(Test::required());
        self
    }

    /// Marks the object as optional (the default).
    pub fn optional(mut self) -> Self {
        self.rules.required = None;
        self
    }

    /// Substitutes `value` for blank input, bypassing field processing.
    pub fn default(mut self, value: T) -> Self {
        self.rules.default = Some(value);
        self
    }

    /// Appends a named cross-field test, run after every field processed.
    ///
    /// Issues from cross-field tests land at the object's own path.
    pub fn test<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T, &ExecCtx) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let message = format!("failed '{}' check", name);
        self.rules
            .pipeline
            .push(Processor::Test(Test::new(name, message, check)));
        self
    }

    /// Appends an in-place transform over the whole destination, run after
    /// every field processed.
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&mut T, &ExecCtx) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
            + Send
            + Sync
            + 'static,
    {
        self.rules
            .pipeline
            .push(Processor::Transform(Box::new(transform)));
        self
    }

    /// Sets a custom message for the most recently declared constraint.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.rules.set_last_message(message.into());
        self
    }

    fn process_fields(&self, provider: Provider<'_>, dest: &mut T, exec: &mut ExecCtx) {
        for binding in &self.fields {
            let (data, key) = self.field_data(binding.as_ref(), provider);
            exec.path_mut().push_field(key);
            binding.process(data, dest, exec);
            exec.path_mut().pop();
        }
        run_pipeline(dest, &self.rules.pipeline, exec);
    }

    /// Resolves one binding's input: nested object fields descend into a
    /// child provider, everything else extracts a value.
    fn field_data<'v>(
        &self,
        binding: &dyn FieldBinding<T>,
        provider: Provider<'v>,
    ) -> (ParseData<'v>, String) {
        let key = binding.key().resolve(provider.tag()).to_string();
        if binding.kind() == SchemaKind::Object {
            if let Some(child) = provider.nested(&key) {
                return (ParseData::Provider(child), key);
            }
        }
        let data = match provider.get(&key) {
            Some(value) => ParseData::Value(value),
            None => ParseData::Absent,
        };
        (data, key)
    }
}

impl<T: Clone + Send + Sync + 'static> Default for ObjectSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> SchemaLike for ObjectSchema<T> {
    type Output = T;

    fn kind(&self) -> SchemaKind {
        SchemaKind::Object
    }

    fn process(&self, ctx: &mut SchemaCtx<'_, '_, T>) {
        if ctx.data.is_blank() {
            resolve_blank(ctx.dest, &self.rules, ctx.exec);
            return;
        }

        match &ctx.data {
            ParseData::Provider(provider) => {
                let provider = *provider;
                self.process_fields(provider, ctx.dest, ctx.exec);
            }
            ParseData::Value(value) => match value.as_ref() {
                Value::Map(map) => {
                    let provider = Provider::plain_map(map);
                    self.process_fields(provider, ctx.dest, ctx.exec);
                }
                other => {
                    let err = CoerceError::new("object", other.type_name());
                    let message = self
                        .rules
                        .coerce_message
                        .clone()
                        .unwrap_or_else(|| err.to_string());
                    ctx.exec.record(
                        Issue::new(IssueCode::Coerce, message)
                            .with_cause(std::sync::Arc::new(err)),
                    );
                }
            },
            ParseData::Absent => {}
        }
    }

    fn verify(&self, dest: &mut T, exec: &mut ExecCtx) {
        for binding in &self.fields {
            exec.path_mut().push_field(binding.key().name());
            binding.verify(dest, exec);
            exec.path_mut().pop();
        }
        run_pipeline(dest, &self.rules.pipeline, exec);
    }
}
