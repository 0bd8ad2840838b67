//! # Schema Declarations
//!
//! A computation that yields a value while registering named schema definitions
//! on the side. Definitions accumulate in a [`Declarations`] table threaded
//! through every step; a later registration under an existing name replaces the
//! earlier schema (the name keeps its original position).
//!
//! ```text
//! let response = declare_schema_ref::<User>()
//!     .map(|schema| json_response(schema));
//! let (definitions, response) = run_declare(response, Definitions::new());
//! ```

use indexmap::IndexMap;
use openapiv3::Schema;

/// Named schema definitions, in registration order.
pub type Definitions = IndexMap<String, Schema>;

/// The side-table threaded through a [`Declare`] computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    definitions: Definitions,
}

impl Declarations {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing set of definitions.
    pub fn from_definitions(definitions: Definitions) -> Self {
        Self { definitions }
    }

    /// Registers a batch of definitions, replacing entries with the same name.
    pub fn declare(&mut self, definitions: Definitions) {
        for (name, schema) in definitions {
            self.definitions.insert(name, schema);
        }
    }

    /// Registers a single definition, replacing any entry with the same name.
    pub fn declare_one(&mut self, name: impl Into<String>, schema: Schema) {
        self.definitions.insert(name.into(), schema);
    }

    /// Whether `name` has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Looks up a registered definition.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.definitions.get(name)
    }

    /// The definitions registered so far.
    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    /// Consumes the table.
    pub fn into_definitions(self) -> Definitions {
        self.definitions
    }
}

/// A deferred computation producing `T` and registering definitions.
///
/// Nothing runs until [`Declare::run`] (or [`run_declare`]) is called, so a
/// `Declare` value can be built once and handed to a mutation such as
/// `set_response`.
pub struct Declare<'a, T> {
    step: Box<dyn FnOnce(&mut Declarations) -> T + 'a>,
}

impl<'a, T: 'a> Declare<'a, T> {
    /// Wraps a function over the declarations table.
    pub fn new(step: impl FnOnce(&mut Declarations) -> T + 'a) -> Self {
        Self {
            step: Box::new(step),
        }
    }

    /// A computation that registers nothing.
    pub fn pure(value: T) -> Self {
        Self::new(move |_| value)
    }

    /// Transforms the result, keeping the registrations.
    pub fn map<U: 'a>(self, f: impl FnOnce(T) -> U + 'a) -> Declare<'a, U> {
        Declare::new(move |decls| f((self.step)(decls)))
    }

    /// Sequences a dependent computation after this one.
    pub fn and_then<U: 'a>(self, f: impl FnOnce(T) -> Declare<'a, U> + 'a) -> Declare<'a, U> {
        Declare::new(move |decls| {
            let value = (self.step)(decls);
            f(value).run_with(decls)
        })
    }

    /// Runs `next` after this computation, discarding this result.
    pub fn then<U: 'a>(self, next: Declare<'a, U>) -> Declare<'a, U> {
        self.and_then(move |_| next)
    }

    /// Runs both computations in order and pairs their results.
    pub fn zip<U: 'a>(self, other: Declare<'a, U>) -> Declare<'a, (T, U)> {
        Declare::new(move |decls| {
            let left = (self.step)(decls);
            let right = other.run_with(decls);
            (left, right)
        })
    }

    /// Executes against an existing table.
    pub fn run_with(self, decls: &mut Declarations) -> T {
        (self.step)(decls)
    }

    /// Executes from `initial`, returning the accumulated definitions and the result.
    pub fn run(self, initial: Definitions) -> (Definitions, T) {
        let mut decls = Declarations::from_definitions(initial);
        let value = self.run_with(&mut decls);
        (decls.into_definitions(), value)
    }
}

impl<'a, T: 'a> FromIterator<Declare<'a, T>> for Declare<'a, Vec<T>> {
    fn from_iter<I: IntoIterator<Item = Declare<'a, T>>>(iter: I) -> Self {
        let steps: Vec<Declare<'a, T>> = iter.into_iter().collect();
        Declare::new(move |decls| steps.into_iter().map(|step| step.run_with(decls)).collect())
    }
}

/// Registers a batch of definitions.
pub fn declare<'a>(definitions: Definitions) -> Declare<'a, ()> {
    Declare::new(move |decls| decls.declare(definitions))
}

/// Reads a snapshot of the definitions registered so far.
pub fn look<'a>() -> Declare<'a, Definitions> {
    Declare::new(|decls| decls.definitions().clone())
}

/// Projects the definitions registered so far without cloning them.
pub fn looks<'a, T: 'a>(f: impl FnOnce(&Definitions) -> T + 'a) -> Declare<'a, T> {
    Declare::new(move |decls| f(decls.definitions()))
}

/// Runs `computation` from `initial`, returning `(definitions, result)`.
pub fn run_declare<T>(computation: Declare<'_, T>, initial: Definitions) -> (Definitions, T) {
    computation.run(initial)
}

/// Runs `computation` and keeps only its result.
pub fn eval_declare<T>(computation: Declare<'_, T>, initial: Definitions) -> T {
    computation.run(initial).1
}

/// Runs `computation` and keeps only the accumulated definitions.
pub fn exec_declare<T>(computation: Declare<'_, T>, initial: Definitions) -> Definitions {
    computation.run(initial).0
}
