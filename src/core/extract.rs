//! Context field extraction
//!
//! Configured rules derive a flat mapping of named fields from the current
//! request-like context object on every flush. Rules are independent: a
//! failing rule records a sentinel marker for its own key and never blocks
//! the others. Rules are re-evaluated fresh each flush, never cached.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Marker value recorded when a single extraction rule fails
pub const EXTRACTION_ERROR_MARKER: &str = "error";

/// Named field access on an opaque request-like object.
///
/// `None` means the object does not support the field; the extractor turns
/// that into a per-key soft failure.
pub trait ContextFields {
    fn field(&self, name: &str) -> Option<Value>;
}

impl ContextFields for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl ContextFields for Value {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Shared handle to the current context object of a unit of work
pub type SharedContext = Arc<dyn ContextFields + Send + Sync>;

/// Computed extraction function over the optional context object
pub type ComputedFn = Arc<dyn Fn(Option<&dyn ContextFields>) -> Option<Value> + Send + Sync>;

/// One configured extraction rule
#[derive(Clone)]
pub enum ExtractionRule {
    /// Fixed value, copied into every record
    Constant(Value),
    /// Named field looked up on the context object
    Accessor(String),
    /// Arbitrary function of the context object
    Computed(ComputedFn),
}

impl ExtractionRule {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(Option<&dyn ContextFields>) -> Option<Value> + Send + Sync + 'static,
    {
        ExtractionRule::Computed(Arc::new(f))
    }

    /// Evaluate against the current context object. `None` signals failure;
    /// the caller substitutes the sentinel. A panicking computed rule is
    /// contained here and treated as a failure of that rule alone.
    fn evaluate(&self, ctx: Option<&dyn ContextFields>) -> Option<Value> {
        match self {
            ExtractionRule::Constant(v) => Some(v.clone()),
            ExtractionRule::Accessor(name) => ctx.and_then(|c| c.field(name)),
            ExtractionRule::Computed(f) => {
                catch_unwind(AssertUnwindSafe(|| f(ctx))).ok().flatten()
            }
        }
    }
}

impl fmt::Debug for ExtractionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionRule::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            ExtractionRule::Accessor(name) => f.debug_tuple("Accessor").field(name).finish(),
            ExtractionRule::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Named extraction rules, evaluated on every flush
pub type ExtractionRules = HashMap<String, ExtractionRule>;

/// Evaluate all rules against the current context object. Each failing
/// rule yields [`EXTRACTION_ERROR_MARKER`] for its key; the rest populate
/// normally.
pub fn extract(rules: &ExtractionRules, ctx: Option<&dyn ContextFields>) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, rule) in rules {
        let value = rule
            .evaluate(ctx)
            .unwrap_or_else(|| Value::String(EXTRACTION_ERROR_MARKER.to_string()));
        out.insert(key.clone(), value);
    }
    out
}
