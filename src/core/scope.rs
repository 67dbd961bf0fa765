//! Unit-of-work scope
//!
//! A scope opens a tagging or context binding, runs user code against the
//! logger handle, and guarantees a flush plus cleanup on every exit path:
//! normal return, early return, or panic. The flush runs while the
//! scope's binding is still in place; cleanup then undoes exactly what
//! the scope itself set up, so scopes nest freely.

use crate::core::extract::SharedContext;
use crate::core::logger::Logger;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

/// What a scope binds for its duration
pub enum Scope {
    /// Push these tags on entry, pop them on exit. Blank entries are
    /// filtered, so only the tags actually appended are popped.
    Tags(Vec<String>),
    /// Bind this context object for extraction; the previous binding is
    /// restored on exit. The tag stack is untouched.
    Context(SharedContext),
}

impl Scope {
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Scope::Tags(tags.into_iter().map(Into::into).collect())
    }

    pub fn context(ctx: SharedContext) -> Self {
        Scope::Context(ctx)
    }
}

enum Cleanup {
    PopTags(usize),
    RestoreContext(Option<SharedContext>),
}

impl Logger {
    /// Run `body` inside a unit-of-work scope.
    ///
    /// The body receives the logger handle and may log, post, and open
    /// nested scopes. Whatever way the body exits, the scope flushes while
    /// its own binding is still in place, so the record carries the
    /// scope's routing key and its context reaches extraction. The
    /// binding is then undone (tags popped, previous context restored)
    /// and a panic is re-raised last.
    pub fn with_scope<R>(&mut self, scope: Scope, body: impl FnOnce(&mut Self) -> R) -> R {
        let cleanup = match scope {
            Scope::Tags(tags) => Cleanup::PopTags(self.push_tags(tags).len()),
            Scope::Context(ctx) => Cleanup::RestoreContext(self.replace_context(ctx)),
        };

        let result = catch_unwind(AssertUnwindSafe(|| body(self)));

        self.flush();
        match cleanup {
            Cleanup::PopTags(count) => {
                self.pop_tags(count);
            }
            Cleanup::RestoreContext(prev) => self.restore_context(prev),
        }

        match result {
            Ok(value) => value,
            Err(panic) => resume_unwind(panic),
        }
    }

    /// Tag scope: push, run, flush under the scoped key, pop exactly what
    /// was pushed.
    pub fn with_tags<I, S, R>(&mut self, tags: I, body: impl FnOnce(&mut Self) -> R) -> R
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_scope(Scope::tags(tags), body)
    }

    /// Context scope: bind the request-like object for extraction, run,
    /// flush with the binding in place, restore the previous binding.
    pub fn with_context<R>(
        &mut self,
        ctx: SharedContext,
        body: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.with_scope(Scope::context(ctx), body)
    }
}
