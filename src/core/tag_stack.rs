//! Hierarchical tag stack
//!
//! Ordered stack of scope names joined onto a fixed base tag to form the
//! routing key records are posted under. Push and pop are the only
//! mutations in the normal scope discipline; the stack must return to its
//! baseline before and after each unit of work.

/// Stack of nested scope tags over a fixed base tag
#[derive(Debug, Clone)]
pub struct TagStack {
    base: String,
    stack: Vec<String>,
}

impl TagStack {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            stack: Vec::new(),
        }
    }

    /// Append tags, filtering out blank entries. Returns the entries that
    /// were actually appended, in order, so the caller knows how many to
    /// pop later.
    pub fn push<I, S>(&mut self, tags: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let appended: Vec<String> = tags
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.trim().is_empty())
            .collect();
        self.stack.extend(appended.iter().cloned());
        appended
    }

    /// Remove up to `count` tags from the end, clamped to the current
    /// depth. Returns the removed entries in their original stack order.
    pub fn pop(&mut self, count: usize) -> Vec<String> {
        let keep = self.stack.len().saturating_sub(count);
        self.stack.split_off(keep)
    }

    /// Current routing key: base tag and stack entries joined with dots.
    pub fn current_key(&self) -> String {
        if self.stack.is_empty() {
            self.base.clone()
        } else {
            format!("{}.{}", self.base, self.stack.join("."))
        }
    }

    /// Administrative reset, used outside the normal scope discipline.
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stack_key_is_base() {
        let stack = TagStack::new("app");
        assert_eq!(stack.current_key(), "app");
    }

    #[test]
    fn test_push_builds_dotted_key() {
        let mut stack = TagStack::new("app");
        stack.push(["users", "create"]);
        assert_eq!(stack.current_key(), "app.users.create");
    }

    #[test]
    fn test_push_filters_blank_tags() {
        let mut stack = TagStack::new("app");
        let appended = stack.push(["users", "", "   ", "create"]);
        assert_eq!(appended, vec!["users", "create"]);
        assert_eq!(stack.current_key(), "app.users.create");
    }

    #[test]
    fn test_pop_removes_from_end() {
        let mut stack = TagStack::new("app");
        stack.push(["a", "b", "c"]);
        let removed = stack.pop(2);
        assert_eq!(removed, vec!["b", "c"]);
        assert_eq!(stack.current_key(), "app.a");
    }

    #[test]
    fn test_pop_clamps_to_depth() {
        let mut stack = TagStack::new("app");
        stack.push(["only"]);
        let removed = stack.pop(10);
        assert_eq!(removed, vec!["only"]);
        assert!(stack.is_empty());
        // Popping from an empty stack stays a no-op
        assert!(stack.pop(1).is_empty());
    }

    #[test]
    fn test_push_pop_balance_restores_key() {
        let mut stack = TagStack::new("app");
        stack.push(["outer"]);
        let before = stack.current_key();

        let appended = stack.push(["x", "y"]);
        stack.pop(appended.len());
        assert_eq!(stack.current_key(), before);
    }

    #[test]
    fn test_clear() {
        let mut stack = TagStack::new("app");
        stack.push(["a", "b"]);
        stack.clear();
        assert_eq!(stack.current_key(), "app");
        assert_eq!(stack.depth(), 0);
    }
}
