//! A LIFO stack that can never be popped below its base element.
//!
//! Used by the emit session for the output-buffer and source-file stacks. Popping the base is a
//! bug in the emitter, not a data condition, so it panics.

/// Non-empty stack with a fixed floor of one element.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    /// Name used in invariant messages (`"output"`, `"source file"`).
    name: &'static str,
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new(name: &'static str, base: T) -> Self {
        Self { name, items: vec![base] }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// ## Panics
    /// - If only the base element is left.
    pub fn pop(&mut self) -> T {
        if self.items.len() <= 1 {
            panic!("INVARIANT: {} stack popped below its base", self.name);
        }
        self.items.pop().expect("INVARIANT: stack holds more than its base")
    }

    pub fn top(&self) -> &T {
        self.items.last().expect("INVARIANT: stack is never empty")
    }

    pub fn top_mut(&mut self) -> &mut T {
        self.items.last_mut().expect("INVARIANT: stack is never empty")
    }

    /// Number of elements, base included.
    pub fn depth(&self) -> usize {
        self.items.len()
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(item)
    }

    /// Consume a balanced stack and return its base.
    ///
    /// ## Panics
    /// - If pushes and pops were not paired.
    pub fn into_base(mut self) -> T {
        if self.items.len() != 1 {
            panic!(
                "INVARIANT: {} stack unbalanced at end of emission (depth {})",
                self.name,
                self.items.len()
            );
        }
        self.items.remove(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_lifo() {
        let mut stack = Stack::new("test", 0);
        stack.push(1);
        stack.push(2);
        assert_eq!(*stack.top(), 2);
        assert_eq!(stack.pop(), 2);
        assert_eq!(stack.pop(), 1);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.into_base(), 0);
    }

    #[test]
    fn test_top_mut_edits_top_only() {
        let mut stack = Stack::new("test", String::from("base"));
        stack.push(String::from("top"));
        stack.top_mut().push('!');
        assert_eq!(stack.pop(), "top!");
        assert_eq!(stack.top(), "base");
    }

    #[test]
    fn test_contains() {
        let mut stack = Stack::new("test", 'a');
        stack.push('b');
        assert!(stack.contains(&'a'));
        assert!(!stack.contains(&'c'));
    }

    #[test]
    #[should_panic(expected = "INVARIANT: test stack popped below its base")]
    fn test_pop_base_panics() {
        let mut stack = Stack::new("test", 0);
        stack.pop();
    }

    #[test]
    #[should_panic(expected = "unbalanced")]
    fn test_into_base_requires_balance() {
        let mut stack = Stack::new("test", 0);
        stack.push(1);
        stack.into_base();
    }
}
