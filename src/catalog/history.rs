//! Query log: a stack of query descriptions, newest on top.

use std::collections::VecDeque;

/// Bounded (or unbounded) log of query lines.
///
/// With a capacity set, pushing onto a full log drops the oldest line.
#[derive(Debug, Clone, Default)]
pub struct QueryLog {
    lines: VecDeque<String>,
    capacity: Option<usize>,
}

impl QueryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_front(line.into());
        if let Some(capacity) = self.capacity {
            self.lines.truncate(capacity);
        }
    }

    /// Remove and return the most recent line.
    pub fn pop(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    /// Most recent line without removing it.
    pub fn last(&self) -> Option<&str> {
        self.lines.front().map(String::as_str)
    }

    /// All lines, most recent first.
    pub fn view(&self) -> Vec<&str> {
        self.lines.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
