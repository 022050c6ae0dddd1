use std::collections::VecDeque;

use crate::DEFAULT_HISTORY_ROWS;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub equation: String,
    pub result: f64,
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.equation, self.result)
    }
}

/// A fixed number of rows. Once full, each new entry pushes the oldest out.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    rows: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.rows.len() == self.capacity {
            self.rows.pop_front();
        }
        self.rows.push_back(entry);
    }

    /// The value `ANS` stands for, if anything has been computed yet.
    pub fn last_answer(&self) -> Option<f64> {
        self.rows.back().map(|entry| entry.result)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.rows.iter()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(equation: &str, result: f64) -> HistoryEntry {
        HistoryEntry {
            equation: equation.to_string(),
            result,
        }
    }

    #[test]
    fn test_push_and_last_answer() {
        let mut history = History::new(3);
        assert_eq!(history.last_answer(), None);

        history.push(entry("1+1", 2.0));
        history.push(entry("ANS*4", 8.0));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last_answer(), Some(8.0));
    }

    #[test]
    fn test_oldest_is_evicted() {
        let mut history = History::new(2);
        history.push(entry("1", 1.0));
        history.push(entry("2", 2.0));
        history.push(entry("3", 3.0));

        let equations: Vec<&str> = history.iter().map(|e| e.equation.as_str()).collect();
        assert_eq!(equations, vec!["2", "3"]);
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        assert_eq!(history.capacity(), DEFAULT_HISTORY_ROWS);
        history.push(entry("5", 5.0));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.last_answer(), None);
    }

    #[test]
    fn test_zero_rows_keeps_nothing() {
        let mut history = History::new(0);
        history.push(entry("5", 5.0));
        assert!(history.is_empty());
    }

    #[test]
    fn test_entry_display() {
        assert_eq!(entry("10/3", 3.333).to_string(), "10/3 = 3.333");
    }
}
