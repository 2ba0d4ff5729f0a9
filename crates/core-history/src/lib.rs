//! Generic past/future navigation stack.
//!
//! A [`Timeline`] holds a current item plus two stacks: "past" (items we can
//! go back to) and "future" (items we can go forward to after going back).
//! The same type backs both undo/redo of editor snapshots and the
//! recent-queries list; the caller-supplied equality predicate is what
//! differs between the two (snapshot equality ignores a bare cursor move,
//! recents compare strings).
//!
//! Guarantees:
//! * `go_back` then `go_forward` with no intervening `append` restores the
//!   original current item (round-trip).
//! * `append` after `go_back` discards all forward history (diverging from
//!   history prunes the abandoned future).

use tracing::trace;

pub struct Timeline<T, F> {
    past: Vec<T>,
    future: Vec<T>,
    current: T,
    same: F,
}

impl<T, F> Timeline<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    pub fn new(initial: T, same: F) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            current: initial,
            same,
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Move one step back, pushing the old current onto "future". No-op
    /// returning the unchanged current if the past is empty.
    pub fn go_back(&mut self) -> &T {
        if let Some(prev) = self.past.pop() {
            let old = std::mem::replace(&mut self.current, prev);
            self.future.push(old);
            trace!(target: "history", past = self.past.len(), future = self.future.len(), "go_back");
        }
        &self.current
    }

    /// Move one step forward, pushing the old current onto "past". No-op
    /// returning the unchanged current if the future is empty.
    pub fn go_forward(&mut self) -> &T {
        if let Some(next) = self.future.pop() {
            let old = std::mem::replace(&mut self.current, next);
            self.past.push(old);
            trace!(target: "history", past = self.past.len(), future = self.future.len(), "go_forward");
        }
        &self.current
    }

    /// Record a new current item. Items equal to the current under the
    /// predicate are skipped; otherwise the old current moves to "past" and
    /// the future is discarded.
    pub fn append(&mut self, item: T) {
        if !self.push_current(item) {
            return;
        }
        self.future.clear();
        trace!(target: "history", past = self.past.len(), "append");
    }

    /// Like [`append`](Self::append) but preserves "future" — used when
    /// committing a finished query without discarding forward navigation of
    /// the recents list.
    pub fn append_keeping_future(&mut self, item: T) {
        if !self.push_current(item) {
            return;
        }
        trace!(target: "history", past = self.past.len(), future = self.future.len(), "append_keeping_future");
    }

    /// Clear both stacks and replace the current item.
    pub fn reset(&mut self, item: T) {
        self.past.clear();
        self.future.clear();
        self.current = item;
        trace!(target: "history", "reset");
    }

    /// Drop the oldest past entries beyond `cap`.
    pub fn trim_past(&mut self, cap: usize) {
        if self.past.len() > cap {
            let excess = self.past.len() - cap;
            self.past.drain(..excess);
            trace!(target: "history", trimmed = excess, "trim_past");
        }
    }

    fn push_current(&mut self, item: T) -> bool {
        if (self.same)(&item, &self.current) {
            trace!(target: "history", "append_dedupe_skip");
            return false;
        }
        let old = std::mem::replace(&mut self.current, item);
        self.past.push(old);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(initial: &str) -> Timeline<String, fn(&String, &String) -> bool> {
        Timeline::new(initial.to_string(), |a, b| a == b)
    }

    #[test]
    fn back_then_forward_round_trips() {
        let mut t = strings("a");
        for item in ["b", "c", "d"] {
            t.append(item.to_string());
        }
        for _ in 0..3 {
            t.go_back();
        }
        assert_eq!(t.current(), "a");
        for _ in 0..3 {
            t.go_forward();
        }
        assert_eq!(t.current(), "d");
    }

    #[test]
    fn navigation_is_no_op_on_empty_stack() {
        let mut t = strings("only");
        assert_eq!(t.go_back(), "only");
        assert_eq!(t.go_forward(), "only");
    }

    #[test]
    fn append_prunes_divergent_future() {
        let mut t = strings("base");
        t.append("a".to_string());
        t.append("b".to_string());
        t.go_back();
        t.append("c".to_string());
        // forward history to "b" was discarded
        assert_eq!(t.go_forward(), "c");
        assert_eq!(t.future_len(), 0);
    }

    #[test]
    fn append_dedupes_against_current() {
        let mut t = strings("a");
        t.append("a".to_string());
        assert_eq!(t.past_len(), 0);
        t.append("b".to_string());
        assert_eq!(t.past_len(), 1);
    }

    #[test]
    fn append_keeping_future_preserves_forward_entries() {
        let mut t = strings("a");
        t.append("b".to_string());
        t.go_back();
        assert_eq!(t.future_len(), 1);
        t.append_keeping_future("c".to_string());
        assert_eq!(t.current(), "c");
        assert_eq!(t.go_forward(), "b");
    }

    #[test]
    fn reset_clears_both_stacks() {
        let mut t = strings("a");
        t.append("b".to_string());
        t.go_back();
        t.reset("fresh".to_string());
        assert_eq!(t.current(), "fresh");
        assert_eq!(t.past_len(), 0);
        assert_eq!(t.future_len(), 0);
    }

    #[test]
    fn trim_drops_oldest_entries() {
        let mut t = strings("0");
        for i in 1..=5 {
            t.append(i.to_string());
        }
        t.trim_past(2);
        assert_eq!(t.past_len(), 2);
        t.go_back();
        t.go_back();
        assert_eq!(t.current(), "3");
        assert_eq!(t.go_back(), "3");
    }
}
