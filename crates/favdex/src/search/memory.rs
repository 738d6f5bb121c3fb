use super::{Completion, SearchIndex};
use crate::error::{FavdexError, Result};
use crate::model::IndexRecord;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};

/// One call made against the index, as seen by [`MemIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOp {
    Index(Vec<IndexRecord>),
    Delete(Vec<String>),
}

struct Pending {
    op: IndexOp,
    done: Completion,
}

/// In-memory search index for testing.
///
/// Every call is recorded in order. In immediate mode operations apply and
/// complete inside the call. In deferred mode they queue up until the test
/// drives them with [`MemIndex::complete_next`] or [`MemIndex::complete_last`],
/// which is how out-of-order completion is reproduced.
#[derive(Default)]
pub struct MemIndex {
    records: RefCell<BTreeMap<String, IndexRecord>>,
    calls: RefCell<Vec<IndexOp>>,
    pending: RefCell<VecDeque<Pending>>,
    deferred: bool,
    simulate_failure: Cell<bool>,
}

impl MemIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// An index whose operations wait for the test to complete them.
    pub fn deferred() -> Self {
        Self {
            deferred: true,
            ..Self::default()
        }
    }

    /// Make every operation applied from now on fail.
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.set(simulate);
    }

    /// Seed a record directly, bypassing call recording.
    pub fn insert_record(&self, record: IndexRecord) {
        self.records
            .borrow_mut()
            .insert(record.identifier.clone(), record);
    }

    pub fn calls(&self) -> Vec<IndexOp> {
        self.calls.borrow().clone()
    }

    pub fn records(&self) -> Vec<IndexRecord> {
        self.records.borrow().values().cloned().collect()
    }

    pub fn record(&self, identifier: &str) -> Option<IndexRecord> {
        self.records.borrow().get(identifier).cloned()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Apply and complete the oldest pending operation.
    pub fn complete_next(&self) -> bool {
        let next = self.pending.borrow_mut().pop_front();
        self.finish(next)
    }

    /// Apply and complete the newest pending operation.
    pub fn complete_last(&self) -> bool {
        let last = self.pending.borrow_mut().pop_back();
        self.finish(last)
    }

    /// Complete every pending operation in submission order.
    pub fn complete_all(&self) -> usize {
        let mut completed = 0;
        while self.complete_next() {
            completed += 1;
        }
        completed
    }

    fn finish(&self, pending: Option<Pending>) -> bool {
        match pending {
            Some(Pending { op, done }) => {
                let outcome = self.apply(&op);
                done(outcome);
                true
            }
            None => false,
        }
    }

    fn apply(&self, op: &IndexOp) -> Result<()> {
        if self.simulate_failure.get() {
            return Err(FavdexError::Index("Simulated index failure".to_string()));
        }
        let mut records = self.records.borrow_mut();
        match op {
            IndexOp::Index(items) => {
                for record in items {
                    records.insert(record.identifier.clone(), record.clone());
                }
            }
            IndexOp::Delete(identifiers) => {
                for identifier in identifiers {
                    records.remove(identifier);
                }
            }
        }
        Ok(())
    }

    fn submit(&self, op: IndexOp, done: Completion) {
        self.calls.borrow_mut().push(op.clone());
        if self.deferred {
            self.pending.borrow_mut().push_back(Pending { op, done });
        } else {
            let outcome = self.apply(&op);
            done(outcome);
        }
    }
}

impl SearchIndex for MemIndex {
    fn index_items(&self, records: Vec<IndexRecord>, done: Completion) {
        self.submit(IndexOp::Index(records), done);
    }

    fn delete_items(&self, identifiers: Vec<String>, done: Completion) {
        self.submit(IndexOp::Delete(identifiers), done);
    }

    fn indexed_identifiers(&self, domain: &str) -> Result<Vec<String>> {
        Ok(self
            .records
            .borrow()
            .values()
            .filter(|r| r.domain_identifier == domain)
            .map(|r| r.identifier.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tutorial;
    use std::rc::Rc;

    fn record(position: usize) -> IndexRecord {
        IndexRecord::for_position(
            position,
            &Tutorial::new(position, format!("T{}", position), "sub"),
            "com.example",
            "public.text",
        )
    }

    fn outcome_sink() -> (Rc<RefCell<Vec<bool>>>, impl Fn() -> Completion) {
        let sink = Rc::new(RefCell::new(Vec::new()));
        let make = {
            let sink = Rc::clone(&sink);
            move || -> Completion {
                let sink = Rc::clone(&sink);
                Box::new(move |outcome: Result<()>| sink.borrow_mut().push(outcome.is_ok()))
            }
        };
        (sink, make)
    }

    #[test]
    fn immediate_mode_applies_and_completes() {
        let index = MemIndex::new();
        let (sink, done) = outcome_sink();

        index.index_items(vec![record(1)], done());
        assert_eq!(*sink.borrow(), vec![true]);
        assert!(index.record("1").is_some());

        index.delete_items(vec!["1".to_string()], done());
        assert_eq!(*sink.borrow(), vec![true, true]);
        assert!(index.record("1").is_none());
        assert_eq!(index.calls().len(), 2);
    }

    #[test]
    fn deferred_mode_waits_for_completion() {
        let index = MemIndex::deferred();
        let (sink, done) = outcome_sink();

        index.index_items(vec![record(2)], done());
        assert_eq!(index.pending_count(), 1);
        assert!(sink.borrow().is_empty());
        assert!(index.record("2").is_none());

        assert!(index.complete_next());
        assert_eq!(*sink.borrow(), vec![true]);
        assert!(index.record("2").is_some());
        assert!(!index.complete_next());
    }

    #[test]
    fn out_of_order_completion_leaves_stale_state() {
        let index = MemIndex::deferred();
        let (_sink, done) = outcome_sink();

        index.index_items(vec![record(3)], done());
        index.delete_items(vec!["3".to_string()], done());

        // Delete lands first, then the older upsert.
        index.complete_last();
        index.complete_last();
        assert!(index.record("3").is_some());
    }

    #[test]
    fn simulated_failure_reports_error_and_keeps_records() {
        let index = MemIndex::new();
        let (sink, done) = outcome_sink();
        index.set_simulate_failure(true);

        index.index_items(vec![record(4)], done());
        assert_eq!(*sink.borrow(), vec![false]);
        assert!(index.records().is_empty());
    }

    #[test]
    fn identifiers_are_filtered_by_domain() {
        let index = MemIndex::new();
        index.insert_record(record(1));
        let mut other = record(2);
        other.domain_identifier = "org.other".to_string();
        index.insert_record(other);

        assert_eq!(index.indexed_identifiers("com.example").unwrap(), vec!["1"]);
    }
}
