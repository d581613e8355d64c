// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod seed;

use staffdesk_app::{
    Bill, Case, CommsItem, Constituent, Event, Expense, Record, ValidationError, filter_records,
};
use thiserror::Error;

pub use seed::DEFAULT_WALLET_ADDRESS;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{kind} {id} not found -- refresh the list and retry")]
    NotFound { kind: &'static str, id: i64 },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Record access for one tab. Ids are chosen by the store, never the caller.
pub trait Store<R: Record> {
    /// Rows matching `query` in insertion order; blank returns all.
    fn list(&self, query: &str) -> Vec<R>;
    fn get(&self, id: i64) -> Option<R>;
    fn create(&mut self, input: R::Input) -> StoreResult<R>;
    fn update(&mut self, id: i64, input: R::Input) -> StoreResult<R>;
    fn delete(&mut self, id: i64) -> StoreResult<R>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered in-memory rows plus a monotonic id counter. Deleted ids are
/// never handed out again.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore<R: Record> {
    rows: Vec<R>,
    next_id: i64,
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts pre-built rows. The counter starts above the largest id seen.
    pub fn from_records(rows: Vec<R>) -> Self {
        let next_id = rows.iter().map(|row| row.row_id()).max().unwrap_or(0) + 1;
        Self { rows, next_id }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    fn position(&self, id: i64) -> StoreResult<usize> {
        self.rows
            .iter()
            .position(|row| row.row_id() == id)
            .ok_or(StoreError::NotFound { kind: R::NOUN, id })
    }
}

impl<R: Record> Store<R> for RecordStore<R> {
    fn list(&self, query: &str) -> Vec<R> {
        filter_records(&self.rows, query)
    }

    fn get(&self, id: i64) -> Option<R> {
        self.rows.iter().find(|row| row.row_id() == id).cloned()
    }

    fn create(&mut self, input: R::Input) -> StoreResult<R> {
        R::check_input(&input)?;
        let id = self.next_id;
        self.next_id += 1;
        let record = R::assemble(id, input);
        self.rows.push(record.clone());
        tracing::info!(kind = R::NOUN, id, "record created");
        Ok(record)
    }

    fn update(&mut self, id: i64, input: R::Input) -> StoreResult<R> {
        let index = self.position(id)?;
        R::check_input(&input)?;
        let record = R::assemble(id, input);
        self.rows[index] = record.clone();
        tracing::info!(kind = R::NOUN, id, "record updated");
        Ok(record)
    }

    fn delete(&mut self, id: i64) -> StoreResult<R> {
        let index = self.position(id)?;
        let removed = self.rows.remove(index);
        tracing::info!(kind = R::NOUN, id, "record deleted");
        Ok(removed)
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// One session's worth of record stores, one per record tab.
#[derive(Debug, Clone, PartialEq)]
pub struct Office {
    pub cases: RecordStore<Case>,
    pub bills: RecordStore<Bill>,
    pub events: RecordStore<Event>,
    pub constituents: RecordStore<Constituent>,
    pub expenses: RecordStore<Expense>,
    pub comms: RecordStore<CommsItem>,
}

impl Office {
    pub fn empty() -> Self {
        Self {
            cases: RecordStore::new(),
            bills: RecordStore::new(),
            events: RecordStore::new(),
            constituents: RecordStore::new(),
            expenses: RecordStore::new(),
            comms: RecordStore::new(),
        }
    }

    pub fn seeded() -> Self {
        let office = Self {
            cases: RecordStore::from_records(seed::cases()),
            bills: RecordStore::from_records(seed::bills()),
            events: RecordStore::from_records(seed::events()),
            constituents: RecordStore::from_records(seed::constituents()),
            expenses: RecordStore::from_records(seed::expenses()),
            comms: RecordStore::from_records(seed::comms()),
        };
        tracing::debug!(
            cases = office.cases.len(),
            bills = office.bills.len(),
            events = office.events.len(),
            constituents = office.constituents.len(),
            expenses = office.expenses.len(),
            comms = office.comms.len(),
            "office seeded"
        );
        office
    }
}
