//! Scripted in-memory store used by tests.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use super::{Connection, Connector, StoreError};
use crate::dto::{NoteCreateRequest, NoteCreateResult};

#[derive(Debug, Clone)]
pub enum Outcome {
    Created(i64),
    Rejected { code: &'static str, message: &'static str },
    ConnectFails,
}

#[derive(Debug, Default)]
pub struct Counters {
    pub connects: AtomicUsize,
    pub commands: AtomicUsize,
    pub closes: AtomicUsize,
}

impl Counters {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn commands(&self) -> usize {
        self.commands.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

pub struct MemoryConnector {
    outcome: Outcome,
    pub counters: Arc<Counters>,
}

impl MemoryConnector {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            counters: Arc::new(Counters::default()),
        }
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self) -> Result<Box<dyn Connection>, StoreError> {
        if matches!(self.outcome, Outcome::ConnectFails) {
            return Err(StoreError::Rejected {
                code: "08001".to_string(),
                message: "could not connect to server".to_string(),
                detail: None,
            });
        }

        self.counters.connects.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(MemoryConnection {
            outcome: self.outcome.clone(),
            counters: self.counters.clone(),
            open: true,
        }))
    }
}

struct MemoryConnection {
    outcome: Outcome,
    counters: Arc<Counters>,
    open: bool,
}

#[async_trait]
impl Connection for MemoryConnection {
    async fn create_note(
        &mut self,
        _request: &NoteCreateRequest,
    ) -> Result<NoteCreateResult, StoreError> {
        if !self.open {
            return Err(StoreError::Closed);
        }

        self.counters.commands.fetch_add(1, Ordering::SeqCst);

        match &self.outcome {
            Outcome::Created(note_id) => Ok(NoteCreateResult { note_id: *note_id }),
            Outcome::Rejected { code, message } => Err(StoreError::Rejected {
                code: (*code).to_string(),
                message: (*message).to_string(),
                detail: None,
            }),
            Outcome::ConnectFails => unreachable!("connection never opened"),
        }
    }

    async fn close(&mut self) -> Result<(), StoreError> {
        assert!(self.open, "connection released twice");
        self.open = false;
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
