//! Serialized request processing.
//!
//! The host enqueues requests and calls [`Dispatcher::drain`] whenever the
//! queue is non-empty. Each popped request is run to completion and handed
//! back through the completion callback before the next one is popped.
//! A failing request never stops the drain.

use crate::error::BlockError;
use crate::queue::RequestQueue;
use crate::request::{Direction, Outcome, Request, RequestKind};
use crate::storage::transfer::{transfer, TransferBuf};
use crate::storage::BackingStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatcherState {
    Idle,
    Draining,
}

/// Request counts by outcome, either over the lifetime of a dispatcher or
/// for a single drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub completed: u64,
    pub failed: u64,
    pub rejected: u64,
}

/// What a single `drain` call did.
pub type DrainSummary = DispatchStats;

impl DispatchStats {
    pub fn total(&self) -> u64 {
        self.completed + self.failed + self.rejected
    }

    fn record(&mut self, tally: Tally) {
        match tally {
            Tally::Completed => self.completed += 1,
            Tally::Failed => self.failed += 1,
            Tally::Rejected => self.rejected += 1,
        }
    }
}

#[derive(Clone, Copy)]
enum Tally {
    Completed,
    Failed,
    Rejected,
}

impl Tally {
    fn of(result: &Result<(), BlockError>) -> Self {
        match result {
            Ok(()) => Tally::Completed,
            Err(BlockError::UnsupportedRequestKind(_)) => Tally::Rejected,
            Err(_) => Tally::Failed,
        }
    }
}

pub struct Dispatcher<'s> {
    store: &'s BackingStore,
    sector_size: usize,
    state: DispatcherState,
    stats: DispatchStats,
}

impl<'s> Dispatcher<'s> {
    pub fn new(store: &'s BackingStore, sector_size: usize) -> Self {
        Dispatcher { store, sector_size, state: DispatcherState::Idle, stats: DispatchStats::default() }
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Pops and processes requests until `queue` is empty, passing each one
    /// to `complete` as soon as its outcome is set.
    pub fn drain<'a, Q, F>(&mut self, queue: &mut Q, mut complete: F) -> DrainSummary
    where
        Q: RequestQueue<'a> + ?Sized,
        F: FnMut(Request<'a>),
    {
        debug_assert_eq!(self.state, DispatcherState::Idle);
        self.state = DispatcherState::Draining;
        let mut summary = DrainSummary::default();

        while let Some(mut request) = queue.pop() {
            summary.record(self.execute(&mut request));
            complete(request);
        }

        self.state = DispatcherState::Idle;
        log::debug!(
            "drained {} requests ({} completed, {} failed, {} rejected)",
            summary.total(),
            summary.completed,
            summary.failed,
            summary.rejected
        );
        summary
    }

    /// Processes one request, records its outcome on it and returns it.
    pub fn process(&mut self, request: &mut Request<'_>) -> Outcome {
        self.execute(request);
        request.outcome()
    }

    fn execute(&mut self, request: &mut Request<'_>) -> Tally {
        let result = match request.kind() {
            RequestKind::Data(direction) => self.run_transfer(request, direction),
            kind => {
                log::warn!("skipping non-data request {:?}", kind);
                Err(BlockError::UnsupportedRequestKind(kind))
            }
        };

        let tally = Tally::of(&result);
        self.stats.record(tally);
        if result.is_ok() {
            log::trace!(
                "{:?} {}+{} done",
                request.kind(),
                request.start_sector(),
                request.sector_count()
            );
        }
        request.finish(result);
        tally
    }

    fn run_transfer(&self, request: &mut Request<'_>, direction: Direction) -> Result<(), BlockError> {
        let sector_size = self.sector_size;
        let start_sector = request.start_sector();
        let sector_count = request.sector_count();
        let data = request.data_mut();
        let buf = match direction {
            Direction::Read => TransferBuf::Read(data),
            Direction::Write => TransferBuf::Write(data),
        };
        // One guard per request, released when the closure returns.
        self.store
            .with_bytes(|disk| transfer(disk, sector_size, start_sector, sector_count, buf))
    }
}
