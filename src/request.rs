use crate::error::BlockError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

/// What a queued request asks for. Only `Data` moves bytes; the other kinds
/// are control requests this device does not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Data(Direction),
    Flush,
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Completed,
    Failed(BlockError),
}

/// One I/O request handed over by the host. The data buffer is borrowed
/// from the caller and must hold `sector_count * sector_size` bytes.
#[derive(Debug)]
pub struct Request<'a> {
    kind: RequestKind,
    start_sector: u64,
    sector_count: u64,
    data: &'a mut [u8],
    outcome: Outcome,
}

impl<'a> Request<'a> {
    pub fn new(kind: RequestKind, start_sector: u64, sector_count: u64, data: &'a mut [u8]) -> Self {
        Request { kind, start_sector, sector_count, data, outcome: Outcome::Pending }
    }

    pub fn read(start_sector: u64, sector_count: u64, data: &'a mut [u8]) -> Self {
        Self::new(RequestKind::Data(Direction::Read), start_sector, sector_count, data)
    }

    pub fn write(start_sector: u64, sector_count: u64, data: &'a mut [u8]) -> Self {
        Self::new(RequestKind::Data(Direction::Write), start_sector, sector_count, data)
    }

    pub fn flush() -> Self {
        Self::new(RequestKind::Flush, 0, 0, &mut [])
    }

    pub fn discard(start_sector: u64, sector_count: u64) -> Self {
        Self::new(RequestKind::Discard, start_sector, sector_count, &mut [])
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn direction(&self) -> Option<Direction> {
        match self.kind {
            RequestKind::Data(direction) => Some(direction),
            _ => None,
        }
    }

    pub fn start_sector(&self) -> u64 {
        self.start_sector
    }

    pub fn sector_count(&self) -> u64 {
        self.sector_count
    }

    /// The caller's buffer; holds the sectors read once a read completes.
    pub fn data(&self) -> &[u8] {
        &*self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Records the result. Only the dispatcher calls this, once per request.
    pub(crate) fn finish(&mut self, result: Result<(), BlockError>) {
        debug_assert_eq!(self.outcome, Outcome::Pending, "request finished twice");
        self.outcome = match result {
            Ok(()) => Outcome::Completed,
            Err(err) => Outcome::Failed(err),
        };
    }
}
