use alloc::collections::VecDeque;

use crate::request::Request;

/// Source of pending requests for the dispatcher. Implementations must hand
/// requests out in arrival order and never block in `pop`.
pub trait RequestQueue<'a> {
    fn push(&mut self, request: Request<'a>);
    fn pop(&mut self) -> Option<Request<'a>>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Plain first-in first-out queue. No merging, no priorities.
#[derive(Debug, Default)]
pub struct FifoQueue<'a> {
    pending: VecDeque<Request<'a>>,
}

impl<'a> FifoQueue<'a> {
    pub fn new() -> Self {
        FifoQueue { pending: VecDeque::new() }
    }
}

impl<'a> RequestQueue<'a> for FifoQueue<'a> {
    fn push(&mut self, request: Request<'a>) {
        self.pending.push_back(request);
    }

    fn pop(&mut self) -> Option<Request<'a>> {
        self.pending.pop_front()
    }

    fn len(&self) -> usize {
        self.pending.len()
    }
}

impl<'a> Extend<Request<'a>> for FifoQueue<'a> {
    fn extend<I: IntoIterator<Item = Request<'a>>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}
