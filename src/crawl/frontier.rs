// src/crawl/frontier.rs
// =============================================================================
// The frontier: pages discovered but not visited yet.
//
// How it works:
// 1. The seed goes in first
// 2. Accepted links are queued in one of two lanes (HighPriority, Normal)
// 3. next() always drains the HighPriority lane before the Normal lane,
//    FIFO inside each lane
// 4. Every URL that has ever been queued is remembered, so nothing is queued
//    or visited twice
// 5. Once max_pages requests have been handed out, next() returns None and
//    enqueue() refuses new links
//
// Only the controller's run loop touches the frontier, so there is no locking.
//
// Rust concepts:
// - VecDeque: push_back/pop_front gives FIFO order inside each lane
// - HashSet::insert returns false for a duplicate, so it is also the check
// - Option::or_else: try the high lane, then the normal lane
// =============================================================================

use std::collections::{HashSet, VecDeque};

use super::fallback::FallbackForm;
use crate::links::{LinkDecision, LinkTier};

// Why a request is in the queue. Only the homepage lineage can trigger a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOrigin {
    Seed,
    Fallback(FallbackForm),
    Discovered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedRequest {
    pub url: String,
    pub origin: RequestOrigin,
}

impl QueuedRequest {
    pub fn is_homepage_attempt(&self) -> bool {
        !matches!(self.origin, RequestOrigin::Discovered)
    }
}

#[derive(Debug)]
pub struct Frontier {
    high: VecDeque<QueuedRequest>,
    normal: VecDeque<QueuedRequest>,
    // Queued or already dispatched
    seen: HashSet<String>,
    dispatched: usize,
    max_pages: usize,
}

impl Frontier {
    pub fn new(max_pages: usize) -> Self {
        Self {
            high: VecDeque::new(),
            normal: VecDeque::new(),
            seen: HashSet::new(),
            dispatched: 0,
            max_pages,
        }
    }

    pub fn push_seed(&mut self, url: String) {
        self.seen.insert(url.clone());
        self.high.push_back(QueuedRequest {
            url,
            origin: RequestOrigin::Seed,
        });
    }

    // A fallback form of the homepage jumps the queue and skips the
    // budget check here (it is still counted when dispatched).
    // Returns false if that URL was already queued or visited.
    pub fn push_fallback(&mut self, url: String, form: FallbackForm) -> bool {
        if !self.seen.insert(url.clone()) {
            return false;
        }
        self.high.push_front(QueuedRequest {
            url,
            origin: RequestOrigin::Fallback(form),
        });
        true
    }

    /// Queues an accepted link. Returns true if it was actually added.
    pub fn enqueue(&mut self, decision: &LinkDecision) -> bool {
        if self.budget_exhausted() {
            return false;
        }

        let lane = match decision.tier {
            LinkTier::HighPriority => &mut self.high,
            LinkTier::Normal => &mut self.normal,
            LinkTier::Rejected => return false,
        };

        if !self.seen.insert(decision.href.clone()) {
            return false;
        }

        lane.push_back(QueuedRequest {
            url: decision.href.clone(),
            origin: RequestOrigin::Discovered,
        });
        true
    }

    /// Hands out the next request and counts it against the page budget.
    pub fn next(&mut self) -> Option<QueuedRequest> {
        if self.budget_exhausted() {
            return None;
        }
        let request = self.high.pop_front().or_else(|| self.normal.pop_front())?;
        self.dispatched += 1;
        Some(request)
    }

    pub fn budget_exhausted(&self) -> bool {
        self.dispatched >= self.max_pages
    }

    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn queued(&self) -> usize {
        self.high.len() + self.normal.len()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why two VecDeques instead of a BinaryHeap?
//    - There are only two priorities, and inside each we want FIFO order
//    - A BinaryHeap does not keep insertion order for equal priorities
//
// 2. Why is `seen` separate from the queues?
//    - It also remembers URLs that were already handed out
//    - HashSet::insert returns false for a duplicate, which doubles as the check
//
// 3. Why does push_fallback use push_front?
//    - A fallback only happens after the homepage failed, so the queue is
//      normally empty anyway; push_front just makes "next" unambiguous
// -----------------------------------------------------------------------------
