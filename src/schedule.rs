//! Deferred callbacks.
//!
//! The session never waits: it hands a [`Ticket`] to a [`Scheduler`] and the
//! host calls back into [`GameSession::fire`](crate::game::GameSession::fire)
//! once the delay has elapsed. Tickets carry the session generation they were
//! issued under, so a callback that outlives a reset is ignored.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    /// Let the automated player move.
    CpuMove,
    /// Show the final result popup.
    ShowResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub task: Task,
    pub delay_ms: u32,
    pub generation: u64,
}

pub trait Scheduler {
    fn schedule(&mut self, ticket: Ticket);
}

/// FIFO of pending tickets, shared between the session and its host.
#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    pending: Rc<RefCell<VecDeque<Ticket>>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pop(&self) -> Option<Ticket> {
        self.pending.borrow_mut().pop_front()
    }

    pub fn drain(&self) -> Vec<Ticket> {
        self.pending.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl Scheduler for TaskQueue {
    fn schedule(&mut self, ticket: Ticket) {
        self.pending.borrow_mut().push_back(ticket);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_pending_tickets() {
        let host = TaskQueue::new();
        let mut session_side = host.clone();
        let ticket = Ticket {
            task: Task::CpuMove,
            delay_ms: 300,
            generation: 1,
        };

        session_side.schedule(ticket);
        session_side.schedule(Ticket {
            task: Task::ShowResult,
            ..ticket
        });

        assert_eq!(host.len(), 2);
        assert_eq!(host.pop(), Some(ticket));
        assert_eq!(host.drain().len(), 1);
        assert!(session_side.is_empty());
    }
}
