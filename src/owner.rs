use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

use crate::geometry::WindowBounds;

/// One-way geometry commands for the window owner. Fire-and-forget: no
/// acknowledgement is awaited and the owner applies them in send order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    SetPosition { x: i32, y: i32 },
    SetSize { width: i32, height: i32 },
    Minimize,
    Hide,
}

/// Push messages from the owner side, drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OwnerNotice {
    /// Bring keyboard focus to the input line.
    FocusInput,
    /// Backend memory usage in megabytes, shown in the status row.
    MemoryUsage(f64),
}

/// Outcome of polling an in-flight bounds query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyPoll {
    Pending,
    Ready(WindowBounds),
    /// The responder went away without answering.
    Failed,
}

/// Poll handle for a bounds query. The reply is polled from the event
/// loop, never blocked on.
#[derive(Debug)]
pub struct BoundsReply {
    rx: Receiver<WindowBounds>,
}

impl BoundsReply {
    /// A reply handle together with the sender that fulfils it.
    pub fn pair() -> (Sender<WindowBounds>, BoundsReply) {
        let (tx, rx) = channel();
        (tx, BoundsReply { rx })
    }

    /// A reply that is already fulfilled, for owners that can answer
    /// synchronously.
    pub fn ready(bounds: WindowBounds) -> BoundsReply {
        let (tx, reply) = Self::pair();
        let _ = tx.send(bounds);
        reply
    }

    /// A reply whose responder is already gone; polls as `Failed`.
    pub fn failed() -> BoundsReply {
        let (_, reply) = Self::pair();
        reply
    }

    pub fn poll(&self) -> ReplyPoll {
        match self.rx.try_recv() {
            Ok(bounds) => ReplyPoll::Ready(bounds),
            Err(TryRecvError::Empty) => ReplyPoll::Pending,
            Err(TryRecvError::Disconnected) => ReplyPoll::Failed,
        }
    }
}

/// Channel to the entity that holds authoritative window geometry.
///
/// The shell never mutates geometry directly: it snapshots bounds through
/// `request_bounds` and issues `WindowCommand`s the owner applies.
pub trait GeometryOwner {
    fn send(&self, command: WindowCommand);

    /// Current window geometry. Answered asynchronously; used once per
    /// interaction start.
    fn request_bounds(&self) -> BoundsReply;

    /// Usable screen area, for initial placement.
    fn request_display_bounds(&self) -> BoundsReply;

    /// Next pending push message, if any.
    fn poll_notice(&self) -> Option<OwnerNotice> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundsReply, ReplyPoll};
    use crate::geometry::WindowBounds;

    #[test]
    fn ready_reply_yields_bounds_once() {
        let reply = BoundsReply::ready(WindowBounds::new(1, 2, 3, 4));
        assert_eq!(reply.poll(), ReplyPoll::Ready(WindowBounds::new(1, 2, 3, 4)));
        // The sender is gone after construction, so a second poll fails.
        assert_eq!(reply.poll(), ReplyPoll::Failed);
    }

    #[test]
    fn unanswered_reply_is_pending_until_the_sender_drops() {
        let (tx, reply) = BoundsReply::pair();
        assert_eq!(reply.poll(), ReplyPoll::Pending);
        drop(tx);
        assert_eq!(reply.poll(), ReplyPoll::Failed);
    }

    #[test]
    fn failed_reply_reports_failure() {
        assert_eq!(BoundsReply::failed().poll(), ReplyPoll::Failed);
    }
}
