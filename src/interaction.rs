use crate::geometry::{Constraints, ResizeDirection};
use crate::owner::{BoundsReply, GeometryOwner, ReplyPoll, WindowCommand};
use crate::session::{drag_target, resize_target, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKind {
    Drag,
    Resize(ResizeDirection),
}

/// A bounds query issued at pointer-down that has not been answered yet.
/// The session stays `Idle` until it resolves.
#[derive(Debug)]
struct PendingBaseline {
    kind: PendingKind,
    origin: (i32, i32),
    reply: BoundsReply,
}

/// Drives one drag or resize interaction against the geometry owner.
///
/// Starting an interaction snapshots the window bounds through the owner
/// channel. Pointer moves arriving before the snapshot are dropped, not
/// queued; the first usable baseline wins. While `Idle` with nothing
/// pending, no geometry command is ever sent.
#[derive(Debug)]
pub struct WindowInteraction {
    limits: Constraints,
    session: Session,
    pending: Option<PendingBaseline>,
}

impl WindowInteraction {
    pub fn new(limits: Constraints) -> Self {
        Self {
            limits,
            session: Session::Idle,
            pending: None,
        }
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn limits(&self) -> Constraints {
        self.limits
    }

    /// Whether a session is live or a baseline query is in flight.
    pub fn is_engaged(&self) -> bool {
        !self.session.is_idle() || self.pending.is_some()
    }

    /// Start a drag. Returns false without touching anything when an
    /// interaction is already underway.
    pub fn begin_drag<C: GeometryOwner>(&mut self, owner: &C, origin: (i32, i32)) -> bool {
        self.begin(owner, PendingKind::Drag, origin)
    }

    /// Start a resize from the given handle. Same idempotence rule as
    /// `begin_drag`.
    pub fn begin_resize<C: GeometryOwner>(
        &mut self,
        owner: &C,
        direction: ResizeDirection,
        origin: (i32, i32),
    ) -> bool {
        self.begin(owner, PendingKind::Resize(direction), origin)
    }

    fn begin<C: GeometryOwner>(&mut self, owner: &C, kind: PendingKind, origin: (i32, i32)) -> bool {
        if self.is_engaged() {
            return false;
        }
        tracing::debug!(?kind, ?origin, "interaction started, querying baseline");
        self.pending = Some(PendingBaseline {
            kind,
            origin,
            reply: owner.request_bounds(),
        });
        true
    }

    /// Feed a pointer move. Resolves a pending baseline first; once a
    /// session is live, dispatches one geometry command per call.
    pub fn pointer_move<C: GeometryOwner>(&mut self, owner: &C, pointer: (i32, i32)) {
        if let Some(pending) = self.pending.take() {
            match pending.reply.poll() {
                ReplyPoll::Pending => {
                    // Baseline not in yet; this move is dropped.
                    self.pending = Some(pending);
                    return;
                }
                ReplyPoll::Failed => {
                    tracing::debug!("baseline query failed, interaction aborted");
                    return;
                }
                ReplyPoll::Ready(baseline) => {
                    self.session = match pending.kind {
                        PendingKind::Drag => Session::Dragging {
                            origin: pending.origin,
                            baseline,
                        },
                        PendingKind::Resize(direction) => Session::Resizing {
                            origin: pending.origin,
                            baseline,
                            direction,
                        },
                    };
                }
            }
        }

        match self.session {
            Session::Idle => {}
            Session::Dragging { origin, baseline } => {
                let (x, y) = drag_target(baseline, origin, pointer);
                owner.send(WindowCommand::SetPosition { x, y });
            }
            Session::Resizing {
                origin,
                baseline,
                direction,
            } => {
                let (width, height) =
                    resize_target(direction, baseline, origin, pointer, &self.limits);
                owner.send(WindowCommand::SetSize { width, height });
            }
        }
    }

    /// End the interaction unconditionally. Any unanswered baseline query
    /// is discarded.
    pub fn pointer_up(&mut self) {
        if self.is_engaged() {
            tracing::debug!(session = ?self.session, "interaction ended");
        }
        self.session = Session::Idle;
        self.pending = None;
    }
}
