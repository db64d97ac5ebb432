use crate::owner::{BoundsReply, GeometryOwner, ReplyPoll, WindowCommand};

/// Inset from the bottom-right corner of the usable display area where
/// the window first appears.
pub const DEFAULT_PLACEMENT_INSET: (i32, i32) = (650, 600);

/// One-shot initial placement of the overlay window.
///
/// Queries the usable screen area and positions the window at a fixed
/// inset from its bottom-right corner, so the first frame does not land
/// at the display origin. Runs once per window lifetime; if the display
/// query fails the step is skipped and the owner's default position
/// stands.
#[derive(Debug)]
pub struct PlacementBootstrapper {
    inset: (i32, i32),
    reply: Option<BoundsReply>,
    settled: bool,
}

impl PlacementBootstrapper {
    pub fn new(inset: (i32, i32)) -> Self {
        Self {
            inset,
            reply: None,
            settled: false,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Issue the display-area query. Subsequent calls are no-ops.
    pub fn begin<C: GeometryOwner>(&mut self, owner: &C) {
        if self.settled || self.reply.is_some() {
            return;
        }
        self.reply = Some(owner.request_display_bounds());
    }

    /// Poll the query and, once answered, send the placement command.
    pub fn poll<C: GeometryOwner>(&mut self, owner: &C) {
        let Some(reply) = &self.reply else {
            return;
        };
        match reply.poll() {
            ReplyPoll::Pending => {}
            ReplyPoll::Failed => {
                tracing::debug!("display bounds unavailable, keeping default position");
                self.reply = None;
                self.settled = true;
            }
            ReplyPoll::Ready(area) => {
                let x = area.x + area.width - self.inset.0;
                let y = area.y + area.height - self.inset.1;
                tracing::debug!(x, y, "placing window near the display corner");
                owner.send(WindowCommand::SetPosition { x, y });
                self.reply = None;
                self.settled = true;
            }
        }
    }
}
