use std::sync::{Arc, Mutex, Weak};

use slab::Slab;

use crate::geometry::{Constraints, ResizeDirection};
use crate::interaction::WindowInteraction;
use crate::owner::GeometryOwner;
use crate::session::Session;

/// Axis-aligned hit region in screen coordinates. The right and bottom
/// edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl HitRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: (i32, i32)) -> bool {
        point.0 >= self.x
            && point.0 < self.x + self.width
            && point.1 >= self.y
            && point.1 < self.y + self.height
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceHit {
    /// A control button inside the title row; never starts a session.
    Control,
    /// A resize handle, carrying its direction token.
    Handle(String),
    TitleBar,
}

/// Hit regions of the frameless surface: the draggable title row, the
/// control buttons punched out of it, and the resize handles along the
/// window border. Rebuilt by the rendering layer whenever the layout
/// changes.
#[derive(Debug, Clone, Default)]
pub struct SurfaceLayout {
    title_bar: Option<HitRect>,
    controls: Vec<HitRect>,
    handles: Vec<(String, HitRect)>,
}

impl SurfaceLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title_bar(&mut self, rect: HitRect) {
        self.title_bar = Some(rect);
    }

    pub fn add_control(&mut self, rect: HitRect) {
        self.controls.push(rect);
    }

    pub fn add_handle(&mut self, token: impl Into<String>, rect: HitRect) {
        self.handles.push((token.into(), rect));
    }

    /// Eight handle strips of the given thickness along the border of
    /// `window`, corners first so they win over the edges.
    pub fn add_border_handles(&mut self, window: HitRect, thickness: i32) {
        let t = thickness;
        let HitRect {
            x,
            y,
            width: w,
            height: h,
        } = window;
        self.add_handle("top-left", HitRect::new(x, y, t, t));
        self.add_handle("top-right", HitRect::new(x + w - t, y, t, t));
        self.add_handle("bottom-left", HitRect::new(x, y + h - t, t, t));
        self.add_handle("bottom-right", HitRect::new(x + w - t, y + h - t, t, t));
        self.add_handle("top", HitRect::new(x + t, y, w - 2 * t, t));
        self.add_handle("bottom", HitRect::new(x + t, y + h - t, w - 2 * t, t));
        self.add_handle("left", HitRect::new(x, y + t, t, h - 2 * t));
        self.add_handle("right", HitRect::new(x + w - t, y + t, t, h - 2 * t));
    }

    /// Controls shadow everything else, then handles, then the title row.
    pub fn hit_test(&self, point: (i32, i32)) -> Option<SurfaceHit> {
        if self.controls.iter().any(|rect| rect.contains(point)) {
            return Some(SurfaceHit::Control);
        }
        if let Some((token, _)) = self
            .handles
            .iter()
            .find(|(_, rect)| rect.contains(point))
        {
            return Some(SurfaceHit::Handle(token.clone()));
        }
        match &self.title_bar {
            Some(rect) if rect.contains(point) => Some(SurfaceHit::TitleBar),
            _ => None,
        }
    }
}

type MoveListener = Box<dyn FnMut((i32, i32)) + Send>;
type ReleaseListener = Box<dyn FnMut() + Send>;

#[derive(Default)]
struct HubInner {
    moved: Slab<MoveListener>,
    released: Slab<ReleaseListener>,
}

/// Pointer event fan-out with handle-scoped registration. Subscribing
/// returns a disposal handle; dropping the handle removes exactly the
/// slot it was issued for, so repeated sessions cannot accumulate stale
/// listeners.
#[derive(Clone, Default)]
pub struct PointerHub {
    inner: Arc<Mutex<HubInner>>,
}

pub struct MoveSubscription {
    inner: Weak<Mutex<HubInner>>,
    key: usize,
}

impl Drop for MoveSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            if let Ok(mut hub) = inner.lock() {
                hub.moved.try_remove(self.key);
            }
        }
    }
}

pub struct ReleaseSubscription {
    inner: Weak<Mutex<HubInner>>,
    key: usize,
}

impl Drop for ReleaseSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            if let Ok(mut hub) = inner.lock() {
                hub.released.try_remove(self.key);
            }
        }
    }
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_moved(
        &self,
        listener: impl FnMut((i32, i32)) + Send + 'static,
    ) -> MoveSubscription {
        let key = match self.inner.lock() {
            Ok(mut hub) => hub.moved.insert(Box::new(listener)),
            Err(_) => usize::MAX,
        };
        MoveSubscription {
            inner: Arc::downgrade(&self.inner),
            key,
        }
    }

    pub fn subscribe_released(
        &self,
        listener: impl FnMut() + Send + 'static,
    ) -> ReleaseSubscription {
        let key = match self.inner.lock() {
            Ok(mut hub) => hub.released.insert(Box::new(listener)),
            Err(_) => usize::MAX,
        };
        ReleaseSubscription {
            inner: Arc::downgrade(&self.inner),
            key,
        }
    }

    pub fn emit_moved(&self, point: (i32, i32)) {
        if let Ok(mut hub) = self.inner.lock() {
            for (_, listener) in hub.moved.iter_mut() {
                listener(point);
            }
        }
    }

    pub fn emit_released(&self) {
        if let Ok(mut hub) = self.inner.lock() {
            for (_, listener) in hub.released.iter_mut() {
                listener();
            }
        }
    }

    /// Number of live listeners across both event kinds.
    pub fn live_listeners(&self) -> usize {
        match self.inner.lock() {
            Ok(hub) => hub.moved.len() + hub.released.len(),
            Err(_) => 0,
        }
    }
}

/// Move and release subscriptions held for the duration of one session.
/// Dropping the pair deregisters both.
struct SessionBinding {
    _moved: MoveSubscription,
    _released: ReleaseSubscription,
}

/// Binds surface hit regions to interaction sessions.
///
/// A pointer-down over the title row starts a drag; over a handle, a
/// resize with that handle's direction. Control buttons and unknown
/// handle tokens start nothing. Move and release listeners are
/// registered once per session and released when it ends.
pub struct PointerRouter<C: GeometryOwner + Clone + Send + 'static> {
    owner: C,
    layout: SurfaceLayout,
    hub: PointerHub,
    interaction: Arc<Mutex<WindowInteraction>>,
    binding: Option<SessionBinding>,
}

impl<C: GeometryOwner + Clone + Send + 'static> PointerRouter<C> {
    pub fn new(owner: C, limits: Constraints) -> Self {
        Self {
            owner,
            layout: SurfaceLayout::new(),
            hub: PointerHub::new(),
            interaction: Arc::new(Mutex::new(WindowInteraction::new(limits))),
            binding: None,
        }
    }

    pub fn set_layout(&mut self, layout: SurfaceLayout) {
        self.layout = layout;
    }

    pub fn session(&self) -> Session {
        self.interaction
            .lock()
            .map(|interaction| interaction.session())
            .unwrap_or(Session::Idle)
    }

    pub fn live_listeners(&self) -> usize {
        self.hub.live_listeners()
    }

    pub fn pointer_down(&mut self, point: (i32, i32)) {
        if self
            .interaction
            .lock()
            .map(|interaction| interaction.is_engaged())
            .unwrap_or(true)
        {
            return;
        }
        let Some(hit) = self.layout.hit_test(point) else {
            return;
        };
        let started = match hit {
            SurfaceHit::Control => false,
            SurfaceHit::TitleBar => self
                .interaction
                .lock()
                .map(|mut interaction| interaction.begin_drag(&self.owner, point))
                .unwrap_or(false),
            SurfaceHit::Handle(token) => match ResizeDirection::parse(&token) {
                Some(direction) => self
                    .interaction
                    .lock()
                    .map(|mut interaction| interaction.begin_resize(&self.owner, direction, point))
                    .unwrap_or(false),
                None => {
                    tracing::debug!(token = %token, "handle with unknown direction ignored");
                    false
                }
            },
        };
        if started {
            self.bind_session();
        }
    }

    pub fn pointer_moved(&mut self, point: (i32, i32)) {
        self.hub.emit_moved(point);
    }

    pub fn pointer_released(&mut self) {
        self.hub.emit_released();
        // Dropping the binding deregisters the session's listeners.
        self.binding = None;
    }

    fn bind_session(&mut self) {
        let interaction = Arc::clone(&self.interaction);
        let owner = self.owner.clone();
        let moved = self.hub.subscribe_moved(move |point| {
            if let Ok(mut interaction) = interaction.lock() {
                interaction.pointer_move(&owner, point);
            }
        });
        let interaction = Arc::clone(&self.interaction);
        let released = self.hub.subscribe_released(move || {
            if let Ok(mut interaction) = interaction.lock() {
                interaction.pointer_up();
            }
        });
        self.binding = Some(SessionBinding {
            _moved: moved,
            _released: released,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{HitRect, PointerHub, SurfaceHit, SurfaceLayout};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn hit_rect_edges_are_exclusive_on_the_far_side() {
        let rect = HitRect::new(10, 10, 20, 20);
        assert!(rect.contains((10, 10)));
        assert!(rect.contains((29, 29)));
        assert!(!rect.contains((30, 29)));
        assert!(!rect.contains((9, 15)));
    }

    #[test]
    fn controls_shadow_the_title_bar() {
        let mut layout = SurfaceLayout::new();
        layout.set_title_bar(HitRect::new(0, 0, 100, 30));
        layout.add_control(HitRect::new(80, 5, 15, 15));

        assert_eq!(layout.hit_test((85, 10)), Some(SurfaceHit::Control));
        assert_eq!(layout.hit_test((40, 10)), Some(SurfaceHit::TitleBar));
        assert_eq!(layout.hit_test((40, 50)), None);
    }

    #[test]
    fn border_handles_cover_all_eight_regions() {
        let mut layout = SurfaceLayout::new();
        layout.add_border_handles(HitRect::new(0, 0, 100, 80), 5);

        let expect = [
            ((2, 2), "top-left"),
            ((97, 2), "top-right"),
            ((2, 77), "bottom-left"),
            ((97, 77), "bottom-right"),
            ((50, 2), "top"),
            ((50, 77), "bottom"),
            ((2, 40), "left"),
            ((97, 40), "right"),
        ];
        for (point, token) in expect {
            assert_eq!(
                layout.hit_test(point),
                Some(SurfaceHit::Handle(token.into())),
                "point {point:?}"
            );
        }
        assert_eq!(layout.hit_test((50, 40)), None);
    }

    #[test]
    fn dropping_a_subscription_removes_exactly_that_listener() {
        let hub = PointerHub::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let kept_calls = Arc::clone(&calls);
        let _kept = hub.subscribe_moved(move |_| {
            kept_calls.fetch_add(1, Ordering::SeqCst);
        });
        let dropped_calls = Arc::clone(&calls);
        let dropped = hub.subscribe_moved(move |_| {
            dropped_calls.fetch_add(10, Ordering::SeqCst);
        });

        hub.emit_moved((0, 0));
        assert_eq!(calls.load(Ordering::SeqCst), 11);

        drop(dropped);
        assert_eq!(hub.live_listeners(), 1);
        hub.emit_moved((0, 0));
        assert_eq!(calls.load(Ordering::SeqCst), 12);
    }

    #[test]
    fn release_listeners_fire_and_dispose_independently() {
        let hub = PointerHub::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let release_calls = Arc::clone(&calls);
        let sub = hub.subscribe_released(move || {
            release_calls.fetch_add(1, Ordering::SeqCst);
        });
        hub.emit_released();
        drop(sub);
        hub.emit_released();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(hub.live_listeners(), 0);
    }
}
