use crate::geometry::{Constraints, ResizeDirection, WindowBounds};

/// One continuous pointer interaction with the overlay window, from
/// pointer-down to pointer-up. Dragging and resizing are variants of the
/// same value, so holding both at once cannot be expressed.
///
/// `baseline` is the window geometry snapshot taken when the session
/// started and `origin` is the pointer position at that moment; all
/// movement math is relative to those two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Idle,
    Dragging {
        origin: (i32, i32),
        baseline: WindowBounds,
    },
    Resizing {
        origin: (i32, i32),
        baseline: WindowBounds,
        direction: ResizeDirection,
    },
}

impl Session {
    pub fn is_idle(&self) -> bool {
        matches!(self, Session::Idle)
    }
}

/// Window position for a drag: the baseline origin translated by the
/// pointer delta. The position is not clamped; keeping the window on
/// screen is the windowing backend's call.
pub fn drag_target(baseline: WindowBounds, origin: (i32, i32), pointer: (i32, i32)) -> (i32, i32) {
    let dx = pointer.0 - origin.0;
    let dy = pointer.1 - origin.1;
    (baseline.x + dx, baseline.y + dy)
}

/// Window size for a resize, clamped to `limits` on each axis before it
/// is handed out. A handle with no horizontal component leaves the width
/// at its baseline value, and likewise for height.
///
/// Left and top handles use the same sign convention as right and bottom;
/// the window origin is never adjusted here.
pub fn resize_target(
    direction: ResizeDirection,
    baseline: WindowBounds,
    origin: (i32, i32),
    pointer: (i32, i32),
    limits: &Constraints,
) -> (i32, i32) {
    let dx = pointer.0 - origin.0;
    let dy = pointer.1 - origin.1;
    let width = if direction.horizontal() {
        limits.clamp_width(baseline.width + dx)
    } else {
        baseline.width
    };
    let height = if direction.vertical() {
        limits.clamp_height(baseline.height + dy)
    } else {
        baseline.height
    };
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::{drag_target, resize_target};
    use crate::geometry::{Constraints, ResizeDirection, WindowBounds};

    fn baseline() -> WindowBounds {
        WindowBounds::new(100, 100, 400, 300)
    }

    fn limits() -> Constraints {
        Constraints {
            min_width: 300,
            min_height: 250,
            max_width: 1200,
            max_height: 900,
        }
    }

    #[test]
    fn drag_is_an_exact_translation() {
        let target = drag_target(baseline(), (10, 20), (35, 5));
        assert_eq!(target, (125, 85));
    }

    #[test]
    fn drag_may_move_the_window_off_screen() {
        let target = drag_target(baseline(), (0, 0), (-500, -500));
        assert_eq!(target, (-400, -400));
    }

    #[test]
    fn zero_delta_keeps_the_baseline() {
        assert_eq!(drag_target(baseline(), (7, 7), (7, 7)), (100, 100));
        for direction in ResizeDirection::ALL {
            let size = resize_target(direction, baseline(), (7, 7), (7, 7), &limits());
            assert_eq!(size, (400, 300), "direction: {}", direction.token());
        }
    }

    #[test]
    fn corner_resize_clamps_both_axes_at_max() {
        let size = resize_target(
            ResizeDirection::BottomRight,
            baseline(),
            (0, 0),
            (1000, 1000),
            &limits(),
        );
        assert_eq!(size, (1200, 900));
    }

    #[test]
    fn right_resize_clamps_width_at_min_and_leaves_height() {
        let size = resize_target(ResizeDirection::Right, baseline(), (0, 0), (-500, 0), &limits());
        assert_eq!(size, (300, 300));
    }

    #[test]
    fn delta_landing_exactly_on_a_limit_is_kept() {
        // 400 + 800 == max_width, 300 - 50 == min_height
        let size = resize_target(
            ResizeDirection::BottomRight,
            baseline(),
            (0, 0),
            (800, -50),
            &limits(),
        );
        assert_eq!(size, (1200, 250));
    }

    #[test]
    fn horizontal_handles_never_touch_height() {
        for direction in [ResizeDirection::Left, ResizeDirection::Right] {
            let size = resize_target(direction, baseline(), (0, 0), (50, 9000), &limits());
            assert_eq!(size.1, 300, "direction: {}", direction.token());
        }
    }

    #[test]
    fn vertical_handles_never_touch_width() {
        for direction in [ResizeDirection::Top, ResizeDirection::Bottom] {
            let size = resize_target(direction, baseline(), (0, 0), (9000, 50), &limits());
            assert_eq!(size.0, 400, "direction: {}", direction.token());
        }
    }

    #[test]
    fn left_and_top_share_the_right_and_bottom_sign_convention() {
        let grow = resize_target(ResizeDirection::Left, baseline(), (0, 0), (60, 0), &limits());
        assert_eq!(grow, (460, 300));
        let shrink = resize_target(ResizeDirection::Top, baseline(), (0, 0), (0, -20), &limits());
        assert_eq!(shrink, (400, 280));
    }
}
