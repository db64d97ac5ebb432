/// Absolute screen-space geometry of the overlay window.
///
/// The windowing backend owns the authoritative value; code in this crate
/// only ever works on a snapshot taken when an interaction starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowBounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Process-wide window size limits, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
}

impl Constraints {
    pub fn clamp_width(&self, width: i32) -> i32 {
        width.clamp(self.min_width, self.max_width)
    }

    pub fn clamp_height(&self, height: i32) -> i32 {
        height.clamp(self.min_height, self.max_height)
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_width: 300,
            min_height: 250,
            max_width: 1200,
            max_height: 900,
        }
    }
}

/// Which edge or corner handle a resize was grabbed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeDirection {
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::Top,
        ResizeDirection::Bottom,
        ResizeDirection::Left,
        ResizeDirection::Right,
        ResizeDirection::TopLeft,
        ResizeDirection::TopRight,
        ResizeDirection::BottomLeft,
        ResizeDirection::BottomRight,
    ];

    /// Parse a handle token such as `"top"` or `"bottom-right"`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "top-left" => Some(Self::TopLeft),
            "top-right" => Some(Self::TopRight),
            "bottom-left" => Some(Self::BottomLeft),
            "bottom-right" => Some(Self::BottomRight),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Whether the handle carries a left or right component.
    pub fn horizontal(self) -> bool {
        !matches!(self, Self::Top | Self::Bottom)
    }

    /// Whether the handle carries a top or bottom component.
    pub fn vertical(self) -> bool {
        !matches!(self, Self::Left | Self::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::{Constraints, ResizeDirection};

    #[test]
    fn direction_tokens_round_trip() {
        for direction in ResizeDirection::ALL {
            assert_eq!(
                ResizeDirection::parse(direction.token()),
                Some(direction),
                "token: {}",
                direction.token()
            );
        }
    }

    #[test]
    fn unknown_direction_tokens_are_rejected() {
        for token in ["", "TOP", "bottomright", "centre", "right "] {
            assert_eq!(ResizeDirection::parse(token), None, "token: {token:?}");
        }
    }

    #[test]
    fn direction_components() {
        use ResizeDirection::*;
        assert!(Right.horizontal() && !Right.vertical());
        assert!(!Top.horizontal() && Top.vertical());
        assert!(BottomRight.horizontal() && BottomRight.vertical());
        assert!(TopLeft.horizontal() && TopLeft.vertical());
    }

    #[test]
    fn clamp_holds_at_the_exact_limits() {
        let limits = Constraints::default();
        assert_eq!(limits.clamp_width(limits.min_width), limits.min_width);
        assert_eq!(limits.clamp_width(limits.max_width), limits.max_width);
        assert_eq!(limits.clamp_width(limits.min_width - 1), limits.min_width);
        assert_eq!(limits.clamp_height(limits.max_height + 1), limits.max_height);
    }
}
