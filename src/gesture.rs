//! Drag gesture to direction mapping.
//!
//! Translations use screen coordinates: x grows to the right, y grows downward.

use crate::engine::Move;

/// Drags shorter than this are not recognised as swipes.
pub const DEFAULT_MIN_DISTANCE: f64 = 30.0;

impl Move {
    /// Direction of a drag with translation `(dx, dy)`.
    ///
    /// The axis with the larger magnitude wins; ties go to the vertical axis.
    /// ```
    /// use game_2048::engine::Move;
    /// assert_eq!(Move::from_drag(-50.0, 10.0), Move::Left);
    /// assert_eq!(Move::from_drag(5.0, -60.0), Move::Up);
    /// ```
    pub fn from_drag(dx: f64, dy: f64) -> Move {
        if dx.abs() > dy.abs() {
            if dx < 0.0 { Move::Left } else { Move::Right }
        } else if dy < 0.0 {
            Move::Up
        } else {
            Move::Down
        }
    }
}

/// Swipe recogniser with a minimum travel distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub min_distance: f64,
}

impl Default for Drag {
    fn default() -> Self {
        Drag { min_distance: DEFAULT_MIN_DISTANCE }
    }
}

impl Drag {
    pub fn new(min_distance: f64) -> Self {
        Drag { min_distance }
    }

    /// `None` when the drag is too short to count as a swipe.
    pub fn direction(&self, dx: f64, dy: f64) -> Option<Move> {
        if dx.hypot(dy) < self.min_distance {
            return None;
        }
        Some(Move::from_drag(dx, dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_axis_picks_direction() {
        assert_eq!(Move::from_drag(-50.0, 10.0), Move::Left);
        assert_eq!(Move::from_drag(50.0, -10.0), Move::Right);
        assert_eq!(Move::from_drag(5.0, -60.0), Move::Up);
        assert_eq!(Move::from_drag(-5.0, 60.0), Move::Down);
    }

    #[test]
    fn ties_go_vertical() {
        assert_eq!(Move::from_drag(40.0, 40.0), Move::Down);
        assert_eq!(Move::from_drag(-40.0, -40.0), Move::Up);
        assert_eq!(Move::from_drag(0.0, 0.0), Move::Down);
    }

    #[test]
    fn short_drags_are_ignored() {
        let drag = Drag::default();
        assert_eq!(drag.direction(10.0, 10.0), None);
        assert_eq!(drag.direction(-50.0, 10.0), Some(Move::Left));
        assert_eq!(drag.direction(0.0, 30.0), Some(Move::Down));
        assert_eq!(Drag::new(0.0).direction(0.0, -1.0), Some(Move::Up));
    }
}
