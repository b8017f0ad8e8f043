//! Per-tick input, sampled once by the host and passed down by value.

/// Level-triggered state of the abstract actions for one tick. Key and
/// button bindings are resolved by the host before this is built.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub shoot: bool,
    pub focus: bool,
    /// Analog horizontal axis in `[-1, 1]`, positive to the right.
    pub axis_x: f64,
    /// Analog vertical axis in `[-1, 1]`, positive downward.
    pub axis_y: f64,
}

impl InputSnapshot {
    /// Raw direction in `{-1, 0, 1}²`. An axis past `dead_zone` counts as
    /// the matching press. When both sides of an axis are held the positive
    /// side (right, down) wins.
    pub fn direction(&self, dead_zone: f64) -> (f64, f64) {
        let right = self.right || self.axis_x > dead_zone;
        let left = self.left || self.axis_x < -dead_zone;
        let down = self.down || self.axis_y > dead_zone;
        let up = self.up || self.axis_y < -dead_zone;

        (axis(left, right), axis(up, down))
    }
}

fn axis(negative: bool, positive: bool) -> f64 {
    if positive {
        1.0
    } else if negative {
        -1.0
    } else {
        0.0
    }
}
