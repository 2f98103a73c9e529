//! Small shared helpers.

use crate::game::Position;

/// Taxicab distance between two grid cells.
pub fn manhattan_distance(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_sums_axis_offsets() {
        let a = Position::new(1, 2);
        let b = Position::new(4, 0);
        assert_eq!(manhattan_distance(a, b), 5);
        assert_eq!(manhattan_distance(b, a), 5, "distance should be symmetric");
        assert_eq!(manhattan_distance(a, a), 0);
    }
}
