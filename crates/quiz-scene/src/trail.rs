//! Fading trail of recent pointer positions.

use std::collections::VecDeque;

use quiz_surface::{rgba, Canvas, ShapeStyle};

use crate::animation::map_range;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailDot {
    pub center: [f32; 2],
    pub diameter: f32,
    pub alpha: u8,
}

/// Ring of the last `capacity` pointer samples, oldest first.
pub struct CursorTrail {
    points: VecDeque<[f32; 2]>,
    capacity: usize,
}

impl CursorTrail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record one sample; called once per frame with the current pointer.
    pub fn push(&mut self, point: [f32; 2]) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Older samples are smaller and fainter: 5 to 25 px, alpha 30 to 200.
    pub fn dots(&self) -> impl Iterator<Item = TrailDot> + '_ {
        let n = self.points.len() as f32;
        self.points.iter().enumerate().map(move |(i, &center)| TrailDot {
            center,
            diameter: map_range(i as f32, 0.0, n, 5.0, 25.0),
            alpha: map_range(i as f32, 0.0, n, 30.0, 200.0).round() as u8,
        })
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        for dot in self.dots() {
            canvas.circle(dot.center, dot.diameter, &ShapeStyle::filled(rgba(255, 165, 0, dot.alpha)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_samples() {
        let mut trail = CursorTrail::new(3);
        for i in 0..5 {
            trail.push([i as f32, 0.0]);
        }
        let xs: Vec<f32> = trail.dots().map(|d| d.center[0]).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn dots_grow_and_brighten_towards_the_newest() {
        let mut trail = CursorTrail::new(20);
        for i in 0..20 {
            trail.push([i as f32, i as f32]);
        }
        let dots: Vec<TrailDot> = trail.dots().collect();
        assert_eq!(dots.len(), 20);
        assert_eq!(dots[0].diameter, 5.0);
        assert_eq!(dots[0].alpha, 30);
        assert_eq!(dots[19].diameter, 24.0);
        assert!(dots.windows(2).all(|w| w[0].diameter < w[1].diameter && w[0].alpha <= w[1].alpha));
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut trail = CursorTrail::new(0);
        trail.push([1.0, 1.0]);
        assert!(trail.is_empty());
        assert_eq!(trail.len(), 0);
    }
}
