//! Time of impact for swept circles against circles and segments

use log::{debug, trace};

use super::quadratic::quadratic_roots_within;
use super::CollisionConfig;
use crate::algebra::Multivector;
use crate::foundation::math::zeroish_within;

fn dot(left: &Multivector, right: &Multivector) -> f64 {
    left.dot(right).scalar()
}

/// A static line segment with thickness
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// First endpoint
    pub start: Multivector,
    /// Second endpoint
    pub end: Multivector,
    /// Full thickness; the segment reaches `width / 2` either side of its line
    pub width: f64,
}

impl Segment {
    /// Zero-width segment between two points
    pub fn new(start: impl Into<Multivector>, end: impl Into<Multivector>) -> Self {
        Self { start: start.into(), end: end.into(), width: 0.0 }
    }

    /// Set the thickness
    #[must_use]
    pub const fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// `end − start`
    pub fn direction(&self) -> Multivector {
        &self.end - &self.start
    }

    /// Squared length
    pub fn length_squared(&self) -> f64 {
        let direction = self.direction();
        dot(&direction, &direction)
    }

    /// Signed distance from `start` to the foot of `point` on the
    /// supporting line, positive toward `end`
    ///
    /// Not meaningful for a zero-length segment.
    pub fn projection(&self, point: &Multivector) -> f64 {
        let direction = self.direction();
        dot(&(point - &self.start), &direction) / self.length_squared().sqrt()
    }

    /// Vector from the closest point on the supporting line to `point`
    pub fn offset_from_line(&self, point: &Multivector) -> Multivector {
        let relative = point - &self.start;
        let length_squared = self.length_squared();
        if length_squared == 0.0 {
            return relative;
        }
        let direction = self.direction();
        let along = dot(&relative, &direction) / length_squared;
        relative - direction.scale(along)
    }
}

/// Swept collision queries with a configurable tolerance
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContinuousCollision {
    config: CollisionConfig,
}

impl ContinuousCollision {
    /// Create a query set using `config`
    pub const fn new(config: CollisionConfig) -> Self {
        Self { config }
    }

    /// Active tolerances
    pub const fn config(&self) -> &CollisionConfig {
        &self.config
    }

    fn zeroish(&self, value: f64) -> bool {
        zeroish_within(value, self.config.epsilon)
    }

    /// Earliest entering root of `a·t² + b·t + c` in `[0, 1]`.
    ///
    /// Roots near zero snap to zero. A root where the expression is
    /// increasing marks the bodies separating, not meeting, so it is
    /// skipped.
    fn earliest_contact(&self, a: f64, b: f64, c: f64) -> Option<f64> {
        quadratic_roots_within(a, b, c, self.config.epsilon)
            .into_iter()
            .map(|t| if self.zeroish(t) { 0.0 } else { t })
            .filter(|t| (0.0..=1.0).contains(t))
            .filter(|&t| {
                let slope = 2.0f64.mul_add(a * t, b);
                let entering = slope <= self.config.epsilon;
                if !entering {
                    trace!("ignoring separating root t = {t} (slope {slope})");
                }
                entering
            })
            .reduce(f64::min)
    }

    /// Earliest fraction of the step at which two moving circles touch.
    ///
    /// Circle one moves from `s1` to `e1` with radius `r1`, circle two from
    /// `s2` to `e2` with radius `r2`.
    pub fn radius_radius(
        &self,
        s1: &Multivector,
        e1: &Multivector,
        r1: f64,
        s2: &Multivector,
        e2: &Multivector,
        r2: f64,
    ) -> Option<f64> {
        let relative = (e1 - s1) - (e2 - s2);
        let offset = s1 - s2;
        let gap = r1 + r2;

        let mut result = self.earliest_contact(
            dot(&relative, &relative),
            2.0 * dot(&offset, &relative),
            gap.mul_add(-gap, dot(&offset, &offset)),
        );

        if result.is_some_and(|t| self.zeroish(t)) {
            let separation = e1 - e2;
            if dot(&offset, &offset) < dot(&separation, &separation) {
                trace!("suppressing contact at t = 0: circles moving apart");
                result = None;
            }
        }

        debug!("radius/radius: r1 = {r1}, r2 = {r2}, contact = {result:?}");
        result
    }

    /// Earliest fraction of the step at which a moving circle touches a
    /// segment.
    ///
    /// The circle moves from `s` to `e` with radius `r`. Contacts that only
    /// occur against the segment's infinite extension are ignored, so a
    /// body can slip around the segment's ends.
    pub fn radius_segment(&self, s: &Multivector, e: &Multivector, r: f64, segment: &Segment) -> Option<f64> {
        let half_width = segment.width / 2.0;
        let length_squared = segment.length_squared();

        if self.zeroish(length_squared) {
            return self.radius_radius(s, e, r, &segment.start, &segment.end, half_width);
        }

        let length = length_squared.sqrt();
        let reach = r + half_width;
        let gap = reach * reach;
        let start_offset = segment.offset_from_line(s);
        let end_offset = segment.offset_from_line(e);
        let start_along = segment.projection(s);
        let end_along = segment.projection(e);

        // Already in range of the line but beside an end: collide with the endpoint
        if dot(&start_offset, &start_offset) < gap {
            if start_along < 0.0 {
                trace!("delegating to segment start cap");
                return self.radius_radius(s, e, r, &segment.start, &segment.start, half_width);
            } else if start_along > length {
                trace!("delegating to segment end cap");
                return self.radius_radius(s, e, r, &segment.end, &segment.end, half_width);
            }
        }

        let q = segment.direction();
        let m = e - s;
        let n = s - &segment.start;
        let mq = dot(&m, &q);
        let nq = dot(&n, &q);

        let mut result = self.earliest_contact(
            dot(&m, &m) - mq * mq / length_squared,
            2.0 * dot(&m, &n) - 2.0 * mq * nq / length_squared,
            dot(&n, &n) - nq * nq / length_squared - gap,
        );

        if result.is_some_and(|t| self.zeroish(t))
            && dot(&end_offset, &end_offset) > dot(&start_offset, &start_offset)
            && dot(&start_offset, &end_offset) > 0.0
        {
            trace!("suppressing contact at t = 0: moving away from segment");
            result = None;
        }

        if result.is_some() {
            let before = start_along + r < 0.0 && end_along + r < 0.0;
            let beyond = start_along - r > length && end_along - r > length;
            if before || beyond {
                trace!("ignoring contact with the segment's extension");
                result = None;
            }
        }

        debug!("radius/segment: r = {r}, width = {}, contact = {result:?}", segment.width);
        result
    }
}

/// [`ContinuousCollision::radius_radius`] with the default tolerance
pub fn collide_radius_radius(
    s1: &Multivector,
    e1: &Multivector,
    r1: f64,
    s2: &Multivector,
    e2: &Multivector,
    r2: f64,
) -> Option<f64> {
    ContinuousCollision::default().radius_radius(s1, e1, r1, s2, e2, r2)
}

/// [`ContinuousCollision::radius_segment`] with the default tolerance
pub fn collide_radius_segment(s: &Multivector, e: &Multivector, r: f64, segment: &Segment) -> Option<f64> {
    ContinuousCollision::default().radius_segment(s, e, r, segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use approx::assert_relative_eq;

    fn at(x: f64, y: f64) -> Multivector {
        Multivector::from([x, y])
    }

    fn unit_segment() -> Segment {
        Segment::new([-1.0, 0.0], [1.0, 0.0])
    }

    #[test]
    fn test_circles_meeting_at_step_end() {
        let toi = collide_radius_radius(&at(-3.0, 0.0), &at(-1.0, 0.0), 1.0, &at(3.0, 0.0), &at(1.0, 0.0), 1.0);
        assert_eq!(toi, Some(1.0));
    }

    #[test]
    fn test_circles_meeting_mid_step() {
        let toi = collide_radius_radius(&at(-5.0, 0.0), &at(5.0, 0.0), 1.0, &at(0.0, 0.0), &at(0.0, 0.0), 1.0);
        assert_relative_eq!(toi.unwrap(), 0.3);
    }

    #[test]
    fn test_overlapping_circles_separating() {
        let toi = collide_radius_radius(&at(0.0, 0.0), &at(0.0, 0.0), 1.0, &at(1.5, 0.0), &at(3.0, 0.0), 1.0);
        assert_eq!(toi, None);
    }

    #[test]
    fn test_touching_circles_moving_apart() {
        let toi = collide_radius_radius(&at(0.0, 0.0), &at(-1.0, 0.0), 1.0, &at(2.0, 0.0), &at(3.0, 0.0), 1.0);
        assert_eq!(toi, None);
        let toi = collide_radius_radius(&at(0.0, 0.0), &at(1.0, 0.0), 1.0, &at(2.0, 0.0), &at(2.0, 0.0), 1.0);
        assert_eq!(toi, Some(0.0));
    }

    #[test]
    fn test_circles_missing() {
        let toi = collide_radius_radius(&at(-5.0, 3.0), &at(5.0, 3.0), 1.0, &at(0.0, 0.0), &at(0.0, 0.0), 1.0);
        assert_eq!(toi, None);
        // Stationary pair has no roots at all
        let toi = collide_radius_radius(&at(0.0, 0.0), &at(0.0, 0.0), 1.0, &at(1.0, 0.0), &at(1.0, 0.0), 1.0);
        assert_eq!(toi, None);
    }

    #[test]
    fn test_circle_crossing_segment() {
        let toi = collide_radius_segment(&at(0.0, -5.0), &at(0.0, 5.0), 1.0, &unit_segment());
        assert_relative_eq!(toi.unwrap(), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_segment_width_adds_reach() {
        let segment = unit_segment().with_width(2.0);
        let toi = collide_radius_segment(&at(0.0, -5.0), &at(0.0, 5.0), 1.0, &segment);
        assert_relative_eq!(toi.unwrap(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_parallel_motion_never_collides() {
        for length in [2.0, 20.0, 2000.0] {
            let segment = Segment::new([-length / 2.0, 0.0], [length / 2.0, 0.0]);
            let toi = collide_radius_segment(&at(-5.0, 2.0), &at(5.0, 2.0), 1.0, &segment);
            assert_eq!(toi, None, "length {length}");
        }
    }

    #[test]
    fn test_touching_segment() {
        // Moving away from contact
        assert_eq!(collide_radius_segment(&at(0.0, 1.0), &at(0.0, 3.0), 1.0, &unit_segment()), None);
        // Approaching
        assert_eq!(collide_radius_segment(&at(0.0, 3.0), &at(0.0, 1.0), 1.0, &unit_segment()), Some(1.0));
    }

    #[test]
    fn test_endpoint_cap() {
        let toi = collide_radius_segment(&at(-3.0, 0.5), &at(-1.0, 0.5), 1.0, &unit_segment());
        assert_relative_eq!(toi.unwrap(), 1.0 - 3.0_f64.sqrt() / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_passing_beside_segment_end() {
        let toi = collide_radius_segment(&at(5.0, -5.0), &at(5.0, 5.0), 1.0, &unit_segment());
        assert_eq!(toi, None);
    }

    #[test]
    fn test_zero_length_segment_is_a_circle() {
        let point = Segment::new([0.0, 0.0], [0.0, 0.0]).with_width(2.0);
        let toi = collide_radius_segment(&at(-5.0, 0.0), &at(5.0, 0.0), 1.0, &point);
        assert_relative_eq!(toi.unwrap(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_segment_geometry() {
        let segment = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0));
        assert_eq!(segment.length_squared(), 16.0);
        assert_eq!(segment.projection(&at(1.0, 3.0)), 1.0);
        assert_eq!(segment.projection(&at(-2.0, 3.0)), -2.0);
        assert_eq!(segment.offset_from_line(&at(1.0, 3.0)), at(0.0, 3.0));
        assert_eq!(segment.offset_from_line(&at(6.0, -1.0)), at(0.0, -1.0));
    }

    #[test]
    fn test_tolerance_decides_marginal_overlap() {
        // Starts a hair inside contact range while closing in
        let (s, e) = (at(0.0, 1.0 - 1e-8), at(0.0, 0.5));
        let loose = ContinuousCollision::new(CollisionConfig { epsilon: 1e-6 });
        assert_eq!(loose.config().epsilon, 1e-6);
        assert_eq!(loose.radius_segment(&s, &e, 1.0, &unit_segment()), Some(0.0));
        assert_eq!(ContinuousCollision::default().radius_segment(&s, &e, 1.0, &unit_segment()), None);
    }
}
