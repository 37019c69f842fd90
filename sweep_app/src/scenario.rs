//! Scenario files: moving bodies and static walls for one step

use clifford_engine::foundation::math::{utils::lerp, Vec2};
use clifford_engine::prelude::*;
use serde::{Deserialize, Serialize};

/// A circle moving linearly over the step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Label used in the log
    pub name: String,
    /// Center at `t = 0`
    pub start: Vec2,
    /// Center at `t = 1`
    pub end: Vec2,
    /// Circle radius
    pub radius: f64,
}

impl Body {
    /// Center at fraction `t` of the step
    pub fn position_at(&self, t: f64) -> Vec2 {
        Vec2::new(lerp(self.start.x, self.end.x, t), lerp(self.start.y, self.end.y, t))
    }
}

/// A static segment with thickness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Label used in the log
    pub name: String,
    /// First endpoint
    pub start: Vec2,
    /// Second endpoint
    pub end: Vec2,
    /// Full thickness
    #[serde(default)]
    pub width: f64,
}

impl Wall {
    fn segment(&self) -> Segment {
        Segment::new(self.start, self.end).with_width(self.width)
    }
}

/// Earliest contact found for one body
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// Name of the moving body
    pub body: String,
    /// Name of the body or wall it reaches first
    pub other: String,
    /// Fraction of the step at which they touch
    pub time: f64,
    /// Where the body stops
    pub resting: Vec2,
}

/// Everything a step needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Collision tolerances
    pub collision: CollisionConfig,
    /// Moving circles
    pub bodies: Vec<Body>,
    /// Static segments
    pub walls: Vec<Wall>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            collision: CollisionConfig::default(),
            bodies: vec![
                Body {
                    name: "left".to_owned(),
                    start: Vec2::new(-3.0, 0.0),
                    end: Vec2::new(-1.0, 0.0),
                    radius: 1.0,
                },
                Body {
                    name: "right".to_owned(),
                    start: Vec2::new(3.0, 0.0),
                    end: Vec2::new(1.0, 0.0),
                    radius: 1.0,
                },
                Body {
                    name: "faller".to_owned(),
                    start: Vec2::new(0.0, -5.0),
                    end: Vec2::new(0.0, -15.0),
                    radius: 1.0,
                },
                Body {
                    name: "riser".to_owned(),
                    start: Vec2::new(10.0, -5.0),
                    end: Vec2::new(10.0, 5.0),
                    radius: 1.0,
                },
            ],
            walls: vec![Wall {
                name: "floor".to_owned(),
                start: Vec2::new(9.0, 0.0),
                end: Vec2::new(11.0, 0.0),
                width: 0.0,
            }],
        }
    }
}

impl Config for Scenario {}

/// Problems with a scenario's contents
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ScenarioError {
    /// Negative or non-finite radius
    #[error("Body {name} has invalid radius {radius}")]
    InvalidRadius {
        /// Offending body
        name: String,
        /// Its radius
        radius: f64,
    },

    /// Negative or non-finite wall width
    #[error("Wall {name} has invalid width {width}")]
    InvalidWidth {
        /// Offending wall
        name: String,
        /// Its width
        width: f64,
    },
}

impl Scenario {
    /// Reject radii and widths the collision queries can't use
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if let Some(body) = self.bodies.iter().find(|body| !(body.radius.is_finite() && body.radius >= 0.0)) {
            return Err(ScenarioError::InvalidRadius { name: body.name.clone(), radius: body.radius });
        }
        if let Some(wall) = self.walls.iter().find(|wall| !(wall.width.is_finite() && wall.width >= 0.0)) {
            return Err(ScenarioError::InvalidWidth { name: wall.name.clone(), width: wall.width });
        }
        Ok(())
    }

    /// Earliest contact for every body that hits something this step
    pub fn contacts(&self) -> Vec<Contact> {
        let queries = ContinuousCollision::new(self.collision);
        let walls: Vec<_> = self.walls.iter().map(|wall| (wall, wall.segment())).collect();

        self.bodies
            .iter()
            .enumerate()
            .filter_map(|(index, body)| {
                let (start, end) = (Multivector::from(body.start), Multivector::from(body.end));

                let against_walls = walls.iter().filter_map(|(wall, segment)| {
                    queries
                        .radius_segment(&start, &end, body.radius, segment)
                        .map(|time| (wall.name.as_str(), time))
                });
                let against_bodies = self
                    .bodies
                    .iter()
                    .enumerate()
                    .filter(|(other_index, _)| *other_index != index)
                    .filter_map(|(_, other)| {
                        queries
                            .radius_radius(
                                &start,
                                &end,
                                body.radius,
                                &Multivector::from(other.start),
                                &Multivector::from(other.end),
                                other.radius,
                            )
                            .map(|time| (other.name.as_str(), time))
                    });

                against_walls
                    .chain(against_bodies)
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(other, time)| Contact {
                        body: body.name.clone(),
                        other: other.to_owned(),
                        time,
                        resting: body.position_at(time),
                    })
            })
            .collect()
    }
}
