//! Forward gravity modelling of rectangular prism stacks
//!
//! Coordinates are metres in a right-handed frame: easting across strike,
//! northing along the profile, upward positive. Depths are negative `upward`.

pub mod prism;

pub use prism::PrismGravity;

use crate::error::InversionError;

/// Forward gravity capability consumed by the inversion engine
///
/// Implementations return the vertical attraction (mGal) along the upward
/// axis of the frame above, one value per observation point. A mass deficit
/// below a point therefore yields a positive value.
pub trait ForwardGravityModel {
    fn gravity(
        &self,
        observations: &[ObservationPoint],
        prisms: &PrismSet,
    ) -> Result<Vec<f64>, InversionError>;
}

impl<M: ForwardGravityModel + ?Sized> ForwardGravityModel for &M {
    fn gravity(
        &self,
        observations: &[ObservationPoint],
        prisms: &PrismSet,
    ) -> Result<Vec<f64>, InversionError> {
        (**self).gravity(observations, prisms)
    }
}

impl<M: ForwardGravityModel + ?Sized> ForwardGravityModel for Box<M> {
    fn gravity(
        &self,
        observations: &[ObservationPoint],
        prisms: &PrismSet,
    ) -> Result<Vec<f64>, InversionError> {
        (**self).gravity(observations, prisms)
    }
}

/// Point where gravity is evaluated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationPoint {
    pub easting: f64,
    pub northing: f64,
    pub upward: f64,
}

impl ObservationPoint {
    /// Points on the profile line at zero elevation and zero cross-line offset
    pub fn along_profile(distance_m: &[f64]) -> Vec<Self> {
        distance_m
            .iter()
            .map(|&d| Self {
                easting: 0.0,
                northing: d,
                upward: 0.0,
            })
            .collect()
    }
}

/// Axis-aligned right rectangular prism
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prism {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Prism {
    /// Build from `[west, east, south, north, bottom, top]`
    pub fn from_bounds(bounds: [f64; 6]) -> Self {
        let [west, east, south, north, bottom, top] = bounds;
        Self {
            west,
            east,
            south,
            north,
            bottom,
            top,
        }
    }

    pub fn bounds(&self) -> [f64; 6] {
        [self.west, self.east, self.south, self.north, self.bottom, self.top]
    }

    /// Vertical extent (m)
    pub fn thickness(&self) -> f64 {
        self.top - self.bottom
    }

    /// Bounds are finite and ordered (zero extent allowed)
    pub fn is_well_formed(&self) -> bool {
        self.bounds().iter().all(|v| v.is_finite())
            && self.west <= self.east
            && self.south <= self.north
            && self.bottom <= self.top
    }
}

/// Prisms paired with their density contrasts (kg/m^3)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrismSet {
    prisms: Vec<Prism>,
    densities: Vec<f64>,
}

impl PrismSet {
    pub fn new(prisms: Vec<Prism>, densities: Vec<f64>) -> Result<Self, InversionError> {
        if prisms.len() != densities.len() {
            return Err(InversionError::InvalidParameter(format!(
                "{} prisms but {} densities",
                prisms.len(),
                densities.len()
            )));
        }
        Ok(Self { prisms, densities })
    }

    /// Crustal-root model below a compensation depth
    ///
    /// One prism per profile interval `[distance[j], distance[j+1]]`, spanning
    /// `±strike_half_width_m` across strike and reaching from
    /// `-depth - max(0, root[j])` up to `-depth`. Negative roots give
    /// zero-thickness prisms that stay in the set.
    pub fn crustal_root(
        distance_m: &[f64],
        root_m: &[f64],
        compensation_depth_m: f64,
        strike_half_width_m: f64,
        density: f64,
    ) -> Self {
        let prisms: Vec<Prism> = distance_m
            .windows(2)
            .zip(root_m.iter())
            .map(|(pair, &root)| Prism {
                west: -strike_half_width_m,
                east: strike_half_width_m,
                south: pair[0],
                north: pair[1],
                bottom: -compensation_depth_m - root.max(0.0),
                top: -compensation_depth_m,
            })
            .collect();
        let densities = vec![density; prisms.len()];

        Self { prisms, densities }
    }

    pub fn prisms(&self) -> &[Prism] {
        &self.prisms
    }

    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Prism, f64)> + '_ {
        self.prisms.iter().zip(self.densities.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.prisms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prisms.is_empty()
    }
}
