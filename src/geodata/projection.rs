// Planar equal-area projection used for centroid computation.
//
// Lambert cylindrical equal-area on the authalic sphere. Closed-form in both
// directions, which keeps the centroid round trip exact up to float error.
// Coordinates use the `geo` convention: x = longitude, y = latitude (degrees)
// on the geographic side, metres on the planar side.

use geo::Coord;
use serde::Deserialize;

use crate::error::ProjectionError;

/// Radius of the sphere with the same surface area as the GRS80 ellipsoid, in metres.
pub const AUTHALIC_RADIUS_M: f64 = 6_371_007.181;

/// A reversible map between geographic degrees and a planar system.
pub trait Projection {
    fn forward(&self, geographic: Coord<f64>) -> Result<Coord<f64>, ProjectionError>;
    fn inverse(&self, planar: Coord<f64>) -> Result<Coord<f64>, ProjectionError>;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Central meridian in degrees. Defaults to -54, the central meridian of
    /// the Brazil Polyconic system.
    pub central_meridian: f64,
    /// Latitude of true scale in degrees.
    pub standard_parallel: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            central_meridian: -54.0,
            standard_parallel: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalEqualArea {
    lon0: f64,
    /// cos(standard parallel)
    k: f64,
}

impl CylindricalEqualArea {
    pub fn new(cfg: &ProjectionConfig) -> Result<Self, ProjectionError> {
        if !cfg.central_meridian.is_finite() || cfg.central_meridian.abs() > 180.0 {
            return Err(ProjectionError::InvalidParameter {
                name: "central_meridian",
                value: cfg.central_meridian,
            });
        }
        if !cfg.standard_parallel.is_finite() || cfg.standard_parallel.abs() >= 90.0 {
            return Err(ProjectionError::InvalidParameter {
                name: "standard_parallel",
                value: cfg.standard_parallel,
            });
        }
        Ok(Self {
            lon0: cfg.central_meridian.to_radians(),
            k: cfg.standard_parallel.to_radians().cos(),
        })
    }
}

impl Projection for CylindricalEqualArea {
    fn forward(&self, geographic: Coord<f64>) -> Result<Coord<f64>, ProjectionError> {
        let Coord { x: lon, y: lat } = geographic;
        if !lon.is_finite() || !lat.is_finite() || lat.abs() > 90.0 {
            return Err(ProjectionError::OutOfDomain { x: lon, y: lat });
        }
        let lambda = lon.to_radians() - self.lon0;
        let phi = lat.to_radians();
        Ok(Coord {
            x: AUTHALIC_RADIUS_M * lambda * self.k,
            y: AUTHALIC_RADIUS_M * phi.sin() / self.k,
        })
    }

    fn inverse(&self, planar: Coord<f64>) -> Result<Coord<f64>, ProjectionError> {
        let Coord { x, y } = planar;
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjectionError::OutOfDomain { x, y });
        }
        let s = y * self.k / AUTHALIC_RADIUS_M;
        // Allow float noise right at the poles.
        if s.abs() > 1.0 + 1e-12 {
            return Err(ProjectionError::OutOfDomain { x, y });
        }
        let phi = s.clamp(-1.0, 1.0).asin();
        let lambda = x / (AUTHALIC_RADIUS_M * self.k) + self.lon0;
        Ok(Coord {
            x: lambda.to_degrees(),
            y: phi.to_degrees(),
        })
    }
}
