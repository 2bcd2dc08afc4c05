//! Closed-form lane geometry for the test network: straight lines and flat
//! circular arcs.

use bevy::math::DVec3;
use std::f64::consts::FRAC_PI_2;

use road_api::{GeoPosition, IsoLaneVelocity, LanePosition, Rotation};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LaneGeometry {
    /// Straight lane whose frame is `rotation` everywhere, starting at `origin`.
    Line {
        origin: DVec3,
        rotation: Rotation,
        length: f64,
    },
    /// Flat arc around `center`, starting at polar angle `theta0` and sweeping
    /// `d_theta` radians. Positive `d_theta` turns left.
    Arc {
        center: DVec3,
        radius: f64,
        theta0: f64,
        d_theta: f64,
    },
}

impl LaneGeometry {
    pub fn length(&self) -> f64 {
        match *self {
            LaneGeometry::Line { length, .. } => length,
            LaneGeometry::Arc {
                radius, d_theta, ..
            } => radius * d_theta.abs(),
        }
    }

    pub fn to_geo(&self, pos: &LanePosition) -> GeoPosition {
        match *self {
            LaneGeometry::Line {
                origin, rotation, ..
            } => (origin + rotation.to_quat() * DVec3::new(pos.s, pos.r, pos.h)).into(),
            LaneGeometry::Arc {
                center,
                radius,
                theta0,
                d_theta,
            } => {
                let turn = d_theta.signum();
                let theta = theta0 + turn * pos.s / radius;
                let rho = radius - turn * pos.r;
                (center + DVec3::new(rho * theta.cos(), rho * theta.sin(), pos.h)).into()
            }
        }
    }

    pub fn orientation(&self, pos: &LanePosition) -> Rotation {
        match *self {
            LaneGeometry::Line { rotation, .. } => rotation,
            LaneGeometry::Arc {
                radius,
                theta0,
                d_theta,
                ..
            } => {
                let turn = d_theta.signum();
                let theta = theta0 + turn * pos.s / radius;
                Rotation::new(0.0, 0.0, theta + turn * FRAC_PI_2)
            }
        }
    }

    pub fn motion_derivatives(
        &self,
        pos: &LanePosition,
        velocity: &IsoLaneVelocity,
    ) -> LanePosition {
        let s_dot = match *self {
            LaneGeometry::Line { .. } => velocity.sigma_v,
            LaneGeometry::Arc {
                radius, d_theta, ..
            } => velocity.sigma_v * radius / (radius - d_theta.signum() * pos.r),
        };
        LanePosition::new(s_dot, velocity.rho_v, velocity.eta_v)
    }
}
