//! Fixed-step integration of a single body.
//!
//! `Body::tick` runs translation then rotation; `Body::future_shape` runs
//! either step on a throwaway copy. Splitting the steps out keeps both paths
//! on exactly the same math.

use crate::simulation::body::Body;
use crate::simulation::vector::VEC_ZERO;

/// Consume the accumulated force and impulse, update velocity, and move the
/// body by the trapezoidal (average) velocity over `dt`.
///
/// Zero- and infinite-mass bodies keep their velocity: force and impulse are
/// still cleared but have no kinematic effect.
pub(crate) fn integrate_translation(body: &mut Body, dt: f64) {
    let v_old = body.velocity;
    let mut v_new = v_old;
    if body.mass != 0.0 && body.mass.is_finite() {
        v_new += body.net_force * (dt / body.mass); // v += dt * F / m
        v_new += body.net_impulse / body.mass; // v += J / m
    }
    body.net_force = VEC_ZERO;
    body.net_impulse = VEC_ZERO;

    // x_n+1 = x_n + dt/2 * (v_n + v_n+1)
    body.translate((v_old + v_new) * (dt / 2.0));
    body.velocity = v_new;
}

/// Spin the body by `dt * angular_velocity` about its centroid
pub(crate) fn integrate_rotation(body: &mut Body, dt: f64) {
    body.rotate(dt * body.angular_velocity);
}
