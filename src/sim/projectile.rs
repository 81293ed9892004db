//! The thrown water container
//!
//! Launched on a ballistic arc aimed (with a small offset) at the boss.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::settings::ThrowSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec3,
    pub vel: Vec3,
    gravity: Vec3,
    age: f32,
    max_age: f32,
}

impl Projectile {
    /// Launch from `from` toward `target`.
    ///
    /// `thrower` is where the throw is aimed from (the player root). Returns
    /// `None` for a zero-length aim.
    pub fn launch(from: Vec3, thrower: Vec3, target: Vec3, settings: &ThrowSettings) -> Option<Self> {
        let direction = target - thrower + settings.aim_offset;
        let distance = direction.length();
        if !(distance > 0.0 && distance.is_finite()) {
            return None;
        }
        let time_to_target = distance / settings.speed_divisor;
        let vel = direction / time_to_target - settings.gravity * time_to_target / 2.0;
        log::debug!("Container thrown: v0 = {vel}, flight time {time_to_target:.2}s");
        Some(Self {
            pos: from,
            vel,
            gravity: settings.gravity,
            age: 0.0,
            max_age: settings.max_flight_time,
        })
    }

    /// Integrate one step (semi-implicit Euler)
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.vel += self.gravity * dt;
        self.pos += self.vel * dt;
        self.age += dt;
    }

    /// Sphere overlap test against a collider centered at `center`
    pub fn hits(&self, center: Vec3, radius: f32) -> bool {
        self.pos.distance_squared(center) <= radius * radius
    }

    /// Flown for longer than it is allowed to
    pub fn expired(&self) -> bool {
        self.age >= self.max_age
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_throw_reaches_boss() {
        let settings = ThrowSettings::default();
        let thrower = Vec3::ZERO;
        let boss = Vec3::new(0.0, 0.0, 10.0);
        let mut p = Projectile::launch(thrower, thrower, boss, &settings).expect("valid aim");

        let mut hit = false;
        while !p.expired() {
            p.step(SIM_DT);
            if p.hits(boss, 2.0) {
                hit = true;
                break;
            }
        }
        assert!(hit, "container never reached the boss, last pos {}", p.pos);
    }

    #[test]
    fn test_arc_goes_up_first() {
        let settings = ThrowSettings::default();
        let mut p = Projectile::launch(Vec3::ZERO, Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0), &settings)
            .expect("valid aim");
        assert!(p.vel.y > 0.0);
        p.step(SIM_DT);
        assert!(p.pos.y > 0.0);
    }

    #[test]
    fn test_zero_aim_rejected() {
        let settings = ThrowSettings {
            aim_offset: Vec3::ZERO,
            ..Default::default()
        };
        assert!(Projectile::launch(Vec3::ZERO, Vec3::ONE, Vec3::ONE, &settings).is_none());
    }

    #[test]
    fn test_expires() {
        let settings = ThrowSettings::default();
        let mut p = Projectile::launch(Vec3::ZERO, Vec3::ZERO, Vec3::Z * 5.0, &settings).expect("valid aim");
        p.step(settings.max_flight_time + 0.1);
        assert!(p.expired());
    }
}
