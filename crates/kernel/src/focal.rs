use glam::{DMat4, DQuat, DVec3};
use lagoon_common::Transform;
use lagoon_noise::NoiseSynthesizer;

/// The animated centrepiece of the level and the contact shadow's anchor.
///
/// Spins about Y at a fixed rate and hovers around `hover_height`, with the
/// hover offset sampled from a time-domain noise synthesizer.
#[derive(Debug, Clone)]
pub struct FocalObject {
    transform: Transform,
    yaw: f64,
    spin_rate: f64,
    hover_height: f64,
    hover: NoiseSynthesizer,
}

impl FocalObject {
    pub fn new(position: DVec3, spin_rate: f64, hover: NoiseSynthesizer) -> Self {
        Self {
            transform: Transform::from_position(position),
            yaw: 0.0,
            spin_rate,
            hover_height: position.y,
            hover,
        }
    }

    /// Advance the animation to `elapsed`, `dt` seconds after the last update.
    pub fn update(&mut self, elapsed: f64, dt: f64) {
        self.yaw += self.spin_rate * dt;
        self.transform.rotation = DQuat::from_rotation_y(self.yaw);
        self.transform.position.y = self.hover_height + self.hover.evaluate(elapsed);
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Object-to-world matrix for the host's draw call.
    pub fn world_matrix(&self) -> DMat4 {
        self.transform.matrix()
    }

    pub fn position(&self) -> DVec3 {
        self.transform.position
    }

    /// Accumulated rotation about Y in radians.
    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn hover_height(&self) -> f64 {
        self.hover_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lagoon_noise::Octave;
    use std::f64::consts::PI;

    #[test]
    fn spins_a_quarter_turn_per_second() {
        let mut f = FocalObject::new(DVec3::ZERO, PI * 0.5, NoiseSynthesizer::silent());
        for i in 1..=4 {
            f.update(i as f64 * 0.25, 0.25);
        }
        assert!((f.yaw() - PI * 0.5).abs() < 1e-12);
        let facing = f.transform().rotation * DVec3::X;
        assert!((facing - DVec3::new(0.0, 0.0, -1.0)).length() < 1e-9);
    }

    #[test]
    fn hovers_around_rest_height() {
        let hover = NoiseSynthesizer::from_octaves(vec![Octave {
            frequency: 1.0,
            amplitude: 0.2,
        }])
        .unwrap();
        let mut f = FocalObject::new(DVec3::new(1.0, 2.0, 3.0), 0.0, hover);
        f.update(PI * 0.5, 0.1);
        assert!((f.position().y - 2.2).abs() < 1e-12);
        assert_eq!((f.position().x, f.position().z), (1.0, 3.0));
        f.update(0.0, 0.1);
        assert_eq!(f.position().y, 2.0);
    }

    #[test]
    fn world_matrix_places_and_turns_the_object() {
        let mut f = FocalObject::new(DVec3::new(1.0, 2.0, 3.0), PI, NoiseSynthesizer::silent());
        f.update(0.5, 0.5);
        let m = f.world_matrix();
        let origin = m.transform_point3(DVec3::ZERO);
        assert!((origin - DVec3::new(1.0, 2.0, 3.0)).length() < 1e-12);
        let facing = m.transform_vector3(DVec3::X);
        assert!((facing - DVec3::new(0.0, 0.0, -1.0)).length() < 1e-9);
    }
}
