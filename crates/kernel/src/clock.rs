/// Frame counter and elapsed time, advanced by explicit deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    frame: u64,
    elapsed: f64,
    delta: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds and count one frame.
    pub fn advance(&mut self, dt: f64) {
        self.frame += 1;
        self.delta = dt;
        self.elapsed += dt;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Seconds since the level started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Length of the last frame in seconds.
    pub fn delta(&self) -> f64 {
        self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let c = FrameClock::new();
        assert_eq!(c.frame(), 0);
        assert_eq!(c.elapsed(), 0.0);
        assert_eq!(c.delta(), 0.0);
    }

    #[test]
    fn advance_accumulates() {
        let mut c = FrameClock::new();
        c.advance(0.5);
        c.advance(0.25);
        assert_eq!(c.frame(), 2);
        assert_eq!(c.elapsed(), 0.75);
        assert_eq!(c.delta(), 0.25);
    }
}
