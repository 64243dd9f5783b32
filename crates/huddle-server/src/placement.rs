//! Initial coordinates for new participants.

use huddle_core::Position;
use rand::Rng;

use crate::config::Surface;

/// Picks where a newly registered participant starts.
pub trait PositionSource: Send + Sync {
    /// Choose a position inside `surface`.
    fn place(&self, surface: &Surface) -> Position;
}

/// Uniformly random placement over `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlacement;

impl PositionSource for RandomPlacement {
    fn place(&self, surface: &Surface) -> Position {
        let mut rng = rand::thread_rng();
        Position::new(
            rng.gen::<f64>() * surface.width,
            rng.gen::<f64>() * surface.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_placement_stays_on_surface() {
        let surface = Surface {
            width: 3.0,
            height: 0.25,
        };
        for _ in 0..1000 {
            let p = RandomPlacement.place(&surface);
            assert!((0.0..3.0).contains(&p.x), "x out of range: {}", p.x);
            assert!((0.0..0.25).contains(&p.y), "y out of range: {}", p.y);
        }
    }
}
