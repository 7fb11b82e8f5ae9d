// Simulated hardware interface
//
// The harness only ever touches four signals of a simulated display
// controller: the clock input, the evaluation step, and the red/green/blue
// outputs.

mod pattern;

pub use pattern::PatternGenerator;

use crate::raster::Rgb;

/// Clock-level view of a simulated display-generating component
///
/// An implementation owns the whole internal state of the model. Outputs
/// reflect the state as of the most recent [`Simulation::eval`].
pub trait Simulation {
    /// Drive the single-bit clock input
    fn set_clk(&mut self, level: bool);

    /// Re-evaluate the model against its current inputs
    fn eval(&mut self);

    /// Red output
    fn red(&self) -> u8;

    /// Green output
    fn green(&self) -> u8;

    /// Blue output
    fn blue(&self) -> u8;

    /// All three color outputs, sampled in red, green, blue order
    fn rgb(&self) -> Rgb {
        let r = self.red();
        let g = self.green();
        let b = self.blue();
        Rgb::new(r, g, b)
    }
}

impl<S: Simulation + ?Sized> Simulation for &mut S {
    fn set_clk(&mut self, level: bool) {
        (**self).set_clk(level)
    }

    fn eval(&mut self) {
        (**self).eval()
    }

    fn red(&self) -> u8 {
        (**self).red()
    }

    fn green(&self) -> u8 {
        (**self).green()
    }

    fn blue(&self) -> u8 {
        (**self).blue()
    }
}

impl<S: Simulation + ?Sized> Simulation for Box<S> {
    fn set_clk(&mut self, level: bool) {
        (**self).set_clk(level)
    }

    fn eval(&mut self) {
        (**self).eval()
    }

    fn red(&self) -> u8 {
        (**self).red()
    }

    fn green(&self) -> u8 {
        (**self).green()
    }

    fn blue(&self) -> u8 {
        (**self).blue()
    }
}

/// Advance the model by exactly one clock cycle
///
/// Clock high then evaluate, clock low then evaluate. Evaluating without the
/// high/low transition is not an edge and does not advance the model.
#[inline]
pub fn clock_cycle<S: Simulation + ?Sized>(sim: &mut S) {
    sim.set_clk(true);
    sim.eval();

    sim.set_clk(false);
    sim.eval();
}
