//! Control-point splines and their arc-length-uniform sample tables.
//!
//! `ControlPath` is the authored shape of a line. Everything downstream
//! (offsets, structures, train placement, escalator steps) consumes a
//! `SampleTable` built from it, never the spline directly.

mod catmull_rom;
mod sample_table;

#[cfg(test)]
mod tests;

pub use catmull_rom::ControlPath;
pub use sample_table::{heading_between, wrap_pi, wrap_tau, Sample, SampleFrame, SampleTable};
