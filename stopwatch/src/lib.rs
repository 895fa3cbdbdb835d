//! A command-line stopwatch.
//!
//! The library half of the crate holds the pieces with real invariants:
//! * [`stopwatch::Stopwatch`] accumulates running time across start/stop
//!   cycles, measured with a monotonic [`clock::Clock`] so wall-clock
//!   adjustments cannot disturb it;
//! * [`scheduler::run_refresh_loop`] renders the running total at a fixed
//!   cadence until a [`termination::ShutdownEvent`] triggers, then renders
//!   one final value;
//! * [`rendering::Renderer`] is the capability the loop renders through,
//!   with implementations for interactive terminals and for pipes.
//!
//! The binary in `src/bin/stopwatch` wires these together with argument
//! parsing, logging, and exit codes.

pub mod clock;
pub mod rendering;
pub mod scheduler;
pub mod stopwatch;
pub mod termination;
