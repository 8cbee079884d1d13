//! Simulation utilities and trace loading.
//!
//! Provides utilities for reading recorded access streams from disk so they can be
//! replayed through the detector.

pub mod trace;
