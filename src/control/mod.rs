//! Closed-form control laws.

pub mod fan_curve;
