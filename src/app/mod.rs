//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the RoomSense node:
//! occupancy FSM orchestration, the light and fan rules, and the paced
//! sampling loop that drives them.  All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod sampler;
pub mod service;
