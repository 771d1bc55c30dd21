//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `hardware`     | SensorPort         | DHT22, LDR ADC, PIR GPIO |
//! |                | ActuatorPort       | Fan PWM, buzzer, LED     |
//! | `log_sink`     | EventSink          | Serial log output        |
//! | `display_sink` | EventSink          | Any `DisplayPort` (LCD)  |

pub mod display_sink;
pub mod hardware;
pub mod log_sink;
