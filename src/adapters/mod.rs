//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                 |
//! |----------------|--------------------|-----------------------------|
//! | `hardware`     | SensorPort         | sysfs thermal zone          |
//! |                | ActuatorPort       | PWM channel (embedded-hal)  |
//! | `log_sink`     | EventSink          | `log` facade                |
//! | `time`         | TimePort           | OS wall clock               |

pub mod hardware;
pub mod log_sink;
pub mod time;
