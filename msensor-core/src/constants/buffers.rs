//! Buffer Sizes and Fixed Capacities
//!
//! Everything here is sized at compile time so the decode path never
//! allocates.

// ===== RAW DATA =====

/// Size of the raw data buffer shared by all modes of a sensor (bytes).
///
/// UART sensors send at most 32 bytes of payload per message, which bounds
/// every mode layout (`data_sets * format width`).
///
/// Source: LEGO UART sensor protocol message size
pub const RAW_DATA_SIZE: usize = 32;

/// Maximum number of values per sample exposed to consumers.
///
/// It is possible to have 32 8-bit values from UART sensors, but known
/// sensors report 8 or fewer.
pub const MAX_VALUES: usize = 8;

// ===== MODE TABLE =====

/// Maximum mode name length (bytes).
///
/// Source: UART sensor INFO_NAME message payload
pub const MODE_NAME_SIZE: usize = 11;

/// Maximum SI unit label length (bytes).
///
/// Source: UART sensor INFO_UNITS message payload
pub const UNITS_SIZE: usize = 4;

/// Maximum number of modes per sensor.
pub const MAX_MODES: usize = 8;

// ===== CLASS REGISTRY =====

/// Maximum device name length (bytes), taken from the parent port name.
pub const DEVICE_NAME_SIZE: usize = 32;

/// Number of sensors a class registry can hold.
///
/// One per input port on the EV3 brick, doubled for daisy-chained or
/// multiplexed ports.
pub const MAX_REGISTERED_SENSORS: usize = 8;
