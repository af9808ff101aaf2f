//! Sensor Class Registry
//!
//! Every measurement sensor belongs to the `msensor` class. The class is an
//! explicit object: it is created, sensors are registered and unregistered
//! against it, and it is torn down, which unregisters whatever is left.
//! There is no process-wide class instance.
//!
//! A sensor takes its name from its parent (the port it is attached to) and
//! gets a device node under the class directory:
//!
//! ```text
//! parent "in1"  ──register──▶  name "in1", devnode "msensor/in1"
//! ```
//!
//! ```rust
//! use msensor_core::class::SensorClass;
//!
//! let mut class = SensorClass::new();
//! let id = class.register("in1")?;
//!
//! assert_eq!(class.devnode(id)?.as_str(), "msensor/in1");
//! class.unregister(id)?;
//! assert!(class.is_empty());
//! # Ok::<(), msensor_core::SensorError>(())
//! ```

use core::fmt::Write;

use heapless::{String, Vec};

use crate::{
    constants::{DEVICE_NAME_SIZE, MAX_REGISTERED_SENSORS},
    errors::{SensorError, SensorResult},
};

/// Class name, also the devnode directory
pub const CLASS_NAME: &str = "msensor";

/// Device node path capacity: class name, separator, device name
pub const DEVNODE_SIZE: usize = CLASS_NAME.len() + 1 + DEVICE_NAME_SIZE;

/// Handle to a registered sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(u32);

impl DeviceId {
    /// Numeric id, unique for the lifetime of the class
    pub fn get(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: DeviceId,
    name: String<DEVICE_NAME_SIZE>,
}

/// Registry of measurement sensors
#[derive(Debug, Default)]
pub struct SensorClass {
    entries: Vec<Entry, MAX_REGISTERED_SENSORS>,
    next_id: u32,
}

impl SensorClass {
    /// Create an empty class
    pub fn new() -> Self {
        log_debug!("{} class created", CLASS_NAME);
        Self::default()
    }

    /// Register a sensor attached to `parent`; the sensor is named after it.
    pub fn register(&mut self, parent: &str) -> SensorResult<DeviceId> {
        if parent.is_empty() {
            log_warn!("unable to register {} device: no parent", CLASS_NAME);
            return Err(SensorError::InvalidArgument { reason: "missing parent" });
        }
        let name: String<DEVICE_NAME_SIZE> = String::try_from(parent)
            .map_err(|_| SensorError::InvalidArgument { reason: "parent name too long" })?;
        if self.entries.iter().any(|e| e.name == name) {
            log_warn!("unable to register {} device '{}': exists", CLASS_NAME, parent);
            return Err(SensorError::AlreadyRegistered);
        }

        let id = DeviceId(self.next_id);
        self.entries
            .push(Entry { id, name })
            .map_err(|_| SensorError::RegistryFull)?;
        self.next_id = self.next_id.wrapping_add(1);

        log_info!("registered {} device '{}' as {}", CLASS_NAME, parent, id.0);
        Ok(id)
    }

    /// Remove a sensor from the class
    pub fn unregister(&mut self, id: DeviceId) -> SensorResult<()> {
        let pos = self.position(id)?;
        let entry = self.entries.swap_remove(pos);
        log_info!("unregistered {} device '{}'", CLASS_NAME, entry.name);
        Ok(())
    }

    /// Device name
    pub fn name(&self, id: DeviceId) -> SensorResult<&str> {
        let pos = self.position(id)?;
        Ok(&self.entries[pos].name)
    }

    /// Device node path, `msensor/<name>`
    pub fn devnode(&self, id: DeviceId) -> SensorResult<String<DEVNODE_SIZE>> {
        let mut node: String<DEVNODE_SIZE> = String::new();
        write!(node, "{}/{}", CLASS_NAME, self.name(id)?)
            .map_err(|_| SensorError::InvalidArgument { reason: "devnode too long" })?;
        Ok(node)
    }

    /// Number of registered sensors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No sensors registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered sensors as `(id, name)`
    pub fn iter(&self) -> impl Iterator<Item = (DeviceId, &str)> + '_ {
        self.entries.iter().map(|e| (e.id, e.name.as_str()))
    }

    /// Unregister every sensor and drop the class
    pub fn teardown(mut self) {
        while let Some(entry) = self.entries.pop() {
            log_info!("unregistered {} device '{}'", CLASS_NAME, entry.name);
        }
        log_debug!("{} class removed", CLASS_NAME);
    }

    fn position(&self, id: DeviceId) -> SensorResult<usize> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(SensorError::NotRegistered)
    }
}
