//! Bus transport seam.
//!
//! Every register access the vision sensor code performs goes through the
//! [`Transport`] trait, so the platform I2C implementation can be swapped for
//! a recording double in tests.

pub mod i2c;
#[cfg(test)]
pub mod mock;

use serde::Serialize;
use std::fmt;

/// Number of smart ports on the controller (PORT1..PORT12)
pub const PORT_COUNT: u8 = 12;

/// One physical bus port, stored zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PortHandle(u8);

impl PortHandle {
    /// Create a handle from a zero-based index, `None` if it is past the last port
    pub fn new(index: u8) -> Option<Self> {
        (index < PORT_COUNT).then_some(Self(index))
    }

    /// Create a handle from the 1-based number printed on the controller
    pub fn from_number(number: u8) -> Option<Self> {
        number.checked_sub(1).and_then(Self::new)
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn number(&self) -> u8 {
        self.0 + 1
    }

    /// All ports, first to last, in discovery scan order
    pub fn all() -> impl Iterator<Item = PortHandle> {
        (0..PORT_COUNT).map(PortHandle)
    }
}

impl fmt::Display for PortHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PORT{}", self.number())
    }
}

/// Blocking register-level access to devices on the smart ports
pub trait Transport {
    /// Error type for bus operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Write `data` starting at `register`
    fn write(&mut self, port: PortHandle, register: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Fill `buf` with bytes read starting at `register`
    fn read(&mut self, port: PortHandle, register: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Device type identifier reported for the device on `port`
    fn query_device_type(&mut self, port: PortHandle) -> Result<u8, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn write(&mut self, port: PortHandle, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(port, register, data)
    }

    fn read(&mut self, port: PortHandle, register: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(port, register, buf)
    }

    fn query_device_type(&mut self, port: PortHandle) -> Result<u8, Self::Error> {
        (**self).query_device_type(port)
    }
}
