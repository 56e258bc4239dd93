#[cfg(target_os = "linux")]
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
#[cfg(target_os = "linux")]
use i2cdev::core::{I2CDevice, I2CMessage, I2CTransfer};
#[cfg(target_os = "linux")]
use i2cdev::linux::LinuxI2CMessage;
#[cfg(target_os = "linux")]
use std::collections::HashMap;
#[cfg(target_os = "linux")]
use tracing::debug;

use super::{PortHandle, Transport};
use crate::config::PortConfig;
use thiserror::Error;

/// I2C bus error type
#[derive(Error, Debug)]
pub enum I2CError {
    #[cfg(target_os = "linux")]
    #[error("I2C device error: {0}")]
    Device(#[from] LinuxI2CError),

    #[error("Port number {0} is outside 1..=12")]
    InvalidPort(u8),

    #[error("{0} has no I2C device configured")]
    PortNotConfigured(PortHandle),

    #[error("{port} device path '{path}' could not be opened: {reason}")]
    Open { port: PortHandle, path: String, reason: String },

    #[error("I2C not supported on this platform: {0}")]
    Unsupported(String),
}

/// Map a configured 1-based port number to its handle
fn port_for(number: u8) -> Result<PortHandle, I2CError> {
    PortHandle::from_number(number).ok_or(I2CError::InvalidPort(number))
}

#[cfg(target_os = "linux")]
struct PortDevice {
    device: LinuxI2CDevice,
    device_type_register: u8,
}

/// Smart ports backed by Linux I2C device nodes
#[cfg(target_os = "linux")]
pub struct I2CBus {
    ports: HashMap<PortHandle, PortDevice>,
}

#[cfg(not(target_os = "linux"))]
pub struct I2CBus {
    _phantom: std::marker::PhantomData<()>,
}

#[cfg(target_os = "linux")]
impl I2CBus {
    /// Open one device per configured port
    pub fn from_config(config: &PortConfig) -> Result<Self, I2CError> {
        let mut ports = HashMap::new();
        for entry in config.ports.iter() {
            let port = port_for(entry.port)?;
            let device = LinuxI2CDevice::new(&entry.path, entry.address)
                .map_err(|e| I2CError::Open {
                    port,
                    path: entry.path.clone(),
                    reason: e.to_string(),
                })?;
            debug!("[I2CBus] {} -> {} @ {:#04x}", port, entry.path, entry.address);
            ports.insert(port, PortDevice {
                device,
                device_type_register: entry.device_type_register,
            });
        }
        Ok(Self { ports })
    }

    fn port_mut(&mut self, port: PortHandle) -> Result<&mut PortDevice, I2CError> {
        self.ports.get_mut(&port).ok_or(I2CError::PortNotConfigured(port))
    }
}

#[cfg(target_os = "linux")]
impl Transport for I2CBus {
    type Error = I2CError;

    fn write(&mut self, port: PortHandle, register: u8, data: &[u8]) -> Result<(), I2CError> {
        let dev = self.port_mut(port)?;
        // Register address goes out first, payload auto-increments from there
        let mut frame = Vec::with_capacity(data.len() + 1);
        frame.push(register);
        frame.extend_from_slice(data);
        dev.device.write(&frame)?;
        Ok(())
    }

    fn read(&mut self, port: PortHandle, register: u8, buf: &mut [u8]) -> Result<(), I2CError> {
        let dev = self.port_mut(port)?;
        match buf.len() {
            0 => {}
            1 => buf[0] = dev.device.smbus_read_byte_data(register)?,
            _ => {
                // Payloads can exceed the 32 byte SMBus block limit, use a plain
                // I2C write/read joined by a repeated start
                let select = [register];
                let mut msgs = [LinuxI2CMessage::write(&select), LinuxI2CMessage::read(buf)];
                dev.device.transfer(&mut msgs)?;
            }
        }
        Ok(())
    }

    fn query_device_type(&mut self, port: PortHandle) -> Result<u8, I2CError> {
        let dev = self.port_mut(port)?;
        let register = dev.device_type_register;
        Ok(dev.device.smbus_read_byte_data(register)?)
    }
}

#[cfg(not(target_os = "linux"))]
impl I2CBus {
    pub fn from_config(config: &PortConfig) -> Result<Self, I2CError> {
        for entry in config.ports.iter() {
            port_for(entry.port)?;
        }
        Err(I2CError::Unsupported("I2C is only supported on Linux".to_string()))
    }
}

#[cfg(not(target_os = "linux"))]
impl Transport for I2CBus {
    type Error = I2CError;

    fn write(&mut self, _port: PortHandle, _register: u8, _data: &[u8]) -> Result<(), I2CError> {
        Err(I2CError::Unsupported("I2C is only supported on Linux".to_string()))
    }

    fn read(&mut self, _port: PortHandle, _register: u8, _buf: &mut [u8]) -> Result<(), I2CError> {
        Err(I2CError::Unsupported("I2C is only supported on Linux".to_string()))
    }

    fn query_device_type(&mut self, port: PortHandle) -> Result<u8, I2CError> {
        Err(I2CError::PortNotConfigured(port))
    }
}
