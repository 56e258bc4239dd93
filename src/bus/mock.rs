//! Recording transport double for unit tests.

use super::{PortHandle, Transport};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("mock bus fault: {0}")]
pub struct MockError(pub String);

/// One recorded bus call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusCall {
    Write { port: PortHandle, register: u8, data: Vec<u8> },
    Read { port: PortHandle, register: u8, len: usize },
    QueryDeviceType { port: PortHandle },
}

/// Serves canned register contents and records every call
#[derive(Debug, Default)]
pub struct MockTransport {
    pub calls: Vec<BusCall>,
    registers: HashMap<u8, Vec<u8>>,
    device_types: HashMap<PortHandle, u8>,
    fail_on: Option<u8>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes returned by reads starting at `register` (zero padded)
    pub fn with_register(mut self, register: u8, data: &[u8]) -> Self {
        self.registers.insert(register, data.to_vec());
        self
    }

    pub fn with_device(mut self, port: PortHandle, device_type: u8) -> Self {
        self.device_types.insert(port, device_type);
        self
    }

    /// Make any access to `register` fail
    pub fn failing_on(mut self, register: u8) -> Self {
        self.fail_on = Some(register);
        self
    }

    pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BusCall::Write { register, data, .. } => Some((*register, data.clone())),
                _ => None,
            })
            .collect()
    }

    fn check(&self, register: u8) -> Result<(), MockError> {
        if self.fail_on == Some(register) {
            return Err(MockError(format!("NACK at {:#04x}", register)));
        }
        Ok(())
    }
}

impl Transport for MockTransport {
    type Error = MockError;

    fn write(&mut self, port: PortHandle, register: u8, data: &[u8]) -> Result<(), MockError> {
        self.calls.push(BusCall::Write { port, register, data: data.to_vec() });
        self.check(register)
    }

    fn read(&mut self, port: PortHandle, register: u8, buf: &mut [u8]) -> Result<(), MockError> {
        self.calls.push(BusCall::Read { port, register, len: buf.len() });
        self.check(register)?;
        buf.fill(0);
        if let Some(data) = self.registers.get(&register) {
            let n = data.len().min(buf.len());
            buf[..n].copy_from_slice(&data[..n]);
        }
        Ok(())
    }

    fn query_device_type(&mut self, port: PortHandle) -> Result<u8, MockError> {
        self.calls.push(BusCall::QueryDeviceType { port });
        self.device_types
            .get(&port)
            .copied()
            .ok_or_else(|| MockError(format!("nothing on {}", port)))
    }
}
