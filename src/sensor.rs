//! Vision sensor session: each operation is one or two register transactions.

use crate::bus::{PortHandle, Transport};
use crate::codec::{
    self, BRIGHTNESS_REG, LED_BRIGHTNESS_REG, LED_MODE_REG, MAX_BRIGHTNESS, OBJECT_DATA_REG,
    OBJECT_ID_REG, OBJECT_RECORD_LEN, SIGNATURE_DATA_REG, SIGNATURE_PAYLOAD_LEN, SIGNATURE_REG,
    WHITE_BALANCE_MODE_REG, WHITE_BALANCE_RED_REG,
};
use crate::errors::{VisionError, VisionResult};
use crate::messages::{
    ClassifierSignature, LedMode, ObjectList, RgbColor, WhiteBalanceMode, MAX_OBJECTS,
};
use crate::registry;
use tracing::{debug, trace};

/// Vision sensor access over an injected transport.
///
/// Holds no state besides the transport; the caller serializes access per port.
pub struct VisionSensor<T: Transport> {
    transport: T,
}

impl<T: Transport> VisionSensor<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// First port reporting a vision sensor, see [`registry::find_first_sensor`]
    pub fn find_first_sensor(&mut self) -> Option<PortHandle> {
        registry::find_first_sensor(&mut self.transport)
    }

    /// Query objects matching a signature (1-7) or color code.
    ///
    /// `max_count` is capped at four; an empty list means nothing is in view.
    pub fn get_objects(
        &mut self,
        port: PortHandle,
        signature_id: i16,
        max_count: usize,
    ) -> VisionResult<ObjectList> {
        let request = codec::pack_object_request(signature_id).ok_or_else(|| {
            debug!("[vision] {} rejected object id {}", port, signature_id);
            VisionError::InvalidObjectId(signature_id)
        })?;

        if max_count > MAX_OBJECTS {
            debug!("[vision] {} object count {} capped at {}", port, max_count, MAX_OBJECTS);
        }
        let count = max_count.min(MAX_OBJECTS);
        if count == 0 {
            return Ok(ObjectList::new());
        }

        self.write(port, OBJECT_ID_REG, &request)?;

        let mut buf = [0u8; MAX_OBJECTS * OBJECT_RECORD_LEN];
        let data = &mut buf[..count * OBJECT_RECORD_LEN];
        self.read(port, OBJECT_DATA_REG, data)?;

        let objects = codec::decode_object_list(data, count, signature_id);
        trace!("[vision] {} signature {}: {} object(s)", port, signature_id, objects.len());
        Ok(objects)
    }

    /// Store a signature in its slot
    pub fn set_signature(
        &mut self,
        port: PortHandle,
        sig: &ClassifierSignature,
    ) -> VisionResult<()> {
        Self::check_signature_id(port, sig.id)?;
        self.write(port, SIGNATURE_REG, &codec::encode_signature(sig))
    }

    /// Select a slot and read its signature back
    pub fn get_signature(&mut self, port: PortHandle, id: u8) -> VisionResult<ClassifierSignature> {
        Self::check_signature_id(port, id)?;
        self.write(port, SIGNATURE_REG, &[id])?;

        let mut payload = [0u8; SIGNATURE_PAYLOAD_LEN];
        self.read(port, SIGNATURE_DATA_REG, &mut payload)?;
        Ok(codec::decode_signature_payload(id, &payload))
    }

    pub fn get_brightness(&mut self, port: PortHandle) -> VisionResult<u8> {
        self.read_byte(port, BRIGHTNESS_REG)
    }

    /// Set exposure brightness, values above 100 are clamped
    pub fn set_brightness(&mut self, port: PortHandle, brightness: u8) -> VisionResult<()> {
        if brightness > MAX_BRIGHTNESS {
            debug!("[vision] {} brightness {} clamped to {}", port, brightness, MAX_BRIGHTNESS);
        }
        self.write(port, BRIGHTNESS_REG, &[brightness.min(MAX_BRIGHTNESS)])
    }

    pub fn get_white_balance_mode(&mut self, port: PortHandle) -> VisionResult<WhiteBalanceMode> {
        let value = self.read_byte(port, WHITE_BALANCE_MODE_REG)?;
        WhiteBalanceMode::try_from(value).map_err(|value| VisionError::InvalidResponse {
            register: WHITE_BALANCE_MODE_REG,
            value,
        })
    }

    pub fn set_white_balance_mode(
        &mut self,
        port: PortHandle,
        mode: WhiteBalanceMode,
    ) -> VisionResult<()> {
        self.write(port, WHITE_BALANCE_MODE_REG, &[mode as u8])
    }

    /// Switch white balance to manual with the given color
    pub fn set_white_balance(&mut self, port: PortHandle, color: &RgbColor) -> VisionResult<()> {
        self.write(port, WHITE_BALANCE_MODE_REG, &codec::encode_white_balance(color))
    }

    /// Current white-balance color; brightness is always zero
    pub fn get_white_balance(&mut self, port: PortHandle) -> VisionResult<RgbColor> {
        let mut buf = [0u8; 3];
        self.read(port, WHITE_BALANCE_RED_REG, &mut buf)?;
        Ok(codec::decode_white_balance(&buf))
    }

    pub fn get_led_mode(&mut self, port: PortHandle) -> VisionResult<LedMode> {
        let value = self.read_byte(port, LED_MODE_REG)?;
        LedMode::try_from(value).map_err(|value| VisionError::InvalidResponse {
            register: LED_MODE_REG,
            value,
        })
    }

    pub fn set_led_mode(&mut self, port: PortHandle, mode: LedMode) -> VisionResult<()> {
        self.write(port, LED_MODE_REG, &[mode as u8])
    }

    /// Set LED color and brightness (capped at 100), switching the LED to manual
    pub fn set_led_color(&mut self, port: PortHandle, color: &RgbColor) -> VisionResult<()> {
        self.write(port, LED_BRIGHTNESS_REG, &codec::encode_led_color(color))
    }

    pub fn get_led_color(&mut self, port: PortHandle) -> VisionResult<RgbColor> {
        let mut buf = [0u8; 4];
        self.read(port, LED_BRIGHTNESS_REG, &mut buf)?;
        Ok(codec::decode_led_color(&buf))
    }

    fn check_signature_id(port: PortHandle, id: u8) -> VisionResult<()> {
        if ClassifierSignature::is_valid_id(id) {
            Ok(())
        } else {
            debug!("[vision] {} rejected signature slot {}", port, id);
            Err(VisionError::InvalidSignatureId(id))
        }
    }

    fn write(&mut self, port: PortHandle, register: u8, data: &[u8]) -> VisionResult<()> {
        trace!("[vision] {} write {:#04x} {:02x?}", port, register, data);
        self.transport
            .write(port, register, data)
            .map_err(|e| VisionError::Transport { port, source: Box::new(e) })
    }

    fn read(&mut self, port: PortHandle, register: u8, buf: &mut [u8]) -> VisionResult<()> {
        self.transport
            .read(port, register, buf)
            .map_err(|e| VisionError::Transport { port, source: Box::new(e) })?;
        trace!("[vision] {} read {:#04x} {:02x?}", port, register, buf);
        Ok(())
    }

    fn read_byte(&mut self, port: PortHandle, register: u8) -> VisionResult<u8> {
        let mut buf = [0u8; 1];
        self.read(port, register, &mut buf)?;
        Ok(buf[0])
    }
}
