use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Hardware limit on objects returned by one query
pub const MAX_OBJECTS: usize = 4;

/// One blob the sensor matched against a signature or color code
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DetectedObject {
    /// Id the query was issued with, the sensor does not echo one per object
    pub signature_id: i16,
    /// Top-left corner in sensor pixels
    pub x: i16,
    pub y: i16,
    pub width: i16,
    pub height: i16,
    /// Orientation, 0-359
    pub angle: i16,
    /// Reserved, always zero
    pub total: i16,
}

/// Result of one object query: up to [`MAX_OBJECTS`] objects, no heap allocation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjectList {
    objects: [DetectedObject; MAX_OBJECTS],
    len: usize,
}

impl ObjectList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object, returns false once the list is full
    pub fn push(&mut self, object: DetectedObject) -> bool {
        if self.len == MAX_OBJECTS {
            return false;
        }
        self.objects[self.len] = object;
        self.len += 1;
        true
    }

    pub fn as_slice(&self) -> &[DetectedObject] {
        &self.objects[..self.len]
    }

    /// Serialize to JSON for debugging
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self.as_slice())
    }
}

impl Deref for ObjectList {
    type Target = [DetectedObject];

    fn deref(&self) -> &[DetectedObject] {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a ObjectList {
    type Item = &'a DetectedObject;
    type IntoIter = std::slice::Iter<'a, DetectedObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Color classifier profile stored in one of the sensor's seven slots
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct ClassifierSignature {
    /// Slot 1-7
    pub id: u8,
    /// Sensitivity
    pub range: f32,
    pub u_min: i32,
    pub u_max: i32,
    pub u_mean: i32,
    pub v_min: i32,
    pub v_max: i32,
    pub v_mean: i32,
    pub m_rgb: i32,
    pub m_type: i32,
}

impl ClassifierSignature {
    pub const MIN_ID: u8 = 1;
    pub const MAX_ID: u8 = 7;

    pub fn is_valid_id(id: u8) -> bool {
        (Self::MIN_ID..=Self::MAX_ID).contains(&id)
    }
}

/// LED or white-balance color
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    /// LED brightness 0-100, zero where the register has no brightness channel
    pub brightness: u8,
}

impl RgbColor {
    pub fn new(red: u8, green: u8, blue: u8, brightness: u8) -> Self {
        Self { red, green, blue, brightness }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum WhiteBalanceMode {
    Normal = 0,
    Start = 1,
    Manual = 2,
}

impl TryFrom<u8> for WhiteBalanceMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0 => Ok(WhiteBalanceMode::Normal),
            1 => Ok(WhiteBalanceMode::Start),
            2 => Ok(WhiteBalanceMode::Manual),
            other => Err(other),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LedMode {
    Auto = 0,
    Manual = 1,
}

impl TryFrom<u8> for LedMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            0 => Ok(LedMode::Auto),
            1 => Ok(LedMode::Manual),
            other => Err(other),
        }
    }
}
