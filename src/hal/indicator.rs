use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const OFF: Color = Color { r: 0, g: 0, b: 0 };
}

impl From<u32> for Color {
    fn from(x: u32) -> Self {
        Color {
            r: ((x & 0xFF0000) >> 16) as u8,
            g: ((x & 0x00FF00) >> 8) as u8,
            b: (x & 0x0000FF) as u8,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TransmitError {
    Failed,
    Timeout,
}

impl fmt::Display for TransmitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for TransmitError {}

pub trait Indicator {
    fn set_color(&self, color: Color) -> Result<(), TransmitError>;
}
