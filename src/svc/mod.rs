pub use transmitter::PixelTransmitter;

pub mod endpoint;
pub mod resolver;
mod transmitter;
