use std::time::Duration;

use crate::hal::indicator::{Color, TransmitError};

// Counter divisor the tick durations below are expressed against.
pub const CLOCK_DIVIDER: u8 = 2;

// A logical 1 holds the line high for the long duration, a logical 0 for the
// short one; the opposite segment fills the rest of the bit period, so both
// symbols span the same 12 ticks (≈1.25 µs nominal per the WS2812 datasheet).
const LONG_TICKS: u16 = 8;
const SHORT_TICKS: u16 = 4;

// After a frame the line must stay low for this long before the next one
// starts, so the pixel latches the word it received.
pub const LATCH_GAP: Duration = Duration::from_micros(50);

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Pulse {
    pub high_ticks: u16,
    pub low_ticks: u16,
}

impl Pulse {
    const ONE: Pulse = Pulse {
        high_ticks: LONG_TICKS,
        low_ticks: SHORT_TICKS,
    };

    const ZERO: Pulse = Pulse {
        high_ticks: SHORT_TICKS,
        low_ticks: LONG_TICKS,
    };

    pub fn for_bit(bit: bool) -> Pulse {
        if bit {
            Pulse::ONE
        } else {
            Pulse::ZERO
        }
    }

    pub fn period(&self) -> u16 {
        self.high_ticks + self.low_ticks
    }

    pub fn is_one(&self) -> bool {
        self.high_ticks > self.low_ticks
    }
}

// 8 bits per channel, 3 channels.
pub const FRAME_PULSES: usize = 24;

// One pixel's color word as transmitted: GRB channel order, most
// significant bit first.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Frame([Pulse; FRAME_PULSES]);

impl Frame {
    pub fn pulses(&self) -> &[Pulse; FRAME_PULSES] {
        &self.0
    }
}

impl From<Color> for Frame {
    fn from(color: Color) -> Self {
        // Transmission order is green, red, blue, not RGB.
        let word = (color.g as u32) << 16 | (color.r as u32) << 8 | color.b as u32;
        let mut pulses = [Pulse::ZERO; FRAME_PULSES];
        for (i, pulse) in pulses.iter_mut().enumerate() {
            let bit = word & (1 << (23 - i)) != 0;
            *pulse = Pulse::for_bit(bit);
        }
        Frame(pulses)
    }
}

impl From<&Frame> for Color {
    fn from(frame: &Frame) -> Self {
        let mut word: u32 = 0;
        for pulse in frame.pulses() {
            word = word << 1 | pulse.is_one() as u32;
        }
        Color {
            r: (word >> 8) as u8,
            g: (word >> 16) as u8,
            b: word as u8,
        }
    }
}

// Emits a frame's pulses back-to-back and returns once the hardware
// confirms the frame went out.
pub trait PulseChannel {
    fn transmit(&mut self, frame: &Frame) -> Result<(), TransmitError>;
}
