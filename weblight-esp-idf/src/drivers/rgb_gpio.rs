use std::sync::Mutex;

use esp_idf_hal::gpio::{AnyOutputPin, Level, Output, PinDriver};
use esp_idf_sys::EspError;
use weblight::hal::indicator::{Color, Indicator, TransmitError};

struct Outputs {
    red: PinDriver<'static, AnyOutputPin, Output>,
    green: PinDriver<'static, AnyOutputPin, Output>,
    blue: PinDriver<'static, AnyOutputPin, Output>,
}

// A non-zero channel turns the matching LED fully on; there is no
// intermediate brightness.
pub struct GpioRgbLed {
    outputs: Mutex<Outputs>,
}

impl GpioRgbLed {
    pub fn new(
        red: AnyOutputPin,
        green: AnyOutputPin,
        blue: AnyOutputPin,
    ) -> anyhow::Result<GpioRgbLed> {
        let outputs = Outputs {
            red: PinDriver::output(red)?,
            green: PinDriver::output(green)?,
            blue: PinDriver::output(blue)?,
        };

        Ok(GpioRgbLed {
            outputs: Mutex::new(outputs),
        })
    }
}

fn level(channel: u8) -> Level {
    if channel > 0 {
        Level::High
    } else {
        Level::Low
    }
}

fn set_levels(outputs: &mut Outputs, color: Color) -> Result<(), EspError> {
    outputs.red.set_level(level(color.r))?;
    outputs.green.set_level(level(color.g))?;
    outputs.blue.set_level(level(color.b))?;
    Ok(())
}

impl Indicator for GpioRgbLed {
    fn set_color(&self, color: Color) -> Result<(), TransmitError> {
        let mut outputs = self.outputs.lock().map_err(|_| TransmitError::Failed)?;
        set_levels(&mut outputs, color).map_err(|_| TransmitError::Failed)
    }
}
