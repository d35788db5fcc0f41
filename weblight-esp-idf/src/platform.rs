use std::sync::Arc;

use esp_idf_hal::gpio::OutputPin;
use esp_idf_hal::peripherals::Peripherals;

use crate::drivers::pixel::RmtPixel;
use crate::drivers::rgb_gpio::GpioRgbLed;
use crate::drivers::wifi::EspWifi;
use weblight::app::connection::LinkEvents;
use weblight::hal::indicator::Indicator;
use weblight::hal::wifi::{Wifi, WifiConfig};
use weblight::hal::Platform;
use weblight::svc::PixelTransmitter;

pub enum BoardType {
    M5StampC3,
    RustDevKit,
    DiscreteLeds,
}

pub struct PlatformImpl {
    wifi: EspWifi,
    indicator: Arc<dyn Indicator + Send + Sync>,
}

pub struct Config {
    pub wifi: WifiConfig<'static>,
    pub board_type: BoardType,
}

impl PlatformImpl {
    pub fn new(config: &Config, events: LinkEvents) -> Self {
        let peripherals = Peripherals::take().unwrap();

        let wifi = EspWifi::new(peripherals.modem, events).expect("Cannot create Wi-Fi");
        wifi.setup(&config.wifi).expect("Cannot setup Wi-Fi");

        let indicator: Arc<dyn Indicator + Send + Sync> = match config.board_type {
            BoardType::M5StampC3 | BoardType::RustDevKit => {
                // Both boards wire their pixel to GPIO2.
                let pixel = RmtPixel::new(
                    peripherals.rmt.channel0,
                    peripherals.pins.gpio2.downgrade_output(),
                )
                .expect("Cannot setup pixel");
                Arc::new(PixelTransmitter::new(pixel))
            }
            BoardType::DiscreteLeds => {
                let leds = GpioRgbLed::new(
                    peripherals.pins.gpio15.downgrade_output(),
                    peripherals.pins.gpio2.downgrade_output(),
                    peripherals.pins.gpio4.downgrade_output(),
                )
                .expect("Cannot setup LEDs");
                Arc::new(leds)
            }
        };

        Self { wifi, indicator }
    }
}

impl Platform for PlatformImpl {
    fn wifi(&self) -> &(dyn Wifi + '_) {
        &self.wifi
    }

    fn indicator(&self) -> Arc<dyn Indicator + Send + Sync> {
        self.indicator.clone()
    }
}
