use esp_idf_hal::gpio::AnyOutputPin;
use esp_idf_hal::rmt::config::TransmitConfig;
use esp_idf_hal::rmt::{TxRmtDriver, CHANNEL0};
use esp_idf_sys::{
    esp, rmt_channel_t, rmt_channel_t_RMT_CHANNEL_0, rmt_item32_t, rmt_wait_tx_done,
    rmt_write_items, ESP_ERR_TIMEOUT,
};
use weblight::hal::indicator::TransmitError;
use weblight::hal::pixel::{Frame, Pulse, PulseChannel, CLOCK_DIVIDER, FRAME_PULSES};

const RMT_CHANNEL: rmt_channel_t = rmt_channel_t_RMT_CHANNEL_0;

// FreeRTOS runs at the default 100 Hz tick, so this is one second.
const TX_DONE_TIMEOUT_TICKS: u32 = 100;

// All 24 items are enqueued in one call so the hardware plays them back to
// back; the wait for the transmission-done flag is bounded.
pub struct RmtPixel {
    #[allow(dead_code)]
    tx: TxRmtDriver<'static>,
    // Items live on the struct because the hardware may still be reading
    // them when a wait times out.
    items: [rmt_item32_t; FRAME_PULSES],
}

fn rmt_item(pulse: &Pulse) -> rmt_item32_t {
    // duration0 [14:0], level0 [15], duration1 [30:16], level1 [31]
    let val = pulse.high_ticks as u32 | 1 << 15 | (pulse.low_ticks as u32) << 16;
    let mut item = rmt_item32_t::default();
    item.__bindgen_anon_1.val = val;
    item
}

impl RmtPixel {
    pub fn new(channel: CHANNEL0, pin: AnyOutputPin) -> anyhow::Result<RmtPixel> {
        let config = TransmitConfig::new().clock_divider(CLOCK_DIVIDER);
        let tx = TxRmtDriver::new(channel, pin, &config)?;
        let items = [rmt_item(&Pulse::for_bit(false)); FRAME_PULSES];
        Ok(RmtPixel { tx, items })
    }
}

impl PulseChannel for RmtPixel {
    fn transmit(&mut self, frame: &Frame) -> Result<(), TransmitError> {
        for (item, pulse) in self.items.iter_mut().zip(frame.pulses()) {
            *item = rmt_item(pulse);
        }

        let written = esp!(unsafe {
            rmt_write_items(
                RMT_CHANNEL,
                self.items.as_ptr(),
                self.items.len() as i32,
                false,
            )
        });

        if let Err(e) = written {
            log::error!("{e}");
            return Err(TransmitError::Failed);
        }

        match esp!(unsafe { rmt_wait_tx_done(RMT_CHANNEL, TX_DONE_TIMEOUT_TICKS) }) {
            Ok(()) => Ok(()),
            Err(e) if e.code() == ESP_ERR_TIMEOUT as i32 => Err(TransmitError::Timeout),
            Err(e) => {
                log::error!("{e}");
                Err(TransmitError::Failed)
            }
        }
    }
}
