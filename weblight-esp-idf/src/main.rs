use std::time::{Duration, Instant};

use esp_idf_sys as _;
use weblight::app::connection::LinkEvents;
use weblight::app::App;
use weblight::hal::wifi::WifiConfig;
use weblight::hal::Platform;

use weblight_esp_idf::drivers::http::RgbServer;
use weblight_esp_idf::platform::{BoardType, Config, PlatformImpl};

const TASK_WAKEUP_PERIOD: Duration = Duration::from_millis(20);

fn main() -> anyhow::Result<()> {
    esp_idf_sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = Config {
        wifi: WifiConfig::from_env_var().unwrap_or_default(),
        #[cfg(feature = "m5stampc3")]
        board_type: BoardType::M5StampC3,
        #[cfg(feature = "rustdevkit")]
        board_type: BoardType::RustDevKit,
        #[cfg(feature = "discrete-leds")]
        board_type: BoardType::DiscreteLeds,
    };

    let events = LinkEvents::new();

    log::info!("Create platform");
    let p = PlatformImpl::new(&config, events.clone());

    log::info!("Create app");
    let mut app = App::new(&p, events);

    let mut server: Option<RgbServer> = None;

    log::info!("Start loop");

    loop {
        let next_wakeup = Instant::now() + TASK_WAKEUP_PERIOD;

        {
            let start = Instant::now();
            app.update();

            if server.is_none() && app.is_online() {
                log::info!("Network is up, starting server");
                server = Some(RgbServer::new(p.indicator())?);
            }

            log::trace!("app update took {}ms", (Instant::now() - start).as_millis());
        }

        if let Some(delay) = next_wakeup.checked_duration_since(Instant::now()) {
            std::thread::sleep(delay);
        } else {
            log::error!("no delay");
        }
    }
}
