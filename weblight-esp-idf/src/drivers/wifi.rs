use std::cell::RefCell;

use anyhow::bail;
use embedded_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};
use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::{EspSubscription, EspSystemEventLoop, System};
use esp_idf_svc::netif::IpEvent;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::WifiEvent;
use weblight::app::connection::{LinkEvent, LinkEvents};
use weblight::hal::wifi::{Wifi, WifiConfig};

// Raw stack notifications become link events; connecting and reconnecting
// are left to the connection manager.
pub struct EspWifi {
    esp_wifi: RefCell<esp_idf_svc::wifi::EspWifi<'static>>,
    _wifi_events: EspSubscription<System>,
    _ip_events: EspSubscription<System>,
}

fn to_esp_wifi_config(src: &WifiConfig) -> anyhow::Result<Configuration> {
    let &WifiConfig { ssid, password } = src;

    if ssid.is_empty() {
        bail!("Wi-Fi SSID must be non-empty")
    }

    let auth_method = if password.is_empty() {
        log::info!("Wi-Fi password is empty. Authentication is disabled.");
        AuthMethod::None
    } else {
        AuthMethod::WPA2Personal
    };

    let config = ClientConfiguration {
        ssid: ssid.into(),
        password: password.into(),
        channel: Default::default(),
        auth_method,
        ..Default::default()
    };

    Ok(Configuration::Client(config))
}

impl EspWifi {
    pub fn new(modem: Modem, events: LinkEvents) -> anyhow::Result<EspWifi> {
        let sys_loop = EspSystemEventLoop::take()?;
        let nvs = EspDefaultNvsPartition::take()?;
        let esp_wifi = esp_idf_svc::wifi::EspWifi::new(modem, sys_loop.clone(), Some(nvs))?;

        let wifi_events = {
            let events = events.clone();
            sys_loop.subscribe(move |event: &WifiEvent| match event {
                WifiEvent::StaStarted => events.push(LinkEvent::StackReady),
                WifiEvent::StaConnected => events.push(LinkEvent::Associated),
                WifiEvent::StaDisconnected => events.push(LinkEvent::Disconnected),
                _ => (),
            })?
        };

        let ip_events = sys_loop.subscribe(move |event: &IpEvent| {
            if let IpEvent::DhcpIpAssigned(_) = event {
                events.push(LinkEvent::AddressAcquired);
            }
        })?;

        Ok(Self {
            esp_wifi: RefCell::new(esp_wifi),
            _wifi_events: wifi_events,
            _ip_events: ip_events,
        })
    }
}

impl Wifi for EspWifi {
    fn setup(&self, config: &WifiConfig) -> anyhow::Result<()> {
        let config = to_esp_wifi_config(config)?;

        let mut esp_wifi = self.esp_wifi.try_borrow_mut()?;

        esp_wifi.set_configuration(&config)?;
        esp_wifi.start()?;

        Ok(())
    }

    fn connect(&self) -> anyhow::Result<()> {
        let mut esp_wifi = self.esp_wifi.try_borrow_mut()?;

        esp_wifi.connect()?;

        Ok(())
    }
}
