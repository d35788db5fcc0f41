pub trait Wifi {
    fn setup(&self, config: &WifiConfig) -> anyhow::Result<()>;

    fn connect(&self) -> anyhow::Result<()>;
}

#[derive(Eq, PartialEq)]
pub struct WifiConfig<'a> {
    pub ssid: &'a str,
    pub password: &'a str,
}

impl WifiConfig<'_> {
    // "ssid:password"; an empty password selects an open network.
    fn try_from_str(s: &'static str) -> Result<Self, ()> {
        let mut iter = s.splitn(2, ':');
        let ssid: &str = iter.next().ok_or_else(|| ())?;
        let password: &str = iter.next().ok_or_else(|| ())?;
        Ok(WifiConfig { ssid, password })
    }

    pub fn from_env_var() -> Result<Self, ()> {
        if let Some(s) = option_env!("WEBLIGHT_WIFI_CONFIG") {
            WifiConfig::try_from_str(s)
        } else {
            Err(())
        }
    }
}

impl Default for WifiConfig<'_> {
    fn default() -> Self {
        WifiConfig {
            ssid: "weblight",
            password: "weblight",
        }
    }
}
