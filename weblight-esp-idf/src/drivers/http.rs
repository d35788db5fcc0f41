use std::sync::Arc;

use embedded_svc::http::{Method, Query};
use embedded_svc::io::Write;
use esp_idf_svc::http::server::{Configuration, EspHttpServer};
use weblight::hal::indicator::Indicator;
use weblight::svc::endpoint;

// Kept alive by ownership; dropping it stops the server.
pub struct RgbServer {
    #[allow(dead_code)]
    esp_http_server: EspHttpServer,
}

fn add_handlers(
    server: &mut EspHttpServer,
    indicator: Arc<dyn Indicator + Send + Sync>,
) -> anyhow::Result<()> {
    server.fn_handler("/rgb", Method::Get, move |request| {
        if let Err(e) = endpoint::apply(request.uri(), indicator.as_ref()) {
            log::error!("{e}");
            return Err(e.into());
        }

        let headers = [
            ("Content-Type", "text/plain"),
            ("Access-Control-Allow-Origin", "*"),
        ];
        let mut response = request.into_response(200, None, &headers)?;
        response.write_all(endpoint::RESPONSE_BODY)?;
        Ok(())
    })?;

    Ok(())
}

impl RgbServer {
    pub fn new(indicator: Arc<dyn Indicator + Send + Sync>) -> anyhow::Result<Self> {
        let conf = Configuration::default();
        let mut esp_http_server = EspHttpServer::new(&conf)?;
        add_handlers(&mut esp_http_server, indicator)?;
        Ok(RgbServer { esp_http_server })
    }
}
