use crate::hal::indicator::{Indicator, TransmitError};
use crate::svc::resolver;

// Sent for every request, recognized token or not.
pub const RESPONSE_BODY: &[u8] = b"OK";

// Unknown or missing tokens leave the output untouched; only a transmit
// failure bubbles up.
pub fn apply(uri: &str, indicator: &dyn Indicator) -> Result<(), TransmitError> {
    match query_value(uri, "color") {
        None => {
            log::debug!("no color parameter in {uri:?}");
            Ok(())
        }
        Some(token) => match resolver::resolve(token) {
            Some(color) => {
                log::info!("Color = {token}");
                indicator.set_color(color)
            }
            None => {
                log::debug!("ignoring unknown color {token:?}");
                Ok(())
            }
        },
    }
}

fn query_value<'a>(uri: &'a str, key: &str) -> Option<&'a str> {
    let (_, query) = uri.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (k, value) = pair.split_once('=')?;
        (k == key).then_some(value)
    })
}
