use std::sync::Arc;

use crate::hal::indicator::Indicator;
use crate::hal::wifi::Wifi;

#[cfg(test)]
pub mod doubles;
pub mod indicator;
pub mod pixel;
pub mod wifi;

pub trait Platform {
    // Shared handle; the request handlers outlive the platform borrow.
    fn indicator(&self) -> Arc<dyn Indicator + Send + Sync>;
    fn wifi(&self) -> &(dyn Wifi + '_);
}
