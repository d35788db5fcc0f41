pub mod http;
pub mod pixel;
pub mod rgb_gpio;
pub mod wifi;
