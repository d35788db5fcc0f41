pub mod app;
pub mod hal;
pub mod svc;
