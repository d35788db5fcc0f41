use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::hal::indicator::{Indicator, TransmitError};
use crate::hal::pixel::{Frame, PulseChannel};
use crate::hal::wifi::{Wifi, WifiConfig};
use crate::hal::Platform;
use crate::svc::PixelTransmitter;

// Records every frame and when it started. A hold time simulates a slow
// peripheral; an injected error simulates a hardware fault; overlapping
// transmissions raise a flag for the observing test.
pub struct FakeChannel {
    frames: Arc<Mutex<Vec<Frame>>>,
    started: Arc<Mutex<Vec<Instant>>>,
    fail_with: Option<TransmitError>,
    hold: Duration,
    attempts: Arc<AtomicUsize>,
    busy: Arc<AtomicBool>,
    overlapped: Arc<AtomicBool>,
}

impl FakeChannel {
    pub fn new() -> FakeChannel {
        FakeChannel {
            frames: Arc::new(Mutex::new(Vec::new())),
            started: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
            hold: Duration::ZERO,
            attempts: Arc::new(AtomicUsize::new(0)),
            busy: Arc::new(AtomicBool::new(false)),
            overlapped: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn failing_with(error: TransmitError) -> FakeChannel {
        let mut channel = FakeChannel::new();
        channel.fail_with = Some(error);
        channel
    }

    pub fn holding_for(hold: Duration) -> FakeChannel {
        let mut channel = FakeChannel::new();
        channel.hold = hold;
        channel
    }

    pub fn frames(&self) -> Arc<Mutex<Vec<Frame>>> {
        self.frames.clone()
    }

    pub fn started(&self) -> Arc<Mutex<Vec<Instant>>> {
        self.started.clone()
    }

    pub fn attempts(&self) -> Arc<AtomicUsize> {
        self.attempts.clone()
    }

    pub fn overlap_flag(&self) -> Arc<AtomicBool> {
        self.overlapped.clone()
    }
}

impl PulseChannel for FakeChannel {
    fn transmit(&mut self, frame: &Frame) -> Result<(), TransmitError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut started) = self.started.lock() {
            started.push(Instant::now());
        }
        if self.busy.swap(true, Ordering::SeqCst) {
            self.overlapped.store(true, Ordering::SeqCst);
        }
        if !self.hold.is_zero() {
            std::thread::sleep(self.hold);
        }
        let result = match self.fail_with {
            Some(error) => Err(error),
            None => {
                if let Ok(mut frames) = self.frames.lock() {
                    frames.push(*frame);
                }
                Ok(())
            }
        };
        self.busy.store(false, Ordering::SeqCst);
        result
    }
}

#[derive(Default)]
pub struct FakeWifi {
    connect_calls: AtomicUsize,
}

impl FakeWifi {
    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }
}

impl Wifi for FakeWifi {
    fn setup(&self, _config: &WifiConfig) -> anyhow::Result<()> {
        Ok(())
    }

    fn connect(&self) -> anyhow::Result<()> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct FakePlatform {
    pub wifi: FakeWifi,
    indicator: Arc<dyn Indicator + Send + Sync>,
}

impl FakePlatform {
    pub fn new() -> FakePlatform {
        FakePlatform {
            wifi: FakeWifi::default(),
            indicator: Arc::new(PixelTransmitter::new(FakeChannel::new())),
        }
    }
}

impl Platform for FakePlatform {
    fn indicator(&self) -> Arc<dyn Indicator + Send + Sync> {
        self.indicator.clone()
    }

    fn wifi(&self) -> &(dyn Wifi + '_) {
        &self.wifi
    }
}
