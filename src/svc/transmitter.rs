use std::sync::Mutex;
use std::time::Instant;

use crate::hal::indicator::{Color, Indicator, TransmitError};
use crate::hal::pixel::{Frame, PulseChannel, LATCH_GAP};

struct Output<C> {
    channel: C,
    last_color: Color,
    sent_at: Option<Instant>,
}

// Serializes access to the one pulse peripheral and owns the last color
// known to be on the wire (off at startup). A color requested while a
// transmission is in flight parks in the pending slot, where a newer request
// may overwrite it; whoever acquires the peripheral next waits out the latch
// gap and sends the newest parked color. Stale intermediates are dropped,
// never queued.
pub struct PixelTransmitter<C> {
    output: Mutex<Output<C>>,
    pending: Mutex<Option<Color>>,
}

impl<C: PulseChannel> PixelTransmitter<C> {
    pub fn new(channel: C) -> PixelTransmitter<C> {
        PixelTransmitter {
            output: Mutex::new(Output {
                channel,
                last_color: Color::OFF,
                sent_at: None,
            }),
            pending: Mutex::new(None),
        }
    }

    pub fn last_color(&self) -> Option<Color> {
        self.output.lock().ok().map(|output| output.last_color)
    }
}

impl<C: PulseChannel> Indicator for PixelTransmitter<C> {
    fn set_color(&self, color: Color) -> Result<(), TransmitError> {
        {
            let mut pending = self.pending.lock().map_err(|_| TransmitError::Failed)?;
            *pending = Some(color);
        }
        let mut output = self.output.lock().map_err(|_| TransmitError::Failed)?;
        let next = {
            let mut pending = self.pending.lock().map_err(|_| TransmitError::Failed)?;
            pending.take()
        };
        match next {
            // Another caller got the peripheral first and has already sent a
            // color at least as new as ours.
            None => Ok(()),
            Some(color) => {
                if let Some(sent_at) = output.sent_at {
                    let idle = sent_at.elapsed();
                    if idle < LATCH_GAP {
                        std::thread::sleep(LATCH_GAP - idle);
                    }
                }
                let frame = Frame::from(color);
                let sent = output.channel.transmit(&frame);
                output.sent_at = Some(Instant::now());
                sent?;
                output.last_color = color;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::hal::doubles::FakeChannel;

    #[test]
    fn test_initial_color_is_off() {
        let transmitter = PixelTransmitter::new(FakeChannel::new());
        assert_eq!(transmitter.last_color(), Some(Color::OFF));
    }

    #[test]
    fn test_transmits_requested_color() {
        let channel = FakeChannel::new();
        let frames = channel.frames();
        let transmitter = PixelTransmitter::new(channel);

        transmitter.set_color(Color::from(0x123456)).unwrap();

        assert_eq!(transmitter.last_color(), Some(Color::from(0x123456)));
        let frames = frames.lock().unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(Color::from(&frames[0]), Color::from(0x123456));
    }

    #[test]
    fn test_repeating_a_color_sends_identical_frames() {
        let channel = FakeChannel::new();
        let frames = channel.frames();
        let transmitter = PixelTransmitter::new(channel);

        transmitter.set_color(Color::from(0x804020)).unwrap();
        transmitter.set_color(Color::from(0x804020)).unwrap();

        let frames = frames.lock().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], frames[1]);
    }

    #[test]
    fn test_fault_is_surfaced_without_retry() {
        let channel = FakeChannel::failing_with(TransmitError::Failed);
        let attempts = channel.attempts();
        let transmitter = PixelTransmitter::new(channel);

        let result = transmitter.set_color(Color::from(0xFF0000));

        assert_eq!(result, Err(TransmitError::Failed));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(transmitter.last_color(), Some(Color::OFF));
    }

    #[test]
    fn test_timeout_is_surfaced() {
        let channel = FakeChannel::failing_with(TransmitError::Timeout);
        let transmitter = PixelTransmitter::new(channel);

        let result = transmitter.set_color(Color::from(0x0000FF));

        assert_eq!(result, Err(TransmitError::Timeout));
    }

    #[test]
    fn test_frames_are_separated_by_the_latch_gap() {
        let channel = FakeChannel::new();
        let started = channel.started();
        let transmitter = PixelTransmitter::new(channel);

        for _ in 0..20 {
            transmitter.set_color(Color::from(0x123456)).unwrap();
        }

        let started = started.lock().unwrap();
        assert_eq!(started.len(), 20);
        for pair in started.windows(2) {
            assert!(pair[1] - pair[0] >= LATCH_GAP);
        }
    }

    #[test_log::test]
    fn test_concurrent_requests_never_interleave() {
        let channel = FakeChannel::holding_for(Duration::from_millis(50));
        let frames = channel.frames();
        let overlapped = channel.overlap_flag();
        let transmitter = Arc::new(PixelTransmitter::new(channel));

        let colors = [
            Color::from(0x110000),
            Color::from(0x001100),
            Color::from(0x000011),
            Color::from(0x111111),
        ];
        let mut handles = Vec::new();
        for color in colors {
            let transmitter = transmitter.clone();
            handles.push(thread::spawn(move || transmitter.set_color(color)));
        }
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        assert!(!overlapped.load(Ordering::SeqCst));
        let frames = frames.lock().unwrap();
        assert!(!frames.is_empty());
        for frame in frames.iter() {
            assert!(colors.contains(&Color::from(frame)));
        }
    }

    #[test_log::test]
    fn test_newest_color_replaces_unsent_intermediate() {
        let channel = FakeChannel::holding_for(Duration::from_millis(400));
        let frames = channel.frames();
        let transmitter = Arc::new(PixelTransmitter::new(channel));

        let red = Color::from(0xFF0000);
        let green = Color::from(0x00FF00);
        let blue = Color::from(0x0000FF);

        let first = {
            let transmitter = transmitter.clone();
            thread::spawn(move || transmitter.set_color(red))
        };
        thread::sleep(Duration::from_millis(100));
        let second = {
            let transmitter = transmitter.clone();
            thread::spawn(move || transmitter.set_color(green))
        };
        thread::sleep(Duration::from_millis(100));
        let third = {
            let transmitter = transmitter.clone();
            thread::spawn(move || transmitter.set_color(blue))
        };

        first.join().unwrap().unwrap();
        second.join().unwrap().unwrap();
        third.join().unwrap().unwrap();

        let sent: Vec<Color> = frames.lock().unwrap().iter().map(Color::from).collect();
        assert_eq!(sent, [red, blue]);
        assert_eq!(transmitter.last_color(), Some(blue));
    }
}
