/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the scene clock started
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }

    /// Next frame read at `time`; delta never goes negative
    pub fn next(&self, time: f32) -> Self {
        Self {
            number: self.number + 1,
            time,
            delta: (time - self.time).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_frame_derives_delta() {
        let first = FrameInfo::new(0, 1.0, 0.0);
        let second = first.next(1.25);
        assert_eq!(second.number, 1);
        assert_eq!(second.delta, 0.25);
    }

    #[test]
    fn next_frame_clamps_backwards_time() {
        let frame = FrameInfo::new(3, 2.0, 0.1).next(1.0);
        assert_eq!(frame.delta, 0.0);
        assert_eq!(frame.number, 4);
    }
}
