//! Background track playback.

/// Playback sink for the looping background track
pub trait AudioTrack {
    fn play(&mut self);
    fn pause(&mut self);
    fn is_playing(&self) -> bool;
}

/// Track that only records and logs state; no sound device is opened
#[derive(Debug, Clone)]
pub struct SilentTrack {
    name: String,
    volume: f32,
    playing: bool,
}

impl SilentTrack {
    pub fn new(name: impl Into<String>, volume: f32) -> Self {
        Self {
            name: name.into(),
            volume: volume.clamp(0.0, 1.0),
            playing: false,
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

impl AudioTrack for SilentTrack {
    fn play(&mut self) {
        self.playing = true;
        log::info!("♪ {} playing (volume {:.1})", self.name, self.volume);
    }

    fn pause(&mut self) {
        self.playing = false;
        log::info!("♪ {} paused", self.name);
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_track_tracks_state() {
        let mut track = SilentTrack::new("background", 0.2);
        assert!(!track.is_playing());
        track.play();
        assert!(track.is_playing());
        track.pause();
        assert!(!track.is_playing());
        assert_eq!(track.volume(), 0.2);
    }
}
