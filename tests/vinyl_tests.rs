mod common;

use std::cell::RefCell;
use std::f32::consts::PI;
use std::rc::Rc;

use common::frames;
use cozy_room::audio::AudioTrack;
use cozy_room::managers::{CursorIcon, PlaybackState, VinylPlayerManager, VinylPose};
use cozy_room::pipeline::FrameTickable;
use cozy_room::scene::NodeId;

/// Track that records every call it receives
#[derive(Clone, Default)]
struct RecordingTrack {
    calls: Rc<RefCell<Vec<&'static str>>>,
    playing: Rc<RefCell<bool>>,
}

impl AudioTrack for RecordingTrack {
    fn play(&mut self) {
        self.calls.borrow_mut().push("play");
        *self.playing.borrow_mut() = true;
    }

    fn pause(&mut self) {
        self.calls.borrow_mut().push("pause");
        *self.playing.borrow_mut() = false;
    }

    fn is_playing(&self) -> bool {
        *self.playing.borrow()
    }
}

fn player(parts: bool) -> (VinylPlayerManager, RecordingTrack) {
    let track = RecordingTrack::default();
    let mut manager = VinylPlayerManager::new(Box::new(track.clone()));
    if parts {
        manager.initialize(Some(NodeId(1)), Some(NodeId(2)), Some(NodeId(3)));
    } else {
        manager.initialize(None, None, None);
    }
    (manager, track)
}

fn run(manager: &mut VinylPlayerManager, start: f32, seconds: f32) {
    for frame in frames(start, seconds) {
        manager.tick(&frame);
    }
}

#[cfg(test)]
mod playback_tests {
    use super::*;

    #[test]
    fn test_first_click_starts_playback() {
        let (mut manager, track) = player(true);

        manager.handle_click();

        assert!(manager.is_playing(), "First click should start playback");
        assert_eq!(manager.state(), PlaybackState::Playing);
        assert_eq!(*track.calls.borrow(), vec!["play"]);
        assert!(track.is_playing(), "Audio should follow playback state");
    }

    #[test]
    fn test_second_click_stops_playback() {
        let (mut manager, track) = player(true);

        manager.handle_click();
        manager.handle_click();

        assert!(!manager.is_playing());
        assert_eq!(*track.calls.borrow(), vec!["play", "pause"]);
    }

    #[test]
    fn test_disc_spins_linearly() {
        let (mut manager, _) = player(true);
        manager.handle_click();

        run(&mut manager, 0.0, 1.0);

        let disc = manager.pose().disc_y;
        assert!((disc - PI / 2.0).abs() < 1e-3, "Quarter turn per second, got {}", disc);
    }

    #[test]
    fn test_disc_keeps_spinning_past_one_turn() {
        let (mut manager, _) = player(true);
        manager.handle_click();

        run(&mut manager, 0.0, 5.0);

        let disc = manager.pose().disc_y;
        assert!(disc > 0.0 && disc < 2.0 * PI, "Spin should wrap, got {}", disc);
        assert!((disc - PI / 2.0).abs() < 1e-2, "One second into the second turn, got {}", disc);
    }

    #[test]
    fn test_arm_swings_then_lowers() {
        let (mut manager, _) = player(true);
        manager.handle_click();

        run(&mut manager, 0.0, 2.0);
        let swung = manager.pose();
        assert!((swung.arm_y - VinylPlayerManager::ARM_PLAY_Y).abs() < 1e-3);
        assert!(swung.arm_x.abs() < 1e-3, "Arm should not lower during the swing");

        run(&mut manager, 2.0, 1.0);
        let lowered = manager.pose();
        assert!((lowered.arm_x - VinylPlayerManager::ARM_PLAY_X).abs() < 1e-3);
    }

    #[test]
    fn test_stop_returns_to_rest() {
        let (mut manager, _) = player(true);
        manager.handle_click();
        run(&mut manager, 0.0, 3.0);

        manager.handle_click();
        run(&mut manager, 3.0, 3.0);

        let pose = manager.pose();
        assert!(pose.disc_y.abs() < 1e-3, "Disc should settle at rest");
        assert!(pose.arm_x.abs() < 1e-3);
        assert!(pose.arm_y.abs() < 1e-3);
        assert_eq!(manager.active_animations(), 0);
    }

    #[test]
    fn test_stop_mid_swing_interrupts_start() {
        let (mut manager, _) = player(true);
        manager.handle_click();
        run(&mut manager, 0.0, 0.5);

        manager.handle_click();
        run(&mut manager, 0.5, 3.0);

        let pose = manager.pose();
        assert!(pose.disc_y.abs() < 1e-3, "Disc should spin back, got {}", pose.disc_y);
        assert!(pose.arm_y.abs() < 1e-3, "Arm should swing back, got {}", pose.arm_y);
    }

    #[test]
    fn test_missing_parts_still_toggle_audio() {
        let (mut manager, track) = player(false);

        manager.handle_click();
        run(&mut manager, 0.0, 1.0);

        assert!(manager.is_playing());
        assert!(track.is_playing());
        assert_eq!(manager.pose(), VinylPose::default(), "Nothing to animate without parts");
        assert!(manager.interactive_objects().is_empty());
    }

    #[test]
    fn test_dispose_pauses_and_forgets_parts() {
        let (mut manager, track) = player(true);
        manager.handle_click();

        manager.dispose();

        assert_eq!(manager.state(), PlaybackState::Stopped);
        assert!(!track.is_playing());
        assert!(manager.interactive_objects().is_empty());
    }
}

#[cfg(test)]
mod interaction_tests {
    use super::*;

    #[test]
    fn test_interactive_objects_include_player() {
        let (manager, _) = player(true);
        assert_eq!(manager.interactive_objects(), &[NodeId(1), NodeId(2), NodeId(3)]);
    }

    #[test]
    fn test_is_vinyl_object_by_id_or_name() {
        let (manager, _) = player(true);

        assert!(manager.is_vinyl_object(NodeId(2), "Cylinder.004"));
        assert!(manager.is_vinyl_object(NodeId(42), "vinyl-disc-label"));
        assert!(!manager.is_vinyl_object(NodeId(42), "Sofa"));
    }

    #[test]
    fn test_click_flashes_pointer_cursor() {
        let (mut manager, _) = player(true);

        manager.handle_click();
        assert_eq!(manager.cursor().icon(), CursorIcon::Pointer);

        run(&mut manager, 0.0, 1.0);
        assert_eq!(manager.cursor().icon(), CursorIcon::Default);
    }
}
