use std::f32::consts::PI;

use crate::audio::AudioTrack;
use crate::core::{Animatable, Ease, FrameInfo, Tween, TweenHandle, TweenSet};
use crate::pipeline::FrameTickable;
use crate::scene::NodeId;

use super::picking::CursorState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VinylChannel {
    DiscY,
    ArmX,
    ArmY,
}

/// Animated Euler angles of the disc and tone arm, in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VinylPose {
    pub disc_y: f32,
    pub arm_x: f32,
    pub arm_y: f32,
}

impl Animatable<VinylChannel> for VinylPose {
    fn get(&self, key: VinylChannel) -> f32 {
        match key {
            VinylChannel::DiscY => self.disc_y,
            VinylChannel::ArmX => self.arm_x,
            VinylChannel::ArmY => self.arm_y,
        }
    }

    fn set(&mut self, key: VinylChannel, value: f32) {
        match key {
            VinylChannel::DiscY => self.disc_y = value,
            VinylChannel::ArmX => self.arm_x = value,
            VinylChannel::ArmY => self.arm_y = value,
        }
    }
}

/// Record player toggle: disc spin, tone arm swing and the background track
///
/// `state` is the only source of truth. Animations are started and killed
/// on transitions but never consulted.
pub struct VinylPlayerManager {
    disc: Option<NodeId>,
    arm: Option<NodeId>,
    player: Option<NodeId>,
    interactive: Vec<NodeId>,
    state: PlaybackState,
    pose: VinylPose,
    tweens: TweenSet<VinylChannel>,
    disc_animation: Option<TweenHandle>,
    arm_animation: Option<TweenHandle>,
    track: Box<dyn AudioTrack>,
    cursor: CursorState,
}

impl VinylPlayerManager {
    pub const SPIN_SECONDS: f32 = 4.0;
    pub const ARM_PLAY_Y: f32 = -PI / 6.0;
    pub const ARM_PLAY_X: f32 = PI / 30.0;

    pub fn new(track: Box<dyn AudioTrack>) -> Self {
        Self {
            disc: None,
            arm: None,
            player: None,
            interactive: Vec::new(),
            state: PlaybackState::Stopped,
            pose: VinylPose::default(),
            tweens: TweenSet::new(),
            disc_animation: None,
            arm_animation: None,
            track,
            cursor: CursorState::new(),
        }
    }

    /// Register the model parts and return the clickable set
    pub fn initialize(
        &mut self,
        disc: Option<NodeId>,
        arm: Option<NodeId>,
        player: Option<NodeId>,
    ) -> &[NodeId] {
        self.disc = disc;
        self.arm = arm;
        self.player = player;
        self.interactive = [disc, arm, player].into_iter().flatten().collect();
        &self.interactive
    }

    /// Angles the parts start from, read from the model
    pub fn set_rest_pose(&mut self, pose: VinylPose) {
        self.pose = pose;
    }

    pub fn handle_click(&mut self) {
        match self.state {
            PlaybackState::Playing => self.stop(),
            PlaybackState::Stopped => self.start(),
        }
        self.state = match self.state {
            PlaybackState::Playing => PlaybackState::Stopped,
            PlaybackState::Stopped => PlaybackState::Playing,
        };
        self.cursor.flash();
    }

    pub fn set_playing(&mut self, playing: bool) {
        if playing != self.is_playing() {
            self.handle_click();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn pose(&self) -> VinylPose {
        self.pose
    }

    pub fn disc(&self) -> Option<NodeId> {
        self.disc
    }

    pub fn arm(&self) -> Option<NodeId> {
        self.arm
    }

    pub fn interactive_objects(&self) -> &[NodeId] {
        &self.interactive
    }

    /// Whether a picked object belongs to the record player
    pub fn is_vinyl_object(&self, node: NodeId, name: &str) -> bool {
        name.contains("vinyl")
            || name.contains("disc")
            || name.contains("arm")
            || self.interactive.contains(&node)
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut CursorState {
        &mut self.cursor
    }

    pub fn active_animations(&self) -> usize {
        self.tweens.active_count()
    }

    /// Stop playback and forget the model parts
    pub fn dispose(&mut self) {
        self.stop();
        self.state = PlaybackState::Stopped;
        self.interactive.clear();
    }

    fn start(&mut self) {
        self.track.play();

        if self.disc.is_none() || self.arm.is_none() {
            log::warn!("Vinyl player components not found");
            return;
        }

        self.disc_animation = Some(
            self.tweens.to(
                Tween::to(VinylChannel::DiscY, 2.0 * PI, Self::SPIN_SECONDS)
                    .ease(Ease::Linear)
                    .repeat_forever(),
            ),
        );

        self.arm_animation = Some(self.tweens.timeline(vec![
            Tween::to(VinylChannel::ArmY, Self::ARM_PLAY_Y, 2.0).ease(Ease::Power2InOut),
            Tween::to(VinylChannel::ArmX, Self::ARM_PLAY_X, 1.0).ease(Ease::Power2Out),
        ]));
    }

    fn stop(&mut self) {
        if let Some(handle) = self.disc_animation.take() {
            self.tweens.kill(handle);
        }
        if self.disc.is_some() {
            self.tweens
                .to(Tween::to(VinylChannel::DiscY, 0.0, 1.0).ease(Ease::Power2Out));
        }

        if let Some(handle) = self.arm_animation.take() {
            self.tweens.kill(handle);
        }
        if self.arm.is_some() {
            self.tweens.timeline(vec![
                Tween::to(VinylChannel::ArmX, 0.0, 1.0).ease(Ease::Power2InOut),
                Tween::to(VinylChannel::ArmY, 0.0, 1.5).ease(Ease::Power2Out),
            ]);
        }

        self.track.pause();
    }
}

impl FrameTickable for VinylPlayerManager {
    fn tick(&mut self, frame: &FrameInfo) {
        self.tweens.advance(frame.delta, &mut self.pose);
        self.cursor.tick(frame.delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentTrack;

    fn manager() -> VinylPlayerManager {
        let mut m = VinylPlayerManager::new(Box::new(SilentTrack::new("test", 0.2)));
        m.initialize(Some(NodeId(1)), Some(NodeId(2)), None);
        m
    }

    #[test]
    fn test_initialize_skips_missing_player() {
        let mut m = VinylPlayerManager::new(Box::new(SilentTrack::new("test", 0.2)));
        let set = m.initialize(Some(NodeId(1)), Some(NodeId(2)), None).to_vec();
        assert_eq!(set, vec![NodeId(1), NodeId(2)]);
    }

    #[test]
    fn test_name_match_counts_as_vinyl() {
        let m = manager();
        assert!(m.is_vinyl_object(NodeId(9), "vinyl-cover"));
        assert!(m.is_vinyl_object(NodeId(9), "tone-arm-base"));
        assert!(m.is_vinyl_object(NodeId(2), "Cylinder.004"));
        assert!(!m.is_vinyl_object(NodeId(9), "Baked"));
    }

    #[test]
    fn test_spin_after_start() {
        let mut m = manager();
        m.handle_click();
        m.tick(&FrameInfo::new(1, 1.0, 1.0));
        assert!((m.pose().disc_y - PI / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_arm_reaches_play_position() {
        let mut m = manager();
        m.handle_click();
        m.tick(&FrameInfo::new(1, 3.0, 3.0));
        assert!((m.pose().arm_y - VinylPlayerManager::ARM_PLAY_Y).abs() < 1e-5);
        assert!((m.pose().arm_x - VinylPlayerManager::ARM_PLAY_X).abs() < 1e-5);
    }

    #[test]
    fn test_stop_returns_to_rest() {
        let mut m = manager();
        m.handle_click();
        m.tick(&FrameInfo::new(1, 5.0, 5.0));
        m.handle_click();
        m.tick(&FrameInfo::new(2, 8.0, 3.0));

        assert_eq!(m.pose(), VinylPose::default());
        assert_eq!(m.active_animations(), 0);
    }
}
