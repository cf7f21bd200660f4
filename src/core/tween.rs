//! Time-based property animation.
//!
//! A [`TweenSet`] owns running animations over numeric channels identified by
//! a small key type. Each running entry is a timeline of one or more steps
//! played back to back; the start value of a step is captured from the target
//! when its delay has elapsed, so chained steps continue from wherever the
//! property currently is. Handles can be killed at any time; a killed
//! animation leaves the property at its last written value.

/// Easing curves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out
    Power1Out,
    /// Cubic ease-in
    Power2In,
    /// Cubic ease-out
    Power2Out,
    /// Cubic ease-in-out
    Power2InOut,
    /// Overshooting ease-out with the given overshoot amount
    BackOut(f32),
}

impl Ease {
    /// Map linear progress `t` in [0, 1] to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power2In => t * t * t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::BackOut(overshoot) => {
                let p = t - 1.0;
                p * p * ((overshoot + 1.0) * p + overshoot) + 1.0
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Never,
    Forever,
}

/// One animation step toward `to` on channel `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<K> {
    pub target: K,
    pub to: f32,
    pub duration: f32,
    pub delay: f32,
    pub ease: Ease,
    pub repeat: Repeat,
}

impl<K> Tween<K> {
    pub fn to(target: K, value: f32, duration: f32) -> Self {
        Self {
            target,
            to: value,
            duration,
            delay: 0.0,
            ease: Ease::Power1Out,
            repeat: Repeat::Never,
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }

    pub fn repeat_forever(mut self) -> Self {
        self.repeat = Repeat::Forever;
        self
    }
}

/// Something with numeric channels a tween can drive
pub trait Animatable<K> {
    fn get(&self, key: K) -> f32;
    fn set(&mut self, key: K, value: f32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenHandle(u64);

#[derive(Debug, Clone)]
struct Running<K> {
    handle: TweenHandle,
    steps: Vec<Tween<K>>,
    index: usize,
    elapsed: f32,
    from: Option<f32>,
}

impl<K: Copy> Running<K> {
    /// Advance by `dt`, returns true once every step has completed
    fn advance<T: Animatable<K>>(&mut self, mut dt: f32, target: &mut T) -> bool {
        loop {
            let step = self.steps[self.index];
            let local = self.elapsed + dt;

            if local < step.delay {
                self.elapsed = local;
                return false;
            }

            let from = *self.from.get_or_insert_with(|| target.get(step.target));
            let end = step.delay + step.duration;

            if step.duration > 0.0 && local < end {
                let progress = (local - step.delay) / step.duration;
                target.set(step.target, from + (step.to - from) * step.ease.apply(progress));
                self.elapsed = local;
                return false;
            }

            if step.repeat == Repeat::Forever && step.duration > 0.0 {
                let into = (local - step.delay) % step.duration;
                let eased = step.ease.apply(into / step.duration);
                target.set(step.target, from + (step.to - from) * eased);
                self.elapsed = step.delay + into;
                return false;
            }

            target.set(step.target, step.to);
            dt = local - end;
            self.index += 1;
            self.elapsed = 0.0;
            self.from = None;

            if self.index >= self.steps.len() {
                return true;
            }
        }
    }
}

/// Set of running animations over channels of type `K`
#[derive(Debug, Clone)]
pub struct TweenSet<K> {
    next_handle: u64,
    running: Vec<Running<K>>,
}

impl<K: Copy> TweenSet<K> {
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            running: Vec::new(),
        }
    }

    /// Start a single tween
    pub fn to(&mut self, tween: Tween<K>) -> TweenHandle {
        self.timeline(vec![tween])
    }

    /// Start a sequence of tweens played one after another
    pub fn timeline(&mut self, steps: Vec<Tween<K>>) -> TweenHandle {
        let handle = TweenHandle(self.next_handle);
        self.next_handle += 1;
        if !steps.is_empty() {
            self.running.push(Running {
                handle,
                steps,
                index: 0,
                elapsed: 0.0,
                from: None,
            });
        }
        handle
    }

    /// Stop an animation where it is; returns false if it already finished
    pub fn kill(&mut self, handle: TweenHandle) -> bool {
        let before = self.running.len();
        self.running.retain(|r| r.handle != handle);
        self.running.len() != before
    }

    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.running.iter().any(|r| r.handle == handle)
    }

    pub fn active_count(&self) -> usize {
        self.running.len()
    }

    pub fn clear(&mut self) {
        self.running.clear();
    }

    /// Advance every running animation in start order
    pub fn advance<T: Animatable<K>>(&mut self, delta: f32, target: &mut T) {
        self.running.retain_mut(|run| !run.advance(delta, target));
    }
}

impl<K: Copy> Default for TweenSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Axis {
        X,
        Y,
    }

    #[derive(Default)]
    struct Pose {
        x: f32,
        y: f32,
    }

    impl Animatable<Axis> for Pose {
        fn get(&self, key: Axis) -> f32 {
            match key {
                Axis::X => self.x,
                Axis::Y => self.y,
            }
        }

        fn set(&mut self, key: Axis, value: f32) {
            match key {
                Axis::X => self.x = value,
                Axis::Y => self.y = value,
            }
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn ease_endpoints() {
        for ease in [
            Ease::Linear,
            Ease::Power1Out,
            Ease::Power2In,
            Ease::Power2Out,
            Ease::Power2InOut,
            Ease::BackOut(2.0),
        ] {
            assert!(close(ease.apply(0.0), 0.0), "{:?}", ease);
            assert!(close(ease.apply(1.0), 1.0), "{:?}", ease);
        }
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BackOut(2.0).apply(i as f32 / 100.0))
            .fold(0.0f32, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn power2_in_out_is_symmetric() {
        assert!(close(Ease::Power2InOut.apply(0.5), 0.5));
        assert!(close(
            Ease::Power2InOut.apply(0.25),
            1.0 - Ease::Power2InOut.apply(0.75)
        ));
    }

    #[test]
    fn linear_tween_reaches_target_and_finishes() {
        let mut pose = Pose::default();
        let mut tweens = TweenSet::new();
        let handle = tweens.to(Tween::to(Axis::X, 2.0, 1.0).ease(Ease::Linear));

        tweens.advance(0.5, &mut pose);
        assert!(close(pose.x, 1.0));
        assert!(tweens.is_active(handle));

        tweens.advance(0.75, &mut pose);
        assert_eq!(pose.x, 2.0);
        assert!(!tweens.is_active(handle));
    }

    #[test]
    fn delay_holds_value_until_elapsed() {
        let mut pose = Pose { x: 1.0, y: 0.0 };
        let mut tweens = TweenSet::new();
        tweens.to(Tween::to(Axis::X, 0.0, 1.0).ease(Ease::Linear).delay(1.0));

        tweens.advance(0.9, &mut pose);
        assert_eq!(pose.x, 1.0);

        tweens.advance(0.6, &mut pose);
        assert!(close(pose.x, 0.5));
    }

    #[test]
    fn start_value_is_captured_after_delay() {
        let mut pose = Pose::default();
        let mut tweens = TweenSet::new();
        tweens.to(Tween::to(Axis::X, 10.0, 1.0).ease(Ease::Linear).delay(0.5));

        tweens.advance(0.25, &mut pose);
        pose.x = 6.0;
        tweens.advance(0.75, &mut pose);
        assert!(close(pose.x, 8.0));
    }

    #[test]
    fn repeat_forever_wraps() {
        let mut pose = Pose::default();
        let mut tweens = TweenSet::new();
        let handle = tweens.to(Tween::to(Axis::Y, 4.0, 4.0).ease(Ease::Linear).repeat_forever());

        tweens.advance(5.0, &mut pose);
        assert!(close(pose.y, 1.0));
        tweens.advance(100.0, &mut pose);
        assert!(tweens.is_active(handle));
        assert!(pose.y >= 0.0 && pose.y < 4.0);
    }

    #[test]
    fn timeline_runs_steps_in_order() {
        let mut pose = Pose::default();
        let mut tweens = TweenSet::new();
        tweens.timeline(vec![
            Tween::to(Axis::Y, -1.0, 2.0).ease(Ease::Linear),
            Tween::to(Axis::X, 1.0, 1.0).ease(Ease::Linear),
        ]);

        tweens.advance(1.0, &mut pose);
        assert!(close(pose.y, -0.5));
        assert_eq!(pose.x, 0.0);

        // Overflow from the first step carries into the second
        tweens.advance(1.5, &mut pose);
        assert_eq!(pose.y, -1.0);
        assert!(close(pose.x, 0.5));

        tweens.advance(1.0, &mut pose);
        assert_eq!(pose.x, 1.0);
        assert_eq!(tweens.active_count(), 0);
    }

    #[test]
    fn kill_stops_writes() {
        let mut pose = Pose::default();
        let mut tweens = TweenSet::new();
        let handle = tweens.to(Tween::to(Axis::X, 1.0, 1.0).ease(Ease::Linear));

        tweens.advance(0.5, &mut pose);
        assert!(tweens.kill(handle));
        assert!(!tweens.kill(handle));

        tweens.advance(1.0, &mut pose);
        assert!(close(pose.x, 0.5));
    }

    #[test]
    fn overlapping_tweens_last_started_wins() {
        let mut pose = Pose::default();
        let mut tweens = TweenSet::new();
        tweens.to(Tween::to(Axis::X, 1.0, 1.0).ease(Ease::Linear));
        tweens.to(Tween::to(Axis::X, 0.0, 1.0).ease(Ease::Linear));

        tweens.advance(2.0, &mut pose);
        assert_eq!(pose.x, 0.0);
    }

    #[test]
    fn empty_timeline_is_never_active() {
        let mut tweens: TweenSet<Axis> = TweenSet::new();
        let handle = tweens.timeline(Vec::new());
        assert!(!tweens.is_active(handle));
    }
}
