mod common;

use common::frames;
use cozy_room::managers::OverlayManager;
use cozy_room::pipeline::FrameTickable;

fn run(overlay: &mut OverlayManager, start: f32, seconds: f32) {
    for frame in frames(start, seconds) {
        overlay.tick(&frame);
    }
}

#[cfg(test)]
mod loading_tests {
    use super::*;

    #[test]
    fn test_starts_fully_covered() {
        let overlay = OverlayManager::new();

        assert_eq!(overlay.alpha(), 1.0);
        assert_eq!(overlay.uniforms().alpha, 1.0);
        assert_eq!(overlay.progress(), Some(0.0));
        assert!(!overlay.is_panel_visible(), "Panel stays hidden while loading");
    }

    #[test]
    fn test_progress_tracks_ratio() {
        let mut overlay = OverlayManager::new();

        overlay.on_progress(1, 4);
        assert_eq!(overlay.progress(), Some(0.25));

        overlay.on_progress(4, 4);
        assert_eq!(overlay.progress(), Some(1.0));
    }

    #[test]
    fn test_nothing_fades_before_completion() {
        let mut overlay = OverlayManager::new();
        overlay.on_progress(2, 4);

        run(&mut overlay, 0.0, 10.0);

        assert_eq!(overlay.alpha(), 1.0);
        assert!(!overlay.is_bar_ended());
    }
}

#[cfg(test)]
mod reveal_tests {
    use super::*;

    fn completed() -> OverlayManager {
        let mut overlay = OverlayManager::new();
        overlay.on_progress(4, 4);
        assert!(overlay.on_load_complete());
        overlay
    }

    #[test]
    fn test_bar_ends_after_reveal_delay() {
        let mut overlay = completed();

        run(&mut overlay, 0.0, 0.4);
        assert!(!overlay.is_bar_ended(), "Reveal waits {}s", OverlayManager::REVEAL_DELAY);

        run(&mut overlay, 0.4, 0.2);
        assert!(overlay.is_bar_ended());
        assert!(overlay.is_panel_visible());
        assert_eq!(overlay.progress(), None, "Progress transform is cleared");
    }

    #[test]
    fn test_fade_holds_then_clears() {
        let mut overlay = completed();

        run(&mut overlay, 0.0, 1.4);
        assert!(
            (overlay.alpha() - 1.0).abs() < 1e-4,
            "Fade is delayed by {}s",
            OverlayManager::FADE_DELAY
        );

        run(&mut overlay, 1.4, 1.5);
        let mid = overlay.alpha();
        assert!(mid > 0.0 && mid < 1.0, "Alpha should be mid-fade, got {}", mid);

        run(&mut overlay, 2.9, 2.0);
        assert!(overlay.alpha() <= 1e-4);
        assert!(overlay.is_finished());
    }

    #[test]
    fn test_bar_collapses() {
        let mut overlay = completed();

        run(&mut overlay, 0.0, 0.5 + OverlayManager::BAR_COLLAPSE_SECONDS + 0.1);

        assert!(overlay.look().bar_visibility.abs() < 1e-4);
    }

    #[test]
    fn test_second_completion_is_ignored() {
        let mut overlay = completed();
        run(&mut overlay, 0.0, 1.0);

        assert!(!overlay.on_load_complete(), "Only the first completion schedules a fade");
        run(&mut overlay, 1.0, 5.0);

        assert_eq!(overlay.fade_starts(), 1);
    }
}
