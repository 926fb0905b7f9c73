use super::{FrameHandle, FrameScheduler, PlaybackState, ScrollBounds, SpeedTable, SpeedTier};
use crate::{
    DurationStyle, get_readable_duration,
    key_handler::MoveDirection,
    player::{AudioOutput, VOLUME_FULL, VOLUME_MUTED},
};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Drives the auto-scrolling message.
///
/// Owns a single progress ratio and keeps three views of it in agreement:
/// - elapsed playback time (`progress × duration`)
/// - scroll offset of the message (`-progress × max_scroll`, in rows)
/// - progress bar fill (`progress × 100%`)
///
/// The background track is started and stopped alongside, but audio failures
/// are logged and never reach this state machine.
pub struct PlaybackController {
    state: PlaybackState,
    progress: f64,
    offset: f64,

    elapsed: Duration,
    // Instant at which `anchor_elapsed` was last true
    anchor: Option<Instant>,
    anchor_elapsed: Duration,

    tier: SpeedTier,
    speeds: SpeedTable,
    duration: Duration,
    rescale_on_speed_change: bool,

    bounds: ScrollBounds,
    drag: Option<DragGesture>,

    frames: FrameScheduler,
    frame: Option<FrameHandle>,
    restart_pending: bool,

    muted: bool,
    audio: Box<dyn AudioOutput>,
}

#[derive(Debug, Clone, Copy)]
struct DragGesture {
    origin_row: f64,
    origin_offset: f64,
}

/// Copy of everything the UI draws
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    pub progress: f64,
    pub scroll_row: u16,
    pub elapsed: Duration,
    pub duration: Duration,
    pub tier: SpeedTier,
    pub muted: bool,
}

impl PlaybackController {
    pub fn new(
        audio: Box<dyn AudioOutput>,
        speeds: SpeedTable,
        tier: SpeedTier,
        scroll_padding: u16,
    ) -> Self {
        PlaybackController {
            state: PlaybackState::Idle,
            progress: 0.0,
            offset: 0.0,

            elapsed: Duration::ZERO,
            anchor: None,
            anchor_elapsed: Duration::ZERO,

            tier,
            speeds,
            duration: speeds.duration(tier),
            rescale_on_speed_change: false,

            bounds: ScrollBounds::new(scroll_padding),
            drag: None,

            frames: FrameScheduler::new(),
            frame: None,
            restart_pending: false,

            muted: false,
            audio,
        }
    }

    /// Keep the visible progress when the speed changes instead of keeping
    /// the absolute elapsed time.
    pub fn rescale_on_speed_change(mut self, rescale: bool) -> Self {
        self.rescale_on_speed_change = rescale;
        self
    }
}

// =====================
//    PLAYBACK CONTROL
// =====================
impl PlaybackController {
    pub fn play(&mut self, now: Instant) {
        // Re-anchoring must not lose the time since the last frame
        if self.state == PlaybackState::Playing {
            self.sample(now);
        }

        if self.state == PlaybackState::Finished {
            self.reset();
        }

        self.cancel_frame();
        self.restart_pending = false;

        self.state = PlaybackState::Playing;
        self.anchor = Some(now);
        self.anchor_elapsed = self.elapsed;
        self.frame = Some(self.frames.request());

        info!(elapsed_ms = self.elapsed.as_millis() as u64, "playback started");

        if let Err(e) = self.audio.play() {
            warn!("Background audio could not start: {e}");
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if self.state == PlaybackState::Playing {
            self.sample(now);
            if self.state == PlaybackState::Playing {
                self.state = PlaybackState::Paused;
                info!(elapsed_ms = self.elapsed.as_millis() as u64, "playback paused");
            }
        }

        self.anchor = None;
        self.cancel_frame();
        self.audio.pause();
    }

    pub fn toggle_playback(&mut self, now: Instant) {
        match self.state {
            PlaybackState::Playing => self.pause(now),
            _ => self.play(now),
        }
    }

    pub fn reset(&mut self) {
        self.cancel_frame();
        self.restart_pending = false;
        self.drag = None;

        self.state = PlaybackState::Idle;
        self.anchor = None;
        self.elapsed = Duration::ZERO;
        self.apply_progress(0.0);

        self.audio.stop();
        debug!("playback reset");
    }

    /// Resets now and starts again on the next frame
    pub fn replay(&mut self) {
        self.reset();
        self.restart_pending = true;
    }

    /// Frame callback, invoked once per iteration of the UI loop
    pub fn tick(&mut self, now: Instant) {
        if self.restart_pending {
            self.play(now);
            return;
        }

        let Some(due) = self.frames.take_due() else {
            return;
        };

        // A frame we no longer own belongs to a loop that was stopped
        if self.frame != Some(due) {
            return;
        }
        self.frame = None;

        if self.state != PlaybackState::Playing {
            return;
        }

        self.sample(now);

        if self.state == PlaybackState::Playing {
            self.frame = Some(self.frames.request());
        }
    }

    pub fn set_speed(&mut self, tier: SpeedTier, now: Instant) {
        let was_playing = self.state == PlaybackState::Playing;
        if was_playing {
            self.pause(now);
        }

        let old_duration = self.duration;
        self.tier = tier;
        self.duration = self.speeds.duration(tier);

        if self.rescale_on_speed_change {
            self.elapsed = self.duration.mul_f64(self.ratio_of(self.elapsed, old_duration));
        }

        match self.state {
            PlaybackState::Finished => self.elapsed = self.duration,
            PlaybackState::Paused if self.elapsed >= self.duration => {
                self.elapsed = self.duration;
                self.state = PlaybackState::Finished;
            }
            _ => (),
        }
        self.apply_progress(self.ratio_of(self.elapsed, self.duration));

        let duration = get_readable_duration(self.duration, DurationStyle::Clean);
        info!(%tier, %duration, "speed changed");

        if was_playing && self.state != PlaybackState::Finished {
            self.restart_pending = true;
        }
    }

    pub fn cycle_speed(&mut self, dir: MoveDirection, now: Instant) {
        self.set_speed(self.tier.cycle(dir), now);
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.audio.set_volume(match self.muted {
            true => VOLUME_MUTED,
            false => VOLUME_FULL,
        });
    }
}

// ===============
//    SCRUBBING
// ===============
impl PlaybackController {
    /// Moves the message by `delta` rows; positive reads further down
    pub fn manual_scrub(&mut self, delta: f64, now: Instant) {
        let target = self.offset - delta;
        self.scrub_to(target, now);
    }

    pub fn scrub_to_start(&mut self, now: Instant) {
        self.scrub_to(0.0, now);
    }

    pub fn scrub_to_end(&mut self, now: Instant) {
        self.scrub_to(-self.bounds.max_scroll(), now);
    }

    pub fn begin_drag(&mut self, row: u16, now: Instant) {
        if self.state == PlaybackState::Playing {
            self.pause(now);
        }

        self.drag = Some(DragGesture {
            origin_row: row as f64,
            origin_offset: self.offset,
        });
    }

    pub fn drag_to(&mut self, row: u16, now: Instant) {
        if let Some(drag) = self.drag {
            let moved = drag.origin_row - row as f64;
            self.scrub_to(drag.origin_offset - moved, now);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn scrub_to(&mut self, offset: f64, now: Instant) {
        if self.state == PlaybackState::Playing {
            self.pause(now);
        }

        // Without any travel the offset is stuck at 0 and progress follows it
        let offset = self.bounds.clamp(offset);
        let progress = self.bounds.progress_for(offset);
        if offset == self.offset && progress == self.progress {
            return;
        }

        self.progress = progress;
        self.offset = offset;
        self.elapsed = self.duration.mul_f64(progress);

        // Idle and Finished both restart from zero on play; a moved message must not
        self.state = PlaybackState::Paused;
    }
}

// ============
//    LAYOUT
// ============
impl PlaybackController {
    pub fn recompute_bounds(&mut self, content_rows: usize, viewport_rows: u16) {
        if self.bounds.measure(content_rows, viewport_rows) {
            debug!(
                content_rows,
                viewport_rows,
                max_scroll = self.bounds.max_scroll(),
                "scroll bounds changed"
            );
            self.apply_progress(self.progress);
        }
    }
}

// ===============
//    ACCESSORS
// ===============
impl PlaybackController {
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress * 100.0
    }

    /// Vertical offset of the message, in `[-max_scroll, 0]`
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn scroll_row(&self) -> u16 {
        (-self.offset).round().clamp(0.0, u16::MAX as f64) as u16
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn tier(&self) -> SpeedTier {
        self.tier
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn max_scroll(&self) -> f64 {
        self.bounds.max_scroll()
    }

    pub fn restart_pending(&self) -> bool {
        self.restart_pending
    }

    pub fn has_scheduled_frame(&self) -> bool {
        self.frame.is_some()
    }

    pub fn outstanding_frames(&self) -> usize {
        self.frames.outstanding()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state,
            progress: self.progress,
            scroll_row: self.scroll_row(),
            elapsed: self.elapsed,
            duration: self.duration,
            tier: self.tier,
            muted: self.muted,
        }
    }
}

impl PlaybackController {
    fn sample(&mut self, now: Instant) {
        let Some(anchor) = self.anchor else {
            return;
        };

        self.elapsed = self.anchor_elapsed + now.saturating_duration_since(anchor);
        let progress = self.ratio_of(self.elapsed, self.duration);
        self.apply_progress(progress);

        if progress >= 1.0 {
            self.elapsed = self.duration;
            self.state = PlaybackState::Finished;
            self.anchor = None;
            self.cancel_frame();
            info!("playback finished");
        }
    }

    fn apply_progress(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, 1.0);
        self.offset = self.bounds.offset_for(self.progress);
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.frames.cancel(handle);
        }
    }

    fn ratio_of(&self, elapsed: Duration, duration: Duration) -> f64 {
        match duration.is_zero() {
            true => 1.0,
            false => (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::{cell::RefCell, rc::Rc};

    #[derive(Debug, PartialEq, Clone, Copy)]
    enum Call {
        Play,
        Pause,
        Stop,
        Volume(f32),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        fail_play: bool,
    }

    #[derive(Clone, Default)]
    struct MockAudio(Rc<RefCell<Recorder>>);

    impl AudioOutput for MockAudio {
        fn play(&mut self) -> anyhow::Result<()> {
            let mut rec = self.0.borrow_mut();
            rec.calls.push(Call::Play);
            match rec.fail_play {
                true => Err(anyhow!("autoplay blocked")),
                false => Ok(()),
            }
        }

        fn pause(&mut self) {
            self.0.borrow_mut().calls.push(Call::Pause);
        }

        fn stop(&mut self) {
            self.0.borrow_mut().calls.push(Call::Stop);
        }

        fn set_volume(&mut self, volume: f32) {
            self.0.borrow_mut().calls.push(Call::Volume(volume));
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Normal tier, 1000 rows of travel
    fn controller() -> (PlaybackController, MockAudio) {
        let audio = MockAudio::default();
        let mut ctl = PlaybackController::new(
            Box::new(audio.clone()),
            SpeedTable::default(),
            SpeedTier::Normal,
            0,
        );
        ctl.recompute_bounds(1040, 40);
        (ctl, audio)
    }

    fn assert_views_agree(ctl: &PlaybackController) {
        let expected = ctl.elapsed().as_secs_f64() / ctl.duration().as_secs_f64();
        assert!((ctl.progress() - expected.min(1.0)).abs() < 1e-9);
        assert!((ctl.offset() + ctl.progress() * ctl.max_scroll()).abs() < 1e-9);
        assert!((ctl.progress_percent() - ctl.progress() * 100.0).abs() < 1e-9);
    }

    #[test]
    fn halfway_through_normal_tier() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.tick(t0 + ms(45_000));

        assert_eq!(ctl.state(), PlaybackState::Playing);
        assert_eq!(ctl.offset(), -500.0);
        assert_eq!(ctl.progress_percent(), 50.0);
        assert_eq!(ctl.scroll_row(), 500);
    }

    #[test]
    fn views_agree_for_every_tier() {
        for tier in SpeedTier::ALL {
            let (mut ctl, _) = controller();
            let t0 = Instant::now();
            ctl.set_speed(tier, t0);
            let duration = ctl.duration();
            ctl.play(t0);

            for step in 0..=10u32 {
                ctl.tick(t0 + duration * step / 10);
                assert_views_agree(&ctl);
            }

            assert_eq!(ctl.state(), PlaybackState::Finished);
            assert_eq!(ctl.offset(), -1000.0);
            assert_eq!(ctl.progress(), 1.0);
            assert_eq!(ctl.elapsed(), duration);
        }
    }

    #[test]
    fn finishing_stops_the_frame_loop() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.tick(t0 + ms(95_000));

        assert_eq!(ctl.state(), PlaybackState::Finished);
        assert!(!ctl.has_scheduled_frame());
        assert_eq!(ctl.outstanding_frames(), 0);
        assert_eq!(ctl.elapsed(), ms(90_000));

        // Further frames change nothing
        ctl.tick(t0 + ms(120_000));
        assert_eq!(ctl.state(), PlaybackState::Finished);
    }

    #[test]
    fn play_on_finished_equals_reset_then_play() {
        let t0 = Instant::now();
        let restart = t0 + ms(100_000);

        let (mut finished, _) = controller();
        finished.play(t0);
        finished.tick(t0 + ms(90_000));
        assert_eq!(finished.state(), PlaybackState::Finished);
        finished.play(restart);

        let (mut fresh, _) = controller();
        fresh.play(t0);
        fresh.tick(t0 + ms(90_000));
        fresh.reset();
        fresh.play(restart);

        assert_eq!(finished.snapshot(), fresh.snapshot());
        assert_eq!(finished.elapsed(), Duration::ZERO);

        let later = restart + ms(9_000);
        finished.tick(later);
        fresh.tick(later);
        assert_eq!(finished.snapshot(), fresh.snapshot());
        assert_eq!(finished.progress_percent(), 10.0);
    }

    #[test]
    fn pause_then_play_keeps_elapsed() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();
        let t1 = t0 + ms(12_345);

        ctl.play(t0);
        ctl.tick(t0 + ms(10_000));
        ctl.pause(t1);
        let paused_at = ctl.elapsed();
        assert_eq!(paused_at, ms(12_345));
        assert_eq!(ctl.state(), PlaybackState::Paused);

        ctl.play(t1);
        assert_eq!(ctl.elapsed(), paused_at);

        ctl.tick(t1);
        assert_eq!(ctl.elapsed(), paused_at);
        assert_views_agree(&ctl);
    }

    #[test]
    fn time_spent_paused_is_not_counted() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.pause(t0 + ms(9_000));
        ctl.play(t0 + ms(60_000));
        ctl.tick(t0 + ms(69_000));

        assert_eq!(ctl.elapsed(), ms(18_000));
        assert_eq!(ctl.progress_percent(), 20.0);
    }

    #[test]
    fn pause_is_harmless_when_not_playing() {
        let (mut ctl, audio) = controller();
        let t0 = Instant::now();

        ctl.pause(t0);
        ctl.pause(t0);
        assert_eq!(ctl.state(), PlaybackState::Idle);
        assert_eq!(ctl.progress(), 0.0);

        ctl.play(t0);
        ctl.pause(t0 + ms(1_000));
        ctl.pause(t0 + ms(5_000));
        assert_eq!(ctl.state(), PlaybackState::Paused);
        assert_eq!(ctl.elapsed(), ms(1_000));

        let pauses = audio.0.borrow().calls.iter().filter(|c| **c == Call::Pause).count();
        assert_eq!(pauses, 4);
    }

    #[test]
    fn scrub_clamps_to_bounds() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.manual_scrub(-50.0, t0);
        assert_eq!(ctl.offset(), 0.0);
        assert_eq!(ctl.state(), PlaybackState::Idle);

        ctl.manual_scrub(5_000.0, t0);
        assert_eq!(ctl.offset(), -1000.0);
        assert_eq!(ctl.progress(), 1.0);
        assert_eq!(ctl.elapsed(), ms(90_000));

        ctl.manual_scrub(-250.0, t0);
        assert_eq!(ctl.offset(), -750.0);
        assert_eq!(ctl.progress_percent(), 75.0);
        assert_eq!(ctl.elapsed(), ms(67_500));

        ctl.manual_scrub(-10_000.0, t0);
        assert_eq!(ctl.offset(), 0.0);
        assert_eq!(ctl.elapsed(), Duration::ZERO);
    }

    #[test]
    fn scrub_pauses_and_play_resumes_from_there() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.tick(t0 + ms(9_000));
        ctl.manual_scrub(200.0, t0 + ms(9_000));

        assert_eq!(ctl.state(), PlaybackState::Paused);
        assert_eq!(ctl.offset(), -300.0);
        assert_eq!(ctl.elapsed(), ms(27_000));
        assert!(!ctl.has_scheduled_frame());

        let t1 = t0 + ms(20_000);
        ctl.play(t1);
        ctl.tick(t1 + ms(9_000));
        assert_eq!(ctl.offset(), -400.0);
    }

    #[test]
    fn scrubbing_back_from_finished_resumes_instead_of_restarting() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.tick(t0 + ms(90_000));
        assert_eq!(ctl.state(), PlaybackState::Finished);

        ctl.manual_scrub(-100.0, t0);
        assert_eq!(ctl.state(), PlaybackState::Paused);

        ctl.play(t0);
        assert_eq!(ctl.elapsed(), ms(81_000));
    }

    #[test]
    fn drag_follows_pointer_relative_to_origin() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.tick(t0 + ms(9_000));
        ctl.begin_drag(20, t0 + ms(9_000));
        assert_eq!(ctl.state(), PlaybackState::Paused);

        // Dragging upward reads further into the message
        ctl.drag_to(10, t0);
        assert_eq!(ctl.offset(), -110.0);
        ctl.drag_to(25, t0);
        assert_eq!(ctl.offset(), -95.0);
        ctl.drag_to(u16::MAX, t0);
        assert_eq!(ctl.offset(), 0.0);

        ctl.end_drag();
        ctl.drag_to(0, t0);
        assert_eq!(ctl.offset(), 0.0);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn speed_change_keeps_absolute_elapsed() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.pause(t0 + ms(20_000));
        assert!((ctl.progress_percent() - 22.222).abs() < 0.001);

        ctl.set_speed(SpeedTier::Fast, t0 + ms(20_000));
        assert_eq!(ctl.elapsed(), ms(20_000));
        assert_eq!(ctl.progress_percent(), 50.0);
        assert_eq!(ctl.offset(), -500.0);

        let t1 = t0 + ms(30_000);
        ctl.play(t1);
        ctl.tick(t1);
        assert_eq!(ctl.progress_percent(), 50.0);
    }

    #[test]
    fn speed_change_while_playing_restarts_on_next_frame() {
        let (mut ctl, audio) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.tick(t0 + ms(10_000));
        ctl.set_speed(SpeedTier::Fast, t0 + ms(20_000));

        assert_eq!(ctl.state(), PlaybackState::Paused);
        assert!(ctl.restart_pending());
        assert_eq!(ctl.outstanding_frames(), 0);

        ctl.tick(t0 + ms(20_016));
        assert_eq!(ctl.state(), PlaybackState::Playing);
        assert!(!ctl.restart_pending());
        assert_eq!(ctl.outstanding_frames(), 1);

        ctl.tick(t0 + ms(30_016));
        assert_eq!(ctl.elapsed(), ms(30_000));
        assert_eq!(ctl.progress_percent(), 75.0);

        let calls = audio.0.borrow().calls.clone();
        assert_eq!(calls, vec![Call::Play, Call::Pause, Call::Play]);
    }

    #[test]
    fn speed_change_can_preserve_progress() {
        let (ctl, _) = controller();
        let mut ctl = ctl.rescale_on_speed_change(true);
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.pause(t0 + ms(45_000));
        ctl.set_speed(SpeedTier::Fast, t0 + ms(45_000));

        assert_eq!(ctl.elapsed(), ms(20_000));
        assert_eq!(ctl.progress_percent(), 50.0);
    }

    #[test]
    fn slower_speed_on_finished_stays_finished() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.tick(t0 + ms(90_000));
        ctl.set_speed(SpeedTier::Slow, t0 + ms(90_000));

        assert_eq!(ctl.state(), PlaybackState::Finished);
        assert_eq!(ctl.elapsed(), ms(280_000));
        assert_eq!(ctl.progress(), 1.0);
    }

    #[test]
    fn faster_speed_past_the_end_finishes() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.pause(t0 + ms(60_000));
        ctl.set_speed(SpeedTier::VeryFast, t0 + ms(60_000));

        assert_eq!(ctl.state(), PlaybackState::Finished);
        assert_eq!(ctl.progress(), 1.0);
        assert!(!ctl.restart_pending());
    }

    #[test]
    fn mute_twice_restores_volume() {
        let (mut ctl, audio) = controller();
        let t0 = Instant::now();
        ctl.play(t0);

        ctl.toggle_mute();
        assert!(ctl.muted());
        assert_eq!(ctl.state(), PlaybackState::Playing);

        ctl.toggle_mute();
        assert!(!ctl.muted());

        let volumes = audio
            .0
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Volume(v) => Some(*v),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(volumes, vec![VOLUME_MUTED, VOLUME_FULL]);
    }

    #[test]
    fn mute_survives_pause_and_resume() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.toggle_mute();
        ctl.play(t0);
        ctl.pause(t0 + ms(100));
        ctl.play(t0 + ms(200));
        assert!(ctl.muted());
    }

    #[test]
    fn reset_from_any_state() {
        let t0 = Instant::now();
        let setups: [fn(&mut PlaybackController, Instant); 4] = [
            |_, _| (),
            |c, t| {
                c.play(t);
                c.tick(t + ms(30_000));
            },
            |c, t| {
                c.play(t);
                c.pause(t + ms(30_000));
            },
            |c, t| {
                c.play(t);
                c.tick(t + ms(90_000));
            },
        ];

        for setup in setups {
            let (mut ctl, audio) = controller();
            setup(&mut ctl, t0);
            ctl.reset();

            assert_eq!(ctl.state(), PlaybackState::Idle);
            assert_eq!(ctl.state().label(), "Paused");
            assert_eq!(ctl.progress_percent(), 0.0);
            assert_eq!(ctl.offset(), 0.0);
            assert_eq!(ctl.elapsed(), Duration::ZERO);
            assert_eq!(ctl.outstanding_frames(), 0);
            assert_eq!(audio.0.borrow().calls.last(), Some(&Call::Stop));
        }
    }

    #[test]
    fn replay_restarts_on_next_frame() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.tick(t0 + ms(90_000));
        ctl.replay();

        assert_eq!(ctl.state(), PlaybackState::Idle);
        assert!(ctl.restart_pending());

        let t1 = t0 + ms(100_000);
        ctl.tick(t1);
        assert_eq!(ctl.state(), PlaybackState::Playing);

        ctl.tick(t1 + ms(4_500));
        assert_eq!(ctl.progress_percent(), 5.0);
    }

    #[test]
    fn replay_mid_scroll_starts_over() {
        let (mut ctl, audio) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.tick(t0 + ms(45_000));
        assert_eq!(ctl.state(), PlaybackState::Playing);
        audio.0.borrow_mut().calls.clear();

        ctl.replay();
        assert_eq!(audio.0.borrow().calls, vec![Call::Stop]);
        assert_eq!(ctl.elapsed(), Duration::ZERO);
        assert_eq!(ctl.offset(), 0.0);
        assert!(!ctl.has_scheduled_frame());

        let t1 = t0 + ms(46_000);
        ctl.tick(t1);
        assert_eq!(ctl.state(), PlaybackState::Playing);
        assert_eq!(ctl.outstanding_frames(), 1);

        ctl.tick(t1 + ms(9_000));
        assert_eq!(ctl.progress_percent(), 10.0);
    }

    #[test]
    fn play_while_playing_keeps_time_since_last_frame() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.tick(t0 + ms(9_000));
        ctl.play(t0 + ms(9_020));
        assert_eq!(ctl.elapsed(), ms(9_020));
        assert_eq!(ctl.outstanding_frames(), 1);

        ctl.tick(t0 + ms(18_000));
        assert_eq!(ctl.elapsed(), ms(18_000));
        assert_eq!(ctl.progress_percent(), 20.0);
    }

    #[test]
    fn reset_cancels_a_pending_replay() {
        let (mut ctl, _) = controller();
        ctl.replay();
        ctl.reset();
        ctl.tick(Instant::now());
        assert_eq!(ctl.state(), PlaybackState::Idle);
    }

    #[test]
    fn never_more_than_one_frame_loop() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.play(t0 + ms(10));
        ctl.play(t0 + ms(20));
        assert_eq!(ctl.outstanding_frames(), 1);

        ctl.tick(t0 + ms(30));
        ctl.replay();
        ctl.tick(t0 + ms(40));
        ctl.set_speed(SpeedTier::Fast, t0 + ms(50));
        ctl.tick(t0 + ms(60));
        ctl.toggle_playback(t0 + ms(70));
        ctl.toggle_playback(t0 + ms(80));
        assert!(ctl.outstanding_frames() <= 1);
        assert_eq!(ctl.state(), PlaybackState::Playing);
        assert_eq!(ctl.outstanding_frames(), 1);
    }

    #[test]
    fn audio_failure_does_not_stop_the_scroll() {
        let (mut ctl, audio) = controller();
        audio.0.borrow_mut().fail_play = true;
        let t0 = Instant::now();

        ctl.play(t0);
        assert_eq!(ctl.state(), PlaybackState::Playing);

        ctl.tick(t0 + ms(18_000));
        assert_eq!(ctl.progress_percent(), 20.0);
        assert!(ctl.has_scheduled_frame());
    }

    #[test]
    fn resize_keeps_progress_and_moves_offset() {
        let (mut ctl, _) = controller();
        let t0 = Instant::now();

        ctl.play(t0);
        ctl.tick(t0 + ms(45_000));
        ctl.recompute_bounds(440, 40);

        assert_eq!(ctl.max_scroll(), 400.0);
        assert_eq!(ctl.progress_percent(), 50.0);
        assert_eq!(ctl.offset(), -200.0);
    }

    #[test]
    fn no_travel_pins_everything_to_zero_offset() {
        let audio = MockAudio::default();
        let mut ctl = PlaybackController::new(
            Box::new(audio),
            SpeedTable::default(),
            SpeedTier::Fast,
            0,
        );
        ctl.recompute_bounds(5, 40);
        let t0 = Instant::now();

        ctl.manual_scrub(10.0, t0);
        assert_eq!(ctl.offset(), 0.0);
        assert_eq!(ctl.state(), PlaybackState::Idle);

        // A scrub mid-traversal drops progress and elapsed back to the offset
        ctl.play(t0);
        ctl.tick(t0 + ms(20_000));
        assert_eq!(ctl.progress(), 0.5);

        ctl.manual_scrub(3.0, t0 + ms(20_000));
        assert_eq!(ctl.state(), PlaybackState::Paused);
        assert_eq!(ctl.progress(), 0.0);
        assert_eq!(ctl.elapsed(), Duration::ZERO);
        assert_eq!(ctl.offset(), 0.0);

        // Time still runs and finishes even with nothing to scroll
        ctl.play(t0);
        ctl.tick(t0 + ms(40_000));
        assert_eq!(ctl.state(), PlaybackState::Finished);
        assert_eq!(ctl.offset(), 0.0);
    }
}
