//! Time-boxed property tweening.
//!
//! An [`Animation`] holds no animated value of its own. Every step it hands
//! its owner and a progress in `[0, 1]` to a callback, and once the clock
//! passes `start + duration` it calls its finish callback exactly once and
//! reports itself finished so the owner can drop it.

use std::fmt;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Progress passes through unchanged.
    #[default]
    Linear,
    /// Quadratic ease-out.
    QuadOut,
    /// Exponential ease-out: `1 - 2^(-10t)`.
    ExponentialOut,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
        }
    }
}

type StepFn<T> = Box<dyn FnMut(&mut T, f32)>;
type FinishFn<T> = Box<dyn FnOnce(&mut T)>;

/// A tween driving callbacks on an owner of type `T`.
pub struct Animation<T: ?Sized> {
    start: u64,
    duration: u64,
    easing: Easing,
    on_step: Option<StepFn<T>>,
    on_finish: Option<FinishFn<T>>,
}

impl<T: ?Sized> Animation<T> {
    /// Creates an animation starting at tick `start` and lasting `duration` ms.
    #[must_use]
    pub fn new(start: u64, duration: u64) -> Self {
        Self {
            start,
            duration,
            easing: Easing::Linear,
            on_step: None,
            on_finish: None,
        }
    }

    /// Sets the callback run on every step before expiry.
    #[must_use]
    pub fn on_step(mut self, step: impl FnMut(&mut T, f32) + 'static) -> Self {
        self.on_step = Some(Box::new(step));
        self
    }

    /// Sets the callback run once on expiry.
    #[must_use]
    pub fn on_finish(mut self, finish: impl FnOnce(&mut T) + 'static) -> Self {
        self.on_finish = Some(Box::new(finish));
        self
    }

    /// Sets the easing applied to progress before it reaches `on_step`.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Returns the start tick.
    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Returns the duration in ms.
    #[must_use]
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Returns true once `now` is past the end of the animation.
    #[must_use]
    pub fn is_finished(&self, now: u64) -> bool {
        now > self.start.saturating_add(self.duration)
    }

    /// Returns the raw progress at `now`, clamped to `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self, now: u64) -> f32 {
        if self.duration == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed as f32 / self.duration as f32).min(1.0)
    }

    /// Advances the animation to `now`.
    ///
    /// Returns true when the animation has finished; the finish callback has
    /// then run and the caller should drop the animation. Stepping a finished
    /// animation again is harmless and returns true without side effects.
    pub fn step(&mut self, now: u64, target: &mut T) -> bool {
        if self.is_finished(now) {
            if let Some(finish) = self.on_finish.take() {
                finish(target);
            }
            self.on_step = None;
            return true;
        }

        let progress = self.easing.apply(self.progress(now));
        if let Some(step) = self.on_step.as_mut() {
            step(target, progress);
        }
        false
    }
}

impl<T: ?Sized> fmt::Debug for Animation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("start", &self.start)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("has_step", &self.on_step.is_some())
            .field("has_finish", &self.on_finish.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        steps: Vec<f32>,
        finished: u32,
    }

    fn probe_animation(start: u64, duration: u64) -> Animation<Probe> {
        Animation::new(start, duration)
            .on_step(|probe: &mut Probe, t| probe.steps.push(t))
            .on_finish(|probe: &mut Probe| probe.finished += 1)
    }

    #[test]
    fn test_lifecycle_steps_then_finishes_once() {
        let mut probe = Probe::default();
        let mut anim = probe_animation(1000, 200);

        assert!(!anim.step(1000, &mut probe));
        assert!(!anim.step(1100, &mut probe));
        assert!(!anim.step(1199, &mut probe));
        assert_eq!(probe.finished, 0);
        assert!(anim.step(1201, &mut probe));
        assert!(anim.step(1300, &mut probe));

        assert_eq!(probe.steps.len(), 3);
        assert!(probe.steps[0].abs() < f32::EPSILON);
        assert!((probe.steps[1] - 0.5).abs() < f32::EPSILON);
        assert!(probe.steps[2] > 0.99 && probe.steps[2] < 1.0);
        assert_eq!(probe.finished, 1);
    }

    #[test]
    fn test_end_tick_itself_still_steps() {
        let mut probe = Probe::default();
        let mut anim = probe_animation(0, 100);

        assert!(!anim.step(100, &mut probe));
        assert!((probe.steps[0] - 1.0).abs() < f32::EPSILON);
        assert_eq!(probe.finished, 0);
    }

    #[test]
    fn test_elapsed_before_first_step_still_finishes() {
        let mut probe = Probe::default();
        let mut anim = probe_animation(0, 10);

        assert!(anim.step(5000, &mut probe));
        assert!(probe.steps.is_empty());
        assert_eq!(probe.finished, 1);
    }

    #[test]
    fn test_zero_duration_reports_full_progress() {
        let anim: Animation<Probe> = Animation::new(50, 0);
        assert!((anim.progress(50) - 1.0).abs() < f32::EPSILON);
        assert!(!anim.is_finished(50));
        assert!(anim.is_finished(51));
    }

    #[test]
    fn test_step_before_start_is_zero() {
        let anim: Animation<Probe> = Animation::new(100, 50);
        assert!(anim.progress(20).abs() < f32::EPSILON);
    }

    #[test]
    fn test_exponential_out_is_sharp() {
        let value = Easing::ExponentialOut.apply(0.3);
        assert!(value > 0.8, "exponential out should snap quickly: {value}");
        assert!((Easing::QuadOut.apply(0.5) - 0.75).abs() < f32::EPSILON);
        assert!((Easing::Linear.apply(2.0) - 1.0).abs() < f32::EPSILON);
    }
}
