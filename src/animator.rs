//! Timer-driven execution of count-up runs.
//!
//! The [`Animator`] owns a single-threaded calloop event loop. Every run gets
//! its own repeating [`Timer`] source that fires once per tick interval,
//! advances the run and writes the rendered value into its surface. The timer
//! drops itself on the tick that snaps to the target. Runs never share state
//! beyond the index of which surface is currently animating.
//!
//! ```ignore
//! let mut animator = Animator::new()?;
//! let balance = Label::new("$1,234.50");
//!
//! animator.animate(&balance, 1234.5, CountUpOptions::balance())?;
//! animator.run_until_idle(Duration::from_secs(2))?;
//! assert_eq!(balance.text(), "$1,234.50");
//! ```

use std::collections::HashMap;
use std::time::{Duration, Instant};

use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop, RegistrationToken};

use crate::animation::{CountUp, CountUpOptions, Tick};
use crate::error::Result;
use crate::format::Formatter;
use crate::surface::{SurfaceFlags, SurfaceId, TextSurface};

/// What happens when a surface that is still animating is animated again
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Reinvoke {
    /// Cancel the running animation and start over from zero
    #[default]
    Restart,
    /// Keep the running animation; the new request is dropped
    Ignore,
}

/// Outcome of [`Animator::animate`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Launch {
    /// A new run started on an idle surface
    Started,
    /// A running animation was cancelled and replaced
    Restarted,
    /// The surface was already animating and the request was dropped
    Ignored,
}

#[derive(Clone, Debug, Default)]
pub struct AnimatorConfig {
    pub reinvoke: Reinvoke,
    pub formatter: Formatter,
}

/// Surfaces with a live timer, shared with timer callbacks through the loop data.
#[derive(Default)]
struct RunIndex {
    active: HashMap<SurfaceId, RegistrationToken>,
}

pub struct Animator {
    config: AnimatorConfig,
    event_loop: EventLoop<'static, RunIndex>,
    runs: RunIndex,
}

impl Animator {
    pub fn new() -> Result<Self> {
        Self::with_config(AnimatorConfig::default())
    }

    pub fn with_config(config: AnimatorConfig) -> Result<Self> {
        Ok(Self {
            config,
            event_loop: EventLoop::try_new()?,
            runs: RunIndex::default(),
        })
    }

    pub fn reinvoke(mut self, reinvoke: Reinvoke) -> Self {
        self.config.reinvoke = reinvoke;
        self
    }

    pub fn formatter(mut self, formatter: Formatter) -> Self {
        self.config.formatter = formatter;
        self
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Count `surface` up from zero to `target`.
    ///
    /// The surface text is first written on the first tick, one tick interval
    /// from now. Nothing is written if the request is ignored.
    pub fn animate<S>(
        &mut self,
        surface: &S,
        target: f64,
        options: CountUpOptions,
    ) -> Result<Launch>
    where
        S: TextSurface + Clone + 'static,
    {
        let mut run = CountUp::new(target, &options)?;
        let id = surface.surface_id();
        let mut replaced = None;

        if let Some(&token) = self.runs.active.get(&id) {
            match self.config.reinvoke {
                Reinvoke::Ignore => {
                    log::debug!("Surface {} already animating, ignoring request", id.raw());
                    return Ok(Launch::Ignored);
                }
                Reinvoke::Restart => {
                    log::debug!("Restarting count-up on surface {}", id.raw());
                    replaced = Some(token);
                }
            }
        }

        let interval = run.tick_interval();
        let formatter = self.config.formatter.clone();
        let display = surface.clone();

        log::debug!(
            "Starting count-up on surface {}: target {}, up to {} ticks every {:?}",
            id.raw(),
            target,
            options.effective_steps(),
            interval
        );

        let token = self
            .event_loop
            .handle()
            .insert_source(
                Timer::from_duration(interval),
                move |_deadline, _, runs: &mut RunIndex| {
                    let tick = run.tick();
                    if tick == Tick::Idle {
                        return TimeoutAction::Drop;
                    }

                    let text = run.render(&formatter);
                    log::trace!("Surface {} tick {}: {}", id.raw(), run.ticks(), text);
                    display.set_text(text);

                    if tick.is_finished() {
                        log::debug!(
                            "Count-up on surface {} finished after {} ticks",
                            id.raw(),
                            run.ticks()
                        );
                        display.remove_flags(SurfaceFlags::ANIMATING);
                        runs.active.remove(&id);
                        TimeoutAction::Drop
                    } else {
                        TimeoutAction::ToDuration(interval)
                    }
                },
            )
            .map_err(|e| e.error)?;

        // The old run keeps going if the new timer could not be registered
        surface.insert_flags(SurfaceFlags::ANIMATING);
        self.runs.active.insert(id, token);
        match replaced {
            Some(old) => {
                self.event_loop.handle().remove(old);
                Ok(Launch::Restarted)
            }
            None => Ok(Launch::Started),
        }
    }

    /// Parse a target out of the surface's current text and animate toward it.
    ///
    /// Returns `Ok(None)` without touching the surface if `parse` yields
    /// nothing.
    pub fn animate_parsed<S, P>(
        &mut self,
        surface: &S,
        parse: P,
        options: CountUpOptions,
    ) -> Result<Option<Launch>>
    where
        S: TextSurface + Clone + 'static,
        P: FnOnce(&str) -> Option<f64>,
    {
        match parse(&surface.text()) {
            Some(target) => self.animate(surface, target, options).map(Some),
            None => Ok(None),
        }
    }

    /// Whether `surface` has a run in progress
    pub fn is_animating(&self, surface: &impl TextSurface) -> bool {
        self.runs.active.contains_key(&surface.surface_id())
    }

    /// Number of runs in progress
    pub fn active_runs(&self) -> usize {
        self.runs.active.len()
    }

    pub fn is_idle(&self) -> bool {
        self.runs.active.is_empty()
    }

    /// Wait up to `timeout` for timers to fire and process them.
    pub fn dispatch(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.event_loop.dispatch(timeout, &mut self.runs)?;
        Ok(())
    }

    /// Pump the event loop until every run has finished or `timeout` elapses.
    /// Returns whether the animator went idle.
    pub fn run_until_idle(&mut self, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        while !self.is_idle() {
            let now = Instant::now();
            if now >= deadline {
                log::debug!("{} count-up runs still active at deadline", self.active_runs());
                return Ok(false);
            }
            self.dispatch(Some(deadline - now))?;
        }
        Ok(true)
    }
}
