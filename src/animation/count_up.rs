use std::time::Duration;

use crate::error::{Error, Result};
use crate::format::{Formatter, NumberFormat};

use super::{CountUpOptions, Stepping};

/// Result of advancing a count-up run by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// The run moved to an intermediate value
    Running(f64),
    /// The run snapped to its target and is done
    Finished(f64),
    /// The run was already finished; nothing changed
    Idle,
}

impl Tick {
    /// The value produced by this tick, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            Tick::Running(v) | Tick::Finished(v) => Some(*v),
            Tick::Idle => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Tick::Finished(_))
    }
}

/// State of one count-up run from zero to a target value.
///
/// The run is purely tick-driven: something else (the [`Animator`] or a test)
/// decides when a tick happens, every [`tick_interval`](CountUp::tick_interval).
///
/// The run ends on the first tick where the current value reaches the target
/// in absolute terms, or once the configured number of steps has been taken,
/// whichever comes first. Either way the final value is exactly the target.
///
/// [`Animator`]: crate::Animator
#[derive(Debug, Clone)]
pub struct CountUp {
    target: f64,
    current: f64,
    increment: f64,
    max_ticks: u32,
    ticks: u32,
    tick_interval: Duration,
    format: NumberFormat,
    finished: bool,
}

impl CountUp {
    pub fn new(target: f64, options: &CountUpOptions) -> Result<Self> {
        if !target.is_finite() {
            return Err(Error::NonFiniteTarget(target));
        }

        let steps = options.effective_steps();
        let increment = match options.stepping {
            Stepping::Exact => target / f64::from(steps),
            Stepping::Whole => (target.abs() / f64::from(steps)).ceil().copysign(target),
        };

        Ok(Self {
            target,
            current: 0.0,
            increment,
            max_ticks: steps,
            ticks: 0,
            tick_interval: options.duration / steps,
            format: options.format,
            finished: false,
        })
    }

    /// Advance the run by one step.
    pub fn tick(&mut self) -> Tick {
        if self.finished {
            return Tick::Idle;
        }

        self.current += self.increment;
        self.ticks += 1;

        if self.current.abs() >= self.target.abs() || self.ticks >= self.max_ticks {
            self.current = self.target;
            self.finished = true;
            Tick::Finished(self.current)
        } else {
            Tick::Running(self.current)
        }
    }

    /// Render the current value with this run's format
    pub fn render(&self, formatter: &Formatter) -> String {
        formatter.format(self.current, self.format)
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Signed amount added on every tick
    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn format(&self) -> NumberFormat {
        self.format
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tick until the run finishes, collecting every rendered value
    fn run_to_end(run: &mut CountUp, formatter: &Formatter) -> Vec<String> {
        let mut rendered = Vec::new();
        loop {
            let tick = run.tick();
            if tick == Tick::Idle {
                break;
            }
            rendered.push(run.render(formatter));
        }
        rendered
    }

    #[test]
    fn test_final_value_is_exact() {
        let targets = [1.0, 0.1, 3.75, 1234.5, 12345.678, -42.0, -0.3, 1e9 + 0.01];
        for target in targets {
            for steps in [1, 3, 7, 40, 50, 333] {
                let options = CountUpOptions::balance().steps(steps);
                let mut run = CountUp::new(target, &options).unwrap();
                while !run.tick().is_finished() {}
                assert_eq!(run.current(), target, "target {target}, steps {steps}");
                assert!(run.ticks() <= steps);
            }
        }
    }

    #[test]
    fn test_currency_scenario() {
        let formatter = Formatter::default();
        let options = CountUpOptions::balance();
        let mut run = CountUp::new(12345.678, &options).unwrap();
        assert_eq!(run.tick_interval(), Duration::from_millis(30));

        let rendered = run_to_end(&mut run, &formatter);

        assert!(rendered.len() <= 50);
        assert_eq!(rendered.last().map(String::as_str), Some("$12,345.68"));
        assert!(run.is_finished());
        assert_eq!(run.tick(), Tick::Idle);
    }

    #[test]
    fn test_whole_stepping_scenario() {
        let formatter = Formatter::default();
        let mut run = CountUp::new(7.0, &CountUpOptions::credits()).unwrap();
        assert_eq!(run.increment(), 1.0);

        let rendered = run_to_end(&mut run, &formatter);

        assert_eq!(rendered, vec!["1", "2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn test_whole_stepping_never_overshoots_display() {
        let formatter = Formatter::default();
        let mut run = CountUp::new(130.0, &CountUpOptions::credits()).unwrap();
        assert_eq!(run.increment(), 4.0);

        let rendered = run_to_end(&mut run, &formatter);

        assert_eq!(rendered.len(), 33);
        assert_eq!(rendered[31], "128");
        assert_eq!(rendered[32], "130");
    }

    #[test]
    fn test_half_way_frame_rounds_up() {
        let formatter = Formatter::default();
        let options = CountUpOptions::gpa().steps(2).format(NumberFormat::Integer);
        let mut run = CountUp::new(5.0, &options).unwrap();

        assert_eq!(run_to_end(&mut run, &formatter), vec!["3", "5"]);
    }

    #[test]
    fn test_zero_target_finishes_in_one_tick() {
        let formatter = Formatter::default();
        for options in [
            CountUpOptions::balance(),
            CountUpOptions::gpa(),
            CountUpOptions::credits(),
        ] {
            let mut run = CountUp::new(0.0, &options).unwrap();
            assert_eq!(run.tick(), Tick::Finished(0.0));
            assert_eq!(run.tick(), Tick::Idle);
            assert_eq!(run.ticks(), 1);
        }

        let mut run = CountUp::new(0.0, &CountUpOptions::balance()).unwrap();
        run.tick();
        assert_eq!(run.render(&formatter), "$0.00");
    }

    #[test]
    fn test_negative_target_keeps_sign() {
        let formatter = Formatter::default();
        let mut run = CountUp::new(-42.0, &CountUpOptions::balance()).unwrap();

        let mut previous = 0.0_f64;
        loop {
            let tick = run.tick();
            let Some(value) = tick.value() else { break };
            assert!(value < 0.0);
            assert!(value.abs() >= previous);
            assert!(run.render(&formatter).starts_with("-$"));
            previous = value.abs();
        }

        assert_eq!(run.render(&formatter), "-$42.00");
    }

    #[test]
    fn test_negative_whole_stepping() {
        let mut run = CountUp::new(-9.0, &CountUpOptions::credits()).unwrap();
        assert_eq!(run.increment(), -1.0);
        while !run.tick().is_finished() {}
        assert_eq!(run.current(), -9.0);
        assert_eq!(run.ticks(), 9);
    }

    #[test]
    fn test_zero_steps_snaps_immediately() {
        let mut run = CountUp::new(250.0, &CountUpOptions::balance().steps(0)).unwrap();
        assert_eq!(run.tick_interval(), Duration::from_millis(1500));
        assert_eq!(run.tick(), Tick::Finished(250.0));
    }

    #[test]
    fn test_zero_duration_snaps_immediately() {
        let options = CountUpOptions::gpa().duration(Duration::ZERO);
        let mut run = CountUp::new(3.5, &options).unwrap();
        assert_eq!(run.tick_interval(), Duration::ZERO);
        assert_eq!(run.tick(), Tick::Finished(3.5));
    }

    #[test]
    fn test_non_finite_target_is_rejected() {
        let options = CountUpOptions::default();
        assert!(matches!(
            CountUp::new(f64::NAN, &options),
            Err(Error::NonFiniteTarget(_))
        ));
        assert!(CountUp::new(f64::INFINITY, &options).is_err());
    }
}
