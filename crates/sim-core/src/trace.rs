//! Recorded waveforms and run-length-encoded expectations.
//!
//! A [`Trace`] is one value per watched port per half-cycle step. Tests
//! describe the waveform they expect with the [`Waveform`] builder and
//! compare it against what the bench recorded.

use std::fmt;
use std::ops::Add;

/// A recorded (or expected) multi-port waveform.
///
/// Ports keep insertion order. Step `k` is the state sampled after `k`
/// half-cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    ports: Vec<(String, Vec<u64>)>,
}

impl Trace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all recorded steps, keeping nothing.
    pub fn clear(&mut self) {
        self.ports.clear();
    }

    /// Append one sampled value for `port`.
    pub fn record(&mut self, port: &str, value: u64) {
        if let Some((_, values)) = self.ports.iter_mut().find(|(name, _)| name == port) {
            values.push(value);
        } else {
            self.ports.push((port.to_string(), vec![value]));
        }
    }

    /// The recorded steps for one port, if it was ever sampled.
    #[must_use]
    pub fn port(&self, name: &str) -> Option<&[u64]> {
        self.ports
            .iter()
            .find(|(port, _)| port == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Number of recorded steps (longest port).
    #[must_use]
    pub fn len(&self) -> usize {
        self.ports.iter().map(|(_, v)| v.len()).max().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if every port of `expected` was recorded here with exactly
    /// the same step sequence. Ports recorded here but absent from
    /// `expected` are ignored, so an expectation may name only the
    /// signals it cares about.
    #[must_use]
    pub fn matches(&self, expected: &Self) -> bool {
        expected
            .ports
            .iter()
            .all(|(name, values)| self.port(name) == Some(values.as_slice()))
    }

    /// Human-readable description of the first difference from
    /// `expected`, or `None` when the traces match.
    #[must_use]
    pub fn diff(&self, expected: &Self) -> Option<String> {
        for (name, want) in &expected.ports {
            let Some(got) = self.port(name) else {
                return Some(format!("port {name:?} was never recorded"));
            };
            if got.len() != want.len() {
                return Some(format!(
                    "port {name:?}: recorded {} steps, expected {}",
                    got.len(),
                    want.len()
                ));
            }
            if let Some(step) = (0..want.len()).find(|&k| got[k] != want[k]) {
                return Some(format!(
                    "port {name:?} step {step}: recorded {:#X}, expected {:#X}\n recorded: {}\n expected: {}",
                    got[step],
                    want[step],
                    render(got),
                    render(want),
                ));
            }
        }
        None
    }
}

fn render(values: &[u64]) -> String {
    if values.iter().all(|&v| v <= 1) {
        values.iter().map(|&v| if v == 0 { '_' } else { '-' }).collect()
    } else {
        let steps: Vec<String> = values.iter().map(|v| format!("{v:X}")).collect();
        steps.join(",")
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, values) in &self.ports {
            writeln!(f, "{name:>16}: {}", render(values))?;
        }
        Ok(())
    }
}

/// Concatenate two traces step-wise, port by port.
impl Add for Trace {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        for (name, values) in rhs.ports {
            if let Some((_, existing)) = self.ports.iter_mut().find(|(port, _)| *port == name) {
                existing.extend(values);
            } else {
                self.ports.push((name, values));
            }
        }
        self
    }
}

/// Run-length-encoded waveform builder.
///
/// Each `bits`/`levels` call opens a new block on the current port;
/// `repeat` and `repeat_each_step` rewrite the most recent block;
/// `concat` fuses all of the current port's blocks into one so a later
/// combinator applies to the whole.
///
/// ```
/// use sim_core::Waveform;
///
/// let expected = Waveform::new()
///     .port("clk").bits("_-").repeat(4)
///     .port("tcu").levels(&[0, 1, 2, 3]).repeat_each_step(2)
///     .build();
/// assert_eq!(expected.port("tcu").map(<[u64]>::len), Some(8));
/// ```
#[derive(Debug, Default)]
pub struct Waveform {
    ports: Vec<(String, Vec<Vec<u64>>)>,
}

impl Waveform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start describing a new port.
    #[must_use]
    pub fn port(mut self, name: &str) -> Self {
        self.ports.push((name.to_string(), Vec::new()));
        self
    }

    fn current(&mut self) -> &mut Vec<Vec<u64>> {
        assert!(!self.ports.is_empty(), "call port() before adding signals");
        let last = self.ports.len() - 1;
        &mut self.ports[last].1
    }

    /// Append a block of 1-bit levels: `'_'`/`'0'` is low, `'-'`/`'1'`
    /// is high.
    #[must_use]
    pub fn bits(mut self, pattern: &str) -> Self {
        let block = pattern
            .chars()
            .map(|c| match c {
                '_' | '0' => 0,
                '-' | '1' => 1,
                other => panic!("invalid bit character {other:?}"),
            })
            .collect();
        self.current().push(block);
        self
    }

    /// Append a block of numeric levels.
    #[must_use]
    pub fn levels(mut self, values: &[u64]) -> Self {
        let block = values.to_vec();
        self.current().push(block);
        self
    }

    /// Repeat the last block so it appears `n` times in total.
    #[must_use]
    pub fn repeat(mut self, n: usize) -> Self {
        let blocks = self.current();
        let last = blocks.last_mut().expect("repeat() needs a signal block");
        let unit = last.clone();
        last.clear();
        for _ in 0..n {
            last.extend_from_slice(&unit);
        }
        self
    }

    /// Stretch the last block, holding each step for `n` steps.
    #[must_use]
    pub fn repeat_each_step(mut self, n: usize) -> Self {
        let blocks = self.current();
        let last = blocks
            .last_mut()
            .expect("repeat_each_step() needs a signal block");
        let stretched: Vec<u64> = last
            .iter()
            .flat_map(|&v| std::iter::repeat_n(v, n))
            .collect();
        *last = stretched;
        self
    }

    /// Fuse all blocks of the current port into one.
    #[must_use]
    pub fn concat(mut self) -> Self {
        let blocks = self.current();
        let fused: Vec<u64> = blocks.iter().flatten().copied().collect();
        blocks.clear();
        blocks.push(fused);
        self
    }

    /// Flatten into a [`Trace`].
    #[must_use]
    pub fn build(self) -> Trace {
        Trace {
            ports: self
                .ports
                .into_iter()
                .map(|(name, blocks)| (name, blocks.into_iter().flatten().collect()))
                .collect(),
        }
    }
}
