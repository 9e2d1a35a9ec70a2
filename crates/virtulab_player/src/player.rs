// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interactive experiment player.
//!
//! Wires the external surfaces around one sequencer: a simulated asset
//! load gates the first trigger, Enter acts as the tablet control, stdout
//! is the caption surface and completion overlay, and a sleeping frame
//! loop drives interpolation while a routine is in flight.

use crate::frame_clock::{FrameClock, FRAME_INTERVAL};
use std::io::{self, BufRead, Write};
use virtulab_experiments::Experiment;
use virtulab_sequencer::{LoadTracker, RegistryError, Sequencer, SequencerEvent};

/// One experiment session
pub struct Player {
    title: &'static str,
    sequencer: Sequencer,
    clock: FrameClock,
}

impl Player {
    /// Build a player for an experiment from the catalog
    pub fn new(experiment: &Experiment) -> Result<Self, RegistryError> {
        Ok(Self {
            title: experiment.title,
            sequencer: experiment.build()?,
            clock: FrameClock::new(),
        })
    }

    /// Run the interactive session until quit or end of input
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout();

        writeln!(out, "{}", self.title)?;
        self.load(&mut out)?;
        writeln!(out, "Loading complete. Press Enter to step through the procedure.")?;

        loop {
            writeln!(out, "[Enter] next step  [q] quit")?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().eq_ignore_ascii_case("q") {
                break;
            }
            if !self.sequencer.advance() {
                continue;
            }
            self.drain_events(&mut out)?;
            while self.sequencer.is_in_flight() {
                std::thread::sleep(FRAME_INTERVAL);
                let dt = self.clock.tick();
                self.sequencer.tick(dt);
                self.drain_events(&mut out)?;
            }
        }
        Ok(())
    }

    /// Simulated asset load with a progress readout; the trigger prompt
    /// only appears once this completes
    fn load(&self, out: &mut impl Write) -> io::Result<()> {
        let mut tracker = LoadTracker::new(self.sequencer.registry().len());
        for part in self.sequencer.registry().parts() {
            tracker.item_loaded(&part.name);
            write!(out, "\rLoading scene... {:3.0}%", tracker.progress() * 100.0)?;
            out.flush()?;
            std::thread::sleep(std::time::Duration::from_millis(30));
        }
        writeln!(out)?;
        Ok(())
    }

    fn drain_events(&mut self, out: &mut impl Write) -> io::Result<()> {
        for event in self.sequencer.take_events() {
            match event {
                SequencerEvent::StepStarted { caption, .. } => {
                    writeln!(out, "\n{caption}")?;
                }
                SequencerEvent::Notice { text } => writeln!(out, "[NOTE] {text}")?,
                SequencerEvent::ProcedureCompleted => {
                    writeln!(out, "\n=== Experiment complete. Press Enter to restart. ===")?;
                }
                SequencerEvent::ResetApplied => {
                    writeln!(out, "(bench restored to its initial state)")?;
                }
                SequencerEvent::StepFinished { step } => {
                    tracing::debug!(step, "step finished");
                }
            }
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_builds_for_catalog_entries() {
        for experiment in virtulab_experiments::EXPERIMENTS {
            assert!(Player::new(experiment).is_ok(), "{} failed", experiment.slug);
        }
    }
}
