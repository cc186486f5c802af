use crate::{Chip8, Display, StepResult};

/// Receives the framebuffer whenever the interpreter asks for a repaint.
pub trait Screen {
    fn paint(&mut self, display: &Display<u8>);
}

impl<F: FnMut(&Display<u8>)> Screen for F {
    fn paint(&mut self, display: &Display<u8>) {
        self(display)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Instructions executed per host tick.
    pub steps_per_tick: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { steps_per_tick: 10 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// The machine can take another tick.
    Running,
    /// The program counter left the program or the machine was paused.
    Stopped,
}

/// High-level host loop that batches steps per tick and forwards repaints.
pub struct Chip8Runner {
    chip8: Chip8,
    config: RunnerConfig,
    unknown_opcodes: usize,
}

impl Chip8Runner {
    pub fn new(chip8: Chip8, config: RunnerConfig) -> Self {
        Self {
            chip8,
            config,
            unknown_opcodes: 0,
        }
    }

    /// Runs up to `steps_per_tick` instructions, stopping early once the machine stops.
    ///
    /// After each step that set the draw flag the flag is cleared and the screen painted,
    /// so a sprite drawn and erased within one tick still reaches the screen.
    pub fn tick(&mut self, screen: &mut impl Screen) -> TickResult {
        for _ in 0..self.config.steps_per_tick {
            if !self.chip8.is_running() {
                return TickResult::Stopped;
            }

            if let StepResult::UnknownOpcode { .. } = self.chip8.step() {
                self.unknown_opcodes += 1;
            }

            if self.chip8.take_draw_flag() {
                screen.paint(self.chip8.display());
            }
        }

        if self.chip8.is_running() {
            TickResult::Running
        } else {
            TickResult::Stopped
        }
    }

    /// Pauses a running machine or resumes a paused one.
    pub fn toggle_pause(&mut self) {
        self.chip8.toggle_pause();
    }

    /// Returns true if the sound timer is active, indicating a beep should be played.
    pub fn should_beep(&self) -> bool {
        self.chip8.should_beep()
    }

    /// How many undecodable words have been skipped so far.
    pub fn unknown_opcodes(&self) -> usize {
        self.unknown_opcodes
    }

    pub fn chip8_ref(&self) -> &Chip8 {
        &self.chip8
    }

    pub fn chip8_mut(&mut self) -> &mut Chip8 {
        &mut self.chip8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner_with(rom: &[u8], steps_per_tick: usize) -> Chip8Runner {
        let mut chip8 = Chip8::with_seed(1);
        chip8.load(rom).unwrap();
        Chip8Runner::new(chip8, RunnerConfig { steps_per_tick })
    }

    #[test]
    fn tick_runs_a_batch_of_steps() {
        // 6001 7001 1202: V0 counts up forever
        let mut runner = runner_with(&[0x60, 0x01, 0x70, 0x01, 0x12, 0x02], 5);
        let mut paints = 0;

        assert_eq!(runner.tick(&mut |_: &Display<u8>| paints += 1), TickResult::Running);
        // LD, ADD, JP, ADD, JP
        assert_eq!(runner.chip8_ref().registers()[0], 3);
        assert_eq!(paints, 0);
    }

    #[test]
    fn paints_after_each_drawing_step() {
        // CLS twice then fall off the end of the program
        let mut runner = runner_with(&[0x00, 0xE0, 0x00, 0xE0], 10);
        let mut paints = 0;

        assert_eq!(runner.tick(&mut |_: &Display<u8>| paints += 1), TickResult::Stopped);
        assert_eq!(paints, 2);
        assert!(!runner.chip8_ref().draw_flag());
    }

    #[test]
    fn paused_runner_does_not_step() {
        let mut runner = runner_with(&[0x12, 0x00], 10);
        runner.toggle_pause();

        assert_eq!(runner.tick(&mut |_: &Display<u8>| {}), TickResult::Stopped);
        assert_eq!(runner.chip8_ref().opcode(), 0);

        runner.toggle_pause();
        assert_eq!(runner.tick(&mut |_: &Display<u8>| {}), TickResult::Running);
        assert_eq!(runner.chip8_ref().opcode(), 0x1200);
    }

    #[test]
    fn counts_unknown_opcodes() {
        let mut runner = runner_with(&[0xFF, 0xFF, 0x80, 0x08], 2);
        runner.tick(&mut |_: &Display<u8>| {});
        assert_eq!(runner.unknown_opcodes(), 2);
    }
}
