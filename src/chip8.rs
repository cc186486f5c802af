use rand::{SeedableRng, rngs::StdRng};

use crate::{
    DISPLAY_X, DISPLAY_Y, Display, FONT, FONT_END_ADDRESS, FONT_START_ADDRESS, Keypad, LoadError,
    MAX_ROM_SIZE, MEMORY_SIZE, Opcode, PROGRAM_START_ADDRESS, REGISTER_COUNT, STACK_SIZE,
    StepResult, TraceSink,
};

/// CHIP-8 virtual machine state
///
/// The host owns one of these per session. It calls [`load`](Chip8::load) once, then
/// [`step`](Chip8::step) at whatever rate it likes, writing into the keypad between steps
/// and painting the framebuffer whenever the draw flag comes up.
pub struct Chip8 {
    /// 4KB memory array, fonts at the bottom, program from 0x200
    pub(crate) memory: [u8; MEMORY_SIZE],
    /// Display buffer: 64x32 monochrome pixels, each 0 or 1
    pub(crate) display: Display<u8>,

    /// Program counter: address of the next instruction to execute
    pub(crate) pc: u16,
    /// Index register: used for memory operations, never masked on its own
    pub(crate) i: u16,
    /// General-purpose registers V0-VF (VF is used as a flag register)
    pub(crate) v: [u8; REGISTER_COUNT],
    /// Return addresses for CALL/RET
    pub(crate) stack: [u16; STACK_SIZE],
    /// Next free stack slot
    pub(crate) sp: u8,

    /// Delay timer: decremented once per step until it reaches 0
    pub(crate) delay_timer: u8,
    /// Sound timer: decremented once per step, beeps while non-zero
    pub(crate) sound_timer: u8,

    pub(crate) keypad: Keypad,

    /// The word fetched by the most recent step
    pub(crate) opcode: u16,
    /// Set whenever the framebuffer changes, cleared by the host
    pub(crate) draw_flag: bool,
    /// Cleared by `halt`, the run-loop stops once this is false
    pub(crate) running: bool,
    /// Length of the loaded program in bytes
    pub(crate) program_size: usize,

    pub(crate) rng: StdRng,
    pub(crate) tracer: Option<Box<dyn TraceSink>>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Same as [`new`](Chip8::new) but with a reproducible random source for CXKK.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[FONT_START_ADDRESS..FONT_END_ADDRESS].copy_from_slice(&FONT);

        Chip8 {
            memory,
            display: [[0; DISPLAY_X]; DISPLAY_Y],
            pc: PROGRAM_START_ADDRESS as u16,
            i: 0,
            v: [0; REGISTER_COUNT],
            stack: [0; STACK_SIZE],
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            keypad: Keypad::new(),
            opcode: 0,
            draw_flag: false,
            running: true,
            program_size: 0,
            rng,
            tracer: None,
        }
    }

    /// Copies a program image into memory at 0x200.
    ///
    /// Bytes of a previous program beyond the new image are left in place, and registers,
    /// timers and the stack are untouched; build a fresh `Chip8` for a full reset. On error
    /// nothing is modified.
    pub fn load(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        if rom.is_empty() {
            return Err(LoadError::EmptyRom);
        }
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }

        let rom_end = PROGRAM_START_ADDRESS + rom.len();
        self.memory[PROGRAM_START_ADDRESS..rom_end].copy_from_slice(rom);
        self.program_size = rom.len();

        log::debug!("loaded {} byte program at {PROGRAM_START_ADDRESS:#05X}", rom.len());
        Ok(())
    }

    /// Executes one fetch-decode-execute cycle, then ticks both timers once.
    ///
    /// # Panics
    ///
    /// The call stack is not guarded: a CALL with sixteen return addresses already
    /// stored, or a RET with none, indexes outside the stack and panics.
    pub fn step(&mut self) -> StepResult {
        let pc = self.pc;
        self.opcode = self.fetch();
        self.pc = self.pc.wrapping_add(2);

        let decoded = Opcode::decode(self.opcode);
        let result = self.execute(decoded);

        if let Some(tracer) = self.tracer.as_mut() {
            match decoded {
                Opcode::Unknown(opcode) => tracer.on_unknown(pc, opcode),
                _ => tracer.on_instruction(pc, self.opcode, &decoded),
            }
        }

        self.timers_cycle();
        result
    }

    /// True while the program counter is inside the loaded program and nobody has
    /// halted the machine.
    pub fn is_running(&self) -> bool {
        (self.pc as usize) < PROGRAM_START_ADDRESS + self.program_size && self.running
    }

    pub fn halt(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn toggle_pause(&mut self) {
        self.running = !self.running;
    }

    /// Updates the delay and sound timers by one tick each.
    pub fn timers_cycle(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// Returns true if the sound timer is greater than zero, indicating a beep should be played.
    pub fn should_beep(&self) -> bool {
        self.sound_timer > 0
    }

    pub fn set_tracer(&mut self, tracer: impl TraceSink + 'static) {
        self.tracer = Some(Box::new(tracer));
    }

    pub fn clear_tracer(&mut self) {
        self.tracer = None;
    }

    pub fn draw_flag(&self) -> bool {
        self.draw_flag
    }

    /// Returns the draw flag and clears it, for hosts that repaint on demand.
    pub fn take_draw_flag(&mut self) -> bool {
        std::mem::take(&mut self.draw_flag)
    }

    pub fn clear_draw_flag(&mut self) {
        self.draw_flag = false;
    }

    /// Get the state of a pixel on the display. Coordinates off the screen read as unset.
    pub fn get_display_pixel(&self, x: usize, y: usize) -> bool {
        self.display
            .get(y)
            .and_then(|row| row.get(x))
            .is_some_and(|&pixel| pixel != 0)
    }

    pub fn display(&self) -> &Display<u8> {
        &self.display
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn memory(&self) -> &[u8; MEMORY_SIZE] {
        &self.memory
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.v
    }

    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.sp as usize]
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn opcode(&self) -> u16 {
        self.opcode
    }

    pub fn program_size(&self) -> usize {
        self.program_size
    }

    /// Fetches the big-endian word at the program counter.
    fn fetch(&self) -> u16 {
        let high = self.memory[mem_addr(self.pc)];
        let low = self.memory[mem_addr(self.pc.wrapping_add(1))];

        u16::from_be_bytes([high, low])
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

/// Memory addresses wrap at the 4KB boundary.
pub(crate) fn mem_addr(addr: u16) -> usize {
    addr as usize % MEMORY_SIZE
}
