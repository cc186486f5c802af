use rand::Rng;

use crate::{
    Chip8, DISPLAY_X, DISPLAY_Y, FONT_CHAR_SIZE, FONT_START_ADDRESS, Opcode, OpcodeALU,
    StepResult, chip8::mem_addr, u4,
};

const VF: usize = 0xF;

impl Chip8 {
    /// Runs one decoded instruction. The program counter already points past it.
    pub(crate) fn execute(&mut self, opcode: Opcode) -> StepResult {
        match opcode {
            Opcode::ClearDisplay => {
                self.display = [[0; DISPLAY_X]; DISPLAY_Y];
                self.draw_flag = true;
                return StepResult::Draw;
            }
            Opcode::Jump { nnn } => {
                self.pc = nnn;
            }
            Opcode::JumpWithOffset { nnn } => {
                self.pc = nnn.wrapping_add(self.v[0].into());
            }
            Opcode::Call { nnn } => {
                self.stack[self.sp as usize] = self.pc;
                self.sp += 1;
                self.pc = nnn;
            }
            Opcode::Return => {
                self.sp -= 1;
                self.pc = self.stack[self.sp as usize];
            }
            Opcode::SkipRegEqualImm { x, nn } => {
                if self.v[x] == nn {
                    self.pc = self.pc.wrapping_add(2);
                }
            }
            Opcode::SkipRegNotEqualImm { x, nn } => {
                if self.v[x] != nn {
                    self.pc = self.pc.wrapping_add(2);
                }
            }
            Opcode::SkipRegEqualReg { x, y } => {
                if self.v[x] == self.v[y] {
                    self.pc = self.pc.wrapping_add(2);
                }
            }
            Opcode::SkipRegNotEqualReg { x, y } => {
                if self.v[x] != self.v[y] {
                    self.pc = self.pc.wrapping_add(2);
                }
            }
            Opcode::SetRegImm { x, nn } => {
                self.v[x] = nn;
            }
            Opcode::AddRegImm { x, nn } => {
                self.v[x] = self.v[x].wrapping_add(nn);
            }
            Opcode::ALU { x, y, op } => {
                self.execute_alu(x, y, op);
            }
            Opcode::Random { x, nn } => {
                let rand_byte: u8 = self.rng.random();
                self.v[x] = rand_byte & nn;
            }
            Opcode::SetIndexImm { nnn } => {
                self.i = nnn;
            }
            Opcode::AddIndexReg { x } => {
                self.i = self.i.wrapping_add(self.v[x].into());
            }
            Opcode::Draw { x, y, n } => {
                self.execute_draw(x, y, n);
                return StepResult::Draw;
            }
            Opcode::SkipIfPressed { x } => {
                if self.keypad.is_down(self.v[x]) {
                    self.pc = self.pc.wrapping_add(2);
                }
            }
            Opcode::SkipIfNotPressed { x } => {
                if !self.keypad.is_down(self.v[x]) {
                    self.pc = self.pc.wrapping_add(2);
                }
            }
            Opcode::WaitForKey { x } => {
                return self.execute_wait_for_key(x);
            }
            Opcode::ReadDelayTimer { x } => {
                self.v[x] = self.delay_timer;
            }
            Opcode::SetDelayTimer { x } => {
                self.delay_timer = self.v[x];
            }
            Opcode::SetSoundTimer { x } => {
                self.sound_timer = self.v[x];
            }
            Opcode::FontChar { x } => {
                let digit = self.v[x] as u16;
                self.i = FONT_START_ADDRESS as u16 + digit * FONT_CHAR_SIZE as u16;
            }
            Opcode::BCD { x } => {
                let value = self.v[x];
                // VF reports the digits running past the top of memory
                self.v[VF] = u8::from(self.i as usize + 2 > 0xFFF);
                self.memory[mem_addr(self.i)] = value / 100;
                self.memory[mem_addr(self.i.wrapping_add(1))] = (value / 10) % 10;
                self.memory[mem_addr(self.i.wrapping_add(2))] = value % 10;
            }
            Opcode::StoreRegs { x } => {
                for reg_index in 0..=usize::from(x) {
                    let addr = mem_addr(self.i.wrapping_add(reg_index as u16));
                    self.memory[addr] = self.v[reg_index];
                }
            }
            Opcode::LoadRegs { x } => {
                for reg_index in 0..=usize::from(x) {
                    let addr = mem_addr(self.i.wrapping_add(reg_index as u16));
                    self.v[reg_index] = self.memory[addr];
                }
            }
            Opcode::Unknown(opcode) => {
                log::debug!(
                    "unknown opcode {opcode:#06X} at {:#05X}",
                    self.pc.wrapping_sub(2)
                );
                return StepResult::UnknownOpcode { opcode };
            }
        };

        StepResult::Continue
    }

    // Flags are computed from the operands first and VF is written last, so an
    // instruction whose destination is VF itself ends up holding the flag.
    fn execute_alu(&mut self, x: u4, y: u4, op: OpcodeALU) {
        match op {
            OpcodeALU::Set => self.v[x] = self.v[y],
            OpcodeALU::Or => self.v[x] |= self.v[y],
            OpcodeALU::And => self.v[x] &= self.v[y],
            OpcodeALU::Xor => self.v[x] ^= self.v[y],
            OpcodeALU::Add => {
                let (res, overflow) = self.v[x].overflowing_add(self.v[y]);
                self.v[x] = res;
                self.v[VF] = u8::from(overflow);
            }
            OpcodeALU::Sub => {
                let no_borrow = self.v[x] > self.v[y];
                self.v[x] = self.v[x].wrapping_sub(self.v[y]);
                self.v[VF] = u8::from(no_borrow);
            }
            OpcodeALU::SubReverse => {
                let no_borrow = self.v[y] > self.v[x];
                self.v[x] = self.v[y].wrapping_sub(self.v[x]);
                self.v[VF] = u8::from(no_borrow);
            }
            OpcodeALU::ShiftRight => {
                let lsb = self.v[x] & 1;
                self.v[x] >>= 1;
                self.v[VF] = lsb;
            }
            OpcodeALU::ShiftLeft => {
                let msb = (self.v[x] & 0x80) >> 7;
                self.v[x] <<= 1;
                self.v[VF] = msb;
            }
        }
    }

    // The origin wraps onto the screen; whatever runs past the right or bottom edge is clipped.
    fn execute_draw(&mut self, x: u4, y: u4, n: u4) {
        let x_pos = self.v[x] as usize % DISPLAY_X;
        let y_pos = self.v[y] as usize % DISPLAY_Y;

        let row_count = std::cmp::min(usize::from(n), DISPLAY_Y - y_pos);
        let col_count = std::cmp::min(8, DISPLAY_X - x_pos);

        self.v[VF] = 0;
        for row in 0..row_count {
            let sprite_byte = self.memory[mem_addr(self.i.wrapping_add(row as u16))];

            for col in 0..col_count {
                if (sprite_byte & (0x80 >> col)) != 0 {
                    let pixel = &mut self.display[y_pos + row][x_pos + col];

                    self.v[VF] |= *pixel;
                    *pixel ^= 1;
                }
            }
        }

        self.draw_flag = true;
    }

    fn execute_wait_for_key(&mut self, x: u4) -> StepResult {
        match self.keypad.first_down() {
            Some(key) => {
                self.v[x] = key.get();
                StepResult::Continue
            }
            None => {
                // Repeat this instruction until a key is down
                self.pc = self.pc.wrapping_sub(2);
                StepResult::WaitingForKey
            }
        }
    }
}
