//! Human-readable snapshots of the machine state for debugging.

use crate::{Chip8, Opcode};

/// Bytes shown per line of a memory dump.
const MEM_ROW: usize = 16;

impl Chip8 {
    /// Opcode, PC, I, SP, timers, the call stack and V0-VF.
    pub fn dump_registers(&self) -> String {
        let mut out = format!(
            "OP: {:04X} ({})\nPC: {:03X}  I: {:03X}  SP: {:X}\nDT: {:02X}   ST: {:02X}\n",
            self.opcode,
            Opcode::decode(self.opcode),
            self.pc,
            self.i,
            self.sp,
            self.delay_timer,
            self.sound_timer
        );

        let stack: Vec<String> = self
            .stack()
            .iter()
            .map(|addr| format!("{addr:03X}"))
            .collect();
        out.push_str(&format!("Stack: [{}]\n", stack.join(", ")));

        for idx in 0..8 {
            out.push_str(&format!(
                "V{:X}: {:02X}   V{:X}: {:02X}\n",
                idx,
                self.v[idx],
                idx + 8,
                self.v[idx + 8]
            ));
        }

        out
    }

    /// The whole address space as hex rows. Runs of all-zero rows collapse into `...`.
    pub fn dump_memory(&self) -> String {
        let mut out = String::new();
        let mut skipping = false;

        for (row_idx, row) in self.memory.chunks(MEM_ROW).enumerate() {
            if row.iter().all(|&byte| byte == 0) {
                if !skipping {
                    out.push_str("...\n");
                    skipping = true;
                }
                continue;
            }
            skipping = false;

            out.push_str(&format!("{:03X}:", row_idx * MEM_ROW));
            for byte in row {
                out.push_str(&format!(" {byte:02X}"));
            }
            out.push('\n');
        }

        out
    }

    /// One line per display row, `#` for a set pixel and `.` for an unset one.
    pub fn dump_video(&self) -> String {
        self.display
            .iter()
            .map(|row| {
                let mut line: String = row
                    .iter()
                    .map(|&pixel| if pixel != 0 { '#' } else { '.' })
                    .collect();
                line.push('\n');
                line
            })
            .collect()
    }
}
