use std::fmt;

use crate::u4;

/// CHIP-8 instruction opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Jump { nnn: u16 },
    JumpWithOffset { nnn: u16 },

    Call { nnn: u16 },
    Return,

    SkipRegEqualImm { x: u4, nn: u8 },
    SkipRegNotEqualImm { x: u4, nn: u8 },
    SkipRegEqualReg { x: u4, y: u4 },
    SkipRegNotEqualReg { x: u4, y: u4 },

    SetRegImm { x: u4, nn: u8 },
    AddRegImm { x: u4, nn: u8 },
    SetIndexImm { nnn: u16 },
    AddIndexReg { x: u4 },

    ALU { x: u4, y: u4, op: OpcodeALU },
    Random { x: u4, nn: u8 },

    ClearDisplay,
    Draw { x: u4, y: u4, n: u4 },

    SkipIfPressed { x: u4 },
    SkipIfNotPressed { x: u4 },
    WaitForKey { x: u4 },

    ReadDelayTimer { x: u4 },
    SetDelayTimer { x: u4 },
    SetSoundTimer { x: u4 },

    FontChar { x: u4 },
    BCD { x: u4 },

    StoreRegs { x: u4 },
    LoadRegs { x: u4 },

    Unknown(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpcodeALU {
    Set,
    Or,
    And,
    Xor,
    Add,
    Sub,
    ShiftRight,
    SubReverse,
    ShiftLeft,
}

impl Opcode {
    /// Decode a 16-bit raw opcode into an Opcode enum variant.
    ///
    /// The top nibble picks the group. Groups 0x0 and 0x8 dispatch further on the low
    /// nibble, groups 0xE and 0xF on the low byte; 0x5 and 0x9 ignore their low nibble.
    pub fn decode(opcode: u16) -> Self {
        let nibble = (
            ((opcode & 0xF000) >> 12) as u8,
            ((opcode & 0x0F00) >> 8) as u8,
            ((opcode & 0x00F0) >> 4) as u8,
            (opcode & 0x000F) as u8,
        );

        let x = u4::new(nibble.1);
        let y = u4::new(nibble.2);
        let n = u4::new(nibble.3);
        let nn = (opcode & 0x00FF) as u8;
        let nnn = opcode & 0x0FFF;

        match (nibble.0, nibble.3) {
            (0x0, 0x0) => Opcode::ClearDisplay,
            (0x0, 0xE) => Opcode::Return,
            (0x1, _) => Opcode::Jump { nnn },
            (0x2, _) => Opcode::Call { nnn },
            (0x3, _) => Opcode::SkipRegEqualImm { x, nn },
            (0x4, _) => Opcode::SkipRegNotEqualImm { x, nn },
            (0x5, _) => Opcode::SkipRegEqualReg { x, y },
            (0x6, _) => Opcode::SetRegImm { x, nn },
            (0x7, _) => Opcode::AddRegImm { x, nn },
            (0x8, low) => Opcode::ALU {
                x,
                y,
                op: match low {
                    0x0 => OpcodeALU::Set,
                    0x1 => OpcodeALU::Or,
                    0x2 => OpcodeALU::And,
                    0x3 => OpcodeALU::Xor,
                    0x4 => OpcodeALU::Add,
                    0x5 => OpcodeALU::Sub,
                    0x6 => OpcodeALU::ShiftRight,
                    0x7 => OpcodeALU::SubReverse,
                    0xE => OpcodeALU::ShiftLeft,
                    _ => return Opcode::Unknown(opcode),
                },
            },
            (0x9, _) => Opcode::SkipRegNotEqualReg { x, y },
            (0xA, _) => Opcode::SetIndexImm { nnn },
            (0xB, _) => Opcode::JumpWithOffset { nnn },
            (0xC, _) => Opcode::Random { x, nn },
            (0xD, _) => Opcode::Draw { x, y, n },
            (0xE, _) => match nn {
                0x9E => Opcode::SkipIfPressed { x },
                0xA1 => Opcode::SkipIfNotPressed { x },
                _ => Opcode::Unknown(opcode),
            },
            (0xF, _) => match nn {
                0x07 => Opcode::ReadDelayTimer { x },
                0x0A => Opcode::WaitForKey { x },
                0x15 => Opcode::SetDelayTimer { x },
                0x18 => Opcode::SetSoundTimer { x },
                0x1E => Opcode::AddIndexReg { x },
                0x29 => Opcode::FontChar { x },
                0x33 => Opcode::BCD { x },
                0x55 => Opcode::StoreRegs { x },
                0x65 => Opcode::LoadRegs { x },
                _ => Opcode::Unknown(opcode),
            },

            _ => Opcode::Unknown(opcode),
        }
    }
}

/// Prints the conventional assembler mnemonic, e.g. `ADD V3, 0x10`.
impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Opcode::Jump { nnn } => write!(f, "JP {nnn:#05X}"),
            Opcode::JumpWithOffset { nnn } => write!(f, "JP V0, {nnn:#05X}"),
            Opcode::Call { nnn } => write!(f, "CALL {nnn:#05X}"),
            Opcode::Return => write!(f, "RET"),
            Opcode::SkipRegEqualImm { x, nn } => write!(f, "SE V{x:X}, {nn:#04X}"),
            Opcode::SkipRegNotEqualImm { x, nn } => write!(f, "SNE V{x:X}, {nn:#04X}"),
            Opcode::SkipRegEqualReg { x, y } => write!(f, "SE V{x:X}, V{y:X}"),
            Opcode::SkipRegNotEqualReg { x, y } => write!(f, "SNE V{x:X}, V{y:X}"),
            Opcode::SetRegImm { x, nn } => write!(f, "LD V{x:X}, {nn:#04X}"),
            Opcode::AddRegImm { x, nn } => write!(f, "ADD V{x:X}, {nn:#04X}"),
            Opcode::SetIndexImm { nnn } => write!(f, "LD I, {nnn:#05X}"),
            Opcode::AddIndexReg { x } => write!(f, "ADD I, V{x:X}"),
            Opcode::ALU { x, y, op } => {
                let mnemonic = match op {
                    OpcodeALU::Set => "LD",
                    OpcodeALU::Or => "OR",
                    OpcodeALU::And => "AND",
                    OpcodeALU::Xor => "XOR",
                    OpcodeALU::Add => "ADD",
                    OpcodeALU::Sub => "SUB",
                    OpcodeALU::ShiftRight => "SHR",
                    OpcodeALU::SubReverse => "SUBN",
                    OpcodeALU::ShiftLeft => "SHL",
                };
                write!(f, "{mnemonic} V{x:X}, V{y:X}")
            }
            Opcode::Random { x, nn } => write!(f, "RND V{x:X}, {nn:#04X}"),
            Opcode::ClearDisplay => write!(f, "CLS"),
            Opcode::Draw { x, y, n } => write!(f, "DRW V{x:X}, V{y:X}, {}", n.get()),
            Opcode::SkipIfPressed { x } => write!(f, "SKP V{x:X}"),
            Opcode::SkipIfNotPressed { x } => write!(f, "SKNP V{x:X}"),
            Opcode::WaitForKey { x } => write!(f, "LD V{x:X}, K"),
            Opcode::ReadDelayTimer { x } => write!(f, "LD V{x:X}, DT"),
            Opcode::SetDelayTimer { x } => write!(f, "LD DT, V{x:X}"),
            Opcode::SetSoundTimer { x } => write!(f, "LD ST, V{x:X}"),
            Opcode::FontChar { x } => write!(f, "LD F, V{x:X}"),
            Opcode::BCD { x } => write!(f, "LD B, V{x:X}"),
            Opcode::StoreRegs { x } => write!(f, "LD [I], V{x:X}"),
            Opcode::LoadRegs { x } => write!(f, "LD V{x:X}, [I]"),
            Opcode::Unknown(opcode) => write!(f, "??? {opcode:#06X}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_operand_fields() {
        assert_eq!(
            Opcode::decode(0xD12F),
            Opcode::Draw {
                x: u4::new(1),
                y: u4::new(2),
                n: u4::new(0xF)
            }
        );
        assert_eq!(Opcode::decode(0xA2F0), Opcode::SetIndexImm { nnn: 0x2F0 });
        assert_eq!(
            Opcode::decode(0x7C42),
            Opcode::AddRegImm {
                x: u4::new(0xC),
                nn: 0x42
            }
        );
    }

    #[test]
    fn zero_group_dispatches_on_low_nibble() {
        assert_eq!(Opcode::decode(0x00E0), Opcode::ClearDisplay);
        assert_eq!(Opcode::decode(0x00EE), Opcode::Return);
        assert_eq!(Opcode::decode(0x0123), Opcode::Unknown(0x0123));
    }

    #[test]
    fn unknown_sub_operations() {
        assert_eq!(Opcode::decode(0x8128), Opcode::Unknown(0x8128));
        assert_eq!(Opcode::decode(0xE1FF), Opcode::Unknown(0xE1FF));
        assert_eq!(Opcode::decode(0xF199), Opcode::Unknown(0xF199));
    }

    #[test]
    fn skip_register_groups_ignore_low_nibble() {
        let expected = Opcode::SkipRegEqualReg {
            x: u4::new(3),
            y: u4::new(4),
        };
        assert_eq!(Opcode::decode(0x5340), expected);
        assert_eq!(Opcode::decode(0x5347), expected);
    }

    #[test]
    fn mnemonics() {
        assert_eq!(Opcode::decode(0x00E0).to_string(), "CLS");
        assert_eq!(Opcode::decode(0x8AB4).to_string(), "ADD VA, VB");
        assert_eq!(Opcode::decode(0x6F0A).to_string(), "LD VF, 0x0A");
        assert_eq!(Opcode::decode(0x2204).to_string(), "CALL 0x204");
        assert_eq!(Opcode::decode(0xD015).to_string(), "DRW V0, V1, 5");
        assert_eq!(Opcode::decode(0xFFFF).to_string(), "??? 0xFFFF");
    }
}
