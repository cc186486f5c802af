use std::{cell::RefCell, rc::Rc};

use crate::Opcode;

/// Receives every instruction the interpreter dispatches.
///
/// Installed with [`Chip8::set_tracer`](crate::Chip8::set_tracer). When no sink is
/// installed the interpreter does no formatting at all.
pub trait TraceSink {
    /// Called after the instruction fetched from `pc` has executed.
    fn on_instruction(&mut self, pc: u16, opcode: u16, decoded: &Opcode);

    /// Called for words that do not decode to an instruction.
    fn on_unknown(&mut self, _pc: u16, _opcode: u16) {}
}

/// Forwards the instruction stream to the `log` facade at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl TraceSink for LogTracer {
    fn on_instruction(&mut self, pc: u16, opcode: u16, decoded: &Opcode) {
        log::trace!("{pc:#05X}: {opcode:04X} {decoded}");
    }

    fn on_unknown(&mut self, pc: u16, opcode: u16) {
        log::trace!("{pc:#05X}: {opcode:04X} unknown opcode");
    }
}

/// Lets the host keep a handle on a sink it has installed.
impl<T: TraceSink> TraceSink for Rc<RefCell<T>> {
    fn on_instruction(&mut self, pc: u16, opcode: u16, decoded: &Opcode) {
        self.borrow_mut().on_instruction(pc, opcode, decoded);
    }

    fn on_unknown(&mut self, pc: u16, opcode: u16) {
        self.borrow_mut().on_unknown(pc, opcode);
    }
}
