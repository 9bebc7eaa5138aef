//! Assembly text buffer and label allocation
//!
//! [`Assembly`] accumulates the output text line by line. Instructions are
//! indented four spaces; directives that open a symbol (`.globl`, `.p2align`)
//! and labels start in column zero.
//!
//! Register conventions used by every emitter:
//! - `x0`/`w0`: expression result
//! - `x1`/`w1`: reloaded left operand of a binary operator
//! - `x2`/`w2`: scratch for `%`
//! - `x9`: scratch for addresses and frame sizes too wide for an immediate
//! - `x12`: frame base, slots live at `[x12, #offset]`

use crate::parser::ast::DataType;
use std::fmt::Display;

/// Largest value a single `mov` can encode as an immediate
const MOV_IMMEDIATE_LIMIT: u64 = 0xffff;

/// `add`/`sub` take a 12-bit immediate, optionally shifted left by 12
const ADD_IMMEDIATE_LIMIT: usize = 0xfff;

pub const FRAME_BASE: &str = "x12";

const SCRATCH: &str = "x9";

/// Growable assembly text
#[derive(Debug, Default)]
pub struct Assembly {
    text: String,
}

impl Assembly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit one indented instruction or directive.
    pub fn instr(&mut self, line: impl Display) {
        self.text.push_str("    ");
        self.text.push_str(&line.to_string());
        self.text.push('\n');
    }

    /// Emit a column-zero line (symbol directives).
    pub fn line(&mut self, line: impl Display) {
        self.text.push_str(&line.to_string());
        self.text.push('\n');
    }

    pub fn label(&mut self, name: &str) {
        self.text.push_str(name);
        self.text.push_str(":\n");
    }

    pub fn blank(&mut self) {
        self.text.push('\n');
    }

    /// Spill `x0` to a fresh 16-byte stack cell.
    pub fn push_x0(&mut self) {
        self.instr("str x0, [sp, #-16]!");
    }

    /// Reload the last spilled cell into `x1` and release it.
    pub fn pop_x1(&mut self) {
        self.instr("ldr x1, [sp], #16");
    }

    /// Materialise a constant in `x0`.
    pub fn load_immediate(&mut self, value: i64) {
        if (-(MOV_IMMEDIATE_LIMIT as i64) - 1..0).contains(&value) {
            self.instr(format_args!("mov x0, #{value}"));
            return;
        }
        self.load_wide("x0", value as u64);
    }

    fn load_wide(&mut self, reg: &str, bits: u64) {
        if bits <= MOV_IMMEDIATE_LIMIT {
            self.instr(format_args!("mov {reg}, #{bits}"));
            return;
        }

        self.instr(format_args!("movz {reg}, #{}", bits & 0xffff));
        for shift in [16, 32, 48] {
            let chunk = (bits >> shift) & 0xffff;
            if chunk != 0 {
                self.instr(format_args!("movk {reg}, #{chunk}, lsl #{shift}"));
            }
        }
    }

    /// `dst = src <op> value` for `add` or `sub`, split around the
    /// immediate encoding limits.
    fn add_immediate(&mut self, mnemonic: &str, dst: &str, src: &str, value: usize) {
        if value <= ADD_IMMEDIATE_LIMIT {
            self.instr(format_args!("{mnemonic} {dst}, {src}, #{value}"));
        } else if value >> 24 == 0 {
            self.instr(format_args!("{mnemonic} {dst}, {src}, #{}, lsl #12", value >> 12));
            let low = value & ADD_IMMEDIATE_LIMIT;
            if low != 0 {
                self.instr(format_args!("{mnemonic} {dst}, {dst}, #{low}"));
            }
        } else {
            self.load_wide(SCRATCH, value as u64);
            self.instr(format_args!("{mnemonic} {dst}, {src}, {SCRATCH}"));
        }
    }

    /// Allocate `size` bytes of frame.
    pub fn reserve_frame(&mut self, size: usize) {
        self.add_immediate("sub", "sp", "sp", size);
    }

    /// Release `size` bytes of frame.
    pub fn release_frame(&mut self, size: usize) {
        self.add_immediate("add", "sp", "sp", size);
    }

    /// Operand addressing a slot. Offsets past the scaled 12-bit range of
    /// the access width go through `x9`.
    fn slot_address(&mut self, data_type: DataType, offset: usize) -> String {
        let (scale, limit) = match data_type {
            DataType::Char => (1, ADD_IMMEDIATE_LIMIT),
            _ => (4, ADD_IMMEDIATE_LIMIT * 4),
        };
        if offset <= limit && offset % scale == 0 {
            return format!("[{FRAME_BASE}, #{offset}]");
        }

        self.add_immediate("add", SCRATCH, FRAME_BASE, offset);
        format!("[{SCRATCH}]")
    }

    /// Load a variable into `w0`, sign-extending `char`.
    pub fn load_slot(&mut self, data_type: DataType, offset: usize) {
        let mnemonic = match data_type {
            DataType::Char => "ldrsb",
            _ => "ldr",
        };
        let address = self.slot_address(data_type, offset);
        self.instr(format_args!("{mnemonic} w0, {address}"));
    }

    /// Store `w0` (or `reg`) into a variable.
    pub fn store_slot(&mut self, data_type: DataType, offset: usize, reg: &str) {
        let mnemonic = match data_type {
            DataType::Char => "strb",
            _ => "str",
        };
        let address = self.slot_address(data_type, offset);
        self.instr(format_args!("{mnemonic} {reg}, {address}"));
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Hands out `L<kind>_<n>` labels. One allocator lives for the whole
/// compilation unit, so labels never collide across functions.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    next: usize,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self, kind: &str) -> String {
        let label = format!("L{kind}_{}", self.next);
        self.next += 1;
        label
    }
}
