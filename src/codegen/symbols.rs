//! Per-function symbol table
//!
//! Maps local variable names to stack slots inside the current frame. Slots are
//! reserved in declaration order during the function pre-scan; offsets are
//! resolved by walking the table from the most recently declared slot (offset
//! 0) back toward the first, summing slot sizes on the way.
//!
//! A slot only becomes visible to lookups once its declaration statement has
//! been emitted, so a variable cannot be read before the line that declares it.

use super::errors::CodegenError;
use crate::parser::ast::{DataType, SourceLocation};
use rustc_hash::FxHashMap;

/// Smallest slot handed out, the ABI register width in bytes
const MIN_SLOT_SIZE: usize = 8;

/// ARM64 requires `sp` to stay 16-byte aligned
pub const STACK_ALIGNMENT: usize = 16;

/// A reserved stack slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub name: String,
    pub data_type: DataType,
    pub size: usize,
    pub location: SourceLocation,
    live: bool,
}

/// Resolved address of a variable: byte offset from the frame base plus the
/// declared type (which picks the load/store width).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRef {
    pub offset: usize,
    pub data_type: DataType,
}

/// Symbol table for one function (or one top-level declaration)
#[derive(Debug, Default)]
pub struct SymbolTable {
    slots: Vec<Slot>,
    index: FxHashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a slot of `max(size * 2, 8)` bytes for `name`.
    pub fn declare(
        &mut self,
        name: &str,
        data_type: DataType,
        location: SourceLocation,
    ) -> Result<(), CodegenError> {
        let width = data_type
            .storage_size()
            .ok_or_else(|| CodegenError::VoidVariable {
                name: name.to_string(),
                location,
            })?;

        if let Some(&existing) = self.index.get(name) {
            return Err(CodegenError::Redeclaration {
                name: name.to_string(),
                location,
                previous: self.slots[existing].location,
            });
        }

        self.index.insert(name.to_string(), self.slots.len());
        self.slots.push(Slot {
            name: name.to_string(),
            data_type,
            size: (width * 2).max(MIN_SLOT_SIZE),
            location,
            live: false,
        });
        Ok(())
    }

    /// Make a reserved slot visible to lookups.
    pub fn activate(&mut self, name: &str) {
        if let Some(&i) = self.index.get(name) {
            self.slots[i].live = true;
        }
    }

    /// Resolve the frame offset of `name`.
    pub fn get_stack_pos(&self, name: &str, location: SourceLocation) -> Result<SlotRef, CodegenError> {
        let mut offset = 0;

        for slot in self.slots.iter().rev() {
            if slot.name == name && slot.live {
                return Ok(SlotRef {
                    offset,
                    data_type: slot.data_type,
                });
            }
            offset += slot.size;
        }

        Err(CodegenError::UndefinedVariable {
            name: name.to_string(),
            location,
        })
    }

    /// Total bytes reserved, before alignment
    pub fn reserved(&self) -> usize {
        self.slots.iter().map(|s| s.size).sum()
    }

    /// Frame size: reserved bytes rounded up to [`STACK_ALIGNMENT`], never zero.
    pub fn frame_size(&self) -> usize {
        self.reserved()
            .div_ceil(STACK_ALIGNMENT)
            .max(1)
            * STACK_ALIGNMENT
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(line: usize) -> SourceLocation {
        SourceLocation::new(line, 1)
    }

    fn table(decls: &[(&str, DataType)]) -> SymbolTable {
        let mut symbols = SymbolTable::new();
        for (i, (name, ty)) in decls.iter().enumerate() {
            symbols.declare(name, *ty, loc(i + 1)).unwrap();
            symbols.activate(name);
        }
        symbols
    }

    #[test]
    fn test_most_recent_is_offset_zero() {
        let symbols = table(&[
            ("a", DataType::Int),
            ("b", DataType::Char),
            ("c", DataType::Int),
        ]);
        assert_eq!(symbols.get_stack_pos("c", loc(9)).unwrap().offset, 0);
        assert_eq!(symbols.get_stack_pos("b", loc(9)).unwrap().offset, 8);
        assert_eq!(symbols.get_stack_pos("a", loc(9)).unwrap().offset, 16);
        assert_eq!(
            symbols.get_stack_pos("b", loc(9)).unwrap().data_type,
            DataType::Char
        );
    }

    #[test]
    fn test_frame_size_is_aligned() {
        assert_eq!(SymbolTable::new().frame_size(), 16);
        assert_eq!(table(&[("a", DataType::Int)]).frame_size(), 16);
        let three = table(&[
            ("a", DataType::Int),
            ("b", DataType::Int),
            ("c", DataType::Char),
        ]);
        assert_eq!(three.reserved(), 24);
        assert_eq!(three.frame_size(), 32);
    }

    #[test]
    fn test_redeclaration() {
        let mut symbols = table(&[("x", DataType::Int)]);
        let err = symbols.declare("x", DataType::Char, loc(5)).unwrap_err();
        assert_eq!(
            err,
            CodegenError::Redeclaration {
                name: "x".to_string(),
                location: loc(5),
                previous: loc(1),
            }
        );
    }

    #[test]
    fn test_void_variable() {
        let mut symbols = SymbolTable::new();
        assert!(matches!(
            symbols.declare("v", DataType::Void, loc(1)),
            Err(CodegenError::VoidVariable { .. })
        ));
        assert!(symbols.is_empty());
    }

    #[test]
    fn test_inactive_slot_is_undefined() {
        let mut symbols = SymbolTable::new();
        symbols.declare("late", DataType::Int, loc(3)).unwrap();
        assert!(matches!(
            symbols.get_stack_pos("late", loc(2)),
            Err(CodegenError::UndefinedVariable { .. })
        ));
        symbols.activate("late");
        assert!(symbols.get_stack_pos("late", loc(4)).is_ok());
    }
}
