//! Instruction set and chunk encoding shared by `aster-compiler` and
//! `aster-vm`, so the two agree on instruction layout without the VM
//! depending on the compiler crate.

pub mod chunk;
pub mod op;

pub use chunk::Chunk;
pub use op::Op;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_patching_computes_forward_offset() {
        let mut chunk = Chunk::new("test");
        let jmp = chunk.emit(Op::JumpIfFalse(0), 1);
        chunk.emit(Op::True, 1);
        chunk.patch_jump(jmp);
        assert_eq!(chunk.code[jmp], Op::JumpIfFalse(1));
    }

    #[test]
    fn loop_emits_negative_offset() {
        let mut chunk = Chunk::new("test");
        let top = chunk.code.len();
        chunk.emit(Op::True, 1);
        chunk.emit_loop(top, 1);
        assert_eq!(chunk.code[1], Op::Jump(-2));
    }

    #[test]
    fn constant_pools_dedupe() {
        let mut chunk = Chunk::new("test");
        let a = chunk.add_string("hi");
        let b = chunk.add_string("hi");
        assert_eq!(a, b);
        assert_eq!(chunk.strings.len(), 1);
    }
}
