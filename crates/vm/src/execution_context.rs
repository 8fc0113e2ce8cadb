//! The per-frame execution state.

use crate::evaluation_stack::EvaluationStack;
use crate::script::Script;
use neo_core::UInt160;

/// One invocation frame.
///
/// The operand stacks are shared handles: a derived frame created by
/// CALL/APPCALL sees the same stacks as its caller. Everything else is
/// frame-local.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// The executing script.
    pub script: Script,
    /// Offset of the next instruction.
    pub pc: usize,
    /// Main operand stack.
    pub stack: EvaluationStack,
    /// Alt operand stack.
    pub alt_stack: EvaluationStack,
    /// Depth of this frame in the invocation tree, starting at 1.
    pub depth: u32,
    /// Restricts the frame to push opcodes and RET.
    pub push_only: bool,
    /// Script hash of the frame that invoked this one.
    pub calling_script_hash: Option<UInt160>,
    /// Script hash of the root frame; constant across the whole tree.
    pub entry_script_hash: UInt160,
    /// Set by RET (and TAILCALL returns) to end the frame.
    pub done: bool,
}

impl ExecutionContext {
    /// Creates a root frame over fresh stacks.
    pub fn new(script: Script, push_only: bool, calling_script_hash: Option<UInt160>) -> Self {
        let entry_script_hash = script.hash();
        Self {
            script,
            pc: 0,
            stack: EvaluationStack::new(),
            alt_stack: EvaluationStack::new(),
            depth: 1,
            push_only,
            calling_script_hash,
            entry_script_hash,
            done: false,
        }
    }

    /// The hash of the executing script.
    pub fn script_hash(&self) -> UInt160 {
        self.script.hash()
    }

    /// Derives the frame for a nested invocation: same stacks, new script,
    /// one level deeper.
    pub fn derive(&self, script: Script) -> Self {
        Self {
            script,
            pc: 0,
            stack: self.stack.clone(),
            alt_stack: self.alt_stack.clone(),
            depth: self.depth + 1,
            push_only: false,
            calling_script_hash: Some(self.script_hash()),
            entry_script_hash: self.entry_script_hash,
            done: false,
        }
    }

    /// Derives the frame for CALL: same script, jumping to `target`.
    pub fn derive_call(&self, target: usize) -> Self {
        let mut frame = self.derive(self.script.clone());
        frame.pc = target;
        frame.push_only = self.push_only;
        frame
    }
}
