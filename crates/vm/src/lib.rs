//! The legacy Neo stack-based virtual machine.
//!
//! The VM interprets a bytecode script against a blockchain view, supplied
//! through the [`neo_ledger::Blockchain`] facade, and returns the final
//! operand stack, a halt/fault state, the remaining gas and the actions
//! (logs and notifications) the script emitted.
//!
//! ```
//! use neo_ledger::MemoryBlockchain;
//! use neo_vm::{EngineConfig, ExecutionEngine, OpCode, ScriptBuilder, VmState};
//! use neo_core::Fixed8;
//! use std::sync::Arc;
//!
//! let mut builder = ScriptBuilder::new();
//! builder.emit_push_int(2).emit_push_int(3).emit(OpCode::ADD).emit(OpCode::RET);
//!
//! let chain = Arc::new(MemoryBlockchain::new());
//! let mut engine = ExecutionEngine::new(chain, EngineConfig::default());
//! let result = engine.execute_script(builder.to_bytes(), Fixed8::from_int(1).unwrap());
//! assert_eq!(result.state, VmState::Halt);
//! ```

pub mod error;
pub mod evaluation_stack;
pub mod execution_context;
pub mod execution_engine;
pub mod limits;
pub mod op_code;
pub mod ops;
pub mod script;
pub mod script_builder;
pub mod stack_item;
pub mod syscall;

pub use error::{VmError, VmResult};
pub use evaluation_stack::EvaluationStack;
pub use execution_context::ExecutionContext;
pub use execution_engine::{EngineConfig, ExecutionEngine, ExecutionResult, VmState};
pub use op_code::OpCode;
pub use script::Script;
pub use script_builder::ScriptBuilder;
pub use stack_item::{ArrayRef, InteropObject, StackItem, StorageContext};
