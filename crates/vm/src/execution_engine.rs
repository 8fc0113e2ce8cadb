//! The execution engine: runs scripts to completion, handling nested
//! invocations, gas accounting and the uniform per-step checks.

use crate::execution_context::ExecutionContext;
use crate::limits::{MAX_INVOCATION_STACK_SIZE, MAX_STACK_SIZE};
use crate::ops::{self, OpArgs};
use crate::script::Script;
use crate::stack_item::StackItem;
use crate::{VmError, VmResult};
use neo_core::{Fixed8, UInt160, UInt256};
use neo_ledger::{
    Action, ActionBase, Blockchain, ContractParameter, LogAction, NotificationAction,
    ScriptContainer, TriggerType,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Final machine state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmState {
    /// The script ran to completion.
    Halt,
    /// A fault terminated the whole invocation tree.
    Fault,
}

/// Static inputs of a run: what triggered it and on whose behalf.
#[derive(Clone)]
pub struct EngineConfig {
    pub trigger: TriggerType,
    /// The transaction or block being executed, if any. Signature checks
    /// and witness checks fault without one.
    pub container: Option<ScriptContainer>,
    /// Block height recorded on emitted actions; defaults to the height
    /// the block under construction will have.
    pub block_index: Option<u32>,
    /// Position of the transaction within its block, recorded on actions.
    pub transaction_index: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trigger: TriggerType::Application,
            container: None,
            block_index: None,
            transaction_index: 0,
        }
    }
}

/// The observable outcome of a run.
#[derive(Debug)]
pub struct ExecutionResult {
    pub state: VmState,
    /// Bottom-to-top snapshot of the main stack.
    pub stack: Vec<StackItem>,
    /// Actions emitted across the whole invocation tree, in order.
    pub actions: Vec<Action>,
    pub gas_consumed: Fixed8,
    /// The fault that ended the run, when `state` is `Fault`.
    pub fault: Option<VmError>,
}

/// Interprets scripts against a blockchain view.
///
/// One engine executes one invocation tree at a time; `execute_script`
/// resets the per-run state (gas, actions, created contracts).
pub struct ExecutionEngine {
    blockchain: Arc<dyn Blockchain>,
    trigger: TriggerType,
    container: Option<ScriptContainer>,
    block_index: Option<u32>,
    transaction_index: u32,
    initial_gas: Fixed8,
    gas_left: Fixed8,
    action_index: u32,
    actions: Vec<Action>,
    /// Contract hash (hex of the little-endian bytes) to the script hash
    /// that created it during this run.
    created_contracts: HashMap<String, UInt160>,
}

impl ExecutionEngine {
    /// Creates an engine over a blockchain view.
    pub fn new(blockchain: Arc<dyn Blockchain>, config: EngineConfig) -> Self {
        Self {
            blockchain,
            trigger: config.trigger,
            container: config.container,
            block_index: config.block_index,
            transaction_index: config.transaction_index,
            initial_gas: Fixed8::ZERO,
            gas_left: Fixed8::ZERO,
            action_index: 0,
            actions: Vec::new(),
            created_contracts: HashMap::new(),
        }
    }

    /// The blockchain view this engine executes against.
    pub fn blockchain(&self) -> &Arc<dyn Blockchain> {
        &self.blockchain
    }

    /// The trigger of the current run.
    pub fn trigger(&self) -> TriggerType {
        self.trigger
    }

    /// The script container, if any.
    pub fn container(&self) -> Option<&ScriptContainer> {
        self.container.as_ref()
    }

    /// Remaining gas in the current run.
    pub fn gas_left(&self) -> Fixed8 {
        self.gas_left
    }

    /// Executes a script with the given gas budget.
    pub fn execute_script(&mut self, code: Vec<u8>, gas: Fixed8) -> ExecutionResult {
        self.execute(code, gas, false)
    }

    /// Executes a script restricted to push opcodes and RET, as used for
    /// witness invocation scripts.
    pub fn execute_push_only_script(&mut self, code: Vec<u8>, gas: Fixed8) -> ExecutionResult {
        self.execute(code, gas, true)
    }

    fn execute(&mut self, code: Vec<u8>, gas: Fixed8, push_only: bool) -> ExecutionResult {
        self.initial_gas = gas;
        self.gas_left = gas;
        self.action_index = 0;
        self.actions = Vec::new();
        self.created_contracts = HashMap::new();

        let script = match Script::new(code) {
            Ok(script) => script,
            Err(error) => return self.result(Vec::new(), Some(error)),
        };
        let mut ctx = ExecutionContext::new(script, push_only, None);
        let fault = self.run(&mut ctx).err();
        self.result(ctx.stack.items(), fault)
    }

    fn result(&mut self, stack: Vec<StackItem>, fault: Option<VmError>) -> ExecutionResult {
        if let Some(error) = &fault {
            debug!(target: "vm", %error, "execution faulted");
        }
        ExecutionResult {
            state: if fault.is_none() {
                VmState::Halt
            } else {
                VmState::Fault
            },
            stack,
            actions: std::mem::take(&mut self.actions),
            gas_consumed: self.initial_gas - self.gas_left,
            fault,
        }
    }

    /// Runs a frame until it completes. Nested invocations recurse through
    /// here; any fault unwinds the whole tree.
    pub(crate) fn run(&mut self, ctx: &mut ExecutionContext) -> VmResult<()> {
        loop {
            if ctx.pc >= ctx.script.len() {
                ctx.done = true;
            }
            if ctx.done {
                return Ok(());
            }
            self.step(ctx)?;
        }
    }

    /// Executes one instruction, applying the per-step invariants in
    /// order: push-only, underflow, gas, invocation depth, stack size.
    fn step(&mut self, ctx: &mut ExecutionContext) -> VmResult<()> {
        let decoded = ops::decode(ctx)?;
        trace!(target: "vm", op = ?decoded.op, pc = ctx.pc, depth = ctx.depth, "step");

        let main_len = ctx.stack.len();
        let alt_len = ctx.alt_stack.len();
        if main_len < decoded.num_in {
            return Err(VmError::StackUnderflow {
                needed: decoded.num_in,
                available: main_len,
            });
        }
        if alt_len < decoded.num_in_alt {
            return Err(VmError::StackUnderflow {
                needed: decoded.num_in_alt,
                available: alt_len,
            });
        }

        self.consume_gas(decoded.fee)?;

        if ctx.depth + decoded.invocation > MAX_INVOCATION_STACK_SIZE {
            return Err(VmError::InvocationStackOverflow {
                max: MAX_INVOCATION_STACK_SIZE,
            });
        }

        let projected = (main_len + alt_len) as isize - (decoded.num_in + decoded.num_in_alt) as isize
            + (decoded.num_out + decoded.num_out_alt) as isize
            + decoded.modify
            + decoded.modify_alt;
        if projected > MAX_STACK_SIZE as isize {
            return Err(VmError::StackOverflow {
                max: MAX_STACK_SIZE,
            });
        }

        let main = ctx.stack.pop_n(decoded.num_in)?;
        let alt = ctx.alt_stack.pop_n(decoded.num_in_alt)?;
        let output = (decoded.handler)(
            self,
            ctx,
            OpArgs {
                operand: decoded.operand,
                main,
                alt,
            },
        )?;
        for item in output.main {
            ctx.stack.push(item);
        }
        for item in output.alt {
            ctx.alt_stack.push(item);
        }
        Ok(())
    }

    /// Subtracts a fee, faulting when the budget cannot cover it.
    fn consume_gas(&mut self, fee: i64) -> VmResult<()> {
        if self.gas_left.raw() < fee {
            return Err(VmError::OutOfGas);
        }
        self.gas_left = Fixed8::from_raw(self.gas_left.raw() - fee);
        Ok(())
    }

    /// Whether `hash` is in the container's authenticated witness set.
    pub fn check_witness(&self, hash: &UInt160) -> VmResult<bool> {
        let container = self
            .container
            .as_ref()
            .ok_or(VmError::UnexpectedScriptContainer)?;
        Ok(container.witness_hashes().contains(hash))
    }

    /// The canonical signed message of the container.
    pub fn container_message(&self) -> VmResult<Vec<u8>> {
        let container = self
            .container
            .as_ref()
            .ok_or(VmError::UnexpectedScriptContainer)?;
        Ok(container.message())
    }

    /// Faults unless the run may mutate ledger state.
    pub fn require_application_trigger(&self) -> VmResult<()> {
        if self.trigger != TriggerType::Application {
            return Err(VmError::InvalidTrigger);
        }
        Ok(())
    }

    fn action_base(&mut self, script_hash: UInt160) -> ActionBase {
        let base = ActionBase {
            block_index: self
                .block_index
                .unwrap_or_else(|| self.blockchain.current_height() + 1),
            transaction_index: self.transaction_index,
            transaction_hash: self
                .container
                .as_ref()
                .and_then(|c| c.as_transaction().map(|tx| tx.hash()))
                .unwrap_or_else(UInt256::zero),
            index: self.action_index,
            script_hash,
        };
        self.action_index += 1;
        base
    }

    /// Appends a notification action.
    pub fn emit_notification(&mut self, script_hash: UInt160, args: ContractParameter) {
        let base = self.action_base(script_hash);
        self.actions
            .push(Action::Notification(NotificationAction { base, args }));
    }

    /// Appends a log action.
    pub fn emit_log(&mut self, script_hash: UInt160, message: String) {
        let base = self.action_base(script_hash);
        self.actions.push(Action::Log(LogAction { base, message }));
    }

    /// Records that the running script created a contract.
    pub(crate) fn record_created_contract(&mut self, contract: UInt160, creator: UInt160) {
        self.created_contracts.insert(contract.to_hex(), creator);
    }

    /// The script hash that created `contract` during this run, if any.
    pub(crate) fn contract_creator(&self, contract: &UInt160) -> Option<UInt160> {
        self.created_contracts.get(&contract.to_hex()).copied()
    }
}
