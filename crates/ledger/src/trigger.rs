//! Trigger types for script execution.

use serde::{Deserialize, Serialize};

/// The reason a script is being executed.
///
/// `Verification` runs are read-only signature/permission checks;
/// `Application` runs may mutate ledger state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TriggerType {
    /// The script verifies a witness; state mutation is forbidden.
    Verification = 0x00,
    /// The script executes as an application; state mutation is allowed.
    Application = 0x10,
}

impl TriggerType {
    /// The numeric value pushed by `Neo.Runtime.GetTrigger`.
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_values_are_stable() {
        assert_eq!(TriggerType::Verification.as_byte(), 0x00);
        assert_eq!(TriggerType::Application.as_byte(), 0x10);
    }
}
