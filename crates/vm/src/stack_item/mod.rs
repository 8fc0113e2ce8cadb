//! The typed runtime values of the VM.
//!
//! `Array` and `Struct` have reference semantics: two stack slots may point
//! at the same backing vector, and mutation through one is visible through
//! the other. `Struct` differs only in that `SETITEM` stores a deep copy
//! when a struct is assigned into another compound.

mod encoding;
mod interop;

pub use encoding::{bigint_from_bytes, bigint_to_bytes};
pub use interop::{InteropObject, StorageContext};

use crate::limits::MAX_ARRAY_SIZE;
use crate::{VmError, VmResult};
use neo_core::{UInt160, UInt256};
use neo_cryptography::ECPoint;
use neo_ledger::{
    Account, Asset, Block, Contract, ContractParameter, Header, Transaction, TransactionAttribute,
    TransactionInput, TransactionOutput,
};
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use parking_lot::{Mutex, MutexGuard};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

static NEXT_COMPOUND_ID: AtomicUsize = AtomicUsize::new(1);

/// Shared backing storage for Array and Struct items.
///
/// Cloning the handle shares the elements and the identity id; reference
/// equality across aliases is part of the observable semantics.
#[derive(Debug, Clone)]
pub struct ArrayRef {
    inner: Arc<Mutex<Vec<StackItem>>>,
    id: usize,
}

impl ArrayRef {
    /// Creates a fresh compound with its own identity.
    pub fn new(items: Vec<StackItem>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(items)),
            id: NEXT_COMPOUND_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// The identity id; aliases share it, fresh copies do not.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Locks the elements for reading or writing.
    pub fn lock(&self) -> MutexGuard<'_, Vec<StackItem>> {
        self.inner.lock()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// True when there are no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Clones the element at `index`.
    pub fn get(&self, index: usize) -> VmResult<StackItem> {
        let items = self.inner.lock();
        items
            .get(index)
            .cloned()
            .ok_or(VmError::InvalidIndex {
                index: index as i64,
                length: items.len(),
            })
    }

    /// Replaces the element at `index`.
    pub fn set(&self, index: usize, item: StackItem) -> VmResult<()> {
        let mut items = self.inner.lock();
        let length = items.len();
        let slot = items.get_mut(index).ok_or(VmError::InvalidIndex {
            index: index as i64,
            length,
        })?;
        *slot = item;
        Ok(())
    }

    /// A snapshot of the elements.
    pub fn items(&self) -> Vec<StackItem> {
        self.inner.lock().clone()
    }
}

/// A value on the operand stack.
#[derive(Debug, Clone)]
pub enum StackItem {
    Boolean(bool),
    /// Arbitrary-precision signed integer.
    Integer(BigInt),
    /// Byte string.
    ByteArray(Vec<u8>),
    /// Mutable list with reference semantics.
    Array(ArrayRef),
    /// Like Array, but deep-copied when assigned into another compound.
    Struct(ArrayRef),
    /// Opaque ledger object.
    Interop(InteropObject),
}

impl StackItem {
    /// An integer item.
    pub fn integer(value: impl Into<BigInt>) -> StackItem {
        StackItem::Integer(value.into())
    }

    /// A byte-string item.
    pub fn bytes(value: impl Into<Vec<u8>>) -> StackItem {
        StackItem::ByteArray(value.into())
    }

    /// A fresh array item.
    pub fn array(items: Vec<StackItem>) -> StackItem {
        StackItem::Array(ArrayRef::new(items))
    }

    /// A fresh struct item.
    pub fn structured(items: Vec<StackItem>) -> StackItem {
        StackItem::Struct(ArrayRef::new(items))
    }

    /// The name used in type-fault messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            StackItem::Boolean(_) => "Boolean",
            StackItem::Integer(_) => "Integer",
            StackItem::ByteArray(_) => "ByteArray",
            StackItem::Array(_) => "Array",
            StackItem::Struct(_) => "Struct",
            StackItem::Interop(object) => object.type_name(),
        }
    }

    fn type_error(&self, expected: &'static str) -> VmError {
        VmError::InvalidType {
            expected,
            actual: self.type_name(),
        }
    }

    /// Coerces to an arbitrary-precision integer.
    pub fn as_bigint(&self) -> VmResult<BigInt> {
        match self {
            StackItem::Integer(value) => Ok(value.clone()),
            StackItem::Boolean(value) => Ok(BigInt::from(*value as u8)),
            StackItem::ByteArray(bytes) => Ok(bigint_from_bytes(bytes)),
            other => Err(other.type_error("Integer")),
        }
    }

    /// Coerces to a machine integer, faulting on fractions of the range.
    pub fn as_i64(&self) -> VmResult<i64> {
        let value = self.as_bigint()?;
        value.to_i64().ok_or(VmError::InvalidArguments {
            operation: "integer conversion",
            reason: format!("{value} does not fit in 64 bits"),
        })
    }

    /// Coerces to a non-negative index.
    pub fn as_index(&self, operation: &'static str) -> VmResult<usize> {
        let value = self.as_i64()?;
        if value < 0 {
            return Err(VmError::NegativeArgument { operation });
        }
        Ok(value as usize)
    }

    /// Coerces to a boolean.
    pub fn as_bool(&self) -> VmResult<bool> {
        match self {
            StackItem::Boolean(value) => Ok(*value),
            StackItem::Integer(value) => Ok(!value.is_zero()),
            StackItem::ByteArray(bytes) => Ok(bytes.iter().any(|b| *b != 0)),
            // Compounds and ledger objects are truthy by existence.
            StackItem::Array(_) | StackItem::Struct(_) | StackItem::Interop(_) => Ok(true),
        }
    }

    /// Coerces to a byte string.
    pub fn as_bytes(&self) -> VmResult<Vec<u8>> {
        match self {
            StackItem::ByteArray(bytes) => Ok(bytes.clone()),
            StackItem::Integer(value) => Ok(bigint_to_bytes(value)),
            StackItem::Boolean(value) => Ok(if *value { vec![0x01] } else { Vec::new() }),
            StackItem::Interop(object) => object
                .try_as_bytes()
                .ok_or_else(|| self.type_error("ByteArray")),
            other => Err(other.type_error("ByteArray")),
        }
    }

    /// Coerces to a compound reference (Array or Struct).
    pub fn as_array(&self) -> VmResult<ArrayRef> {
        match self {
            StackItem::Array(array) | StackItem::Struct(array) => Ok(array.clone()),
            other => Err(other.type_error("Array")),
        }
    }

    /// The wrapped ledger object.
    pub fn as_interop(&self) -> VmResult<&InteropObject> {
        match self {
            StackItem::Interop(object) => Ok(object),
            other => Err(other.type_error("InteropInterface")),
        }
    }

    pub fn as_block(&self) -> VmResult<Arc<Block>> {
        match self.as_interop()? {
            InteropObject::Block(block) => Ok(block.clone()),
            _ => Err(self.type_error("Block")),
        }
    }

    /// Header accessors accept both headers and whole blocks.
    pub fn as_header(&self) -> VmResult<Header> {
        match self.as_interop()? {
            InteropObject::Header(header) => Ok((**header).clone()),
            InteropObject::Block(block) => Ok(block.header.clone()),
            _ => Err(self.type_error("Header")),
        }
    }

    pub fn as_transaction(&self) -> VmResult<Arc<Transaction>> {
        match self.as_interop()? {
            InteropObject::Transaction(tx) => Ok(tx.clone()),
            _ => Err(self.type_error("Transaction")),
        }
    }

    pub fn as_input(&self) -> VmResult<Arc<TransactionInput>> {
        match self.as_interop()? {
            InteropObject::Input(input) => Ok(input.clone()),
            _ => Err(self.type_error("Input")),
        }
    }

    pub fn as_output(&self) -> VmResult<Arc<TransactionOutput>> {
        match self.as_interop()? {
            InteropObject::Output(output) => Ok(output.clone()),
            _ => Err(self.type_error("Output")),
        }
    }

    pub fn as_attribute(&self) -> VmResult<Arc<TransactionAttribute>> {
        match self.as_interop()? {
            InteropObject::Attribute(attribute) => Ok(attribute.clone()),
            _ => Err(self.type_error("Attribute")),
        }
    }

    pub fn as_account(&self) -> VmResult<Arc<Account>> {
        match self.as_interop()? {
            InteropObject::Account(account) => Ok(account.clone()),
            _ => Err(self.type_error("Account")),
        }
    }

    pub fn as_asset(&self) -> VmResult<Arc<Asset>> {
        match self.as_interop()? {
            InteropObject::Asset(asset) => Ok(asset.clone()),
            _ => Err(self.type_error("Asset")),
        }
    }

    pub fn as_contract(&self) -> VmResult<Arc<Contract>> {
        match self.as_interop()? {
            InteropObject::Contract(contract) => Ok(contract.clone()),
            _ => Err(self.type_error("Contract")),
        }
    }

    pub fn as_storage_context(&self) -> VmResult<StorageContext> {
        match self.as_interop()? {
            InteropObject::StorageContext(context) => Ok(*context),
            _ => Err(self.type_error("StorageContext")),
        }
    }

    /// A public key, from the wrapper or a 33-byte encoding.
    pub fn as_ec_point(&self) -> VmResult<ECPoint> {
        if let StackItem::Interop(InteropObject::EcPoint(point)) = self {
            return Ok(point.clone());
        }
        let bytes = self.as_bytes()?;
        ECPoint::decode(&bytes).map_err(|_| self.type_error("ECPoint"))
    }

    /// A 160-bit hash, from the wrapper or a 20-byte encoding.
    pub fn as_uint160(&self) -> VmResult<UInt160> {
        if let StackItem::Interop(InteropObject::Hash160(hash)) = self {
            return Ok(*hash);
        }
        let bytes = self.as_bytes()?;
        UInt160::from_bytes(&bytes).map_err(|_| self.type_error("UInt160"))
    }

    /// A 256-bit hash, from the wrapper or a 32-byte encoding.
    pub fn as_uint256(&self) -> VmResult<UInt256> {
        if let StackItem::Interop(InteropObject::Hash256(hash)) = self {
            return Ok(*hash);
        }
        let bytes = self.as_bytes()?;
        UInt256::from_bytes(&bytes).map_err(|_| self.type_error("UInt256"))
    }

    /// Structural equality for the primitive items, identity for compounds
    /// and ledger objects. A primitive compares equal to a primitive of
    /// another variant when their canonical byte encodings match.
    pub fn equals(&self, other: &StackItem) -> bool {
        use StackItem::*;
        match (self, other) {
            (Boolean(a), Boolean(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (ByteArray(a), ByteArray(b)) => a == b,
            (Boolean(_) | Integer(_) | ByteArray(_), Boolean(_) | Integer(_) | ByteArray(_)) => {
                match (self.as_bytes(), other.as_bytes()) {
                    (Ok(a), Ok(b)) => a == b,
                    _ => false,
                }
            }
            (Array(a), Array(b)) | (Struct(a), Struct(b)) => a.id() == b.id(),
            (Interop(a), Interop(b)) => a.equals(b),
            _ => false,
        }
    }

    /// The copy stored when this value is assigned into a struct slot:
    /// structs are cloned recursively, everything else keeps its identity.
    pub fn clone_for_struct(&self) -> StackItem {
        match self {
            StackItem::Struct(array) => {
                let items = array.lock().iter().map(StackItem::clone_for_struct).collect();
                StackItem::Struct(ArrayRef::new(items))
            }
            other => other.clone(),
        }
    }

    /// Projects the item into the serializable contract-parameter tree
    /// carried by notifications. Faults on self-referential compounds.
    pub fn to_contract_parameter(&self) -> VmResult<ContractParameter> {
        let mut visiting = HashSet::new();
        self.to_contract_parameter_inner(&mut visiting)
    }

    fn to_contract_parameter_inner(
        &self,
        visiting: &mut HashSet<usize>,
    ) -> VmResult<ContractParameter> {
        Ok(match self {
            StackItem::Boolean(value) => ContractParameter::Boolean(*value),
            StackItem::Integer(value) => ContractParameter::Integer(value.clone()),
            StackItem::ByteArray(bytes) => ContractParameter::ByteArray(bytes.clone()),
            StackItem::Array(array) | StackItem::Struct(array) => {
                if !visiting.insert(array.id()) {
                    return Err(VmError::invalid_arguments(
                        "contract parameter",
                        "self-referential compound",
                    ));
                }
                let items = array.items();
                let mut parameters = Vec::with_capacity(items.len());
                for item in &items {
                    parameters.push(item.to_contract_parameter_inner(visiting)?);
                }
                visiting.remove(&array.id());
                ContractParameter::Array(parameters)
            }
            StackItem::Interop(object) => match object {
                InteropObject::Hash160(hash) => ContractParameter::Hash160(*hash),
                InteropObject::Hash256(hash) => ContractParameter::Hash256(*hash),
                InteropObject::EcPoint(point) => ContractParameter::PublicKey(point.clone()),
                _ => ContractParameter::InteropInterface,
            },
        })
    }

}

/// Checks an array length against the limit.
pub(crate) fn check_array_size(size: usize) -> VmResult<()> {
    if size > MAX_ARRAY_SIZE {
        return Err(VmError::ArrayTooLarge {
            size,
            max: MAX_ARRAY_SIZE,
        });
    }
    Ok(())
}

impl From<bool> for StackItem {
    fn from(value: bool) -> Self {
        StackItem::Boolean(value)
    }
}

impl From<BigInt> for StackItem {
    fn from(value: BigInt) -> Self {
        StackItem::Integer(value)
    }
}

impl From<Vec<u8>> for StackItem {
    fn from(value: Vec<u8>) -> Self {
        StackItem::ByteArray(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_buffer_round_trip() {
        for value in [0i64, 1, -1, 127, 128, -128, 255, 4660, -70000] {
            let item = StackItem::integer(value);
            let bytes = item.as_bytes().unwrap();
            assert_eq!(
                StackItem::bytes(bytes).as_bigint().unwrap(),
                BigInt::from(value)
            );
        }
    }

    #[test]
    fn boolean_coercions() {
        assert_eq!(StackItem::Boolean(true).as_bytes().unwrap(), vec![0x01]);
        assert!(StackItem::Boolean(false).as_bytes().unwrap().is_empty());
        assert_eq!(StackItem::Boolean(true).as_bigint().unwrap(), BigInt::from(1));
        assert!(!StackItem::bytes(vec![0, 0]).as_bool().unwrap());
        assert!(StackItem::bytes(vec![0, 2]).as_bool().unwrap());
    }

    #[test]
    fn coercions_fail_with_typed_errors() {
        let array = StackItem::array(vec![]);
        assert!(matches!(
            array.as_bigint(),
            Err(VmError::InvalidType { expected: "Integer", .. })
        ));
        assert!(matches!(
            array.as_bytes(),
            Err(VmError::InvalidType { expected: "ByteArray", .. })
        ));
        assert!(matches!(
            StackItem::integer(1).as_array(),
            Err(VmError::InvalidType { expected: "Array", .. })
        ));
    }

    #[test]
    fn array_aliasing_is_observable() {
        let shared = StackItem::array(vec![StackItem::integer(1)]);
        let alias = shared.clone();
        shared.as_array().unwrap().set(0, StackItem::integer(9)).unwrap();
        assert_eq!(
            alias.as_array().unwrap().get(0).unwrap().as_bigint().unwrap(),
            BigInt::from(9)
        );
        assert!(shared.equals(&alias));
    }

    #[test]
    fn fresh_arrays_are_not_equal() {
        let a = StackItem::array(vec![]);
        let b = StackItem::array(vec![]);
        assert!(!a.equals(&b));
    }

    #[test]
    fn struct_clone_is_deep_and_fresh() {
        let inner = StackItem::structured(vec![StackItem::integer(1)]);
        let outer = StackItem::structured(vec![inner.clone()]);
        let copy = outer.clone_for_struct();

        // Mutating the original inner struct must not reach the copy.
        inner.as_array().unwrap().set(0, StackItem::integer(42)).unwrap();
        let copied_inner = copy.as_array().unwrap().get(0).unwrap();
        assert_eq!(
            copied_inner.as_array().unwrap().get(0).unwrap().as_bigint().unwrap(),
            BigInt::from(1)
        );
        assert!(!copy.equals(&outer));
    }

    #[test]
    fn struct_clone_keeps_array_identity() {
        let array = StackItem::array(vec![StackItem::integer(7)]);
        let outer = StackItem::structured(vec![array.clone()]);
        let copy = outer.clone_for_struct();
        array.as_array().unwrap().set(0, StackItem::integer(8)).unwrap();
        let through_copy = copy.as_array().unwrap().get(0).unwrap();
        assert_eq!(
            through_copy.as_array().unwrap().get(0).unwrap().as_bigint().unwrap(),
            BigInt::from(8)
        );
    }

    #[test]
    fn cross_variant_equality_uses_canonical_bytes() {
        assert!(StackItem::integer(1).equals(&StackItem::bytes(vec![0x01])));
        assert!(StackItem::integer(0).equals(&StackItem::bytes(vec![])));
        assert!(StackItem::Boolean(true).equals(&StackItem::integer(1)));
        assert!(!StackItem::integer(1).equals(&StackItem::bytes(vec![0x01, 0x00])));
    }

    #[test]
    fn contract_parameter_rejects_cycles() {
        let array = StackItem::array(vec![StackItem::integer(0)]);
        array.as_array().unwrap().set(0, array.clone()).unwrap();
        assert!(array.to_contract_parameter().is_err());
    }

    #[test]
    fn contract_parameter_projects_wrappers() {
        let item = StackItem::Interop(InteropObject::Hash160(UInt160::zero()));
        assert!(matches!(
            item.to_contract_parameter().unwrap(),
            ContractParameter::Hash160(_)
        ));
    }
}
