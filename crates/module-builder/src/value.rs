//! # Argument Values
//!
//! Literal and deferred values that can be passed as constructor arguments,
//! call arguments, or contract addresses. Deferred values (contracts, static
//! call results, parameters, accounts) are resolved by the engine, never here.

use crate::handle::{Account, ContractHandle, ReadHandle};
use serde::{Serialize, Serializer};
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer.
    pub struct U256(4);
}

impl Serialize for U256 {
    // decimal string: JSON numbers lose precision past 2^53
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single argument in a declared argument list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArgumentValue {
    Uint(U256),
    Int(i64),
    Bool(bool),
    String(String),
    /// Hex encoded, `0x` prefixed.
    Bytes(String),
    Array(Vec<ArgumentValue>),
    /// The address of a declared contract.
    Contract(ContractHandle),
    /// The result of a declared static call.
    Read(ReadHandle),
    Account(Account),
    /// A module parameter, resolved from the deployment parameters.
    Parameter {
        module: String,
        name: String,
        default: Option<Box<ArgumentValue>>,
    },
}

impl ArgumentValue {
    /// Visits this value and every nested value, depth first.
    pub(crate) fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ArgumentValue)) {
        visit(self);
        match self {
            ArgumentValue::Array(items) => {
                for item in items {
                    item.walk(visit);
                }
            }
            ArgumentValue::Parameter {
                default: Some(default),
                ..
            } => default.walk(visit),
            _ => {}
        }
    }
}

impl From<U256> for ArgumentValue {
    fn from(value: U256) -> Self {
        ArgumentValue::Uint(value)
    }
}

impl From<u64> for ArgumentValue {
    fn from(value: u64) -> Self {
        ArgumentValue::Uint(U256::from(value))
    }
}

impl From<u32> for ArgumentValue {
    fn from(value: u32) -> Self {
        ArgumentValue::Uint(U256::from(value))
    }
}

impl From<i64> for ArgumentValue {
    fn from(value: i64) -> Self {
        ArgumentValue::Int(value)
    }
}

impl From<bool> for ArgumentValue {
    fn from(value: bool) -> Self {
        ArgumentValue::Bool(value)
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        ArgumentValue::String(value.to_string())
    }
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        ArgumentValue::String(value)
    }
}

impl From<&ContractHandle> for ArgumentValue {
    fn from(handle: &ContractHandle) -> Self {
        ArgumentValue::Contract(handle.clone())
    }
}

impl From<ContractHandle> for ArgumentValue {
    fn from(handle: ContractHandle) -> Self {
        ArgumentValue::Contract(handle)
    }
}

impl From<&ReadHandle> for ArgumentValue {
    fn from(handle: &ReadHandle) -> Self {
        ArgumentValue::Read(handle.clone())
    }
}

impl From<ReadHandle> for ArgumentValue {
    fn from(handle: ReadHandle) -> Self {
        ArgumentValue::Read(handle)
    }
}

impl From<Account> for ArgumentValue {
    fn from(account: Account) -> Self {
        ArgumentValue::Account(account)
    }
}

impl<T: Into<ArgumentValue>> From<Vec<T>> for ArgumentValue {
    fn from(items: Vec<T>) -> Self {
        ArgumentValue::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Builds a `Vec<ArgumentValue>` from anything convertible into [`ArgumentValue`].
///
/// ```rust
/// use module_builder::{args, ArgumentValue, U256};
///
/// let list = args![5u64, true, "label"];
/// assert_eq!(list[0], ArgumentValue::Uint(U256::from(5u64)));
/// assert_eq!(list.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::ArgumentValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::ArgumentValue::from($value)),+]
    };
}
