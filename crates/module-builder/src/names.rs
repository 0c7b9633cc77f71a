//! Name validation and default id derivation.

use crate::error::ModuleError;
use regex::Regex;
use std::sync::OnceLock;

fn module_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid regex"))
}

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid regex"))
}

fn qualified_contract_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^:#~]+:[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid regex"))
}

fn method_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\([^()]*\))?$").expect("valid regex"))
}

fn address_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("valid regex"))
}

pub(crate) fn validate_module_name(name: &str) -> Result<(), ModuleError> {
    if module_name_re().is_match(name) {
        Ok(())
    } else {
        Err(ModuleError::InvalidModuleName(name.to_string()))
    }
}

pub(crate) fn validate_identifier(name: &str) -> Result<(), ModuleError> {
    if identifier_re().is_match(name) {
        Ok(())
    } else {
        Err(ModuleError::InvalidIdentifier(name.to_string()))
    }
}

/// Accepts `Counter` or a fully qualified `contracts/Counter.sol:Counter`.
pub(crate) fn validate_contract_name(name: &str) -> Result<(), ModuleError> {
    if identifier_re().is_match(name) || qualified_contract_re().is_match(name) {
        Ok(())
    } else {
        Err(ModuleError::InvalidContractName(name.to_string()))
    }
}

/// Accepts `incBy` or `incBy(uint256)`.
pub(crate) fn validate_method_name(name: &str) -> Result<(), ModuleError> {
    if method_re().is_match(name) {
        Ok(())
    } else {
        Err(ModuleError::InvalidMethodName(name.to_string()))
    }
}

pub(crate) fn is_address(value: &str) -> bool {
    address_re().is_match(value)
}

/// Local id used when a contract is declared without an explicit id.
pub(crate) fn default_contract_id(contract_name: &str) -> &str {
    contract_name
        .rsplit_once(':')
        .map(|(_, name)| name)
        .unwrap_or(contract_name)
}

/// Method name without its signature.
pub(crate) fn bare_method(method: &str) -> &str {
    method.split_once('(').map(|(name, _)| name).unwrap_or(method)
}
