//! Access checks over an employee's grant set.
//!
//! A grant is a (module, role) pair. Every check here is a pure function of
//! the grant slice it is handed: holding a role in one module never implies
//! anything about the other module, and unrelated grants never change the
//! answer for the pair being queried.

use crate::models::{EmployeeGrant, GrantPair, ModuleCode, RoleCode};

/// Does this grant set hold the exact (module, role) pair?
pub fn has_role(grants: &[EmployeeGrant], module: ModuleCode, role: RoleCode) -> bool {
    grants
        .iter()
        .any(|g| g.module_code == module && g.role_code == role)
}

/// Does this grant set hold any role at all within the module?
pub fn has_any_role(grants: &[EmployeeGrant], module: ModuleCode) -> bool {
    grants.iter().any(|g| g.module_code == module)
}

/// System administrators hold the admin role in the facility module. That
/// single pair gates plant-wide configuration such as the rules editor and
/// the job master.
pub fn is_system_admin(grants: &[EmployeeGrant]) -> bool {
    has_role(grants, ModuleCode::Facility, RoleCode::Admin)
}

/// Collapse requested pairs into a duplicate-free set in canonical order:
/// module first, then role. Submitting the same set twice yields the same
/// result.
pub fn canonicalize_pairs(pairs: &[GrantPair]) -> Vec<GrantPair> {
    let mut pairs: Vec<GrantPair> = pairs.to_vec();
    pairs.sort();
    pairs.dedup();
    pairs
}
