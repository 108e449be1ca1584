//! # Role Capabilities
//!
//! Static mapping from [`Role`] to the set of things that role may do.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Capability Check Flow                               │
//! │                                                                         │
//! │  UI builds menu ──► capabilities(role) ──► &'static [Capability]       │
//! │                                                                         │
//! │  Guarded action ──► is_allowed(role, cap) ──► bool                     │
//! │                                                                         │
//! │  The table is const data; the check is a pure function. There is no    │
//! │  per-user permission storage and no runtime mutation of the table.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::Role;

/// A thing a signed-in user may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// View the sales dashboard.
    ViewDashboard,
    /// Ring up sales at the terminal.
    OperateTerminal,
    /// Edit products and stock levels.
    ManageInventory,
    /// Browse sale history reports.
    ViewReports,
    /// Branch administration and data export.
    ManageCloudSettings,
}

const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::ViewDashboard,
    Capability::OperateTerminal,
    Capability::ManageInventory,
    Capability::ViewReports,
    Capability::ManageCloudSettings,
];

const MANAGER_CAPABILITIES: &[Capability] = &[
    Capability::ViewDashboard,
    Capability::OperateTerminal,
    Capability::ManageInventory,
    Capability::ViewReports,
];

const CASHIER_CAPABILITIES: &[Capability] = &[Capability::OperateTerminal];

/// Returns the full capability set for a role.
pub const fn capabilities(role: Role) -> &'static [Capability] {
    match role {
        Role::Admin => ADMIN_CAPABILITIES,
        Role::Manager => MANAGER_CAPABILITIES,
        Role::Cashier => CASHIER_CAPABILITIES,
    }
}

/// Checks whether a role holds a capability.
pub fn is_allowed(role: Role, capability: Capability) -> bool {
    capabilities(role).contains(&capability)
}

// =============================================================================
// Unit Tests
// =============================================================================
