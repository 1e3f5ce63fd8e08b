//! Role-based route access policy.
//!
//! One static table decides both what the sidebar shows and what the
//! navigation guard lets through. Keeping rendering and enforcement on the
//! same data is the whole point: a menu can never offer a link the guard
//! would then reject.
//!
//! The policy is pure. It never validates roles (the session layer owns
//! role well-formedness) and it never errors: an unknown combination simply
//! comes back as "no access".

mod nav;
mod routes;
mod table;

pub use nav::{nav_entries, NavEntry};
pub use routes::{
    normalize_path, CHOOSE_ROLE, DASHBOARD, DEMO_PREFIX, EVIDENCE, INSPECTIONS, ORGANIZATIONS,
    REPORTS, TASKS, TASK_EVIDENCE, USERS,
};
pub use table::{allowed_routes, can_access, ACCESS_TABLE};
