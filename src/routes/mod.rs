/// Router Module Index
///
/// Routing is split along the site's three access tiers, so access control is
/// applied explicitly at the module level rather than per handler.

/// Routes outside the gate: the gate endpoints themselves, health, and the
/// deploy hook. Anything else added here is reachable without a password.
pub mod public;

/// The gated content pages. The whole module sits behind the access-gate
/// middleware; handlers assume the caller has already passed.
pub mod content;

/// Routes restricted to staff users. Every handler re-checks the 'staff'
/// role after bearer-token authentication.
pub mod admin;
