//! Theme registries and the two resolution policies.

pub(crate) mod registry;
