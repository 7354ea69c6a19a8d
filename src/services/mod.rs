// Tabshell services
// Stateless helpers and infrastructure: omnibox resolution, persistence.

pub mod navigation_resolver;
pub mod persistence;
