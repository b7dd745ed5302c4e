// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup wiring
// - infrastructure: in-memory stores, directory client, sample data
// - presentation: HTTP handlers and routing
// - application: access policy, ports, use cases, registration handshake
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
