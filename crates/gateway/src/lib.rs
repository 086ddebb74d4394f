//! # Domain Catcher Gateway
//!
//! Single point of contact with the domain registry: session handling,
//! availability probes and registration orders.

mod registrar;
mod session;
mod transip;

pub use registrar::RegistrarGateway;
pub use session::{Session, SessionToken};
pub use transip::{parse_verdict, GatewayConfig, TransipGateway};
