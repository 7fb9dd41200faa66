//! TCP connect probe for outbound internet connectivity.
//!
//! ```no_run
//! use netcheck::{ConnectivityChecker, Policy};
//!
//! let mut checker = ConnectivityChecker::new()
//!     .with_host("1.1.1.1")
//!     .with_port(53)
//!     .with_timeout(0.8)
//!     .with_policy(Policy::EXCEPTION_ON_UNAVAILABILITY);
//!
//! match checker.check() {
//!     Ok(online) => println!("online: {online}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//!
//! // Never fails; falls back to `true` on any error.
//! let _ = netcheck::has_internet();
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod net;
pub mod policy;

pub use error::CheckError;
pub use logger::{Logger, TracingLogger};
pub use net::{has_internet, ConnectivityChecker};
pub use policy::{Policy, PolicyFlag};
