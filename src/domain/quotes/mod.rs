//! Quote list aggregate backing the home-screen widget.

pub mod entities;
pub mod services;

pub use entities::*;
pub use services::*;
