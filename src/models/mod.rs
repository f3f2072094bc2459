pub mod access_rule;
pub mod employee;
pub mod grant;
pub mod location;
pub mod org;
pub mod session;
pub mod ticket;

pub use access_rule::*;
pub use employee::*;
pub use grant::*;
pub use location::*;
pub use org::*;
pub use session::*;
pub use ticket::*;
