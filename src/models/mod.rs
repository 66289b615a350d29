mod address;
mod contact;
mod lead;
mod organisation;
mod website;

pub use address::*;
pub use contact::*;
pub use lead::*;
pub use organisation::*;
pub use website::*;
