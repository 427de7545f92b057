mod join;
mod options;
mod order;
mod projection;
mod selector;
mod update_field;

pub use join::*;
pub use options::*;
pub use order::*;
pub use projection::*;
pub use selector::*;
pub use update_field::*;
