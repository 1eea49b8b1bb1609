pub mod bounds;
pub mod budget;
pub mod errors;
pub mod observer;
pub mod options;
pub mod problem;

pub use bounds::*;
pub use budget::*;
pub use errors::*;
pub use observer::*;
pub use options::OptionList;
pub use problem::*;
