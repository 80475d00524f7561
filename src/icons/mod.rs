pub mod library;
pub mod markup;
pub mod scanner;

pub use library::{IconDescriptor, IconLibrary};
pub use scanner::scan;
