pub mod achievement;
pub mod blog;
pub mod collection;
pub mod profile;
pub mod project;

pub use achievement::*;
pub use blog::*;
pub use collection::*;
pub use profile::*;
pub use project::*;
