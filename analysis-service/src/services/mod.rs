pub mod completion;
pub mod identity;
pub mod media;
pub mod prompt;
