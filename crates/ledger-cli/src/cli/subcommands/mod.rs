mod draft;
mod filter;

pub use draft::DraftCommands;
pub use filter::FilterCommands;
