pub mod command;
pub mod fileformat;
pub mod pipeline;
pub mod runtime;
pub mod utils;
