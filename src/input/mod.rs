pub mod parser;

pub use parser::{parse_pair, parse_points};
