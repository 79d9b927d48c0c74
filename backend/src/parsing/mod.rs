//! Movement payload parsing.

pub mod json_parser;

pub use json_parser::{movements_to_json, parse_movements_json, parse_movements_json_str};
