pub mod api;
pub mod chrono_util;
pub mod convert;
pub mod export;
pub mod fs_json_util;
pub mod igc;
pub mod parser;
pub mod schema;
