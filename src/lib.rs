pub mod model;
pub mod output;
pub mod reader;
pub mod report;
pub mod validate;
