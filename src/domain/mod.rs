pub mod errors;
pub mod history;
pub mod logging;
pub mod quotes;
