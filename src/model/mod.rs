pub mod criteria;
pub mod error;
pub mod level;
pub mod record;
pub mod schema;
