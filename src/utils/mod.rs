pub mod extractor;
pub mod parameter_error_handler;
pub mod random_code;
pub mod validate;

pub use extractor::{SafeClassId, SafeLectureDate};
pub use parameter_error_handler::json_error_handler;
pub use random_code::generate_random_code;
