pub mod course;
pub mod document;
pub mod error;
pub mod links;
pub mod matcher;
pub mod result;
pub mod text;

pub use course::CoursePage;
pub use document::{CourseDocument, load_documents};
pub use error::ScanError;
pub use links::LinkIndex;
pub use result::LinkRecord;
pub use text::flatten;
