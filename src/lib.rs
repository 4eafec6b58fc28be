mod error;
pub use error::Error;

mod multipart;
pub use multipart::{MultipartBuilder, BOUNDARY_LEN};

mod part;
pub use part::{EmptyFilePolicy, Part};

mod request;
pub use request::RequestDescriptor;

/// Creates an empty builder with a fresh random boundary.
pub fn builder() -> MultipartBuilder {
    MultipartBuilder::new()
}
