mod landing;
mod metadata;

pub use landing::*;
pub use metadata::*;
