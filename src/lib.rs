//! A library for converting a single image into a single-image ICO file.
//!
//! The ICO file consists of a 6-byte ICONDIR header, one 16-byte
//! ICONDIRENTRY, and the image re-encoded as an 8-bit RGBA PNG at offset 22.
//!
//! ```no_run
//! let file = std::fs::File::open("icon.png").unwrap();
//! let image = png2ico::IconImage::read_png(file).unwrap();
//! let out = std::fs::File::create("icon.ico").unwrap();
//! png2ico::encode(&image, out).unwrap();
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod container;
mod convert;
mod entry;
mod error;
mod icondir;
mod image;
mod restype;

pub use crate::container::{encode, IconFile};
pub use crate::convert::convert_file;
pub use crate::entry::{
    IconDirEntry, IconDirEntryBuilder, ICONDIRENTRY_LEN, RESOURCE_OFFSET,
};
pub use crate::error::{Error, Result};
pub use crate::icondir::{IconDir, ICONDIR_LEN};
pub use crate::image::IconImage;
pub use crate::restype::ResourceType;

//===========================================================================//
