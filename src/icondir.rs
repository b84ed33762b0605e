use crate::error::Result;
use crate::restype::ResourceType;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

//===========================================================================//

/// The size of an ICONDIR header, in bytes.
pub const ICONDIR_LEN: u32 = 6;

//===========================================================================//

/// The ICONDIR header at the start of a single-image ICO file.
///
/// The header is fixed: reserved field zero, resource type icon, and an image
/// count of exactly one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDir {
    restype: ResourceType,
    num_images: u16,
}

impl IconDir {
    /// Creates the header for an ICO file holding a single icon.
    pub fn new() -> IconDir {
        IconDir { restype: ResourceType::Icon, num_images: 1 }
    }

    /// Returns the type of resource declared by this header.
    pub fn resource_type(&self) -> ResourceType {
        self.restype
    }

    /// Returns the number of images declared by this header.
    pub fn num_images(&self) -> u16 {
        self.num_images
    }

    /// Reads and validates an ICONDIR header.  Only single-icon files are
    /// accepted.
    pub fn read<R: Read>(mut reader: R) -> Result<IconDir> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 {
            malformed!(
                "Invalid reserved field value in ICONDIR \
                 (was {}, but must be 0)",
                reserved
            );
        }
        let restype = reader.read_u16::<LittleEndian>()?;
        let restype = match ResourceType::from_number(restype) {
            Some(ResourceType::Icon) => ResourceType::Icon,
            Some(other) => {
                malformed!("Unsupported resource type ({:?})", other)
            }
            None => malformed!("Invalid resource type ({})", restype),
        };
        let num_images = reader.read_u16::<LittleEndian>()?;
        if num_images != 1 {
            malformed!(
                "Unsupported number of images (was {}, but must be 1)",
                num_images
            );
        }
        Ok(IconDir { restype, num_images })
    }

    /// Writes the header as three little-endian 16-bit fields.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u16::<LittleEndian>(self.restype.number())?;
        writer.write_u16::<LittleEndian>(self.num_images)?;
        Ok(())
    }
}

impl Default for IconDir {
    fn default() -> IconDir {
        IconDir::new()
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{IconDir, ICONDIR_LEN};
    use crate::error::Error;
    use crate::restype::ResourceType;
    use std::io::Cursor;

    #[test]
    fn write_single_icon_header() {
        let mut output = Vec::<u8>::new();
        IconDir::new().write(&mut output).unwrap();
        let expected: &[u8] = b"\x00\x00\x01\x00\x01\x00";
        assert_eq!(output.as_slice(), expected);
        assert_eq!(output.len() as u32, ICONDIR_LEN);
    }

    #[test]
    fn read_single_icon_header() {
        let input = b"\x00\x00\x01\x00\x01\x00";
        let icondir = IconDir::read(Cursor::new(input)).unwrap();
        assert_eq!(icondir.resource_type(), ResourceType::Icon);
        assert_eq!(icondir.num_images(), 1);
    }

    #[test]
    fn reject_cursor_header() {
        let input = b"\x00\x00\x02\x00\x01\x00";
        let result = IconDir::read(Cursor::new(input));
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[test]
    fn reject_multi_image_header() {
        let input = b"\x00\x00\x01\x00\x02\x00";
        let result = IconDir::read(Cursor::new(input));
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[test]
    fn reject_nonzero_reserved_field() {
        let input = b"\x01\x00\x01\x00\x01\x00";
        let result = IconDir::read(Cursor::new(input));
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[test]
    fn truncated_header_is_io_error() {
        let input = b"\x00\x00\x01";
        let result = IconDir::read(Cursor::new(input));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}

//===========================================================================//
