use crate::error::Result;
use crate::icondir::ICONDIR_LEN;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

//===========================================================================//

/// The size of an ICONDIRENTRY struct, in bytes.
pub const ICONDIRENTRY_LEN: u32 = 16;

/// The byte offset of the embedded resource in a single-image ICO file.
pub const RESOURCE_OFFSET: u32 = ICONDIR_LEN + ICONDIRENTRY_LEN;

// Every resource is a straight 8-bit RGBA PNG.
const COLOR_PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 32;

//===========================================================================//

/// The ICONDIRENTRY describing the one image embedded in an ICO file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDirEntry {
    width: u8,
    height: u8,
    num_colors: u8,
    color_planes: u16,
    bits_per_pixel: u16,
    data_size: u32,
    data_offset: u32,
}

impl IconDirEntry {
    /// Starts a new entry with the fixed defaults (1 color plane, 32 bpp,
    /// resource at offset 22).  The entry is finished by
    /// [`IconDirEntryBuilder::with_resource_size`].
    pub fn builder() -> IconDirEntryBuilder {
        IconDirEntryBuilder { width: 0, height: 0 }
    }

    /// Returns the width byte.  Zero stands for a width of 256.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Returns the height byte.  Zero stands for a height of 256.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Returns the palette size, which is always zero for PNG resources.
    pub fn num_colors(&self) -> u8 {
        self.num_colors
    }

    /// Returns the number of color planes.
    pub fn color_planes(&self) -> u16 {
        self.color_planes
    }

    /// Returns the bits-per-pixel (color depth) of the image.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns the length of the embedded resource, in bytes.
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Returns the position of the embedded resource within the file.
    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }

    /// Reads an ICONDIRENTRY.  The resource must start right after the entry,
    /// since a single-image file has nothing else in between.
    pub fn read<R: Read>(mut reader: R) -> Result<IconDirEntry> {
        let width = reader.read_u8()?;
        let height = reader.read_u8()?;
        let num_colors = reader.read_u8()?;
        let reserved = reader.read_u8()?;
        if reserved != 0 {
            malformed!(
                "Invalid reserved field value in ICONDIRENTRY \
                 (was {}, but must be 0)",
                reserved
            );
        }
        let color_planes = reader.read_u16::<LittleEndian>()?;
        let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
        let data_size = reader.read_u32::<LittleEndian>()?;
        let data_offset = reader.read_u32::<LittleEndian>()?;
        if data_offset != RESOURCE_OFFSET {
            malformed!(
                "Invalid resource offset (was {}, but must be {})",
                data_offset,
                RESOURCE_OFFSET
            );
        }
        Ok(IconDirEntry {
            width,
            height,
            num_colors,
            color_planes,
            bits_per_pixel,
            data_size,
            data_offset,
        })
    }

    /// Writes the entry as 16 bytes, little-endian, with no padding.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_u8(self.width)?;
        writer.write_u8(self.height)?;
        writer.write_u8(self.num_colors)?;
        writer.write_u8(0)?; // reserved
        writer.write_u16::<LittleEndian>(self.color_planes)?;
        writer.write_u16::<LittleEndian>(self.bits_per_pixel)?;
        writer.write_u32::<LittleEndian>(self.data_size)?;
        writer.write_u32::<LittleEndian>(self.data_offset)?;
        Ok(())
    }
}

//===========================================================================//

/// An ICONDIRENTRY whose resource size is not known yet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IconDirEntryBuilder {
    width: u8,
    height: u8,
}

impl IconDirEntryBuilder {
    /// Sets the width/height bytes from the image dimensions.
    ///
    /// Each dimension is stored modulo 256.  That gives the format's zero for
    /// exactly 256, but it also wraps larger sizes (300 becomes 44) instead of
    /// clamping them.
    pub fn with_dimensions(self, width: u32, height: u32) -> Self {
        IconDirEntryBuilder {
            width: (width % 256) as u8,
            height: (height % 256) as u8,
        }
    }

    /// Sets the resource length and returns the finished entry.
    pub fn with_resource_size(self, data_size: u32) -> IconDirEntry {
        IconDirEntry {
            width: self.width,
            height: self.height,
            num_colors: 0,
            color_planes: COLOR_PLANES,
            bits_per_pixel: BITS_PER_PIXEL,
            data_size,
            data_offset: RESOURCE_OFFSET,
        }
    }
}

//===========================================================================//


//===========================================================================//
