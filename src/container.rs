use crate::entry::{IconDirEntry, RESOURCE_OFFSET};
use crate::error::Result;
use crate::icondir::IconDir;
use crate::image::{IconImage, PNG_SIGNATURE};
use log::{debug, warn};
use std::io::{Read, Write};

//===========================================================================//

/// Encodes `image` as a single-image ICO file and writes it to `writer`.
///
/// The image is re-encoded as a PNG in memory first, because the entry that
/// records the PNG's length comes before the PNG itself.  The 22-byte
/// header+entry block and the PNG are then written in two calls.  Nothing is
/// written if the PNG encoding fails; a failed write may leave `writer`
/// partially written.
pub fn encode<W: Write>(image: &IconImage, mut writer: W) -> Result<()> {
    let mut resource = Vec::new();
    image.write_png(&mut resource)?;
    let data_size = match u32::try_from(resource.len()) {
        Ok(size) => size,
        Err(_) => encode_failure!(
            "PNG resource too large (was {} bytes, but max is {})",
            resource.len(),
            u32::MAX
        ),
    };
    debug!(
        "Encoded {}x{} image as {} byte PNG resource",
        image.width(),
        image.height(),
        data_size
    );
    if image.width() > 255 || image.height() > 255 {
        warn!(
            "Image is {}x{}; width/height bytes wrap modulo 256",
            image.width(),
            image.height()
        );
    }

    let entry = IconDirEntry::builder()
        .with_dimensions(image.width(), image.height())
        .with_resource_size(data_size);
    let mut directory = Vec::with_capacity(RESOURCE_OFFSET as usize);
    IconDir::new().write(&mut directory)?;
    entry.write(&mut directory)?;
    debug_assert_eq!(directory.len(), RESOURCE_OFFSET as usize);

    writer.write_all(&directory)?;
    writer.write_all(&resource)?;
    Ok(())
}

//===========================================================================//

/// A single-image ICO file read back into memory.
#[derive(Clone, Debug)]
pub struct IconFile {
    icondir: IconDir,
    entry: IconDirEntry,
    data: Vec<u8>,
}

impl IconFile {
    /// Reads a single-image ICO file whose resource directly follows the
    /// directory entry.
    pub fn read<R: Read>(mut reader: R) -> Result<IconFile> {
        let icondir = IconDir::read(&mut reader)?;
        let entry = IconDirEntry::read(&mut reader)?;
        let mut data = vec![0u8; entry.data_size() as usize];
        reader.read_exact(&mut data)?;
        let mut rest = [0u8; 1];
        if reader.read(&mut rest)? != 0 {
            malformed!(
                "Trailing data after the {} byte resource",
                entry.data_size()
            );
        }
        Ok(IconFile { icondir, entry, data })
    }

    /// Returns the file's ICONDIR header.
    pub fn icondir(&self) -> &IconDir {
        &self.icondir
    }

    /// Returns the file's only directory entry.
    pub fn entry(&self) -> &IconDirEntry {
        &self.entry
    }

    /// Returns the raw, encoded resource data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns true if the resource is encoded as a PNG.
    pub fn is_png(&self) -> bool {
        self.data.starts_with(PNG_SIGNATURE)
    }

    /// Decodes the embedded resource.  Returns an error if it isn't a PNG, or
    /// if its dimensions don't match the width/height bytes of the entry.
    pub fn decode(&self) -> Result<IconImage> {
        if !self.is_png() {
            malformed!("Embedded resource is not a PNG");
        }
        let image = IconImage::read_png(self.data.as_slice())?;
        let width_byte = (image.width() % 256) as u8;
        let height_byte = (image.height() % 256) as u8;
        if width_byte != self.entry.width()
            || height_byte != self.entry.height()
        {
            malformed!(
                "Encoded image has wrong dimensions \
                 (was {}x{}, but entry says {}x{})",
                image.width(),
                image.height(),
                self.entry.width(),
                self.entry.height()
            );
        }
        Ok(image)
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{encode, IconFile};
    use crate::error::Error;
    use crate::image::IconImage;
    use std::io::{self, Cursor, Write};

    fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> IconImage {
        let mut data = Vec::new();
        for _ in 0..(width * height) {
            data.extend_from_slice(&rgba);
        }
        IconImage::from_rgba_data(width, height, data)
    }

    // Accepts a fixed number of bytes, then refuses to take any more.
    struct ShortWriter {
        written: Vec<u8>,
        capacity: usize,
        calls: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            let len = buf.len().min(self.capacity - self.written.len());
            self.written.extend_from_slice(&buf[..len]);
            Ok(len)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // Records the length of every write call.
    struct RecordingWriter {
        writes: Vec<usize>,
        bytes: Vec<u8>,
    }

    impl Write for RecordingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes.push(buf.len());
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn encode_makes_exactly_two_writes() {
        let image = solid_image(8, 8, [0x10, 0x20, 0x30, 0xff]);
        let mut writer =
            RecordingWriter { writes: Vec::new(), bytes: Vec::new() };
        encode(&image, &mut writer).unwrap();
        assert_eq!(writer.writes.len(), 2);
        assert_eq!(writer.writes[0], 22);
        assert_eq!(writer.writes[1], writer.bytes.len() - 22);
        let mut resource = Vec::new();
        image.write_png(&mut resource).unwrap();
        assert_eq!(&writer.bytes[22..], resource.as_slice());
    }

    #[test]
    fn encode_header_and_entry_fields() {
        let image = solid_image(16, 16, [0xff, 0, 0, 0xff]);
        let mut output = Vec::<u8>::new();
        encode(&image, &mut output).unwrap();
        let expected: &[u8] = b"\
            \x00\x00\x01\x00\x01\x00\
            \x10\x10\x00\x00\x01\x00\x20\x00";
        assert_eq!(&output[..14], expected);
        assert_eq!(&output[18..22], b"\x16\x00\x00\x00");
        let size = u32::from_le_bytes([
            output[14], output[15], output[16], output[17],
        ]);
        assert_eq!(output.len(), 22 + size as usize);
    }

    #[test]
    fn short_write_is_io_error() {
        let image = solid_image(4, 4, [0, 0xff, 0, 0xff]);
        let mut writer =
            ShortWriter { written: Vec::new(), capacity: 30, calls: 0 };
        let result = encode(&image, &mut writer);
        assert!(matches!(result, Err(Error::Io(ref e))
                         if e.kind() == io::ErrorKind::WriteZero));
        assert_eq!(writer.written.len(), 30);
    }

    #[test]
    fn nothing_is_written_before_the_resource_is_known() {
        let image = solid_image(3, 5, [1, 2, 3, 4]);
        let mut writer =
            ShortWriter { written: Vec::new(), capacity: 0, calls: 0 };
        assert!(encode(&image, &mut writer).is_err());
        assert_eq!(writer.calls, 1);
    }

    #[test]
    fn read_back_encoded_file() {
        let image = solid_image(7, 9, [0x20, 0x40, 0x60, 0x80]);
        let mut output = Vec::<u8>::new();
        encode(&image, &mut output).unwrap();
        let file = IconFile::read(Cursor::new(&output)).unwrap();
        assert_eq!(file.icondir().num_images(), 1);
        assert_eq!(file.entry().width(), 7);
        assert_eq!(file.entry().height(), 9);
        assert!(file.is_png());
        assert_eq!(file.data(), &output[22..]);
        let decoded = file.decode().unwrap();
        assert_eq!(decoded.rgba_data(), image.rgba_data());
    }

    #[test]
    fn read_rejects_truncated_resource() {
        let image = solid_image(2, 2, [0, 0, 0, 0]);
        let mut output = Vec::<u8>::new();
        encode(&image, &mut output).unwrap();
        output.pop();
        let result = IconFile::read(Cursor::new(&output));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn read_rejects_trailing_data() {
        let image = solid_image(2, 2, [0, 0, 0, 0]);
        let mut output = Vec::<u8>::new();
        encode(&image, &mut output).unwrap();
        output.push(0);
        let result = IconFile::read(Cursor::new(&output));
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[test]
    fn decode_rejects_mismatched_dimensions() {
        let image = solid_image(2, 2, [0, 0, 0, 0xff]);
        let mut output = Vec::<u8>::new();
        encode(&image, &mut output).unwrap();
        output[6] = 3;
        let file = IconFile::read(Cursor::new(&output)).unwrap();
        assert!(matches!(file.decode(), Err(Error::Malformed(_))));
    }
}

//===========================================================================//
