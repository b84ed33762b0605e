use crate::container::encode;
use crate::error::{Error, Result};
use crate::image::IconImage;
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

//===========================================================================//

/// Reads the PNG at `input` and writes it to `output` as a single-image ICO
/// file.  Returns the number of bytes written.
///
/// The output file is only created once the input has been decoded, so a
/// missing or malformed input leaves the file system untouched.  A failure
/// while encoding or writing may leave a partial output file behind.
pub fn convert_file(input: &Path, output: &Path) -> Result<u64> {
    info!("Reading {:?}", input);
    let file = File::open(input).map_err(|source| Error::InputAccess {
        path: input.to_path_buf(),
        source,
    })?;
    let image = IconImage::read_png(BufReader::new(file))?;

    let file = File::create(output).map_err(|source| Error::OutputAccess {
        path: output.to_path_buf(),
        source,
    })?;
    let mut writer = CountingWriter { inner: BufWriter::new(file), count: 0 };
    encode(&image, &mut writer)?;
    writer.flush()?;
    info!("Wrote {} bytes to {:?}", writer.count, output);
    Ok(writer.count)
}

//===========================================================================//

struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let len = self.inner.write(buf)?;
        self.count += len as u64;
        Ok(len)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

//===========================================================================//
