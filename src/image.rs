use crate::error::Result;
use std::io::{Read, Write};

//===========================================================================//

// The signature that all PNG files start with.
pub(crate) const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];

// Size limits for the source image:
const MIN_WIDTH: u32 = 1;
const MIN_HEIGHT: u32 = 1;

//===========================================================================//

/// A decoded image, always stored as straight (non-premultiplied) 8-bit RGBA.
#[derive(Clone)]
pub struct IconImage {
    width: u32,
    height: u32,
    rgba_data: Vec<u8>,
}

impl IconImage {
    /// Creates a new image with the given dimensions and RGBA data.  The
    /// `width` and `height` must be nonzero, and `rgba_data` must have `4 *
    /// width * height` bytes and be in row-major order from top to bottom.
    /// Panics if the dimensions are out of range or if `rgba_data` is the
    /// wrong length.
    pub fn from_rgba_data(
        width: u32,
        height: u32,
        rgba_data: Vec<u8>,
    ) -> IconImage {
        if width < MIN_WIDTH {
            panic!(
                "Invalid width (was {}, but must be at least {})",
                width, MIN_WIDTH
            );
        }
        if height < MIN_HEIGHT {
            panic!(
                "Invalid height (was {}, but must be at least {})",
                height, MIN_HEIGHT
            );
        }
        let expected_data_len = (width as u64) * (height as u64) * 4;
        if (rgba_data.len() as u64) != expected_data_len {
            panic!(
                "Invalid data length (was {}, but must be {} for {}x{} image)",
                rgba_data.len(),
                expected_data_len,
                width,
                height
            );
        }
        IconImage { width, height, rgba_data }
    }

    /// Decodes an image from a PNG file.  Palette, grayscale, 16-bit and
    /// sub-byte images are all normalized to 8-bit RGBA.  Returns an error if
    /// the PNG data is malformed or can't be decoded.
    pub fn read_png<R: Read>(reader: R) -> Result<IconImage> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(
            png::Transformations::EXPAND | png::Transformations::STRIP_16,
        );
        let mut png_reader = match decoder.read_info() {
            Ok(png_reader) => png_reader,
            Err(error) => decode_failure!("Malformed PNG data: {}", error),
        };
        let mut buffer = vec![0u8; png_reader.output_buffer_size()];
        let output = match png_reader.next_frame(&mut buffer) {
            Ok(output) => output,
            Err(error) => decode_failure!("Malformed PNG data: {}", error),
        };
        if output.width < MIN_WIDTH || output.height < MIN_HEIGHT {
            decode_failure!(
                "Invalid PNG dimensions (was {}x{}, but must be at least \
                 {}x{})",
                output.width,
                output.height,
                MIN_WIDTH,
                MIN_HEIGHT
            );
        }
        if output.bit_depth != png::BitDepth::Eight {
            decode_failure!(
                "Unsupported PNG bit depth: {:?}",
                output.bit_depth
            );
        }
        buffer.truncate(output.buffer_size());
        let rgba_data = match output.color_type {
            png::ColorType::Rgba => buffer,
            png::ColorType::Rgb => {
                let num_pixels = buffer.len() / 3;
                let mut rgba = Vec::with_capacity(num_pixels * 4);
                for i in 0..num_pixels {
                    rgba.extend_from_slice(&buffer[(3 * i)..][..3]);
                    rgba.push(u8::MAX);
                }
                rgba
            }
            png::ColorType::GrayscaleAlpha => {
                let num_pixels = buffer.len() / 2;
                let mut rgba = Vec::with_capacity(num_pixels * 4);
                for i in 0..num_pixels {
                    let gray = buffer[2 * i];
                    let alpha = buffer[2 * i + 1];
                    rgba.extend_from_slice(&[gray, gray, gray, alpha]);
                }
                rgba
            }
            png::ColorType::Grayscale => {
                let mut rgba = Vec::with_capacity(buffer.len() * 4);
                for gray in buffer.into_iter() {
                    rgba.extend_from_slice(&[gray, gray, gray, u8::MAX]);
                }
                rgba
            }
            png::ColorType::Indexed => {
                // EXPAND should have resolved the palette already.
                decode_failure!(
                    "Unsupported PNG color type: {:?}",
                    output.color_type
                );
            }
        };
        Ok(IconImage::from_rgba_data(output.width, output.height, rgba_data))
    }

    /// Encodes the image as an 8-bit RGBA PNG.  Returns an error if the
    /// encoding fails.
    pub fn write_png<W: Write>(&self, writer: W) -> Result<()> {
        match self.write_png_enc(writer) {
            Ok(()) => Ok(()),
            Err(png::EncodingError::IoError(error)) => {
                encode_failure!("PNG I/O error: {}", error);
            }
            Err(png::EncodingError::Format(error)) => {
                encode_failure!("PNG format error: {}", error);
            }
            Err(png::EncodingError::LimitsExceeded) => {
                encode_failure!("PNG limits exceeded");
            }
            Err(png::EncodingError::Parameter(error)) => {
                encode_failure!("PNG parameter error: {}", error);
            }
        }
    }

    fn write_png_enc<W: Write>(
        &self,
        writer: W,
    ) -> std::result::Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.rgba_data)?;
        writer.finish()
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the RGBA data for this image, in row-major order from top to
    /// bottom.
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }
}

//===========================================================================//


//===========================================================================//
