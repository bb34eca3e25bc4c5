use std::borrow::Cow;
use std::io::Write;

use crate::{RenderedSheet, SheetError};

/// Write `sheet` as a single-frame GIF with its three-entry palette.
pub fn write_gif<W: Write>(writer: W, sheet: &RenderedSheet) -> Result<(), SheetError> {
    let (width, height) = sheet.canvas.dimensions();
    let too_large = || SheetError::TooLarge { width: u64::from(width), height: u64::from(height) };
    let width = u16::try_from(width).map_err(|_| too_large())?;
    let height = u16::try_from(height).map_err(|_| too_large())?;

    let palette = sheet.palette.to_rgb_bytes();
    let mut encoder = ::gif::Encoder::new(writer, width, height, &palette).map_err(encode_error)?;

    let frame = ::gif::Frame {
        width,
        height,
        delay: 0,
        buffer: Cow::Borrowed(sheet.canvas.indices()),
        ..::gif::Frame::default()
    };
    encoder.write_frame(&frame).map_err(encode_error)?;
    encoder.into_inner().map_err(SheetError::OutputIo)?;
    Ok(())
}

/// Encode `sheet` into an in-memory GIF.
pub fn encode_gif(sheet: &RenderedSheet) -> Result<Vec<u8>, SheetError> {
    let mut bytes = Vec::new();
    write_gif(&mut bytes, sheet)?;
    Ok(bytes)
}

fn encode_error(err: ::gif::EncodingError) -> SheetError {
    match err {
        ::gif::EncodingError::Io(err) => SheetError::OutputIo(err),
        other => SheetError::Encode(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GlyphAtlas, Palette, SheetConfig, SheetRenderer};

    #[test]
    fn encodes_indexed_frame() {
        let atlas = GlyphAtlas::builtin().unwrap();
        let config =
            SheetConfig { first_char: 65, last_char: 66, columns: 0, ..SheetConfig::default() };
        let sheet = SheetRenderer::new(&atlas).render(&config, Palette::default()).unwrap();
        let bytes = encode_gif(&sheet).unwrap();

        let mut options = ::gif::DecodeOptions::new();
        options.set_color_output(::gif::ColorOutput::Indexed);
        let mut decoder = options.read_info(bytes.as_slice()).unwrap();
        assert_eq!((decoder.width(), decoder.height()), (21, 17));

        let palette = decoder.global_palette().unwrap().to_vec();
        assert_eq!(&palette[..9], &Palette::default().to_rgb_bytes());

        let frame = decoder.read_next_frame().unwrap().unwrap();
        assert_eq!(frame.delay, 0);
        assert_eq!(&frame.buffer[..], sheet.canvas.indices());
        assert!(decoder.read_next_frame().unwrap().is_none());
    }

    #[test]
    fn encoder_errors_keep_their_source() {
        let io = ::gif::EncodingError::from(std::io::Error::other("disk full"));
        assert!(matches!(encode_error(io), SheetError::OutputIo(_)));

        let format = ::gif::EncodingError::from(::gif::EncodingFormatError::MissingColorPalette);
        let err = encode_error(format);
        assert!(matches!(err, SheetError::Encode(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
