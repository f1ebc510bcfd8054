//! QR code encoder

use crate::config::QrOptions;
use crate::error::Result;
use crate::qr::GeoPayload;
use image::{DynamicImage, GrayImage, ImageFormat, Luma, imageops};
use qrcode::QrCode;
use std::io::Cursor;

const LIGHT: Luma<u8> = Luma([255]);

/// QR code encoder
#[derive(Debug, Clone, Default)]
pub struct QrEncoder {
    options: QrOptions,
}

impl QrEncoder {
    /// Create an encoder with the given rendering options
    pub fn new(options: QrOptions) -> Self {
        Self { options }
    }

    /// Render the payload as a grayscale matrix with the configured border.
    ///
    /// Picks the smallest QR version that fits at the configured ECC level.
    pub fn matrix(&self, payload: &GeoPayload) -> Result<GrayImage> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), self.options.ecc.into())?;

        let scale = self.options.box_size.max(1);
        let modules = code
            .render::<Luma<u8>>()
            .quiet_zone(false)
            .module_dimensions(scale, scale)
            .build();

        let pad = self.options.border * scale;
        let mut canvas = GrayImage::from_pixel(
            modules.width() + 2 * pad,
            modules.height() + 2 * pad,
            LIGHT,
        );
        imageops::replace(&mut canvas, &modules, i64::from(pad), i64::from(pad));

        tracing::debug!(
            version = ?code.version(),
            width = code.width(),
            pixels = canvas.width(),
            "Rendered QR matrix"
        );

        Ok(canvas)
    }

    /// Render the payload and encode it as JPEG bytes
    pub fn encode_jpeg(&self, payload: &GeoPayload) -> Result<Vec<u8>> {
        let matrix = self.matrix(payload)?;

        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(matrix).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;
        Ok(bytes)
    }
}

/// Render `payload` into JPEG image bytes using `options`.
pub fn render_matrix_image(payload: &GeoPayload, options: &QrOptions) -> Result<Vec<u8>> {
    QrEncoder::new(*options).encode_jpeg(payload)
}
