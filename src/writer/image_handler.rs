//! Image XObjects for push button icons.
//!
//! Per PDF spec Section 8.9, images are represented as XObjects.
//!
//! - **JPEG**: Pass-through embedding using DCTDecode filter
//! - **PNG** and other formats the `image` crate reads: decoded to 8-bit
//!   gray or RGB samples, with any alpha channel split into a soft mask

use crate::error::{Error, Result};
use crate::object::{Dictionary, Object};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

/// Color space of decoded samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Grayscale (1 component per pixel)
    DeviceGray,
    /// RGB color (3 components per pixel)
    DeviceRGB,
    /// CMYK color (4 components per pixel)
    DeviceCMYK,
}

impl ColorSpace {
    /// Get the PDF name for this color space.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceCMYK => "DeviceCMYK",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Encoding {
    /// Original JPEG bytes
    Dct,
    /// Raw samples
    Samples,
}

/// An image ready to become an XObject.
#[derive(Debug, Clone)]
pub struct IconImage {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Color space
    pub color_space: ColorSpace,
    encoding: Encoding,
    data: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl IconImage {
    /// Decode image bytes, detecting the format.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8 {
            let (width, height, color_space) = parse_jpeg_header(data)?;
            return Ok(Self {
                width,
                height,
                color_space,
                encoding: Encoding::Dct,
                data: data.to_vec(),
                alpha: None,
            });
        }

        let img = image::load_from_memory(data).map_err(|e| Error::Image(e.to_string()))?;
        let (width, height) = (img.width(), img.height());

        let (color_space, samples, alpha) = match img.color() {
            image::ColorType::L8 | image::ColorType::L16 => {
                (ColorSpace::DeviceGray, img.to_luma8().into_raw(), None)
            },
            image::ColorType::La8 | image::ColorType::La16 => {
                let la = img.to_luma_alpha8();
                let gray = la.pixels().map(|p| p.0[0]).collect();
                let alpha = la.pixels().map(|p| p.0[1]).collect();
                (ColorSpace::DeviceGray, gray, Some(alpha))
            },
            image::ColorType::Rgba8 | image::ColorType::Rgba16 => {
                let rgba = img.to_rgba8();
                let mut rgb = Vec::with_capacity((width * height * 3) as usize);
                let mut alpha = Vec::with_capacity((width * height) as usize);
                for pixel in rgba.pixels() {
                    rgb.extend_from_slice(&pixel.0[..3]);
                    alpha.push(pixel.0[3]);
                }
                (ColorSpace::DeviceRGB, rgb, Some(alpha))
            },
            _ => (ColorSpace::DeviceRGB, img.to_rgb8().into_raw(), None),
        };

        Ok(Self {
            width,
            height,
            color_space,
            encoding: Encoding::Samples,
            data: samples,
            alpha: alpha.filter(|a: &Vec<u8>| a.iter().any(|&v| v != 255)),
        })
    }

    /// Whether a soft mask accompanies the image.
    pub fn has_soft_mask(&self) -> bool {
        self.alpha.is_some()
    }

    /// Build the image XObject stream.
    ///
    /// `soft_mask` is the reference of the stream built by
    /// [`IconImage::soft_mask_stream`], when there is one.
    pub fn to_stream(&self, compress: bool, soft_mask: Option<Object>) -> Result<Object> {
        let mut dict = image_dict(self.width, self.height, self.color_space);
        if let Some(smask) = soft_mask {
            dict.insert("SMask".to_string(), smask);
        }
        let data = match self.encoding {
            Encoding::Dct => {
                dict.insert("Filter".to_string(), Object::name("DCTDecode"));
                self.data.clone()
            },
            Encoding::Samples => encode_samples(&mut dict, &self.data, compress)?,
        };
        Ok(finish_stream(dict, data))
    }

    /// Build the soft mask stream for the alpha channel, if any.
    pub fn soft_mask_stream(&self, compress: bool) -> Result<Option<Object>> {
        let Some(alpha) = &self.alpha else {
            return Ok(None);
        };
        let mut dict = image_dict(self.width, self.height, ColorSpace::DeviceGray);
        let data = encode_samples(&mut dict, alpha, compress)?;
        Ok(Some(finish_stream(dict, data)))
    }
}

fn image_dict(width: u32, height: u32, color_space: ColorSpace) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.insert("Type".to_string(), Object::name("XObject"));
    dict.insert("Subtype".to_string(), Object::name("Image"));
    dict.insert("Width".to_string(), Object::Integer(width as i64));
    dict.insert("Height".to_string(), Object::Integer(height as i64));
    dict.insert("ColorSpace".to_string(), Object::name(color_space.pdf_name()));
    dict.insert("BitsPerComponent".to_string(), Object::Integer(8));
    dict
}

fn encode_samples(dict: &mut Dictionary, samples: &[u8], compress: bool) -> Result<Vec<u8>> {
    if !compress {
        return Ok(samples.to_vec());
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(samples)?;
    dict.insert("Filter".to_string(), Object::name("FlateDecode"));
    Ok(encoder.finish()?)
}

fn finish_stream(mut dict: Dictionary, data: Vec<u8>) -> Object {
    dict.insert("Length".to_string(), Object::Integer(data.len() as i64));
    Object::Stream {
        dict,
        data: bytes::Bytes::from(data),
    }
}

/// Parse JPEG header to extract dimensions and color space.
fn parse_jpeg_header(data: &[u8]) -> Result<(u32, u32, ColorSpace)> {
    let mut pos = 2;
    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }

        let marker = data[pos + 1];
        pos += 2;

        // Skip padding
        if marker == 0xFF || marker == 0x00 {
            continue;
        }

        // SOF markers (Start of Frame)
        if matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF) {
            if pos + 7 >= data.len() {
                return Err(Error::Image("Truncated JPEG header".to_string()));
            }

            let height = u16::from_be_bytes([data[pos + 3], data[pos + 4]]) as u32;
            let width = u16::from_be_bytes([data[pos + 5], data[pos + 6]]) as u32;
            let color_space = match data[pos + 7] {
                1 => ColorSpace::DeviceGray,
                4 => ColorSpace::DeviceCMYK,
                _ => ColorSpace::DeviceRGB,
            };

            return Ok((width, height, color_space));
        }

        if pos + 2 > data.len() {
            break;
        }
        let length = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
        pos += length;
    }

    Err(Error::Image("Could not find JPEG dimensions".to_string()))
}
