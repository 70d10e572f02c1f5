#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const CONTENT_TYPES: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="png" ContentType="image/png"/></Types>"#;
pub const WORKBOOK: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheets><sheet name="Sheet1" sheetId="1"/></sheets></workbook>"#;
pub const SHEET: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>hello</t></is></c></row></sheetData></worksheet>"#;
pub const DRAWING: &[u8] = br#"<xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing"/>"#;

/// Deterministic pseudo-random bytes so fixtures don't need a rand dependency.
struct Lcg(u32);

impl Lcg {
    fn next_u8(&mut self) -> u8 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.0 >> 24) as u8
    }
}

/// Noisy RGBA image: compresses badly as PNG, so it is large on disk.
pub fn noisy_rgba(width: u32, height: u32) -> DynamicImage {
    let mut rng = Lcg(0x5eed);
    let img = RgbaImage::from_fn(width, height, |_, _| {
        Rgba([rng.next_u8(), rng.next_u8(), rng.next_u8(), rng.next_u8()])
    });
    DynamicImage::ImageRgba8(img)
}

/// Smooth gradient, the kind of picture JPEG handles well.
pub fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) / 4 % 256) as u8])
    });
    DynamicImage::ImageRgb8(img)
}

pub fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

/// Indexed PNG whose palette has a fully transparent entry (tRNS chunk).
pub fn indexed_png_with_transparency(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(vec![255, 255, 255, 0, 0, 255, 200, 30, 30]);
        encoder.set_trns(vec![0, 255, 128]);
        let mut writer = encoder.write_header().unwrap();
        let pixels: Vec<u8> = (0..width * height).map(|i| (i % 3) as u8).collect();
        writer.write_image_data(&pixels).unwrap();
    }
    out
}

/// The non-media parts every fixture workbook carries.
pub fn base_entries() -> Vec<(String, Vec<u8>)> {
    vec![
        ("[Content_Types].xml".to_string(), CONTENT_TYPES.to_vec()),
        ("xl/workbook.xml".to_string(), WORKBOOK.to_vec()),
        ("xl/worksheets/sheet1.xml".to_string(), SHEET.to_vec()),
        ("xl/drawings/drawing1.xml".to_string(), DRAWING.to_vec()),
    ]
}

pub fn write_workbook(path: &Path, entries: &[(String, Vec<u8>)]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, data) in entries {
        writer.start_file(name.as_str(), options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();
}

/// Workbook with the base entries plus the given media files.
pub fn create_workbook_with_media(dir: &Path, file_name: &str, media: &[(&str, Vec<u8>)]) -> PathBuf {
    let mut entries = base_entries();
    for (name, data) in media {
        entries.push((format!("xl/media/{}", name), data.clone()));
    }
    let path = dir.join(file_name);
    write_workbook(&path, &entries);
    path
}

/// Workbook holding one noisy 500x300 RGBA PNG at `xl/media/image1.png`.
pub fn create_rgba_workbook(dir: &Path) -> PathBuf {
    let png = encode(&noisy_rgba(500, 300), ImageFormat::Png);
    assert!(png.len() > 200 * 1024, "fixture PNG should exceed 200KB");
    create_workbook_with_media(dir, "book.xlsx", &[("image1.png", png)])
}

pub fn read_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).unwrap();
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            (entry.name().to_string(), data)
        })
        .collect()
}

pub fn read_entry(path: &Path, name: &str) -> Vec<u8> {
    read_entries(path)
        .into_iter()
        .find(|(n, _)| n == name)
        .map(|(_, data)| data)
        .unwrap_or_else(|| panic!("entry {} missing", name))
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}
