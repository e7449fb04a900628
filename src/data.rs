use crate::prelude::*;
use byteorder::{BigEndian, ReadBytesExt};
use log::info;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads a framed big-endian image/label pair of files into normalized
/// `(pixel vector, label)` samples.
///
/// Image file layout: 4-byte magic (ignored), item count, row count,
/// column count, then `rows * cols` bytes per image. Label file layout:
/// 4-byte magic (ignored), item count, then one byte per label. All counts
/// are big-endian u32. Pixels are scaled to `[0, 1]`.
///
/// Returns `min(image_count, label_count, max_items)` samples.
pub fn load_dataset(
    images_path: impl AsRef<Path>,
    labels_path: impl AsRef<Path>,
    max_items: usize,
) -> Result<Vec<(Array1<f64>, u8)>> {
    let images_path = images_path.as_ref();
    let labels_path = labels_path.as_ref();
    for path in [images_path, labels_path] {
        if !path.exists() {
            return Err(NNError::DatasetNotFound(path.display().to_string()));
        }
    }

    let mut images = BufReader::new(File::open(images_path)?);
    let mut labels = BufReader::new(File::open(labels_path)?);

    images.read_u32::<BigEndian>()?; // magic, unused
    let image_count = images.read_u32::<BigEndian>()? as usize;
    let rows = images.read_u32::<BigEndian>()? as usize;
    let cols = images.read_u32::<BigEndian>()? as usize;

    labels.read_u32::<BigEndian>()?; // magic, unused
    let label_count = labels.read_u32::<BigEndian>()? as usize;

    let items = image_count.min(label_count).min(max_items);
    let mut dataset = Vec::with_capacity(items);
    let mut pixels = vec![0u8; rows * cols];
    for _ in 0..items {
        images.read_exact(&mut pixels)?;
        let image = Array1::from_iter(pixels.iter().map(|&p| p as f64 / 255.0));
        let label = labels.read_u8()?;
        dataset.push((image, label));
    }

    info!(
        "loaded {} samples ({}x{} pixels) from {}",
        dataset.len(),
        rows,
        cols,
        images_path.display()
    );
    Ok(dataset)
}
