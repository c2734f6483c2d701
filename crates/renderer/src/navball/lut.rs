//! Per-pixel sphere geometry computed once per navball size.

use nalgebra::Vector3;
use tracing::info;

use osd_common::{OsdError, OsdResult};

/// Surface normals for every pixel of a `size × size` square.
///
/// Pixels outside the disc hold `None` and are skipped on every frame.
/// Normals are in the sphere's screen frame: x right, y down, z toward
/// the viewer.
#[derive(Debug, Clone)]
pub struct SphereLut {
    size: u32,
    entries: Vec<Option<Vector3<f32>>>,
    valid_count: usize,
}

impl SphereLut {
    pub fn new(size: u32) -> OsdResult<Self> {
        if size == 0 {
            return Err(OsdError::LutAllocation(size));
        }
        let total = size as usize * size as usize;
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(total)
            .map_err(|_| OsdError::LutAllocation(size))?;

        let radius = size as f32 / 2.0;
        let radius_sq = radius * radius;
        let mut valid_count = 0;

        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 - radius;
                let dy = y as f32 - radius;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq <= radius_sq {
                    let dz = (radius_sq - dist_sq).sqrt();
                    entries.push(Some(Vector3::new(dx, dy, dz).normalize()));
                    valid_count += 1;
                } else {
                    entries.push(None);
                }
            }
        }

        info!(
            size,
            valid = valid_count,
            coverage = format!("{:.1}%", valid_count as f32 * 100.0 / total as f32),
            "Navball LUT built"
        );

        Ok(Self {
            size,
            entries,
            valid_count,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn valid_count(&self) -> usize {
        self.valid_count
    }

    /// Normal at (x, y), or `None` outside the disc or the square.
    #[inline]
    pub fn normal(&self, x: u32, y: u32) -> Option<Vector3<f32>> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.entries[(y * self.size + x) as usize]
    }

    pub fn is_valid(&self, x: u32, y: u32) -> bool {
        self.normal(x, y).is_some()
    }

    /// Row-major iterator over `(x, y, normal)` for pixels inside the disc.
    pub fn iter_valid(&self) -> impl Iterator<Item = (u32, u32, Vector3<f32>)> + '_ {
        let size = self.size;
        self.entries.iter().enumerate().filter_map(move |(i, entry)| {
            entry.map(|n| (i as u32 % size, i as u32 / size, n))
        })
    }
}
