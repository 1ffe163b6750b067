//! Image assets: background, obstacle sprite and the selectable jumpers.
//!
//! Expected layout of the asset directory:
//! ```text
//! assets/
//!   background.png   scaled to the playfield
//!   pipe.png         scaled to the obstacle size
//!   Jumpers/*.png    one selectable player sprite per file
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::config::GameConfig;

pub const BACKGROUND_FILE: &str = "background.png";
pub const OBSTACLE_FILE: &str = "pipe.png";
pub const JUMPERS_DIR: &str = "Jumpers";

/// Alpha below this is treated as see-through when drawing.
pub const ALPHA_CUTOFF: u8 = 128;

/// A decoded RGBA image.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub name: String,
    image: RgbaImage,
}

impl Sprite {
    /// Load a sprite from an image file.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let img = image::open(path).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to load {}: {}", path.display(), e),
            )
        })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            name,
            image: img.to_rgba8(),
        })
    }

    pub fn from_image(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Copy of this sprite scaled to exactly `width` x `height`.
    pub fn resized(&self, width: u32, height: u32) -> Self {
        Self {
            name: self.name.clone(),
            image: imageops::resize(&self.image, width.max(1), height.max(1), FilterType::Nearest),
        }
    }

    /// Nearest pixel at normalized coordinates `(u, v)` in `[0, 1)`.
    /// Out-of-range coordinates are clamped to the border.
    pub fn sample(&self, u: f64, v: f64) -> Rgba<u8> {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let x = ((u * w as f64) as i64).clamp(0, w as i64 - 1) as u32;
        let y = ((v * h as f64) as i64).clamp(0, h as i64 - 1) as u32;
        *self.image.get_pixel(x, y)
    }
}

/// Everything the menus and the run draw with.
#[derive(Debug, Clone)]
pub struct Assets {
    pub background: Sprite,
    pub obstacle: Sprite,
    /// Player choices at their original resolution, sorted by file name.
    pub jumpers: Vec<Sprite>,
}

impl Assets {
    /// Load all assets from `dir`. Any missing or unreadable image is an error.
    pub fn load(dir: &Path, config: &GameConfig) -> io::Result<Self> {
        let background = Sprite::from_file(&dir.join(BACKGROUND_FILE))?
            .resized(config.width as u32, config.height as u32);
        let obstacle = Sprite::from_file(&dir.join(OBSTACLE_FILE))?
            .resized(config.obstacle_size as u32, config.obstacle_size as u32);

        let jumper_dir = dir.join(JUMPERS_DIR);
        let jumpers = list_jumper_files(&jumper_dir)?
            .iter()
            .map(|path| Sprite::from_file(path))
            .collect::<io::Result<Vec<_>>>()?;

        if jumpers.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No .png sprites found in {}", jumper_dir.display()),
            ));
        }

        log::info!(
            "Loaded assets from {} ({} jumpers)",
            dir.display(),
            jumpers.len()
        );

        Ok(Self {
            background,
            obstacle,
            jumpers,
        })
    }

    /// The chosen jumper scaled to the player's hitbox size.
    pub fn player_sprite(&self, index: usize, config: &GameConfig) -> Option<Sprite> {
        self.jumpers
            .get(index)
            .map(|s| s.resized(config.player_size as u32, config.player_size as u32))
    }
}

/// Paths of the `.png` files (any letter case) directly inside `dir`,
/// sorted by file name.
pub fn list_jumper_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let is_png = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| name.to_lowercase().ends_with(".png"))
            .unwrap_or(false);
        if is_png {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
