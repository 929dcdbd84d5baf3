//! Configuration for em-gallery.
//!
//! Two kinds of configuration live here:
//! - Component configuration ([`PagingConfig`], [`CacheConfig`]): immutable,
//!   validated once when constructed.
//! - Command-line arguments for the `em-gallery` binary, parsed with clap.
//!   Options can also be set through environment variables with the `EMG_`
//!   prefix.
//!
//! # Environment Variables
//!
//! - `EMG_ROOT` - Directory relative paths in addresses are resolved against
//! - `EMG_PAGE_SIZE` - Rows per page (default: 50)
//! - `EMG_THUMBNAIL_WIDTH` - Maximum thumbnail width (default: 128)
//! - `EMG_THUMBNAIL_HEIGHT` - Maximum thumbnail height (default: 128)

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::ConfigError;

// =============================================================================
// Default Values
// =============================================================================

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Default number of resident thumbnails.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Default maximum thumbnail width.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 128;

/// Default maximum thumbnail height.
pub const DEFAULT_THUMBNAIL_HEIGHT: u32 = 128;

// =============================================================================
// Component Configuration
// =============================================================================

/// Paging parameters of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    page_size: usize,
}

impl PagingConfig {
    pub fn new(page_size: usize) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::PageSize);
        }
        Ok(Self { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Thumbnail cache parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    capacity: NonZeroUsize,
    target_size: Option<(u32, u32)>,
}

impl CacheConfig {
    /// `target_size` is the `(max_width, max_height)` used when a caller does
    /// not ask for a size; `None` keeps slices at full size.
    pub fn new(capacity: usize, target_size: Option<(u32, u32)>) -> Result<Self, ConfigError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(ConfigError::CacheCapacity)?;
        if let Some((width, height)) = target_size {
            if width == 0 || height == 0 {
                return Err(ConfigError::ThumbnailSize { width, height });
            }
        }
        Ok(Self {
            capacity,
            target_size,
        })
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    pub fn target_size(&self) -> Option<(u32, u32)> {
        self.target_size
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            target_size: Some((DEFAULT_THUMBNAIL_WIDTH, DEFAULT_THUMBNAIL_HEIGHT)),
        }
    }
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// em-gallery - Browse electron-microscopy tables, stacks and volumes page by page.
#[derive(Parser, Debug, Clone)]
#[command(name = "em-gallery")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse a slice address and print it as JSON.
    Parse(ParseConfig),

    /// Render the thumbnail of one slice to a PNG file.
    Thumbnail(ThumbnailConfig),

    /// Print one page of a JSON table.
    Page(PageConfig),
}

/// Arguments of `em-gallery parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseConfig {
    /// Address, e.g. `3@1@2@/data/vol.mrc`.
    pub address: String,

    /// Resolve relative paths against this directory.
    #[arg(long, env = "EMG_ROOT")]
    pub root: Option<PathBuf>,
}

/// Arguments of `em-gallery thumbnail`.
#[derive(Args, Debug, Clone)]
pub struct ThumbnailConfig {
    /// Address of the slice to render.
    pub address: String,

    /// Output PNG file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Maximum thumbnail width.
    #[arg(long, default_value_t = DEFAULT_THUMBNAIL_WIDTH, env = "EMG_THUMBNAIL_WIDTH")]
    pub max_width: u32,

    /// Maximum thumbnail height.
    #[arg(long, default_value_t = DEFAULT_THUMBNAIL_HEIGHT, env = "EMG_THUMBNAIL_HEIGHT")]
    pub max_height: u32,

    /// Resolve relative paths against this directory.
    #[arg(long, env = "EMG_ROOT")]
    pub root: Option<PathBuf>,
}

impl ThumbnailConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.address.is_empty() {
            return Err("address must not be empty".to_string());
        }
        self.cache_config().map(|_| ()).map_err(|e| e.to_string())
    }

    /// Single-entry cache sized for this request.
    pub fn cache_config(&self) -> Result<CacheConfig, ConfigError> {
        CacheConfig::new(1, Some((self.max_width, self.max_height)))
    }
}

/// Arguments of `em-gallery page`.
#[derive(Args, Debug, Clone)]
pub struct PageConfig {
    /// JSON table file.
    pub table: PathBuf,

    /// Rows per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, env = "EMG_PAGE_SIZE")]
    pub page_size: usize,

    /// Page to print (0-based).
    #[arg(long, default_value_t = 0)]
    pub page: usize,

    /// Jump to the page holding this absolute row instead of `--page`.
    #[arg(long)]
    pub row: Option<usize>,

    /// Sort by this column before paging.
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending.
    #[arg(long, default_value_t = false, requires = "sort")]
    pub desc: bool,
}

impl PageConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.paging_config().map(|_| ()).map_err(|e| e.to_string())
    }

    pub fn paging_config(&self) -> Result<PagingConfig, ConfigError> {
        PagingConfig::new(self.page_size)
    }
}

// =============================================================================
// Tests
// =============================================================================
