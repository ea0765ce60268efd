//! Dog breed classification for photos straight off a phone camera.
//!
//! Uploads are decoded and turned upright according to their Exif orientation,
//! run through a pretrained ResNet-50 breed classifier and reduced to the most likely breeds.
//! The `dog-classify` binary wires this together; this interface exists mainly for it.

#![forbid(unsafe_code)]

#[cfg(feature = "hardened_malloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod args;
pub mod classifier;
pub mod decode;
pub mod download;
pub mod error;
pub mod exif;
pub mod help;
pub mod image;
pub mod init;
pub mod model;
pub mod orientation;
pub mod pipeline;
pub mod rank;
pub mod report;
#[cfg(test)]
mod test_utils;
