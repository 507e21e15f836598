//! Shared utilities

pub mod decompression;

pub use decompression::decompress_gzip_text;
