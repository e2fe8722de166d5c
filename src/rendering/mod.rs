pub mod codec;

pub use codec::{decode_png, encode_png, read_png, write_png, PngOptions};
