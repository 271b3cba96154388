pub mod alphabet;
pub mod codec;
pub mod core;
pub mod error;

pub use codec::{
    ScanState, decode, decode_to_vec, encode, encode_to_string, encode_to_vec, encoded_len,
    validate,
};
pub use error::CodecError;
