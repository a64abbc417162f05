pub mod codec;
pub mod mime_detect;

pub use codec::{decode_upload, encode_jpeg, EncodedImage, DEFAULT_JPEG_QUALITY};
pub use mime_detect::{detect_mime_type, is_image};
