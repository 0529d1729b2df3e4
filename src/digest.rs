use md5::{Digest, Md5};

/// `md5`: lowercase hex MD5 of the UTF-8 bytes of `input`.
pub fn md5_hex(input: Option<&str>) -> Option<String> {
    input.map(|s| hex::encode(Md5::digest(s.as_bytes())))
}
