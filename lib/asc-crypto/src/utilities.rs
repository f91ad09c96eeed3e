use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};

pub fn encode_b64url(input: &[u8]) -> Result<String, ct_codecs::Error> {
    Base64UrlSafeNoPadding::encode_to_string(input)
}

pub fn decode_b64url(input: &str) -> Result<Vec<u8>, ct_codecs::Error> {
    Base64UrlSafeNoPadding::decode_to_vec(input, None)
}
