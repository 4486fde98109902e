use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::encoder::{percent_encode, percent_encode_opt};
use crate::error::{Error, Result};
use crate::v1::SignatureMethod;

type HmacSha1 = Hmac<Sha1>;

/// Compute `oauth_signature` for an already built base string.
///
/// The returned value is not percent-encoded; it becomes a parameter value
/// and is encoded together with the other parameters.
pub fn sign(
    consumer_secret: &str,
    token_secret: Option<&str>,
    base_string: &str,
    signature_method: SignatureMethod,
) -> Result<String> {
    match signature_method {
        SignatureMethod::PlainText => Ok(signing_key(consumer_secret, token_secret)),
        SignatureMethod::HmacSha1 => {
            generate_signature_hmacsha1(consumer_secret, token_secret, base_string)
        }
        SignatureMethod::RsaSha1 => Err(Error::NotSupported(
            "RSA-SHA1 signature method is not supported".into(),
        )),
    }
}

/// `encode(consumer_secret)&encode(token_secret)`, the `&` is always present.
fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode_opt(token_secret)
    )
}

fn generate_signature_hmacsha1(
    consumer_secret: &str,
    token_secret: Option<&str>,
    base_string: &str,
) -> Result<String> {
    let key = signing_key(consumer_secret, token_secret);
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| Error::InvalidArgument(format!("hmac key rejected: {}", e)))?;
    mac.update(base_string.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parameters::RequestParameter;
    use crate::v1::base_string;

    #[test]
    fn test_sign_photos_example() {
        let base = "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg%26\
                    oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh%26\
                    oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096%26\
                    oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal";
        let sign = sign(
            "kd94hf93k423kf44",
            Some("pfkkdhi9sl3r4s00"),
            base,
            SignatureMethod::HmacSha1,
        )
        .unwrap();
        assert_eq!(sign, "tR3+Ty81lMeYAr/Fid0kMTYa/WM=");
    }

    #[test]
    fn test_sign_rfc5849() {
        // https://tools.ietf.org/html/rfc5849#section-1.2, temporary credentials
        let params = vec![
            RequestParameter::new("oauth_consumer_key", "dpf43f3p2l4k3l03"),
            RequestParameter::new("oauth_signature_method", "HMAC-SHA1"),
            RequestParameter::new("oauth_timestamp", "137131200"),
            RequestParameter::new("oauth_nonce", "wIjqoS"),
            RequestParameter::new("oauth_callback", "http://printer.example.com/ready"),
        ];
        let base = base_string::build("post", "https://photos.example.net/initiate", &params)
            .unwrap();
        let sign = sign("kd94hf93k423kf44", None, &base, SignatureMethod::HmacSha1).unwrap();
        assert_eq!(sign, "74KNZJeDHnMBp0EMJ9ZHt/XKycU=");
    }

    #[test]
    fn test_sign_is_deterministic() {
        let a = sign("secret", None, "GET&x&y", SignatureMethod::HmacSha1).unwrap();
        let b = sign("secret", Some(""), "GET&x&y", SignatureMethod::HmacSha1).unwrap();
        assert_eq!(a, b);
        let c = sign("secret", Some("t"), "GET&x&y", SignatureMethod::HmacSha1).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_sign_plaintext() {
        assert_eq!(
            sign("secret", Some(""), "ignored", SignatureMethod::PlainText).unwrap(),
            "secret&"
        );
        assert_eq!(
            sign("kd94hf93k423kf44", Some("pfkkdhi9sl3r4s00"), "", SignatureMethod::PlainText)
                .unwrap(),
            "kd94hf93k423kf44&pfkkdhi9sl3r4s00"
        );
        assert_eq!(
            sign("a&b", Some("c d"), "", SignatureMethod::PlainText).unwrap(),
            "a%26b&c%20d"
        );
    }

    #[test]
    fn test_sign_rsa_unsupported() {
        let err = sign("secret", None, "GET&x&y", SignatureMethod::RsaSha1).unwrap_err();
        assert!(matches!(err, Error::NotSupported(_)));
    }
}
