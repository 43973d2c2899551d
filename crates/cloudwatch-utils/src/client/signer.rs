use crate::client::{headers, transport::HttpRequest};
use hmac::{Hmac, Mac};
use jiff::Timestamp;
use sha2::{Digest, Sha256};

pub(super) struct Signer {
    pub(super) access_key_id: String,
    pub(super) secret_access_key: String,
    pub(super) session_token: Option<String>,
    pub(super) region: String,
}

impl Signer {
    /// Stamp `request` with `x-amz-date` (and the session token, if any) and
    /// attach a Signature Version 4 `authorization` header.
    pub fn sign(&self, request: &mut HttpRequest, path: &str, service: &str, now: Timestamp) {
        request
            .headers
            .push((headers::AMZ_DATE, now.strftime("%Y%m%dT%H%M%SZ").to_string()));
        if let Some(token) = &self.session_token {
            request.headers.push((headers::AMZ_SECURITY_TOKEN, token.clone()));
        }

        let authorization = self.authorization(
            "POST",
            path,
            "",
            &request.headers,
            &request.body,
            service,
            now,
        );
        request.headers.push((headers::AUTHORIZATION, authorization));
    }

    #[allow(clippy::too_many_arguments)]
    fn authorization(
        &self,
        method: &str,
        path: &str,
        query: &str,
        request_headers: &[(&str, String)],
        payload: &[u8],
        service: &str,
        now: Timestamp,
    ) -> String {
        let amz_date = now.strftime("%Y%m%dT%H%M%SZ").to_string();
        let date = now.strftime("%Y%m%d").to_string();

        let mut canonical_headers: Vec<(String, String)> = request_headers
            .iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), canonical_header_value(value)))
            .collect();
        canonical_headers.sort_by(|a, b| a.0.cmp(&b.0));
        let signed_headers = canonical_headers
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(";");

        // CanonicalRequest = METHOD + "\n"
        //     + CanonicalURI + "\n"
        //     + CanonicalQueryString + "\n"
        //     + CanonicalHeaders + "\n"
        //     + SignedHeaders + "\n"
        //     + HexEncode(Hash(Payload))
        let mut canonical_request = String::with_capacity(512);
        canonical_request.push_str(method);
        canonical_request.push('\n');
        canonical_request.push_str(path);
        canonical_request.push('\n');
        canonical_request.push_str(query);
        canonical_request.push('\n');
        for (name, value) in &canonical_headers {
            canonical_request.push_str(name);
            canonical_request.push(':');
            canonical_request.push_str(value);
            canonical_request.push('\n');
        }
        canonical_request.push('\n');
        canonical_request.push_str(&signed_headers);
        canonical_request.push('\n');
        canonical_request.push_str(&hex::encode(Sha256::digest(payload)));

        let scope = format!("{date}/{}/{service}/aws4_request", self.region);
        let string_to_sign = format!(
            "{}\n{amz_date}\n{scope}\n{}",
            headers::SIGNING_ALGORITHM,
            hex::encode(Sha256::digest(canonical_request.as_bytes())),
        );

        let secret = format!("AWS4{}", self.secret_access_key);
        let k_date = hmac_sha256(secret.as_bytes(), date.as_bytes());
        let k_region = hmac_sha256(&k_date, self.region.as_bytes());
        let k_service = hmac_sha256(&k_region, service.as_bytes());
        let k_signing = hmac_sha256(&k_service, b"aws4_request");
        let signature = hex::encode(hmac_sha256(&k_signing, string_to_sign.as_bytes()));

        format!(
            "{} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
            headers::SIGNING_ALGORITHM,
            self.access_key_id,
        )
    }
}

/// Trimmed, with inner runs of whitespace collapsed to a single space.
fn canonical_header_value(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("hmac accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_signer() -> Signer {
        Signer {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string(),
            session_token: None,
            region: "us-east-1".to_string(),
        }
    }

    fn example_time() -> Timestamp {
        "2015-08-30T12:36:00Z".parse().unwrap()
    }

    #[test]
    fn test_get_vanilla() {
        let signer = example_signer();
        let headers = [
            ("Host", "example.amazonaws.com".to_string()),
            ("X-Amz-Date", "20150830T123600Z".to_string()),
        ];
        let authorization =
            signer.authorization("GET", "/", "", &headers, b"", "service", example_time());
        assert_eq!(
            authorization,
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, \
             SignedHeaders=host;x-amz-date, \
             Signature=5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31"
        );
    }

    #[test]
    fn test_header_value_whitespace_is_collapsed() {
        let signer = example_signer();
        let sign = |value: &str| {
            let headers = [
                ("Host", "example.amazonaws.com".to_string()),
                ("My-Header1", value.to_string()),
                ("X-Amz-Date", "20150830T123600Z".to_string()),
            ];
            signer.authorization("GET", "/", "", &headers, b"", "service", example_time())
        };
        assert_eq!(sign("  value1   with\t  runs "), sign("value1 with runs"));
        assert_ne!(sign("value1 with runs"), sign("value1with runs"));
        assert_eq!(canonical_header_value(" a   b  c "), "a b c");
    }

    #[test]
    fn test_sign_request() {
        let mut signer = example_signer();
        signer.session_token = Some("session".to_string());

        let mut request = HttpRequest::post("https://logs.us-east-1.amazonaws.com/")
            .header(headers::HOST, "logs.us-east-1.amazonaws.com")
            .header(headers::AMZ_TARGET, "Logs_20140328.DescribeLogGroups")
            .body(b"{}".to_vec());
        signer.sign(&mut request, "/", "logs", example_time());

        assert_eq!(request.header_value(headers::AMZ_DATE), Some("20150830T123600Z"));
        assert_eq!(request.header_value(headers::AMZ_SECURITY_TOKEN), Some("session"));
        let authorization = request.header_value(headers::AUTHORIZATION).unwrap();
        assert!(authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/logs/aws4_request, "
        ));
        assert!(authorization.contains(
            "SignedHeaders=host;x-amz-date;x-amz-security-token;x-amz-target, "
        ));
    }
}
