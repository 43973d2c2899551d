pub const AUTHORIZATION: &str = "authorization";
pub const CONTENT_TYPE: &str = "content-type";
pub const HOST: &str = "host";
pub const AMZ_DATE: &str = "x-amz-date";
pub const AMZ_TARGET: &str = "x-amz-target";
pub const AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";
pub const AMZN_REQUEST_ID: &str = "x-amzn-requestid";
pub const AMZN_ERROR_TYPE: &str = "x-amzn-errortype";

pub const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
pub const SIGNING_ALGORITHM: &str = "AWS4-HMAC-SHA256";
