pub mod password;
pub mod url_validator;

use base64::Engine;

/// 生成会话令牌（32 bytes = 256 bits，URL-safe Base64 编码）
pub fn generate_secure_token() -> String {
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
