//! RFC 6238 TOTP verification for the optional MFA login step.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha1::Sha1;

use quill_core::ports::{AuthError, TotpVerifier};

type HmacSha1 = Hmac<Sha1>;

const BASE32: base32::Alphabet = base32::Alphabet::Rfc4648 { padding: false };

/// RFC 6238 verifier: SHA-1, 30 second step, 6 digits, one step of
/// clock skew in either direction. Secrets are base32-encoded, the
/// form authenticator apps expect.
pub struct RfcTotp {
    step_seconds: u64,
    digits: u32,
    skew_steps: i64,
}

impl Default for RfcTotp {
    fn default() -> Self {
        Self {
            step_seconds: 30,
            digits: 6,
            skew_steps: 1,
        }
    }
}

impl RfcTotp {
    /// Check `code` against `secret` at an explicit unix time.
    pub fn verify_at(&self, secret: &str, code: &str, unix_time: u64) -> Result<bool, AuthError> {
        let normalized: String = secret
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        let key =
            base32::decode(BASE32, &normalized).ok_or(AuthError::MalformedSecret)?;

        let counter = (unix_time / self.step_seconds) as i64;
        for step in (counter - self.skew_steps)..=(counter + self.skew_steps) {
            if step < 0 {
                continue;
            }
            if self.code_at(&key, step as u64)? == code {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn code_at(&self, key: &[u8], counter: u64) -> Result<String, AuthError> {
        let mut mac = HmacSha1::new_from_slice(key)
            .map_err(|_| AuthError::MalformedSecret)?;
        mac.update(&counter.to_be_bytes());
        let digest = mac.finalize().into_bytes();

        // RFC 4226 dynamic truncation.
        let offset = (digest[digest.len() - 1] & 0x0f) as usize;
        let binary = (u32::from(digest[offset] & 0x7f) << 24)
            | (u32::from(digest[offset + 1]) << 16)
            | (u32::from(digest[offset + 2]) << 8)
            | u32::from(digest[offset + 3]);

        let code = binary % 10u32.pow(self.digits);
        Ok(format!("{code:0width$}", width = self.digits as usize))
    }
}

impl TotpVerifier for RfcTotp {
    fn verify(&self, secret: &str, code: &str) -> Result<bool, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AuthError::HashingError(e.to_string()))?
            .as_secs();
        self.verify_at(secret, code, now)
    }
}
