use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{Error, Result, SlashCommand};

type HmacSha256 = Hmac<Sha256>;

/// Maximum clock skew accepted for `X-Slack-Request-Timestamp`.
pub const MAX_REQUEST_AGE_SECS: u64 = 300;

/// Checks that a request really comes from the configured Slack workspace.
///
/// Each check runs only when its value is configured:
/// the signing secret (`X-Slack-Signature`), the legacy verification token
/// carried in the payload, and the team id.
#[derive(Clone, Default)]
pub struct RequestVerifier {
    signing_secret: Option<String>,
    verification_token: Option<String>,
    team_id: Option<String>,
}

impl RequestVerifier {
    pub fn new(
        signing_secret: Option<String>,
        verification_token: Option<String>,
        team_id: Option<String>,
    ) -> Self {
        Self {
            signing_secret,
            verification_token,
            team_id,
        }
    }

    pub fn is_open(&self) -> bool {
        self.signing_secret.is_none() && self.verification_token.is_none() && self.team_id.is_none()
    }

    /// Verify the raw body against `X-Slack-Request-Timestamp` and
    /// `X-Slack-Signature`.
    pub fn verify_signature(
        &self,
        timestamp: Option<&str>,
        signature: Option<&str>,
        body: &[u8],
        now: i64,
    ) -> Result<()> {
        let Some(secret) = self.signing_secret.as_deref() else {
            return Ok(());
        };

        let timestamp = timestamp
            .ok_or_else(|| Error::InvalidSignature("missing request timestamp".to_string()))?;
        let signature =
            signature.ok_or_else(|| Error::InvalidSignature("missing signature".to_string()))?;

        let ts: i64 = timestamp
            .parse()
            .map_err(|_| Error::InvalidSignature("invalid timestamp".to_string()))?;

        let age = now.checked_sub(ts).map(i64::unsigned_abs);
        if !matches!(age, Some(age) if age <= MAX_REQUEST_AGE_SECS) {
            return Err(Error::InvalidSignature(
                "request timestamp too old".to_string(),
            ));
        }

        let expected = sign(secret, timestamp, body)?;

        if !constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
            return Err(Error::InvalidSignature("signature mismatch".to_string()));
        }

        Ok(())
    }

    /// Check the token and team id carried in the payload.
    pub fn verify_payload(&self, command: &SlashCommand) -> Result<()> {
        if let Some(token) = self.verification_token.as_deref() {
            if !constant_time_eq(token.as_bytes(), command.token.as_bytes()) {
                return Err(Error::Rejected("verification token mismatch".to_string()));
            }
        }

        if let Some(team_id) = self.team_id.as_deref() {
            if team_id != command.team_id {
                return Err(Error::Rejected(format!(
                    "unexpected team {}",
                    command.team_id
                )));
            }
        }

        Ok(())
    }
}

/// `v0=` + hex HMAC-SHA256 of `v0:<timestamp>:<body>`
pub fn sign(secret: &str, timestamp: &str, body: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| Error::InvalidSignature(e.to_string()))?;

    mac.update(b"v0:");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);

    Ok(format!("v0={}", hex::encode(mac.finalize().into_bytes())))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
