// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-issued identifier of a device+user registration record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationId(String);

impl RegistrationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-issued identifier of a single notification delivery, used for
/// delivered/read status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryId(String);

impl DeliveryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw APNs device token.
///
/// The platform hands the token over as opaque bytes; the registration
/// service expects it hex-encoded, which is what [`Display`] renders.
///
/// [`Display`]: fmt::Display
#[derive(Clone, PartialEq, Eq)]
pub struct DeviceToken(Vec<u8>);

impl DeviceToken {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        Ok(Self(hex::decode(hex)?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for DeviceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for DeviceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DeviceToken").field(&self.to_string()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_token_hex_encoding() {
        let token = DeviceToken::new(vec![0x0a, 0xff, 0x00, 0x42]);
        assert_eq!(token.to_string(), "0aff0042");

        let parsed = DeviceToken::from_hex("0aff0042").unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn device_token_rejects_invalid_hex() {
        assert!(DeviceToken::from_hex("not hex").is_err());
    }
}
