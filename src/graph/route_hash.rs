use alloy_primitives::hex;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// Stable 32-byte identity of a route, reproducible across processes.
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct RouteHash(pub [u8; 32]);

impl Display for RouteHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode_prefixed(self.0))
    }
}

impl Debug for RouteHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RouteHash({})", hex::encode_prefixed(self.0))
    }
}

impl From<[u8; 32]> for RouteHash {
    fn from(hash: [u8; 32]) -> Self {
        RouteHash(hash)
    }
}

impl Serialize for RouteHash {
    fn serialize<S>(&self, serializer: S) -> eyre::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode_prefixed(self.0))
    }
}

impl<'de> Deserialize<'de> for RouteHash {
    fn deserialize<D>(deserializer: D) -> eyre::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        let hash: [u8; 32] =
            bytes.try_into().map_err(|b: Vec<u8>| serde::de::Error::custom(format!("expected 32 bytes, got {}", b.len())))?;
        Ok(RouteHash(hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_route_hash() {
        let route_hash = RouteHash([1; 32]);

        let serialized = serde_json::to_string(&route_hash).unwrap();
        let deserialized: RouteHash = serde_json::from_str(&serialized).unwrap();

        assert_eq!(route_hash, deserialized);
    }

    #[test]
    fn test_deserialize_rejects_wrong_length() {
        let result = serde_json::from_str::<RouteHash>("\"0x0101\"");
        assert!(result.is_err());

        let result = serde_json::from_str::<RouteHash>("\"0xzz\"");
        assert!(result.is_err());
    }
}
