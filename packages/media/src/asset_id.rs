use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::TryRngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content_type::AllowedMediaType;

/// Bytes of randomness behind every asset name.
pub const ENTROPY_BYTES: usize = 32;

/// Length of the encoded random stem (unpadded base64 of 32 bytes).
pub const STEM_LEN: usize = 43;

#[derive(Debug, Error)]
pub enum AllocationError {
    /// The random source could not supply enough bytes.
    #[error("entropy source failure: {0}")]
    Entropy(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid asset name: {0}")]
pub struct InvalidAssetName(&'static str);

/// A stored asset's file name: `<43 URL-safe base64 chars>.<extension>`.
///
/// The stem carries no meaning; it is not derived from the owner, the time
/// or the content.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AssetName(String);

impl AssetName {
    /// Parse and validate a name taken from outside, e.g. a request path.
    pub fn parse(s: &str) -> Result<Self, InvalidAssetName> {
        let (stem, extension) = s
            .split_once('.')
            .ok_or(InvalidAssetName("missing extension"))?;

        if stem.len() != STEM_LEN {
            return Err(InvalidAssetName("wrong identifier length"));
        }
        if !stem
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(InvalidAssetName("identifier is not URL-safe base64"));
        }
        if AllowedMediaType::from_extension(extension).is_none() {
            return Err(InvalidAssetName("unsupported extension"));
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The random part, without the extension.
    pub fn stem(&self) -> &str {
        &self.0[..STEM_LEN]
    }

    /// The extension, without the leading dot.
    pub fn extension(&self) -> &str {
        &self.0[STEM_LEN + 1..]
    }

    /// The media type this asset was accepted as.
    pub fn media_type(&self) -> Option<AllowedMediaType> {
        AllowedMediaType::from_extension(self.extension())
    }
}

impl fmt::Debug for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetName({})", self.0)
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for AssetName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssetName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Allocate a fresh asset name from the operating system's CSPRNG.
///
/// Uniqueness rests on the width of the random stem; no registry is
/// consulted. A failing entropy source fails the allocation, never falls
/// back to a weaker generator.
pub fn allocate(media: AllowedMediaType) -> Result<AssetName, AllocationError> {
    allocate_with(&mut OsRng, media)
}

/// Allocate an asset name from the given fallible random source.
pub fn allocate_with<R>(rng: &mut R, media: AllowedMediaType) -> Result<AssetName, AllocationError>
where
    R: TryRngCore + ?Sized,
{
    let mut bytes = [0u8; ENTROPY_BYTES];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| AllocationError::Entropy(e.to_string()))?;

    let stem = URL_SAFE_NO_PAD.encode(bytes);
    Ok(AssetName(format!("{stem}.{}", media.extension())))
}
