use std::fmt;

/// Stable identifier of a catalog video.
///
/// Catalog payloads are inconsistent about whether ids are numbers or
/// strings, so every id is normalized to its string rendering at the
/// boundary. Equality is plain string equality afterwards: `5`, `5.0` and
/// `"5"` all become `VideoId("5")`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Render a floating point id the way a catalog would print it.
    pub fn from_f64(value: f64) -> Self {
        const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
        if value.fract() == 0.0 && value.abs() < MAX_EXACT {
            Self((value as i64).to_string())
        } else {
            Self(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VideoId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for VideoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for VideoId {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<u64> for VideoId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for VideoId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<str> for VideoId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for VideoId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for VideoId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for VideoId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct VideoIdVisitor;

        impl serde::de::Visitor<'_> for VideoIdVisitor {
            type Value = VideoId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or numeric video id")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<VideoId, E> {
                Ok(VideoId::from(v))
            }

            fn visit_string<E: serde::de::Error>(
                self,
                v: String,
            ) -> Result<VideoId, E> {
                Ok(VideoId(v))
            }

            fn visit_u64<E: serde::de::Error>(
                self,
                v: u64,
            ) -> Result<VideoId, E> {
                Ok(VideoId::from(v))
            }

            fn visit_i64<E: serde::de::Error>(
                self,
                v: i64,
            ) -> Result<VideoId, E> {
                Ok(VideoId::from(v))
            }

            fn visit_f64<E: serde::de::Error>(
                self,
                v: f64,
            ) -> Result<VideoId, E> {
                if v.is_finite() {
                    Ok(VideoId::from_f64(v))
                } else {
                    Err(E::custom("video id must be a finite number"))
                }
            }
        }

        deserializer.deserialize_any(VideoIdVisitor)
    }
}
