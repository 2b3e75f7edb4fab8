use crate::errors::ConfigError;
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt::Display;
use std::ops::{
    BitOr,
    BitOrAssign,
};
use std::str::FromStr;

/// Set of requested fragment series, stored as bit flags.
///
/// The `n*` flags ask for the neutral loss variant of a series without the
/// series itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IonSeries(u16);

impl IonSeries {
    pub const A_NEUTRAL_LOSS: Self = Self(1);
    pub const B_NEUTRAL_LOSS: Self = Self(2);
    pub const Y_NEUTRAL_LOSS: Self = Self(4);
    pub const A: Self = Self(8);
    pub const B: Self = Self(16);
    pub const C: Self = Self(32);
    pub const D: Self = Self(64);
    pub const V: Self = Self(128);
    pub const W: Self = Self(256);
    pub const X: Self = Self(512);
    pub const Y: Self = Self(1024);
    pub const Z: Self = Self(2048);

    const TOKENS: [(&'static str, Self); 12] = [
        ("nA", Self::A_NEUTRAL_LOSS),
        ("nB", Self::B_NEUTRAL_LOSS),
        ("nY", Self::Y_NEUTRAL_LOSS),
        ("a", Self::A),
        ("b", Self::B),
        ("c", Self::C),
        ("d", Self::D),
        ("v", Self::V),
        ("w", Self::W),
        ("x", Self::X),
        ("y", Self::Y),
        ("z", Self::Z),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(&self) -> u16 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when every flag of `other` is set.
    pub fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0 && other.0 != 0
    }

    /// Flags that are accepted but do not produce fragments.
    pub fn unsupported(&self) -> Self {
        Self(self.0 & (Self::D.0 | Self::V.0 | Self::W.0))
    }

    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ConfigError> {
        tokens
            .iter()
            .try_fold(Self::empty(), |acc, x| Ok(acc | x.as_ref().parse::<IonSeries>()?))
    }
}

impl BitOr for IonSeries {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for IonSeries {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl FromStr for IonSeries {
    type Err = ConfigError;

    /// Tokens are case sensitive: `nA`, `nB`, `nY`, `a`, `b`, `c`, `d`, `v`, `w`, `x`, `y`, `z`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::TOKENS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, flag)| *flag)
            .ok_or_else(|| ConfigError::UnknownIonSeries {
                token: s.to_string(),
            })
    }
}

impl Display for IonSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = Self::TOKENS
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect();
        write!(f, "[{}]", names.join(","))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[allow(non_camel_case_types)]
pub enum IonKind {
    a,
    b,
    c,
    x,
    y,
    z,
}

impl IonKind {
    pub fn flag(&self) -> IonSeries {
        match self {
            Self::a => IonSeries::A,
            Self::b => IonSeries::B,
            Self::c => IonSeries::C,
            Self::x => IonSeries::X,
            Self::y => IonSeries::Y,
            Self::z => IonSeries::Z,
        }
    }

    pub fn neutral_loss_flag(&self) -> Option<IonSeries> {
        match self {
            Self::a => Some(IonSeries::A_NEUTRAL_LOSS),
            Self::b => Some(IonSeries::B_NEUTRAL_LOSS),
            Self::y => Some(IonSeries::Y_NEUTRAL_LOSS),
            _ => None,
        }
    }

    pub fn wants_base(&self, series: IonSeries) -> bool {
        series.contains(self.flag())
    }

    pub fn wants_neutral_loss(&self, series: IonSeries) -> bool {
        self.wants_base(series)
            || self
                .neutral_loss_flag()
                .is_some_and(|flag| series.contains(flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        let series = IonSeries::from_tokens(&["b", "y", "nY"]).unwrap();
        assert_eq!(series.bits(), 16 + 1024 + 4);
        assert!(series.contains(IonSeries::B));
        assert!(!series.contains(IonSeries::A));
        assert_eq!(series.to_string(), "[nY,b,y]");
    }

    #[test]
    fn test_unknown_token() {
        let out = IonSeries::from_tokens(&["b", "q"]);
        assert_eq!(
            out,
            Err(ConfigError::UnknownIonSeries {
                token: "q".to_string()
            })
        );
        assert!("B".parse::<IonSeries>().is_err());
    }

    #[test]
    fn test_unsupported() {
        let series = IonSeries::from_tokens(&["b", "w", "d"]).unwrap();
        assert_eq!(series.unsupported(), IonSeries::D | IonSeries::W);
        assert!(IonSeries::B.unsupported().is_empty());
    }

    #[test]
    fn test_kind_flags() {
        let only_loss = IonSeries::B_NEUTRAL_LOSS;
        assert!(!IonKind::b.wants_base(only_loss));
        assert!(IonKind::b.wants_neutral_loss(only_loss));
        assert!(!IonKind::c.wants_neutral_loss(only_loss));
        assert!(IonKind::c.wants_neutral_loss(IonSeries::C));
        assert_eq!(IonKind::y.neutral_loss_flag(), Some(IonSeries::Y_NEUTRAL_LOSS));
    }
}
