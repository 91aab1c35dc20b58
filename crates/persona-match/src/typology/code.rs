use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a person draws energy from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Energy {
    E,
    I,
}

/// How a person takes in information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Information {
    N,
    S,
}

/// How a person makes decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    T,
    F,
}

/// How a person organises daily life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifestyle {
    J,
    P,
}

/// The four independent binary axes, in code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Energy,
    Information,
    Decision,
    Lifestyle,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Energy,
        Axis::Information,
        Axis::Decision,
        Axis::Lifestyle,
    ];

    /// Both letters of the axis, first-listed letter first.
    pub fn letters(&self) -> (AxisLetter, AxisLetter) {
        match self {
            Axis::Energy => (AxisLetter::E, AxisLetter::I),
            Axis::Information => (AxisLetter::N, AxisLetter::S),
            Axis::Decision => (AxisLetter::T, AxisLetter::F),
            Axis::Lifestyle => (AxisLetter::J, AxisLetter::P),
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Axis::Energy => 0,
            Axis::Information => 1,
            Axis::Decision => 2,
            Axis::Lifestyle => 3,
        }
    }
}

/// Any single letter of a typology code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisLetter {
    E,
    I,
    N,
    S,
    T,
    F,
    J,
    P,
}

impl AxisLetter {
    pub fn axis(&self) -> Axis {
        match self {
            AxisLetter::E | AxisLetter::I => Axis::Energy,
            AxisLetter::N | AxisLetter::S => Axis::Information,
            AxisLetter::T | AxisLetter::F => Axis::Decision,
            AxisLetter::J | AxisLetter::P => Axis::Lifestyle,
        }
    }

    pub fn opposite(&self) -> AxisLetter {
        match self {
            AxisLetter::E => AxisLetter::I,
            AxisLetter::I => AxisLetter::E,
            AxisLetter::N => AxisLetter::S,
            AxisLetter::S => AxisLetter::N,
            AxisLetter::T => AxisLetter::F,
            AxisLetter::F => AxisLetter::T,
            AxisLetter::J => AxisLetter::P,
            AxisLetter::P => AxisLetter::J,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            AxisLetter::E => 'E',
            AxisLetter::I => 'I',
            AxisLetter::N => 'N',
            AxisLetter::S => 'S',
            AxisLetter::T => 'T',
            AxisLetter::F => 'F',
            AxisLetter::J => 'J',
            AxisLetter::P => 'P',
        }
    }

    fn from_char(value: char) -> Option<Self> {
        match value {
            'E' => Some(AxisLetter::E),
            'I' => Some(AxisLetter::I),
            'N' => Some(AxisLetter::N),
            'S' => Some(AxisLetter::S),
            'T' => Some(AxisLetter::T),
            'F' => Some(AxisLetter::F),
            'J' => Some(AxisLetter::J),
            'P' => Some(AxisLetter::P),
            _ => None,
        }
    }
}

/// Why a string was rejected as a typology code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypologyError {
    #[error("typology code must be 4 letters, found {found}")]
    WrongLength { found: usize },
    #[error("'{code}' is not one of the 16 typology codes")]
    UnknownLetters { code: String },
}

impl TypologyError {
    /// Stable machine-readable reason for API payloads.
    pub fn reason(&self) -> &'static str {
        match self {
            TypologyError::WrongLength { .. } => "wrong_length",
            TypologyError::UnknownLetters { .. } => "unknown_letters",
        }
    }
}

/// Four-letter typology classification. Only the 16 axis combinations exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypologyCode {
    pub energy: Energy,
    pub information: Information,
    pub decision: Decision,
    pub lifestyle: Lifestyle,
}

/// Broad family of codes sharing a middle-letter pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temperament {
    /// N and T.
    Analyst,
    /// N and F.
    Diplomat,
    /// S and J.
    Sentinel,
    /// S and P.
    Explorer,
}

impl Temperament {
    pub fn label(&self) -> &'static str {
        match self {
            Temperament::Analyst => "Analyst",
            Temperament::Diplomat => "Diplomat",
            Temperament::Sentinel => "Sentinel",
            Temperament::Explorer => "Explorer",
        }
    }
}

const fn code(e: Energy, n: Information, t: Decision, j: Lifestyle) -> TypologyCode {
    TypologyCode {
        energy: e,
        information: n,
        decision: t,
        lifestyle: j,
    }
}

impl TypologyCode {
    pub const ALL: [TypologyCode; 16] = [
        code(Energy::I, Information::S, Decision::T, Lifestyle::J),
        code(Energy::I, Information::S, Decision::F, Lifestyle::J),
        code(Energy::I, Information::N, Decision::F, Lifestyle::J),
        code(Energy::I, Information::N, Decision::T, Lifestyle::J),
        code(Energy::I, Information::S, Decision::T, Lifestyle::P),
        code(Energy::I, Information::S, Decision::F, Lifestyle::P),
        code(Energy::I, Information::N, Decision::F, Lifestyle::P),
        code(Energy::I, Information::N, Decision::T, Lifestyle::P),
        code(Energy::E, Information::S, Decision::T, Lifestyle::P),
        code(Energy::E, Information::S, Decision::F, Lifestyle::P),
        code(Energy::E, Information::N, Decision::F, Lifestyle::P),
        code(Energy::E, Information::N, Decision::T, Lifestyle::P),
        code(Energy::E, Information::S, Decision::T, Lifestyle::J),
        code(Energy::E, Information::S, Decision::F, Lifestyle::J),
        code(Energy::E, Information::N, Decision::F, Lifestyle::J),
        code(Energy::E, Information::N, Decision::T, Lifestyle::J),
    ];

    /// Builds a code from one resolved letter per axis, in axis order.
    pub(crate) fn from_axis_letters(letters: [AxisLetter; 4]) -> Option<Self> {
        let energy = match letters[0] {
            AxisLetter::E => Energy::E,
            AxisLetter::I => Energy::I,
            _ => return None,
        };
        let information = match letters[1] {
            AxisLetter::N => Information::N,
            AxisLetter::S => Information::S,
            _ => return None,
        };
        let decision = match letters[2] {
            AxisLetter::T => Decision::T,
            AxisLetter::F => Decision::F,
            _ => return None,
        };
        let lifestyle = match letters[3] {
            AxisLetter::J => Lifestyle::J,
            AxisLetter::P => Lifestyle::P,
            _ => return None,
        };
        Some(code(energy, information, decision, lifestyle))
    }

    /// Letters in axis order (energy, information, decision, lifestyle).
    pub fn letters(&self) -> [AxisLetter; 4] {
        [
            match self.energy {
                Energy::E => AxisLetter::E,
                Energy::I => AxisLetter::I,
            },
            match self.information {
                Information::N => AxisLetter::N,
                Information::S => AxisLetter::S,
            },
            match self.decision {
                Decision::T => AxisLetter::T,
                Decision::F => AxisLetter::F,
            },
            match self.lifestyle {
                Lifestyle::J => AxisLetter::J,
                Lifestyle::P => AxisLetter::P,
            },
        ]
    }

    pub fn letter(&self, axis: Axis) -> AxisLetter {
        self.letters()[axis.index()]
    }

    pub fn contains(&self, letter: AxisLetter) -> bool {
        self.letter(letter.axis()) == letter
    }

    /// Number of axes on which the two codes disagree.
    pub fn distance(&self, other: &TypologyCode) -> u8 {
        self.letters()
            .iter()
            .zip(other.letters().iter())
            .filter(|(left, right)| left != right)
            .count() as u8
    }

    pub fn temperament(&self) -> Temperament {
        match (self.information, self.decision, self.lifestyle) {
            (Information::N, Decision::T, _) => Temperament::Analyst,
            (Information::N, Decision::F, _) => Temperament::Diplomat,
            (Information::S, _, Lifestyle::J) => Temperament::Sentinel,
            (Information::S, _, Lifestyle::P) => Temperament::Explorer,
        }
    }
}

impl fmt::Display for TypologyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.letters() {
            write!(f, "{}", letter.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for TypologyCode {
    type Err = TypologyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_uppercase();
        let chars: Vec<char> = normalized.chars().collect();
        if chars.len() != 4 {
            return Err(TypologyError::WrongLength { found: chars.len() });
        }

        let unknown = || TypologyError::UnknownLetters {
            code: normalized.clone(),
        };
        let mut letters = [AxisLetter::E; 4];
        for (slot, value) in letters.iter_mut().zip(&chars) {
            *slot = AxisLetter::from_char(*value).ok_or_else(unknown)?;
        }

        Self::from_axis_letters(letters).ok_or_else(unknown)
    }
}

impl TryFrom<String> for TypologyCode {
    type Error = TypologyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypologyCode> for String {
    fn from(value: TypologyCode) -> Self {
        value.to_string()
    }
}

/// Normalizes (trim, upper-case) and checks `raw` against the 16 codes.
pub fn validate(raw: &str) -> Result<TypologyCode, TypologyError> {
    raw.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_sixteen_codes_round_trip() {
        let unique: HashSet<String> = TypologyCode::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(unique.len(), 16);

        for code in TypologyCode::ALL {
            let text = code.to_string();
            assert_eq!(validate(&text), Ok(code));
            assert_eq!(validate(&text.to_lowercase()), Ok(code));
        }
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let code = validate("  entp ").expect("valid after normalization");
        assert_eq!(code.to_string(), "ENTP");
    }

    #[test]
    fn distinguishes_length_from_letter_failures() {
        assert_eq!(
            validate("ABCDE"),
            Err(TypologyError::WrongLength { found: 5 })
        );
        assert_eq!(
            validate("ABCD"),
            Err(TypologyError::UnknownLetters {
                code: "ABCD".to_string()
            })
        );
        assert_eq!(validate(""), Err(TypologyError::WrongLength { found: 0 }));
    }

    #[test]
    fn letters_in_wrong_positions_are_rejected() {
        // Every letter belongs to the alphabet but not to its axis.
        let err = validate("NEFT").expect_err("axis order matters");
        assert_eq!(err.reason(), "unknown_letters");
    }

    #[test]
    fn distance_counts_differing_axes() {
        let entj = validate("ENTJ").unwrap();
        let isfp = validate("ISFP").unwrap();
        let estj = validate("ESTJ").unwrap();
        assert_eq!(entj.distance(&isfp), 4);
        assert_eq!(entj.distance(&estj), 1);
        assert_eq!(entj.distance(&entj), 0);
    }

    #[test]
    fn temperament_groups() {
        assert_eq!(validate("INTP").unwrap().temperament(), Temperament::Analyst);
        assert_eq!(validate("ENFJ").unwrap().temperament(), Temperament::Diplomat);
        assert_eq!(validate("ISTJ").unwrap().temperament(), Temperament::Sentinel);
        assert_eq!(validate("ESFP").unwrap().temperament(), Temperament::Explorer);
    }

    #[test]
    fn serializes_as_plain_string() {
        let code = validate("infj").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"INFJ\"");
        let parsed: TypologyCode = serde_json::from_str("\"infj\"").unwrap();
        assert_eq!(parsed, code);
        assert!(serde_json::from_str::<TypologyCode>("\"XXXX\"").is_err());
    }
}
