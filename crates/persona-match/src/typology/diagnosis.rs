use super::code::{Axis, AxisLetter, Decision, Energy, Information, Lifestyle, TypologyCode};
use crate::quiz::DiagnosisQuestion;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Letter chosen when both letters of an axis have equal tallies, in axis
/// order: E/I -> I, N/S -> S, T/F -> F, J/P -> P.
pub const TIE_BREAKS: [AxisLetter; 4] = [AxisLetter::I, AxisLetter::S, AxisLetter::F, AxisLetter::P];

/// A single yes/no answer to a diagnosis question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisAnswer {
    pub question_id: u32,
    pub is_yes: bool,
}

impl DiagnosisAnswer {
    pub fn new(question_id: u32, is_yes: bool) -> Self {
        Self {
            question_id,
            is_yes,
        }
    }
}

/// Per-letter counters across the four axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    counts: [u32; 8],
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a yes towards `letter`, a no towards its opposite.
    pub fn record(&mut self, letter: AxisLetter, is_yes: bool) {
        let target = if is_yes { letter } else { letter.opposite() };
        self.counts[slot(target)] += 1;
    }

    pub fn count(&self, letter: AxisLetter) -> u32 {
        self.counts[slot(letter)]
    }

    /// A strictly greater count wins; a tie goes to the letter in `TIE_BREAKS`.
    fn wins(&self, letter: AxisLetter) -> bool {
        let (own, rival) = (self.count(letter), self.count(letter.opposite()));
        own > rival || (own == rival && TIE_BREAKS.contains(&letter))
    }

    pub fn resolve_axis(&self, axis: Axis) -> AxisLetter {
        let (first, second) = axis.letters();
        if self.wins(first) {
            first
        } else {
            second
        }
    }

    pub fn energy(&self) -> Energy {
        if self.wins(AxisLetter::E) {
            Energy::E
        } else {
            Energy::I
        }
    }

    pub fn information(&self) -> Information {
        if self.wins(AxisLetter::N) {
            Information::N
        } else {
            Information::S
        }
    }

    pub fn decision(&self) -> Decision {
        if self.wins(AxisLetter::T) {
            Decision::T
        } else {
            Decision::F
        }
    }

    pub fn lifestyle(&self) -> Lifestyle {
        if self.wins(AxisLetter::J) {
            Lifestyle::J
        } else {
            Lifestyle::P
        }
    }

    pub fn resolve(&self) -> TypologyCode {
        TypologyCode {
            energy: self.energy(),
            information: self.information(),
            decision: self.decision(),
            lifestyle: self.lifestyle(),
        }
    }
}

fn slot(letter: AxisLetter) -> usize {
    match letter {
        AxisLetter::E => 0,
        AxisLetter::I => 1,
        AxisLetter::N => 2,
        AxisLetter::S => 3,
        AxisLetter::T => 4,
        AxisLetter::F => 5,
        AxisLetter::J => 6,
        AxisLetter::P => 7,
    }
}

/// Tallies `answers` against `questions` and resolves a code. Answers naming
/// an unknown question id are skipped.
pub fn diagnose(answers: &[DiagnosisAnswer], questions: &[DiagnosisQuestion]) -> TypologyCode {
    let by_id: HashMap<u32, AxisLetter> = questions.iter().map(|q| (q.id, q.letter)).collect();

    let mut tally = Tally::new();
    for answer in answers {
        match by_id.get(&answer.question_id) {
            Some(letter) => tally.record(*letter, answer.is_yes),
            None => warn!(
                question_id = answer.question_id,
                "diagnosis answer references unknown question"
            ),
        }
    }

    tally.resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::DIAGNOSIS_QUESTIONS;

    fn answers_for(letter_yes: impl Fn(AxisLetter, usize) -> bool) -> Vec<DiagnosisAnswer> {
        let mut seen: HashMap<AxisLetter, usize> = HashMap::new();
        DIAGNOSIS_QUESTIONS
            .iter()
            .map(|q| {
                let idx = seen.entry(q.letter).or_insert(0);
                let answer = DiagnosisAnswer::new(q.id, letter_yes(q.letter, *idx));
                *idx += 1;
                answer
            })
            .collect()
    }

    #[test]
    fn tie_break_table_is_isfp() {
        let letters: String = TIE_BREAKS.iter().map(|l| l.as_char()).collect();
        assert_eq!(letters, "ISFP");
        for (axis, letter) in Axis::ALL.iter().zip(TIE_BREAKS) {
            assert_eq!(letter.axis(), *axis);
        }
    }

    #[test]
    fn even_split_resolves_to_defaults() {
        let answers = answers_for(|_, idx| idx % 2 == 0);
        assert_eq!(diagnose(&answers, &DIAGNOSIS_QUESTIONS).to_string(), "ISFP");
        assert_eq!(Tally::new().resolve().to_string(), "ISFP");
    }

    #[test]
    fn all_yes_yields_first_letters() {
        let answers = answers_for(|_, _| true);
        assert_eq!(diagnose(&answers, &DIAGNOSIS_QUESTIONS).to_string(), "ENTJ");
    }

    #[test]
    fn all_no_yields_opposites() {
        let answers = answers_for(|_, _| false);
        assert_eq!(diagnose(&answers, &DIAGNOSIS_QUESTIONS).to_string(), "ISFP");
    }

    #[test]
    fn single_vote_margin_wins() {
        // 5 yes / 3 no on energy and decision, 3 yes / 5 no on the others.
        let answers = answers_for(|letter, idx| match letter {
            AxisLetter::E | AxisLetter::T => idx < 5,
            _ => idx < 3,
        });
        assert_eq!(diagnose(&answers, &DIAGNOSIS_QUESTIONS).to_string(), "ESTP");
    }

    #[test]
    fn no_answer_counts_toward_opposite() {
        let mut tally = Tally::new();
        tally.record(AxisLetter::N, false);
        assert_eq!(tally.count(AxisLetter::S), 1);
        assert_eq!(tally.count(AxisLetter::N), 0);
        assert_eq!(tally.resolve_axis(Axis::Information), AxisLetter::S);
    }

    #[test]
    fn per_axis_resolution_agrees_with_letters() {
        for first in 0..3u32 {
            for second in 0..3u32 {
                let mut tally = Tally::new();
                for axis in Axis::ALL {
                    let (lead, trail) = axis.letters();
                    (0..first).for_each(|_| tally.record(lead, true));
                    (0..second).for_each(|_| tally.record(trail, true));
                }

                let code = tally.resolve();
                assert_eq!(
                    code.letters(),
                    Axis::ALL.map(|axis| tally.resolve_axis(axis)),
                    "first={first} second={second}"
                );
                let expected_energy = if first > second { Energy::E } else { Energy::I };
                assert_eq!(tally.energy(), expected_energy);
                assert_eq!(code.energy, expected_energy);
            }
        }
    }

    #[test]
    fn unknown_questions_are_ignored() {
        let answers = vec![DiagnosisAnswer::new(999, true), DiagnosisAnswer::new(1, true)];
        assert_eq!(diagnose(&answers, &DIAGNOSIS_QUESTIONS).to_string(), "ESFP");
    }

    #[test]
    fn diagnosis_output_always_validates() {
        let answers = answers_for(|letter, idx| (slot(letter) + idx) % 3 == 0);
        let code = diagnose(&answers, &DIAGNOSIS_QUESTIONS);
        assert_eq!(super::super::validate(&code.to_string()), Ok(code));
    }
}
