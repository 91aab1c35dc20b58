use crate::typology::AxisLetter;
use serde::Serialize;

/// Pole of the main personality axis an item measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Primary,
    Secondary,
}

/// Relationship area an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Basic,
    Conflict,
    Intimacy,
    Lifestyle,
    Value,
}

/// One statement of the primary quiz, answered on a 0-4 agreement scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionnaireItem {
    pub id: u32,
    pub text: &'static str,
    pub polarity: Polarity,
    pub category: QuestionCategory,
}

/// Yes/no statement used to diagnose a typology code. A yes counts towards
/// `letter`, a no towards its opposite on the same axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiagnosisQuestion {
    pub id: u32,
    pub text: &'static str,
    pub letter: AxisLetter,
}

const fn item(
    id: u32,
    text: &'static str,
    polarity: Polarity,
    category: QuestionCategory,
) -> QuestionnaireItem {
    QuestionnaireItem {
        id,
        text,
        polarity,
        category,
    }
}

const fn diagnosis(id: u32, text: &'static str, letter: AxisLetter) -> DiagnosisQuestion {
    DiagnosisQuestion { id, text, letter }
}

use AxisLetter::{E, J, N, T};
use Polarity::{Primary, Secondary};
use QuestionCategory::{Basic, Conflict, Intimacy, Lifestyle, Value};

/// Canonical 30-item questionnaire in answer order.
pub const QUESTIONNAIRE: [QuestionnaireItem; 30] = [
    item(1, "When my partner is down, offering a solution is the best comfort I can give", Primary, Conflict),
    item(2, "I will gladly give up fun today to reach a goal", Primary, Value),
    item(3, "In an argument, sorting out who is right comes before appeals to feelings", Primary, Conflict),
    item(4, "I usually take the lead in planning dates and trips", Primary, Lifestyle),
    item(5, "I feel most loved when my achievements and abilities are recognised", Primary, Intimacy),
    item(6, "I am more comfortable with blunt, direct conversation than hints", Primary, Basic),
    item(7, "Objective facts matter more to my decisions than my feelings", Primary, Value),
    item(8, "When someone is busy, fewer messages should simply be understood", Primary, Lifestyle),
    item(9, "I am at ease when I hold the initiative in a relationship", Primary, Basic),
    item(10, "Absorbing a partner's moods and complaints sometimes wears me out", Primary, Intimacy),
    item(21, "When conflict starts I need to settle it on the spot rather than take time", Primary, Conflict),
    item(22, "I want a partner who leads their own life rather than depending on me", Primary, Value),
    item(23, "Watching work done inefficiently is hard for me to tolerate", Primary, Lifestyle),
    item(24, "I feel loved through practical help more than emotional comfort", Primary, Intimacy),
    item(25, "I appreciate hard truths when they actually help me", Primary, Basic),
    item(11, "Before any solution I need to hear that my feelings make sense", Secondary, Conflict),
    item(12, "Harmony in the relationship matters more than succeeding alone", Secondary, Value),
    item(13, "In a fight, tone and expression hurt me more than the logic", Secondary, Conflict),
    item(14, "I would rather follow the mood of the day than a plan", Secondary, Lifestyle),
    item(15, "Small kindnesses and warm words make me feel most loved", Secondary, Intimacy),
    item(16, "I often swallow what I want to say so the other person is not upset", Secondary, Basic),
    item(17, "How the relationship will turn out matters more than objective facts", Secondary, Value),
    item(18, "However busy we are, we should check in with each other regularly", Secondary, Lifestyle),
    item(19, "I am more comfortable following my partner's decisions than leading", Secondary, Basic),
    item(20, "I notice my partner's mood changes right away and adjust to them", Secondary, Intimacy),
    item(26, "Even during a fight, going silent or avoiding each other is never acceptable", Secondary, Conflict),
    item(27, "I want to share every part of my day with my partner", Secondary, Value),
    item(28, "The time spent together matters more to me than efficiency", Secondary, Lifestyle),
    item(29, "Warm looks and touch make me feel loved more than practical help", Secondary, Intimacy),
    item(30, "Even a correct point is hard to accept if the tone hurts me", Secondary, Basic),
];

/// Typology diagnosis items, eight per axis.
pub const DIAGNOSIS_QUESTIONS: [DiagnosisQuestion; 32] = [
    diagnosis(1, "After a hard day, do you unwind by chatting or meeting friends?", E),
    diagnosis(2, "When meeting new people, is curiosity stronger than awkwardness?", E),
    diagnosis(3, "Do you sort out your thoughts by talking them through rather than alone?", E),
    diagnosis(4, "When you end up in the spotlight, do you quietly enjoy it?", E),
    diagnosis(5, "Do phone calls feel easier and faster than texting?", E),
    diagnosis(31, "Does a weekend at home with no plans leave you restless?", E),
    diagnosis(32, "Do group projects and activities give you energy?", E),
    diagnosis(33, "Is starting a conversation with a stranger easy for you?", E),
    diagnosis(6, "Do future possibilities and meaning matter more than present facts?", N),
    diagnosis(7, "In films and books, do you focus on hidden messages over the plot?", N),
    diagnosis(8, "At work, do you prefer the big picture and autonomy to detailed instructions?", N),
    diagnosis(9, "Do you often drift into unrealistic or whimsical daydreams?", N),
    diagnosis(10, "Do you spot patterns in small things others pass by?", N),
    diagnosis(34, "Do you enjoy abstract or philosophical conversation over practical talk?", N),
    diagnosis(35, "Do you like coming up with new methods rather than following old ones?", N),
    diagnosis(36, "When listening to an explanation, is the conclusion more important than the details?", N),
    diagnosis(11, "When giving advice, is a practical solution more helpful than empathy?", T),
    diagnosis(12, "Once an argument starts, does working out who is right come first?", T),
    diagnosis(13, "Do objective facts and efficiency outweigh personal values in decisions?", T),
    diagnosis(14, "When someone says they are hurt, do you first analyse why?", T),
    diagnosis(15, "Do strong emotional appeals get in the way of solving problems?", T),
    diagnosis(37, "When things go wrong, do you look at the process before people's feelings?", T),
    diagnosis(38, "Do you take objective criticism without feeling hurt?", T),
    diagnosis(39, "Are you often told that you come across as cold?", T),
    diagnosis(16, "Do you need at least a rough plan before a trip?", J),
    diagnosis(17, "Do sudden schedule changes stress you out?", J),
    diagnosis(18, "Do you finish work well before the deadline?", J),
    diagnosis(19, "Do you prefer reaching a conclusion quickly and closing things out?", J),
    diagnosis(20, "Does it bother you when things are not in their proper place?", J),
    diagnosis(40, "Do you enjoy writing and ticking off a to-do list?", J),
    diagnosis(41, "Do you set concrete steps before starting something?", J),
    diagnosis(42, "Do you enjoy leisure more when it has some plan or purpose?", J),
];

/// Highest raw score an item table can produce.
pub fn max_raw_score(items: &[QuestionnaireItem]) -> u32 {
    items.len() as u32 * super::MAX_RESPONSE as u32
}
