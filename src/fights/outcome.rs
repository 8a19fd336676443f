use crate::models::common::MatchResult;

/// How a fight ended: the winner's id (if any) and the method of victory text (if any).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FightOutcome<'a> {
    pub result: Option<i32>,
    pub method: Option<&'a str>,
}

impl<'a> FightOutcome<'a> {
    pub fn new(result: Option<i32>, method: Option<&'a str>) -> Self {
        Self { result, method }
    }

    /// The outcome from `fighter_id`'s side. Any recorded winner other than
    /// `fighter_id` counts as a loss.
    pub fn for_fighter(&self, fighter_id: i32) -> MatchResult {
        match (self.result, self.method) {
            (Some(winner), _) if winner == fighter_id => MatchResult::Win,
            (Some(_), _) => MatchResult::Loss,
            (None, Some(_)) => MatchResult::Draw,
            (None, None) => MatchResult::Unknown,
        }
    }

    /// e.g. `"Win - (KO/TKO)"`, `"Loss - (SUB)"`, `"Draw - (S-Dec)"` or `"Unknown"`.
    pub fn describe_for_fighter(&self, fighter_id: i32) -> String {
        match self.for_fighter(fighter_id) {
            MatchResult::Unknown => MatchResult::Unknown.to_string(),
            result => self.with_method(result.to_string()),
        }
    }

    /// Neutral description naming the winner, e.g. `"Win - Jon Jones - (U-Dec)"`.
    pub fn describe(&self, fighter1: (i32, &str), fighter2: (i32, &str)) -> String {
        match (self.result, self.method) {
            (Some(winner), _) => {
                let name = if winner == fighter1.0 { fighter1.1 } else { fighter2.1 };
                self.with_method(format!("{} - {}", MatchResult::Win, name.trim()))
            }
            (None, Some(_)) => self.with_method(MatchResult::Draw.to_string()),
            (None, None) => MatchResult::Unknown.to_string(),
        }
    }

    /// The winner's name, `"Draw"` or `"Unknown"`.
    pub fn winner_label(&self, fighter1: (i32, &str), fighter2: (i32, &str)) -> String {
        match (self.result, self.method) {
            (Some(winner), _) if winner == fighter1.0 => fighter1.1.trim().to_string(),
            (Some(_), _) => fighter2.1.trim().to_string(),
            (None, Some(_)) => MatchResult::Draw.to_string(),
            (None, None) => MatchResult::Unknown.to_string(),
        }
    }

    fn with_method(&self, label: String) -> String {
        match self.method {
            Some(method) => format!("{} - ({})", label, method),
            None => label,
        }
    }
}
