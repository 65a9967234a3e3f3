pub struct ScoringEngine;

impl ScoringEngine {
    /// One point per letter, +2 at six letters, +3 more at eight.
    pub fn score_word(word: &str) -> u32 {
        let length = word.trim().chars().count() as u32;
        let mut points = length;
        if length >= 6 {
            points += 2;
        }
        if length >= 8 {
            points += 3;
        }
        points
    }

    /// The award given to *each* player in cooperative mode. Odd scores
    /// round up for both players, so together the pair banks one point more
    /// than the word earned. Intended behavior, not a rounding bug.
    pub fn cooperative_share(points: u32) -> u32 {
        points.div_ceil(2)
    }
}
