//! Skill-count scoring and the admin dashboard's filter/rank pass.
//!
//! Scoring is deliberately naive: ten points per listed skill, capped at
//! 100. It exists to give the reviewer a rough ordering, not a ranking
//! model.

use crate::models::SubmissionRecord;

/// Computes the score for a skills field: split on commas, count the
/// non-blank segments after trimming, ten points each, clamped to 100.
///
/// Empty input scores 0. Leading/trailing commas and blank segments
/// between commas are not counted.
pub fn score(skills_text: &str) -> u32 {
    let count = skills_text
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .count() as u32;
    (count * 10).min(100)
}

/// A submission with its computed score attached, as shown on the
/// admin dashboard.
#[derive(Debug, Clone)]
pub struct RankedSubmission {
    pub submission: SubmissionRecord,
    pub score: u32,
}

/// Filters submissions by a case-insensitive substring match on the
/// skills field (an empty filter keeps everything), attaches scores,
/// and sorts descending by score. The sort is stable, so equal scores
/// keep their original insertion order.
pub fn filter_and_rank(submissions: Vec<SubmissionRecord>, skill_filter: &str) -> Vec<RankedSubmission> {
    let needle = skill_filter.trim().to_lowercase();
    let mut ranked: Vec<RankedSubmission> = submissions
        .into_iter()
        .filter(|s| needle.is_empty() || s.skills.to_lowercase().contains(&needle))
        .map(|s| RankedSubmission {
            score: score(&s.skills),
            submission: s,
        })
        .collect();
    // Vec::sort_by is stable; ties preserve insertion order.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(name: &str, skills: &str) -> SubmissionRecord {
        SubmissionRecord {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            skills: skills.to_string(),
            filename: format!("{name}.pdf"),
        }
    }

    #[test]
    fn test_empty_skills_score_zero() {
        assert_eq!(score(""), 0);
        assert_eq!(score("   "), 0);
        assert_eq!(score(",,,"), 0);
    }

    #[test]
    fn test_ten_points_per_skill() {
        assert_eq!(score("a,b,c"), 30);
        assert_eq!(score("rust"), 10);
    }

    #[test]
    fn test_blank_segments_ignored() {
        assert_eq!(score("a,,b"), 20);
        assert_eq!(score(", a , ,b,"), 20);
    }

    #[test]
    fn test_clamped_at_100() {
        let eleven = "a,b,c,d,e,f,g,h,i,j,k";
        assert_eq!(score(eleven), 100);
        assert_eq!(score("a,b,c,d,e,f,g,h,i,j"), 100);
    }

    #[test]
    fn test_empty_filter_keeps_all() {
        let ranked = filter_and_rank(vec![sub("a", "x"), sub("b", "y")], "");
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let ranked = filter_and_rank(
            vec![
                sub("a", "Python, SQL"),
                sub("b", "rust"),
                sub("c", "data, PYTHONic tooling"),
            ],
            "python",
        );
        let names: Vec<&str> = ranked.iter().map(|r| r.submission.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_sorted_descending_by_score() {
        let ranked = filter_and_rank(
            vec![sub("low", "a"), sub("high", "a,b,c"), sub("mid", "a,b")],
            "",
        );
        let names: Vec<&str> = ranked.iter().map(|r| r.submission.name.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let ranked = filter_and_rank(
            vec![sub("first", "a,b"), sub("second", "c,d"), sub("third", "e,f")],
            "",
        );
        let names: Vec<&str> = ranked.iter().map(|r| r.submission.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
}
